use uuid::Uuid;

use crate::db::enums::UserRole;
use crate::middleware::auth::AuthUserInfo;

/// Who is acting on a request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl RequestContext {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&AuthUserInfo> for RequestContext {
    fn from(auth: &AuthUserInfo) -> Self {
        Self::new(auth.id(), auth.role())
    }
}
