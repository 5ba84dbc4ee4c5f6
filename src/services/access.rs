use uuid::Uuid;

use crate::error::AppError;
use crate::services::context::RequestContext;

pub const NOT_OWNER_MESSAGE: &str = "Not authorized to update this roadmap";
pub const LOCKED_MESSAGE: &str =
    "Cannot edit roadmap after students have started learning. Contact an admin for changes.";

/// Structural edit policy for a roadmap. Admins always pass; anyone else must
/// own the roadmap and it must still be editable.
pub fn authorize_structural_edit(
    ctx: &RequestContext,
    owner_id: Uuid,
    editable: bool,
) -> Result<(), AppError> {
    if ctx.is_admin() {
        return Ok(());
    }
    if ctx.user_id != owner_id {
        return Err(AppError::forbidden(NOT_OWNER_MESSAGE));
    }
    if !editable {
        return Err(AppError::forbidden(LOCKED_MESSAGE));
    }
    Ok(())
}
