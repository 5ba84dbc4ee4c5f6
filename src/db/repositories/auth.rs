use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::auth::{NewUser, User};

pub struct AuthRepo;

impl AuthRepo {
    pub fn find_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(target_email))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(email.eq(target_email))))
            .get_result(conn)
    }

    pub fn exists_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(
            users.filter(username.eq(target_username)),
        ))
        .get_result(conn)
    }

    pub fn insert_user(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    // `(id, username)` of every student.
}
