use anyhow::Result;
use diesel::prelude::*;

use crate::users::db_types::UserRecord;
use crate::utils::commons::DbConn;

pub fn get_user_by_external_id<'a>(conn: DbConn<'a>, external: &str) -> Result<Option<UserRecord>> {
    use crate::schema::users::dsl::*;

    let user = users
        .filter(external_id.eq(external))
        .first::<UserRecord>(conn)
        .optional()?;

    Ok(user)
}
