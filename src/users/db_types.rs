use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::schema::users as UsersTable;

/// Internal user, created by the identity provider's first-login flow.
#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = UsersTable)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRecord {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: NaiveDateTime,
}
