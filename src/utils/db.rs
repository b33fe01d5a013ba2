use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use anyhow::Result;

use crate::utils::commons::DbPool;

pub fn get_conn(pool: &DbPool)->Result<PooledConnection<ConnectionManager<PgConnection>>> {
    let conn = pool.get()?;

    Ok(conn)
}
