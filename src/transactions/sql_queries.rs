use anyhow::Result;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::sql_types;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::commons::DbConn;
use crate::utils::period::MonthRange;

const MONTHLY_EXPENSES_QUERY: &str = r"
select sum(amount) as total from transactions
where user_id = $1
  and account_id = $2
  and transaction_type = 'EXPENSE'
  and date >= $3
  and date < $4;
";

#[derive(Serialize, Deserialize, QueryableByName)]
pub struct ExpenseTotal {
    #[diesel(sql_type = sql_types::Nullable<sql_types::Numeric>)]
    pub total: Option<BigDecimal>,
}

pub fn get_monthly_expenses<'a>(
    conn: DbConn<'a>,
    user: Uuid,
    account: Uuid,
    range: MonthRange,
) -> Result<ExpenseTotal> {
    let res = diesel::sql_query(MONTHLY_EXPENSES_QUERY)
        .bind::<sql_types::Uuid, _>(user)
        .bind::<sql_types::Uuid, _>(account)
        .bind::<sql_types::Timestamp, _>(range.starts_at())
        .bind::<sql_types::Timestamp, _>(range.ends_before())
        .get_result::<ExpenseTotal>(conn)?;

    Ok(res)
}
