use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Inclusive calendar range covering one month, `[first_day, last_day]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl MonthRange {
    /// The month that `day` falls in.
    pub fn containing(day: NaiveDate) -> Self {
        let first_day = day - Days::new(u64::from(day.day0()));
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);

        Self { first_day, last_day }
    }

    /// The current month on the server's local calendar.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let day = at.date();
        day >= self.first_day && day <= self.last_day
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.first_day.and_time(NaiveTime::MIN)
    }

    /// Exclusive upper bound: midnight after the last day.
    pub fn ends_before(&self) -> NaiveDateTime {
        self.last_day
            .succ_opt()
            .unwrap_or(self.last_day)
            .and_time(NaiveTime::MIN)
    }
}
