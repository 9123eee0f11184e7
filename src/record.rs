use chrono::NaiveDate;
use serde::Serialize;

/// Placeholder for a schedule date the page did not yield (0001-01-01).
pub fn unset_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Short date as printed in the CSV: `YYYY/MM/DD`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IpoSchedule {
    pub apply_start: NaiveDate,
    pub apply_end: NaiveDate,
    pub winning_announce: NaiveDate,
}

impl Default for IpoSchedule {
    fn default() -> Self {
        Self {
            apply_start: unset_date(),
            apply_end: unset_date(),
            winning_announce: unset_date(),
        }
    }
}

impl IpoSchedule {
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpoRecord {
    pub url: String,
    pub company_name: String,
    pub stock_code: String,
    pub schedule: IpoSchedule,
}

impl IpoRecord {
    /// CSV fields in header order.
    pub fn to_row(&self) -> [String; 5] {
        [
            self.company_name.clone(),
            self.stock_code.clone(),
            short_date(self.schedule.apply_start),
            short_date(self.schedule.apply_end),
            short_date(self.schedule.winning_announce),
        ]
    }
}

// ── Tests ──
