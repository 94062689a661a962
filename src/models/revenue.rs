use chrono::NaiveDate;
use serde::Serialize;

/// Total takings of one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct Revenue {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub notes: String,
}
