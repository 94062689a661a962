use serde::Serialize;

/// Aggregated figures of one employee for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthSummary {
    pub total_hours: f64,
    pub total_commission: f64,
    pub work_days: u32,
    pub vacation_days: u32,
    pub sick_days: u32,
    pub total_tours_before_18: i64,
    pub total_tours_after_18: i64,
    /// Expected hours for the month, derived from the weekly contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_hours_month: Option<f64>,
}
