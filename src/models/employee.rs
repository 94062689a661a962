use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Contracted hours per week.
    pub contract_hours: f64,
    pub has_commission: bool,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Employee {
    pub fn period(&self) -> EmploymentPeriod {
        EmploymentPeriod {
            start: Some(self.start_date),
            end: self.end_date,
        }
    }
}

/// Fields accepted when creating or replacing an employee.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub name: String,
    pub contract_hours: f64,
    pub has_commission: bool,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl From<&Employee> for EmployeeInput {
    fn from(e: &Employee) -> Self {
        Self {
            name: e.name.clone(),
            contract_hours: e.contract_hours,
            has_commission: e.has_commission,
            is_active: e.is_active,
            start_date: e.start_date,
            end_date: e.end_date,
        }
    }
}

/// Inclusive employment window; either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmploymentPeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl EmploymentPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    /// Human-readable form of the window, used in rejection messages.
    pub fn describe(&self) -> String {
        match (self.start, self.end) {
            (Some(s), Some(e)) => format!("from {} to {}", s, e),
            (Some(s), None) => format!("from {}", s),
            (None, Some(e)) => format!("until {}", e),
            (None, None) => "unbounded".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EmploymentPeriod;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn describe_names_each_bound() {
        let full = EmploymentPeriod { start: Some(d("2024-01-01")), end: Some(d("2024-06-30")) };
        let open_end = EmploymentPeriod { start: Some(d("2024-01-01")), end: None };
        let open_start = EmploymentPeriod { start: None, end: Some(d("2024-06-30")) };

        assert_eq!(full.describe(), "from 2024-01-01 to 2024-06-30");
        assert_eq!(open_end.describe(), "from 2024-01-01");
        assert_eq!(open_start.describe(), "until 2024-06-30");
    }

    #[test]
    fn open_bounds_accept_any_date_on_that_side() {
        let open_end = EmploymentPeriod { start: Some(d("2024-01-01")), end: None };
        assert!(!open_end.contains(d("2023-12-31")));
        assert!(open_end.contains(d("2099-12-31")));

        let open_start = EmploymentPeriod { start: None, end: Some(d("2024-06-30")) };
        assert!(open_start.contains(d("1990-01-01")));
        assert!(!open_start.contains(d("2024-07-01")));
    }
}
