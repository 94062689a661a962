//! Daily commission pool: formation, apportionment and monthly capping.
//!
//! Callers must run [`CommissionLogic::recompute`] for a date after any
//! write touching that date (entries, revenue, thresholds, settings)
//! before reading commission amounts back.

mod store;
mod threshold;

pub use store::{CommissionStore, WorkShift};
pub use threshold::resolve_threshold;

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::HeadcountMode;
use crate::utils::date::weekday_index;
use crate::utils::time::{floor2, round2};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Commission granted to one eligible employee on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub employee_id: i64,
    pub entry_id: i64,
    pub hours: f64,
    /// Hour-proportional share before the monthly cap.
    pub share: f64,
    /// Commission booked earlier in the same month.
    pub month_to_date: f64,
    /// Persisted amount.
    pub amount: f64,
}

/// Outcome of a recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCommission {
    pub date: NaiveDate,
    pub revenue: f64,
    pub threshold: f64,
    pub headcount: u32,
    pub total_hours: f64,
    pub pool: f64,
    pub allocations: Vec<Allocation>,
}

impl DayCommission {
    pub fn total_allocated(&self) -> f64 {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    pub fn amount_for(&self, employee_id: i64) -> f64 {
        self.allocations
            .iter()
            .find(|a| a.employee_id == employee_id)
            .map(|a| a.amount)
            .unwrap_or(0.0)
    }
}

/// Hours and entry of one eligible employee.
struct EligibleHours {
    entry_id: i64,
    hours: f64,
}

pub struct CommissionLogic;

impl CommissionLogic {
    /// Recompute and persist every commission of `date` in one transaction.
    pub fn recompute(
        pool: &mut DbPool,
        date: NaiveDate,
        mode: HeadcountMode,
    ) -> AppResult<DayCommission> {
        let tx = pool.conn.transaction()?;
        let outcome = Self::recompute_with(&*tx, date, mode)?;
        tx.commit()?;
        Ok(outcome)
    }

    /// Recompute every date of `dates` in the given order.
    pub fn recompute_dates(
        pool: &mut DbPool,
        dates: &[NaiveDate],
        mode: HeadcountMode,
    ) -> AppResult<Vec<DayCommission>> {
        let mut out = Vec::with_capacity(dates.len());
        for date in dates {
            out.push(Self::recompute(pool, *date, mode)?);
        }
        Ok(out)
    }

    pub fn recompute_with<S: CommissionStore + ?Sized>(
        store: &S,
        date: NaiveDate,
        mode: HeadcountMode,
    ) -> AppResult<DayCommission> {
        let revenue = store.revenue_for(date)?;
        let settings = store.settings()?;
        let shifts = store.work_shifts(date)?;

        // Participants and eligible hours, keyed by employee.
        let mut workers = BTreeSet::new();
        let mut eligible: BTreeMap<i64, EligibleHours> = BTreeMap::new();

        for shift in &shifts {
            workers.insert(shift.employee_id);

            if shift.has_commission {
                let slot = eligible.entry(shift.employee_id).or_insert(EligibleHours {
                    entry_id: shift.entry_id,
                    hours: 0.0,
                });
                slot.hours += shift.hours();
            }
        }

        let headcount = match mode {
            HeadcountMode::AllWorkers => workers.len(),
            HeadcountMode::EligibleOnly => eligible.len(),
        } as u32;

        let weekday = weekday_index(date);
        let rules = store.thresholds_for(weekday, headcount)?;
        let threshold = resolve_threshold(&rules, weekday, headcount, date);

        let total_hours: f64 = eligible.values().map(|e| e.hours).sum();

        let pool = if revenue >= threshold && total_hours > 0.0 && settings.percentage > 0.0 {
            revenue * settings.percentage / 100.0
        } else {
            0.0
        };

        let mut allocations = Vec::new();
        for (employee_id, e) in &eligible {
            if e.hours <= 0.0 {
                continue;
            }

            let share = if total_hours > 0.0 {
                pool * e.hours / total_hours
            } else {
                0.0
            };
            let month_to_date = store.month_commission_excluding(*employee_id, date)?;
            let allowed = (settings.monthly_max - month_to_date).max(0.0);
            // A clipped amount is cut to cents so rounding cannot exceed the cap.
            let amount = if share > allowed {
                floor2(allowed)
            } else {
                round2(share)
            };

            store.set_commission(e.entry_id, amount)?;

            allocations.push(Allocation {
                employee_id: *employee_id,
                entry_id: e.entry_id,
                hours: e.hours,
                share,
                month_to_date,
                amount,
            });
        }

        let keep: Vec<i64> = allocations.iter().map(|a| a.entry_id).collect();
        store.zero_commission_except(date, &keep)?;

        Ok(DayCommission {
            date,
            revenue,
            threshold,
            headcount,
            total_hours,
            pool,
            allocations,
        })
    }
}
