use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One reporting period's financial snapshot for a tenant.
///
/// Only `created_at` is guaranteed present. Every monetary field is optional
/// because the report source does not enforce them; the accessor methods
/// default a missing value to zero so that calculators never have to branch
/// on presence. Records are not assumed sorted or deduplicated by period:
/// two records can land in the same calendar month and must be summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// The period this record represents. Always present.
    pub created_at: DateTime<Utc>,
    /// Monetary revenue for the period. Non-negative by convention.
    pub revenue: Option<Decimal>,
    /// Gross cash outflow for the period. Semantically an expense.
    pub gross_burn: Option<Decimal>,
    /// Signed net cash movement. Negative means cash is being consumed.
    pub net_burn: Option<Decimal>,
    /// Profit margin percentage. May be negative, no fixed upper bound.
    pub margin: Option<Decimal>,
    /// Cash on hand at period end. May be negative.
    pub final_cash_balance: Option<Decimal>,
}

impl ReportRecord {
    /// Creates a record for the given period with every metric absent.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            revenue: None,
            gross_burn: None,
            net_burn: None,
            margin: None,
            final_cash_balance: None,
        }
    }

    pub fn revenue(&self) -> Decimal {
        self.revenue.unwrap_or(Decimal::ZERO)
    }

    pub fn gross_burn(&self) -> Decimal {
        self.gross_burn.unwrap_or(Decimal::ZERO)
    }

    pub fn net_burn(&self) -> Decimal {
        self.net_burn.unwrap_or(Decimal::ZERO)
    }

    pub fn margin(&self) -> Decimal {
        self.margin.unwrap_or(Decimal::ZERO)
    }

    pub fn final_cash_balance(&self) -> Decimal {
        self.final_cash_balance.unwrap_or(Decimal::ZERO)
    }
}

/// Parameters that select which reports a session fetches.
///
/// A change in the filter is what triggers a fresh fetch; the filter itself
/// is opaque to the calculators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Only include reports created on or after this date.
    pub from: Option<NaiveDate>,
    /// Only include reports created on or before this date.
    pub to: Option<NaiveDate>,
}
