use crate::aggregator::monthly_totals;
use crate::error::AnalyticsError;
use crate::report::{DashboardReport, MarginDistribution, MonthlySeries, RunwayGauge};
use core_types::{Month, ReportRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use tracing::error;

/// Display policy for the cash-runway gauge.
///
/// The horizon caps the linear runway projection and the gauge bounds clamp
/// the rendered percentage. These are presentation policy, not business
/// logic, which is why they are configuration rather than literals.
#[derive(Debug, Clone, PartialEq)]
pub struct RunwayConfig {
    /// Number of months that fills the gauge completely.
    pub horizon_months: u32,
    pub gauge_min: Decimal,
    pub gauge_max: Decimal,
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            horizon_months: 12,
            gauge_min: Decimal::ZERO,
            gauge_max: Decimal::ONE_HUNDRED,
        }
    }
}

/// A stateless calculator for deriving dashboard metrics from report records.
#[derive(Debug, Default)]
pub struct DashboardEngine {}

impl DashboardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for computing the dashboard.
    ///
    /// Runs all four calculators over the same immutable snapshot. The
    /// calculators are independent of each other and each failure is
    /// absorbed here: it is logged and replaced by that calculator's safe
    /// default, so the caller always receives a well-formed report.
    pub fn calculate(&self, records: &[ReportRecord], runway: &RunwayConfig) -> DashboardReport {
        DashboardReport {
            revenue_growth: self.revenue_growth(records).unwrap_or_else(|e| {
                error!(error = %e, "revenue growth calculation failed");
                MonthlySeries::default()
            }),
            burn_rate: self.burn_rate(records).unwrap_or_else(|e| {
                error!(error = %e, "burn rate calculation failed");
                MonthlySeries::default()
            }),
            margin_distribution: self.margin_distribution(records).unwrap_or_else(|e| {
                error!(error = %e, "margin distribution calculation failed");
                MarginDistribution::default()
            }),
            runway: self.cash_runway(records, runway).unwrap_or_else(|e| {
                error!(error = %e, "cash runway calculation failed");
                RunwayGauge::default()
            }),
        }
    }

    /// Month-over-month percentage change of aggregated revenue.
    ///
    /// The first month's growth is defined as zero (no prior period), and a
    /// zero-revenue previous month also reports zero growth rather than an
    /// infinite rate. The output is parallel to the aggregated months.
    pub fn revenue_growth(
        &self,
        records: &[ReportRecord],
    ) -> Result<MonthlySeries, AnalyticsError> {
        let totals = monthly_totals(records, ReportRecord::revenue);
        let months: Vec<Month> = totals.keys().copied().collect();
        let revenues: Vec<Decimal> = totals.into_values().collect();

        let mut values = Vec::with_capacity(revenues.len());
        for (index, &current) in revenues.iter().enumerate() {
            if index == 0 {
                values.push(Decimal::ZERO);
                continue;
            }
            let previous = revenues[index - 1];
            if previous.is_zero() {
                values.push(Decimal::ZERO);
            } else {
                values.push((current - previous) / previous * Decimal::ONE_HUNDRED);
            }
        }

        Ok(MonthlySeries { months, values })
    }

    /// Monthly gross-burn totals, used directly as a plotted series.
    pub fn burn_rate(&self, records: &[ReportRecord]) -> Result<MonthlySeries, AnalyticsError> {
        Ok(series_from(monthly_totals(
            records,
            ReportRecord::gross_burn,
        )))
    }

    /// Classifies every record's margin into one of the five fixed bands.
    ///
    /// Bands use half-open lower bounds (>= 81, >= 61, >= 41, >= 21, rest),
    /// so classification is exhaustive and mutually exclusive; negative and
    /// missing margins fall into the bottom band.
    pub fn margin_distribution(
        &self,
        records: &[ReportRecord],
    ) -> Result<MarginDistribution, AnalyticsError> {
        let mut distribution = MarginDistribution::default();
        for record in records {
            distribution.counts[band_index(record.margin())] += 1;
        }
        Ok(distribution)
    }

    /// Projects months of cash remaining from the single most recent record.
    ///
    /// A negative net burn divides the final cash balance; anything else
    /// means cash is flat or growing, i.e. infinite runway. Ties on
    /// `created_at` are broken deterministically: the record appearing last
    /// in the input wins. An empty record set yields the zero gauge.
    pub fn cash_runway(
        &self,
        records: &[ReportRecord],
        config: &RunwayConfig,
    ) -> Result<RunwayGauge, AnalyticsError> {
        let Some(latest) = records
            .iter()
            .enumerate()
            .max_by_key(|(index, record)| (record.created_at, *index))
            .map(|(_, record)| record)
        else {
            return Ok(RunwayGauge::default());
        };

        let net_burn = latest.net_burn();
        let runway_months = if net_burn < Decimal::ZERO {
            let months = latest
                .final_cash_balance()
                .checked_div(net_burn.abs())
                .ok_or_else(|| AnalyticsError::DivisionByZero("net burn".to_string()))?;
            Some(months)
        } else {
            None
        };

        let gauge = match runway_months {
            // No burn fills the gauge: infinite runway.
            None => config.gauge_max,
            Some(months) => {
                let horizon = Decimal::from(config.horizon_months);
                let pct = months
                    .checked_div(horizon)
                    .ok_or_else(|| AnalyticsError::DivisionByZero("runway horizon".to_string()))?
                    * Decimal::ONE_HUNDRED;
                pct.clamp(config.gauge_min, config.gauge_max)
            }
        };

        let gauge_pct = gauge
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .ok_or_else(|| {
                AnalyticsError::Calculation(format!("gauge value {gauge} is not a valid percentage"))
            })?;

        Ok(RunwayGauge {
            runway_months,
            gauge_pct,
        })
    }
}

fn series_from(totals: BTreeMap<Month, Decimal>) -> MonthlySeries {
    let (months, values) = totals.into_iter().unzip();
    MonthlySeries { months, values }
}

fn band_index(margin: Decimal) -> usize {
    if margin >= Decimal::from(81) {
        0
    } else if margin >= Decimal::from(61) {
        1
    } else if margin >= Decimal::from(41) {
        2
    } else if margin >= Decimal::from(21) {
        3
    } else {
        4
    }
}
