use core_types::Month;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display labels of the margin bands, in fixed display order.
///
/// The classification in `DashboardEngine::margin_distribution` produces its
/// counts in exactly this order.
pub const BAND_LABELS: [&str; 5] = ["81–100", "61–80", "41–60", "21–40", "0–20"];

/// A chronologically ordered monthly series: `months[i]` labels `values[i]`.
///
/// Only months present in the underlying records appear. Absent months are
/// never zero-filled; the canonical Jan..Dec ordering is used solely to sort
/// the months that do appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub months: Vec<Month>,
    pub values: Vec<Decimal>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// The 3-letter month labels, parallel to `values`.
    pub fn labels(&self) -> Vec<&'static str> {
        self.months.iter().map(Month::abbrev).collect()
    }
}

/// A counting histogram of per-record margins over the five fixed bands.
///
/// `counts[i]` corresponds to `BAND_LABELS[i]`. Every record increments
/// exactly one count, so the counts always sum to the number of input
/// records. This is a raw count, not a percentage; callers normalize if
/// they need to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginDistribution {
    pub counts: [u64; 5],
}

impl MarginDistribution {
    /// Total number of records that were classified.
    pub fn record_count(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// The cash-runway projection derived from the most recent report.
///
/// This is a deliberately lossy, display-oriented projection: a linear
/// extrapolation of the last-known net burn, capped at the configured
/// horizon. It must not be mistaken for a finance-grade runway estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunwayGauge {
    /// Projected months of cash remaining. `None` means infinite runway
    /// (the latest report shows no net burn).
    pub runway_months: Option<Decimal>,
    /// The clamped, rounded gauge percentage the dashboard renders.
    pub gauge_pct: u32,
}

/// The full set of derived structures the dashboard renders.
///
/// This struct is the final output of the `DashboardEngine` and serves as the
/// data transfer object for dashboard results throughout the system. The
/// default value is the safe empty shape every calculator falls back to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Month-over-month revenue growth rate, in percent.
    pub revenue_growth: MonthlySeries,
    /// Monthly gross-burn totals, plotted directly.
    pub burn_rate: MonthlySeries,
    /// Per-record margin counts over the five fixed bands.
    pub margin_distribution: MarginDistribution,
    /// Projected months of cash remaining, as a gauge percentage.
    pub runway: RunwayGauge,
}
