//! # Finsight Analytics Engine
//!
//! This crate turns a raw collection of per-period financial report records
//! into the derived series and distributions the dashboard visualizes:
//! revenue growth rate, burn-rate trend, margin distribution, and the
//! cash-runway gauge.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `DashboardEngine` is a stateless
//!   calculator. It takes an immutable snapshot of records as input and
//!   produces a `DashboardReport` as output, regardless of input ordering
//!   or duplicate periods. This makes it highly reliable and easy to test.
//! - **Always Renderable:** Failures inside an individual calculator are
//!   absorbed at the assembly boundary; the dashboard always receives a
//!   well-formed (possibly all-zero) report.
//!
//! ## Public API
//!
//! - `DashboardEngine`: The main struct that contains the calculation logic.
//! - `DashboardReport`: The standardized struct bundling all derived metrics.
//! - `RunwayConfig`: The display policy (horizon, clamp bounds) for the gauge.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregator;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::monthly_totals;
pub use engine::{DashboardEngine, RunwayConfig};
pub use error::AnalyticsError;
pub use report::{
    BAND_LABELS, DashboardReport, MarginDistribution, MonthlySeries, RunwayGauge,
};
