//! # Finsight Report Store
//!
//! This crate owns the session's raw report collection and exposes it to any
//! number of independent readers (the dashboard calculators) without
//! triggering redundant fetches or recomputation races.
//!
//! ## Architectural Principles
//!
//! - **One Fetch, Many Consumers:** A single owner performs the outbound
//!   read and publishes one consistent `Snapshot` through a watch channel.
//!   Every reader observes the same snapshot for a given publication; a
//!   snapshot is immutable after it is published.
//! - **Failure Is a State, Not an Exception:** A failed fetch is logged and
//!   published as an empty, ready snapshot. Readers never see an error and
//!   never distinguish "fetch failed" from "zero reports" except through the
//!   log.
//! - **Last Fetch Wins:** Refreshes are numbered; a result arriving after a
//!   newer refresh began is discarded, so readers are always a pure function
//!   of the latest published snapshot, not of which fetch produced it.

use api_client::ReportsClient;
use api_client::error::ApiError;
use core_types::{ReportFilter, ReportRecord};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, error};

/// A single published view of the session's report collection.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// The records, immutable after publication.
    pub reports: Arc<Vec<ReportRecord>>,
    /// False only while the first fetch of the session is still in flight.
    /// While not ready, readers must treat the collection as empty.
    pub ready: bool,
}

impl Snapshot {
    fn empty(ready: bool) -> Self {
        Self {
            reports: Arc::new(Vec::new()),
            ready,
        }
    }
}

/// Owns the session's report snapshot and publishes it to its readers.
pub struct ReportStore {
    client: Arc<dyn ReportsClient>,
    tx: watch::Sender<Snapshot>,
    generation: AtomicU64,
}

impl ReportStore {
    /// Creates a store in the initial not-ready state: empty records,
    /// `ready = false`.
    pub fn new(client: Arc<dyn ReportsClient>) -> Self {
        let (tx, _rx) = watch::channel(Snapshot::empty(false));
        Self {
            client,
            tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Returns a receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Fetches the report collection once and publishes it as the new
    /// snapshot.
    ///
    /// Exactly one outbound read per call. On failure the error is logged
    /// and an empty, ready snapshot is published instead; there is no
    /// automatic retry. If another refresh started while this one was in
    /// flight, this result is discarded (last fetch wins).
    pub async fn refresh(&self, filter: &ReportFilter) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let reports = match self.client.fetch_reports(filter).await {
            Ok(reports) => reports,
            Err(e) => {
                log_fetch_failure(&e);
                Vec::new()
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale fetch result");
            return;
        }

        self.tx.send_replace(Snapshot {
            reports: Arc::new(reports),
            ready: true,
        });
    }
}

fn log_fetch_failure(e: &ApiError) {
    error!(error = %e, "failed to fetch reports; publishing empty snapshot");
}
