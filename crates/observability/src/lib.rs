use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    fetches_total: AtomicU64,
    fetch_failures_total: AtomicU64,
    fetches_cancelled_total: AtomicU64,
    pdf_exports_total: AtomicU64,
    pdf_pages_total: AtomicU64,
}

/// Crates whose events are kept at `info` unless `RUST_LOG` says otherwise.
const WORKSPACE_TARGETS: [&str; 4] = ["paper_api", "paper_client", "paper_render", "paper_core"];

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub fetches_total: u64,
    pub fetch_failures_total: u64,
    pub fetches_cancelled_total: u64,
    pub pdf_exports_total: u64,
    pub pdf_pages_total: u64,
    pub pages_per_export: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_fetch(&self) {
        self.fetches_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fetch_failure(&self) {
        self.fetch_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fetch_cancelled(&self) {
        self.fetches_cancelled_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_export(&self, pages: usize) {
        self.pdf_exports_total.fetch_add(1, Ordering::Relaxed);
        self.pdf_pages_total
            .fetch_add(pages as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let exports = self.pdf_exports_total.load(Ordering::Relaxed);
        let pages = self.pdf_pages_total.load(Ordering::Relaxed);

        MetricsSnapshot {
            fetches_total: self.fetches_total.load(Ordering::Relaxed),
            fetch_failures_total: self.fetch_failures_total.load(Ordering::Relaxed),
            fetches_cancelled_total: self.fetches_cancelled_total.load(Ordering::Relaxed),
            pdf_exports_total: exports,
            pdf_pages_total: pages,
            pages_per_export: if exports == 0 {
                0.0
            } else {
                pages as f64 / exports as f64
            },
        }
    }
}

fn default_directives(service_name: &str) -> String {
    std::iter::once(service_name)
        .chain(WORKSPACE_TARGETS.into_iter().filter(|target| *target != service_name))
        .map(|target| format!("{target}=info"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the JSON subscriber once per process. Events go to stderr so that
/// command output on stdout (partition JSON from the CLI) stays parseable.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(service_name)));

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .init();
    });
}
