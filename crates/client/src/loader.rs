use std::sync::Arc;

use paper_core::{Partition, ViewError, ViewState};
use paper_observability::AppMetrics;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::client::DataClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    Failed(ViewError),
    /// The view went away before the fetch finished; state was left untouched.
    Cancelled,
}

/// Drives one view through `Loading -> Ready | Error`.
///
/// The fetch is raced against the view's cancellation token, and the token is checked
/// again before the result is stored, so a view that has been torn down is never written.
#[derive(Clone)]
pub struct ViewLoader {
    client: DataClient,
    state: Arc<RwLock<ViewState>>,
    metrics: Arc<AppMetrics>,
}

impl ViewLoader {
    pub fn new(client: DataClient, metrics: Arc<AppMetrics>) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ViewState::Loading)),
            metrics,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state.read().clone()
    }

    pub fn partition(&self) -> Option<Partition> {
        self.state.read().partition()
    }

    #[instrument(skip(self, cancel))]
    pub async fn load(&self, data_id: &str, cancel: &CancellationToken) -> LoadOutcome {
        *self.state.write() = ViewState::Loading;

        if cancel.is_cancelled() {
            self.metrics.inc_fetch_cancelled();
            return LoadOutcome::Cancelled;
        }

        self.metrics.inc_fetch();
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            result = self.client.fetch_units(data_id) => Some(result),
        };

        let Some(result) = result.filter(|_| !cancel.is_cancelled()) else {
            debug!("view cancelled while fetching; dropping result");
            self.metrics.inc_fetch_cancelled();
            return LoadOutcome::Cancelled;
        };

        let (next, outcome) = match result {
            Ok(units) => (ViewState::Ready(units), LoadOutcome::Ready),
            Err(error) => {
                warn!(error = %error, "structured data fetch failed");
                self.metrics.inc_fetch_failure();
                let view_error = error.view_error();
                (ViewState::Error(view_error), LoadOutcome::Failed(view_error))
            }
        };

        *self.state.write() = next;
        outcome
    }
}
