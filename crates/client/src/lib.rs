pub mod client;
pub mod config;
pub mod loader;

pub use client::{DataClient, FetchError};
pub use config::ClientConfig;
pub use loader::{LoadOutcome, ViewLoader};
pub use tokio_util::sync::CancellationToken;
