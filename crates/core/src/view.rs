use serde::Serialize;
use thiserror::Error;

use crate::models::{Partition, Unit};
use crate::partition::partition;

/// User-facing failure of a view. Every fetch failure collapses into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewError {
    #[error("Data not found or server error")]
    NotFound,
    #[error("Error fetching data")]
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Ready(Vec<Unit>),
    Error(ViewError),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn units(&self) -> Option<&[Unit]> {
        match self {
            Self::Ready(units) => Some(units),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ViewError> {
        match self {
            Self::Error(error) => Some(*error),
            _ => None,
        }
    }

    /// Partitions the loaded units; recomputed on every call.
    pub fn partition(&self) -> Option<Partition> {
        self.units().map(partition)
    }
}
