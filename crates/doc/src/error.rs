use crate::ExplorerError;
use std::fmt;

/// Errors raised while rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error(transparent)]
    Explorer(#[from] ExplorerError),

    #[error("failed to format document")]
    Fmt(#[from] fmt::Error),
}
