//! Config errors.

/// Represents a failed attempt to extract a [`Config`](crate::Config) from a
/// [`Figment`](figment::Figment).
#[derive(Clone, Debug, thiserror::Error)]
#[error("failed to extract chronicles config: {error}")]
pub struct ExtractConfigError {
    #[source]
    error: Box<figment::Error>,
}

impl ExtractConfigError {
    /// Wraps the figment error.
    pub fn new(error: figment::Error) -> Self {
        Self { error: Box::new(error) }
    }

    /// Returns the underlying figment error.
    pub fn inner(&self) -> &figment::Error {
        &self.error
    }
}
