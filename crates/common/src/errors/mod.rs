//! Commonly used errors

mod fs;
pub use fs::FsPathError;

use eyre::Chain;
use std::error::Error;

/// Displays a chain of errors in a single line, e.g. `failed to save ledger; permission denied`.
pub fn display_chain(error: &(dyn Error + 'static)) -> String {
    dedup_chain(error).join("; ")
}

/// Returns the messages of `error` and its sources, outermost first.
///
/// A source whose message is already contained in the previous one is dropped, so that
/// `#[error("...: {source}")]` wrappers don't repeat themselves.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = Chain::new(error)
        .map(|cause| cause.to_string().trim().to_string())
        .filter(|cause| !cause.is_empty())
        .collect::<Vec<_>>();
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

/// Returns the first error of type `E` in the chain of `error`.
pub fn find_cause<'a, E: Error + 'static>(error: &'a (dyn Error + 'static)) -> Option<&'a E> {
    Chain::new(error).find_map(|cause| cause.downcast_ref::<E>())
}
