//! The report printed when a run fails.

use chronicles_common::errors::{dedup_chain, display_chain, find_cause};
use chronicles_doc::{DocError, ExplorerError};
use chronicles_ledger::LedgerError;
use eyre::EyreHandler;
use std::{error::Error, fmt};

/// Renders an error as its chain of messages, followed by a hint for failures that have to be
/// resolved in the project.
#[derive(Default)]
pub struct Handler {
    debug_handler: Option<Box<dyn EyreHandler>>,
}

impl Handler {
    /// Delegates `{:?}` to `debug_handler` when there is one.
    pub fn with_debug_handler(debug_handler: Option<Box<dyn EyreHandler>>) -> Self {
        Self { debug_handler }
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_chain(error))
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(debug_handler) = &self.debug_handler {
            return debug_handler.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let messages = dedup_chain(error);
        let Some((message, context)) = messages.split_first() else { return Ok(()) };
        write!(f, "{message}")?;
        if !context.is_empty() {
            write!(f, "\n\nContext:")?;
            for cause in context {
                write!(f, "\n- {cause}")?;
            }
        }
        if let Some(hint) = hint(error) {
            write!(f, "\n\nHint: {hint}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(debug_handler) = &mut self.debug_handler {
            debug_handler.track_caller(location);
        }
    }
}

/// Suggests how to resolve `error`.
///
/// Only the ledger and rendering errors that point at the project or the broadcast get a hint.
pub fn hint(error: &(dyn Error + 'static)) -> Option<String> {
    if let Some(err) = find_cause::<LedgerError>(error) {
        return match err {
            LedgerError::ImplementationMismatch { proxy, .. } => {
                Some(format!("upgrade proxy {proxy} to the new implementation, then run again"))
            }
            LedgerError::ArgumentCountMismatch { .. } => Some(
                "the broadcast was made from different sources, check out the commit it was \
                 broadcast from"
                    .to_string(),
            ),
            LedgerError::ArtifactNotFound { name, .. } => Some(format!(
                "artifacts are looked up by contract name, declare {name} in {name}.sol"
            )),
            LedgerError::CommitAlreadyProcessed(_) | LedgerError::Fs(_) => None,
        };
    }

    match find_cause::<DocError>(error)? {
        DocError::Explorer(ExplorerError::UnsupportedChain(chain)) => Some(format!(
            "chain {chain} has no known block explorer, only its json ledger can be written"
        )),
        DocError::Fmt(_) => None,
    }
}

/// Installs the [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// # Details
///
/// Errors are rendered by [`Handler`], unless `CHRONICLES_DEBUG` is set in the environment, in
/// which case the more verbose handler of `color-eyre` is installed.
///
/// Panics are always caught by the `color-eyre` handler.
pub fn install() {
    let panic_section = "This is a bug. Consider reporting it along with the broadcast file.";
    let (panic_hook, debug_hook) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();
    let debug_hook = debug_hook.into_eyre_hook();
    let debug = std::env::var_os("CHRONICLES_DEBUG").is_some();
    if let Err(e) = eyre::set_hook(Box::new(move |e| {
        Box::new(Handler::with_debug_handler(debug.then(|| debug_hook(e))))
    })) {
        debug!("failed to install eyre error hook: {e}");
    }
}
