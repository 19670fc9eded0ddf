//! The module for writing the document.

mod as_doc;
mod buf_writer;
mod markdown;

pub use as_doc::{AsDoc, AsDocResult, DeploymentsDoc};
pub use buf_writer::BufWriter;
pub use markdown::Markdown;
