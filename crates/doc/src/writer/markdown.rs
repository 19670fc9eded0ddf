use crate::{AsDoc, AsDocResult};
use std::fmt;

/// The markdown and inline html format.
#[derive(Debug)]
pub enum Markdown<'a> {
    /// H1 heading item.
    H1(&'a str),
    /// H2 heading item.
    H2(&'a str),
    /// H3 heading item.
    H3(&'a str),
    /// Link item.
    Link(&'a str, &'a str),
    /// Html anchor opening its target in a new tab.
    Anchor(&'a str, &'a str),
}

impl AsDoc for Markdown<'_> {
    fn as_doc(&self) -> AsDocResult {
        let doc = match self {
            Self::H1(title) => format!("# {title}"),
            Self::H2(title) => format!("## {title}"),
            Self::H3(title) => format!("### {title}"),
            Self::Link(val, link) => format!("[{val}]({link})"),
            Self::Anchor(val, link) => format!(r#"<a href="{link}" target="_blank">{val}</a>"#),
        };
        Ok(doc)
    }
}

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_doc().map_err(|_| fmt::Error)?)
    }
}
