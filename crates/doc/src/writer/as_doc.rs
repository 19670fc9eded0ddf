use crate::{BufWriter, DocError, Explorer, Markdown, ProjectInfo};
use chrono::DateTime;
use chronicles_ledger::{DeploymentRecord, Ledger};
use std::collections::HashMap;

/// The result of [`AsDoc::as_doc`].
pub type AsDocResult = Result<String, DocError>;

/// A trait for formatting an item as documentation.
#[auto_impl::auto_impl(&)]
pub trait AsDoc {
    /// Formats the item into a doc string.
    fn as_doc(&self) -> AsDocResult;
}

/// Timestamps above this are in milliseconds.
const MILLIS_THRESHOLD: u64 = 1_000_000_000_000;

const SUMMARY_TABLE_HEADERS: &[&str] = &["Contract", "Address", "Version"];

/// The deployments page of a chain, rendered from the `latest` section of its ledger.
#[derive(Debug)]
pub struct DeploymentsDoc<'a> {
    ledger: &'a Ledger,
    project: &'a ProjectInfo,
    /// Contract name to its source file, relative to the project root.
    sources: HashMap<String, String>,
}

impl<'a> DeploymentsDoc<'a> {
    pub fn new(ledger: &'a Ledger, project: &'a ProjectInfo) -> Self {
        Self { ledger, project, sources: HashMap::new() }
    }

    /// Sets the source files source links point to. Contracts without one link to
    /// `src/<Name>.sol`.
    pub fn with_sources(mut self, sources: HashMap<String, String>) -> Self {
        self.sources = sources;
        self
    }

    fn source_anchor(&self, name: &str) -> String {
        let path = self.sources.get(name).cloned().unwrap_or_else(|| format!("src/{name}.sol"));
        Markdown::Anchor(name, &self.project.blob_url(&path)).to_string()
    }

    fn write_contract(
        &self,
        explorer: &Explorer,
        name: &str,
        record: &DeploymentRecord,
    ) -> AsDocResult {
        let mut writer = BufWriter::default();
        let address = record.deployment.address.to_string();

        writer.write_heading(name)?;
        writer.writeln()?;
        writer.writeln_raw(format_args!(
            "Address: {}",
            Markdown::Link(&address, &explorer.address_url(&address))
        ))?;
        writer.writeln()?;
        match record.deployment.hash {
            Some(hash) => {
                let hash = hash.to_string();
                writer.writeln_raw(format_args!(
                    "Transaction Hash: {}",
                    Markdown::Link(&hash, &explorer.tx_url(&hash))
                ))?
            }
            None => writer.writeln_raw("Transaction Hash: N/A")?,
        }
        writer.writeln()?;
        writer.write_raw(format_timestamp(record.timestamp))?;

        Ok(writer.finish())
    }
}

impl AsDoc for DeploymentsDoc<'_> {
    fn as_doc(&self) -> AsDocResult {
        let explorer = Explorer::for_chain(self.ledger.chain_id)?;
        let mut writer = BufWriter::default();

        writer.write_title(&self.project.name)?;
        writer.writeln()?;
        writer.writeln()?;

        writer.write_heading("Table of Contents")?;
        writer.write_link_list_item("Summary", "#summary", 0)?;
        writer.write_link_list_item("Contracts", "#contracts", 0)?;
        for name in self.ledger.latest.keys() {
            writer.write_link_list_item(name, &format!("#{}", name.to_lowercase()), 1)?;
        }
        writer.writeln()?;

        writer.write_subtitle("Summary")?;
        writer.writeln()?;
        let rows = self
            .ledger
            .latest
            .iter()
            .map(|(name, record)| {
                let address = record.deployment.address.to_string();
                vec![
                    self.source_anchor(name),
                    Markdown::Anchor(&address, &explorer.address_url(&address)).to_string(),
                    record.deployment.version.clone().unwrap_or_else(|| "N/A".to_string()),
                ]
            })
            .collect::<Vec<_>>();
        writer.write_html_table(SUMMARY_TABLE_HEADERS, &rows)?;
        writer.writeln()?;

        writer.write_subtitle("Contracts")?;
        writer.writeln()?;
        let sections = self
            .ledger
            .latest
            .iter()
            .map(|(name, record)| self.write_contract(&explorer, name, record))
            .collect::<Result<Vec<_>, _>>()?;
        writer.write_sections(&sections)?;

        trace!(target: "chronicles::doc", contracts = sections.len(), "rendered deployments");
        Ok(writer.finish())
    }
}

/// Formats a unix timestamp like `Tue, 14 Nov 2023 22:13:20 UTC`.
///
/// Millisecond timestamps are accepted as well.
pub fn format_timestamp(timestamp: u64) -> String {
    let (secs, millis) = if timestamp >= MILLIS_THRESHOLD {
        (timestamp / 1000, timestamp % 1000)
    } else {
        (timestamp, 0)
    };

    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, millis as u32 * 1_000_000))
        .map(|date| date.format("%a, %d %b %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
