use crate::Markdown;
use itertools::Itertools;
use std::fmt::{self, Display, Write};

/// The buffered writer.
/// Writes various display items into the internal buffer.
#[derive(Debug, Default)]
pub struct BufWriter {
    buf: String,
}

impl BufWriter {
    /// Writes raw content to the buffer.
    pub fn write_raw<T: Display>(&mut self, content: T) -> fmt::Result {
        write!(self.buf, "{content}")
    }

    /// Writes raw content to the buffer with newline.
    pub fn writeln_raw<T: Display>(&mut self, content: T) -> fmt::Result {
        writeln!(self.buf, "{content}")
    }

    /// Writes newline to the buffer.
    pub fn writeln(&mut self) -> fmt::Result {
        writeln!(self.buf)
    }

    /// Writes a title to the buffer formatted as [Markdown::H1].
    pub fn write_title(&mut self, title: &str) -> fmt::Result {
        writeln!(self.buf, "{}", Markdown::H1(title))
    }

    /// Writes a subtitle to the buffer formatted as [Markdown::H2].
    pub fn write_subtitle(&mut self, subtitle: &str) -> fmt::Result {
        writeln!(self.buf, "{}", Markdown::H2(subtitle))
    }

    /// Writes heading to the buffer formatted as [Markdown::H3].
    pub fn write_heading(&mut self, heading: &str) -> fmt::Result {
        writeln!(self.buf, "{}", Markdown::H3(heading))
    }

    /// Writes a list item to the buffer indented by specified depth, one tab per level.
    pub fn write_list_item(&mut self, item: &str, depth: usize) -> fmt::Result {
        let indent = "\t".repeat(depth);
        writeln!(self.buf, "{indent}- {item}")
    }

    /// Writes a link to the buffer as a list item.
    pub fn write_link_list_item(&mut self, name: &str, path: &str, depth: usize) -> fmt::Result {
        self.write_list_item(&Markdown::Link(name, path).to_string(), depth)
    }

    /// Writes an html table row, one cell per line.
    fn write_html_row<T: Display>(&mut self, cell: &str, cells: &[T]) -> fmt::Result {
        self.writeln_raw("<tr>")?;
        for content in cells {
            self.writeln_raw(format_args!("\t<{cell}>{content}</{cell}>"))?;
        }
        self.writeln_raw("</tr>")
    }

    /// Writes an html table with the given headers and rows.
    pub fn write_html_table<T: Display>(
        &mut self,
        headers: &[&str],
        rows: &[Vec<T>],
    ) -> fmt::Result {
        self.writeln_raw("<table>")?;
        self.write_html_row("th", headers)?;
        for row in rows {
            self.write_html_row("td", row)?;
        }
        self.writeln_raw("</table>")
    }

    /// Writes `sections` separated by horizontal rules.
    pub fn write_sections<T: Display>(&mut self, sections: &[T]) -> fmt::Result {
        self.write_raw(sections.iter().join("\n\n---\n\n"))
    }

    /// Finish and return underlying buffer.
    pub fn finish(self) -> String {
        self.buf
    }
}
