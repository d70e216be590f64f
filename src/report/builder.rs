use crate::xml::{element_to_string, Element};

/// Placeholder printed for values missing from the source document
pub const NOT_AVAILABLE: &str = "N/A";

/// Line-oriented text report under construction
#[derive(Debug)]
pub(crate) struct ReportBuilder {
    lines: Vec<String>,
}

impl ReportBuilder {
    /// Start a report with a `=== title ===` header
    pub(crate) fn new(title: &str) -> Self {
        Self {
            lines: vec![format!("=== {} ===", title)],
        }
    }

    pub(crate) fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Blank line followed by a heading
    pub(crate) fn section(&mut self, heading: impl Into<String>) {
        self.blank();
        self.line(heading);
    }

    /// `label: value`, printing `N/A` for a missing value
    pub(crate) fn field(&mut self, label: &str, value: Option<&str>) {
        self.lines
            .push(format!("{}: {}", label, value.unwrap_or(NOT_AVAILABLE)));
    }

    /// Append the whole document as serialized XML under `heading`
    pub(crate) fn full_xml(&mut self, heading: &str, root: &Element) {
        self.section(heading);
        match element_to_string(root) {
            Ok(xml) => self.line(xml),
            Err(e) => self.line(format!("<!-- could not serialize document: {} -->", e)),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.lines.join("\n")
    }
}

