use super::builder::{ReportBuilder, NOT_AVAILABLE};
use crate::xml::Element;

const TABLE_RULE: &str =
    "+------------+--------------------------------------------------------------+";

/// `[Content_Types].xml` from the OPC package wrapping vendor result sets
pub(super) fn render(root: &Element) -> String {
    let mut report = ReportBuilder::new("Content Types XML");

    let defaults: Vec<_> = root.find_all("Default").collect();
    if !defaults.is_empty() {
        report.section("Content Type Mappings:");
        report.line(TABLE_RULE);
        report.line(format!("| {:<10} | {:<60} |", "Extension", "Content Type"));
        report.line(TABLE_RULE);
        for default in defaults {
            report.line(format!(
                "| {:<10} | {:<60} |",
                default.attr("Extension").unwrap_or(NOT_AVAILABLE),
                default.attr("ContentType").unwrap_or(NOT_AVAILABLE)
            ));
        }
        report.line(TABLE_RULE);
    }

    report.full_xml("Full XML Content:", root);
    report.finish()
}
