use super::builder::{ReportBuilder, NOT_AVAILABLE};
use crate::xml::Element;

/// Fileset manifests list the files of an acquisition with checksums
pub(super) fn render(root: &Element) -> String {
    let mut report = ReportBuilder::new("Fileset XML");

    report.section("Fileset Information:");
    let non_empty = |name: &str| root.attr(name).filter(|value| !value.is_empty());
    report.field("  Identifier Algorithm", non_empty("IdentifierAlgorithm"));
    report.field("  Identifier", non_empty("Identifier"));

    let files: Vec<_> = root.find_all("File").collect();
    if !files.is_empty() {
        report.section("Files:");
        for (i, file) in files.iter().enumerate() {
            report.section(format!("File #{}:", i + 1));
            report.field("  Path", file.attr("Path"));
            report.field("  Identifier Algorithm", file.attr("IdentifierAlgorithm"));
            report.field("  Identifier", file.attr("Identifier"));

            let properties: Vec<_> = file.find_all("Property").collect();
            if !properties.is_empty() {
                report.line("  Properties:");
                for property in properties {
                    report.field(
                        &format!("    {}", property.attr("Name").unwrap_or(NOT_AVAILABLE)),
                        property.attr("Value"),
                    );
                }
            }
        }
    }

    report.full_xml("Full XML Content:", root);
    report.finish()
}
