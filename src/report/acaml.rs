//! ACAML (Agilent Common Analytical Markup Language) result summaries
//!
//! ACAML files describe a whole sequence run: document provenance, the
//! instrument and its modules, one `InjectionMetaData` per injection, and the
//! acquired signals.

use super::builder::{ReportBuilder, NOT_AVAILABLE};
use super::group::group_first_seen;
use crate::decoders::{decode_content, EmbeddedText, GZIP_BASE64_CONTENT_TYPE};
use crate::xml::Element;

/// Custom field whose `Xml` child is a compressed nested document
const INJECTION_METADATA_FIELD: &str = "InjectionMetaDataItems";

/// Injection attributes printed with friendly labels, in this order
const INJECTION_ATTRIBUTES: &[(&str, &str)] = &[
    ("AcqMethodName", "HPLC Method"),
    ("SampleName", "Sample Name"),
    ("SampleDescription", "Sample Description"),
    ("InjectorPosition", "Injector Position"),
    ("VialNumber", "Vial Number"),
    ("InjectionAcqDateTime", "Date/Time"),
    ("RawDataFileName", "Data File"),
];

/// Injection children that carry no useful summary information
const SKIPPED_INJECTION_CHILDREN: &[&str] = &["Dil", "LimsIds"];

pub(super) fn render(root: &Element) -> String {
    let mut report = ReportBuilder::new("ACAML XML");

    basic_information(&mut report, root);
    document_information(&mut report, root);
    resources(&mut report, root);
    injections(&mut report, root);
    signals(&mut report, root);

    report.full_xml("--- FULL XML CONTENT ---", root);
    report.finish()
}

fn basic_information(report: &mut ReportBuilder, root: &Element) {
    report.section("--- BASIC INFORMATION ---");

    if let Some(checksum) = root.find("Checksum") {
        report.section("* Checksum:");
        report.field("  Algorithm", checksum.attr("Algorithm"));
        report.field("  Value", checksum.find_text("Value").as_deref());
    }

    let migrations: Vec<_> = root.find_all("MigrationStep").collect();
    if !migrations.is_empty() {
        report.section("* Migration History:");
        for (i, migration) in migrations.iter().enumerate() {
            report.section(format!("  Migration #{}:", i + 1));
            report.field("    From", migration.find_text("FromNamespace").as_deref());
            report.field("    To", migration.find_text("ToNamespace").as_deref());
            report.field("    Date", migration.find_text("Date").as_deref());
            report.field("    Application", migration.find_text("Application").as_deref());
        }
    }
}

fn document_information(report: &mut ReportBuilder, root: &Element) {
    let Some(doc_info) = root.find("DocInfo") else {
        return;
    };

    report.section("--- DOCUMENT INFORMATION ---");
    report.blank();
    report.field("* Document ID", root.find_text("DocID").as_deref());
    report.field("* Description", doc_info.find_text("Description").as_deref());
    report.field("* Created by user", doc_info.find_text("CreatedByUser").as_deref());

    if let Some(app) = doc_info.find("AgilentApp") {
        report.section("* Created by application:");
        report.field("  Name", app.find_text("Name").as_deref());
        report.field("  Version", app.find_text("Version").as_deref());
    }

    report.field("* Creation date", doc_info.find_text("CreationDate").as_deref());
    report.field("* Client", doc_info.find_text("ClientName").as_deref());

    let custom_fields: Vec<_> = doc_info.find_all("CustomField").collect();
    if custom_fields.is_empty() {
        return;
    }

    report.section("* Custom Fields:");
    for field in custom_fields {
        let name = field.attr("Name").unwrap_or(NOT_AVAILABLE);
        let value = field.find_text("Value").unwrap_or_default();
        report.line(format!("  {}: {}", name, value));

        if name == INJECTION_METADATA_FIELD {
            let Some(payload) = field.find_text("Xml") else {
                continue;
            };
            let decoded = decode_content(Some(GZIP_BASE64_CONTENT_TYPE), &payload);
            report.line("  Decoded XML content:");
            if let EmbeddedText::Fallback { reason, .. } = &decoded {
                report.line(format!("  (payload not decoded: {}; showing raw text)", reason));
            }
            report.line(decoded.into_text());
        }
    }
}

fn resources(report: &mut ReportBuilder, root: &Element) {
    let Some(resources) = root.find("Resources") else {
        return;
    };
    report.section("--- RESOURCES ---");

    let instruments: Vec<_> = resources.find_all("Instrument").collect();
    if instruments.is_empty() {
        return;
    }

    report.section("* Instruments:");
    for instrument in instruments {
        report.blank();
        report.field("  Instrument", instrument.find_text("Name").as_deref());
        report.field("    ID", instrument.attr("id"));
        report.field("    Technique", instrument.find_text("Technique").as_deref());

        let modules: Vec<_> = instrument.find_all("Module").collect();
        if modules.is_empty() {
            continue;
        }
        report.section("    Modules:");
        for module in modules {
            report.blank();
            report.field("      - Name", module.find_text("Name").as_deref());
            report.field("        Type", module.find_text("Type").as_deref());
            report.field("        Manufacturer", module.find_text("Manufacturer").as_deref());
            report.field("        Part No", module.find_text("PartNo").as_deref());
            report.field("        Serial No", module.find_text("SerialNo").as_deref());
            report.field(
                "        Firmware Revision",
                module.find_text("FirmwareRevision").as_deref(),
            );
            report.field(
                "        Connection Info",
                module.find_text("ConnectionInfo").as_deref(),
            );
            report.field("        Instance", module.find_text("Instance").as_deref());
        }
    }
}

fn injections(report: &mut ReportBuilder, root: &Element) {
    let injections: Vec<_> = root.find_all("InjectionMetaData").collect();
    if injections.is_empty() {
        return;
    }

    report.section("--- INJECTION INFORMATION ---");
    for (i, injection) in injections.iter().enumerate() {
        report.section(format!("* Injection #{}:", i + 1));
        for (attribute, label) in INJECTION_ATTRIBUTES {
            report.field(&format!("  {}", label), injection.attr(attribute));
        }

        for (key, value) in injection.plain_attributes() {
            if INJECTION_ATTRIBUTES.iter().all(|(known, _)| *known != key) {
                report.line(format!("  {}: {}", key, value));
            }
        }

        for child in injection.child_elements() {
            if SKIPPED_INJECTION_CHILDREN.contains(&child.local_name()) {
                continue;
            }
            report.field(&format!("  {}", child.local_name()), child.text().as_deref());
        }
    }
}

fn signals(report: &mut ReportBuilder, root: &Element) {
    let signals: Vec<_> = root.find_all("Signal").collect();
    if signals.is_empty() {
        return;
    }

    report.section("--- SIGNALS ---");
    report.line(format!("Total signals: {}", signals.len()));

    let groups = group_first_seen(signals, |signal| signal.find_text("Type"));
    for (signal_type, members) in groups {
        report.section(format!(
            "* Signal Type: {} ({} signals)",
            signal_type.as_deref().unwrap_or(NOT_AVAILABLE),
            members.len()
        ));
        for signal in members {
            report.blank();
            report.field("  - Name", signal.find_text("Name").as_deref());
            report.field("    Description", signal.find_text("Description").as_deref());
            report.field("    Trace ID", signal.find_text("TraceID").as_deref());
            report.field("    Detector", signal.find_text("DetectorName").as_deref());
            report.field("    Channel", signal.find_text("ChannelName").as_deref());

            let data_items: Vec<_> = signal.find_all("DataItem").collect();
            if !data_items.is_empty() {
                report.section("    Data References:");
                for item in data_items {
                    report.field("      Name", item.find_text("Name").as_deref());
                    report.field("      Path", item.find_text("Path").as_deref());
                }
            }
        }
    }
}
