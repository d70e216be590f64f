//! ACMD (acquisition method / data description) summaries
//!
//! Unlike the generic dump, every signal is listed with its full field set;
//! nothing is truncated.

use super::builder::{ReportBuilder, NOT_AVAILABLE};
use super::group::group_first_seen;
use crate::xml::Element;

pub(super) fn render(root: &Element) -> String {
    let mut report = ReportBuilder::new("ACMD XML");

    injection(&mut report, root);
    signals(&mut report, root);
    external_references(&mut report, root);

    report.full_xml("--- FULL XML CONTENT ---", root);
    report.finish()
}

fn injection(report: &mut ReportBuilder, root: &Element) {
    let Some(injection) = root.find("InjectionInfo") else {
        return;
    };
    let text = |name: &str| injection.find_text(name);

    report.section("--- INJECTION INFORMATION ---");
    report.section("* Sample Details:");
    report.field("  - Name", text("SampleName").as_deref());
    report.field("  - Location", text("Location").as_deref());
    report.field("  - Operator", text("RunOperator").as_deref());
    report.field("  - Run Time", text("RunDateTime").as_deref());

    report.section("* Injection Parameters:");
    let volume = match (text("InjectionVolume"), text("InjectionVolumeUnits")) {
        (Some(volume), Some(units)) => Some(format!("{} {}", volume, units)),
        (Some(volume), None) => Some(volume),
        (None, _) => None,
    };
    report.field("  - Volume", volume.as_deref());
    report.field("  - Sequence Line", text("SequenceLine").as_deref());
    report.field("  - Replicate", text("Replicate").as_deref());
    report.field("  - Source", text("InjectionSource").as_deref());

    if let Some(method) = injection.find("AcquisitionMethod") {
        report.section("* Method:");
        report.line(format!(
            "  {}",
            method.text().as_deref().unwrap_or(NOT_AVAILABLE)
        ));
    }

    if let Some(barcode) = text("Barcode").filter(|b| !b.is_empty()) {
        report.section("* Barcode:");
        report.line(format!("  {}", barcode));
    }
}

fn signals(report: &mut ReportBuilder, root: &Element) {
    let signals: Vec<_> = root.find_all("Signal").collect();
    if signals.is_empty() {
        return;
    }

    report.section("--- SIGNAL ANALYSIS ---");
    report.line(format!("Total signals detected: {}", signals.len()));

    let groups = group_first_seen(signals, |signal| signal.find_text("DeviceName"));
    for (device, members) in groups {
        report.section(format!(
            "* Device: {} ({} signals)",
            device.as_deref().unwrap_or(NOT_AVAILABLE),
            members.len()
        ));

        for signal in members {
            let text = |name: &str| signal.find_text(name);

            report.blank();
            report.field("  - Channel", text("ChannelName").as_deref());
            report.field("    Description", text("Description").as_deref());
            let encoding = text("Encoding")
                .map(|e| e.rsplit('/').next().unwrap_or_default().to_string());
            report.field("    Type", encoding.as_deref());
            report.field("    Units", text("Units").as_deref());
            report.field("    Data Points", text("NumberOfValues").as_deref());
            report.field(
                "    Time Range",
                range(text("TimeStart"), text("TimeEnd")).as_deref(),
            );
            report.field(
                "    Value Range",
                range(text("Minimum"), text("Maximum")).as_deref(),
            );
            report.field("    Trace ID", text("TraceId").as_deref());
            report.field("    Device Number", text("DeviceNumber").as_deref());
            report.field("    Slope", text("Slope").as_deref());
            report.field("    Scale Factor", text("ScaleFactor").as_deref());
            report.field("    Detector Type", text("DetectorType").as_deref());

            let integrable = text("IsIntegrable")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false);
            if integrable {
                report.line("    NOTE: This signal is integrable");
            }
        }
    }
}

fn external_references(report: &mut ReportBuilder, root: &Element) {
    let references: Vec<String> = root
        .find_all("ExternalElementPaths")
        .filter_map(Element::text)
        .filter(|path| !path.is_empty())
        .collect();
    if references.is_empty() {
        return;
    }

    report.section("--- EXTERNAL REFERENCES ---");
    report.line("Linked data files:");
    for reference in references {
        report.line(format!("  - {}", reference));
    }
}

/// `start-end`, with `N/A` standing in for a missing bound
fn range(start: Option<String>, end: Option<String>) -> Option<String> {
    if start.is_none() && end.is_none() {
        return None;
    }
    Some(format!(
        "{}-{}",
        start.as_deref().unwrap_or(NOT_AVAILABLE),
        end.as_deref().unwrap_or(NOT_AVAILABLE)
    ))
}
