use super::builder::ReportBuilder;
use crate::decoders::{decode_content, EmbeddedText, XML_CONTENT_TAG};
use crate::xml::Element;

/// Decoded device content longer than this is cut in the summary
pub const DEVICE_CONTENT_PREVIEW_CHARS: usize = 1000;

pub(super) fn render(root: &Element) -> String {
    let mut report = ReportBuilder::new("SampleContainerInfo XML");

    if let Some(device) = root.find("ContainerDeviceInfo") {
        report.section("Device Info:");
        report.field("Module ID", device.attr("ModuleId"));
        report.field("Serial", device.find_text("SerialNumber").as_deref());
        report.field("Part", device.find_text("PartNumber").as_deref());

        if let Some(container) = device.find("SampleContainerDevice") {
            let payload = container.find_text(XML_CONTENT_TAG).unwrap_or_default();
            let decoded = decode_content(container.attr("ContentType"), &payload);

            report.section("Decoded Device Content:");
            if let EmbeddedText::Fallback { reason, .. } = &decoded {
                report.line(format!("(payload not decoded: {}; showing raw text)", reason));
            }
            report.line(preview(decoded.text(), DEVICE_CONTENT_PREVIEW_CHARS));
        }
    }

    report.full_xml("Full XML Content:", root);
    report.finish()
}

/// First `limit` characters, with `...` appended when anything was cut
fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
