use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::element::{Document, Element, Node};
use super::XmlError;

/// Serialize a document with a leading `<?xml ...?>` declaration
pub fn write_document(document: &Document) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.get_mut().push(b'\n');
    write_element(&mut writer, &document.root)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Serialize a single element (no declaration)
pub fn element_to_string(element: &Element) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, element)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), XmlError> {
    let start = BytesStart::new(element.name.as_str()).with_attributes(
        element
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(nested) => write_element(writer, nested)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
