use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::element::{Document, Element, Node};
use super::XmlError;

/// Decode raw file bytes for parsing
///
/// Invalid UTF-8 sequences are replaced, and the C0/C1 control characters
/// that vendor software occasionally leaks into exported files are removed
/// (tab, line feed and carriage return are kept).
pub fn sanitize(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| !is_stray_control(*c))
        .collect()
}

fn is_stray_control(c: char) -> bool {
    matches!(c,
        '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}

/// In-scope namespace bindings introduced by one element
#[derive(Default)]
struct Scope {
    /// (prefix, uri); the empty prefix is the default namespace
    bindings: Vec<(String, String)>,
}

/// Open element plus the namespace bindings it declared
struct Frame {
    element: Element,
    scope: Scope,
}

/// Parse a complete XML document into an owned tree
pub fn parse_document(text: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let frame = open_element(e, reader.decoder(), &stack)?;
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::Malformed(format!(
                        "second root element <{}>",
                        frame.element.name
                    )));
                }
                stack.push(frame);
            }
            Event::Empty(ref e) => {
                let frame = open_element(e, reader.decoder(), &stack)?;
                attach(&mut stack, &mut root, frame.element)?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, frame.element)?;
            }
            Event::Text(ref t) => {
                if let Some(frame) = stack.last_mut() {
                    let text = t.unescape()?;
                    push_text(&mut frame.element, &text);
                }
            }
            Event::CData(ref c) => {
                if let Some(frame) = stack.last_mut() {
                    push_text(&mut frame.element, &String::from_utf8_lossy(c));
                }
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(frame) = stack.last() {
        return Err(XmlError::Malformed(format!(
            "unclosed element <{}>",
            frame.element.name
        )));
    }

    root.map(Document::new)
        .ok_or_else(|| XmlError::Malformed("no root element".to_string()))
}

/// Build an element from a start tag, resolving its namespace
fn open_element(e: &BytesStart, decoder: Decoder, stack: &[Frame]) -> Result<Frame, XmlError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    let mut scope = Scope::default();

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();

        if key == "xmlns" {
            scope.bindings.push((String::new(), value.clone()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            scope.bindings.push((prefix.to_string(), value.clone()));
        }
        element.attributes.push((key, value));
    }

    let prefix = match element.name.split_once(':') {
        Some((prefix, _)) => prefix,
        None => "",
    };
    element.namespace = resolve(prefix, &scope, stack).filter(|uri| !uri.is_empty());

    Ok(Frame { element, scope })
}

/// Look up a prefix in the element's own bindings, then outwards
fn resolve(prefix: &str, own: &Scope, stack: &[Frame]) -> Option<String> {
    std::iter::once(own)
        .chain(stack.iter().rev().map(|frame| &frame.scope))
        .flat_map(|scope| scope.bindings.iter().rev())
        .find(|(p, _)| p == prefix)
        .map(|(_, uri)| uri.clone())
}

/// Attach a finished element to its parent, or make it the root
fn attach(
    stack: &mut [Frame],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.element.children.push(Node::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError::Malformed(format!(
            "second root element <{}>",
            element.name
        ))),
    }
}

/// Append text, merging with a directly preceding text node
fn push_text(element: &mut Element, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = element.children.last_mut() {
        last.push_str(text);
    } else {
        element.children.push(Node::Text(text.to_string()));
    }
}
