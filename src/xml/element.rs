use std::slice;

/// A child of an [`Element`]: either a nested element or a run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (unescaped)
    Text(String),
}

/// A parsed XML document with a single root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The root element
    pub root: Element,
}

impl Document {
    /// Wrap a root element into a document
    pub fn new(root: Element) -> Self {
        Self { root }
    }
}

/// An owned XML element
///
/// The qualified name is kept exactly as written in the source (`ns:File`),
/// while [`Element::namespace`] holds the resolved namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given qualified name and no namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: set the resolved namespace URI
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Builder: append an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Builder: append a text node
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Builder: append a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Qualified name as written in the source document
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without namespace prefix
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Resolved namespace URI, if the element is in a namespace
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Name in Clark notation: `{namespace}local`, or just `local`
    pub fn clark_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.local_name()),
            None => self.local_name().to_string(),
        }
    }

    /// All attributes in document order, namespace declarations included
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value by its name as written
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attributes that are not namespace declarations
    pub fn plain_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|(key, _)| key != "xmlns" && !key.starts_with("xmlns:"))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Direct children, text included
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated direct text content, `None` when the element has none
    pub fn text(&self) -> Option<String> {
        let mut text: Option<String> = None;
        for node in &self.children {
            if let Node::Text(t) = node {
                text.get_or_insert_with(String::new).push_str(t);
            }
        }
        text
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    /// Pre-order iterator over all descendant elements (excluding `self`)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Whether this element is `local_name` in `namespace`
    pub fn is_named(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.local_name() == local_name && self.namespace() == namespace
    }

    /// First descendant with the given local name in this element's namespace
    pub fn find(&self, local_name: &str) -> Option<&Element> {
        let namespace = self.namespace();
        self.descendants().find(|e| e.is_named(namespace, local_name))
    }

    /// All descendants with the given local name in this element's
    /// namespace, in document order
    pub fn find_all<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        let namespace = self.namespace();
        self.descendants()
            .filter(move |e| e.is_named(namespace, local_name))
    }

    /// Text of the first matching descendant, see [`Element::find`]
    pub fn find_text(&self, local_name: &str) -> Option<String> {
        self.find(local_name).and_then(Element::text)
    }

    /// Visit `self` and every descendant element mutably, in pre-order
    ///
    /// Children are visited after the callback returns, so a callback that
    /// replaces an element's content never sees the replaced subtree.
    pub fn try_visit_mut<E, F>(&mut self, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&mut Element) -> Result<(), E>,
    {
        visit(self)?;
        for node in &mut self.children {
            if let Node::Element(child) = node {
                child.try_visit_mut(visit)?;
            }
        }
        Ok(())
    }
}

/// Iterator returned by [`Element::descendants`]
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(Node::Text(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
