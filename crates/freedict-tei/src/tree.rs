//! Owned, mutable XML element tree built from `quick-xml` events.
//!
//! Only what dictionary processing needs is kept: namespace-resolved names,
//! attributes, the leading text of each element, and child elements.
//! Comments, processing instructions, and tail text are dropped.

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::TeiError;

/// Namespace-resolved element name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(namespace: Option<&str>, local: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_owned),
            local: local.to_owned(),
        }
    }

    /// Name without a namespace.
    pub fn bare(local: &str) -> Self {
        Self::new(None, local)
    }

    /// Local name, if the name carries no namespace.
    pub fn as_bare(&self) -> Option<&str> {
        match self.namespace {
            None => Some(self.local.as_str()),
            Some(_) => None,
        }
    }

    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder helper for a bare-named element.
    pub fn bare(local: &str) -> Self {
        Self::new(QName::bare(local))
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_owned());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Direct text content, `None` when absent or empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, namespace: &str, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name.is(namespace, local))
    }

    pub fn child_mut(&mut self, namespace: &str, local: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name.is(namespace, local))
    }

    /// Whether any element strictly below this one matches `pred`.
    pub fn has_descendant(&self, pred: &impl Fn(&QName) -> bool) -> bool {
        self.children
            .iter()
            .any(|c| pred(&c.name) || c.has_descendant(pred))
    }
}

/// Parse a complete XML document and return its root element.
pub fn parse_document(bytes: &[u8]) -> Result<Element, TeiError> {
    let mut reader = NsReader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(ref e) => {
                let element = start_element(ns, e)?;
                stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = start_element(ns, e)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    push_text(top, &t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(top) = stack.last_mut() {
                    push_text(top, &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or(TeiError::EmptyDocument)
}

fn start_element(ns: ResolveResult<'_>, e: &BytesStart<'_>) -> Result<Element, TeiError> {
    let namespace = match ns {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.0).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => Some(String::from_utf8_lossy(&prefix).into_owned()),
    };
    let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

    let mut element = Element::new(QName { namespace, local });
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let value = attr.unescape_value()?.into_owned();
        element
            .attributes
            .push((String::from_utf8_lossy(key).into_owned(), value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

// Text after the first child is tail text and not part of the element's content.
fn push_text(element: &mut Element, text: &str) {
    if !element.children.is_empty() {
        return;
    }
    element.text.get_or_insert_with(String::new).push_str(text);
}
