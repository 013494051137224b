//! Entry and sense extraction from normalized `<entry>` subtrees.
//!
//! Fields are found by the exact chain of tag names leading from `entry` to
//! an element, e.g. `entry/form/orth`. The chains that matter form a small
//! closed set, modelled by [`FieldPath`]; any other chain is `Unmatched` and
//! nothing below it is visited.

use freedict_types::{Entry, Sense};

use crate::tree::Element;

/// Position of an element relative to its enclosing `entry`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldPath {
    Entry,
    Form,
    /// `entry/form/orth`
    Orth,
    /// `entry/form/pron`
    Pron,
    GramGrp,
    /// `entry/gramGrp/gen`
    Gen,
    /// `entry/gramGrp/pos`
    Pos,
    /// `entry/sense`, the root of one [`Sense`].
    Sense,
    Cit,
    /// `entry/sense/cit/quote`
    Quote,
    SubSense,
    /// `entry/sense/sense/def`
    Def,
    Unmatched,
}

impl FieldPath {
    /// Path of a child element named `tag` (bare name, if any).
    pub fn child(self, tag: Option<&str>) -> Self {
        match (self, tag) {
            (Self::Entry, Some("form")) => Self::Form,
            (Self::Form, Some("orth")) => Self::Orth,
            (Self::Form, Some("pron")) => Self::Pron,
            (Self::Entry, Some("gramGrp")) => Self::GramGrp,
            (Self::GramGrp, Some("gen")) => Self::Gen,
            (Self::GramGrp, Some("pos")) => Self::Pos,
            (Self::Entry, Some("sense")) => Self::Sense,
            (Self::Sense, Some("cit")) => Self::Cit,
            (Self::Cit, Some("quote")) => Self::Quote,
            (Self::Sense, Some("sense")) => Self::SubSense,
            (Self::SubSense, Some("def")) => Self::Def,
            _ => Self::Unmatched,
        }
    }
}

/// Extract every `entry` that is a direct child of a normalized body.
pub fn extract_entries(body: &Element) -> Vec<Entry> {
    body.children
        .iter()
        .filter(|c| c.name.as_bare() == Some("entry"))
        .map(extract_entry)
        .collect()
}

/// Build an [`Entry`] from a normalized `entry` element.
pub fn extract_entry(element: &Element) -> Entry {
    let mut entry = Entry::default();
    if element.name.as_bare() == Some("entry") {
        collect_entry(element, FieldPath::Entry, &mut entry);
    }
    entry
}

fn collect_entry(element: &Element, path: FieldPath, entry: &mut Entry) {
    for child in &element.children {
        let path = path.child(child.name.as_bare());
        match path {
            FieldPath::Orth => {
                if let Some(text) = child.text() {
                    entry.orths.push(text.to_owned());
                }
            }
            FieldPath::Pron => {
                if let Some(text) = child.text() {
                    entry.prons.push(text.to_owned());
                }
            }
            // Recorded even without text: the gender was declared.
            FieldPath::Gen => entry.genders.push(child.text().map(str::to_owned)),
            FieldPath::Pos => {
                if let Some(text) = child.text() {
                    entry.add_pos(text);
                }
            }
            FieldPath::Sense => {
                entry.senses.push(extract_sense(child));
                continue;
            }
            FieldPath::Unmatched => continue,
            _ => {}
        }
        collect_entry(child, path, entry);
    }
}

/// Build a [`Sense`] from an `entry/sense` element.
///
/// Definitions live one level down, in `sense/sense/def`; nested sub-senses
/// fold into this sense instead of producing their own.
pub fn extract_sense(element: &Element) -> Sense {
    let mut sense = Sense::default();
    collect_sense(element, FieldPath::Sense, &mut sense);
    sense
}

fn collect_sense(element: &Element, path: FieldPath, sense: &mut Sense) {
    for child in &element.children {
        let path = path.child(child.name.as_bare());
        match path {
            FieldPath::Quote => sense.quotes.push(child.text().unwrap_or_default().to_owned()),
            FieldPath::Def => sense.defs.push(child.text().unwrap_or_default().to_owned()),
            FieldPath::Unmatched => continue,
            _ => {}
        }
        collect_sense(child, path, sense);
    }
}
