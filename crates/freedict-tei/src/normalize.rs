//! Bring a TEI `<body>` into the shape entry extraction expects.
//!
//! Every element loses the TEI namespace. On `body` elements, `xi:include`
//! directives are replaced by the top-level children of the files they
//! reference, and `<superEntry>` groups are dissolved so that each grouped
//! entry becomes a direct child of the body.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::TeiError;
use crate::tree::{Element, QName};
use crate::{LoadMode, parse_file};

pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";
pub const XINCLUDE_NS: &str = "http://www.w3.org/2001/XInclude";

/// Counters collected while normalizing one tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NormalizeReport {
    pub stripped: usize,
    pub unknown_namespaces: usize,
    pub includes: usize,
    pub super_entries: usize,
}

/// Normalize `element` and its whole subtree in place.
///
/// `base_dir` is the directory `xi:include` hrefs are resolved against.
/// Elements in namespaces other than TEI are reported and keep their name.
pub fn normalize(element: &mut Element, base_dir: &Path) -> Result<NormalizeReport, TeiError> {
    let mut report = NormalizeReport::default();
    normalize_into(element, base_dir, &mut report)?;
    Ok(report)
}

fn normalize_into(
    element: &mut Element,
    base_dir: &Path,
    report: &mut NormalizeReport,
) -> Result<(), TeiError> {
    strip_namespace(&mut element.name, report);

    if element.name.as_bare() == Some("body") {
        if element.has_descendant(&is_include) {
            resolve_includes(element, base_dir, report)?;
        }
        if element.has_descendant(&is_super_entry) {
            flatten_super_entries(element, report);
        }
    }

    for child in &mut element.children {
        normalize_into(child, base_dir, report)?;
    }
    Ok(())
}

fn strip_namespace(name: &mut QName, report: &mut NormalizeReport) {
    match name.namespace.as_deref() {
        None => {}
        Some(TEI_NS) => {
            name.namespace = None;
            report.stripped += 1;
        }
        Some(_) => {
            warn!("unrecognized namespace on element {}", name);
            report.unknown_namespaces += 1;
        }
    }
}

fn is_include(name: &QName) -> bool {
    name.is(XINCLUDE_NS, "include")
}

// Matches before and after stripping so a second pass stays a no-op.
fn is_super_entry(name: &QName) -> bool {
    name.local == "superEntry" && matches!(name.namespace.as_deref(), None | Some(TEI_NS))
}

/// Replace the body's children with the content of its include directives.
fn resolve_includes(
    body: &mut Element,
    base_dir: &Path,
    report: &mut NormalizeReport,
) -> Result<(), TeiError> {
    let mut spliced = Vec::new();
    for directive in body.children.iter().filter(|c| is_include(&c.name)) {
        let href = directive.attribute("href").ok_or(TeiError::MissingHref)?;
        let path = base_dir.join(href);
        debug!("including {}", path.display());
        let fragment = parse_file(&path, LoadMode::Owned)?;
        spliced.extend(fragment.children);
        report.includes += 1;
    }
    body.children = spliced;
    Ok(())
}

/// Move the children of every `superEntry` below `body` to the end of `body`.
///
/// Groups are dissolved in document order; a nested group follows its parent.
fn flatten_super_entries(body: &mut Element, report: &mut NormalizeReport) {
    let mut groups = Vec::new();
    take_super_entries(body, &mut groups);

    for group in groups {
        report.super_entries += 1;
        body.children.extend(group.children);
    }
}

// Detach every superEntry below `element`, in pre-order, each with its own
// nested groups already removed.
fn take_super_entries(element: &mut Element, out: &mut Vec<Element>) {
    let children = std::mem::take(&mut element.children);
    for mut child in children {
        if is_super_entry(&child.name) {
            let mut nested = Vec::new();
            take_super_entries(&mut child, &mut nested);
            out.push(child);
            out.append(&mut nested);
        } else {
            take_super_entries(&mut child, out);
            element.children.push(child);
        }
    }
}
