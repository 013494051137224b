//! Static HTML pages, one per headword.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use freedict_types::Entry;
use quick_xml::escape::escape;
use tracing::warn;

const HEAD: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>FreeDicts</title>
  <link rel="stylesheet" href="dict.css">
  <link rel="icon" href="../favicon.ico">
</head>
<body>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// A headword page; its `Display` output is the complete HTML document.
pub struct Page<'a> {
    pub headword: &'a str,
    pub entries: &'a [Arc<Entry>],
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEAD)?;
        let headword = escape(self.headword);
        let numbered = self.entries.len() > 1;
        for (index, entry) in self.entries.iter().enumerate() {
            if numbered {
                writeln!(f, "  <h3>{}<sup>{}</sup></h3>", headword, index + 1)?;
            } else {
                writeln!(f, "  <h3>{}</h3>", headword)?;
            }
            write_entry(f, entry)?;
        }
        f.write_str(TAIL)
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, entry: &Entry) -> fmt::Result {
    if !entry.prons.is_empty() {
        let prons = join(&entry.prons, |p| escape(p).into_owned());
        writeln!(f, "  <span class=\"pron\">{prons}</span><br/>")?;
    }

    let mut tags = String::new();
    if !entry.pos.is_empty() {
        let pos = join(&entry.pos, |p| format!("[{}]", escape(p)));
        tags.push_str(&format!("<span class=\"pos\">{pos}</span>"));
    }
    if !entry.genders.is_empty() {
        if !tags.is_empty() {
            tags.push(' ');
        }
        let genders: Vec<_> = entry
            .present_genders()
            .map(|g| escape(g).into_owned())
            .collect();
        tags.push_str(&format!("<span class=\"gen\">{}</span>", genders.join(" ")));
    }

    for (index, sense) in entry.senses.iter().enumerate() {
        writeln!(f, "  <b>{}. </b>{}<br/>", index + 1, tags)?;
        for quote in &sense.quotes {
            writeln!(f, "  <p class=\"quote\">{}</p>", escape(quote.as_str()))?;
        }
        for def in &sense.defs {
            writeln!(f, "  <p class=\"def\">- {}</p>", escape(def.as_str()))?;
        }
    }
    Ok(())
}

fn join(items: &[String], render: impl Fn(&str) -> String) -> String {
    items
        .iter()
        .map(|item| render(item))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_page(headword: &str, entries: &[Arc<Entry>]) -> String {
    Page { headword, entries }.to_string()
}

/// File names a headword is published under.
///
/// Headwords with spaces get a second, underscored copy.
pub fn page_filenames(headword: &str) -> Vec<String> {
    let mut names = vec![format!("{headword}.html")];
    if headword.contains(' ') {
        names.push(format!("{}.html", headword.replace(' ', "_")));
    }
    names
}

/// Write all pages of one headword; `true` when at least one was written.
pub fn write_headword(dir: &Path, headword: &str, entries: &[Arc<Entry>]) -> bool {
    let html = render_page(headword, entries);
    let mut written = false;
    for name in page_filenames(headword) {
        if !is_plain_file_name(&name) {
            warn!("refusing to create file {:?} outside {}", name, dir.display());
            continue;
        }
        let path: PathBuf = dir.join(name);
        match fs::write(&path, &html) {
            Ok(()) => written = true,
            Err(err) => warn!("failed to create file {}: {}", path.display(), err),
        }
    }
    written
}

// A single normal component: no separators, no `..`, no root.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use freedict_types::Sense;

    fn cat() -> Arc<Entry> {
        Arc::new(Entry {
            orths: vec!["cat".into()],
            prons: vec!["kæt".into()],
            genders: vec![None, Some("fem".into())],
            pos: vec!["n".into(), "v".into()],
            senses: vec![
                Sense {
                    quotes: vec!["Katze".into()],
                    defs: vec!["a feline".into()],
                },
                Sense::default(),
            ],
        })
    }

    #[test]
    fn renders_single_entry() {
        let html = render_page("cat", &[cat()]);
        assert!(html.starts_with("<!doctype html>\n"));
        assert!(html.contains("  <h3>cat</h3>\n"));
        assert!(html.contains("  <span class=\"pron\">kæt</span><br/>\n"));
        assert!(html.contains(
            "  <b>1. </b><span class=\"pos\">[n] [v]</span> <span class=\"gen\">fem</span><br/>\n"
        ));
        assert!(html.contains("  <p class=\"quote\">Katze</p>\n"));
        assert!(html.contains("  <p class=\"def\">- a feline</p>\n"));
        assert!(html.contains("  <b>2. </b>"));
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn numbers_shared_headwords() {
        let html = render_page("cat", &[cat(), cat()]);
        assert!(html.contains("<h3>cat<sup>1</sup></h3>"));
        assert!(html.contains("<h3>cat<sup>2</sup></h3>"));
    }

    #[test]
    fn escapes_markup_in_text() {
        let entry = Arc::new(Entry {
            orths: vec!["a<b".into()],
            senses: vec![Sense {
                quotes: vec!["x & y".into()],
                defs: Vec::new(),
            }],
            ..Entry::default()
        });
        let html = render_page("a<b", &[entry]);
        assert!(html.contains("<h3>a&lt;b</h3>"));
        assert!(html.contains("x &amp; y"));
        assert!(html.contains("  <b>1. </b><br/>\n"));
    }

    #[test]
    fn entries_without_senses_have_no_tag_line() {
        let entry = Arc::new(Entry {
            orths: vec!["x".into()],
            pos: vec!["n".into()],
            ..Entry::default()
        });
        assert!(!render_page("x", &[entry]).contains("class=\"pos\""));
    }

    #[test]
    fn file_names_must_stay_in_one_directory() {
        assert!(is_plain_file_name("cat.html"));
        assert!(is_plain_file_name("New York.html"));
        assert!(is_plain_file_name("...html"));
        assert!(!is_plain_file_name("/tmp/x.html"));
        assert!(!is_plain_file_name("a/b.html"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
    }

    #[test]
    fn spaced_headwords_get_two_files() {
        assert_eq!(page_filenames("cat"), vec!["cat.html"]);
        assert_eq!(
            page_filenames("New York"),
            vec!["New York.html", "New_York.html"]
        );
    }
}
