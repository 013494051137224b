use std::path::PathBuf;

use freedict_tei::{Dictionary, LoadMode, QName, TEI_NS, TeiDocument, TeiError, normalize};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_entries_and_flattens_super_entries() {
    let dict = Dictionary::load(fixture("deu-eng.tei")).expect("load fixture");
    let headwords = dict.headwords();

    let keys: Vec<_> = headwords.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["Bank", "Fahrrad", "Hund", "New York", "Rad"]);
    assert_eq!(headwords.entry_count(), 5);
    assert_eq!(dict.report().super_entries, 1);

    let hund = &headwords.get("Hund").expect("Hund indexed")[0];
    assert_eq!(hund.prons, vec!["hʊnt"]);
    assert_eq!(hund.genders, vec![Some("masc".to_string())]);
    assert_eq!(hund.senses[0].quotes, vec!["dog", "hound"]);

    let bank = headwords.get("Bank").expect("Bank indexed");
    assert_eq!(bank.len(), 2);
    assert_eq!(bank[0].senses[0].quotes, vec!["bench"]);
    assert_eq!(bank[1].pos, vec!["n"]);
    assert_eq!(bank[1].senses[0].defs, vec!["financial institution"]);

    let new_york = &headwords.get("New York").expect("New York indexed")[0];
    assert_eq!(new_york.genders, vec![None]);
}

#[test]
fn spelling_variants_index_the_same_entry() {
    let dict = Dictionary::load_with_mode(fixture("deu-eng.tei"), LoadMode::Owned)
        .expect("load fixture");
    let fahrrad = &dict.headwords().get("Fahrrad").unwrap()[0];
    let rad = &dict.headwords().get("Rad").unwrap()[0];
    assert_eq!(fahrrad, rad);
    assert_eq!(fahrrad.orths, vec!["Fahrrad", "Rad"]);
}

#[test]
fn resolves_includes_in_order() {
    let mut doc = TeiDocument::load(fixture("eng-pol/eng-pol.tei")).expect("load fixture");
    let base_dir = doc.base_dir().to_path_buf();
    let body = doc.body_mut().expect("body present");
    let report = normalize(body, &base_dir).expect("normalize");

    assert_eq!(report.includes, 2);
    assert_eq!(report.super_entries, 1);
    assert!(body.children.iter().all(|c| c.name == QName::bare("entry")));
    let orths: Vec<_> = body
        .children
        .iter()
        .map(|e| e.children[0].children[0].text().unwrap())
        .collect();
    assert_eq!(orths, vec!["apple", "run", "run", "zebra"]);
}

#[test]
fn included_entries_are_aggregated() {
    let dict = Dictionary::load(fixture("eng-pol/eng-pol.tei")).expect("load fixture");
    let run = dict.headwords().get("run").expect("run indexed");
    assert_eq!(run.len(), 2);
    assert_eq!(run[0].pos, vec!["v"]);
    assert_eq!(run[1].pos, vec!["n"]);
}

#[test]
fn missing_include_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.tei");
    std::fs::write(
        &path,
        r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:xi="http://www.w3.org/2001/XInclude">
            <text><body><xi:include href="missing.tei"/></body></text></TEI>"#,
    )
    .unwrap();
    let err = Dictionary::load(&path).err().expect("load must fail");
    assert!(matches!(err, TeiError::Io { .. }));
}

#[test]
fn document_without_body_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("headless.tei");
    std::fs::write(&path, r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text/></TEI>"#).unwrap();
    let err = Dictionary::load(&path).err().expect("load must fail");
    assert!(err.to_string().contains("missing <body>"));
}

#[test]
fn body_is_located_by_tei_names() {
    let doc = TeiDocument::load(fixture("deu-eng.tei")).expect("load fixture");
    assert!(doc.root().name.is(TEI_NS, "TEI"));
}
