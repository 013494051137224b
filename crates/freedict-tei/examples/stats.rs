use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use freedict_tei::{Dictionary, LoadMode};

fn main() -> Result<()> {
    let tei_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p freedict-tei --example stats -- <path-to-file.tei>")?;

    let dict = Dictionary::load_with_mode(&tei_path, LoadMode::Mmap)
        .with_context(|| format!("loading {}", tei_path.display()))?;
    let headwords = dict.headwords();

    let mut senses = 0usize;
    let mut quotes = 0usize;
    let mut defs = 0usize;
    let mut shared = 0usize;
    for (_, entries) in headwords.iter() {
        if entries.len() > 1 {
            shared += 1;
        }
        for entry in entries {
            senses += entry.senses.len();
            quotes += entry.senses.iter().map(|s| s.quotes.len()).sum::<usize>();
            defs += entry.senses.iter().map(|s| s.defs.len()).sum::<usize>();
        }
    }

    let report = dict.report();
    println!("Dictionary   : {}", tei_path.display());
    println!("Entries      : {}", headwords.entry_count());
    println!("Headwords    : {}", headwords.len());
    println!("Shared heads : {}", shared);
    println!("Senses       : {}", senses);
    println!("Quotes       : {}", quotes);
    println!("Definitions  : {}", defs);
    println!("Includes     : {}", report.includes);
    println!("superEntries : {}", report.super_entries);
    println!("Foreign tags : {}", report.unknown_namespaces);

    Ok(())
}
