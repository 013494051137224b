use std::collections::BTreeMap;
use std::sync::Arc;

use freedict_types::Entry;

/// Entries grouped by orthographic form.
///
/// An entry with several spellings is shared between their buckets. Buckets
/// keep encounter order; headwords iterate in ordinal (byte) order.
#[derive(Clone, Debug, Default)]
pub struct HeadwordIndex {
    buckets: BTreeMap<String, Vec<Arc<Entry>>>,
    entries: usize,
}

impl HeadwordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    /// Add an entry under each of its spellings.
    ///
    /// Returns `false` (and drops the entry) when it has no orthography.
    pub fn insert(&mut self, entry: Entry) -> bool {
        if entry.orths.is_empty() {
            return false;
        }
        let entry = Arc::new(entry);
        for orth in &entry.orths {
            self.buckets
                .entry(orth.clone())
                .or_default()
                .push(Arc::clone(&entry));
        }
        self.entries += 1;
        true
    }

    pub fn get(&self, headword: &str) -> Option<&[Arc<Entry>]> {
        self.buckets.get(headword).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Arc<Entry>])> + '_ {
        self.buckets
            .iter()
            .map(|(headword, entries)| (headword.as_str(), entries.as_slice()))
    }

    /// Number of distinct headwords.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of indexed entries, each counted once.
    pub fn entry_count(&self) -> usize {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(orths: &[&str], pos: &str) -> Entry {
        Entry {
            orths: orths.iter().map(|o| o.to_string()).collect(),
            pos: vec![pos.to_string()],
            ..Entry::default()
        }
    }

    #[test]
    fn groups_by_orth_in_encounter_order() {
        let index = HeadwordIndex::build([
            entry(&["run"], "v"),
            entry(&["walk"], "v"),
            entry(&["run"], "n"),
        ]);
        let run = index.get("run").unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(run[0].pos, vec!["v"]);
        assert_eq!(run[1].pos, vec!["n"]);
        assert_eq!(index.entry_count(), 3);
    }

    #[test]
    fn entries_without_orth_are_dropped() {
        let mut index = HeadwordIndex::new();
        assert!(!index.insert(Entry::default()));
        assert!(index.is_empty());
        assert_eq!(index.entry_count(), 0);
    }

    #[test]
    fn spelling_variants_share_one_entry() {
        let index = HeadwordIndex::build([entry(&["colour", "color"], "n")]);
        assert_eq!(index.len(), 2);
        assert!(Arc::ptr_eq(&index.get("colour").unwrap()[0], &index.get("color").unwrap()[0]));
        assert_eq!(index.entry_count(), 1);
    }

    #[test]
    fn iterates_in_ordinal_order() {
        let index = HeadwordIndex::build([
            entry(&["bar"], "n"),
            entry(&["Zoo"], "n"),
            entry(&["ähnlich"], "adj"),
            entry(&["apple"], "n"),
        ]);
        let keys: Vec<_> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Zoo", "apple", "bar", "ähnlich"]);
    }
}
