//! Shared types that mirror the lexical records found in FreeDict TEI files.
//!
//! An [`Entry`] carries the orthographic forms, pronunciations, grammatical
//! gender and part-of-speech tags of one `<entry>` element, plus its
//! [`Sense`]s. A [`LanguagePair`] names a dictionary by its two-letter
//! ISO 639-1 codes, derived from FreeDict's three-letter catalog names.
//!
//! ```rust
//! use freedict_types::LanguagePair;
//!
//! let pair = LanguagePair::from_name("deu-eng").unwrap();
//! assert_eq!(pair.to_string(), "de-en");
//! ```

use std::fmt;

use thiserror::Error;

/// One meaning of an [`Entry`], with its example quotes and definitions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sense {
    pub quotes: Vec<String>,
    pub defs: Vec<String>,
}

/// One lexical entry of a dictionary.
///
/// `genders` keeps `None` for a `<gen>` element that was declared without
/// text, so "gender present but unspecified" survives extraction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Entry {
    pub orths: Vec<String>,
    pub prons: Vec<String>,
    pub genders: Vec<Option<String>>,
    pub pos: Vec<String>,
    pub senses: Vec<Sense>,
}

impl Entry {
    /// Append a part-of-speech tag unless it is already recorded.
    pub fn add_pos(&mut self, pos: impl Into<String>) {
        let pos = pos.into();
        if !self.pos.contains(&pos) {
            self.pos.push(pos);
        }
    }

    /// Genders that carry text, in declaration order.
    pub fn present_genders(&self) -> impl Iterator<Item = &str> {
        self.genders.iter().filter_map(|g| g.as_deref())
    }
}

/// Three-letter to two-letter language codes for every language FreeDict
/// ships that has an ISO 639-1 code.
const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("afr", "af"),
    ("ara", "ar"),
    ("bre", "br"),
    ("bul", "bg"),
    ("cat", "ca"),
    ("ces", "cs"),
    ("cym", "cy"),
    ("dan", "da"),
    ("deu", "de"),
    ("ell", "el"),
    ("eng", "en"),
    ("epo", "eo"),
    ("fin", "fi"),
    ("fra", "fr"),
    ("gla", "gd"),
    ("gle", "ga"),
    ("hin", "hi"),
    ("hrv", "hr"),
    ("hun", "hu"),
    ("ind", "id"),
    ("isl", "is"),
    ("ita", "it"),
    ("jpn", "ja"),
    ("kur", "ku"),
    ("lat", "la"),
    ("lit", "lt"),
    ("mkd", "mk"),
    ("mlg", "mg"),
    ("nld", "nl"),
    ("nno", "nn"),
    ("nob", "nb"),
    ("nor", "no"),
    ("oci", "oc"),
    ("pol", "pl"),
    ("por", "pt"),
    // FreeDict uses the retired code; ISO 639-3 would be `ron`.
    ("rom", "ro"),
    ("rus", "ru"),
    ("san", "sa"),
    ("slk", "sk"),
    ("slv", "sl"),
    ("spa", "es"),
    ("srp", "sr"),
    ("swe", "sv"),
    // Macrolanguage is `swa`; FreeDict names the individual language.
    ("swh", "sw"),
    ("tur", "tr"),
    ("wol", "wo"),
    ("zho", "zh"),
];

/// Map a three-letter FreeDict language code to its two-letter form.
pub fn two_letter_code(code: &str) -> Option<&'static str> {
    LANGUAGE_CODES
        .iter()
        .find(|(three, _)| *three == code)
        .map(|(_, two)| *two)
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum PairError {
    #[error("mapping missing for {0}")]
    UnknownLanguage(String),
    #[error("dictionary name {0:?} is not of the form src-dst")]
    MalformedName(String),
}

/// Source/destination language pair using two-letter codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LanguagePair {
    pub source: &'static str,
    pub target: &'static str,
}

impl LanguagePair {
    /// Build a pair from two three-letter codes.
    pub fn from_codes(source: &str, target: &str) -> Result<Self, PairError> {
        let source =
            two_letter_code(source).ok_or_else(|| PairError::UnknownLanguage(source.into()))?;
        let target =
            two_letter_code(target).ok_or_else(|| PairError::UnknownLanguage(target.into()))?;
        Ok(Self { source, target })
    }

    /// Build a pair from a catalog name such as `deu-eng`.
    pub fn from_name(name: &str) -> Result<Self, PairError> {
        let (source, target) = name
            .split_once('-')
            .ok_or_else(|| PairError::MalformedName(name.into()))?;
        Self::from_codes(source, target)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}
