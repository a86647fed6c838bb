// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single word as it appeared in the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Original slice, punctuation included. This is what gets displayed.
    pub surface: String,
    /// Word characters only. This is what gets looked up.
    pub clean: String,
}

/// The closed set of source languages a word can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginLabel {
    #[serde(rename = "Old English")]
    OldEnglish,
    Latin,
    French,
    #[serde(rename = "Old Norse")]
    OldNorse,
    Germanic,
    Greek,
    Celtic,
    Sanskrit,
    Dutch,
    Italian,
    Spanish,
    Arabic,
    Unknown,
}

impl OriginLabel {
    pub const ALL: [OriginLabel; 13] = [
        OriginLabel::OldEnglish,
        OriginLabel::Latin,
        OriginLabel::French,
        OriginLabel::OldNorse,
        OriginLabel::Germanic,
        OriginLabel::Greek,
        OriginLabel::Celtic,
        OriginLabel::Sanskrit,
        OriginLabel::Dutch,
        OriginLabel::Italian,
        OriginLabel::Spanish,
        OriginLabel::Arabic,
        OriginLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OriginLabel::OldEnglish => "Old English",
            OriginLabel::Latin => "Latin",
            OriginLabel::French => "French",
            OriginLabel::OldNorse => "Old Norse",
            OriginLabel::Germanic => "Germanic",
            OriginLabel::Greek => "Greek",
            OriginLabel::Celtic => "Celtic",
            OriginLabel::Sanskrit => "Sanskrit",
            OriginLabel::Dutch => "Dutch",
            OriginLabel::Italian => "Italian",
            OriginLabel::Spanish => "Spanish",
            OriginLabel::Arabic => "Arabic",
            OriginLabel::Unknown => "Unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, OriginLabel::Unknown)
    }
}

impl fmt::Display for OriginLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OriginLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown origin label: {s}"))
    }
}

/// One morpheme of a decomposed word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundPart {
    pub text: String,
    pub origin: OriginLabel,
}

/// A word split into its leading morpheme and trailing morpheme/affix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compound {
    pub parts: [CompoundPart; 2],
    pub original_word: String,
}

impl Compound {
    /// Paints an `Unknown` part with the other part's origin, so a compound is
    /// either fully known or fully unknown.
    pub fn merge_unknown_parts(&mut self) {
        let known = self
            .parts
            .iter()
            .map(|part| part.origin)
            .find(|origin| !origin.is_unknown());
        if let Some(known) = known {
            for part in self.parts.iter_mut() {
                if part.origin.is_unknown() {
                    part.origin = known;
                }
            }
        }
    }
}

/// What the resolver concluded about one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Simple { origin: OriginLabel },
    Compound(Compound),
}

impl Resolution {
    pub fn simple(origin: OriginLabel) -> Self {
        Resolution::Simple { origin }
    }

    pub fn unknown() -> Self {
        Resolution::simple(OriginLabel::Unknown)
    }

    /// `true` only for `Simple(Unknown)`. A compound always carries a signal.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolution::Simple { origin } if origin.is_unknown())
    }

    pub fn label(&self) -> Option<OriginLabel> {
        match self {
            Resolution::Simple { origin } => Some(*origin),
            Resolution::Compound(_) => None,
        }
    }
}

impl From<OriginLabel> for Resolution {
    fn from(origin: OriginLabel) -> Self {
        Resolution::simple(origin)
    }
}

/// A token's surface form paired with its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedWord {
    pub word: String,
    pub resolution: Resolution,
}

impl ProcessedWord {
    /// One label per simple word, one per compound part.
    pub fn origins(&self) -> Vec<OriginLabel> {
        match &self.resolution {
            Resolution::Simple { origin } => vec![*origin],
            Resolution::Compound(compound) => compound.parts.iter().map(|p| p.origin).collect(),
        }
    }
}

/// Result of one `process_text` call. All-or-nothing: a network failure on any
/// token empties `results`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<ProcessedWord>,
    pub has_network_error: bool,
}

/// One slice of the origin distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginStat {
    pub origin: OriginLabel,
    pub count: usize,
    /// `count / total * 100`, formatted with one decimal.
    pub percentage: String,
    /// `count / total * 360`, in degrees.
    pub angle: f64,
}
