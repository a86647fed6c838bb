// src/core/patterns.rs
//! Static rule tables driving the resolver. Order matters in every table:
//! the first matching entry wins.
use crate::core::types::OriginLabel;
use regex::Regex;
use std::sync::LazyLock;

/// A suffix-stripping rule: `word` matching `^(.+)<suffix>$` reduces to
/// `stem + replacement`.
pub struct MorphRule {
    pub suffix: &'static str,
    pub replacement: &'static str,
}

pub const MORPHOLOGICAL_RULES: &[MorphRule] = &[
    MorphRule { suffix: "s", replacement: "" },   // files -> file
    MorphRule { suffix: "es", replacement: "" },  // boxes -> box
    MorphRule { suffix: "ies", replacement: "y" }, // flies -> fly
    MorphRule { suffix: "ed", replacement: "" },  // walked -> walk
    MorphRule { suffix: "ing", replacement: "" }, // walking -> walk
    MorphRule { suffix: "er", replacement: "" },  // bigger -> big
    MorphRule { suffix: "est", replacement: "" }, // biggest -> big
];

/// Stems shorter than this are not worth a lookup.
const MIN_STEM_LEN: usize = 3;

impl MorphRule {
    /// Returns the reduced form when the suffix matches and the stripped stem
    /// keeps at least `MIN_STEM_LEN` characters.
    pub fn apply(&self, word: &str) -> Option<String> {
        let stem = word.strip_suffix(self.suffix)?;
        if stem.chars().count() < MIN_STEM_LEN {
            return None;
        }
        Some(format!("{stem}{}", self.replacement))
    }
}

/// Every candidate stem for `word`, in rule order.
pub fn morphological_candidates(word: &str) -> Vec<String> {
    MORPHOLOGICAL_RULES
        .iter()
        .filter_map(|rule| rule.apply(word))
        .collect()
}

fn ci(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).unwrap()
}

/// Language indicators tested against the plain etymology text.
pub static ETYMOLOGY_PATTERNS: LazyLock<Vec<(Regex, OriginLabel)>> = LazyLock::new(|| {
    use OriginLabel::*;
    vec![
        (ci(r"from\s+(?:the\s+)?old\s+english"), OldEnglish),
        (ci(r"from\s+(?:the\s+)?latin"), Latin),
        (ci(r"from\s+(?:the\s+)?(?:old\s+)?french"), French),
        (ci(r"from\s+(?:the\s+)?old\s+norse"), OldNorse),
        (ci(r"from\s+(?:the\s+)?(?:proto-)?germanic"), Germanic),
        (ci(r"from\s+(?:the\s+)?(?:ancient\s+)?greek"), Greek),
        (ci(r"from\s+(?:the\s+)?celtic"), Celtic),
        (ci(r"from\s+(?:the\s+)?sanskrit"), Sanskrit),
        (ci(r"from\s+(?:the\s+)?dutch"), Dutch),
        (ci(r"from\s+(?:the\s+)?italian"), Italian),
        (ci(r"from\s+(?:the\s+)?spanish"), Spanish),
        (ci(r"from\s+(?:the\s+)?arabic"), Arabic),
        (ci(r"borrowed\s+from\s+(?:the\s+)?latin"), Latin),
        (ci(r"borrowed\s+from\s+(?:the\s+)?(?:old\s+)?french"), French),
        (ci(r"of\s+(?:the\s+)?latin\s+origin"), Latin),
        (ci(r"of\s+(?:the\s+)?(?:old\s+)?french\s+origin"), French),
        (ci(r"of\s+(?:the\s+)?germanic\s+origin"), Germanic),
    ]
});

pub fn classify_etymology_text(text: &str) -> Option<OriginLabel> {
    ETYMOLOGY_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, origin)| *origin)
}

// Linked forms: the headword is the `title` of the first anchor after the phrase.
// The fragment after `#` is not part of the capture.
const LINK_TARGET: &str = r##".*?<a[^>]*title="([^"#]+)(?:#[^"]*)?"[^>]*>"##;

pub static INFLECTION_LINK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"plural\s+of\s+",
        r"past\s+(?:tense\s+)?(?:and\s+past\s+participle\s+)?of\s+",
        r"present\s+participle\s+of\s+",
        r"third-person\s+singular\s+.*?of\s+",
        r"simple\s+past\s+.*?of\s+",
        r"past\s+participle\s+of\s+",
    ]
    .iter()
    .map(|phrase| ci(&format!("{phrase}{LINK_TARGET}")))
    .collect()
});

pub static INFLECTION_TEXT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"plural\s+of\s+(\w+)",
        r"past\s+(?:tense\s+)?(?:and\s+past\s+participle\s+)?of\s+(\w+)",
        r"present\s+participle\s+of\s+(\w+)",
        r"gerund\s+of\s+(\w+)",
        r"third-person\s+singular\s+(?:simple\s+)?present\s+(?:indicative\s+)?(?:form\s+)?of\s+(\w+)",
        r"simple\s+past\s+tense\s+and\s+past\s+participle\s+of\s+(\w+)",
        r"comparative\s+form\s+of\s+(\w+)",
        r"superlative\s+form\s+of\s+(\w+)",
        r"past\s+participle\s+of\s+(\w+)",
        r"inflection\s+of\s+(\w+)",
    ]
    .iter()
    .map(|pattern| ci(pattern))
    .collect()
});

/// Historical origin of common English affixes, keyed by hyphenated form.
pub const AFFIX_ORIGINS: &[(&str, OriginLabel)] = &[
    ("-ly", OriginLabel::OldEnglish),
    ("-ness", OriginLabel::OldEnglish),
    ("-ment", OriginLabel::French),
    ("-tion", OriginLabel::Latin),
    ("-sion", OriginLabel::Latin),
    ("-ity", OriginLabel::Latin),
    ("-ous", OriginLabel::Latin),
    ("-ful", OriginLabel::OldEnglish),
    ("-less", OriginLabel::OldEnglish),
    ("-ward", OriginLabel::OldEnglish),
    ("-wise", OriginLabel::OldEnglish),
    ("un-", OriginLabel::OldEnglish),
    ("re-", OriginLabel::Latin),
    ("pre-", OriginLabel::Latin),
    ("dis-", OriginLabel::Latin),
    ("in-", OriginLabel::Latin),
    ("im-", OriginLabel::Latin),
];

pub fn affix_origin(affix: &str) -> Option<OriginLabel> {
    AFFIX_ORIGINS
        .iter()
        .find(|(key, _)| *key == affix)
        .map(|(_, origin)| *origin)
}

/// A bound affix is marked by a leading or trailing hyphen.
pub fn is_bound_affix(part: &str) -> bool {
    part.starts_with('-') || part.ends_with('-')
}

/// Last-resort scan for language codes and names left in the etymology text.
pub static LANGUAGE_CODE_HINTS: LazyLock<Vec<(Vec<Regex>, OriginLabel)>> = LazyLock::new(|| {
    vec![
        (
            vec![Regex::new(r"\bfro\b").unwrap(), ci(r"Old French")],
            OriginLabel::French,
        ),
        (
            vec![Regex::new(r"\bang\b").unwrap(), ci(r"Old English")],
            OriginLabel::OldEnglish,
        ),
        (
            vec![Regex::new(r"\bla\b").unwrap(), Regex::new(r"\blat\b").unwrap()],
            OriginLabel::Latin,
        ),
        (vec![Regex::new(r"\bgrc\b").unwrap()], OriginLabel::Greek),
    ]
});

pub fn language_code_hint(text: &str) -> Option<OriginLabel> {
    LANGUAGE_CODE_HINTS
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| p.is_match(text)))
        .map(|(_, origin)| *origin)
}
