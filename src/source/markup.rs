// src/source/markup.rs
//! Regex scraping over rendered Wiktionary HTML. Everything here is a pure
//! function of its input so it can be exercised against fixed fixtures.
use crate::core::patterns::{INFLECTION_LINK_PATTERNS, INFLECTION_TEXT_PATTERNS};
use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_OR_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(?:script|style)>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

static ENGLISH_HEADING_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h2[^>]*><span[^>]*id="English"[^>]*>English</span>.*?</h2>"#).unwrap()
});
static ENGLISH_HEADING_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<h2[^>]*id="English"[^>]*>English</h2>"#).unwrap());

static LINKED_FROM_COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)from\s+.*?<a[^>]*title="([^"]+)"[^>]*>([^<]+)</a>(?:\s*</[^>]+>)*\s*\+[\x{200E}\s]*.*?<a[^>]*title="([^"]+)"[^>]*>([^<]+)</a>"#,
    )
    .unwrap()
});
static LINKED_EQUIVALENT_COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)equivalent\s+to\s+.*?<a[^>]*title="([^"]+)"[^>]*>([^<]+)</a>(?:\s*</[^>]+>)*\s*\+[\x{200E}\s]*.*?<a[^>]*title="([^"]+)"[^>]*>([^<]+)</a>"#,
    )
    .unwrap()
});
static PLAIN_COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:from|equivalent\s+to)\s+([^\s+]+)\s*\+[\x{200E}\s]*([^\s.,]+)").unwrap()
});

static SEE_ALSO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)see also[:\s]*<a[^>]*title="([^"]+)""#).unwrap());

/// Text content of an HTML fragment: tags dropped, entities decoded.
pub fn to_plain_text(html: &str) -> String {
    let without_scripts = SCRIPT_OR_STYLE.replace_all(html, "");
    let without_tags = TAG.replace_all(&without_scripts, "");
    decode_entities(&without_tags)
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match name {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{00A0}'),
                    "lrm" => Some('\u{200E}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

/// The markup between the English `<h2>` heading and the next `<h2`.
pub fn english_section(html: &str) -> Option<&str> {
    let heading = ENGLISH_HEADING_SPAN
        .find(html)
        .or_else(|| ENGLISH_HEADING_BARE.find(html))?;
    let rest = &html[heading.end()..];
    let end = rest.find("<h2").unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Headword of a linked "plural of …"-style definition.
pub fn find_inflection_target(html: &str) -> Option<String> {
    INFLECTION_LINK_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(html)?;
        let title = caps.get(1)?.as_str();
        let headword = title.split('#').next().unwrap_or(title).trim();
        (!headword.is_empty()).then(|| headword.to_string())
    })
}

/// Plain-text variant of [`find_inflection_target`] for pages without an
/// English heading.
pub fn find_inflection_target_plain(text: &str) -> Option<String> {
    INFLECTION_TEXT_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Both halves of a "from X + Y" / "equivalent to X + Y" construct. Linked
/// anchor text is preferred over the plain-text reading.
pub fn find_compound(html: &str, text: &str) -> Option<(String, String)> {
    let linked = LINKED_FROM_COMPOUND
        .captures(html)
        .or_else(|| LINKED_EQUIVALENT_COMPOUND.captures(html));
    if let Some(caps) = linked {
        let first = strip_internal_hyphens(caps.get(2)?.as_str().trim());
        let second = strip_internal_hyphens(caps.get(4)?.as_str().trim());
        return Some((first, second));
    }

    let caps = PLAIN_COMPOUND.captures(text)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Removes hyphens inside a word while keeping a leading or trailing bound
/// affix marker: `"sun-light"` becomes `"sunlight"`, `"-ly"` stays `"-ly"`.
fn strip_internal_hyphens(word: &str) -> String {
    let leading = word.starts_with('-');
    let trailing = word.len() > 1 && word.ends_with('-');
    let core: String = word.trim_matches('-').chars().filter(|c| *c != '-').collect();
    let mut out = String::with_capacity(word.len());
    if leading {
        out.push('-');
    }
    out.push_str(&core);
    if trailing {
        out.push('-');
    }
    out
}

/// Lowercased target of a "see also: <link>" cross-reference.
pub fn find_see_also(html: &str) -> Option<String> {
    SEE_ALSO
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFLECTED_PAGE: &str = r#"<div class="mw-parser-output">
<h2><span class="mw-headline" id="English">English</span><span class="mw-editsection">[edit]</span></h2>
<h3><span id="Noun">Noun</span></h3>
<ol><li><span class="form-of-definition">plural of <span class="form-of-definition-link"><i class="Latn mention" lang="en"><a href="/wiki/mouse#English" title="mouse">mouse</a></i></span></span></li></ol>
<h2><span class="mw-headline" id="French">French</span></h2>
<p>plural of <a href="/wiki/souris" title="souris">souris</a></p>
</div>"#;

    #[test]
    fn plain_text_drops_tags_and_decodes_entities() {
        let html = "<p>From <i>Old&nbsp;English</i> &amp; <b>Latin</b> &#8220;x&#x201D;</p><style>.a{}</style>";
        assert_eq!(to_plain_text(html), "From Old\u{a0}English & Latin \u{201c}x\u{201d}");
    }

    #[test]
    fn unknown_entities_are_left_alone() {
        assert_eq!(to_plain_text("a &bogus; b"), "a &bogus; b");
    }

    #[test]
    fn english_section_stops_at_next_language() {
        let section = english_section(INFLECTED_PAGE).unwrap();
        assert!(section.contains("mouse"));
        assert!(!section.contains("souris"));
    }

    #[test]
    fn english_section_accepts_bare_heading() {
        let html = r#"<h2 id="English">English</h2><p>body</p><h2 id="Dutch">Dutch</h2>"#;
        assert_eq!(english_section(html), Some("<p>body</p>"));
        assert_eq!(english_section("<p>no headings</p>"), None);
    }

    #[test]
    fn linked_inflection_drops_fragment() {
        let section = english_section(INFLECTED_PAGE).unwrap();
        assert_eq!(find_inflection_target(section).as_deref(), Some("mouse"));

        let html = r##"past tense of <a href="/wiki/run#English" title="run#English">run</a>"##;
        assert_eq!(find_inflection_target(html).as_deref(), Some("run"));
    }

    #[test]
    fn inflection_phrase_does_not_reach_links_on_later_lines() {
        let section = "<p>The plural of this noun is rarely used.</p>\n<p>Related: <a href=\"/wiki/Appendix:Glossary\" title=\"Appendix:Glossary\">glossary</a></p>";
        assert_eq!(find_inflection_target(section), None);
    }

    #[test]
    fn plain_inflection_fallbacks() {
        assert_eq!(find_inflection_target_plain("gerund of swim").as_deref(), Some("swim"));
        assert_eq!(
            find_inflection_target_plain("Comparative form of tall: more tall").as_deref(),
            Some("tall")
        );
        assert_eq!(
            find_inflection_target_plain("third-person singular simple present indicative form of go")
                .as_deref(),
            Some("go")
        );
        assert_eq!(find_inflection_target_plain("A small rodent."), None);
    }

    #[test]
    fn linked_compound_prefers_anchor_text() {
        let html = r#"<p>From <i><a href="/wiki/sun" title="sun">sun</a></i> + <i><a href="/wiki/-light" title="light">light</a></i>.</p>"#;
        let text = to_plain_text(html);
        assert_eq!(
            find_compound(html, &text),
            Some(("sun".to_string(), "light".to_string()))
        );
    }

    #[test]
    fn linked_compound_keeps_affix_marker() {
        let html = "<p>Equivalent to <a title=\"quick\">quick</a> +\u{200e} <a title=\"-ly\">-ly</a>.</p>";
        let text = to_plain_text(html);
        assert_eq!(
            find_compound(html, &text),
            Some(("quick".to_string(), "-ly".to_string()))
        );
    }

    #[test]
    fn plain_compound_fallback() {
        let text = "From dark + -ness.";
        assert_eq!(
            find_compound(text, text),
            Some(("dark".to_string(), "-ness".to_string()))
        );
        assert_eq!(find_compound("<p>Unknown.</p>", "Unknown."), None);
    }

    #[test]
    fn internal_hyphens() {
        assert_eq!(strip_internal_hyphens("sun-light"), "sunlight");
        assert_eq!(strip_internal_hyphens("-ly"), "-ly");
        assert_eq!(strip_internal_hyphens("un-"), "un-");
        assert_eq!(strip_internal_hyphens("-a-b-"), "-ab-");
    }

    #[test]
    fn see_also_is_lowercased() {
        let html = r#"<p>See also: <a href="/wiki/Colour" title="Colour">Colour</a></p>"#;
        assert_eq!(find_see_also(html).as_deref(), Some("colour"));
        assert_eq!(find_see_also("<p>nothing</p>"), None);
    }
}
