use super::rules::{Capture, LookupRules, SelectorRule};
use super::LookupResult;
use crate::model::PartOfSpeech;
use scraper::{ElementRef, Html, Selector};

/// Applies each field's rule chain to `html`.
///
/// Fields are independent: a miss on one never affects the others, and a miss is
/// an empty value rather than an error.
pub fn extract(html: &str, rules: &LookupRules) -> LookupResult {
    let document = Html::parse_document(html);

    let pronunciation = first_match(&document, &rules.pronunciation, Some)
        .map(|markup| emphasize_stress(&markup))
        .unwrap_or_default();

    let part_of_speech = first_match(&document, &rules.part_of_speech, |raw| {
        let detected = PartOfSpeech::detect(&raw);
        if detected.is_none() {
            tracing::debug!(candidate = %raw, "rejected part-of-speech candidate");
        }
        detected
    });

    let definition = first_match(&document, &rules.definition, Some).unwrap_or_default();

    for (field, found) in [
        ("pronunciation", !pronunciation.is_empty()),
        ("part_of_speech", part_of_speech.is_some()),
        ("definition", !definition.is_empty()),
    ] {
        if !found {
            tracing::debug!(field, "no selector rule matched");
        }
    }

    LookupResult {
        pronunciation,
        definition,
        part_of_speech,
        source: rules.source.clone(),
    }
}

/// Walks `rules` in order and returns the first accepted candidate.
///
/// Only the first element each selector matches is considered. A candidate is the
/// captured value of that element when its text is non-empty; `accept` may still
/// turn it down, in which case the next rule is tried.
fn first_match<T>(
    document: &Html,
    rules: &[SelectorRule],
    accept: impl Fn(String) -> Option<T>,
) -> Option<T> {
    for rule in rules {
        let selector = match Selector::parse(&rule.selector) {
            Ok(selector) => selector,
            Err(e) => {
                tracing::warn!(selector = %rule.selector, error = %e, "skipping invalid selector");
                continue;
            }
        };

        let Some(element) = document.select(&selector).next() else {
            continue;
        };

        let text = element_text(&element);
        if text.is_empty() {
            continue;
        }

        let raw = match rule.capture {
            Capture::Text => text,
            Capture::Markup => element.inner_html().trim().to_string(),
        };

        if let Some(value) = accept(raw) {
            tracing::trace!(selector = %rule.selector, "selector rule matched");
            return Some(value);
        }
    }
    None
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Uppercases the text inside emphasis spans of a pronunciation fragment.
///
/// Stressed syllables come wrapped in `<b>`, `<strong>` or a bold-styled `<span>`.
/// Their text is uppercased; tags, attributes, entity references and everything
/// outside emphasis are copied through untouched. Applying it twice gives the same
/// result as applying it once.
pub fn emphasize_stress(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    // Open elements as (name, is_emphasis).
    let mut open: Vec<(String, bool)> = Vec::new();
    let mut rest = markup;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let end = match rest.find('>') {
                Some(end) => end + 1,
                None => {
                    out.push_str(rest);
                    break;
                }
            };
            let tag = &rest[..end];
            track_tag(tag, &mut open);
            out.push_str(tag);
            rest = &rest[end..];
            continue;
        }

        if rest.starts_with('&') {
            if let Some(end) = entity_end(rest) {
                out.push_str(&rest[..end]);
                rest = &rest[end..];
                continue;
            }
        }

        let first = rest.chars().next().map_or(1, char::len_utf8);
        let next = rest[first..]
            .find(['<', '&'])
            .map(|i| i + first)
            .unwrap_or(rest.len());
        let text = &rest[..next];
        if open.iter().any(|(_, emphasis)| *emphasis) {
            out.push_str(&text.to_uppercase());
        } else {
            out.push_str(text);
        }
        rest = &rest[next..];
    }

    out
}

fn track_tag(tag: &str, open: &mut Vec<(String, bool)>) {
    let inner = tag.trim_start_matches('<').trim_end_matches('>');
    if inner.starts_with('!') || inner.starts_with('?') {
        return;
    }

    if let Some(closing) = inner.strip_prefix('/') {
        let name = tag_name(closing);
        if let Some(pos) = open.iter().rposition(|(open_name, _)| *open_name == name) {
            open.truncate(pos);
        }
        return;
    }

    let name = tag_name(inner);
    if inner.trim_end().ends_with('/') || is_void(&name) {
        return;
    }
    let emphasis = is_emphasis(&name, inner);
    open.push((name, emphasis));
}

fn tag_name(inner: &str) -> String {
    inner
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn is_void(name: &str) -> bool {
    matches!(
        name,
        "br" | "hr" | "img" | "wbr" | "input" | "meta" | "link" | "source"
    )
}

fn is_emphasis(name: &str, inner: &str) -> bool {
    match name {
        "b" | "strong" => true,
        "span" => {
            let compact: String = inner
                .to_ascii_lowercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            compact.contains("font-weight:bold") || compact.contains("font-weight:700")
        }
        _ => false,
    }
}

/// Length of an entity reference like `&amp;` or `&#233;` at the start of `s`.
fn entity_end(s: &str) -> Option<usize> {
    let semi = s.find(';')?;
    let body = &s[1..semi];
    let valid = !body.is_empty()
        && body.len() <= 10
        && (body.chars().all(|c| c.is_ascii_alphanumeric())
            || (body.starts_with('#') && body[1..].chars().all(|c| c.is_ascii_alphanumeric())));
    valid.then_some(semi + 1)
}
