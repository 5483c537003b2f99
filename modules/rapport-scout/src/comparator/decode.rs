// Layered decoding of a free-form LLM reply into talking points.
//
// Strategies run in order; the first that yields at least one point wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use ai_client::strip_code_blocks;

use crate::error::CompareError;

type Strategy = fn(&str) -> Option<Vec<String>>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("json", from_json),
    ("bullets", from_bullets),
    ("numbered", from_numbered),
    ("points_fragment", from_points_fragment),
];

const BULLET_MARKERS: &[char] = &['•', '-', '*'];

static RE_NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d{1,2}[.)]\s+(.+?)\s*$").unwrap());
static RE_POINTS_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)points["']?\s*[:=]\s*\[(.*?)\]"#).unwrap());

#[derive(Deserialize)]
struct PointsPayload {
    points: Vec<serde_json::Value>,
}

/// Decode talking points from an LLM reply. Fails with
/// `UnparsableComparison` when no strategy finds a point.
///
/// Each strategy sees the whole reply first, then the body of its first code
/// fence.
pub fn decode_points(text: &str) -> Result<Vec<String>, CompareError> {
    let raw = text.trim();
    let fenced = strip_code_blocks(text);
    let views = [raw, fenced];
    let views = if fenced == raw { &views[..1] } else { &views[..] };

    for (name, strategy) in STRATEGIES {
        for view in views {
            if let Some(points) = strategy(view) {
                debug!(strategy = name, count = points.len(), "Decoded comparison points");
                return Ok(points);
            }
        }
        debug!(strategy = name, "Decode strategy found nothing");
    }
    Err(CompareError::UnparsableComparison)
}

/// The first top-level `{...}` span parsed as `{"points": [...]}`.
fn from_json(text: &str) -> Option<Vec<String>> {
    let span = first_object_span(text)?;
    let payload: PointsPayload = serde_json::from_str(span).ok()?;
    collect_points(payload.points.iter().filter_map(|p| p.as_str()))
}

/// Lines starting with `•`, `-` or `*`.
fn from_bullets(text: &str) -> Option<Vec<String>> {
    collect_points(text.lines().filter_map(bullet_text))
}

/// Lines like `1. text` or `2) text`.
fn from_numbered(text: &str) -> Option<Vec<String>> {
    collect_points(text.lines().filter_map(|line| {
        RE_NUMBERED
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }))
}

/// A `points: [a, b]`-like fragment, split on commas.
fn from_points_fragment(text: &str) -> Option<Vec<String>> {
    let inner = RE_POINTS_FRAGMENT.captures(text)?.get(1)?.as_str();
    collect_points(inner.split(','))
}

fn bullet_text(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let marker = line.chars().next()?;
    if !BULLET_MARKERS.contains(&marker) {
        return None;
    }
    let rest = &line[marker.len_utf8()..];
    // `-` and `*` need a following space so `---` and `**bold**` are not bullets.
    if marker == '•' || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

fn first_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

fn collect_points<'a>(items: impl Iterator<Item = &'a str>) -> Option<Vec<String>> {
    let points: Vec<String> = items
        .map(clean_point)
        .filter(|p| !p.is_empty())
        .collect();
    (!points.is_empty()).then_some(points)
}

fn clean_point(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_is_preferred() {
        let text = r#"{"points": ["Both in SF", "Both love sauna", "Shared skill: BANT"]}"#;
        assert_eq!(
            decode_points(text).unwrap(),
            vec!["Both in SF", "Both love sauna", "Shared skill: BANT"]
        );
    }

    #[test]
    fn json_is_found_inside_prose_and_fences() {
        let text = "Sure! Here you go:\n```json\n{\"points\": [\"One\", \"Two\"]}\n```\nEnjoy.";
        assert_eq!(decode_points(text).unwrap(), vec!["One", "Two"]);

        let text = "Result: {\"points\": [\"One\"]} -- done";
        assert_eq!(decode_points(text).unwrap(), vec!["One"]);
    }

    #[test]
    fn points_outside_a_stray_fence_are_kept() {
        let text = "{\"points\": [\"Both in SF\", \"Both run\"]}\n\n```\nnote: kept it short\n```";
        assert_eq!(decode_points(text).unwrap(), vec!["Both in SF", "Both run"]);

        let text = "- Both in SF\n- Both run\n\nExample:\n```\nnot a point\n```";
        assert_eq!(decode_points(text).unwrap(), vec!["Both in SF", "Both run"]);
    }

    #[test]
    fn fenced_json_wins_over_a_brace_in_the_prose() {
        let text = "Shape is {points}:\n```json\n{\"points\": [\"One\"]}\n```";
        assert_eq!(decode_points(text).unwrap(), vec!["One"]);
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_object() {
        let text = r#"{"points": ["Use {curly} braces", "Say \"hi\" first"]}"#;
        assert_eq!(
            decode_points(text).unwrap(),
            vec!["Use {curly} braces", "Say \"hi\" first"]
        );
    }

    #[test]
    fn bullets_are_used_when_there_is_no_json() {
        let text = "Talking points:\n• Both in SF\n- Both run\n* Shared skill: Voice AI\n---\n**Note** keep it light";
        assert_eq!(
            decode_points(text).unwrap(),
            vec!["Both in SF", "Both run", "Shared skill: Voice AI"]
        );
    }

    #[test]
    fn numbered_lines_are_used_when_there_are_no_bullets() {
        let text = "Here:\n1. Both in SF\n2) Both run\n 3. Both like podcasts";
        assert_eq!(
            decode_points(text).unwrap(),
            vec!["Both in SF", "Both run", "Both like podcasts"]
        );
    }

    #[test]
    fn malformed_json_falls_through_to_points_fragment() {
        let text = r#"{"points": ["Both in SF", "Both run",]}"#;
        assert_eq!(decode_points(text).unwrap(), vec!["Both in SF", "Both run"]);

        let text = "points = ['Both in SF', 'Both run']";
        assert_eq!(decode_points(text).unwrap(), vec!["Both in SF", "Both run"]);
    }

    #[test]
    fn unstructured_text_is_unparsable() {
        let err = decode_points("I'm sorry, I can't compare these profiles.").unwrap_err();
        assert!(matches!(err, CompareError::UnparsableComparison));
    }

    #[test]
    fn empty_points_array_is_unparsable() {
        let err = decode_points(r#"{"points": []}"#).unwrap_err();
        assert!(matches!(err, CompareError::UnparsableComparison));
    }

    #[test]
    fn non_string_json_points_are_skipped() {
        let text = r#"{"points": [1, "Both in SF", null, "  "]}"#;
        assert_eq!(decode_points(text).unwrap(), vec!["Both in SF"]);
    }
}
