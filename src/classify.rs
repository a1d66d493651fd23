//! Content classification
//!
//! Pure, total text classification: every input resolves to exactly one
//! [`ContentKind`] and nothing here ever errors. Priority order is fixed:
//! empty, then JSON (strict parse with a balanced-prefix recovery scan),
//! then diagram header keywords, then a Markdown signal score, with
//! diagram as the final fallback. Must stay cheap enough to run on every
//! keystroke.

use serde::{Deserialize, Serialize};

/// Resolved content kind of the editor text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Nothing to render (blank or whitespace-only)
    Empty,
    /// Diagram grammar source for the external layout engine
    Diagram,
    Markdown,
    /// JSON-shaped text, previewed as a navigable tree
    Structured,
    /// Unrecognized text, shown as-is
    Plain,
}

impl ContentKind {
    /// Status-strip label
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Empty => "Waiting for input",
            ContentKind::Diagram => "Diagram",
            ContentKind::Markdown => "Markdown",
            ContentKind::Structured => "JSON",
            ContentKind::Plain => "Plain text",
        }
    }
}

/// Manual detection override; `Auto` defers to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectMode {
    #[default]
    Auto,
    Diagram,
    Markdown,
    Json,
    Plain,
}

impl DetectMode {
    pub fn label(self) -> &'static str {
        match self {
            DetectMode::Auto => "Auto",
            DetectMode::Diagram => "Diagram",
            DetectMode::Markdown => "Markdown",
            DetectMode::Json => "JSON",
            DetectMode::Plain => "Plain",
        }
    }
}

/// Tunable classification policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyPolicy {
    /// How many distinct Markdown signal categories must match.
    /// The lenient default accepts a single one.
    pub markdown_signal_threshold: usize,
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self {
            markdown_signal_threshold: 1,
        }
    }
}

/// Classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: ContentKind,
    /// For recovered JSON: byte length of the valid prefix of the trimmed
    /// text. `None` means the whole trimmed text parsed.
    pub structured_len: Option<usize>,
}

impl Classification {
    fn of(kind: ContentKind) -> Self {
        Self {
            kind,
            structured_len: None,
        }
    }

    /// The parseable JSON slice of `text`, when kind is Structured
    pub fn structured_slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.kind != ContentKind::Structured {
            return None;
        }
        let trimmed = text.trim();
        Some(match self.structured_len {
            Some(len) => &trimmed[..len],
            None => trimmed,
        })
    }
}

/// Classify with the default policy
pub fn classify(text: &str) -> Classification {
    classify_with(text, &ClassifyPolicy::default())
}

/// Classify with an explicit policy
pub fn classify_with(text: &str, policy: &ClassifyPolicy) -> Classification {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Classification::of(ContentKind::Empty);
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
            return Classification::of(ContentKind::Structured);
        }
        // Users frequently paste JSON followed by trailing commentary or
        // truncated output; recover the longest balanced prefix
        if let Some(len) = balanced_prefix_len(trimmed) {
            if serde_json::from_str::<serde_json::Value>(&trimmed[..len]).is_ok() {
                return Classification {
                    kind: ContentKind::Structured,
                    structured_len: Some(len),
                };
            }
        }
    }

    if matches_diagram_anchor(trimmed) {
        return Classification::of(ContentKind::Diagram);
    }

    if markdown_signal_score(trimmed) >= policy.markdown_signal_threshold {
        return Classification::of(ContentKind::Markdown);
    }

    // The fallback assumption is "probably a diagram fragment"
    Classification::of(ContentKind::Diagram)
}

/// Classify honoring a manual mode override
pub fn classify_for_mode(text: &str, mode: DetectMode, policy: &ClassifyPolicy) -> Classification {
    if mode == DetectMode::Auto {
        return classify_with(text, policy);
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Classification::of(ContentKind::Empty);
    }
    match mode {
        DetectMode::Auto => unreachable!(),
        DetectMode::Diagram => Classification::of(ContentKind::Diagram),
        DetectMode::Markdown => Classification::of(ContentKind::Markdown),
        DetectMode::Plain => Classification::of(ContentKind::Plain),
        DetectMode::Json => {
            // Forced JSON still benefits from prefix recovery; a failed
            // parse surfaces later as an inline render error
            if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
                return Classification::of(ContentKind::Structured);
            }
            let recovered = balanced_prefix_len(trimmed)
                .filter(|len| serde_json::from_str::<serde_json::Value>(&trimmed[..*len]).is_ok());
            Classification {
                kind: ContentKind::Structured,
                structured_len: recovered,
            }
        }
    }
}

/// Byte offset just past the point where brace/bracket nesting last
/// returned to zero, skipping quoted strings (backslash escapes honored).
/// `None` when the depth never balances.
fn balanced_prefix_len(text: &str) -> Option<usize> {
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut last_balanced = None;

    for (idx, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth -= 1;
                if depth == 0 {
                    last_balanced = Some(idx + c.len_utf8());
                }
                if depth < 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    last_balanced
}

/// Diagram grammar opening tokens, matched case-insensitively at the start
/// of trimmed text. `statediagram` also covers the `-v2` variant via the
/// word-boundary rule.
const DIAGRAM_ANCHORS: [&str; 14] = [
    "sequencediagram",
    "classdiagram",
    "statediagram",
    "erdiagram",
    "journey",
    "gantt",
    "pie",
    "gitgraph",
    "mindmap",
    "timeline",
    "quadrantchart",
    "requirementdiagram",
    "c4context",
    "sankey-beta",
];

/// `graph`/`flowchart` headers additionally require a direction token
const DIAGRAM_DIRECTIONS: [&str; 5] = ["tb", "bt", "lr", "rl", "td"];

pub(crate) fn matches_diagram_anchor(trimmed: &str) -> bool {
    // Only the header matters; 32 chars is enough for the longest anchor
    let head: String = trimmed.chars().take(32).collect::<String>().to_lowercase();

    for keyword in ["flowchart", "graph"] {
        if let Some(rest) = head.strip_prefix(keyword) {
            let stripped = rest.trim_start_matches([' ', '\t']);
            if stripped.len() < rest.len()
                && DIAGRAM_DIRECTIONS
                    .iter()
                    .any(|d| stripped.strip_prefix(d).is_some_and(at_word_boundary))
            {
                return true;
            }
        }
    }

    DIAGRAM_ANCHORS
        .iter()
        .any(|a| head.strip_prefix(a).is_some_and(at_word_boundary))
}

fn at_word_boundary(rest: &str) -> bool {
    rest.chars().next().map_or(true, |c| !c.is_ascii_alphanumeric())
}

/// Count how many distinct Markdown signal categories match anywhere in
/// the text. Twelve categories, mirroring common authoring patterns.
pub fn markdown_signal_score(text: &str) -> usize {
    let mut line_heading = false;
    let mut line_unordered = false;
    let mut line_ordered = false;
    let mut line_blockquote = false;
    let mut line_table = false;
    let mut line_rule = false;

    for line in text.lines() {
        line_heading |= is_heading(line);
        line_blockquote |= line.trim_start().starts_with('>');
        let lead = line.trim_start();
        line_unordered |= matches!(lead.as_bytes(), [b'-' | b'*' | b'+', b' ' | b'\t', ..]);
        line_ordered |= is_ordered_item(lead);
        line_table |= line.len() >= 3 && line.starts_with('|') && line.ends_with('|');
        line_rule |= line == "---";
    }

    let signals = [
        line_heading,
        has_double_star(text),
        has_single_delim(text, '*'),
        line_unordered,
        line_ordered,
        line_blockquote,
        has_bracket_link(text, false),
        text.split("```").count() >= 3,
        has_single_delim(text, '`'),
        line_table,
        line_rule,
        has_bracket_link(text, true),
    ];
    signals.iter().filter(|s| **s).count()
}

fn is_heading(line: &str) -> bool {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    (1..=6).contains(&hashes)
        && line.as_bytes().get(hashes).is_some_and(|b| b.is_ascii_whitespace())
}

fn is_ordered_item(lead: &str) -> bool {
    let digits = lead.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0
        && lead.as_bytes().get(digits) == Some(&b'.')
        && lead.as_bytes().get(digits + 1).is_some_and(|b| b.is_ascii_whitespace())
}

/// `**text**` with at least one non-`*` character inside
fn has_double_star(text: &str) -> bool {
    let parts: Vec<&str> = text.split("**").collect();
    parts.len() >= 3
        && parts[1..parts.len() - 1]
            .iter()
            .any(|p| !p.is_empty() && !p.contains('*'))
}

/// A delimiter pair with at least one character between, e.g. `*x*`
fn has_single_delim(text: &str, delim: char) -> bool {
    let mut open: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c == delim {
            match open {
                Some(o) if i > o + delim.len_utf8() => return true,
                _ => open = Some(i),
            }
        }
    }
    false
}

/// `[text](target)`, or `![alt](target)` when `image` (empty alt allowed)
fn has_bracket_link(text: &str, image: bool) -> bool {
    let opener = if image { "![" } else { "[" };
    let mut rest = text;
    while let Some(open) = rest.find(opener) {
        let after = &rest[open + opener.len()..];
        let Some(close) = after.find(']') else { break };
        let label_ok = image || close > 0;
        if label_ok && after[close + 1..].starts_with('(') {
            if let Some(end) = after[close + 2..].find(')') {
                if end > 0 {
                    return true;
                }
            }
        }
        rest = &after[close + 1..];
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> ContentKind {
        classify(text).kind
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(kind(""), ContentKind::Empty);
        assert_eq!(kind("   \n\t  "), ContentKind::Empty);
    }

    #[test]
    fn test_strict_json() {
        assert_eq!(kind(r#"{"a":1}"#), ContentKind::Structured);
        assert_eq!(kind("[1, 2, 3]"), ContentKind::Structured);
        assert_eq!(kind("  {\"nested\": {\"b\": []}}  "), ContentKind::Structured);
        assert!(classify(r#"{"a":1}"#).structured_len.is_none());
    }

    #[test]
    fn test_json_recovery_with_trailing_junk() {
        let text = r#"{"a":1} trailing junk"#;
        let c = classify(text);
        assert_eq!(c.kind, ContentKind::Structured);
        assert_eq!(c.structured_slice(text), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_json_recovery_honors_escaped_quotes() {
        let text = r#"{"msg": "she said \"}\" loudly"} extra"#;
        let c = classify(text);
        assert_eq!(c.kind, ContentKind::Structured);
        assert_eq!(
            c.structured_slice(text),
            Some(r#"{"msg": "she said \"}\" loudly"}"#)
        );
    }

    #[test]
    fn test_unbalanced_brace_falls_through() {
        // Depth never returns to zero, so no recovery; no markdown signals
        // either, so this lands on the diagram fallback
        assert_eq!(kind("{ not json at all"), ContentKind::Diagram);
    }

    #[test]
    fn test_diagram_anchors() {
        assert_eq!(kind("sequenceDiagram\nA->>B: hi"), ContentKind::Diagram);
        assert_eq!(kind("graph TD\nA-->B"), ContentKind::Diagram);
        assert_eq!(kind("flowchart LR\nA-->B"), ContentKind::Diagram);
        assert_eq!(kind("stateDiagram-v2\n[*] --> Idle"), ContentKind::Diagram);
        assert_eq!(kind("GANTT\ntitle Plan"), ContentKind::Diagram);
        assert_eq!(kind("pie showData\n\"a\": 1"), ContentKind::Diagram);
        assert_eq!(kind("C4Context\ntitle System"), ContentKind::Diagram);
        assert_eq!(kind("sankey-beta\na,b,10"), ContentKind::Diagram);
    }

    #[test]
    fn test_anchor_needs_word_boundary() {
        // "pie" must not fire inside a longer word
        assert_eq!(markdown_signal_score("piecemeal notes"), 0);
        assert!(!matches_diagram_anchor("piecemeal notes"));
        // "graph" without a direction token is not a diagram header
        assert!(!matches_diagram_anchor("graph paper is nice"));
        assert!(matches_diagram_anchor("graph TD"));
    }

    #[test]
    fn test_markdown_signals() {
        assert_eq!(kind("## Title\n"), ContentKind::Markdown);
        assert_eq!(kind("Some **bold** words"), ContentKind::Markdown);
        assert_eq!(kind("- item one\n- item two"), ContentKind::Markdown);
        assert_eq!(kind("1. first\n2. second"), ContentKind::Markdown);
        assert_eq!(kind("> a quote"), ContentKind::Markdown);
        assert_eq!(kind("see [docs](https://example.com)"), ContentKind::Markdown);
        assert_eq!(kind("```\ncode\n```"), ContentKind::Markdown);
        assert_eq!(kind("use `cargo test` here"), ContentKind::Markdown);
        assert_eq!(kind("| a | b |\n|---|---|"), ContentKind::Markdown);
    }

    #[test]
    fn test_threshold_policy() {
        let strict = ClassifyPolicy {
            markdown_signal_threshold: 2,
        };
        // One signal is enough by default but not under the strict policy
        assert_eq!(classify("# Title").kind, ContentKind::Markdown);
        assert_eq!(classify_with("# Title", &strict).kind, ContentKind::Diagram);
        assert_eq!(
            classify_with("# Title\n\nwith `code`", &strict).kind,
            ContentKind::Markdown
        );
    }

    #[test]
    fn test_fallback_is_diagram() {
        assert_eq!(kind("just some words"), ContentKind::Diagram);
    }

    #[test]
    fn test_priority_json_beats_markdown() {
        // Valid JSON containing markdown-looking strings is still JSON
        assert_eq!(
            kind(r##"{"note": "# heading inside"}"##),
            ContentKind::Structured
        );
    }

    #[test]
    fn test_mode_override() {
        let policy = ClassifyPolicy::default();
        assert_eq!(
            classify_for_mode("# Title", DetectMode::Diagram, &policy).kind,
            ContentKind::Diagram
        );
        assert_eq!(
            classify_for_mode("graph TD\nA-->B", DetectMode::Markdown, &policy).kind,
            ContentKind::Markdown
        );
        assert_eq!(
            classify_for_mode("anything", DetectMode::Plain, &policy).kind,
            ContentKind::Plain
        );
        // Empty input stays Empty regardless of override
        assert_eq!(
            classify_for_mode("  ", DetectMode::Markdown, &policy).kind,
            ContentKind::Empty
        );
    }

    #[test]
    fn test_forced_json_recovers_prefix() {
        let text = r#"[1,2] and a comment"#;
        let c = classify_for_mode(text, DetectMode::Json, &ClassifyPolicy::default());
        assert_eq!(c.kind, ContentKind::Structured);
        assert_eq!(c.structured_slice(text), Some("[1,2]"));
    }

    #[test]
    fn test_deterministic() {
        for input in ["graph TD", "# md", r#"{"a":1}"#, "plain", ""] {
            assert_eq!(classify(input), classify(input));
        }
    }
}
