//! Overview/Remediation section extraction from finding descriptions.
//!
//! Snyk descriptions arrive as loosely structured markdown with `##
//! Overview` and `## Remediation` sections. The text is rendered to HTML
//! with stable heading ids, sliced between heading markers, and sanitized
//! for report consumers. Missing or malformed sections degrade to empty
//! output, never an error.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag};
use regex::Regex;

static OVERVIEW_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<h2[^>]*id="overview"[^>]*>.*?</h2>"#).unwrap());

static REMEDIATION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<h2[^>]*id="remediation"[^>]*>.*?</h2>"#).unwrap());

static NEXT_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<h2").unwrap());

/// Section extractor holding the sanitization policies.
///
/// Policies are immutable after construction; build one extractor and
/// share it by reference across pipeline runs.
pub struct SectionExtractor {
    /// Strips all markup, keeping text content only.
    strip_all: Builder<'static>,
    /// Keeps `<h2 id>` so section boundaries survive sanitization.
    keep_section_headings: Builder<'static>,
}

impl SectionExtractor {
    pub fn new() -> Self {
        let mut strip_all = Builder::default();
        strip_all
            .tags(HashSet::new())
            .generic_attributes(HashSet::new());

        let mut h2_attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
        h2_attributes.insert("h2", ["id"].into_iter().collect());
        let mut keep_section_headings = Builder::default();
        keep_section_headings
            .tags(["h2"].into_iter().collect())
            .tag_attributes(h2_attributes)
            .generic_attributes(HashSet::new());

        Self {
            strip_all,
            keep_section_headings,
        }
    }

    /// Extract the sanitized Overview section.
    ///
    /// Returns the text between the first `<h2 id="overview">` heading and
    /// the next level-2 heading (or the end of the description), or an
    /// empty string when no such heading exists.
    pub fn overview(&self, raw: &str) -> String {
        let rendered = render_markdown(&normalize_input(raw));
        let sanitized = self.keep_section_headings.clean(&rendered).to_string();

        let Some(heading) = OVERVIEW_HEADING.find(&sanitized) else {
            return String::new();
        };
        let mut section = &sanitized[heading.end()..];
        if let Some(next) = NEXT_HEADING.find(section) {
            section = &section[..next.start()];
        }
        section.trim_matches('\n').to_string()
    }

    /// Extract the Remediation section as plain-text lines.
    ///
    /// Each line is sanitized down to text content; lines that are empty
    /// after stripping are dropped, order is preserved. Returns an empty
    /// vector when no `<h2 id="remediation">` heading exists.
    pub fn remediations(&self, raw: &str) -> Vec<String> {
        let rendered = render_markdown(&normalize_input(raw));

        let Some(heading) = REMEDIATION_HEADING.find(&rendered) else {
            return Vec::new();
        };
        let mut section = &rendered[heading.end()..];
        if let Some(next) = NEXT_HEADING.find(section) {
            section = &section[..next.start()];
        }

        section
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let text = self.strip_all.clean(line).to_string();
                let text = text.trim_matches('\n');
                if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                }
            })
            .collect()
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Undo the double-escaping the provider applies to line breaks and repair
/// a malformed table separator so tables render.
fn normalize_input(raw: &str) -> String {
    raw.replace("\\\\r\\\\n", "\n")
        .replace("\\\\n", "\n")
        .replace("--|", "---|")
}

/// Render markdown to HTML with auto-generated heading ids, so a heading
/// titled "Overview" becomes `<h2 id="overview">`.
fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events: Vec<Event> = Parser::new_ext(input, options).collect();
    let mut rewritten: Vec<Event> = Vec::with_capacity(events.len() + 8);

    let mut i = 0;
    while i < events.len() {
        if let Event::Start(Tag::Heading(level, _, _)) = &events[i] {
            let rank = heading_rank(*level);
            let mut end = i + 1;
            let mut text = String::new();
            while end < events.len() {
                match &events[end] {
                    Event::End(Tag::Heading(..)) => break,
                    Event::Text(t) | Event::Code(t) => text.push_str(t),
                    _ => {}
                }
                end += 1;
            }
            rewritten.push(Event::Html(CowStr::from(format!(
                "<h{rank} id=\"{}\">",
                heading_id(&text)
            ))));
            rewritten.extend(events[i + 1..end].iter().cloned());
            rewritten.push(Event::Html(CowStr::from(format!("</h{rank}>\n"))));
            i = end + 1;
        } else {
            rewritten.push(events[i].clone());
            i += 1;
        }
    }

    let mut out = String::with_capacity(input.len() * 2);
    html::push_html(&mut out, rewritten.into_iter());
    out
}

fn heading_rank(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Stable id for a heading's visible text: lowercased alphanumerics with
/// runs of anything else collapsed to a single hyphen.
fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !id.is_empty() {
                id.push('-');
            }
            pending_hyphen = false;
            for lc in c.to_lowercase() {
                id.push(lc);
            }
        } else {
            pending_hyphen = true;
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_id() {
        assert_eq!(heading_id("Overview"), "overview");
        assert_eq!(heading_id("Remediation"), "remediation");
        assert_eq!(heading_id("Details for CVE-2020-8203"), "details-for-cve-2020-8203");
        assert_eq!(heading_id("  spaced  out  "), "spaced-out");
        assert_eq!(heading_id(""), "");
    }

    #[test]
    fn test_render_markdown_heading_ids() {
        let rendered = render_markdown("## Overview\nHello");
        assert!(rendered.contains(r#"<h2 id="overview">Overview</h2>"#));
        assert!(rendered.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_normalize_input_escaped_line_breaks() {
        assert_eq!(normalize_input("a\\\\r\\\\nb"), "a\nb");
        assert_eq!(normalize_input("a\\\\nb"), "a\nb");
    }

    #[test]
    fn test_normalize_input_table_separator() {
        assert_eq!(normalize_input("|--|--|"), "|---|---|");
    }

    #[test]
    fn test_overview_between_headings() {
        let extractor = SectionExtractor::new();
        let overview = extractor.overview("## Overview\nHello\n## Details\nX");
        assert_eq!(overview, "Hello");
    }

    #[test]
    fn test_overview_at_end_of_text() {
        let extractor = SectionExtractor::new();
        let overview = extractor.overview("## Overview\nLast section, no heading after.");
        assert_eq!(overview, "Last section, no heading after.");
    }

    #[test]
    fn test_overview_missing_heading() {
        let extractor = SectionExtractor::new();
        assert_eq!(extractor.overview("## Details\nNothing else."), "");
        assert_eq!(extractor.overview(""), "");
        assert_eq!(extractor.overview("plain text, no headings"), "");
    }

    #[test]
    fn test_overview_strips_markup_keeps_text() {
        let extractor = SectionExtractor::new();
        let overview =
            extractor.overview("## Overview\nUses **unsafe** `eval` calls.\n## Details\nX");
        assert!(overview.contains("unsafe"));
        assert!(overview.contains("eval"));
        assert!(!overview.contains("<strong>"));
        assert!(!overview.contains("<code>"));
    }

    #[test]
    fn test_overview_first_heading_wins() {
        let extractor = SectionExtractor::new();
        let overview = extractor.overview("## Overview\nFirst\n## Overview\nSecond");
        assert_eq!(overview, "First");
    }

    #[test]
    fn test_overview_escaped_newlines() {
        let extractor = SectionExtractor::new();
        let overview = extractor.overview("## Overview\\\\nHello\\\\n## Details\\\\nX");
        assert_eq!(overview, "Hello");
    }

    #[test]
    fn test_overview_case_insensitive_heading() {
        let extractor = SectionExtractor::new();
        let overview = extractor.overview("## OVERVIEW\nShouty section\n## Details\nX");
        assert_eq!(overview, "Shouty section");
    }

    #[test]
    fn test_overview_with_repaired_table() {
        let extractor = SectionExtractor::new();
        let description = "## Overview\n| package | version |\n|--|--|\n| lodash | 4.17.15 |\n\n## Details\nX";
        let overview = extractor.overview(description);
        assert!(overview.contains("lodash"));
        assert!(overview.contains("4.17.15"));
    }

    #[test]
    fn test_remediations_single_line() {
        let extractor = SectionExtractor::new();
        let lines = extractor.remediations("## Remediation\nUpgrade to 2.0\n## References\nX");
        assert_eq!(lines, vec!["Upgrade to 2.0"]);
    }

    #[test]
    fn test_remediations_strip_script() {
        let extractor = SectionExtractor::new();
        let lines = extractor
            .remediations("## Remediation\n<script>bad()</script>Upgrade to 2.0\n## References\nX");
        assert_eq!(lines, vec!["Upgrade to 2.0"]);
    }

    #[test]
    fn test_remediations_list_items() {
        let extractor = SectionExtractor::new();
        let lines = extractor.remediations(
            "## Remediation\n- Upgrade lodash to 4.17.21\n- Audit transitive dependencies\n\n## References\nX",
        );
        assert_eq!(
            lines,
            vec!["Upgrade lodash to 4.17.21", "Audit transitive dependencies"]
        );
    }

    #[test]
    fn test_remediations_missing_heading() {
        let extractor = SectionExtractor::new();
        assert!(extractor.remediations("## Overview\nNo fix yet.").is_empty());
        assert!(extractor.remediations("").is_empty());
    }

    #[test]
    fn test_remediations_at_end_of_text() {
        let extractor = SectionExtractor::new();
        let lines = extractor.remediations("## Remediation\nPin the dependency.");
        assert_eq!(lines, vec!["Pin the dependency."]);
    }
}
