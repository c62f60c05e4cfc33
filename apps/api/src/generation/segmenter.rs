//! Section segmentation of free-form resume text.
//!
//! Two strategies, kept separate:
//! - `segment` reads model output: a line is a header when it mentions a known keyword.
//! - `split_into_sections` reads template-expanded text: a line is a header when it is
//!   shouted (all upper-case) or starts with a known prefix.
//!
//! Neither can fail. Unrecognised text simply produces no sections.

use crate::models::section::SectionMap;

/// Keywords that mark a header line in model output, matched case-insensitively
/// anywhere in the line.
pub const HEADER_KEYWORDS: &[&str] = &[
    "SUMMARY",
    "OBJECTIVE",
    "CORE COMPETENCIES",
    "SKILLS",
    "TECHNICAL SKILLS",
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "EDUCATION",
    "ACADEMIC BACKGROUND",
];

/// Prefixes that mark a header line in template-expanded text.
pub const HEADER_PREFIXES: &[&str] = &[
    "CONTACT",
    "PROFESSIONAL",
    "EXPERIENCE",
    "EDUCATION",
    "SKILLS",
    "SUMMARY",
];

const MIN_SHOUTED_HEADER_CHARS: usize = 4;

fn is_keyword_header(line: &str) -> bool {
    let upper = line.to_uppercase();
    HEADER_KEYWORDS.iter().any(|kw| upper.contains(kw))
}

/// Groups body lines under the most recent header. Lines before the first header
/// are dropped. Blank lines never reach a body.
fn collect_sections(raw: &str, is_header: impl Fn(&str) -> bool) -> Vec<(String, String)> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_header(line) {
            if let Some((title, body)) = current.take() {
                sections.push((title, body.join("\n")));
            }
            current = Some((line.to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((title, body)) = current {
        sections.push((title, body.join("\n")));
    }
    sections
}

/// Splits model output into titled sections keyed by the literal header line.
///
/// A header repeated verbatim replaces the earlier body in place; headers that
/// differ in any character ("EXPERIENCE" vs "Experience:") stay separate.
pub fn segment(raw: &str) -> SectionMap {
    collect_sections(raw, is_keyword_header).into_iter().collect()
}

/// Renders a map back to text, one `title\nbody\n\n` block per section.
/// Inverse of `segment` for text already in the canonical header format.
#[allow(dead_code)]
pub fn segment_to_text(sections: &SectionMap) -> String {
    let mut out = String::new();
    for (title, body) in sections.iter() {
        if !title.is_empty() {
            out.push_str(title);
            out.push('\n');
        }
        out.push_str(&body.to_text());
        out.push_str("\n\n");
    }
    out
}

/// All-caps with at least one cased character, e.g. "EDUCATION" or "C++ / GO".
fn is_shouted(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

fn is_layout_header(line: &str) -> bool {
    if is_shouted(line) && line.chars().count() >= MIN_SHOUTED_HEADER_CHARS {
        return true;
    }
    let upper = line.to_uppercase();
    HEADER_PREFIXES.iter().any(|p| upper.starts_with(p))
}

/// Splits template-expanded text into `(title, body)` pairs in document order.
/// Duplicate titles are kept.
pub fn split_into_sections(raw: &str) -> Vec<(String, String)> {
    collect_sections(raw, is_layout_header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::SectionBody;

    #[test]
    fn test_summary_and_education_example() {
        let map = segment("SUMMARY\nHello\n\nEDUCATION\nB.S. CS - MIT");
        let titles: Vec<&str> = map.titles().collect();
        assert_eq!(titles, ["SUMMARY", "EDUCATION"]);
        assert_eq!(map.get("SUMMARY"), Some(&SectionBody::Text("Hello".into())));
        assert_eq!(map.get("EDUCATION"), Some(&SectionBody::Text("B.S. CS - MIT".into())));
    }

    #[test]
    fn test_no_headers_yields_empty_map() {
        assert!(segment("Just a paragraph\nwith two lines.").is_empty());
        assert!(segment("").is_empty());
        assert!(segment("\n\n   \n").is_empty());
    }

    #[test]
    fn test_preamble_before_first_header_is_dropped() {
        let map = segment("Here is your resume:\n\n**PROFESSIONAL SUMMARY**\nShips things.");
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("**PROFESSIONAL SUMMARY**"),
            Some(&SectionBody::Text("Ships things.".into()))
        );
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        let map = segment("2. Work Experience:\nAcme\nTECHNICAL SKILLS\nRust");
        let titles: Vec<&str> = map.titles().collect();
        assert_eq!(titles, ["2. Work Experience:", "TECHNICAL SKILLS"]);
    }

    #[test]
    fn test_repeated_header_overwrites_in_place() {
        let map = segment("SKILLS\nGo\nEDUCATION\nMIT\nSKILLS\nRust");
        let titles: Vec<&str> = map.titles().collect();
        assert_eq!(titles, ["SKILLS", "EDUCATION"]);
        assert_eq!(map.get("SKILLS"), Some(&SectionBody::Text("Rust".into())));
    }

    #[test]
    fn test_differently_written_headers_stay_distinct() {
        let map = segment("EXPERIENCE\nA\nExperience:\nB");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_segment_is_idempotent_through_text() {
        let raw = "Intro line\n**SUMMARY**\n  Line one  \n\nLine two\nCORE COMPETENCIES\n\
                   - Rust\n- Go\nEXPERIENCE\nEDUCATION\nMIT\n";
        let once = segment(raw);
        let twice = segment(&segment_to_text(&once));
        assert_eq!(once, twice);
        assert_eq!(once.get("EXPERIENCE"), Some(&SectionBody::Text(String::new())));
    }

    #[test]
    fn test_segment_to_text_layout() {
        let map = segment("SUMMARY\na\nb\nSKILLS\nc");
        assert_eq!(segment_to_text(&map), "SUMMARY\na\nb\n\nSKILLS\nc\n\n");
    }

    #[test]
    fn test_split_into_sections_shouted_and_prefixed_headers() {
        let text = "Jane Doe\nNYC\n\nPROFESSIONAL SUMMARY\nBuilds things.\n\n\
                    Professional Experience\nEngineer | Acme\n• Led team\n\n\
                    Skills\nRust, Go\nAWS\nKUBERNETES\nHelm charts";
        let sections = split_into_sections(text);
        let titles: Vec<&str> = sections.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(
            titles,
            ["PROFESSIONAL SUMMARY", "Professional Experience", "Skills", "KUBERNETES"]
        );
        assert_eq!(sections[1].1, "Engineer | Acme\n• Led team");
        assert_eq!(sections[2].1, "Rust, Go\nAWS");
        assert_eq!(sections[3].1, "Helm charts");
    }

    #[test]
    fn test_split_into_sections_short_caps_are_body() {
        let sections = split_into_sections("SUMMARY\nCTO\nAt Acme");
        assert_eq!(sections, vec![("SUMMARY".to_string(), "CTO\nAt Acme".to_string())]);
    }

    #[test]
    fn test_split_into_sections_keeps_duplicates() {
        let sections = split_into_sections("SKILLS\nGo\nSKILLS\nRust");
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_digits_only_line_is_not_shouted() {
        assert!(!is_shouted("2019 - 2023"));
        assert!(is_shouted("C++ / GO"));
    }
}
