//! Turns resume sections plus the profile header into typed content blocks.
//!
//! Dispatch is a closed mapping from canonical section title to a block strategy.
//! Titles outside every category take the generic path, which cannot fail.

use crate::generation::segmenter::split_into_sections;
use crate::generation::GeneratedResume;
use crate::models::document::{ContentBlock, HeadingLevel};
use crate::models::profile::ProfileRecord;
use crate::models::section::{SectionBody, SectionMap};

const EXPERIENCE_TITLES: &[&str] = &["PROFESSIONAL EXPERIENCE", "WORK EXPERIENCE", "EXPERIENCE"];
const EDUCATION_TITLES: &[&str] = &["EDUCATION", "ACADEMIC BACKGROUND"];
const SKILLS_TITLES: &[&str] = &["SKILLS", "TECHNICAL SKILLS"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Experience,
    Education,
    Skills,
    Generic,
}

impl SectionKind {
    fn of(canonical: &str) -> Self {
        if EXPERIENCE_TITLES.contains(&canonical) {
            SectionKind::Experience
        } else if EDUCATION_TITLES.contains(&canonical) {
            SectionKind::Education
        } else if SKILLS_TITLES.contains(&canonical) {
            SectionKind::Skills
        } else {
            SectionKind::Generic
        }
    }
}

/// Upper-cased title with markdown emphasis, list numbering and a trailing colon
/// removed and runs of whitespace collapsed: `"**2. Work  Experience:**"` → `"WORK EXPERIENCE"`.
pub fn canonical_title(title: &str) -> String {
    let upper: String = title
        .to_uppercase()
        .chars()
        .filter(|c| !matches!(c, '*' | '#'))
        .collect();
    let trimmed = strip_list_marker(upper.trim()).trim().trim_end_matches(':');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_list_marker(title: &str) -> &str {
    if let Some(rest) = title.strip_prefix(|c: char| c == '-' || c == '•') {
        return rest;
    }
    let rest = title.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < title.len() {
        if let Some(rest) = rest.strip_prefix(|c: char| c == '.' || c == ')') {
            return rest;
        }
    }
    title
}

/// Name heading, then the contact line if any contact field is present.
fn header_blocks(profile: &ProfileRecord) -> Vec<ContentBlock> {
    let mut blocks = vec![ContentBlock::Heading {
        text: profile.name().to_string(),
        level: HeadingLevel::Name,
    }];

    let fields: Vec<String> = [
        Some(profile.location()),
        profile.email(),
        profile.phone(),
        Some(profile.source()),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|f| !f.is_empty())
    .map(str::to_string)
    .collect();

    if !fields.is_empty() {
        blocks.push(ContentBlock::ContactLine { fields });
    }
    blocks
}

fn section_blocks(title: &str, body: &SectionBody, out: &mut Vec<ContentBlock>) {
    let canonical = canonical_title(title);
    if !canonical.is_empty() {
        out.push(ContentBlock::section_heading(canonical.clone()));
    }

    match (SectionKind::of(&canonical), body) {
        (SectionKind::Experience, SectionBody::Experience(entries)) => {
            out.extend(entries.iter().map(|entry| ContentBlock::JobEntry {
                title: entry.title.clone(),
                company: entry.company.clone().filter(|c| !c.is_empty()),
                description: entry.description.clone().filter(|d| !d.is_empty()),
            }));
        }
        (SectionKind::Experience, body) => {
            let text = body.to_text();
            out.extend(
                text.split("\n\n")
                    .map(str::trim)
                    .filter(|chunk| !chunk.is_empty())
                    .map(ContentBlock::paragraph),
            );
        }
        (SectionKind::Education, SectionBody::Education(entries)) => {
            out.extend(entries.iter().map(|entry| ContentBlock::EducationLine {
                degree: entry.degree.clone(),
                school: entry.school.clone(),
                dates: entry.dates.clone(),
            }));
        }
        (SectionKind::Skills, SectionBody::List(skills)) => {
            out.push(ContentBlock::SkillsLine {
                text: skills.join(", "),
            });
        }
        (SectionKind::Skills, body) => {
            out.push(ContentBlock::SkillsLine {
                text: body.to_text().trim().to_string(),
            });
        }
        (SectionKind::Education | SectionKind::Generic, body) => {
            out.push(ContentBlock::paragraph(body.to_text()));
        }
    }
}

pub fn compose(sections: &SectionMap, profile: &ProfileRecord) -> Vec<ContentBlock> {
    let mut blocks = header_blocks(profile);
    for (title, body) in sections.iter() {
        section_blocks(title, body, &mut blocks);
    }
    blocks
}

/// Composes a resume from its sections. A resume without sections is unstructured
/// text, so its sections are recovered from the layout of `formatted_content`.
pub fn compose_resume(resume: &GeneratedResume, profile: &ProfileRecord) -> Vec<ContentBlock> {
    if !resume.sections.is_empty() {
        return compose(&resume.sections, profile);
    }

    let mut blocks = header_blocks(profile);
    for (title, body) in split_into_sections(&resume.formatted_content) {
        section_blocks(&title, &SectionBody::Text(body), &mut blocks);
    }
    blocks
}
