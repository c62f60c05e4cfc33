// Deterministic resume built straight from the profile, used whenever
// generation fails or comes back empty. The text is what the preview shows; the
// section map is what gets composed, so profile text never passes through a
// header detector.

use crate::models::profile::ProfileRecord;
use crate::models::section::{SectionBody, SectionMap};

const DEFAULT_NAME: &str = "Your Name";
const DEFAULT_LOCATION: &str = "Location";
const DEFAULT_SUMMARY: &str = "Professional with experience in various roles and responsibilities.";
const DEFAULT_DEGREE: &str = "Degree";

const SUMMARY_TITLE: &str = "PROFESSIONAL SUMMARY";
const EXPERIENCE_TITLE: &str = "PROFESSIONAL EXPERIENCE";
const EDUCATION_TITLE: &str = "EDUCATION";
const SKILLS_TITLE: &str = "SKILLS";

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

pub fn fallback_document(profile: &ProfileRecord) -> String {
    let mut doc = String::new();
    doc.push_str(or_default(profile.name(), DEFAULT_NAME));
    doc.push('\n');
    doc.push_str(or_default(profile.location(), DEFAULT_LOCATION));
    doc.push_str(&format!("\n\n{SUMMARY_TITLE}\n"));
    doc.push_str(or_default(profile.about(), DEFAULT_SUMMARY));
    doc.push_str(&format!("\n\n{EXPERIENCE_TITLE}\n"));

    for entry in profile.experience() {
        doc.push('\n');
        doc.push_str(&entry.title);
        if let Some(company) = entry.company.as_deref().filter(|c| !c.is_empty()) {
            doc.push_str(" | ");
            doc.push_str(company);
        }
        if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
            doc.push_str("\n• ");
            doc.push_str(description);
        }
        doc.push('\n');
    }

    if !profile.education().is_empty() {
        doc.push_str(&format!("\n{EDUCATION_TITLE}\n"));
        for entry in profile.education() {
            let degree = entry.degree.as_deref().unwrap_or(DEFAULT_DEGREE);
            match entry.school.as_deref().filter(|s| !s.trim().is_empty()) {
                Some(school) => doc.push_str(&format!("{degree} | {school}\n")),
                None => doc.push_str(&format!("{degree}\n")),
            }
        }
    }

    if !profile.skills().is_empty() {
        doc.push_str(&format!("\n{SKILLS_TITLE}\n"));
        doc.push_str(&profile.skills().join(", "));
        doc.push('\n');
    }

    doc.trim().to_string()
}

/// The fallback resume's sections, in the same order as `fallback_document`.
/// The about text is the summary body verbatim.
pub fn fallback_sections(profile: &ProfileRecord) -> SectionMap {
    let mut sections = SectionMap::new();
    sections.insert(SUMMARY_TITLE, or_default(profile.about(), DEFAULT_SUMMARY));
    sections.insert(
        EXPERIENCE_TITLE,
        SectionBody::Experience(profile.experience().to_vec()),
    );
    if !profile.education().is_empty() {
        sections.insert(
            EDUCATION_TITLE,
            SectionBody::Education(profile.education().to_vec()),
        );
    }
    if !profile.skills().is_empty() {
        sections.insert(SKILLS_TITLE, SectionBody::List(profile.skills().to_vec()));
    }
    sections
}
