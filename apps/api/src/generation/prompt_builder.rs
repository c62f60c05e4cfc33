//! Renders a `ProfileRecord` into the fixed generation prompt.
//!
//! Pure and infallible. Empty fields render as `NOT_PROVIDED` so the template
//! keeps the same shape for every profile.

use crate::generation::prompts::{
    FORMATTING_GUIDELINES, NOT_PROVIDED, REQUESTED_SECTIONS, RESUME_PROMPT_TEMPLATE,
};
use crate::models::profile::{EducationEntry, ExperienceEntry, ProfileRecord};

pub fn build_prompt(profile: &ProfileRecord, target_role: Option<&str>) -> String {
    let role_focus = match target_role.map(str::trim) {
        Some(role) if !role.is_empty() => format!(" for a {role} position"),
        _ => String::new(),
    };

    // Fixed text first, so profile text that happens to contain these
    // placeholders is left alone.
    RESUME_PROMPT_TEMPLATE
        .replace("{sections}", &format_requested_sections())
        .replace("{guidelines}", FORMATTING_GUIDELINES)
        .replace("{role_focus}", &role_focus)
        .replace("{name}", or_not_provided(profile.name()))
        .replace("{headline}", or_not_provided(profile.headline()))
        .replace("{location}", or_not_provided(profile.location()))
        .replace("{about}", or_not_provided(profile.about()))
        .replace("{experience}", &format_experience(profile.experience()))
        .replace("{education}", &format_education(profile.education()))
        .replace("{skills}", &format_skills(profile.skills()))
}

fn format_requested_sections() -> String {
    REQUESTED_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, (header, hint))| {
            if hint.is_empty() {
                format!("{}. {header}", i + 1)
            } else {
                format!("{}. {header} ({hint})", i + 1)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_not_provided(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_PROVIDED
    } else {
        trimmed
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn format_experience(entries: &[ExperienceEntry]) -> String {
    if entries.is_empty() {
        return NOT_PROVIDED.to_string();
    }
    entries
        .iter()
        .map(|entry| {
            let mut line = format!("- {}", or_not_provided(&entry.title));
            if let Some(company) = present(&entry.company) {
                line.push_str(&format!(" at {company}"));
            }
            if let Some(description) = present(&entry.description) {
                line.push_str(&format!(": {description}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_education(entries: &[EducationEntry]) -> String {
    if entries.is_empty() {
        return NOT_PROVIDED.to_string();
    }
    entries
        .iter()
        .map(|entry| {
            let mut line = format!("- {}", present(&entry.degree).unwrap_or(NOT_PROVIDED));
            if let Some(school) = present(&entry.school) {
                line.push_str(&format!(" from {school}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_skills(skills: &[String]) -> String {
    let skills: Vec<&str> = skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        skills.join(", ")
    }
}
