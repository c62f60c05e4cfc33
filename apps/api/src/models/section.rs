use serde::{Deserialize, Serialize};

use crate::models::profile::{EducationEntry, ExperienceEntry};

/// Body of one resume section: free text, or a structured list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    List(Vec<String>),
}

impl SectionBody {
    /// Flattens any body to plain text, one line per entry.
    pub fn to_text(&self) -> String {
        match self {
            SectionBody::Text(text) => text.clone(),
            SectionBody::Experience(entries) => entries
                .iter()
                .map(|e| {
                    let mut line = e.title.clone();
                    if let Some(company) = e.company.as_deref().filter(|c| !c.is_empty()) {
                        line.push_str(" - ");
                        line.push_str(company);
                    }
                    if let Some(desc) = e.description.as_deref().filter(|d| !d.is_empty()) {
                        line.push('\n');
                        line.push_str(desc);
                    }
                    line
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
            SectionBody::Education(entries) => entries
                .iter()
                .map(|e| {
                    [e.degree.as_deref(), e.school.as_deref(), e.dates.as_deref()]
                        .into_iter()
                        .flatten()
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                        .join(" - ")
                })
                .collect::<Vec<_>>()
                .join("\n"),
            SectionBody::List(items) => items.join(", "),
        }
    }
}

impl From<String> for SectionBody {
    fn from(text: String) -> Self {
        SectionBody::Text(text)
    }
}

impl From<&str> for SectionBody {
    fn from(text: &str) -> Self {
        SectionBody::Text(text.to_string())
    }
}

/// Insertion-ordered section title → body mapping.
///
/// Titles are unique: inserting an existing title replaces its body in place, keeping
/// the position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionMap {
    entries: Vec<(String, SectionBody)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding the whole text under the empty (unlabeled) title.
    pub fn unlabeled(text: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(String::new(), SectionBody::Text(text.into()));
        map
    }

    pub fn insert(&mut self, title: impl Into<String>, body: impl Into<SectionBody>) {
        let title = title.into();
        let body = body.into();
        match self.entries.iter_mut().find(|(t, _)| *t == title) {
            Some((_, existing)) => *existing = body,
            None => self.entries.push((title, body)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, title: &str) -> Option<&SectionBody> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, body)| body)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionBody)> {
        self.entries.iter().map(|(t, b)| (t.as_str(), b))
    }

    #[cfg(test)]
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Into<String>, B: Into<SectionBody>> FromIterator<(T, B)> for SectionMap {
    fn from_iter<I: IntoIterator<Item = (T, B)>>(iter: I) -> Self {
        let mut map = SectionMap::new();
        for (title, body) in iter {
            map.insert(title, body);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_existing_title_overwrites_in_place() {
        let mut map = SectionMap::new();
        map.insert("SUMMARY", "first");
        map.insert("EDUCATION", "MIT");
        map.insert("SUMMARY", "second");

        assert_eq!(map.len(), 2);
        assert_eq!(map.titles().collect::<Vec<_>>(), ["SUMMARY", "EDUCATION"]);
        assert_eq!(map.get("SUMMARY"), Some(&SectionBody::Text("second".into())));
    }

    #[test]
    fn test_unlabeled_map_has_single_empty_title() {
        let map = SectionMap::unlabeled("whole text");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(""), Some(&SectionBody::Text("whole text".into())));
    }

    #[test]
    fn test_structured_bodies_flatten_to_text() {
        let exp = SectionBody::Experience(vec![ExperienceEntry {
            title: "Engineer".into(),
            company: Some("Acme".into()),
            description: Some("Built things".into()),
        }]);
        assert_eq!(exp.to_text(), "Engineer - Acme\nBuilt things");

        let edu = SectionBody::Education(vec![EducationEntry {
            degree: Some("B.S. CS".into()),
            school: Some("MIT".into()),
            dates: None,
        }]);
        assert_eq!(edu.to_text(), "B.S. CS - MIT");

        let list = SectionBody::List(vec!["Rust".into(), "Go".into()]);
        assert_eq!(list.to_text(), "Rust, Go");
    }
}
