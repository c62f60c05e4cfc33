use serde::{Deserialize, Serialize};

/// A single work-history entry.
///
/// Extraction only ever yields the unstructured form (`ExperienceEntry::raw`), where the
/// whole scraped text sits in `title`. Structured entries carry company and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
}

impl ExperienceEntry {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            title: text.into(),
            company: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub school: Option<String>,
    pub dates: Option<String>,
}

impl EducationEntry {
    /// Unstructured extraction form: the scraped text is kept as the degree line.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            degree: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Everything pulled from one profile page. Built once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    name: String,
    headline: String,
    location: String,
    about: String,
    experience: Vec<ExperienceEntry>,
    education: Vec<EducationEntry>,
    skills: Vec<String>,
    email: Option<String>,
    phone: Option<String>,
    source: String,
}

/// Field-by-field constructor for `ProfileRecord`.
#[derive(Debug, Default)]
pub struct ProfileBuilder {
    name: String,
    headline: String,
    location: String,
    about: String,
    experience: Vec<ExperienceEntry>,
    education: Vec<EducationEntry>,
    skills: Vec<String>,
    email: Option<String>,
    phone: Option<String>,
    source: String,
}

impl ProfileBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = about.into();
        self
    }

    pub fn experience(mut self, experience: Vec<ExperienceEntry>) -> Self {
        self.experience = experience;
        self
    }

    pub fn education(mut self, education: Vec<EducationEntry>) -> Self {
        self.education = education;
        self
    }

    /// Skills behave as a set: later duplicates are dropped, first-seen order is kept.
    pub fn skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.clear();
        for skill in skills {
            let skill = skill.into();
            if !self.skills.contains(&skill) {
                self.skills.push(skill);
            }
        }
        self
    }

    // Not scraped; reserved for callers that already hold contact details
    #[allow(dead_code)]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[allow(dead_code)]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn build(self) -> ProfileRecord {
        ProfileRecord {
            name: self.name,
            headline: self.headline,
            location: self.location,
            about: self.about,
            experience: self.experience,
            education: self.education,
            skills: self.skills,
            email: self.email,
            phone: self.phone,
            source: self.source,
        }
    }
}

impl ProfileRecord {
    pub fn builder(source: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
