use serde::{Deserialize, Serialize};

/// Delimiter between contact fields on the header line.
pub const CONTACT_DELIMITER: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingLevel {
    /// The person's name at the top of the document.
    Name,
    Section,
}

/// One typed unit of document content, consumed once by a render backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading {
        text: String,
        level: HeadingLevel,
    },
    ContactLine {
        fields: Vec<String>,
    },
    BodyParagraph {
        text: String,
    },
    JobEntry {
        title: String,
        company: Option<String>,
        description: Option<String>,
    },
    EducationLine {
        degree: Option<String>,
        school: Option<String>,
        dates: Option<String>,
    },
    SkillsLine {
        text: String,
    },
}

impl ContentBlock {
    pub fn section_heading(text: impl Into<String>) -> Self {
        ContentBlock::Heading {
            text: text.into(),
            level: HeadingLevel::Section,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::BodyParagraph { text: text.into() }
    }

    /// The contact fields joined with `CONTACT_DELIMITER`; `None` for other blocks.
    pub fn contact_text(&self) -> Option<String> {
        match self {
            ContentBlock::ContactLine { fields } => Some(fields.join(CONTACT_DELIMITER)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_text_joins_with_pipe() {
        let block = ContentBlock::ContactLine {
            fields: vec!["NYC".into(), "jane@example.com".into()],
        };
        assert_eq!(block.contact_text().as_deref(), Some("NYC | jane@example.com"));
        assert_eq!(ContentBlock::paragraph("x").contact_text(), None);
    }

    #[test]
    fn test_block_serializes_with_type_tag() {
        let json = serde_json::to_value(ContentBlock::SkillsLine {
            text: "Rust, Go".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "skills_line");
        assert_eq!(json["text"], "Rust, Go");
    }
}
