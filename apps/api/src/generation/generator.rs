//! Resume Generation: prompt → model → segmentation, or the deterministic fallback.
//!
//! Flow: build_prompt → TextGenerator::generate (single attempt) → segment.
//! Any generation error or blank response switches to the fallback resume, whose
//! sections come straight from the profile and bypass the segmenter.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::generation::fallback::{fallback_document, fallback_sections};
use crate::generation::prompt_builder::build_prompt;
use crate::generation::segmenter::segment;
use crate::llm_client::TextGenerator;
use crate::models::profile::ProfileRecord;
use crate::models::section::SectionMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeOrigin {
    Generated,
    Fallback,
}

/// Resume text plus its sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResume {
    pub formatted_content: String,
    pub sections: SectionMap,
    pub origin: ResumeOrigin,
}

impl GeneratedResume {
    pub fn fallback(profile: &ProfileRecord) -> Self {
        Self {
            formatted_content: fallback_document(profile),
            sections: fallback_sections(profile),
            origin: ResumeOrigin::Fallback,
        }
    }

    fn from_model_text(text: String) -> Self {
        let mut sections = segment(&text);
        if sections.is_empty() {
            info!("No section headers in generated text; keeping it as one unlabeled section");
            sections = SectionMap::unlabeled(text.trim());
        }
        Self {
            formatted_content: text,
            sections,
            origin: ResumeOrigin::Generated,
        }
    }
}

pub async fn generate_resume(
    generator: &dyn TextGenerator,
    profile: &ProfileRecord,
    target_role: Option<&str>,
) -> GeneratedResume {
    let prompt = build_prompt(profile, target_role);

    match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => {
            let resume = GeneratedResume::from_model_text(text);
            info!(
                "Resume generated: {} sections, {} chars",
                resume.sections.len(),
                resume.formatted_content.len()
            );
            resume
        }
        Ok(_) => {
            warn!("Generation returned empty text; using fallback resume");
            GeneratedResume::fallback(profile)
        }
        Err(e) => {
            warn!("Generation failed: {e}; using fallback resume");
            GeneratedResume::fallback(profile)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::section::SectionBody;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a canned reply and remembers the prompt it was given.
    struct CannedGenerator {
        reply: Result<String, u16>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl CannedGenerator {
        fn new(reply: Result<&str, u16>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "quota exceeded".into(),
                }),
            }
        }
    }

    fn profile() -> ProfileRecord {
        ProfileRecord::builder("https://example.com/in/jane")
            .name("Jane Doe")
            .about("Ten years of backend work.")
            .build()
    }

    #[tokio::test]
    async fn test_model_text_is_segmented() {
        let generator = CannedGenerator::new(Ok("SUMMARY\nGreat engineer.\n\nEDUCATION\nMIT"));
        let resume = generate_resume(&generator, &profile(), Some("SRE")).await;

        assert_eq!(resume.origin, ResumeOrigin::Generated);
        assert_eq!(resume.sections.len(), 2);
        assert_eq!(resume.formatted_content, "SUMMARY\nGreat engineer.\n\nEDUCATION\nMIT");

        let prompt = generator.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("for a SRE position"));
        assert!(prompt.contains("Name: Jane Doe"));
    }

    #[tokio::test]
    async fn test_headerless_text_becomes_unlabeled_section() {
        let generator = CannedGenerator::new(Ok("  A single free-form paragraph.  "));
        let resume = generate_resume(&generator, &profile(), None).await;

        assert_eq!(resume.origin, ResumeOrigin::Generated);
        assert_eq!(
            resume.sections.get(""),
            Some(&SectionBody::Text("A single free-form paragraph.".into()))
        );
    }

    #[tokio::test]
    async fn test_empty_generation_uses_fallback() {
        let generator = CannedGenerator::new(Ok("   \n"));
        let resume = generate_resume(&generator, &profile(), None).await;

        assert_eq!(resume.origin, ResumeOrigin::Fallback);
        assert_eq!(
            resume.sections.get("PROFESSIONAL SUMMARY"),
            Some(&SectionBody::Text("Ten years of backend work.".into()))
        );
        assert_eq!(resume.formatted_content.lines().next(), Some("Jane Doe"));
        assert!(resume.formatted_content.contains("Ten years of backend work."));
    }

    #[tokio::test]
    async fn test_generation_error_uses_fallback() {
        let generator = CannedGenerator::new(Err(429));
        let resume = generate_resume(&generator, &profile(), None).await;
        assert_eq!(resume, GeneratedResume::fallback(&profile()));
    }
}
