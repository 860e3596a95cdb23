use std::collections::HashSet;

use serde::Deserialize;

use crate::chat::{OptionId, PromptOption};
use crate::viewer::ViewerAsset;

const SITE_JSON: &str = include_str!("../content/site.json");

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("decode site content: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("chat script has no options")]
    EmptyScript,
    #[error("chat option id {0} is declared more than once")]
    DuplicateOption(OptionId),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SiteContent {
    pub profile: Profile,
    pub chat: ChatScript,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub socials: Vec<SocialLink>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub location: String,
    pub email: String,
    pub photo: String,
    pub roles: Vec<String>,
    pub summary: Vec<String>,
    pub cv: ViewerAsset,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatScript {
    pub greeting: String,
    pub closing: String,
    pub options: Vec<PromptOption>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub period: String,
    pub location: String,
    pub summary: String,
    pub highlights: Vec<String>,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    pub year: String,
    pub image: ViewerAsset,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

impl SiteContent {
    pub fn load() -> Result<Self, ContentError> {
        Self::from_json(SITE_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let content: Self = serde_json::from_str(raw)?;
        content.chat.check()?;
        Ok(content)
    }
}

impl ChatScript {
    fn check(&self) -> Result<(), ContentError> {
        if self.options.is_empty() {
            return Err(ContentError::EmptyScript);
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id) {
                return Err(ContentError::DuplicateOption(option.id));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_decodes() {
        let content = SiteContent::load().expect("embedded content is valid");

        assert_eq!(content.chat.options.len(), 8);
        assert!(!content.profile.cv.src.is_empty());
        assert!(!content.projects.is_empty());
        assert!(content
            .education
            .iter()
            .flat_map(|entry| entry.certificates.iter())
            .all(|certificate| !certificate.image.filename.is_empty()));
    }

    #[test]
    fn skill_levels_are_percentages() {
        let content = SiteContent::load().expect("embedded content is valid");

        assert!(content
            .skills
            .iter()
            .flat_map(|category| category.skills.iter())
            .all(|skill| skill.level <= 100));
    }

    #[test]
    fn duplicate_option_ids_are_rejected() {
        let script = ChatScript {
            greeting: "hi".to_string(),
            closing: "bye".to_string(),
            options: vec![
                PromptOption::new(1, "a", "b"),
                PromptOption::new(1, "c", "d"),
            ],
        };

        assert!(matches!(script.check(), Err(ContentError::DuplicateOption(1))));
    }

    #[test]
    fn empty_script_is_rejected() {
        let script = ChatScript {
            greeting: "hi".to_string(),
            closing: "bye".to_string(),
            options: Vec::new(),
        };

        assert!(matches!(script.check(), Err(ContentError::EmptyScript)));
    }

    #[test]
    fn malformed_json_reports_decode_error() {
        assert!(matches!(
            SiteContent::from_json("{ \"profile\": 3 }"),
            Err(ContentError::Decode(_))
        ));
    }
}
