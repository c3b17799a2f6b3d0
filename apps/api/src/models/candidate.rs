#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Languages the platform speaks. Candidates pick one; jobs are posted in one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// Human-readable name used inside LLM prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    /// Unique key. Compared with exact, case-sensitive equality.
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub experience_years: i32,
    pub education: Option<String>,
    pub language_preference: Language,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate write keyed by email. `None` fields keep whatever is stored.
#[derive(Debug, Clone, Default)]
pub struct CandidateUpsert {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub language_preference: Option<Language>,
    pub resume_url: Option<String>,
}

impl CandidateUpsert {
    /// Applies this write on top of an existing candidate row.
    pub fn merge_into(&self, existing: &Candidate, now: DateTime<Utc>) -> Candidate {
        Candidate {
            id: existing.id,
            email: existing.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone().or_else(|| existing.phone.clone()),
            skills: self
                .skills
                .clone()
                .unwrap_or_else(|| existing.skills.clone()),
            certifications: self
                .certifications
                .clone()
                .unwrap_or_else(|| existing.certifications.clone()),
            experience_years: self.experience_years.unwrap_or(existing.experience_years),
            education: self.education.clone().or_else(|| existing.education.clone()),
            language_preference: self
                .language_preference
                .unwrap_or(existing.language_preference),
            resume_url: self.resume_url.clone().or_else(|| existing.resume_url.clone()),
            created_at: existing.created_at,
            updated_at: now,
        }
    }

    /// Builds a brand-new candidate row from this write.
    pub fn into_new(self, id: Uuid, now: DateTime<Utc>) -> Candidate {
        Candidate {
            id,
            email: self.email,
            name: self.name,
            phone: self.phone,
            skills: self.skills.unwrap_or_default(),
            certifications: self.certifications.unwrap_or_default(),
            experience_years: self.experience_years.unwrap_or(0),
            education: self.education,
            language_preference: self.language_preference.unwrap_or_default(),
            resume_url: self.resume_url,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Candidate {
        CandidateUpsert {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            phone: Some("555-0100".to_string()),
            skills: Some(vec!["forklift".to_string()]),
            certifications: Some(vec!["OSHA 10".to_string()]),
            experience_years: Some(4),
            education: Some("High school".to_string()),
            language_preference: Some(Language::Es),
            resume_url: None,
        }
        .into_new(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_merge_keeps_fields_that_were_not_sent() {
        let current = existing();
        let update = CandidateUpsert {
            email: current.email.clone(),
            name: "Ana María".to_string(),
            skills: Some(vec!["pallet jack".to_string()]),
            ..Default::default()
        };

        let merged = update.merge_into(&current, Utc::now());
        assert_eq!(merged.id, current.id);
        assert_eq!(merged.name, "Ana María");
        assert_eq!(merged.skills, vec!["pallet jack".to_string()]);
        assert_eq!(merged.phone.as_deref(), Some("555-0100"));
        assert_eq!(merged.certifications, vec!["OSHA 10".to_string()]);
        assert_eq!(merged.experience_years, 4);
        assert_eq!(merged.language_preference, Language::Es);
    }

    #[test]
    fn test_new_candidate_defaults() {
        let candidate = CandidateUpsert {
            email: "bo@example.com".to_string(),
            name: "Bo".to_string(),
            ..Default::default()
        }
        .into_new(Uuid::new_v4(), Utc::now());

        assert!(candidate.skills.is_empty());
        assert_eq!(candidate.experience_years, 0);
        assert_eq!(candidate.language_preference, Language::En);
    }

    #[test]
    fn test_language_serde_lowercase() {
        let lang: Language = serde_json::from_str(r#""es""#).unwrap();
        assert_eq!(lang, Language::Es);
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), r#""en""#);
    }
}
