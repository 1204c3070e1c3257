// src/models/assessment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// A single multiple-choice question. Identified only by its position
/// inside the owning assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,

    #[validate(length(min = 2, max = 26), custom(function = validate_options))]
    pub options: Vec<String>,

    /// Index into `options` of the single correct answer.
    pub correct_answer_index: i64,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    for opt in options {
        if opt.chars().count() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// Represents the 'assessments' table in the database.
/// This is also the owner view: every field, answer key included.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: i64,

    pub title: String,

    pub description: String,

    /// Ordered question list. Stored as a JSONB array.
    pub questions: Json<Vec<Question>>,

    /// Starts at 1 and is bumped on every update.
    pub version: i32,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}

/// Question as shown to respondents. Has no answer field at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub text: String,
    pub options: Vec<String>,
}

/// Respondent-safe projection of an [`Assessment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAssessment {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub questions: Vec<PublicQuestion>,
    pub created_at: DateTime<Utc>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            text: q.text.clone(),
            options: q.options.clone(),
        }
    }
}

impl Assessment {
    /// Strips the answer key from every question.
    pub fn to_public_view(&self) -> PublicAssessment {
        PublicAssessment {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self.questions.iter().map(PublicQuestion::from).collect(),
            created_at: self.created_at,
        }
    }

    /// Identity projection for the assessment owner.
    pub fn to_owner_view(&self) -> Assessment {
        self.clone()
    }

    /// Captures the parts of the assessment a response is scored against.
    pub fn snapshot(&self) -> AssessmentSnapshot {
        AssessmentSnapshot {
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self.questions.0.clone(),
        }
    }
}

/// Frozen copy of an assessment version, stored alongside each response so
/// later edits do not change what a result view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSnapshot {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// Validated content for creating or replacing an assessment.
/// Produced by `models::import::validate_import`; the store assigns id,
/// version and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    #[validate(length(min = 1, max = 500), nested)]
    pub questions: Vec<Question>,
}
