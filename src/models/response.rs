// src/models/response.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::models::assessment::{AssessmentSnapshot, Question};

/// Represents the 'responses' table in the database.
/// One respondent's submission for one assessment. Never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: i64,

    /// Weak reference: the assessment may since have been deleted.
    pub assessment_id: i64,

    /// Assessment version the answers were scored against.
    pub assessment_version: i32,

    pub name: String,

    pub email: String,

    /// Selected option index per question, in question order.
    pub answers: Json<Vec<i64>>,

    pub score: i32,

    /// Only exposed through the result view.
    #[serde(skip_serializing)]
    pub snapshot: Json<AssessmentSnapshot>,

    pub submitted_at: DateTime<Utc>,
}

/// Everything needed to persist a scored submission.
/// The store assigns `id` and `submitted_at`.
#[derive(Debug, Clone)]
pub struct NewResponse {
    pub assessment_id: i64,
    pub assessment_version: i32,
    pub name: String,
    pub email: String,
    pub answers: Vec<i64>,
    pub score: i32,
    pub snapshot: AssessmentSnapshot,
}

/// DTO for submitting answers to an assessment.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub assessment_id: i64,

    #[validate(
        length(min = 1, max = 200, message = "Name must be between 1 and 200 characters."),
        custom(function = not_blank)
    )]
    pub name: String,

    #[validate(
        length(min = 1, max = 200, message = "Email must be between 1 and 200 characters."),
        custom(function = not_blank)
    )]
    pub email: String,

    pub answers: Vec<i64>,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Returned right after a submission is scored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub response: ResponseRecord,
    pub total_questions: usize,
    pub correct_answers: Vec<i64>,
    pub per_question_correct: Vec<bool>,
}

/// Assessment part of the result view, rendered from the response's snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultAssessment {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// "View my result" payload: one response plus the answer key it was scored against.
#[derive(Debug, Serialize)]
pub struct ResultView {
    pub response: ResponseRecord,
    pub assessment: ResultAssessment,
}

impl From<ResponseRecord> for ResultView {
    fn from(response: ResponseRecord) -> Self {
        let snapshot = response.snapshot.0.clone();
        Self {
            response,
            assessment: ResultAssessment {
                title: snapshot.title,
                description: snapshot.description,
                questions: snapshot.questions,
            },
        }
    }
}
