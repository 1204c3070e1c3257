// src/handlers/response.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    grading::{score_answers, validate_answers},
    models::response::{NewResponse, ResultView, SubmissionResult, SubmitResponseRequest},
    store::{DynStore, PageParams},
    utils::extract::AppJson,
};

/// Submits a respondent's answers and scores them.
///
/// * Validates name and email.
/// * Loads the assessment and checks every question has a valid answer.
/// * Scores the answers against the current key.
/// * Persists the response together with a snapshot of the assessment.
pub async fn submit_response(
    State(store): State<DynStore>,
    AppJson(req): AppJson<SubmitResponseRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let assessment = store
        .get_assessment(req.assessment_id)
        .await?
        .ok_or(AppError::NotFound("Assessment not found".to_string()))?;

    validate_answers(&assessment.questions, &req.answers)?;
    let report = score_answers(&assessment.questions, &req.answers)?;

    let score = i32::try_from(report.score)
        .map_err(|_| AppError::BadRequest("Assessment has too many questions".to_string()))?;

    let response = store
        .create_response(NewResponse {
            assessment_id: assessment.id,
            assessment_version: assessment.version,
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            answers: req.answers,
            score,
            snapshot: assessment.snapshot(),
        })
        .await?;

    tracing::info!(
        "Response {} scored {}/{} on assessment {}",
        response.id,
        score,
        assessment.questions.len(),
        assessment.id
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResult {
            response,
            total_questions: assessment.questions.len(),
            correct_answers: assessment
                .questions
                .iter()
                .map(|q| q.correct_answer_index)
                .collect(),
            per_question_correct: report.per_question_correct,
        }),
    ))
}

/// Retrieves one response with the answer key it was scored against.
pub async fn get_response(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let response = store
        .get_response(id)
        .await?
        .ok_or(AppError::NotFound("Response not found".to_string()))?;

    Ok(Json(ResultView::from(response)))
}

/// Lists responses to an assessment, oldest first, one page at a time.
pub async fn list_responses_by_assessment(
    State(store): State<DynStore>,
    Path(assessment_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let responses = store
        .list_responses(assessment_id, Some(params.to_page()))
        .await?;

    Ok(Json(responses))
}

/// Deletes a response by ID.
pub async fn delete_response(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !store.delete_response(id).await? {
        return Err(AppError::NotFound("Response not found".to_string()));
    }

    tracing::info!("Deleted response {}", id);

    Ok(Json(serde_json::json!({ "message": "Response deleted successfully" })))
}
