// src/handlers/assessment.rs

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;

use crate::{
    error::AppError,
    grading::aggregate,
    models::{
        assessment::{Assessment, PublicAssessment},
        import::validate_import,
    },
    store::DynStore,
    utils::{export::responses_to_csv, extract::AppJson},
};

async fn find_assessment(store: &DynStore, id: i64) -> Result<Assessment, AppError> {
    store
        .get_assessment(id)
        .await?
        .ok_or(AppError::NotFound("Assessment not found".to_string()))
}

/// Lists all assessments with answer keys removed.
pub async fn list_assessments(State(store): State<DynStore>) -> Result<impl IntoResponse, AppError> {
    let assessments: Vec<PublicAssessment> = store
        .list_assessments()
        .await?
        .iter()
        .map(Assessment::to_public_view)
        .collect();

    Ok(Json(assessments))
}

/// Retrieves a single assessment for a respondent (no answer key).
pub async fn get_assessment(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = find_assessment(&store, id).await?;
    Ok(Json(assessment.to_public_view()))
}

/// Retrieves a single assessment including the answer key.
pub async fn get_assessment_with_answers(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = find_assessment(&store, id).await?;
    Ok(Json(assessment.to_owner_view()))
}

/// Creates a new assessment.
///
/// The body goes through the same validation as an import, so malformed
/// questions are reported with their field path.
pub async fn create_assessment(
    State(store): State<DynStore>,
    AppJson(raw): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload = validate_import(&raw)?;
    let assessment = store.create_assessment(payload).await?;

    tracing::info!(
        "Created assessment {} with {} questions",
        assessment.id,
        assessment.questions.len()
    );

    Ok((StatusCode::CREATED, Json(assessment)))
}

/// Imports an assessment from an untyped JSON document.
/// Any `id`/`createdAt` in the document is ignored.
pub async fn import_assessment(
    State(store): State<DynStore>,
    AppJson(raw): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload = validate_import(&raw).map_err(|e| {
        tracing::warn!("Rejected assessment import: {}", e);
        e
    })?;
    let assessment = store.create_assessment(payload).await?;

    tracing::info!("Imported assessment {} ({})", assessment.id, assessment.title);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "assessment": assessment,
        })),
    ))
}

/// Replaces title, description and questions of an assessment.
///
/// Stored responses keep their score and snapshot.
pub async fn update_assessment(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
    AppJson(raw): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload = validate_import(&raw)?;
    let assessment = store
        .update_assessment(id, payload)
        .await?
        .ok_or(AppError::NotFound("Assessment not found".to_string()))?;

    tracing::info!("Updated assessment {} to version {}", id, assessment.version);

    Ok(Json(assessment))
}

/// Deletes an assessment by ID. Its responses are kept.
pub async fn delete_assessment(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !store.delete_assessment(id).await? {
        return Err(AppError::NotFound("Assessment not found".to_string()));
    }

    tracing::info!("Deleted assessment {}", id);

    Ok(Json(serde_json::json!({ "message": "Assessment removed" })))
}

/// Summary statistics over every response to an assessment.
pub async fn get_summary(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = find_assessment(&store, id).await?;
    let responses = store.list_responses(id, None).await?;

    Ok(Json(aggregate(&assessment.questions, &responses)))
}

/// Downloads all responses to an assessment as CSV.
pub async fn export_results(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = find_assessment(&store, id).await?;
    let responses = store.list_responses(id, None).await?;

    let body = responses_to_csv(&responses)?;
    let disposition = format!("attachment; filename=\"assessment-{}-results.csv\"", assessment.id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
