// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::{
    error::AppError,
    models::{
        assessment::{Assessment, AssessmentPayload},
        response::{NewResponse, ResponseRecord},
    },
    store::{Page, Store},
};

const ASSESSMENT_COLUMNS: &str =
    "id, title, description, questions, version, created_at, updated_at";

const RESPONSE_COLUMNS: &str =
    "id, assessment_id, assessment_version, name, email, answers, score, snapshot, submitted_at";

/// PostgreSQL-backed store. Questions, answers and snapshots live in JSONB columns.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_assessments(&self) -> Result<Vec<Assessment>, AppError> {
        let sql = format!(
            "SELECT {} FROM assessments ORDER BY created_at DESC, id DESC",
            ASSESSMENT_COLUMNS
        );
        let assessments = sqlx::query_as::<_, Assessment>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list assessments: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(assessments)
    }

    async fn get_assessment(&self, id: i64) -> Result<Option<Assessment>, AppError> {
        let sql = format!("SELECT {} FROM assessments WHERE id = $1", ASSESSMENT_COLUMNS);
        let assessment = sqlx::query_as::<_, Assessment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(assessment)
    }

    async fn create_assessment(&self, payload: AssessmentPayload) -> Result<Assessment, AppError> {
        let sql = format!(
            r#"
            INSERT INTO assessments (title, description, questions)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            ASSESSMENT_COLUMNS
        );
        let assessment = sqlx::query_as::<_, Assessment>(&sql)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(Json(&payload.questions))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create assessment: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(assessment)
    }

    async fn update_assessment(
        &self,
        id: i64,
        payload: AssessmentPayload,
    ) -> Result<Option<Assessment>, AppError> {
        let sql = format!(
            r#"
            UPDATE assessments
            SET title = $1,
                description = $2,
                questions = $3,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            ASSESSMENT_COLUMNS
        );
        let assessment = sqlx::query_as::<_, Assessment>(&sql)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(Json(&payload.questions))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update assessment {}: {:?}", id, e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(assessment)
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete assessment {}: {:?}", id, e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_response(&self, new: NewResponse) -> Result<ResponseRecord, AppError> {
        let sql = format!(
            r#"
            INSERT INTO responses
            (assessment_id, assessment_version, name, email, answers, score, snapshot)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            RESPONSE_COLUMNS
        );
        let record = sqlx::query_as::<_, ResponseRecord>(&sql)
            .bind(new.assessment_id)
            .bind(new.assessment_version)
            .bind(&new.name)
            .bind(&new.email)
            .bind(Json(&new.answers))
            .bind(new.score)
            .bind(Json(&new.snapshot))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert response: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(record)
    }

    async fn get_response(&self, id: i64) -> Result<Option<ResponseRecord>, AppError> {
        let sql = format!("SELECT {} FROM responses WHERE id = $1", RESPONSE_COLUMNS);
        let record = sqlx::query_as::<_, ResponseRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list_responses(
        &self,
        assessment_id: i64,
        page: Option<Page>,
    ) -> Result<Vec<ResponseRecord>, AppError> {
        // LIMIT NULL means no limit in PostgreSQL.
        let (limit, offset) = match page {
            Some(p) => (Some(p.limit), p.offset),
            None => (None, 0),
        };
        let sql = format!(
            r#"
            SELECT {}
            FROM responses
            WHERE assessment_id = $1
            ORDER BY submitted_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            RESPONSE_COLUMNS
        );
        let records = sqlx::query_as::<_, ResponseRecord>(&sql)
            .bind(assessment_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list responses for assessment {}: {:?}", assessment_id, e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(records)
    }

    async fn delete_response(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM responses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete response {}: {:?}", id, e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
