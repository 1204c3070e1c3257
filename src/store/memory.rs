// src/store/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{
        assessment::{Assessment, AssessmentPayload},
        response::{NewResponse, ResponseRecord},
    },
    store::{Page, Store},
};

#[derive(Debug, Default)]
struct MemoryState {
    assessments: BTreeMap<i64, Assessment>,
    responses: BTreeMap<i64, ResponseRecord>,
    last_assessment_id: i64,
    last_response_id: i64,
}

/// In-process store. Each operation takes the lock once, so every write
/// touches exactly one record atomically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_assessments(&self) -> Result<Vec<Assessment>, AppError> {
        let state = self.state.read().await;
        let mut all: Vec<Assessment> = state.assessments.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn get_assessment(&self, id: i64) -> Result<Option<Assessment>, AppError> {
        Ok(self.state.read().await.assessments.get(&id).cloned())
    }

    async fn create_assessment(&self, payload: AssessmentPayload) -> Result<Assessment, AppError> {
        let mut state = self.state.write().await;
        state.last_assessment_id += 1;
        let assessment = Assessment {
            id: state.last_assessment_id,
            title: payload.title,
            description: payload.description,
            questions: Json(payload.questions),
            version: 1,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.assessments.insert(assessment.id, assessment.clone());
        Ok(assessment)
    }

    async fn update_assessment(
        &self,
        id: i64,
        payload: AssessmentPayload,
    ) -> Result<Option<Assessment>, AppError> {
        let mut state = self.state.write().await;
        let Some(existing) = state.assessments.get_mut(&id) else {
            return Ok(None);
        };
        existing.title = payload.title;
        existing.description = payload.description;
        existing.questions = Json(payload.questions);
        existing.version += 1;
        existing.updated_at = Some(Utc::now());
        Ok(Some(existing.clone()))
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.state.write().await.assessments.remove(&id).is_some())
    }

    async fn create_response(&self, new: NewResponse) -> Result<ResponseRecord, AppError> {
        let mut state = self.state.write().await;
        state.last_response_id += 1;
        let record = ResponseRecord {
            id: state.last_response_id,
            assessment_id: new.assessment_id,
            assessment_version: new.assessment_version,
            name: new.name,
            email: new.email,
            answers: Json(new.answers),
            score: new.score,
            snapshot: Json(new.snapshot),
            submitted_at: Utc::now(),
        };
        state.responses.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_response(&self, id: i64) -> Result<Option<ResponseRecord>, AppError> {
        Ok(self.state.read().await.responses.get(&id).cloned())
    }

    async fn list_responses(
        &self,
        assessment_id: i64,
        page: Option<Page>,
    ) -> Result<Vec<ResponseRecord>, AppError> {
        let state = self.state.read().await;
        let mut matching: Vec<ResponseRecord> = state
            .responses
            .values()
            .filter(|r| r.assessment_id == assessment_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at).then(a.id.cmp(&b.id)));

        Ok(match page {
            Some(Page { limit, offset }) => matching
                .into_iter()
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .take(usize::try_from(limit).unwrap_or(0))
                .collect(),
            None => matching,
        })
    }

    async fn delete_response(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.state.write().await.responses.remove(&id).is_some())
    }
}
