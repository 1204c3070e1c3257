// src/store/mod.rs

//! Persistence boundary for assessments and responses.
//!
//! Handlers only see the [`Store`] trait. `PgStore` backs production
//! deployments; `MemoryStore` is used when no database is configured and
//! by the test suite.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppError,
    models::{
        assessment::{Assessment, AssessmentPayload},
        response::{NewResponse, ResponseRecord},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Shared handle stored in the application state.
pub type DynStore = Arc<dyn Store>;

/// A window into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Query parameters for paginated listings.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    /// Clamps the raw parameters into a valid [`Page`].
    pub fn to_page(&self) -> Page {
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = self.page.unwrap_or(1).max(1);
        Page {
            limit: i64::from(per_page),
            offset: i64::from(page - 1) * i64::from(per_page),
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// All assessments, newest first.
    async fn list_assessments(&self) -> Result<Vec<Assessment>, AppError>;

    async fn get_assessment(&self, id: i64) -> Result<Option<Assessment>, AppError>;

    /// Persists a new assessment at version 1.
    async fn create_assessment(&self, payload: AssessmentPayload) -> Result<Assessment, AppError>;

    /// Replaces title, description and questions wholesale and bumps the version.
    /// Returns `None` when the id is unknown.
    async fn update_assessment(
        &self,
        id: i64,
        payload: AssessmentPayload,
    ) -> Result<Option<Assessment>, AppError>;

    /// Returns `false` when the id is unknown. Responses are left in place.
    async fn delete_assessment(&self, id: i64) -> Result<bool, AppError>;

    async fn create_response(&self, new: NewResponse) -> Result<ResponseRecord, AppError>;

    async fn get_response(&self, id: i64) -> Result<Option<ResponseRecord>, AppError>;

    /// Responses for one assessment ordered by submission time, then id.
    /// `None` returns every response.
    async fn list_responses(
        &self,
        assessment_id: i64,
        page: Option<Page>,
    ) -> Result<Vec<ResponseRecord>, AppError>;

    async fn delete_response(&self, id: i64) -> Result<bool, AppError>;
}
