// src/utils/export.rs

use chrono::SecondsFormat;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::{error::AppError, models::response::ResponseRecord};

const CSV_HEADER: &str = "name,email,score,submittedAt\n";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    name: &'a str,
    email: &'a str,
    score: i32,
    submitted_at: String,
}

impl<'a> From<&'a ResponseRecord> for CsvRow<'a> {
    fn from(r: &'a ResponseRecord) -> Self {
        Self {
            name: &r.name,
            email: &r.email,
            score: r.score,
            submitted_at: r.submitted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Renders responses as CSV, one row per response.
///
/// The header line is plain; every data field is double-quoted with embedded
/// quotes doubled.
pub fn responses_to_csv(responses: &[ResponseRecord]) -> Result<String, AppError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(CSV_HEADER.as_bytes().to_vec());

    for r in responses {
        wtr.serialize(CsvRow::from(r)).map_err(|e| {
            tracing::error!("Failed to write CSV row for response {}: {:?}", r.id, e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| AppError::InternalServerError(e.to_string()))
}
