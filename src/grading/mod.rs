// src/grading/mod.rs

pub mod aggregation;
pub mod scoring;

pub use aggregation::{Summary, aggregate, passes};
pub use scoring::{ScoreReport, score_answers, validate_answers};
