// src/models/mod.rs

pub mod assessment;
pub mod import;
pub mod response;
