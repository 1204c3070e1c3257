// src/utils/mod.rs

pub mod export;
pub mod extract;
