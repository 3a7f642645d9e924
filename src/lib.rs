//! Movie review REST service: axum handlers over a document store.

pub mod api;
pub mod config;
pub mod storage;
