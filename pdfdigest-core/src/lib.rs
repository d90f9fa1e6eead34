//! # PDF Digest Core
//!
//! Core library for PDF Digest - a backend service that turns uploaded
//! PDFs into AI-generated summaries.
//!
//! This crate provides:
//! - Configuration management
//! - PDF text extraction into a normalized text bundle
//! - Mode-parameterized summarization (short / medium / detailed)
//! - Completion-service HTTP client (OpenAI-compatible, non-streaming)
//! - Upload storage keyed by per-document identifiers
//! - HTTP API server
//! - Shared data models

pub mod completion;
pub mod config;
pub mod model;
pub mod pdf;
pub mod server;
pub mod storage;
pub mod summarize;

pub use completion::{CompletionClient, CompletionError};
pub use config::{CompletionConfig, Config, ConfigError};
pub use model::*;
pub use pdf::{extract, ExtractError, PageText, TextBundle};
pub use storage::{DocumentId, StorageError, UploadStore};
pub use summarize::{summarize, Summary, SummaryKind, SummaryMode};
