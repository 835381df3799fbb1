//! tcsa-loader core library.
//!
//! This crate exposes the building blocks of the loader: reading the
//! TwinCAT/Visual Studio versions, driving a build, classifying the IDE
//! error list and writing the native or GitLab code quality report.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `version`: Version extraction and the minimum TwinCAT version gate.
//! - `driver`: Build drivers producing raw error list entries.
//! - `classify`: Code/message split and static-analysis bucketing.
//! - `report`: Native JSON error report.
//! - `codequality`: GitLab code quality report with fingerprints.
//! - `exit`: Exit codes for CI.
//! - `analyze`: The end-to-end pipeline.
//! - `output`: Human/JSON console printers.
//! - `models`, `error`, `utils`: Shared types and helpers.
pub mod analyze;
pub mod classify;
pub mod cli;
pub mod codequality;
pub mod config;
pub mod driver;
pub mod error;
pub mod exit;
pub mod models;
pub mod output;
pub mod report;
pub mod utils;
pub mod version;
