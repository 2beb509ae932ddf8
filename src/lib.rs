//! hrmigrate - load HR tables into SQLite and report on hiring
//!
//! This crate provides:
//! - A CSV decoder and a generic, transactional batch ingestion pipeline
//!   for departments, jobs and employees
//! - Two hiring reports over the stored rows
//! - An axum HTTP API and a CLI around both

pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod parse;
pub mod report;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
