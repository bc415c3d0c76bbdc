pub mod api;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod ingest;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod retrieval;
pub mod services;
