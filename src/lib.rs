pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod provider;
pub mod state;
pub mod storage;
pub mod validation;
