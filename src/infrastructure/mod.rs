pub mod config;
pub mod engagement_repository;
pub mod error;
