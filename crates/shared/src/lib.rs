//! Shared types, errors, and configuration for BudgetLens.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for categories, procurement items, plans and actual entries
//! - Application-wide error types
//! - Configuration management
//! - Bearer token claims and validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;


pub use auth::{Claims, Role};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
