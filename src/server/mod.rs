//! Server-side API backend and business logic.
//!
//! This module contains the complete backend implementation for the dashboard,
//! including API endpoints, business logic, data access, and infrastructure services.
//! The backend uses Axum as the web framework, SeaORM for database operations, and
//! Serenity for Discord bot integration.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Business logic orchestration between controllers and data layer
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP client, SSE hub)
//! - **Startup** (`startup`) - Tracing, database, HTTP client and firm seeding
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Cron jobs for heartbeats, retention and re-verification
//! - **Bot** (`bot/`) - Discord bot reading farm log channels
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Controller** validates input, converts DTOs to params, calls service
//! 3. **Service** executes business logic, orchestrates data operations
//! 4. **Data** queries database, converts entities to domain models
//! 5. **Controller** converts domain model to DTO, returns HTTP response

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;

#[cfg(test)]
mod test;
