//! Server-side API backend and command dispatch.
//!
//! This module contains the complete backend: the command queue dispatcher, the remote
//! console client it executes through, and the admin HTTP API around them. The backend
//! uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control and DTO
//!   conversion
//! - **Service Layer** (`service/`) - Dispatcher, profile resolution, and queue/settings logic
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Admin token guard
//! - **Remote Console** (`rcon/`) - RCON wire codec, client, and the executor capability
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, dispatcher, profile source)
//! - **Startup** (`startup`) - Logging, database connection, and shutdown signal
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Periodic dispatch cycle
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Controller** checks the admin token, converts DTOs to params, calls service
//! 3. **Service** executes business logic, orchestrates data operations
//! 4. **Data** queries database, converts entities to domain models
//! 5. **Controller** converts domain model to DTO, returns HTTP response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod rcon;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
