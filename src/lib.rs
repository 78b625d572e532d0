//! Taskdesk: a task-management CRUD API.
//!
//! This crate provides the task entity, the validation and operations that
//! govern it, persistence adapters, and the HTTP surface that exposes them.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Task fields, defaults, and invariants with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of those ports
//!
//! # Modules
//!
//! - [`task`]: Task domain, validation, persistence, and services
//! - [`api`]: HTTP handlers and routing
//! - [`config`]: Server settings from the environment

pub mod api;
pub mod config;
pub mod task;
