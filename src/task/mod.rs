//! Task management for Taskdesk.
//!
//! A task is the only entity in the system: a titled work item with a
//! priority, a status, optional description and due date, and server-managed
//! timestamps. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Payload validation shared by every write path in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
