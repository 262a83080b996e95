//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Paper, review and leaderboard views)
//! - Domain value objects (ModerationStatus, query and policy types)
//! - Domain services (badge rules)
//! - Repository and gateway traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
