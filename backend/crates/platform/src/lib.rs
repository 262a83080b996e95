//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, memory-hard)
//! - Bearer credential extraction from HTTP headers

pub mod bearer;
pub mod password;
