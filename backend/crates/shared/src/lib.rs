//! Shared Kernel - Domain-crossing minimal core
//!
//! The "smallest core" of vocabulary shared by every domain crate:
//! - Unified error type ([`error::app_error::AppError`]) with HTTP mapping
//! - Typed entity IDs ([`id::Id`])
//!
//! Only things that are hard to change and mean the same thing in every
//! domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
