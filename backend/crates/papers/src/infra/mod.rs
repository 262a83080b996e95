//! Infrastructure Layer

pub mod object_store;
pub mod postgres;
pub mod scorer;

pub use object_store::{HttpObjectStore, ObjectStoreConfig};
pub use postgres::PgPaperRepository;
pub use scorer::{HttpScorerClient, ScorerConfig};
