//! Papers Configuration

use crate::domain::value_objects::{CorpusPolicy, VisibilityPolicy};

/// Behavior knobs for the paper pipeline
#[derive(Debug, Clone, Default)]
pub struct PapersConfig {
    /// What non-admin callers see in the public listing
    pub visibility_policy: VisibilityPolicy,
    /// Which papers feed the scorer's comparison corpus
    pub corpus_policy: CorpusPolicy,
}

impl PapersConfig {
    pub fn new(visibility_policy: VisibilityPolicy, corpus_policy: CorpusPolicy) -> Self {
        Self {
            visibility_policy,
            corpus_policy,
        }
    }
}
