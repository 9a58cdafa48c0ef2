//! Key filter configuration parsing from environment variables.

use super::EnvReader;
use crate::domain::filters::{DEFAULT_LEAF_IGNORE, DEFAULT_SUBTREE_IGNORE};

/// Filter environment configuration
#[derive(Debug, Clone)]
pub struct FilterEnvConfig {
    pub subtree_ignore: Vec<String>,
    pub leaf_ignore: Vec<String>,
}

impl FilterEnvConfig {
    pub fn from_reader(reader: &EnvReader<'_>) -> Self {
        Self {
            subtree_ignore: reader.list("IGNORE_SUBTREE_KEYS", DEFAULT_SUBTREE_IGNORE),
            leaf_ignore: reader.list("IGNORE_LEAF_KEYS", DEFAULT_LEAF_IGNORE),
        }
    }
}
