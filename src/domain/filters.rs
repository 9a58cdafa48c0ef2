use std::collections::HashSet;

/// Keys whose whole subtree is pruned, at any depth.
pub const DEFAULT_SUBTREE_IGNORE: &[&str] = &["upstreams"];

/// Keys whose direct numeric value is never emitted.
pub const DEFAULT_LEAF_IGNORE: &[&str] = &[
    "version",
    "generation",
    "load_timestamp",
    "timestamp",
    "pid",
    "upstream",
];

/// Key-based filtering rules applied during one walk of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSets {
    subtree_ignore: HashSet<String>,
    leaf_ignore: HashSet<String>,
}

impl FilterSets {
    pub fn new<S, L>(subtree_ignore: S, leaf_ignore: L) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            subtree_ignore: subtree_ignore.into_iter().map(Into::into).collect(),
            leaf_ignore: leaf_ignore.into_iter().map(Into::into).collect(),
        }
    }

    /// Filters that let everything through.
    pub fn none() -> Self {
        Self::new(Vec::<String>::new(), Vec::<String>::new())
    }

    pub fn prunes_subtree(&self, key: &str) -> bool {
        self.subtree_ignore.contains(key)
    }

    pub fn ignores_leaf(&self, key: &str) -> bool {
        self.leaf_ignore.contains(key)
    }

    pub fn subtree_ignore(&self) -> &HashSet<String> {
        &self.subtree_ignore
    }

    pub fn leaf_ignore(&self) -> &HashSet<String> {
        &self.leaf_ignore
    }
}

impl Default for FilterSets {
    fn default() -> Self {
        Self::new(
            DEFAULT_SUBTREE_IGNORE.iter().copied(),
            DEFAULT_LEAF_IGNORE.iter().copied(),
        )
    }
}
