use serde::{Deserialize, Serialize};

/// Undirected friendship between two people, referenced by name.
///
/// `{a, b}` and `{b, a}` denote the same edge; use [`Friendship::connects`] or
/// [`Friendship::same_pair`] rather than field equality when comparing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Friendship {
    pub source: String,
    pub target: String,
}

impl Friendship {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    pub fn same_pair(&self, other: &Friendship) -> bool {
        self.connects(&other.source, &other.target)
    }

    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Endpoints ordered so that the smaller name comes first.
    pub fn normalized(&self) -> (&str, &str) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }
}
