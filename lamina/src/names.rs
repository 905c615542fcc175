//! Unique name assignment for library cells.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use arcstr::ArcStr;

/// A set of unique names, each associated with a key.
#[derive(Debug, Clone, Default)]
pub(crate) struct Names<K: Hash + Eq> {
    used: HashSet<ArcStr>,
    assignments: HashMap<K, ArcStr>,
}

impl<K: Hash + Eq> Names<K> {
    pub(crate) fn new() -> Self {
        Self {
            used: HashSet::new(),
            assignments: HashMap::new(),
        }
    }

    /// Assigns a unique name to `key`, derived from `base` by appending
    /// a numeric suffix if `base` is already taken.
    pub(crate) fn assign(&mut self, key: K, base: &str) -> ArcStr {
        let name = if self.used.contains(base) {
            let mut i = 1;
            loop {
                let candidate = arcstr::format!("{base}_{i}");
                if !self.used.contains(&candidate) {
                    break candidate;
                }
                i += 1;
            }
        } else {
            ArcStr::from(base)
        };
        self.used.insert(name.clone());
        self.assignments.insert(key, name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_names_get_suffixes() {
        let mut names = Names::new();
        assert_eq!(names.assign(1, "route"), "route");
        assert_eq!(names.assign(2, "route"), "route_1");
        assert_eq!(names.assign(3, "route"), "route_2");
        assert_eq!(names.assign(4, "pixel"), "pixel");
    }
}
