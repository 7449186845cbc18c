use std::collections::BTreeMap;

use serde::Serialize;

/// Company name to founder names; serialised as the output JSON object.
pub type OutputMapping = BTreeMap<String, Vec<String>>;

/// Unique founder names for one company, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FounderSet {
    names: Vec<String>,
}

impl FounderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the name was already present.
    pub fn insert(&mut self, name: String) -> bool {
        match self.names.contains(&name) {
            true => false,
            false => {
                self.names.push(name);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl Extend<String> for FounderSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl FromIterator<String> for FounderSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut set = FounderSet::new();
        set.extend(iter);
        set
    }
}
