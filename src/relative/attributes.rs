//! Attribute storage on a document node

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute holding the encoded rectangle
pub const POS_ATTRIBUTE: &str = "pos";
pub const RELATIVE_X_ATTRIBUTE: &str = "posRelativeX";
pub const RELATIVE_Y_ATTRIBUTE: &str = "posRelativeY";
pub const RELATIVE_W_ATTRIBUTE: &str = "posRelativeW";
pub const RELATIVE_H_ATTRIBUTE: &str = "posRelativeH";

/// A document node that can hold string attributes
pub trait AttributeStore {
    fn attribute(&self, name: &str) -> Option<&str>;
    fn set_attribute(&mut self, name: &str, value: String);
    fn remove_attribute(&mut self, name: &str);
}

/// Simple ordered attribute map, usable as a standalone document node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementAttributes {
    attributes: BTreeMap<String, String>,
}

impl ElementAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

impl AttributeStore for ElementAttributes {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        self.attributes.insert(name.to_string(), value);
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ElementAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
