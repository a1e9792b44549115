//! Relationship encoding for request bodies.
//!
//! Callers describe relationships as a name → [`Related`] map. Encoding turns
//! every present entry into `{"data": ...}` and drops [`Related::Absent`]
//! entries entirely. Absent and `null` are different requests to the server:
//! a missing key leaves the relationship alone, an explicit value replaces it.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::document::ResourceIdentifier;
use crate::error::{FlairError, Result};
use crate::models::{Attributes, Model};

/// A relationship value supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Related {
    /// A to-one reference.
    One(ResourceIdentifier),
    /// An ordered to-many reference list. An empty list is still sent.
    Many(Vec<ResourceIdentifier>),
    /// Nothing to send for this key.
    #[default]
    Absent,
}

impl Related {
    /// Reference a persisted model.
    ///
    /// # Errors
    ///
    /// Returns [`FlairError::MissingId`] if the model has no id yet.
    pub fn to<A: Attributes>(model: &Model<A>) -> Result<Self> {
        Ok(Self::One(model.to_relationship()?))
    }

    /// Reference several persisted models, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`FlairError::MissingId`] if any model has no id yet.
    pub fn to_many<'a, A, I>(models: I) -> Result<Self>
    where
        A: Attributes + 'a,
        I: IntoIterator<Item = &'a Model<A>>,
    {
        models
            .into_iter()
            .map(|model| model.to_relationship())
            .collect::<Result<Vec<_>>>()
            .map(Self::Many)
    }

    fn encode(&self) -> Option<Value> {
        match self {
            Self::One(identifier) => Some(json!({ "data": identifier })),
            Self::Many(identifiers) => Some(json!({ "data": identifiers })),
            Self::Absent => None,
        }
    }
}

impl From<ResourceIdentifier> for Related {
    fn from(identifier: ResourceIdentifier) -> Self {
        Self::One(identifier)
    }
}

impl From<Vec<ResourceIdentifier>> for Related {
    fn from(identifiers: Vec<ResourceIdentifier>) -> Self {
        Self::Many(identifiers)
    }
}

impl From<Option<ResourceIdentifier>> for Related {
    fn from(identifier: Option<ResourceIdentifier>) -> Self {
        identifier.map_or(Self::Absent, Self::One)
    }
}

impl<A: Attributes> TryFrom<&Model<A>> for Related {
    type Error = FlairError;

    fn try_from(model: &Model<A>) -> Result<Self> {
        Self::to(model)
    }
}

/// Named relationships to send with a create or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipMap {
    entries: BTreeMap<String, Related>,
}

impl RelationshipMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, related: impl Into<Related>) -> Self {
        self.insert(name, related);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, related: impl Into<Related>) {
        self.entries.insert(name.into(), related.into());
    }

    pub fn get(&self, name: &str) -> Option<&Related> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Encode into the JSON-API `relationships` member.
    pub fn encode(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .filter_map(|(name, related)| related.encode().map(|value| (name.clone(), value)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Related>> FromIterator<(K, V)> for RelationshipMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, related) in iter {
            map.insert(name, related);
        }
        map
    }
}
