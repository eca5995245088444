//! Name → stable id registry.
//!
//! Kept beside the propagator rather than inside it: positional indices
//! shift on every removal, ids and names do not.

use std::collections::HashMap;

use super::states::BodyId;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    by_name: HashMap<String, BodyId>,
    /// Names in insertion order
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, id: BodyId) -> Result<()> {
        if self.by_name.contains_key(name) {
            return Err(SimError::DuplicateName(name.to_string()));
        }
        self.by_name.insert(name.to_string(), id);
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: BodyId) -> Option<&str> {
        self.order
            .iter()
            .find(|n| self.by_name.get(n.as_str()) == Some(&id))
            .map(String::as_str)
    }

    /// Forget a removed body. Later lookups of its name return `None`.
    pub fn remove(&mut self, id: BodyId) -> Option<String> {
        let name = self.name_of(id)?.to_string();
        self.by_name.remove(&name);
        self.order.retain(|n| n != &name);
        Some(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
