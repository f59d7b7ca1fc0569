//! Document selection registry state.
//!
//! Tracks which documents exist for the signed-in user and which subset is
//! active for question answering. This is the pure local state; the network
//! round trips that feed it (listing, deletion, upload) live in the
//! application layer, which only mutates this state after the backend has
//! confirmed.

use crate::error::{DocchatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Known documents and the selected subset used as context for the next
/// question.
///
/// Invariant: every selected name is also known. `known` keeps the backend's
/// listing order so selections can be sent in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRegistry {
    known: Vec<String>,
    selected: HashSet<String>,
}

impl DocumentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Known document names in the backend's listing order.
    pub fn known(&self) -> &[String] {
        &self.known
    }

    /// The selected subset.
    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Selected names in listing order, the shape the ask request carries.
    pub fn selected_in_order(&self) -> Vec<String> {
        self.known
            .iter()
            .filter(|name| self.selected.contains(*name))
            .cloned()
            .collect()
    }

    /// True if `name` is currently selected.
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Flips the selected membership of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `name` is not a known document; selection can
    /// only ever reference the known inventory.
    pub fn toggle(&mut self, name: &str) -> Result<()> {
        if !self.known.iter().any(|known| known == name) {
            return Err(DocchatError::not_found("document", name));
        }
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
        Ok(())
    }

    /// Replaces the known inventory with a fresh backend listing.
    ///
    /// The selection resets to the full new listing: newly uploaded documents
    /// are immediately queryable, and no partial selection carries over
    /// across a refresh.
    pub fn install(&mut self, names: Vec<String>) {
        self.selected = names.iter().cloned().collect();
        self.known = names;
    }

    /// Drops `name` from both the known and selected sets.
    ///
    /// Called only after the backend has confirmed the deletion.
    pub fn remove_local(&mut self, name: &str) {
        self.known.retain(|known| known != name);
        self.selected.remove(name);
    }
}
