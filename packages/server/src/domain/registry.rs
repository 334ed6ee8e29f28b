//! Connection registry: who is present in the chat.
//!
//! Maps each joined connection to its display name. Connections that have
//! not sent `join` are absent. Entries keep the order of their first join;
//! a later `join` from the same connection renames the entry in place.

use super::{ConnectionId, DisplayName};

/// Registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    connection_id: ConnectionId,
    name: DisplayName,
}

/// In-memory presence registry
///
/// Owned by a single dispatcher; no interior locking.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    entries: Vec<Entry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name for a connection (last write wins).
    ///
    /// # Returns
    ///
    /// The previous name if the connection had already joined.
    pub fn join(&mut self, connection_id: ConnectionId, name: DisplayName) -> Option<DisplayName> {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.connection_id == connection_id)
        {
            Some(entry) => Some(std::mem::replace(&mut entry.name, name)),
            None => {
                self.entries.push(Entry {
                    connection_id,
                    name,
                });
                None
            }
        }
    }

    /// Remove a connection's entry. No-op if it never joined.
    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let index = self
            .entries
            .iter()
            .position(|entry| &entry.connection_id == connection_id)?;
        Some(self.entries.remove(index).name)
    }

    pub fn get(&self, connection_id: &ConnectionId) -> Option<&DisplayName> {
        self.entries
            .iter()
            .find(|entry| &entry.connection_id == connection_id)
            .map(|entry| &entry.name)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.get(connection_id).is_some()
    }

    /// Current display names, in join order
    pub fn display_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.name.as_str().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
