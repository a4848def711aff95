use std::collections::HashSet;

use crate::drag_drop::{DragEventKind, DragTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    FileInputChange,
    FormSubmit,
    Drag(DragTarget, DragEventKind),
}

/// Handlers the controller registered on init. `clear` is the single teardown
/// call; events for listeners not in the set are dropped.
#[derive(Debug, Default)]
pub struct ListenerSet {
    active: HashSet<Listener>,
}

impl ListenerSet {
    pub fn register(&mut self, listener: Listener) -> bool {
        self.active.insert(listener)
    }

    pub fn is_active(&self, listener: Listener) -> bool {
        self.active.contains(&listener)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.active.len();
        self.active.clear();
        removed
    }
}
