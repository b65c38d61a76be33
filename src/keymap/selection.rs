//! In-memory document selection, for running the registry without a host

use std::cell::RefCell;
use std::collections::HashMap;

use super::ports::SelectionPort;
use super::target::Node;

/// A node map plus an ordered list of selected ids
#[derive(Debug, Default)]
pub struct DocumentSelection {
    nodes: RefCell<HashMap<String, Node>>,
    selected: RefCell<Vec<String>>,
}

impl DocumentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a node
    pub fn insert(&self, node: Node) {
        self.nodes.borrow_mut().insert(node.id.clone(), node);
    }

    /// Replace the selection; ids need not exist in the node map
    pub fn select<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.selected.borrow_mut() = ids.into_iter().map(Into::into).collect();
    }

    pub fn clear_selection(&self) {
        self.selected.borrow_mut().clear();
    }
}

impl SelectionPort for DocumentSelection {
    fn selected_ids(&self) -> Vec<String> {
        self.selected.borrow().clone()
    }

    fn node(&self, id: &str) -> Option<Node> {
        self.nodes.borrow().get(id).cloned()
    }
}
