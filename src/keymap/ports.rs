//! Capabilities the registry needs from its host
//!
//! The host owns chord recognition and the document selection; the registry
//! only consumes these two interfaces.

use std::rc::Rc;

use super::chord::KeySpec;
use super::target::Node;
use super::types::KeyEvent;

/// Handler invoked by the host each time a registered chord fires
pub type TriggerHandler = Rc<dyn Fn(&KeyEvent)>;

/// Chord registration. There is no unregister.
pub trait HotkeyPort {
    /// Register `handler` to run whenever any chord in `keys` fires
    fn register(&self, keys: &KeySpec, handler: TriggerHandler);
}

/// Read access to the active document's selection
pub trait SelectionPort {
    /// Currently selected node ids, in selection order
    fn selected_ids(&self) -> Vec<String>;

    /// Look a node up by id
    fn node(&self, id: &str) -> Option<Node>;

    /// The node the registry acts on: the first selected id, resolved
    ///
    /// An empty first id counts as no selection.
    fn current_node(&self) -> Option<Node> {
        let ids = self.selected_ids();
        let id = ids.first().filter(|id| !id.is_empty())?;
        self.node(id)
    }
}
