//! Document model: nodes and the ordered store that owns them.
//!
//! A [`Node`] is the only persistent entity on the canvas. The [`NodeStore`]
//! keeps nodes in display order (later entries render on top) and tracks
//! which one, if any, is selected. The engine commits gesture results back
//! here as whole-rectangle replacements.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::geometry::Rect;
use crate::viewport::Point;

/// Unique identifier for a node.
pub type NodeId = Uuid;

/// A rotatable rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Left edge of the unrotated box.
    #[serde(alias = "x")]
    pub left: f64,
    /// Top edge of the unrotated box.
    #[serde(alias = "y")]
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians about the box center, turning +x toward +y.
    #[serde(default)]
    pub rotation: f64,
}

impl Node {
    /// A new unrotated node with a fresh id.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self::with_id(Uuid::new_v4(), rect)
    }

    #[must_use]
    pub fn with_id(id: NodeId, rect: Rect) -> Self {
        Self { id, left: rect.left, top: rect.top, width: rect.width, height: rect.height, rotation: 0.0 }
    }

    /// A copy with the given rotation.
    #[must_use]
    pub fn rotated(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    /// The unrotated box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    /// A copy with position and size replaced by `rect`.
    #[must_use]
    pub fn with_rect(self, rect: Rect) -> Self {
        Self { left: rect.left, top: rect.top, width: rect.width, height: rect.height, ..self }
    }

    /// Axis-aligned box around the node as drawn.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.rect().rotated_bounds(self.rotation)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Check that the node is finite with a positive size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidNode`] naming this node.
    pub fn validate(&self) -> Result<(), EngineError> {
        let rect = self.rect();
        if rect.is_finite() && rect.width > 0.0 && rect.height > 0.0 && self.rotation.is_finite() {
            Ok(())
        } else {
            Err(EngineError::InvalidNode(self.id))
        }
    }
}

/// Ordered store of nodes with an optional selection.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    selected: Option<usize>,
}

impl NodeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every node and clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidNode`] for the first invalid node; the
    /// store is left untouched.
    pub fn load(&mut self, nodes: Vec<Node>) -> Result<(), EngineError> {
        nodes.iter().try_for_each(Node::validate)?;
        self.nodes = nodes;
        self.selected = None;
        Ok(())
    }

    /// Append a node on top of the others. A node with the same id is replaced in place.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidNode`] if the node fails [`Node::validate`].
    pub fn insert(&mut self, node: Node) -> Result<(), EngineError> {
        node.validate()?;
        match self.index_of(&node.id) {
            Some(i) => self.nodes[i] = node,
            None => self.nodes.push(node),
        }
        Ok(())
    }

    /// Remove a node, clearing the selection if it was the selected one.
    pub fn remove(&mut self, id: &NodeId) -> Option<Node> {
        let index = self.index_of(id)?;
        let node = self.nodes.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        Some(node)
    }

    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    #[must_use]
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == *id)
    }

    /// All nodes in display order (bottom first).
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every node except `id`, in display order.
    pub fn siblings(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.id != id)
    }

    /// Select a node by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NodeNotFound`] if no node has this id.
    pub fn select(&mut self, id: &NodeId) -> Result<(), EngineError> {
        let index = self.index_of(id).ok_or(EngineError::NodeNotFound(*id))?;
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Node> {
        self.selected.and_then(|i| self.nodes.get(i))
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<NodeId> {
        self.selected().map(|n| n.id)
    }

    /// Atomically replace a node's position and size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NodeNotFound`] if no node has this id.
    pub fn replace_rect(&mut self, id: &NodeId, rect: Rect) -> Result<Node, EngineError> {
        let node = self.get_mut(id)?;
        *node = node.with_rect(rect);
        Ok(*node)
    }

    /// Set a node's rotation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NodeNotFound`] if no node has this id.
    pub fn set_rotation(&mut self, id: &NodeId, rotation: f64) -> Result<Node, EngineError> {
        let node = self.get_mut(id)?;
        node.rotation = rotation;
        Ok(*node)
    }

    fn get_mut(&mut self, id: &NodeId) -> Result<&mut Node, EngineError> {
        self.nodes.iter_mut().find(|n| n.id == *id).ok_or(EngineError::NodeNotFound(*id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
