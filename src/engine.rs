use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, TouchEvent};

use crate::config::EngineConfig;
use crate::constraints::Constrained;
use crate::doc::{Node, NodeId, NodeStore};
use crate::error::EngineError;
use crate::geometry::Rect;
use crate::handle::{Handle, ResizeMode, RotateHandle, visible_handles};
use crate::input::{GestureSession, InputState, Modifiers, PointerSample};
use crate::snap::{SnapLine, rects_to_snap_lines};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A node's geometry was committed to the store.
    NodeUpdated { node: Node },
    SelectionChanged { id: Option<NodeId> },
    /// The set of alignment guides to draw changed.
    GuidesChanged { lines: Vec<SnapLine> },
    DragStarted { id: NodeId },
    DragStopped { id: NodeId },
    ResizeStarted { id: NodeId, mode: ResizeMode },
    ResizeStopped { id: NodeId, mode: ResizeMode },
    RotateStarted { id: NodeId },
    RotateStopped { id: NodeId },
    RenderNeeded,
}

/// Core engine state: everything that doesn't touch the DOM.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub store: NodeStore,
    pub input: InputState,
    config: EngineConfig,
    viewport: Viewport,
    guides: Vec<SnapLine>,
}

impl EngineCore {
    /// Create an engine with a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if any config value is out of range.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config, ..Self::default() })
    }

    // --- Configuration ---

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the config. Not allowed mid-gesture.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GestureInProgress`] during a gesture and
    /// [`EngineError::InvalidConfig`] for out-of-range values.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        self.ensure_idle()?;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Resize the canvas the nodes are kept inside.
    ///
    /// # Errors
    ///
    /// Same as [`EngineCore::set_config`].
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        self.set_config(EngineConfig { canvas_width: width, canvas_height: height, ..self.config })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update where the canvas sits in client space. A running gesture keeps
    /// the viewport it started with.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidViewport`] for a non-finite or non-positive transform.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        if !viewport.is_valid() {
            return Err(EngineError::InvalidViewport);
        }
        self.viewport = viewport;
        Ok(())
    }

    // --- Data inputs ---

    /// Replace every node. Any gesture is dropped and the selection cleared.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidNode`] if any node is non-finite or has a
    /// non-positive size. Nothing changes in that case.
    pub fn load_nodes(&mut self, nodes: Vec<Node>) -> Result<Vec<Action>, EngineError> {
        if let Err(err) = nodes.iter().try_for_each(Node::validate) {
            warn!(%err, "rejected node load");
            return Err(err);
        }
        let mut actions = Vec::new();
        if !self.input.is_idle() {
            debug!("node reload dropped the active gesture");
            self.input = InputState::Idle;
        }
        if self.store.selected_id().is_some() {
            actions.push(Action::SelectionChanged { id: None });
        }
        if !self.guides.is_empty() {
            self.guides.clear();
            actions.push(Action::GuidesChanged { lines: Vec::new() });
        }
        self.store.load(nodes)?;
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Add a node on top, or replace the node with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidNode`] if the node is non-finite or has a
    /// non-positive size.
    pub fn add_node(&mut self, node: Node) -> Result<Vec<Action>, EngineError> {
        self.store.insert(node)?;
        Ok(vec![Action::NodeUpdated { node }, Action::RenderNeeded])
    }

    /// Remove a node.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GestureInProgress`] if the node is being
    /// manipulated and [`EngineError::NodeNotFound`] if it doesn't exist.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Vec<Action>, EngineError> {
        if self.input.session().is_some_and(|s| s.node_id == *id) {
            return Err(EngineError::GestureInProgress);
        }
        let was_selected = self.store.selected_id() == Some(*id);
        self.store.remove(id).ok_or(EngineError::NodeNotFound(*id))?;
        let mut actions = Vec::new();
        if was_selected {
            actions.push(Action::SelectionChanged { id: None });
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    // --- Queries ---

    /// The currently selected node id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<NodeId> {
        self.store.selected_id()
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<&Node> {
        self.store.selected()
    }

    /// Look up a node by ID.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.store.get(id)
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        self.store.nodes()
    }

    /// Snap lines currently matched by the active gesture.
    #[must_use]
    pub fn guides(&self) -> &[SnapLine] {
        &self.guides
    }

    /// Handles the render layer should draw around the selection.
    #[must_use]
    pub fn visible_handles(&self) -> Vec<Handle> {
        visible_handles(self.store.selected().is_some(), self.input.active_handle())
    }

    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        !self.input.is_idle()
    }

    // --- Pointer-down ---

    /// Pointer-down on a node body: select it and arm a drag.
    ///
    /// The drag itself starts on a later pointer-move, once the press has
    /// lasted `drag_start_delay_ms` and the pointer has moved. Released
    /// before that, the press is a plain click.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GestureInProgress`], [`EngineError::InvalidPointer`]
    /// or [`EngineError::NodeNotFound`].
    pub fn on_node_pointer_down(&mut self, id: NodeId, sample: &PointerSample) -> Result<Vec<Action>, EngineError> {
        self.ensure_idle()?;
        check_pointer(sample)?;
        let session = self.session_for(id, ResizeMode::Move, sample)?;

        let mut actions = Vec::new();
        if self.store.selected_id() != Some(id) {
            self.store.select(&id)?;
            actions.push(Action::SelectionChanged { id: Some(id) });
            actions.push(Action::RenderNeeded);
        }
        self.input = InputState::PressingNode { session };
        Ok(actions)
    }

    /// Pointer-down on empty canvas: clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GestureInProgress`] during a gesture.
    pub fn on_background_pointer_down(&mut self) -> Result<Vec<Action>, EngineError> {
        self.ensure_idle()?;
        if self.store.selected_id().is_none() {
            return Ok(Vec::new());
        }
        self.store.clear_selection();
        Ok(vec![Action::SelectionChanged { id: None }, Action::RenderNeeded])
    }

    /// Pointer-down on a handle of the selected node.
    ///
    /// # Errors
    ///
    /// Same as [`EngineCore::begin_resize`].
    pub fn on_handle_pointer_down(&mut self, handle: Handle, sample: &PointerSample) -> Result<Vec<Action>, EngineError> {
        match handle {
            Handle::Resize(mode) => self.begin_resize(mode, sample),
            Handle::Rotate(grip) => self.begin_rotate(grip, sample),
        }
    }

    /// Start a gesture of `mode` on the selected node, without a drag threshold.
    ///
    /// [`ResizeMode::Move`] starts a drag immediately and
    /// [`ResizeMode::Rotate`] rotates from the default grip.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GestureInProgress`] during a gesture,
    /// [`EngineError::InvalidPointer`] for a non-finite pointer and
    /// [`EngineError::NoSelection`] when nothing is selected.
    pub fn begin_resize(&mut self, mode: ResizeMode, sample: &PointerSample) -> Result<Vec<Action>, EngineError> {
        if mode == ResizeMode::Rotate {
            return self.begin_rotate(RotateHandle::default(), sample);
        }
        let session = self.selected_session(mode, sample)?;
        let id = session.node_id;
        let action = if mode == ResizeMode::Move {
            self.input = InputState::DraggingNode { session };
            Action::DragStarted { id }
        } else {
            self.input = InputState::ResizingNode { session };
            Action::ResizeStarted { id, mode }
        };
        debug!(%id, %mode, "gesture started");
        Ok(vec![action, Action::RenderNeeded])
    }

    /// Start rotating the selected node from `handle`.
    ///
    /// # Errors
    ///
    /// Same as [`EngineCore::begin_resize`].
    pub fn begin_rotate(&mut self, handle: RotateHandle, sample: &PointerSample) -> Result<Vec<Action>, EngineError> {
        let session = self.selected_session(ResizeMode::Rotate, sample)?;
        let id = session.node_id;
        self.input = InputState::RotatingNode { session, handle };
        debug!(%id, ?handle, "rotation started");
        Ok(vec![Action::RotateStarted { id }, Action::RenderNeeded])
    }

    // --- Pointer-move / up ---

    /// Advance the active gesture to `sample`.
    ///
    /// Every move is computed from the snapshot taken at pointer-down, never
    /// from the previous move. The store is only written when the whole
    /// pipeline succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPointer`] for a non-finite pointer and
    /// [`EngineError::NonFinite`] when a stage produced non-finite geometry.
    /// The node keeps its last committed geometry either way.
    pub fn on_pointer_move(&mut self, sample: &PointerSample) -> Result<Vec<Action>, EngineError> {
        if self.input.is_idle() {
            return Ok(Vec::new());
        }
        check_pointer(sample)?;
        let lock_ratio = sample.modifiers.lock_ratio();

        match &self.input {
            InputState::Idle => Ok(Vec::new()),
            InputState::PressingNode { session } => {
                let pointer = session.canvas_point(sample.point());
                if !drag_threshold_passed(session, pointer, sample.timestamp_ms, self.config.drag_start_delay_ms) {
                    return Ok(Vec::new());
                }
                let constrained = session.constrain(pointer, false, &self.config)?;
                let session = session.clone();
                let id = session.node_id;
                self.input = InputState::DraggingNode { session };
                debug!(%id, "drag started");

                let mut actions = vec![Action::DragStarted { id }];
                actions.extend(self.commit(id, constrained)?);
                Ok(actions)
            }
            InputState::DraggingNode { session } | InputState::ResizingNode { session } => {
                let pointer = session.canvas_point(sample.point());
                let constrained = session.constrain(pointer, lock_ratio, &self.config)?;
                let id = session.node_id;
                self.commit(id, constrained)
            }
            InputState::RotatingNode { session, handle } => {
                let pointer = session.canvas_point(sample.point());
                let rotation = session.rotation(pointer, *handle);
                let id = session.node_id;
                if !rotation.is_finite() {
                    warn!(%id, "rotation produced a non-finite angle");
                    return Err(EngineError::NonFinite { stage: "rotation_from_pointer" });
                }
                let node = self.store.set_rotation(&id, rotation)?;
                Ok(vec![Action::NodeUpdated { node }, Action::RenderNeeded])
            }
        }
    }

    /// Pointer-up: end the active gesture.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    /// The host lost the pointer (touchcancel, window blur). Ends the gesture like a release.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        if !self.input.is_idle() {
            debug!("gesture cancelled");
        }
        self.finish_gesture()
    }

    // --- Internals ---

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.input.is_idle() { Ok(()) } else { Err(EngineError::GestureInProgress) }
    }

    fn selected_session(&self, mode: ResizeMode, sample: &PointerSample) -> Result<GestureSession, EngineError> {
        self.ensure_idle()?;
        check_pointer(sample)?;
        let id = self.store.selected_id().ok_or(EngineError::NoSelection)?;
        self.session_for(id, mode, sample)
    }

    /// Snapshot node `id` and its surroundings for a new gesture.
    fn session_for(&self, id: NodeId, mode: ResizeMode, sample: &PointerSample) -> Result<GestureSession, EngineError> {
        let node = self.store.get(&id).ok_or(EngineError::NodeNotFound(id))?;

        let mut rects: Vec<Rect> = self.store.siblings(id).map(Node::bounds).collect();
        rects.push(Rect::new(0.0, 0.0, self.config.canvas_width, self.config.canvas_height));
        let pool = rects_to_snap_lines(&rects, self.config.snap_distance);

        Ok(GestureSession {
            node_id: id,
            mode,
            rect_at_start: node.rect(),
            rotation_at_start: node.rotation,
            pointer_at_start: self.viewport.client_to_canvas(sample.point()),
            started_at_ms: sample.timestamp_ms,
            pool,
            viewport: self.viewport,
        })
    }

    fn commit(&mut self, id: NodeId, constrained: Constrained) -> Result<Vec<Action>, EngineError> {
        let node = self.store.replace_rect(&id, constrained.rect)?;
        let mut actions = vec![Action::NodeUpdated { node }];
        if self.guides != constrained.guides {
            self.guides = constrained.guides;
            actions.push(Action::GuidesChanged { lines: self.guides.clone() });
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    fn finish_gesture(&mut self) -> Vec<Action> {
        let stopped = match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::PressingNode { .. } => None,
            InputState::DraggingNode { session } => Some(Action::DragStopped { id: session.node_id }),
            InputState::ResizingNode { session } => {
                Some(Action::ResizeStopped { id: session.node_id, mode: session.mode })
            }
            InputState::RotatingNode { session, .. } => Some(Action::RotateStopped { id: session.node_id }),
        };

        let mut actions: Vec<Action> = stopped.into_iter().collect();
        if !self.guides.is_empty() {
            self.guides.clear();
            actions.push(Action::GuidesChanged { lines: Vec::new() });
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}

fn check_pointer(sample: &PointerSample) -> Result<(), EngineError> {
    if sample.point().is_finite() {
        Ok(())
    } else {
        warn!(?sample, "rejected non-finite pointer");
        Err(EngineError::InvalidPointer)
    }
}

/// A pressed body becomes a drag only after the hold delay and once the pointer has left its start.
fn drag_threshold_passed(session: &GestureSession, pointer: Point, now_ms: f64, delay_ms: f64) -> bool {
    now_ms - session.started_at_ms > delay_ms && pointer != session.pointer_at_start
}

// =============================================================
// Browser bindings
// =============================================================

/// The engine as exported to JavaScript.
///
/// Takes DOM events directly and answers with JSON-encoded [`Action`] lists.
#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine from a JSON config object (`"{}"` for defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Engine, JsValue> {
        let config = EngineConfig::from_json(config_json).map_err(js_error)?;
        EngineCore::new(config).map(|core| Self { core }).map_err(js_error)
    }

    #[wasm_bindgen(js_name = loadNodes)]
    pub fn load_nodes(&mut self, nodes_json: &str) -> Result<String, JsValue> {
        let nodes: Vec<Node> = serde_json::from_str(nodes_json).map_err(js_error)?;
        to_json(&self.core.load_nodes(nodes).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, node_json: &str) -> Result<String, JsValue> {
        let node: Node = serde_json::from_str(node_json).map_err(js_error)?;
        to_json(&self.core.add_node(node).map_err(js_error)?)
    }

    pub fn nodes(&self) -> Result<String, JsValue> {
        to_json(self.core.nodes())
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, origin_x: f64, origin_y: f64, scale: f64) -> Result<(), JsValue> {
        self.core.set_viewport(Viewport::new(origin_x, origin_y, scale)).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setCanvasSize)]
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.core.set_canvas_size(width, height).map_err(js_error)
    }

    #[wasm_bindgen(js_name = nodeMouseDown)]
    pub fn node_mouse_down(&mut self, id: &str, event: &MouseEvent) -> Result<String, JsValue> {
        let id = Uuid::parse_str(id).map_err(js_error)?;
        to_json(&self.core.on_node_pointer_down(id, &mouse_sample(event)).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = nodeTouchStart)]
    pub fn node_touch_start(&mut self, id: &str, event: &TouchEvent) -> Result<String, JsValue> {
        let id = Uuid::parse_str(id).map_err(js_error)?;
        to_json(&self.core.on_node_pointer_down(id, &touch_sample(event)).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = backgroundPointerDown)]
    pub fn background_pointer_down(&mut self) -> Result<String, JsValue> {
        to_json(&self.core.on_background_pointer_down().map_err(js_error)?)
    }

    /// `handle_json` is a serialized [`Handle`], e.g. `{"type":"resize","at":"TOP_LEFT"}`.
    #[wasm_bindgen(js_name = handleMouseDown)]
    pub fn handle_mouse_down(&mut self, handle_json: &str, event: &MouseEvent) -> Result<String, JsValue> {
        let handle: Handle = serde_json::from_str(handle_json).map_err(js_error)?;
        to_json(&self.core.on_handle_pointer_down(handle, &mouse_sample(event)).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = handleTouchStart)]
    pub fn handle_touch_start(&mut self, handle_json: &str, event: &TouchEvent) -> Result<String, JsValue> {
        let handle: Handle = serde_json::from_str(handle_json).map_err(js_error)?;
        to_json(&self.core.on_handle_pointer_down(handle, &touch_sample(event)).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&mut self, event: &MouseEvent) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_move(&mouse_sample(event)).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&mut self, event: &TouchEvent) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_move(&touch_sample(event)).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_up())
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_cancel())
    }

    pub fn selection(&self) -> Option<String> {
        self.core.selection().map(|id| id.to_string())
    }

    #[wasm_bindgen(js_name = visibleHandles)]
    pub fn visible_handles(&self) -> Result<String, JsValue> {
        to_json(&self.core.visible_handles())
    }

    pub fn guides(&self) -> Result<String, JsValue> {
        to_json(self.core.guides())
    }
}

impl Engine {
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

fn event_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

fn mouse_sample(event: &MouseEvent) -> PointerSample {
    PointerSample {
        client: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        touches: Vec::new(),
        modifiers: event_modifiers(event.shift_key(), event.ctrl_key(), event.alt_key(), event.meta_key()),
        timestamp_ms: event.time_stamp(),
    }
}

fn touch_sample(event: &TouchEvent) -> PointerSample {
    // `touches` is empty on touchend; the lifted finger is only in `changedTouches`.
    let mut list = event.touches();
    if list.length() == 0 {
        list = event.changed_touches();
    }
    let touches: Vec<Point> = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect();
    PointerSample::from_touches(
        touches,
        event_modifiers(event.shift_key(), event.ctrl_key(), event.alt_key(), event.meta_key()),
        event.time_stamp(),
    )
}
