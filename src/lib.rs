//! Geometry and constraint engine for a canvas of rotatable rectangles.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It turns
//! raw pointer input on a node (a press on its body, one of its eight resize
//! handles, or its rotation grip) into committed geometry: the node is moved,
//! resized with the opposite edge anchored, or rotated about its center, and
//! every candidate rectangle passes through a fixed constraint pipeline
//! (minimum size, snapping, aspect ratio, canvas bounds) before it is stored.
//! The host JavaScript layer only wires DOM events to [`engine::Engine`],
//! draws nodes, handles and guides, and applies the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine, browser bindings and the testable [`engine::EngineCore`] |
//! | [`input`] | Pointer samples, modifiers and the gesture state machine |
//! | [`constraints`] | The constraint pipeline and anchor resolution |
//! | [`snap`] | Snap lines and closest-match search |
//! | [`transform`] | Rotation-aware resize math and the pivot angle |
//! | [`handle`] | Resize modes, rotation grips and handle visibility |
//! | [`geometry`] | Rectangles, rotated bounding boxes, vector helpers |
//! | [`viewport`] | Points and the client/canvas transform |
//! | [`doc`] | Nodes and the ordered node store |
//! | [`config`] | Host-supplied engine configuration |
//! | [`error`] | The engine error type |
//! | [`consts`] | Shared numeric constants (snap distance, size floors, etc.) |

pub mod config;
pub mod constraints;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod input;
pub mod snap;
pub mod transform;
pub mod viewport;
