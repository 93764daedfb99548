//! Engine error type.

use crate::doc::NodeId;

/// Invalid input or invalid state reported by the engine.
///
/// The geometry itself cannot fail; every variant here is a caller mistake
/// (bad configuration, a gesture with no target) or a guard tripping on a
/// non-finite result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },
    #[error("no node is selected")]
    NoSelection,
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("node {0} has non-finite geometry or a non-positive size")]
    InvalidNode(NodeId),
    #[error("a gesture is already in progress")]
    GestureInProgress,
    #[error("non-finite geometry produced by {stage}")]
    NonFinite { stage: &'static str },
    #[error("pointer coordinates are not finite")]
    InvalidPointer,
    #[error("invalid viewport: scale must be positive and finite")]
    InvalidViewport,
    #[error("unknown resize mode: {0}")]
    UnknownMode(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
