//! # UI Error Types
//!
//! Every error here is a contract violation: the caller asked for something
//! the layout model forbids. None of them are retried or recovered from.

use crate::geometry::Point;
use crate::tree::NodeId;
use thiserror::Error;

/// Errors raised by the layout tree and its transforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// An absolute-only setter was used on a relative transform.
    #[error("cannot set {field} on a relative transform")]
    NotAbsolute {
        /// The field that was being set.
        field: &'static str,
    },

    /// Relative positioning needs a parent to be relative to.
    #[error("relative transform requires a parent (node {0:?})")]
    RelativeWithoutParent(NodeId),

    /// A size-like field was given a negative component.
    #[error("{field} must not be negative: ({x}, {y})")]
    NegativeValue {
        /// The field that was being set.
        field: &'static str,
        /// Offending X component.
        x: f32,
        /// Offending Y component.
        y: f32,
    },

    /// Maximum size would fall below minimum size.
    #[error("max size {max:?} is below min size {min:?}")]
    MaxBelowMin {
        /// Minimum size.
        min: Point,
        /// Maximum size.
        max: Point,
    },

    /// The node id does not exist in the tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// Reparenting would make a node its own ancestor.
    #[error("node {node:?} cannot be parented to {parent:?}: would form a cycle")]
    ParentCycle {
        /// Node being reparented.
        node: NodeId,
        /// Requested parent.
        parent: NodeId,
    },

    /// Screen resolutions must be strictly positive.
    #[error("invalid resolution {0:?}")]
    InvalidResolution(Point),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl UiError {
    pub(crate) fn negative_point(field: &'static str, value: Point) -> Self {
        Self::NegativeValue {
            field,
            x: value.x as f32,
            y: value.y as f32,
        }
    }
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
