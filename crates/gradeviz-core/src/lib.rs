//! Data model for graded task trees: JSON loading, the reversed
//! child-to-parent graph transformation, and score-to-color mapping.

pub mod color;
pub mod error;
pub mod graph;
pub mod task;

pub use color::{ColorRamp, Rgba, ScoreColorMap};
pub use error::{Error, Result};
pub use graph::{GraphEdge, GraphNode, NodePath, ScoreGraph};
pub use task::{load_graded_tree, GradingResult, TaskNode};
