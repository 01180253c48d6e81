//! Position assignment for reversed score graphs.
//!
//! Two strategies exist: a dot-style layered layout and a spring embedding
//! whose y-axis is corrected by root distance. A resolver tries them in
//! declared order and returns the first success, which makes the fallback
//! chain explicit and each strategy independently testable.

pub mod force;
pub mod hierarchical;

use gradeviz_core::ScoreGraph;
use std::collections::BTreeMap;
use std::collections::VecDeque;

pub use force::SpringOptions;
pub use hierarchical::HierarchicalOptions;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Node id -> position. BTreeMap keeps iteration deterministic.
pub type Positions = BTreeMap<String, Point>;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("no root: every node has an outgoing edge")]
    MissingRoot,
    #[error("ambiguous root: {count} nodes have no outgoing edge")]
    AmbiguousRoot { count: usize },
    #[error("no layout strategy configured")]
    NoStrategies,
}

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Clone)]
pub enum LayoutStrategy {
    Hierarchical(HierarchicalOptions),
    ForceDirectedWithLeveling(SpringOptions),
}

impl LayoutStrategy {
    pub fn apply(&self, graph: &ScoreGraph) -> Result<Positions> {
        match self {
            LayoutStrategy::Hierarchical(opts) => hierarchical::layout(graph, opts),
            LayoutStrategy::ForceDirectedWithLeveling(opts) => force::layout(graph, opts),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Hierarchical(_) => "hierarchical",
            LayoutStrategy::ForceDirectedWithLeveling(_) => "force_directed_with_leveling",
        }
    }
}

/// Tries strategies in declared order; the first one that produces positions
/// wins. A strategy failure is logged and the next one is attempted.
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    strategies: Vec<LayoutStrategy>,
}

impl Default for LayoutResolver {
    fn default() -> Self {
        LayoutResolver {
            strategies: vec![
                LayoutStrategy::Hierarchical(HierarchicalOptions::default()),
                LayoutStrategy::ForceDirectedWithLeveling(SpringOptions::default()),
            ],
        }
    }
}

impl LayoutResolver {
    pub fn new(strategies: Vec<LayoutStrategy>) -> Self {
        LayoutResolver { strategies }
    }

    pub fn resolve(&self, graph: &ScoreGraph) -> Result<Positions> {
        let mut last_err = None;
        for strategy in &self.strategies {
            match strategy.apply(graph) {
                Ok(positions) => return Ok(positions),
                Err(err) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        error = %err,
                        "layout strategy failed, trying next"
                    );
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or(LayoutError::NoStrategies))
    }
}

/// The root of a reversed tree graph: the unique node with out-degree zero.
/// Zero or several such nodes means the input violated the tree-shaped
/// precondition, which is reported rather than silently guessed around.
pub(crate) fn find_root<'g>(graph: &'g ScoreGraph) -> Result<&'g str> {
    if graph.nodes.is_empty() {
        return Err(LayoutError::EmptyGraph);
    }
    let sinks = graph.sink_nodes();
    match sinks.len() {
        0 => Err(LayoutError::MissingRoot),
        1 => Ok(sinks[0]),
        count => Err(LayoutError::AmbiguousRoot { count }),
    }
}

/// Shortest-path distance (edge count) from every reachable node to the
/// root, via BFS along reversed adjacency.
pub(crate) fn distances_to_root(graph: &ScoreGraph, root: &str) -> BTreeMap<String, usize> {
    let mut children_of: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for edge in &graph.edges {
        children_of
            .entry(edge.parent.as_str())
            .or_default()
            .push(edge.child.as_str());
    }

    let mut distances = BTreeMap::new();
    let mut queue = VecDeque::new();
    distances.insert(root.to_string(), 0usize);
    queue.push_back(root);
    while let Some(node) = queue.pop_front() {
        let next = distances[node] + 1;
        for &child in children_of.get(node).into_iter().flatten() {
            if !distances.contains_key(child) {
                distances.insert(child.to_string(), next);
                queue.push_back(child);
            }
        }
    }
    distances
}
