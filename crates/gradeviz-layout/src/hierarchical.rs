//! Dot-style layered layout.
//!
//! Ranks are root distances over the reversed edges: the root sits on rank 0
//! at the bottom of the drawing, each level of the tree one `ranksep` above
//! it. Nodes within a rank keep graph insertion order and are centered
//! around x = 0 with `nodesep` spacing.

use crate::{distances_to_root, find_root, Point, Positions, Result};
use gradeviz_core::ScoreGraph;

#[derive(Debug, Clone, Copy)]
pub struct HierarchicalOptions {
    pub nodesep: f64,
    pub ranksep: f64,
}

impl Default for HierarchicalOptions {
    fn default() -> Self {
        HierarchicalOptions {
            nodesep: 50.0,
            ranksep: 75.0,
        }
    }
}

pub fn layout(graph: &ScoreGraph, opts: &HierarchicalOptions) -> Result<Positions> {
    let root = find_root(graph)?;
    let distances = distances_to_root(graph, root);
    let max_rank = distances.values().copied().max().unwrap_or(0);

    // Group nodes by rank in insertion order. Anything BFS could not reach
    // (impossible for builder output) lands one rank past the leaves.
    let mut ranks: Vec<Vec<&str>> = vec![Vec::new(); max_rank + 2];
    for node in &graph.nodes {
        let rank = distances.get(&node.id).copied().unwrap_or(max_rank + 1);
        ranks[rank].push(node.id.as_str());
    }

    let mut positions = Positions::new();
    for (rank, members) in ranks.iter().enumerate() {
        let span = (members.len().saturating_sub(1)) as f64 / 2.0;
        // Root (rank 0) gets the minimum y; leaves sit at the top.
        let y = (rank as f64 - max_rank as f64) * opts.ranksep;
        for (i, id) in members.iter().enumerate() {
            positions.insert(
                id.to_string(),
                Point {
                    x: (i as f64 - span) * opts.nodesep,
                    y,
                },
            );
        }
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradeviz_core::TaskNode;

    fn sample_graph() -> ScoreGraph {
        let raw = r#"{
            "sub_tasks": [
                {"id": "a", "sub_tasks": [{"id": "a1"}, {"id": "a2"}]},
                {"id": "b"}
            ]
        }"#;
        let root: TaskNode = serde_json::from_str(raw).unwrap();
        ScoreGraph::from_task_tree(&root)
    }

    #[test]
    fn root_takes_the_minimum_y() {
        let graph = sample_graph();
        let positions = layout(&graph, &HierarchicalOptions::default()).unwrap();
        let root_y = positions["_root"].y;
        for (id, p) in &positions {
            if id != "_root" {
                assert!(p.y > root_y, "{} should sit above the root", id);
            }
        }
    }

    #[test]
    fn ranks_share_a_y_coordinate() {
        let graph = sample_graph();
        let positions = layout(&graph, &HierarchicalOptions::default()).unwrap();
        assert_eq!(positions["_0_a"].y, positions["_1_b"].y);
        assert_eq!(positions["_0_0_a1"].y, positions["_0_1_a2"].y);
        assert!(positions["_0_0_a1"].y > positions["_0_a"].y);
    }

    #[test]
    fn siblings_are_spread_and_centered() {
        let graph = sample_graph();
        let opts = HierarchicalOptions::default();
        let positions = layout(&graph, &opts).unwrap();
        let a = positions["_0_a"].x;
        let b = positions["_1_b"].x;
        assert_eq!(b - a, opts.nodesep);
        assert_eq!(a + b, 0.0);
        assert_eq!(positions["_root"].x, 0.0);
    }

    #[test]
    fn single_node_graph() {
        let root: TaskNode = serde_json::from_str(r#"{"score": 1.0}"#).unwrap();
        let graph = ScoreGraph::from_task_tree(&root);
        let positions = layout(&graph, &HierarchicalOptions::default()).unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions["_root"], Point { x: 0.0, y: 0.0 });
    }
}
