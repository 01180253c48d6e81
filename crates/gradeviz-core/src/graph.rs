use crate::error::{Error, Result};
use crate::task::TaskNode;
use std::collections::BTreeSet;

/// Position of a node within its tree: the sequence of child indices walked
/// from the root. This is the node's real identity; the string form is only
/// produced at the rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Renders the path-qualified identifier: every index contributes a
    /// `_{i}` segment, followed by `_{id}` (or `_root` when the source node
    /// has no id). The index prefix keeps identifiers unique even when
    /// source ids collide at different depths.
    pub fn render(&self, id: Option<&str>) -> String {
        let mut out = String::new();
        for index in &self.0 {
            out.push('_');
            out.push_str(&index.to_string());
        }
        out.push('_');
        out.push_str(id.unwrap_or("root"));
        out
    }
}

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub path: NodePath,
    pub score: Option<f64>,
}

/// Directed edge in the reversed convention: child points at its parent, so
/// a layout engine naturally places leaves above the root.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub child: String,
    pub parent: String,
}

/// Graph form of one graded task tree: one node per task, one child->parent
/// edge per non-root task. Nodes and edges are in tree traversal order.
#[derive(Debug, Clone, Default)]
pub struct ScoreGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ScoreGraph {
    /// Builds the reversed graph for a task tree. Recursion depth equals the
    /// tree depth; input is trusted to be tree-shaped.
    pub fn from_task_tree(root: &TaskNode) -> Self {
        let mut graph = ScoreGraph::default();
        graph.add_subtree(root, NodePath::root(), None);
        graph
    }

    fn add_subtree(&mut self, task: &TaskNode, path: NodePath, parent_id: Option<&str>) {
        let node_id = path.render(task.id.as_deref());
        self.nodes.push(GraphNode {
            id: node_id.clone(),
            path: path.clone(),
            score: task.score,
        });
        if let Some(parent) = parent_id {
            self.edges.push(GraphEdge {
                child: node_id.clone(),
                parent: parent.to_string(),
            });
        }
        for (index, sub_task) in task.sub_tasks.iter().enumerate() {
            self.add_subtree(sub_task, path.child(index), Some(&node_id));
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Number of outgoing edges. In the reversed convention the root is the
    /// only node with out-degree zero.
    pub fn out_degree(&self, id: &str) -> usize {
        self.edges.iter().filter(|e| e.child == id).count()
    }

    /// Nodes with no outgoing edge, in insertion order. A well-formed tree
    /// graph has exactly one.
    pub fn sink_nodes(&self) -> Vec<&str> {
        let children: BTreeSet<&str> = self.edges.iter().map(|e| e.child.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| !children.contains(n.id.as_str()))
            .map(|n| n.id.as_str())
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let mut node_exists: BTreeSet<&str> = BTreeSet::new();
        for n in &self.nodes {
            node_exists.insert(n.id.as_str());
        }
        for e in &self.edges {
            if !node_exists.contains(e.child.as_str()) || !node_exists.contains(e.parent.as_str())
            {
                return Err(Error::MissingEndpoint {
                    child: e.child.clone(),
                    parent: e.parent.clone(),
                });
            }
        }
        Ok(())
    }
}
