use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level shape of a benchmark grading result file. All three wrapper keys
/// are required; a file missing any of them fails to deserialize and is
/// skipped by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct GradingResult {
    pub paperbench_result: PaperbenchResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaperbenchResult {
    pub judge_output: JudgeOutput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JudgeOutput {
    pub graded_task_tree: TaskNode,
}

/// One node of the judge's graded task tree. The root commonly omits `id`.
/// A missing `score` is kept as `None`: it renders like 0.0 but stays
/// distinguishable from a true zero.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub sub_tasks: Vec<TaskNode>,
}

impl TaskNode {
    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.sub_tasks.iter().map(TaskNode::node_count).sum::<usize>()
    }
}

/// Loads a result file and unwraps it down to the graded task tree.
pub fn load_graded_tree(path: &Path) -> Result<TaskNode> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let result: GradingResult =
        serde_json::from_slice(&bytes).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(result.paperbench_result.judge_output.graded_task_tree)
}
