use std::path::{Path, PathBuf};

/// Display names the comparison pass expects to find. Missing ones are
/// reported, never fatal.
pub const DEFAULT_EXPECTED_MODELS: &[&str] = &[
    "Claude 3.7",
    "GPT-4o",
    "GPT-4.1",
    "Llama 4",
    "Gemini 2.5 pro",
];

/// Suffix that marks a file as a grading result.
pub const DEFAULT_RESULT_SUFFIX: &str = "pb_result.json";

/// Explicit pipeline configuration. Defaults mirror the conventional runs
/// layout: artifacts under `<runs>/images`, a 2x3 comparison grid.
#[derive(Debug, Clone)]
pub struct VizConfig {
    pub runs_dir: PathBuf,
    pub images_dir: PathBuf,
    pub result_suffix: String,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub expected_models: Vec<String>,
}

impl VizConfig {
    pub fn new(runs_dir: impl Into<PathBuf>) -> Self {
        let runs_dir = runs_dir.into();
        let images_dir = runs_dir.join("images");
        VizConfig {
            runs_dir,
            images_dir,
            result_suffix: DEFAULT_RESULT_SUFFIX.to_string(),
            grid_rows: 2,
            grid_cols: 3,
            expected_models: DEFAULT_EXPECTED_MODELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_images_dir(mut self, images_dir: impl Into<PathBuf>) -> Self {
        self.images_dir = images_dir.into();
        self
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Grid capacity; ranked records past this are left out of the grid.
    pub fn grid_capacity(&self) -> usize {
        self.grid_rows * self.grid_cols
    }
}
