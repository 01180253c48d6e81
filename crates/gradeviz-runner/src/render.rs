//! The renderer seam.
//!
//! The pipeline hands finished render requests (graph + positions + colors,
//! or ranked comparison data) to a [`Renderer`]; actual drawing is the
//! collaborator's business. The shipped [`JsonArtifactRenderer`] writes each
//! request as a pretty JSON artifact so the whole pipeline runs end to end
//! without a graphics stack.

use anyhow::{Context, Result};
use chrono::Utc;
use gradeviz_analysis::RunIdentity;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Artifact name shared by both halves of the system: the tree pass writes
/// `<name>.json`, the comparison grid looks the same name back up. Changing
/// this scheme breaks cross-referencing, so both sides call this function.
pub fn tree_artifact_name(identity: &RunIdentity) -> String {
    format!("{}_{}_tree", identity.model_name, identity.agent_label)
}

#[derive(Debug, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RenderEdge {
    pub child: String,
    pub parent: String,
}

#[derive(Debug, Serialize)]
pub struct TreeRenderRequest {
    pub artifact_name: String,
    pub title: String,
    pub final_score: Option<f64>,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    /// Sampled score ramp for the colorbar legend.
    pub colorbar: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BarEntry {
    pub display_name: String,
    pub final_score: f64,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub display_name: String,
    pub final_score: f64,
    pub color: String,
    pub alpha: f32,
}

/// One comparison-grid cell: either a reference to an existing tree
/// artifact or a placeholder with explanatory text.
#[derive(Debug, Serialize)]
pub struct GridCell {
    pub display_name: String,
    pub final_score: f64,
    pub image: Option<String>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonRenderRequest {
    pub bars: Vec<BarEntry>,
    pub ranking: Vec<RankingRow>,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub grid: Vec<GridCell>,
    pub missing_expected: Vec<String>,
}

pub trait Renderer {
    fn render_tree(&self, request: &TreeRenderRequest) -> Result<()>;
    fn render_comparison(&self, request: &ComparisonRenderRequest) -> Result<()>;
}

/// Writes render requests as timestamped JSON artifacts under the images
/// directory, creating it if absent.
#[derive(Debug, Clone)]
pub struct JsonArtifactRenderer {
    images_dir: PathBuf,
}

impl JsonArtifactRenderer {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        JsonArtifactRenderer {
            images_dir: images_dir.into(),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    fn write_artifact<T: Serialize>(&self, name: &str, payload: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.images_dir).with_context(|| {
            format!("failed to create {}", self.images_dir.display())
        })?;
        let mut value = serde_json::to_value(payload)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "created_at".to_string(),
                json!(Utc::now().to_rfc3339()),
            );
        }
        let path = self.images_dir.join(format!("{name}.json"));
        let bytes = serde_json::to_vec_pretty(&value)?;
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl Renderer for JsonArtifactRenderer {
    fn render_tree(&self, request: &TreeRenderRequest) -> Result<()> {
        self.write_artifact(&request.artifact_name, request)?;
        Ok(())
    }

    fn render_comparison(&self, request: &ComparisonRenderRequest) -> Result<()> {
        self.write_artifact(
            "score_comparison",
            &json!({ "bars": &request.bars }),
        )?;
        self.write_artifact(
            "results",
            &json!({ "ranking": &request.ranking, "missing_expected": &request.missing_expected }),
        )?;
        self.write_artifact(
            "model_comparison_grid",
            &json!({
                "rows": request.grid_rows,
                "cols": request.grid_cols,
                "cells": &request.grid,
            }),
        )?;
        Ok(())
    }
}
