//! The visualization pipeline: discovers grading result files, turns each
//! one into a tree render request, and aggregates root scores across runs
//! into comparison render requests. Files are processed one at a time; a
//! failing file is logged and skipped without affecting the rest.

pub mod config;
pub mod discover;
pub mod render;

pub use config::VizConfig;
pub use render::{JsonArtifactRenderer, Renderer};

use anyhow::Result;
use gradeviz_analysis::{self as analysis, RunRecord};
use gradeviz_core::{load_graded_tree, ColorRamp, ScoreColorMap, ScoreGraph};
use gradeviz_layout::{LayoutResolver, Point};
use render::{
    BarEntry, ComparisonRenderRequest, GridCell, RankingRow, RenderEdge, RenderNode,
    TreeRenderRequest,
};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct TreePassSummary {
    pub processed: usize,
    pub skipped: usize,
    pub artifacts: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ComparisonSummary {
    pub records: usize,
    pub skipped: usize,
    pub missing_expected: Vec<String>,
    /// False only when every discovered file failed ("no data").
    pub generated: bool,
}

#[derive(Debug)]
pub struct ReportSummary {
    pub trees: TreePassSummary,
    pub comparison: ComparisonSummary,
}

/// Renders one tree artifact per readable result file.
pub fn run_tree_pass(config: &VizConfig, renderer: &dyn Renderer) -> Result<TreePassSummary> {
    let files = discover::discover_result_files(&config.runs_dir, &config.result_suffix);
    info!(
        count = files.len(),
        root = %config.runs_dir.display(),
        "found result files"
    );
    let resolver = LayoutResolver::default();
    let colors = ScoreColorMap::new();

    let mut summary = TreePassSummary::default();
    for file in &files {
        match render_tree_file(renderer, &resolver, &colors, file) {
            Ok(artifact) => {
                info!(file = %file.display(), artifact = %artifact, "rendered tree");
                summary.processed += 1;
                summary.artifacts.push(artifact);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "skipping result file");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

fn render_tree_file(
    renderer: &dyn Renderer,
    resolver: &LayoutResolver,
    colors: &ScoreColorMap,
    path: &Path,
) -> Result<String> {
    let identity = analysis::identity_for_result(path);
    let tree = load_graded_tree(path)?;
    let graph = ScoreGraph::from_task_tree(&tree);
    let positions = resolver.resolve(&graph)?;

    let nodes = graph
        .nodes
        .iter()
        .map(|node| {
            let point = positions
                .get(&node.id)
                .copied()
                .unwrap_or(Point { x: 0.0, y: 0.0 });
            RenderNode {
                id: node.id.clone(),
                x: point.x,
                y: point.y,
                color: colors.color_for(node.score).to_hex(),
                score: node.score,
            }
        })
        .collect();
    let edges = graph
        .edges
        .iter()
        .map(|edge| RenderEdge {
            child: edge.child.clone(),
            parent: edge.parent.clone(),
        })
        .collect();

    let final_score = tree.score;
    let artifact_name = render::tree_artifact_name(&identity);
    let request = TreeRenderRequest {
        title: format!(
            "Score Tree: {} ({}) - Final Score: {:.2}",
            identity.model_name,
            identity.agent_label,
            final_score.unwrap_or(0.0)
        ),
        artifact_name: artifact_name.clone(),
        final_score,
        nodes,
        edges,
        colorbar: colors
            .ramp()
            .levels(256)
            .iter()
            .map(|c| c.to_hex())
            .collect(),
    };
    renderer.render_tree(&request)?;
    Ok(artifact_name)
}

/// Extracts one [`RunRecord`] per readable result file.
pub fn collect_run_records(config: &VizConfig) -> (Vec<RunRecord>, usize) {
    let files = discover::discover_result_files(&config.runs_dir, &config.result_suffix);
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for file in &files {
        match collect_record(file) {
            Ok(record) => {
                info!(
                    file = %file.display(),
                    model = %record.display_name,
                    score = record.final_score,
                    "extracted run record"
                );
                records.push(record);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "skipping result file");
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

fn collect_record(path: &Path) -> Result<RunRecord> {
    let tree = load_graded_tree(path)?;
    let identity = analysis::identity_for_result(path);

    let experiment_dir = path.parent().and_then(Path::parent);
    let experiment_path = experiment_dir
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let experiment_name = experiment_dir
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut record = RunRecord {
        display_name: analysis::display_name(&experiment_path),
        full_agent: analysis::full_agent_label(&experiment_name),
        final_score: tree.score.unwrap_or(0.0),
        sub_scores: Vec::new(),
        source: path.to_path_buf(),
        identity,
    };
    for (i, sub_task) in tree.sub_tasks.iter().enumerate() {
        let name = sub_task
            .name
            .clone()
            .unwrap_or_else(|| format!("Subtask {i}"));
        record.record_sub_score(&name, sub_task.score.unwrap_or(0.0));
    }
    Ok(record)
}

/// Ranks all runs and renders the comparison views (bar chart, ranking
/// table, thumbnail grid).
pub fn run_comparison_pass(
    config: &VizConfig,
    renderer: &dyn Renderer,
) -> Result<ComparisonSummary> {
    let (records, skipped) = collect_run_records(config);
    if records.is_empty() {
        warn!("no model data available for comparison");
        return Ok(ComparisonSummary {
            records: 0,
            skipped,
            missing_expected: config.expected_models.clone(),
            generated: false,
        });
    }

    let missing = analysis::missing_expected(&records, &config.expected_models);
    if !missing.is_empty() {
        warn!(missing = ?missing, "expected models are missing from the results");
    }

    let ranked = analysis::rank(&records);
    let blues = ColorRamp::blues();
    let bars = ranked
        .iter()
        .map(|r| BarEntry {
            display_name: r.display_name.clone(),
            final_score: r.final_score,
            color: blues.color_at(0.4 + 0.6 * r.final_score).to_hex(),
        })
        .collect();
    let ranking = ranked
        .iter()
        .enumerate()
        .map(|(i, r)| RankingRow {
            rank: i + 1,
            display_name: r.display_name.clone(),
            final_score: r.final_score,
            color: blues.color_at(0.3 + 0.7 * r.final_score).to_hex(),
            alpha: 0.3,
        })
        .collect();
    let grid = build_grid_cells(config, &ranked);

    let request = ComparisonRenderRequest {
        bars,
        ranking,
        grid_rows: config.grid_rows,
        grid_cols: config.grid_cols,
        grid,
        missing_expected: missing.clone(),
    };
    renderer.render_comparison(&request)?;

    Ok(ComparisonSummary {
        records: records.len(),
        skipped,
        missing_expected: missing,
        generated: true,
    })
}

fn build_grid_cells(config: &VizConfig, ranked: &[RunRecord]) -> Vec<GridCell> {
    ranked
        .iter()
        .take(config.grid_capacity())
        .map(|record| {
            let (image, placeholder) = match locate_tree_artifact(&config.images_dir, record) {
                Some(name) => (Some(name), None),
                None => {
                    warn!(
                        model = %record.display_name,
                        "no visualization found for grid cell"
                    );
                    (
                        None,
                        Some(format!(
                            "Visualization not available for {}",
                            record.display_name
                        )),
                    )
                }
            };
            GridCell {
                display_name: record.display_name.clone(),
                final_score: record.final_score,
                image,
                placeholder,
            }
        })
        .collect()
}

/// Resolves a grid cell's tree artifact: exact identity-derived name first,
/// then the full-agent variant (artifacts written by an earlier batch may
/// carry the whole agent string rather than the resolved label), then a
/// best-effort substring search over `{model}_*_tree.json` files using the
/// record's compact display name and its keywords.
fn locate_tree_artifact(images_dir: &Path, record: &RunRecord) -> Option<String> {
    let exact = format!("{}.json", render::tree_artifact_name(&record.identity));
    if images_dir.join(&exact).exists() {
        return Some(exact);
    }
    if !record.full_agent.is_empty() {
        let by_full_agent = format!(
            "{}_{}_tree.json",
            record.identity.model_name, record.full_agent
        );
        if images_dir.join(&by_full_agent).exists() {
            return Some(by_full_agent);
        }
    }

    let prefix = format!("{}_", record.identity.model_name);
    let mut candidates: Vec<String> = fs::read_dir(images_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(&prefix) && name.ends_with("_tree.json"))
        .collect();
    candidates.sort();

    let compact = record
        .display_name
        .to_lowercase()
        .replace(' ', "-")
        .replace('.', "");
    let mut needles = vec![compact];
    needles.extend(
        record
            .display_name
            .to_lowercase()
            .split_whitespace()
            .map(|s| s.to_string()),
    );

    for needle in &needles {
        if needle.is_empty() {
            continue;
        }
        if let Some(found) = candidates
            .iter()
            .find(|name| name.to_lowercase().contains(needle))
        {
            return Some(found.clone());
        }
    }
    None
}

/// Both passes back to back: trees first so the comparison grid can look
/// the artifacts up by name.
pub fn run_report(config: &VizConfig, renderer: &dyn Renderer) -> Result<ReportSummary> {
    let trees = run_tree_pass(config, renderer)?;
    let comparison = run_comparison_pass(config, renderer)?;
    Ok(ReportSummary { trees, comparison })
}
