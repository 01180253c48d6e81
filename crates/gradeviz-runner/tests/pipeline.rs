use gradeviz_runner::{
    run_comparison_pass, run_report, run_tree_pass, JsonArtifactRenderer, VizConfig,
};
use serde_json::Value;
use std::fs;
use std::path::Path;

const SAMPLE_RESULT: &str = r#"{
    "paperbench_result": {
        "judge_output": {
            "graded_task_tree": {
                "score": 0.75,
                "sub_tasks": [
                    {"id": "a", "score": 1.0},
                    {"id": "b", "score": 0.5}
                ]
            }
        }
    }
}"#;

fn write_result(root: &Path, experiment: &str, run: &str, body: &str) {
    let dir = root.join(experiment).join(run);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("pb_result.json"), body).unwrap();
}

fn read_artifact(images: &Path, name: &str) -> Value {
    serde_json::from_slice(&fs::read(images.join(name)).unwrap()).unwrap()
}

#[test]
fn end_to_end_report() {
    let dir = tempfile::tempdir().unwrap();
    write_result(
        dir.path(),
        "exp_anthropic-claude-agent_run",
        "rice_abc123",
        SAMPLE_RESULT,
    );
    let config = VizConfig::new(dir.path());
    let renderer = JsonArtifactRenderer::new(&config.images_dir);

    let summary = run_report(&config, &renderer).unwrap();
    assert_eq!(summary.trees.processed, 1);
    assert_eq!(summary.trees.skipped, 0);
    assert_eq!(
        summary.trees.artifacts,
        vec!["rice_anthropic-claude-agent_tree"]
    );
    assert_eq!(summary.comparison.records, 1);
    assert!(summary.comparison.generated);
    // Claude 3.7 was found; the other four expected models are reported.
    assert_eq!(summary.comparison.missing_expected.len(), 4);
    assert!(!summary
        .comparison
        .missing_expected
        .contains(&"Claude 3.7".to_string()));

    let images = config.images_dir();
    let tree = read_artifact(images, "rice_anthropic-claude-agent_tree.json");
    assert_eq!(tree["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(tree["edges"].as_array().unwrap().len(), 2);
    assert_eq!(tree["final_score"], 0.75);
    assert_eq!(
        tree["title"],
        "Score Tree: rice (anthropic-claude-agent) - Final Score: 0.75"
    );
    assert_eq!(tree["colorbar"].as_array().unwrap().len(), 256);

    let bars = read_artifact(images, "score_comparison.json");
    assert_eq!(bars["bars"][0]["display_name"], "Claude 3.7");
    assert_eq!(bars["bars"][0]["final_score"], 0.75);

    let results = read_artifact(images, "results.json");
    assert_eq!(results["ranking"][0]["rank"], 1);
    assert_eq!(results["ranking"][0]["display_name"], "Claude 3.7");

    let grid = read_artifact(images, "model_comparison_grid.json");
    assert_eq!(grid["rows"], 2);
    assert_eq!(grid["cols"], 3);
    assert_eq!(
        grid["cells"][0]["image"],
        "rice_anthropic-claude-agent_tree.json"
    );
    assert!(grid["cells"][0]["placeholder"].is_null());
}

#[test]
fn malformed_files_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_result(dir.path(), "exp_gpt-4o-agent_run", "oat_1", SAMPLE_RESULT);
    write_result(dir.path(), "exp_gpt-4o-agent_run", "rye_2", "not json at all");
    write_result(
        dir.path(),
        "exp_gpt-4o-agent_run",
        "spelt_3",
        r#"{"paperbench_result": {"wrong_key": {}}}"#,
    );
    let config = VizConfig::new(dir.path());
    let renderer = JsonArtifactRenderer::new(&config.images_dir);

    let trees = run_tree_pass(&config, &renderer).unwrap();
    assert_eq!(trees.processed, 1);
    assert_eq!(trees.skipped, 2);

    let comparison = run_comparison_pass(&config, &renderer).unwrap();
    assert_eq!(comparison.records, 1);
    assert_eq!(comparison.skipped, 2);
    assert!(comparison.generated);
}

#[test]
fn empty_batch_reports_no_data() {
    let dir = tempfile::tempdir().unwrap();
    write_result(dir.path(), "exp_claude_run", "rice_1", "{broken");
    let config = VizConfig::new(dir.path());
    let renderer = JsonArtifactRenderer::new(&config.images_dir);

    let comparison = run_comparison_pass(&config, &renderer).unwrap();
    assert!(!comparison.generated);
    assert_eq!(comparison.records, 0);
    assert_eq!(comparison.skipped, 1);
    assert_eq!(
        comparison.missing_expected.len(),
        config.expected_models.len()
    );
}

#[test]
fn grid_falls_back_to_substring_search() {
    let dir = tempfile::tempdir().unwrap();
    // The experiment name has no agent keyword; token 3 ("x") becomes the
    // agent label, so the exact artifact name will not exist.
    write_result(dir.path(), "exp_anthropic_thing_x", "rice_1", SAMPLE_RESULT);
    let config = VizConfig::new(dir.path());
    let renderer = JsonArtifactRenderer::new(&config.images_dir);

    // Pre-seed an artifact from some earlier pass whose name carries a
    // display-name keyword.
    fs::create_dir_all(&config.images_dir).unwrap();
    fs::write(
        config.images_dir.join("rice_claude-agent_tree.json"),
        "{}",
    )
    .unwrap();

    let comparison = run_comparison_pass(&config, &renderer).unwrap();
    assert!(comparison.generated);

    let grid = read_artifact(config.images_dir(), "model_comparison_grid.json");
    assert_eq!(grid["cells"][0]["display_name"], "Claude 3.7");
    assert_eq!(grid["cells"][0]["image"], "rice_claude-agent_tree.json");
}

#[test]
fn grid_prefers_the_full_agent_artifact_name() {
    let dir = tempfile::tempdir().unwrap();
    // Token 3 ("x") becomes the agent label, so the exact name will not
    // exist; the artifact on disk carries the full agent string instead.
    write_result(dir.path(), "exp_anthropic_thing_x", "rice_1", SAMPLE_RESULT);
    let config = VizConfig::new(dir.path());
    let renderer = JsonArtifactRenderer::new(&config.images_dir);

    fs::create_dir_all(&config.images_dir).unwrap();
    fs::write(config.images_dir.join("rice_thing-x_tree.json"), "{}").unwrap();
    // A display-name keyword match also exists; the full-agent name wins.
    fs::write(
        config.images_dir.join("rice_claude-agent_tree.json"),
        "{}",
    )
    .unwrap();

    let comparison = run_comparison_pass(&config, &renderer).unwrap();
    assert!(comparison.generated);

    let grid = read_artifact(config.images_dir(), "model_comparison_grid.json");
    assert_eq!(grid["cells"][0]["image"], "rice_thing-x_tree.json");
}

#[test]
fn missing_artifact_yields_a_placeholder_cell() {
    let dir = tempfile::tempdir().unwrap();
    write_result(dir.path(), "exp_llama4-agent_run", "oat_1", SAMPLE_RESULT);
    let config = VizConfig::new(dir.path());
    let renderer = JsonArtifactRenderer::new(&config.images_dir);

    // Comparison only: no tree artifacts were rendered.
    let comparison = run_comparison_pass(&config, &renderer).unwrap();
    assert!(comparison.generated);

    let grid = read_artifact(config.images_dir(), "model_comparison_grid.json");
    assert!(grid["cells"][0]["image"].is_null());
    assert_eq!(
        grid["cells"][0]["placeholder"],
        "Visualization not available for Llama 4"
    );
}

#[test]
fn ranking_spans_multiple_runs_in_score_order() {
    let dir = tempfile::tempdir().unwrap();
    write_result(
        dir.path(),
        "exp_gpt-4.1-agent_run",
        "rice_1",
        &SAMPLE_RESULT.replace("0.75", "0.40"),
    );
    write_result(
        dir.path(),
        "exp_anthropic-claude-agent_run",
        "rice_2",
        SAMPLE_RESULT,
    );
    let config = VizConfig::new(dir.path());
    let renderer = JsonArtifactRenderer::new(&config.images_dir);

    let summary = run_report(&config, &renderer).unwrap();
    assert_eq!(summary.comparison.records, 2);

    let results = read_artifact(config.images_dir(), "results.json");
    assert_eq!(results["ranking"][0]["display_name"], "Claude 3.7");
    assert_eq!(results["ranking"][1]["display_name"], "GPT-4.1");
    assert_eq!(results["ranking"][1]["rank"], 2);
}