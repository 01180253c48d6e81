use anyhow::Result;
use clap::{Parser, Subcommand};
use gradeviz_runner::{
    run_comparison_pass, run_report, run_tree_pass, ComparisonSummary, JsonArtifactRenderer,
    ReportSummary, TreePassSummary, VizConfig,
};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gradeviz", version, about = "Grading-tree visualization CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one tree artifact per grading result file.
    Trees {
        runs_dir: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Aggregate root scores across runs into comparison artifacts.
    Compare {
        runs_dir: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Both passes: trees first, then the comparison views.
    Report {
        runs_dir: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let json_mode = command_json_mode(&cli.command);
    match run_command(cli.command) {
        Ok(Some(payload)) => {
            emit_json(&payload);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            if json_mode {
                emit_json(&json_error("command_failed", err.to_string()));
                std::process::exit(1);
            }
            Err(err)
        }
    }
}

fn run_command(command: Commands) -> Result<Option<Value>> {
    match command {
        Commands::Trees { runs_dir, out, json } => {
            let config = build_config(runs_dir, out);
            let renderer = JsonArtifactRenderer::new(&config.images_dir);
            let summary = run_tree_pass(&config, &renderer)?;
            if json {
                return Ok(Some(json!({
                    "ok": true,
                    "command": "trees",
                    "images_dir": config.images_dir.display().to_string(),
                    "trees": tree_summary_to_json(&summary),
                })));
            }
            print_tree_summary(&summary);
        }
        Commands::Compare { runs_dir, out, json } => {
            let config = build_config(runs_dir, out);
            let renderer = JsonArtifactRenderer::new(&config.images_dir);
            let summary = run_comparison_pass(&config, &renderer)?;
            if json {
                return Ok(Some(json!({
                    "ok": true,
                    "command": "compare",
                    "images_dir": config.images_dir.display().to_string(),
                    "comparison": comparison_summary_to_json(&summary),
                })));
            }
            print_comparison_summary(&summary);
        }
        Commands::Report { runs_dir, out, json } => {
            let config = build_config(runs_dir, out);
            let renderer = JsonArtifactRenderer::new(&config.images_dir);
            let summary = run_report(&config, &renderer)?;
            if json {
                return Ok(Some(json!({
                    "ok": true,
                    "command": "report",
                    "images_dir": config.images_dir.display().to_string(),
                    "report": report_summary_to_json(&summary),
                })));
            }
            print_tree_summary(&summary.trees);
            print_comparison_summary(&summary.comparison);
        }
    }
    Ok(None)
}

fn build_config(runs_dir: PathBuf, out: Option<PathBuf>) -> VizConfig {
    let config = VizConfig::new(runs_dir);
    match out {
        Some(dir) => config.with_images_dir(dir),
        None => config,
    }
}

fn command_json_mode(command: &Commands) -> bool {
    match command {
        Commands::Trees { json, .. }
        | Commands::Compare { json, .. }
        | Commands::Report { json, .. } => *json,
    }
}

fn emit_json(value: &Value) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{}", s),
        Err(_) => println!(
            "{{\"ok\":false,\"error\":{{\"code\":\"serialization_error\",\"message\":\"failed to serialize JSON payload\"}}}}"
        ),
    }
}

fn json_error(code: &str, message: String) -> Value {
    json!({
        "ok": false,
        "error": {
            "code": code,
            "message": message,
        }
    })
}

fn tree_summary_to_json(summary: &TreePassSummary) -> Value {
    json!({
        "processed": summary.processed,
        "skipped": summary.skipped,
        "artifacts": summary.artifacts,
    })
}

fn comparison_summary_to_json(summary: &ComparisonSummary) -> Value {
    json!({
        "records": summary.records,
        "skipped": summary.skipped,
        "missing_expected": summary.missing_expected,
        "generated": summary.generated,
    })
}

fn report_summary_to_json(summary: &ReportSummary) -> Value {
    json!({
        "trees": tree_summary_to_json(&summary.trees),
        "comparison": comparison_summary_to_json(&summary.comparison),
    })
}

fn print_tree_summary(summary: &TreePassSummary) {
    println!("trees_processed: {}", summary.processed);
    println!("trees_skipped: {}", summary.skipped);
    for artifact in &summary.artifacts {
        println!("artifact: {}", artifact);
    }
}

fn print_comparison_summary(summary: &ComparisonSummary) {
    println!("comparison_records: {}", summary.records);
    println!("comparison_skipped: {}", summary.skipped);
    println!("comparison_generated: {}", summary.generated);
    for name in &summary.missing_expected {
        println!("missing_expected: {}", name);
    }
}
