use std::path::Path;

/// Tokens that mark an underscore-delimited directory-name part as the agent
/// label. Matched case-insensitively, first matching token wins.
const AGENT_KEYWORDS: &[&str] = &["agent", "gemini", "gpt", "claude", "llama"];

/// Ordered display-name rules: the first rule whose needle occurs in the
/// lowercased experiment path wins, regardless of where in the string the
/// needles sit. Order is the tie-break, by design.
const DISPLAY_NAME_RULES: &[(&[&str], &str)] = &[
    (&["anthropic"], "Claude 3.7"),
    (&["gpt-4.1"], "GPT-4.1"),
    (&["gpt-4o", "gpt4o"], "GPT-4o"),
    (&["llama"], "Llama 4"),
    (&["litellm", "gemini"], "Gemini 2.5 pro"),
];

pub const UNKNOWN_MODEL: &str = "Unknown Model";

/// Stable identity of one benchmark run, derived from the two directory
/// names enclosing its result file. Two runs are the same only when both
/// fields match exactly; the pair also names the run's tree artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    pub model_name: String,
    pub agent_label: String,
}

/// Derives the identity for a result file: the immediate parent directory
/// supplies the model name (its first underscore token), the grandparent
/// supplies the agent label. Resolution never fails; unmatched inputs
/// degrade to empty fields.
pub fn identity_for_result(path: &Path) -> RunIdentity {
    let parent_name = dir_name(path.parent());
    let grandparent_name = dir_name(path.parent().and_then(Path::parent));
    RunIdentity {
        model_name: parent_name
            .split('_')
            .next()
            .unwrap_or_default()
            .to_string(),
        agent_label: resolve_agent_label(&grandparent_name),
    }
}

fn dir_name(dir: Option<&Path>) -> String {
    dir.and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Scans the experiment directory name's underscore tokens for an agent
/// keyword; falls back to the fourth token when the name has more than
/// three, else the empty string.
pub fn resolve_agent_label(experiment_dir_name: &str) -> String {
    let tokens: Vec<&str> = experiment_dir_name.split('_').collect();
    for token in &tokens {
        let lower = token.to_lowercase();
        if AGENT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return (*token).to_string();
        }
    }
    if tokens.len() > 3 {
        return tokens[3].to_string();
    }
    String::new()
}

/// The full agent string used when matching tree artifacts by substring:
/// everything after the second underscore token, re-joined with dashes.
pub fn full_agent_label(experiment_dir_name: &str) -> String {
    experiment_dir_name
        .split('_')
        .skip(2)
        .collect::<Vec<_>>()
        .join("-")
}

/// Classifies an experiment path against the display-name rule table.
/// Unmatched paths resolve to the sentinel rather than failing the run.
pub fn display_name(experiment_path: &str) -> String {
    let lower = experiment_path.to_lowercase();
    for (needles, name) in DISPLAY_NAME_RULES {
        if needles.iter().any(|needle| lower.contains(needle)) {
            return (*name).to_string();
        }
    }
    tracing::warn!(path = experiment_path, "could not identify model from path");
    UNKNOWN_MODEL.to_string()
}
