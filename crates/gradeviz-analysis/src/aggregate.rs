use crate::identity::RunIdentity;
use std::cmp::Ordering;
use std::path::PathBuf;

/// Everything extracted from one result file for the comparison views.
/// Created once per discovered file and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub identity: RunIdentity,
    pub display_name: String,
    /// Full agent string kept for best-effort artifact matching.
    pub full_agent: String,
    pub final_score: f64,
    /// Named sub-task scores in traversal order. Names are not guaranteed
    /// unique; a later duplicate overwrites the earlier score in place.
    pub sub_scores: Vec<(String, f64)>,
    pub source: PathBuf,
}

impl RunRecord {
    /// Records a sub-task score, keeping first-seen insertion order and
    /// last-write-wins on duplicate names.
    pub fn record_sub_score(&mut self, name: &str, score: f64) {
        if let Some(entry) = self.sub_scores.iter_mut().find(|(n, _)| n == name) {
            entry.1 = score;
        } else {
            self.sub_scores.push((name.to_string(), score));
        }
    }

    pub fn sub_score(&self, name: &str) -> Option<f64> {
        self.sub_scores
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| *s)
    }
}

/// Ranks records by final score, highest first. The sort is stable, so ties
/// keep file-discovery order. Input is left untouched.
pub fn rank(records: &[RunRecord]) -> Vec<RunRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Expected display names with no matching record. Reported, never fatal.
pub fn missing_expected(records: &[RunRecord], expected: &[String]) -> Vec<String> {
    expected
        .iter()
        .filter(|name| !records.iter().any(|r| &r.display_name == *name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str, display: &str, score: f64) -> RunRecord {
        RunRecord {
            identity: RunIdentity {
                model_name: model.to_string(),
                agent_label: "agent".to_string(),
            },
            display_name: display.to_string(),
            full_agent: String::new(),
            final_score: score,
            sub_scores: Vec::new(),
            source: PathBuf::from(format!("{model}/pb_result.json")),
        }
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let records = vec![
            record("first", "A", 0.8),
            record("second", "B", 0.8),
            record("third", "C", 0.3),
        ];
        let ranked = rank(&records);
        let order: Vec<&str> = ranked.iter().map(|r| r.identity.model_name.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
        // Input untouched.
        assert_eq!(records[2].identity.model_name, "third");
    }

    #[test]
    fn ranking_sorts_descending() {
        let ranked = rank(&[record("low", "A", 0.1), record("high", "B", 0.9)]);
        assert_eq!(ranked[0].identity.model_name, "high");
        assert_eq!(ranked[1].identity.model_name, "low");
    }

    #[test]
    fn duplicate_sub_task_names_keep_the_last_score() {
        // Matches the original aggregation's mapping semantics: a repeated
        // name overwrites in place, order of first appearance preserved.
        let mut rec = record("m", "A", 0.5);
        rec.record_sub_score("Code", 0.2);
        rec.record_sub_score("Paper", 0.9);
        rec.record_sub_score("Code", 0.7);
        assert_eq!(rec.sub_score("Code"), Some(0.7));
        assert_eq!(rec.sub_scores.len(), 2);
        assert_eq!(rec.sub_scores[0].0, "Code");
        assert_eq!(rec.sub_scores[1].0, "Paper");
    }

    #[test]
    fn completeness_check_reports_missing_names() {
        let records = vec![record("m", "Claude 3.7", 0.5)];
        let expected = vec!["Claude 3.7".to_string(), "GPT-4o".to_string()];
        assert_eq!(missing_expected(&records, &expected), vec!["GPT-4o"]);
        assert!(missing_expected(&records, &expected[..1]).is_empty());
    }
}
