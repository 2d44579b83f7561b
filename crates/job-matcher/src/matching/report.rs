use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::constraint::CheckResult;
use super::facts::{describe_actual, FactValue};
use super::position::PositionResult;

const SECTION_RULE: usize = 60;
const POSITION_RULE: usize = 40;

/// Who the report was generated for, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub first_name: String,
    pub last_name: String,
    pub generated_at: NaiveDateTime,
}

/// Headline metrics across every evaluated position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub qualified_count: usize,
    pub total_positions: usize,
    pub average_required_pct: f64,
    pub average_desired_pct: f64,
}

impl MatchSummary {
    pub fn from_results(results: &[PositionResult]) -> Self {
        let total_positions = results.len();
        let qualified_count = results.iter().filter(|result| result.qualified).count();
        let average = |pct: fn(&PositionResult) -> f64| {
            if total_positions == 0 {
                0.0
            } else {
                results.iter().map(pct).sum::<f64>() / total_positions as f64
            }
        };

        Self {
            qualified_count,
            total_positions,
            average_required_pct: average(|result| result.required_match_pct),
            average_desired_pct: average(|result| result.desired_match_pct),
        }
    }
}

/// Export view of one check. `expected` is only populated for unmet criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckView {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<FactValue>,
    pub actual: Option<FactValue>,
}

impl CheckView {
    fn met(check: &CheckResult) -> Self {
        Self {
            message: check.message.clone(),
            expected: None,
            actual: check.actual.clone(),
        }
    }

    fn unmet(check: &CheckResult) -> Self {
        Self {
            message: check.message.clone(),
            expected: Some(check.expected.clone()),
            actual: check.actual.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub position: String,
    pub qualified: bool,
    pub required_match_pct: f64,
    pub desired_match_pct: f64,
    pub total_match_pct: f64,
    pub required_passed: Vec<CheckView>,
    pub required_failed: Vec<CheckView>,
    pub desired_met: Vec<CheckView>,
    pub desired_missing: Vec<CheckView>,
}

impl From<&PositionResult> for PositionReport {
    fn from(result: &PositionResult) -> Self {
        Self {
            position: result.name.clone(),
            qualified: result.qualified,
            required_match_pct: result.required_match_pct,
            desired_match_pct: result.desired_match_pct,
            total_match_pct: result.total_match_pct,
            required_passed: result.required_passed.iter().map(CheckView::met).collect(),
            required_failed: result.required_failed.iter().map(CheckView::unmet).collect(),
            desired_met: result.desired_met.iter().map(CheckView::met).collect(),
            desired_missing: result.desired_missing.iter().map(CheckView::unmet).collect(),
        }
    }
}

/// Exportable results for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub candidate: CandidateSummary,
    pub summary: MatchSummary,
    pub results: Vec<PositionReport>,
}

impl MatchReport {
    pub fn new(candidate: CandidateSummary, results: &[PositionResult]) -> Self {
        Self {
            candidate,
            summary: MatchSummary::from_results(results),
            results: results.iter().map(PositionReport::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text export suitable for download or terminal output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let candidate = &self.candidate;

        writeln!(&mut out, "JOB MATCHER RESULTS").expect("write title");
        writeln!(
            &mut out,
            "Generated: {}",
            candidate.generated_at.format("%Y-%m-%d %H:%M:%S")
        )
        .expect("write timestamp");
        writeln!(
            &mut out,
            "Candidate: {} {}",
            candidate.first_name, candidate.last_name
        )
        .expect("write candidate");
        writeln!(&mut out).expect("write spacer");
        writeln!(&mut out, "{}", "=".repeat(SECTION_RULE)).expect("write section rule");
        writeln!(&mut out).expect("write spacer");
        writeln!(&mut out, "SUMMARY").expect("write summary heading");
        writeln!(
            &mut out,
            "Qualified for: {}/{} positions",
            self.summary.qualified_count, self.summary.total_positions
        )
        .expect("write qualified count");
        writeln!(
            &mut out,
            "Average Required Match: {:.1}%",
            self.summary.average_required_pct
        )
        .expect("write required average");
        writeln!(
            &mut out,
            "Average Desired Match: {:.1}%",
            self.summary.average_desired_pct
        )
        .expect("write desired average");

        for result in &self.results {
            render_position(&mut out, result);
        }

        out
    }
}

fn render_position(out: &mut String, result: &PositionReport) {
    writeln!(out).expect("write spacer");
    writeln!(out, "{}", "-".repeat(POSITION_RULE)).expect("write position rule");
    writeln!(out, "POSITION: {}", result.position).expect("write position");
    let status = if result.qualified {
        "QUALIFIED"
    } else {
        "NOT QUALIFIED"
    };
    writeln!(out, "STATUS: {status}").expect("write status");
    writeln!(out, "Required Skills Match: {:.1}%", result.required_match_pct)
        .expect("write required match");
    writeln!(out, "Desired Skills Match: {:.1}%", result.desired_match_pct)
        .expect("write desired match");
    writeln!(out).expect("write spacer");
    writeln!(out, "Required Skills:").expect("write required heading");
    render_checks(out, &result.required_passed, &result.required_failed);

    if !result.desired_met.is_empty() || !result.desired_missing.is_empty() {
        writeln!(out).expect("write spacer");
        writeln!(out, "Desired Skills:").expect("write desired heading");
        render_checks(out, &result.desired_met, &result.desired_missing);
    }
}

fn render_checks(out: &mut String, met: &[CheckView], unmet: &[CheckView]) {
    for check in met {
        writeln!(out, "  [MET] {}", check.message).expect("write met check");
    }
    for check in unmet {
        let expected = check
            .expected
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        writeln!(
            out,
            "  [MISSING] {} (Expected: {}, Actual: {})",
            check.message,
            expected,
            describe_actual(check.actual.as_ref())
        )
        .expect("write missing check");
    }
}
