use crate::infra::{matching_service, read_json_file, OutputFormat};
use chrono::Local;
use clap::Args;
use job_matcher::error::AppError;
use job_matcher::matching::facts::describe_actual;
use job_matcher::matching::{
    CandidateProfile, Constraint, EvaluateResponse, Facts, MatchReport, PositionCatalog,
    PositionResult, Trace,
};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct PositionsArgs {
    /// Position catalog JSON file. Defaults to JOB_MATCHER_CATALOG or the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON object mapping fact keys to values
    #[arg(long)]
    pub(crate) facts: PathBuf,
    /// Position catalog JSON file. Defaults to JOB_MATCHER_CATALOG or the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the evaluation trace before the results
    #[arg(long)]
    pub(crate) trace: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file with the candidate's raw answers
    #[arg(long)]
    pub(crate) candidate: PathBuf,
    /// Position catalog JSON file. Defaults to JOB_MATCHER_CATALOG or the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_positions(args: PositionsArgs) -> Result<(), AppError> {
    let service = matching_service(args.catalog)?;
    println!("{}", render_positions(service.catalog(), args.format)?);
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let service = matching_service(args.catalog)?;
    let facts: Facts = read_json_file(&args.facts)?;

    let output = if args.trace {
        let evaluation = service.evaluate_traced(&facts);
        render_evaluation(&evaluation.results, Some(&evaluation.trace), args.format)?
    } else {
        render_evaluation(&service.evaluate(&facts), None, args.format)?
    };

    println!("{output}");
    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let service = matching_service(args.catalog)?;
    let candidate: CandidateProfile = read_json_file(&args.candidate)?;
    let report = service.assess(&candidate, Local::now().naive_local())?;

    println!("{}", render_report(&report, args.format)?);
    Ok(())
}

pub(crate) fn render_report(report: &MatchReport, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => Ok(report.to_json()?),
    }
}

pub(crate) fn render_positions(
    catalog: &PositionCatalog,
    format: OutputFormat,
) -> Result<String, AppError> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(catalog)?);
    }

    let mut out = String::new();
    writeln!(&mut out, "Position catalog ({} positions)", catalog.len())
        .expect("write catalog heading");
    for position in catalog {
        writeln!(&mut out, "\n{}", position.name).expect("write position name");
        write_constraints(&mut out, "required", &position.required);
        write_constraints(&mut out, "desired", &position.desired);
    }
    Ok(out.trim_end().to_string())
}

fn write_constraints(out: &mut String, label: &str, constraints: &[Constraint]) {
    if constraints.is_empty() {
        writeln!(out, "  {label}: none").expect("write empty pool");
        return;
    }

    writeln!(out, "  {label}:").expect("write pool heading");
    for constraint in constraints {
        writeln!(
            out,
            "    - {} {} {}: {}",
            constraint.field, constraint.operator, constraint.expected, constraint.message
        )
        .expect("write constraint");
    }
}

pub(crate) fn render_evaluation(
    results: &[PositionResult],
    trace: Option<&Trace>,
    format: OutputFormat,
) -> Result<String, AppError> {
    if format == OutputFormat::Json {
        let response = EvaluateResponse {
            qualified_count: results.iter().filter(|result| result.qualified).count(),
            results: results.to_vec(),
            trace: trace.map(Trace::lines),
        };
        return Ok(serde_json::to_string_pretty(&response)?);
    }

    let mut out = String::new();
    if let Some(trace) = trace {
        for line in trace.lines() {
            writeln!(&mut out, "{line}").expect("write trace line");
        }
        out.push('\n');
    }

    for result in results {
        let status = if result.qualified {
            "QUALIFIED"
        } else {
            "NOT QUALIFIED"
        };
        let desired = if result.has_desired_criteria() {
            format!("{:.1}%", result.desired_match_pct)
        } else {
            "n/a".to_string()
        };
        writeln!(
            &mut out,
            "{}: {status} | required {:.1}% | desired {desired} | total {:.1}%",
            result.name, result.required_match_pct, result.total_match_pct
        )
        .expect("write position outcome");
        for check in &result.required_failed {
            writeln!(
                &mut out,
                "  missing: {} (expected {}, actual {})",
                check.message,
                check.expected,
                describe_actual(check.actual.as_ref())
            )
            .expect("write missing check");
        }
    }

    Ok(out.trim_end().to_string())
}
