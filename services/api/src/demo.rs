use crate::commands::render_report;
use crate::infra::{matching_service, OutputFormat};
use chrono::Local;
use clap::Args;
use job_matcher::error::AppError;
use job_matcher::matching::intake::CERT_AWS;
use job_matcher::matching::{
    CandidateProfile, DegreeField, DegreeLevel, Education, ExperienceYears,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Position catalog JSON file. Defaults to JOB_MATCHER_CATALOG or the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the rule trace for the sample candidate.
    #[arg(long)]
    pub(crate) trace: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog,
        trace,
        format,
    } = args;

    let service = matching_service(catalog)?;
    let candidate = sample_candidate();
    let facts = candidate.facts();

    println!("Job matcher demo");
    println!(
        "Candidate {} normalised into {} facts across {} positions",
        candidate.full_name(),
        facts.len(),
        service.catalog().len()
    );

    if trace {
        println!("\nRule trace");
        for line in service.evaluate_traced(&facts).trace.lines() {
            println!("{line}");
        }
    }

    let report = service.assess(&candidate, Local::now().naive_local())?;
    println!("\n{}", render_report(&report, format)?);
    Ok(())
}

/// Recent CS graduate with a few years of Python, used by the demo command.
pub(crate) fn sample_candidate() -> CandidateProfile {
    CandidateProfile {
        first_name: "Jordan".to_string(),
        last_name: "Rivera".to_string(),
        educations: vec![Education {
            level: DegreeLevel::Bachelor,
            field: DegreeField::ComputerScience,
        }],
        courses: vec![
            "Python Programming".to_string(),
            "Software Engineering".to_string(),
            "Agile Software Development".to_string(),
        ],
        courses_other: Some("Intro to data engineering bootcamp".to_string()),
        certifications: vec![CERT_AWS.to_string()],
        certifications_other: None,
        experience: ExperienceYears {
            python: 3,
            data: 1,
            agile: 1,
            ..ExperienceYears::default()
        },
        has_git: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use job_matcher::matching::{MatchingService, PositionCatalog};
    use std::sync::Arc;

    #[test]
    fn sample_candidate_qualifies_for_python_roles() {
        let service = MatchingService::new(Arc::new(PositionCatalog::standard()));
        let generated_at = NaiveDate::from_ymd_opt(2025, 10, 1)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .expect("valid timestamp");

        let report = service
            .assess(&sample_candidate(), generated_at)
            .expect("sample candidate is valid");

        let qualified: Vec<_> = report
            .results
            .iter()
            .filter(|position| position.qualified)
            .map(|position| position.position.as_str())
            .collect();
        assert_eq!(qualified, ["Entry-Level Python Engineer", "Python Engineer"]);
        assert_eq!(report.results[1].desired_match_pct, 100.0);
    }
}
