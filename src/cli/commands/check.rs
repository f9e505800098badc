//! `onboard check` - re-validate every step of a hand-off link

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{effective_format, read_link, today};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{handoff, Config, Directory, Step};
use crate::schema::{ValidationContext, ValidationError, ValidationIssue, Validator};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Summary link printed by `onboard new` (`-` reads it from stdin)
    pub link: String,

    /// Only check these steps (number or name, repeatable)
    #[arg(long, short = 's')]
    pub step: Vec<Step>,
}

/// Outcome for one step, as printed in JSON/YAML output
#[derive(Debug, Serialize)]
struct StepReport {
    step: Step,
    valid: bool,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = effective_format(global, &config);
    let link = read_link(&args.link)?;

    let submission = handoff::decode(&link).into_diagnostic()?;
    let directory = Directory::from_config(&config).into_diagnostic()?;
    let validator = Validator::default();

    // The guardian rule reads the age from the submitted personal info
    let today = today();
    let ctx = ValidationContext {
        today,
        directory: &directory,
        submitter_age: Some(submission.age_on(today)),
    };

    let steps: Vec<Step> = Step::all()
        .iter()
        .copied()
        .filter(|s| args.step.is_empty() || args.step.contains(s))
        .collect();

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for step in steps {
        let values = submission.record_value(step).into_diagnostic()?;
        let result = validator.check(step, &values, &ctx);
        if !result.valid {
            failures.push(ValidationError::new(step, &values, result.errors.clone()));
        }
        reports.push(StepReport {
            step,
            valid: result.valid,
            errors: result.errors,
            warnings: result.warnings,
        });
    }

    let failed = failures.len();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&reports).into_diagnostic()?);
        }
        OutputFormat::Auto | OutputFormat::Md => {
            for report in &reports {
                if report.valid {
                    println!("{} {}", style("✓").green(), report.step);
                } else {
                    println!(
                        "{} {} - {} error(s)",
                        style("✗").red(),
                        report.step,
                        report.errors.len()
                    );
                }
                if !global.quiet {
                    for warning in &report.warnings {
                        println!(
                            "    {} {}",
                            style("!").yellow(),
                            style(&warning.message).yellow()
                        );
                    }
                }
            }
            if !global.quiet {
                for e in failures {
                    let report = miette::Report::new(e);
                    println!("{:?}", report);
                }
            }
        }
    }

    match failed {
        0 => {
            if format == OutputFormat::Auto && !global.quiet {
                println!();
                println!("{} All steps passed validation!", style("✓").green().bold());
            }
            Ok(())
        }
        1 => Err(miette::miette!("Validation failed: 1 step has errors")),
        n => Err(miette::miette!("Validation failed: {} steps have errors", n)),
    }
}
