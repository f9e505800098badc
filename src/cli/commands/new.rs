//! `onboard new` - run the onboarding wizard
//!
//! Interactive by default. With `--answers FILE` the same controller is fed
//! from a YAML or JSON document holding one object per step, keyed by
//! `personalInfo`, `jobDetails`, `skills`, `emergencyContact` and `review`.

use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use miette::{IntoDiagnostic, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use url::Url;

use crate::cli::helpers::{effective_format, print_warnings, today};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Directory, Step, WizardController, WizardError};
use crate::schema::{StepPrompter, ValidationIssue, Validator};

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Answers document (YAML or JSON) to submit without prompting
    #[arg(long, short = 'a')]
    pub answers: Option<PathBuf>,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let directory = Directory::from_config(&config).into_diagnostic()?;
    let base_url = config.base_url().into_diagnostic()?;
    let mut wizard = WizardController::new(Validator::default(), directory, today(), base_url);

    let outcome = match &args.answers {
        Some(path) => run_answers(&mut wizard, path)?,
        None => match run_interactive(&mut wizard, global)? {
            Some(outcome) => outcome,
            None => {
                if !global.quiet {
                    println!("{} Onboarding cancelled", style("✗").yellow());
                }
                return Ok(());
            }
        },
    };

    if !global.quiet {
        print_warnings(&outcome.warnings);
    }
    print_link(&outcome, effective_format(global, &config), global.quiet)
}

/// A submitted wizard
struct Submitted {
    link: Url,
    warnings: Vec<ValidationIssue>,
}

fn print_link(outcome: &Submitted, format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "link": outcome.link.as_str(),
                "warnings": outcome.warnings,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            let yaml = serde_json::json!({
                "link": outcome.link.as_str(),
                "warnings": outcome.warnings,
            });
            print!("{}", serde_yml::to_string(&yaml).into_diagnostic()?);
        }
        OutputFormat::Md => println!("[Employee information]({})", outcome.link),
        OutputFormat::Auto => {
            if quiet {
                println!("{}", outcome.link);
            } else {
                println!(
                    "{} Employee onboarding completed successfully.",
                    style("✓").green().bold()
                );
                println!("{}", outcome.link);
            }
        }
    }
    Ok(())
}

/// Feed every step from an answers document
fn run_answers(wizard: &mut WizardController, path: &Path) -> Result<Submitted> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
    let answers: Value = serde_yml::from_str(&content)
        .map_err(|e| miette::miette!("Failed to parse {}: {}", path.display(), e))?;
    if !answers.is_object() {
        return Err(miette::miette!(
            "{} must map step names to their answers",
            path.display()
        ));
    }

    let mut warnings = Vec::new();
    loop {
        let step = wizard.current_step();
        let values = match answers.get(step.key()) {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(miette::miette!(
                    "Answers for '{}' must be a mapping",
                    step.key()
                ))
            }
        };
        wizard.set_values(values);

        if step.is_last() {
            let link = wizard.submit()?;
            return Ok(Submitted { link, warnings });
        }
        let advance = wizard.next_step()?;
        warnings.extend(advance.warnings);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Submit,
    Back,
    Edit,
    Jump,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Next => "Next",
            Action::Submit => "Submit",
            Action::Back => "Back",
            Action::Edit => "Edit this step again",
            Action::Jump => "Jump to step...",
            Action::Quit => "Quit",
        }
    }
}

/// Prompt step by step until the wizard is submitted or abandoned
fn run_interactive(wizard: &mut WizardController, global: &GlobalOpts) -> Result<Option<Submitted>> {
    let theme = ColorfulTheme::default();
    let prompter = StepPrompter::new();
    let mut warnings = Vec::new();
    let mut needs_input = true;

    loop {
        let step = wizard.current_step();
        if needs_input {
            print_header(wizard, global.quiet);
            let values = prompter.prompt_step(wizard, step)?;
            wizard.set_values(values);
        }
        needs_input = true;

        let mut actions = vec![if step.is_last() { Action::Submit } else { Action::Next }];
        if step.prev().is_some() {
            actions.push(Action::Back);
        }
        actions.push(Action::Edit);
        if !wizard.completed_steps().is_empty() {
            actions.push(Action::Jump);
        }
        actions.push(Action::Quit);

        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;

        match actions[choice] {
            Action::Next => match wizard.next_step() {
                Ok(advance) => {
                    print_warnings(&advance.warnings);
                    warnings.extend(advance.warnings);
                }
                Err(e) => {
                    show_recoverable(e)?;
                    needs_input = false;
                }
            },
            Action::Submit => match wizard.submit() {
                Ok(link) => return Ok(Some(Submitted { link, warnings })),
                Err(e) => {
                    show_recoverable(e)?;
                    needs_input = false;
                }
            },
            Action::Back => {
                wizard.prev_step();
            }
            Action::Edit => {}
            Action::Jump => {
                let reachable: Vec<Step> = Step::all()
                    .iter()
                    .copied()
                    .filter(|s| s.number() <= wizard.completed_steps().len() + 1)
                    .collect();
                let labels: Vec<String> = reachable
                    .iter()
                    .map(|s| format!("{}. {}", s.number(), s.title()))
                    .collect();
                let pick = Select::with_theme(&theme)
                    .with_prompt("Go to step")
                    .items(&labels)
                    .default(0)
                    .interact()
                    .into_diagnostic()?;
                wizard.go_to_step(reachable[pick].number());
            }
            Action::Quit => return Ok(None),
        }
    }
}

/// Show a failure the user can fix by editing the step; anything else ends the wizard
fn show_recoverable(error: WizardError) -> Result<()> {
    match error {
        WizardError::Validation(_) | WizardError::Unconfirmed => {
            eprintln!("{:?}", miette::Report::new(error));
            Ok(())
        }
        other => Err(other.into()),
    }
}

fn print_header(wizard: &WizardController, quiet: bool) {
    if quiet {
        return;
    }
    let step = wizard.current_step();

    println!();
    println!(
        "{} Step {} of {}: {}  {}",
        style("◆").cyan(),
        step.number(),
        Step::COUNT,
        style(step.title()).bold(),
        style(format!("{}% complete", wizard.progress_percent())).dim()
    );
    let trail: Vec<String> = Step::all()
        .iter()
        .map(|s| {
            let label = format!("{}", s.number());
            if *s == step {
                style(label).cyan().bold().to_string()
            } else if wizard.is_completed(*s) {
                style(format!("{}✓", s.number())).green().to_string()
            } else {
                style(label).dim().to_string()
            }
        })
        .collect();
    println!("  {}", trail.join(" ─ "));
    println!("  {}", style(step.description()).dim());
    println!("{}", style("─".repeat(50)).dim());
}
