//! `onboard summary` - render the submission carried by a hand-off link

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{effective_format, read_link, today};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::handoff::{self, NO_DATA_MESSAGE};
use crate::core::{Config, Directory, Summary};
use crate::schema::TemplateGenerator;

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Summary link printed by `onboard new` (`-` reads it from stdin)
    pub link: String,

    /// Write the summary to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = effective_format(global, &config);
    let link = read_link(&args.link)?;

    let submission = match handoff::decode(&link) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!(error = %e, "no usable submission in link");
            println!("{}", NO_DATA_MESSAGE);
            return Ok(());
        }
    };

    let directory = Directory::from_config(&config).into_diagnostic()?;
    let today = today();
    let summary = Summary::build(&submission, &directory, today);

    let content = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&summary).into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yml::to_string(&summary).into_diagnostic()?,
        OutputFormat::Md => {
            let generator = TemplateGenerator::new().into_diagnostic()?;
            generator.generate_summary(&summary, today).into_diagnostic()?
        }
        OutputFormat::Auto => render_terminal(&summary),
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, content).into_diagnostic()?;
            if !global.quiet {
                println!(
                    "{} Summary written to {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Styled plain-text rendering
pub fn render_terminal(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", style("Employee Onboarding Summary").bold()));

    for section in &summary.sections {
        out.push('\n');
        out.push_str(&format!("{}\n", style(&section.title).cyan().bold()));
        out.push_str(&format!("{}\n", style("─".repeat(50)).dim()));

        let width = section
            .fields
            .iter()
            .map(|f| f.label.chars().count())
            .max()
            .unwrap_or(0);
        for field in &section.fields {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                field.label,
                field.value,
                width = width
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Submission;
    use chrono::NaiveDate;

    #[test]
    fn test_terminal_rendering_aligns_labels() {
        console::set_colors_enabled(false);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let summary = Summary::build(
            &Submission::sample(today),
            &Directory::embedded().unwrap(),
            today,
        );
        let text = render_terminal(&summary);

        assert!(text.starts_with("Employee Onboarding Summary\n"));
        assert!(text.contains("\nEmergency Contact\n"));
        assert!(text.contains("  Contact Name  Grace Hopper\n"));
        assert!(text.contains("  Relationship  Friend\n"));
        assert!(!text.contains("Guardian Contact"));
    }
}
