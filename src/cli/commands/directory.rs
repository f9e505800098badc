//! `onboard directory` - list the reference data the wizard offers

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{effective_format, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Directory};
use crate::entities::Department;

#[derive(Subcommand, Debug)]
pub enum DirectoryCommands {
    /// List managers new hires can report to
    Managers(DepartmentFilter),

    /// List the skills offered per department
    Skills(DepartmentFilter),

    /// List emergency contact relationships
    Relationships,
}

#[derive(clap::Args, Debug)]
pub struct DepartmentFilter {
    /// Only show one department (Engineering, Marketing, Sales, HR, Finance)
    #[arg(long, short = 'd')]
    pub department: Option<Department>,
}

pub fn run(cmd: DirectoryCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let directory = Directory::from_config(&config).into_diagnostic()?;
    let format = effective_format(global, &config);

    match cmd {
        DirectoryCommands::Managers(filter) => list_managers(&directory, filter.department, format),
        DirectoryCommands::Skills(filter) => list_skills(&directory, filter.department, format),
        DirectoryCommands::Relationships => list_relationships(&directory, format),
    }
}

fn list_managers(directory: &Directory, department: Option<Department>, format: OutputFormat) -> Result<()> {
    let managers: Vec<_> = match department {
        Some(dept) => directory.managers_in(dept).collect(),
        None => directory.managers().iter().collect(),
    };

    match format {
        OutputFormat::Json => print_json(&managers),
        OutputFormat::Yaml => print_yaml(&managers),
        OutputFormat::Auto | OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Name", "Department"]);
            for manager in &managers {
                builder.push_record([
                    manager.id.as_str(),
                    manager.name.as_str(),
                    manager.department.as_str(),
                ]);
            }
            print_table(builder, format);
            Ok(())
        }
    }
}

fn list_skills(directory: &Directory, department: Option<Department>, format: OutputFormat) -> Result<()> {
    let departments: Vec<Department> = match department {
        Some(dept) => vec![dept],
        None => Department::all().to_vec(),
    };
    let catalog: BTreeMap<&str, &[String]> = departments
        .iter()
        .map(|d| (d.as_str(), directory.skills_for(*d)))
        .collect();

    match format {
        OutputFormat::Json => print_json(&catalog),
        OutputFormat::Yaml => print_yaml(&catalog),
        OutputFormat::Auto | OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["Department", "Skills"]);
            for dept in &departments {
                let skills = directory.skills_for(*dept).join(", ");
                let skills = if format == OutputFormat::Auto {
                    truncate_str(&skills, 72)
                } else {
                    skills
                };
                builder.push_record([dept.as_str().to_string(), skills]);
            }
            print_table(builder, format);
            Ok(())
        }
    }
}

fn list_relationships(directory: &Directory, format: OutputFormat) -> Result<()> {
    let relationships = directory.relationships();
    match format {
        OutputFormat::Json => print_json(&relationships),
        OutputFormat::Yaml => print_yaml(&relationships),
        OutputFormat::Auto | OutputFormat::Md => {
            for relationship in relationships {
                if format == OutputFormat::Md {
                    println!("- {}", relationship);
                } else {
                    println!("{}", relationship);
                }
            }
            Ok(())
        }
    }
}

fn print_table(builder: Builder, format: OutputFormat) {
    let mut table = builder.build();
    if format == OutputFormat::Md {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    println!("{}", table);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    print!("{}", serde_yml::to_string(value).into_diagnostic()?);
    Ok(())
}
