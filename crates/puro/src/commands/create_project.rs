//! `puro create-project` command
//!
//! Downloads a template archive into `<target>/.puro`, extracts it into the
//! target directory and installs the project's dependencies.

use anyhow::{Context, Result};
use puro_core::types::{ExitStatusPolicy, RuntimeConfig};
use puro_core::HierarchicalConfigLoader;
use puro_scaffold::{CreateProjectCommand, CreateProjectOptions, CreateProjectReport};
use tracing::debug;

use crate::cli::CreateProjectArgs;
use crate::output;

/// Run the create-project command
pub async fn run(args: CreateProjectArgs) -> Result<()> {
    let config = HierarchicalConfigLoader::new()
        .and_then(|loader| loader.load_runtime_config())
        .context("Failed to load configuration")?;

    let options = build_options(&args, &config);
    debug!("Create-project options: {:?}", options);

    output::header("Create Project");
    output::kv("Location", args.target_dir.as_str());
    output::kv("Template", &options.template);
    println!();

    let command =
        CreateProjectCommand::new(options).context("Failed to initialize project scaffolding")?;
    let report = command.run(&args.target_dir).await?;

    print_summary(&report);
    Ok(())
}

/// Apply command-line flags on top of the resolved configuration
fn build_options(args: &CreateProjectArgs, config: &RuntimeConfig) -> CreateProjectOptions {
    let mut options = CreateProjectOptions::from_config(config).with_template(args.template.clone());

    if args.skip_install {
        options = options.with_install(false);
    }
    if args.strict_install {
        options = options.with_exit_status(ExitStatusPolicy::Fail);
    }
    if args.clean {
        options = options.with_keep_archive(false);
    }
    if let Some(program) = &args.package_manager {
        options = options.with_package_manager(program.clone());
    }

    options
}

fn print_summary(report: &CreateProjectReport) {
    println!();
    output::success(&format!(
        "Project created in {}",
        report.context.target_dir()
    ));
    output::kv("Template", report.context.template());
    output::kv("Source", report.context.archive_url());
    output::kv("Entries extracted", &report.extracted.written().to_string());
    if report.archive_kept {
        output::kv("Archive", report.context.archive_path().as_str());
    }

    match &report.install {
        Some(install) if install.success => {
            output::success(&format!("Dependencies installed with {}", install.program));
        }
        Some(install) => {
            let status = install
                .exit_code
                .map(|code| format!("exit code {}", code))
                .unwrap_or_else(|| "a signal".to_string());
            output::warning(&format!(
                "{} finished with {}; dependencies may be incomplete",
                install.program, status
            ));
        }
        None => output::info("Skipped dependency installation"),
    }
}
