//! Resume screener: job description vs resume similarity and skill gap report

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction, SkillsAction};
use resume_screener::config::Config;
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::{DocumentKind, InputManager};
use resume_screener::output::formatter::{save_report_to_file, ReportGenerator};
use resume_screener::output::AnalysisReport;
use resume_screener::processing::analyzer::AnalysisEngine;
use resume_screener::processing::document::DocumentRole;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    // Reset and Path must work even when the existing file is unreadable
    let config_file = Config::resolve_path(cli.config.as_deref());
    match &cli.command {
        Commands::Config { action: Some(ConfigAction::Reset) } => {
            if let Err(e) = reset_config(&config_file) {
                error!("Command failed: {}", e);
                process::exit(1);
            }
            return;
        }
        Commands::Config { action: Some(ConfigAction::Path) } => {
            println!("{}", config_file.display());
            return;
        }
        _ => {}
    }

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn reset_config(path: &Path) -> Result<()> {
    println!("Resetting configuration at {} to defaults...", path.display());
    Config::reset_at(path)?;
    println!("Configuration reset successfully!");
    Ok(())
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            jd,
            resume,
            output,
            save,
            preview,
            no_color,
        } => {
            info!("Starting resume screening analysis");

            // Validate input files
            cli::validate_file_extension(&jd, &DocumentKind::SUPPORTED_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;

            cli::validate_file_extension(&resume, &DocumentKind::SUPPORTED_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;

            // Parse output format
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ScreenerError::InvalidInput)?,
                None => config.output.format,
            };

            let use_colors = config.output.color_output && !no_color;
            if !use_colors {
                colored::control::set_override(false);
            }

            let started = Instant::now();

            let input_manager = InputManager::new();
            let jd_doc = input_manager.load_document(&jd, DocumentRole::JobDescription).await?;
            let resume_doc = input_manager.load_document(&resume, DocumentRole::Resume).await?;

            let engine = AnalysisEngine::new(&config)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Analyzing resume against job description...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let analysis = engine.analyze_documents(&jd_doc, &resume_doc);
            spinner.finish_and_clear();
            let result = analysis?;

            let report = AnalysisReport::new(
                result,
                jd.to_string_lossy(),
                resume.to_string_lossy(),
                started.elapsed().as_millis() as u64,
                engine.skill_matcher().skill_count(),
            );

            let generator = ReportGenerator::with_options(use_colors, preview, config.output.pretty_json);
            let rendered = generator.generate_report(&report, &output_format)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                // Saved reports never carry terminal color codes
                let plain = ReportGenerator::with_options(false, preview, config.output.pretty_json)
                    .generate_report(&report, &output_format)?;
                save_report_to_file(&plain, &save_path)?;
                info!("Report saved to {}", save_path.display());
            }
        }

        Commands::Skills { action } => match action {
            SkillsAction::List => {
                let vocabulary = config.vocabulary();
                println!("Skill vocabulary ({} terms)\n", vocabulary.unique_count());

                let mut seen = std::collections::HashSet::new();
                for term in vocabulary.iter().filter(|t| seen.insert(*t)) {
                    if term.contains(' ') {
                        println!("  • {} (multi-word, substring match)", term);
                    } else {
                        println!("  • {}", term);
                    }
                }
            }
        },

        Commands::Config { action } => {
            // Reset and Path are dispatched in main before the config is loaded
            if let Some(ConfigAction::Show) | None = action {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("Current Configuration\n");
                println!("{}", content);
            }
        }
    }

    Ok(())
}
