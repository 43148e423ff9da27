use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use scriber_register::audit::SubmissionLog;
use scriber_register::cli::{
    handle_export, handle_history, handle_reset, handle_route, handle_show, handle_steps,
    handle_submit, open_registration, parse_step,
};
use scriber_register::config::{RegisterPaths, Settings};
use scriber_register::display::format_summary;
use scriber_register::export::ExportFormat;
use scriber_register::logging::init_logging;
use scriber_register::tui::{run_wizard, App};
use scriber_register::wizard::StepRoute;

#[derive(Parser)]
#[command(
    name = "scriber-register",
    version,
    about = "Terminal registration wizard for Scriber",
    long_about = "Walks a new Scriber customer through a three-step registration: \
                  contact details, company profile and how they heard about Scriber. \
                  Answers are saved after every step so the wizard can be resumed."
)]
struct Cli {
    /// Force debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive wizard (default)
    #[command(alias = "tui")]
    Start {
        /// Step number or id to open
        #[arg(short, long, conflicts_with = "route")]
        step: Option<String>,
        /// Register path to open, e.g. /account/register/steps/2
        #[arg(short, long)]
        route: Option<String>,
    },

    /// List the steps with field visibility and Continue state
    Steps {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the saved answers
    Show,

    /// Submit a step without the TUI
    Submit {
        /// Step number, step id or register path
        step: String,
        /// Field values as key=value
        #[arg(value_name = "KEY=VALUE")]
        values: Vec<String>,
    },

    /// Resolve a register path to its canonical form
    Route {
        /// Path such as /account/register/step-2
        path: String,
    },

    /// Export the saved answers
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show recent step submissions
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Clear the saved answers
    Reset {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Write the settings file with defaults if it does not exist
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = RegisterPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let is_tui = matches!(cli.command, None | Some(Commands::Start { .. }));
    let logging = init_logging(&paths, &settings, is_tui, cli.debug)?;

    match cli.command.unwrap_or(Commands::Start {
        step: None,
        route: None,
    }) {
        Commands::Start { step, route } => {
            let route = match (step, route) {
                (Some(step), _) => parse_step(&step)?,
                (None, Some(path)) => StepRoute::parse(&path)?,
                (None, None) => StepRoute::first(),
            };

            let registration = open_registration(&paths, &settings)?;
            let mut app = App::new(registration, route, settings.strict_patterns)
                .with_submission_log(SubmissionLog::new(paths.submission_log()));

            run_wizard(&mut app)?;

            if app.completed {
                print!("{}", format_summary(&app.store.persisted()));
            } else {
                println!("Progress saved. Resume with:");
                println!("  scriber-register start --step {}", app.route.number());
            }
            if let Some(log_file) = &logging.log_file_path {
                println!("Log: {}", log_file.display());
            }
        }

        Commands::Steps { json } => {
            let registration = open_registration(&paths, &settings)?;
            handle_steps(&registration, &settings, json)?;
        }

        Commands::Show => {
            let registration = open_registration(&paths, &settings)?;
            handle_show(&registration)?;
        }

        Commands::Submit { step, values } => {
            let mut registration = open_registration(&paths, &settings)?;
            handle_submit(&mut registration, &paths, &settings, &step, &values)?;
        }

        Commands::Route { path } => handle_route(&path)?,

        Commands::Export { format, output } => {
            let registration = open_registration(&paths, &settings)?;
            handle_export(&registration, &settings, format, output.as_deref())?;
        }

        Commands::History { limit } => handle_history(&paths, limit)?,

        Commands::Reset { force } => {
            let mut registration = open_registration(&paths, &settings)?;
            handle_reset(&mut registration, force)?;
        }

        Commands::Config { init } => {
            if init {
                if paths.settings_file().exists() {
                    println!("Settings file already exists; leaving it unchanged.");
                } else {
                    settings.save(&paths)?;
                    println!("Wrote default settings to {}", paths.settings_file().display());
                }
                println!();
            }

            println!("scriber-register Configuration");
            println!("==============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Local store:      {}", paths.local_store_file().display());
            println!("Submission log:   {}", paths.submission_log().display());
            println!("Logs directory:   {}", paths.logs_dir().display());
            println!();
            println!("Settings:");
            println!("  Storage key:     {}", settings.storage_key);
            println!("  Strict patterns: {}", settings.strict_patterns);
            println!("  Log level:       {}", settings.logging.level);
            println!("  Log to file:     {}", settings.logging.to_file);
        }
    }

    Ok(())
}
