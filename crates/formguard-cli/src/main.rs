//! formguard CLI
//!
//! Replays scripted user input against a registration form fixture and
//! reports what the validation widget shows.

mod fixture;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use formguard::document::MemoryDocument;
use formguard::{
    BootstrapTooltips, Document, FormConfig, FormController, FormState, Lifecycle, SubmitOutcome,
    ValidationModel, Violation,
};

use crate::fixture::{Fixture, Handles, Step};

/// Client-side registration form validation, replayed headless.
#[derive(Parser)]
#[command(name = "formguard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file overriding the default form config.
    #[arg(short, long, global = true, env = "FORMGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the fixture form once and print the violations.
    Check {
        /// Fixture file.
        fixture: PathBuf,
    },

    /// Run the fixture's script and print the final form state.
    Replay {
        /// Fixture file.
        fixture: PathBuf,
    },
}

type Controller = FormController<MemoryDocument, BootstrapTooltips>;

#[derive(Serialize)]
struct CheckReport {
    accepted: bool,
    violations: Vec<Violation>,
}

#[derive(Serialize)]
struct ReplayReport {
    lifecycle: Lifecycle,
    state: FormState,
    errors: BTreeMap<String, String>,
    tooltips: BTreeMap<String, String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            FormConfig::from_file(path)?
        }
        None => FormConfig::default(),
    };

    match cli.command {
        Commands::Check { fixture } => {
            let (mut controller, handles, _) = load(&fixture, config)?;
            let outcome = submit(&mut controller, &handles)?;
            let report = CheckReport {
                accepted: outcome.is_accepted(),
                violations: outcome.violations().to_vec(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Replay { fixture } => {
            let (mut controller, handles, script) = load(&fixture, config)?;
            if script.is_empty() {
                info!("Fixture has no script; nothing to replay.");
            }

            for (index, step) in script.iter().enumerate() {
                debug!(index = index + 1, ?step, "replaying");
                match step {
                    Step::Submit => match submit(&mut controller, &handles)? {
                        SubmitOutcome::Accepted => info!("Submit accepted."),
                        SubmitOutcome::Blocked(violations) => {
                            info!("Submit blocked by {} violation(s).", violations.len());
                        }
                    },
                    Step::KeyUp { field, value } => {
                        let element = handles.field(field)?;
                        let events = controller.document_mut().key_up(element, value.as_str());
                        for mut event in events {
                            controller.dispatch(&mut event);
                        }
                        info!("Typed {:?} into {}.", value, field);
                    }
                }
            }

            let report = report(&controller, &handles);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn load(path: &Path, config: FormConfig) -> anyhow::Result<(Controller, Handles, Vec<Step>)> {
    let fixture = Fixture::from_file(path)?;
    let (controller, handles) = mount(&fixture, config)?;
    info!(
        "Loaded {} field(s) from {}",
        handles.fields.len(),
        path.display()
    );
    Ok((controller, handles, fixture.script))
}

/// Builds the fixture for `config` and initializes a controller over it.
fn mount(fixture: &Fixture, config: FormConfig) -> anyhow::Result<(Controller, Handles)> {
    let (doc, handles) = fixture.build(&config.selectors()?)?;
    let mut controller =
        FormController::with_config(ValidationModel::new(), doc, BootstrapTooltips::new(), config)?;
    controller.init();
    Ok((controller, handles))
}

/// Clicks submit and returns what the controller decided.
fn submit(controller: &mut Controller, handles: &Handles) -> anyhow::Result<SubmitOutcome> {
    let events = controller.document().click(handles.submit);
    let mut outcome = None;
    for mut event in events {
        if let Some(result) = controller.dispatch(&mut event) {
            outcome = Some(result);
        }
    }
    let Some(outcome) = outcome else {
        bail!("submit control is not bound; the form was not validated");
    };
    Ok(outcome)
}

fn report(controller: &Controller, handles: &Handles) -> ReplayReport {
    let attribute = &controller.config().error_attribute;
    let errors = handles
        .fields
        .iter()
        .filter_map(|(id, element)| {
            controller
                .document()
                .attr(*element, attribute)
                .map(|message| (id.clone(), message))
        })
        .collect();
    let tooltips = controller
        .overlay()
        .visible()
        .map(|(id, markup)| (id.to_string(), markup.to_string()))
        .collect();

    ReplayReport {
        lifecycle: controller.lifecycle(),
        state: controller.state(),
        errors,
        tooltips,
    }
}
