mod logging;
mod output;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};
use walsa_catalog::{MethodCatalog, MethodLookup};
use walsa_core::{
    CatalogGroup, ConfigManager, MethodKey, SelectionEvent, SelectionState, WalsaConfig,
    WalsaError, LOCAL_CONFIG_FILE,
};
use walsa_resolver::{
    DisplayPayload, ParameterTable, ParameterTableRenderer, SelectionResolver, Session,
};

use output::{CommandOutput, MethodDetail, MethodSummary, OutputFormat};

/// Where rendered command output goes. Shared so a display sink can write
/// each payload as soon as it is produced.
type OutputStream = Rc<RefCell<dyn Write>>;

#[derive(Parser)]
#[command(name = "walsa-params")]
#[command(about = "WaLSAtools parameter browser - calling sequences and parameter tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (pretty, json, table, html); defaults to the configured one
    #[arg(short, long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Configuration file to load instead of the default search
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Method catalog (TOML or JSON) replacing the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select options and print the calling sequence and parameter table
    Resolve {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Apply field=value events one at a time, printing the result of each
    Replay {
        /// Events such as category=a, dataType=2 or subMethod= (unset)
        #[arg(required = true)]
        events: Vec<String>,

        /// Print only the result of the last event
        #[arg(long)]
        final_only: bool,
    },

    /// Show the dropdown controls for a partial selection
    Options {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Inspect the method catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Write a default configuration file
    InitConfig {
        /// Destination, ./.walsa-params.toml by default
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List catalogued methods
    List {
        /// Only this group (single_series or cross_correlation)
        #[arg(short, long)]
        group: Option<CatalogGroup>,
    },

    /// Show the return values and parameters of one method
    Show {
        /// Method key, e.g. lombscargle or komega
        method: MethodKey,

        /// Group to read; by default single_series is searched first
        #[arg(short, long)]
        group: Option<CatalogGroup>,
    },

    /// Check that every dropdown option resolves to a descriptor
    Validate {
        /// Exit with an error when an option is unresolved
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct SelectionArgs {
    /// Category: a (single series) or b (cross-correlation)
    #[arg(long)]
    category: Option<String>,

    /// Data type: 1 (1D signal) or 2 (3D datacube)
    #[arg(short, long)]
    data_type: Option<String>,

    /// Analysis method key, e.g. fft or dominantfreq
    #[arg(short, long)]
    method: Option<String>,

    /// Sub-method used with dominantfreq over a datacube
    #[arg(short, long)]
    sub_method: Option<String>,
}

impl SelectionArgs {
    /// Events for the given fields, upstream first.
    fn events(&self) -> Vec<SelectionEvent> {
        let mut events = Vec::new();
        if let Some(value) = &self.category {
            events.push(SelectionEvent::category(value.as_str()));
        }
        if let Some(value) = &self.data_type {
            events.push(SelectionEvent::data_type(value.as_str()));
        }
        if let Some(value) = &self.method {
            events.push(SelectionEvent::analysis_method(value.as_str()));
        }
        if let Some(value) = &self.sub_method {
            events.push(SelectionEvent::sub_method(value.as_str()));
        }
        events
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Writing a fresh config must not depend on the current one parsing.
    if let Commands::InitConfig { path, force } = &cli.command {
        let path = path.clone().unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
        let message = init_config(&path, *force)?;
        println!("{}", message.green());
        return Ok(());
    }

    let manager = match &cli.config {
        Some(path) => ConfigManager::load_from(path),
        None => ConfigManager::load(),
    }
    .context("Failed to load configuration")?;
    let config = manager.config();

    logging::init(&config.logging, cli.verbose);
    manager.log_summary();
    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let format = match cli.output {
        Some(format) => format,
        None => OutputFormat::from_config(&config.output.format)?,
    };
    debug!(
        config_path = ?manager.config_path(),
        format = ?format,
        "Starting walsa-params"
    );

    let out: OutputStream = Rc::new(RefCell::new(std::io::stdout()));
    execute_command(cli, config, format, &out)
}

/// Runs a subcommand, writing everything it renders to `out`.
fn execute_command(
    cli: &Cli,
    config: &WalsaConfig,
    format: OutputFormat,
    out: &OutputStream,
) -> Result<()> {
    match &cli.command {
        Commands::Resolve { selection } => {
            let catalog = load_catalog(cli, config, config.catalog.strict)?;
            let mut session = Session::new(catalog);
            let payload = session
                .apply_all(&selection.events())
                .context("Selection rejected")?;
            emit(out, format, &CommandOutput::Payload(payload))
        }
        Commands::Replay { events, final_only } => {
            let events = events
                .iter()
                .map(|raw| {
                    raw.parse::<SelectionEvent>()
                        .with_context(|| format!("Invalid event '{}'", raw))
                })
                .collect::<Result<Vec<_>>>()?;
            replay(cli, config, format, out, &events, *final_only)
        }
        Commands::Options { selection } => {
            let resolver = SelectionResolver::new();
            let mut state = SelectionState::new();
            for event in selection.events() {
                state = resolver
                    .apply(&state, &event)
                    .with_context(|| format!("Event '{}' rejected", event))?;
            }
            let controls = resolver.resolve(&state).into_controls();
            emit(out, format, &CommandOutput::Controls(controls))
        }
        Commands::Catalog(cmd) => execute_catalog_command(cli, config, format, out, cmd),
        // Handled before configuration is loaded
        Commands::InitConfig { .. } => Ok(()),
    }
}

fn replay(
    cli: &Cli,
    config: &WalsaConfig,
    format: OutputFormat,
    out: &OutputStream,
    events: &[SelectionEvent],
    final_only: bool,
) -> Result<()> {
    let catalog = load_catalog(cli, config, config.catalog.strict)?;
    let mut session = Session::new(catalog);

    if final_only {
        let payload = session.apply_all(events).context("Selection rejected")?;
        return emit(out, format, &CommandOutput::Payload(payload));
    }

    let sink_out = Rc::clone(out);
    session.add_sink(move |payload: &DisplayPayload| -> walsa_core::Result<()> {
        emit(&sink_out, format, &CommandOutput::Payload(payload.clone()))
            .map_err(|e| WalsaError::InvalidOperation(e.to_string()))
    });
    for event in events {
        session
            .apply(event)
            .with_context(|| format!("Event '{}' rejected", event))?;
    }
    info!(events = session.events_applied(), "Replay finished");
    Ok(())
}

fn execute_catalog_command(
    cli: &Cli,
    config: &WalsaConfig,
    format: OutputFormat,
    out: &OutputStream,
    cmd: &CatalogCommands,
) -> Result<()> {
    match cmd {
        CatalogCommands::List { group } => {
            let catalog = load_catalog(cli, config, config.catalog.strict)?;
            let groups = match group {
                Some(group) => vec![*group],
                None => CatalogGroup::ALL.to_vec(),
            };
            let methods = groups
                .into_iter()
                .flat_map(|group| {
                    catalog
                        .methods(group)
                        .into_iter()
                        .map(move |method| (group, method))
                })
                .filter_map(|(group, method)| {
                    catalog
                        .descriptor(group, method)
                        .map(|descriptor| MethodSummary {
                            group,
                            method,
                            label: method.label(),
                            parameters: descriptor.parameters.len(),
                            return_values: descriptor.return_values_text(),
                        })
                })
                .collect();
            emit(out, format, &CommandOutput::Methods(methods))
        }
        CatalogCommands::Show { method, group } => {
            let catalog = load_catalog(cli, config, config.catalog.strict)?;
            let detail = match group {
                Some(group) => MethodDetail {
                    group: *group,
                    method: *method,
                    return_values: catalog.return_values_text(*group, *method),
                    parameters: match catalog.descriptor(*group, *method) {
                        Some(descriptor) => ParameterTable::Rows(
                            descriptor.parameters.iter().map(Into::into).collect(),
                        ),
                        None => ParameterTable::Unavailable,
                    },
                },
                None => {
                    let group = CatalogGroup::ALL
                        .iter()
                        .copied()
                        .find(|&g| catalog.descriptor(g, *method).is_some())
                        .unwrap_or(CatalogGroup::SingleSeries);
                    MethodDetail {
                        group,
                        method: *method,
                        return_values: catalog.return_values_text(group, *method),
                        parameters: ParameterTableRenderer::new(&catalog).render(*method),
                    }
                }
            };
            emit(out, format, &CommandOutput::Method(detail))
        }
        CatalogCommands::Validate { strict } => {
            // Load leniently so the report can be printed before failing.
            let catalog = load_catalog(cli, config, false)?;
            let report = catalog.validate();
            let clean = report.is_clean();
            emit(out, format, &CommandOutput::Validation(report))?;
            if !clean && (*strict || config.catalog.strict) {
                bail!("catalog has unresolved options (strict mode)");
            }
            Ok(())
        }
    }
}

fn load_catalog(cli: &Cli, config: &WalsaConfig, strict: bool) -> Result<MethodCatalog> {
    let path = cli.catalog.as_deref().or(config.catalog.path.as_deref());
    MethodCatalog::load(path, strict).context("Failed to load method catalog")
}

fn init_config(path: &Path, force: bool) -> Result<String> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    ConfigManager::create_default_config(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(format!("Wrote default configuration to {}", path.display()))
}

fn emit(out: &OutputStream, format: OutputFormat, output: &CommandOutput) -> Result<()> {
    let text = output::render(format, output)?;
    let mut out = out.borrow_mut();
    writeln!(out, "{}", text.trim_end()).context("Failed to write output")?;
    out.flush().context("Failed to write output")
}
