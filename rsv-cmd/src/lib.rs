//! Command implementations for RSV CLI.
//!
//! Provides subcommands that load reservoir sources, run the statistics
//! pipeline for a selection of sources and a year, and print or export
//! the result.

use anyhow::bail;
use clap::{Args, Subcommand};
use rsv_data::dashboard::{available_years, resolve_year, DashboardCache, DashboardView};
use rsv_data::selection::SourceSelection;
use rsv_records::source::{SourceConfig, SourceLocation};
use rsv_records::store::SourceStore;
use rsv_utils::error::SourceSpecError;
use rsv_utils::sources::parse_source_spec;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

pub mod export;
pub mod loader;
pub mod report;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Reservoir source as ID=LOCATION, where LOCATION is a CSV file path or
    /// an http(s) URL. Repeatable; defaults to the bundled reservoirs.
    #[arg(short = 's', long = "source", value_parser = parse_source_arg)]
    pub sources: Vec<SourceConfig>,

    /// Source to include in the combined totals. Repeatable; defaults to all.
    #[arg(long = "select")]
    pub select: Vec<String>,

    /// Flip a source in or out of the selection, applied in order after
    /// --select. The last selected source is never removed.
    #[arg(short = 't', long = "toggle")]
    pub toggle: Vec<String>,

    /// Year to compare against history (defaults to the latest available)
    #[arg(short = 'y', long)]
    pub year: Option<i32>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print capacity, current reserve and per-source indicators
    Summary {
        #[command(flatten)]
        sources: SourceArgs,

        /// Print the full result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the selected year month by month against its history
    Table {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Write the monthly comparison rows to a CSV file
    Export {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output path (defaults to reservoirs_<year>.csv)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// List configured sources with their current and maximum values
    Sources {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

/// Loaded datasets plus the resolved selection and year.
#[derive(Debug)]
pub struct Context {
    pub store: SourceStore,
    pub selection: SourceSelection,
    pub selected_year: Option<i32>,
    cache: RefCell<DashboardCache>,
}

impl Context {
    pub fn new(store: SourceStore, selection: SourceSelection, selected_year: Option<i32>) -> Self {
        Context {
            store,
            selection,
            selected_year,
            cache: RefCell::new(DashboardCache::new()),
        }
    }

    /// The dashboard view for the current selection and year, computed once
    /// per distinct set of inputs.
    pub fn view(&self) -> Rc<DashboardView> {
        self.cache
            .borrow_mut()
            .view(&self.store, &self.selection, self.selected_year)
    }

    /// How many times the pipeline ran for this context.
    pub fn computations(&self) -> usize {
        self.cache.borrow().computations()
    }
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary { sources, json } => {
            let context = load_context(&sources).await?;
            report::run_summary(&context, json)
        }
        Command::Table { sources } => {
            let context = load_context(&sources).await?;
            report::run_table(&context)
        }
        Command::Export { sources, output } => {
            let context = load_context(&sources).await?;
            export::run_export(&context, output.as_deref())
        }
        Command::Sources { sources } => {
            let context = load_context(&sources).await?;
            report::run_sources(&context)
        }
    }
}

/// Parse a `--source ID=LOCATION` argument.
pub fn parse_source_arg(arg: &str) -> Result<SourceConfig, SourceSpecError> {
    let (source_id, location) = parse_source_spec(arg)?;
    Ok(SourceConfig::new(source_id, SourceLocation::parse(&location)))
}

/// The configured sources, falling back to the bundled reservoirs.
pub fn configured_sources(args: &SourceArgs) -> anyhow::Result<Vec<SourceConfig>> {
    if args.sources.is_empty() {
        return Ok(SourceConfig::get_default_sources());
    }
    let mut seen = HashSet::new();
    for source in &args.sources {
        if !seen.insert(source.source_id.as_str()) {
            bail!("source '{}' is configured more than once", source.source_id);
        }
    }
    Ok(args.sources.clone())
}

/// Selected sources; every configured source when none are named, then
/// each `--toggle` applied in order.
pub fn resolve_selection(
    args: &SourceArgs,
    configs: &[SourceConfig],
) -> anyhow::Result<SourceSelection> {
    let is_configured = |id: &str| configs.iter().any(|c| c.source_id == id);
    for id in &args.select {
        if !is_configured(id.as_str()) {
            bail!("unknown source '{}' in --select", id);
        }
    }
    let mut selection = if args.select.is_empty() {
        SourceSelection::new(configs.iter().map(|c| c.source_id.clone()))
    } else {
        SourceSelection::new(args.select.iter().cloned())
    };
    for id in &args.toggle {
        if !is_configured(id.as_str()) {
            bail!("unknown source '{}' in --toggle", id);
        }
        let toggled = selection.toggle(id);
        if toggled == selection {
            log::warn!("[RSV] selection: keeping '{}', the last selected source", id);
        }
        selection = toggled;
    }
    Ok(selection)
}

/// Load every configured source in parallel and resolve selection and year.
pub async fn load_context(args: &SourceArgs) -> anyhow::Result<Context> {
    let configs = configured_sources(args)?;
    let selection = resolve_selection(args, &configs)?;
    let store = loader::load_sources(&configs).await?;
    let selected_year = resolve_year(args.year, &available_years(&store));
    Ok(Context::new(store, selection, selected_year))
}
