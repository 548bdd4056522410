use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rxpad_api::SearchClient;
use rxpad_engine::{DrugCatalog, PatientDetails, PrescriptionRequest, Session, SuggestionLookup};
use rxpad_types::Row;
use rxpad_util::{Settings, expand_tilde};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod script;

use script::{Command, parse_script};

/// Drive the prescription row autocomplete from a command script.
#[derive(Debug, Parser)]
#[command(name = "rxpad", version, about)]
struct Args {
    /// Script file to run; reads stdin when omitted
    #[arg(long, short = 's')]
    script: Option<PathBuf>,
    /// Answer lookups from a local brand -> generic JSON catalog
    #[arg(long, short = 'c')]
    catalog: Option<String>,
    /// Base URL of the search service (overrides settings and environment)
    #[arg(long)]
    search_url: Option<String>,
    /// Settings file to use instead of the default location
    #[arg(long)]
    settings: Option<String>,
    /// Patient details JSON used by `payload`
    #[arg(long)]
    patient: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // An explicit --settings path must load; the default location may fall back.
    let (settings, fallback_error) = match &args.settings {
        Some(path) => (
            Settings::load_from(expand_tilde(path)).context("failed to load settings")?,
            None,
        ),
        None => Settings::load_or_ephemeral(),
    };
    init_tracing(&settings.payload().log_filter);
    if let Some(error) = fallback_error {
        warn!(error = %error, "settings file is unreadable; using in-memory defaults");
    }
    debug!(path = %settings.path().display(), "settings loaded");

    let lookup = build_lookup(&args, &settings)?;
    let patient = load_patient(args.patient.as_deref())?;
    let source = match &args.script {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read script {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("failed to read script from stdin")?,
    };
    let commands = parse_script(&source)?;

    let mut session = Session::new(lookup);
    let mut out = io::stdout().lock();
    for command in commands {
        // Completions that already arrived land before the next keystroke.
        session.drain_ready();
        match command {
            Command::Event(event) => session.handle(event),
            Command::Wait => session.settle().await,
            Command::Show => print_rows(&mut out, &session)?,
            Command::Payload => {
                let request = PrescriptionRequest::from_rows(patient.clone(), session.controller().rows());
                writeln!(out, "{}", serde_json::to_string_pretty(&request)?)?;
            }
        }
    }
    session.settle().await;
    Ok(())
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn build_lookup(args: &Args, settings: &Settings) -> Result<Arc<dyn SuggestionLookup>> {
    let payload = settings.payload();
    let catalog_path = args
        .catalog
        .as_deref()
        .map(expand_tilde)
        .or_else(|| payload.catalog_path.clone());
    if let Some(path) = catalog_path {
        let catalog = DrugCatalog::load(&path)?.with_result_limit(payload.result_limit);
        return Ok(Arc::new(catalog));
    }

    let timeout = Duration::from_secs(payload.request_timeout_secs);
    let client = match &args.search_url {
        Some(url) => SearchClient::new(url, timeout)?,
        None => SearchClient::from_env_or(settings.search_base_url(), timeout)?,
    };
    info!(base_url = client.base_url(), "using search service");
    Ok(Arc::new(client))
}

fn load_patient(path: Option<&str>) -> Result<PatientDetails> {
    let Some(path) = path else {
        return Ok(PatientDetails::default());
    };
    let path = expand_tilde(path);
    let json = fs::read_to_string(&path).with_context(|| format!("failed to read patient file {}", path.display()))?;
    serde_json::from_str(&json).context("patient file is not valid JSON")
}

fn print_rows(out: &mut impl Write, session: &Session) -> Result<()> {
    let rows = session.controller().rows();
    if rows.is_empty() {
        writeln!(out, "(no rows)")?;
    }
    for row in rows.iter() {
        writeln!(out, "{}", describe_row(row))?;
    }
    Ok(())
}

fn describe_row(row: &Row) -> String {
    let mut line = format!(
        "#{} {:?} generic={} phase={:?} seq={}",
        row.id,
        row.query_text,
        row.resolved_generic.label(),
        row.phase,
        row.pending_request_seq
    );
    if row.dropdown_open && !row.suggestions.is_empty() {
        for (index, suggestion) in row.suggestions.iter().enumerate() {
            let marker = if row.highlighted_index == Some(index) { '>' } else { ' ' };
            line.push_str(&format!(
                "\n  {marker} [{index}] {} ({}) {:.0}",
                suggestion.display_name, suggestion.generic_name, suggestion.confidence
            ));
        }
    }
    line
}
