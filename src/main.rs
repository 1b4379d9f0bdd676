use anyhow::Result;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use gcpdraw::config::Config;
use gcpdraw::diagram::{self, DiagramOptions};
use gcpdraw::gcp::auth::GcpCredentials;
use gcpdraw::gcp::client::{Endpoints, GcpClient};
use gcpdraw::inventory::{self, Category, CollectOptions, Collection};
use gcpdraw::{logging, VERSION};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// Render a GCP project's inventory as a draw.io diagram
#[derive(Parser, Debug)]
#[command(name = "gcpdraw", version, about, long_about = None)]
struct Args {
    /// Directory to write the diagram into
    output_dir: Option<PathBuf>,

    /// GCP project to inventory
    #[arg(short, long)]
    project: Option<String>,

    /// Diagram title
    #[arg(long)]
    title: Option<String>,

    /// Use this OAuth access token instead of Application Default Credentials
    #[arg(long)]
    access_token: Option<String>,

    /// Also write a log file at this level (warnings always go to stderr)
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Always log warnings to stderr; `--log-level` adds a log file on top
fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let console = logging::console_layer(std::io::stderr);

    let Some(tracing_level) = level.to_tracing_level() else {
        tracing_subscriber::registry().with(console).init();
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", log_path.display(), e))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(LevelFilter::from_level(tracing_level));

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .init();

    tracing::info!("gcpdraw {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("gcpdraw").join("gcpdraw.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".gcpdraw").join("gcpdraw.log");
    }
    PathBuf::from("gcpdraw.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let config = Config::load();
    let Some(project) = config.effective_project(args.project.as_deref()) else {
        return Err(anyhow::anyhow!(
            "No GCP project configured. Set GOOGLE_CLOUD_PROJECT or use --project"
        ));
    };
    let output_dir = config.effective_output_dir(args.output_dir.as_deref());

    tracing::info!("Using project: {}", project);

    let client = match &args.access_token {
        Some(token) => GcpClient::with_credentials(
            &project,
            GcpCredentials::from_static_token(token.as_str()),
            Endpoints::default(),
        )?,
        None => GcpClient::new(&project)?,
    };

    println!("Fetching GCP resources for {}...", project);
    let collect_options = CollectOptions {
        reserved_role_prefix: config.effective_reserved_role_prefix(),
    };
    let collection = inventory::collect(&client, &collect_options).await;

    println!("Generating draw.io diagram...");
    let options = DiagramOptions {
        title: config.effective_title(args.title.as_deref()),
        account: project,
    };
    let built = diagram::build(&collection, &options);
    let xml = diagram::to_xml(&built, Utc::now())?;

    let output_file = diagram::output_path(&output_dir);
    diagram::write_diagram(&output_file, &xml)?;

    print_summary(&collection, &output_file);
    Ok(())
}

fn print_summary(collection: &Collection, output_file: &Path) {
    println!("Draw.io diagram generated: {}", output_file.display());
    println!("Resources included:");
    for category in Category::ALL {
        let label = inventory::registry::get_category(category)
            .map(|def| def.display_name.as_str())
            .unwrap_or(category.as_str());
        println!("   - {}: {}", label, collection.count(category));
    }
    println!("\nDone! Open {} in draw.io to view and edit.", output_file.display());
}
