use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use dashtop::client::{default_news_sources, Client};
use dashtop::commands;
use dashtop::config;
use dashtop::dashboard::Dashboard;
use dashtop::data_provider::{GeocodeProvider, NewsSource, WeatherProvider};
use dashtop::tui;
use dashtop::types::NewsCategory;
use dashtop::widgets::{WidgetConfig, WidgetContext};

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "dashtop")]
#[command(
    about = "Widget dashboard for the terminal",
    long_about = "Widget dashboard for the terminal\n\nIf no command is specified, the program starts in interactive mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Use mock data providers instead of live services
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random quote
    Quote,
    /// Print current weather for a city
    Weather {
        /// City name (defaults to the configured default city)
        city: Option<String>,
    },
    /// Print latest headlines for a category
    News {
        /// Category: technology, science, business or sports
        #[arg(short, long, default_value = "technology")]
        category: String,
    },
    /// Display current configuration
    Config,
}

fn create_client() -> Client {
    match Client::new() {
        Ok(client) => client,
        Err(e) => {
            let error_msg = format!("Failed to create HTTP client: {}", e);
            tracing::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    }
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!(
        "Configuration File: {} (Exists: {})",
        path_str,
        if exists { "yes" } else { "no" }
    );
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("default_city: {}", cfg.default_city);
    println!("widgets: {}", cfg.widgets.join(", "));
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!(
        "unfocused_selection_fg: {:?}{}",
        cfg.theme.unfocused_selection_fg(),
        if cfg.theme.unfocused_selection_fg.is_none() {
            " (auto: 50% darker)"
        } else {
            ""
        }
    );
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// The provider set the widgets work against.
struct Providers {
    geocode: Arc<dyn GeocodeProvider>,
    weather: Arc<dyn WeatherProvider>,
    news_sources: Vec<Arc<dyn NewsSource>>,
}

fn live_providers() -> Providers {
    let client = create_client();
    let news_sources = default_news_sources(&client);
    let client = Arc::new(client);
    Providers {
        geocode: client.clone(),
        weather: client,
        news_sources,
    }
}

#[cfg(feature = "development")]
fn mock_providers() -> Providers {
    use dashtop::dev::mock_client::{MockClient, MockNewsSource};
    let mock = Arc::new(MockClient::new());
    Providers {
        geocode: mock.clone(),
        weather: mock,
        news_sources: vec![Arc::new(MockNewsSource::new("MockWire")) as Arc<dyn NewsSource>],
    }
}

/// Run TUI mode with the configured startup widgets
async fn run_tui_mode(config: config::Config, providers: Providers) -> Result<(), std::io::Error> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let ctx = WidgetContext {
        events: events_tx,
        geocode: providers.geocode,
        weather: providers.weather,
        news_sources: Arc::new(providers.news_sources),
        default_city: config.default_city.clone(),
    };

    let mut dashboard = Dashboard::new(ctx);
    for tag in &config.widgets {
        // Unknown tags are logged and skipped; the rest of the line-up
        // still comes up.
        dashboard.add_widget(tag, WidgetConfig::default());
    }

    tui::run(dashboard, events_rx, config).await
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(command: Commands, config: &config::Config) -> anyhow::Result<()> {
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Quote => commands::quote::execute(),
        Commands::Weather { city } => {
            let client = create_client();
            let city = city.as_deref().unwrap_or(config.default_city.as_str());
            commands::weather::execute(&client, &client, city).await
        }
        Commands::News { category } => {
            let category = NewsCategory::parse(&category)
                .ok_or_else(|| anyhow::anyhow!("unknown category: {}", category))?;
            let client = create_client();
            let sources = default_news_sources(&client);
            commands::news::execute(&sources, category).await
        }
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // If no subcommand, run TUI
    if cli.command.is_none() {
        #[cfg(feature = "development")]
        let providers = if cli.mock {
            mock_providers()
        } else {
            live_providers()
        };
        #[cfg(not(feature = "development"))]
        let providers = live_providers();

        if let Err(e) = run_tui_mode(config, providers).await {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let command = cli.command.unwrap();

    // Handle Config command separately (doesn't need a client)
    if let Commands::Config = command {
        handle_config_command();
        return;
    }

    if let Err(e) = execute_command(command, &config).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
