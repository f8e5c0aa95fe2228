use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tcluster::api::client::ClusterClient;
use tcluster::app::App;
use tcluster::cli::{self, Args, Command, LogLevel};
use tcluster::config::Config;
use tcluster::console::ops;
use tcluster::{event, ui};
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("tcluster started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("tcluster").join("tcluster.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".tcluster").join("tcluster.log");
    }
    PathBuf::from("tcluster.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level);

    let mut config = Config::load();

    if let Some(Command::Config {
        api_url,
        status_timeout_secs,
    }) = &args.command
    {
        if let Some(url) = api_url {
            config.api_url = Some(config.effective_api_url(Some(url.as_str()))?);
        }
        if let Some(secs) = status_timeout_secs {
            config.status_timeout_secs = Some(*secs);
        }
        config.save().context("Failed to save config")?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let api_url = config.effective_api_url(args.api_url.as_deref())?;
    tracing::info!("Using API: {}", api_url);
    let client = ClusterClient::new(&api_url)?;

    match &args.command {
        Some(Command::Health) => {
            let ok = cli::run_health(&client, &mut io::stdout()).await?;
            drop(log_guard);
            std::process::exit(if ok { 0 } else { 1 });
        }
        Some(command) => {
            if let Some(submission) = command.submission() {
                let ok = cli::run_once(&client, &submission, &mut io::stdout()).await?;
                // flush the log writer; exit skips destructors
                drop(log_guard);
                std::process::exit(if ok { 0 } else { 1 });
            }
            Ok(())
        }
        None => run_tui(client, &config).await,
    }
}

async fn run_tui(client: ClusterClient, config: &Config) -> Result<()> {
    // Fire-and-forget reachability probe; result only goes to the log
    let probe = client.clone();
    tokio::spawn(async move { ops::health_check(&probe).await });

    let mut app = App::new(client, config.status_timeout());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = run_app(&mut terminal, &mut app);
    cleanup_terminal(&mut terminal)?;

    if let Err(err) = run_result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        let now = Instant::now();
        app.drain_completions(now);
        app.tick(now);

        terminal.draw(|f| ui::render(f, app))?;

        if event::handle_events(app)? {
            return Ok(());
        }
    }
}
