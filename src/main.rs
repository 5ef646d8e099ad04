use std::io::{Write, stdout};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use tracing::info;

use sysmon::app::App;
use sysmon::config::{self, Config, clamp_interval, load_config, load_config_from_path};
use sysmon::event::{Event, EventHandler};
use sysmon::format::table_text;
use sysmon::ranking::{SortKey, rank};
use sysmon::system::collector::{Collector, SnapshotSource};
use sysmon::system::delta::{SamplingState, derive};
use sysmon::system::kill::SignalTerminator;
use sysmon::{logging, ui};

#[derive(Parser)]
#[command(
    name = "sysmon",
    about = "Terminal process monitor with delta-based CPU accounting"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling interval in seconds (1 to 86400)
    #[arg(long)]
    interval: Option<u64>,

    /// Sort key: cpu, memory, pid
    #[arg(long)]
    sort: Option<String>,

    /// Theme: dark, light, mono
    #[arg(long)]
    theme: Option<String>,

    /// Write JSON-lines logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Maximum log level when --log-file is set.
    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,

    /// Print one ranked table after a single interval and exit.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// With --once, print one JSON object per process instead of a table.
    #[arg(long, default_value_t = false, requires = "once")]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        logging::init_tracing_json(path, cli.log_level)?;
    }
    let config = load_config_for_cli(&cli);

    if cli.once {
        return run_once(&config, cli.json).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let mut app = App::new(
        config,
        Box::new(Collector::new()),
        Box::new(SignalTerminator::new()),
    );
    let mut events = EventHandler::new(app.tick_rate());
    info!(interval_secs = app.interval_secs, "monitor started");

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.is_running() {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = app.map_key(key);
                app.dispatch(action);
                events.set_tick_rate(app.tick_rate());
                true
            }
            Event::Key(_) => false,
            Event::Tick => {
                app.refresh_data();
                true
            }
            Event::Resize => true,
        };
        if should_draw && app.is_running() {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    info!("monitor stopped");
    Ok(())
}

/// Headless mode: prime, wait one interval, print the ranked rows.
async fn run_once(config: &Config, json: bool) -> Result<()> {
    let mut collector = Collector::new();
    let state = SamplingState::primed(&collector.capture());

    let interval = clamp_interval(config.general.interval_secs);
    tokio::time::sleep(std::time::Duration::from_secs(interval)).await;

    let snapshot = collector.capture();
    let (rows, _) = derive(state, &snapshot.system, &snapshot.processes);
    let rows = rank(rows, SortKey::from_str_config(&config.general.default_sort));

    let mut out = stdout().lock();
    if json {
        for row in &rows {
            writeln!(out, "{}", serde_json::to_string(row)?)?;
        }
    } else {
        writeln!(out, "{}", table_text(&rows))?;
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(interval) = cli.interval {
        config.general.interval_secs = interval;
    }
    if let Some(ref sort) = cli.sort {
        config.general.default_sort = sort.clone();
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }

    config
}
