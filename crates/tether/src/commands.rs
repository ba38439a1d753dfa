use std::path::Path;

use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info, warn};

use tether_core::config::{HistoryConfig, SyncConfig, TetherConfig};
use tether_core::events;
use tether_core::views::{self, StateSummary};
use tether_core::{EventPump, PumpStats, PushEvent, SharedStore, SyncState};

use crate::table::{ServiceRow, TableFormatter};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning() -> TetherConfig {
    match TetherConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.tether/config.toml and ./.tether/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            TetherConfig::default()
        }
    }
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("replay", sub_matches)) => handle_replay_command(sub_matches),
        Some(("config", _)) => handle_config_command(),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}

/// Parse a JSON-lines event log. Blank lines are skipped.
fn read_event_log(path: &Path) -> Result<Vec<PushEvent>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;

    let mut events = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event =
            PushEvent::from_json(line).map_err(|e| format!("Line {}: {}", index + 1, e))?;
        events.push(event);
    }
    Ok(events)
}

/// Apply recorded events to a fresh store in file order.
fn replay(events: Vec<PushEvent>, config: &TetherConfig) -> (SharedStore, PumpStats) {
    let store = SharedStore::new(SyncState::new(config));
    let stats = EventPump::new(store.clone(), config).replay(events);
    (store, stats)
}

#[derive(Serialize)]
struct ReplayReport {
    events: usize,
    rejected: usize,
    summary: StateSummary,
    services: Vec<ServiceRow>,
}

fn handle_replay_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let file = matches
        .get_one::<String>("file")
        .ok_or("File argument is required")?;
    let json_output = matches.get_flag("json");

    info!(event = "cli.replay_started", file = file, json_output = json_output);

    let config = load_config_with_warning();

    let events = match read_event_log(Path::new(file)) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("❌ Failed to read event log: {}", e);
            error!(event = "cli.replay_failed", file = file, error = %e);
            events::log_app_error(e.as_ref());
            return Err(e);
        }
    };
    let event_count = events.len();

    let (store, stats) = replay(events, &config);

    let (summary, rows) = store.read(|state| (views::summary(state), ServiceRow::collect(state)));

    if json_output {
        let report = ReplayReport {
            events: event_count,
            rejected: stats.rejected,
            summary,
            services: rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Replayed {} event(s).", event_count);
        if rows.is_empty() {
            println!("Directory is empty.");
        } else {
            TableFormatter::new(&rows).print_table(&rows);
        }
        println!(
            "Servers: {}  Services: {}  Connected: {}  Active tunnels: {}",
            summary.servers,
            summary.services,
            summary.connected.len(),
            summary.active_tunnels
        );
        if let Some(prompt) = &summary.prompt {
            println!(
                "Credential prompt: service {} ({})",
                prompt.service,
                serde_json::to_string(&prompt.phase)?.trim_matches('"')
            );
        }
        if stats.rejected > 0 {
            println!("⚠️  {} event(s) were rejected", stats.rejected);
        }
    }

    info!(
        event = "cli.replay_completed",
        events = event_count,
        rejected = stats.rejected,
    );
    Ok(())
}

fn handle_config_command() -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.config_started");

    let config = load_config_with_warning();
    let effective = TetherConfig {
        history: HistoryConfig {
            recent_limit: Some(config.recent_limit()),
        },
        sync: SyncConfig {
            ready_delay_ms: Some(config.ready_delay().as_millis() as u64),
            log_events: Some(config.log_events()),
        },
    };

    print!("{}", toml::to_string_pretty(&effective)?);

    info!(event = "cli.config_completed");
    Ok(())
}
