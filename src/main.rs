//! Stickies - A sticky-notes board for the terminal.
//!
//! # Usage
//!
//! ```bash
//! stickies
//! stickies --pinned
//! stickies --data-dir ~/notes --watch
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use stickies::app::App;
use stickies::card::DEFAULT_EDIT_DEBOUNCE_MS;
use stickies::config::{
    ConfigFlags, clear_config_flags, default_data_dir, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use stickies::perf;
use stickies::store::FileStorage;
use stickies::ui::CellScale;

/// A sticky-notes board for the terminal
#[derive(Parser, Debug)]
#[command(name = "stickies", version, about, long_about = None)]
struct Cli {
    /// Directory holding sticky-notes.json
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Start with only pinned notes shown
    #[arg(long)]
    pinned: bool,

    /// Quiet period in milliseconds before card edits are saved
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Pixels represented by one terminal column
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u16).range(1..))]
    cell_width: Option<u16>,

    /// Pixels represented by one terminal row
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u16).range(1..))]
    cell_height: Option<u16>,

    /// Reload the board when another process changes the notes file
    #[arg(short, long)]
    watch: bool,

    /// Print timing information on exit
    #[arg(long)]
    perf: bool,

    /// Write detailed event logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the global config
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "resolved flags");

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("STICKIES_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize debug log {}: {}",
            debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let data_dir = effective.data_dir.clone().unwrap_or_else(default_data_dir);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;

    let defaults = CellScale::default();
    let scale = CellScale::new(
        effective.cell_width.map_or(defaults.col_px, f64::from),
        effective.cell_height.map_or(defaults.row_px, f64::from),
    );

    // Run the application
    let mut app = App::new(Box::new(FileStorage::new(data_dir)))
        .with_watch(effective.watch)
        .with_pinned_only(effective.pinned)
        .with_debounce_ms(effective.debounce_ms.unwrap_or(DEFAULT_EDIT_DEBOUNCE_MS))
        .with_scale(scale)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    let result = app.run().context("Application error");
    perf::report();
    result
}
