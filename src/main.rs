use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc;

use albumshelf::app::{App, AppEvent};
use albumshelf::catalog::seed;
use albumshelf::config::{validate_collection, Config};
use albumshelf::storage::{Database, DatabaseError};
use albumshelf::theme::ThemeVariant;
use albumshelf::ui;

/// Get the config directory path (~/.config/albumshelf/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("albumshelf");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(
    name = "albumshelf",
    about = "Terminal catalog for tracking which albums of a series you own"
)]
struct Args {
    /// Remove every album of the collection, so it is re-seeded on start
    #[arg(long)]
    reset_db: bool,

    /// Initial location, e.g. "remaining" or "albums/12"
    #[arg(long, value_name = "FRAGMENT")]
    route: Option<String>,

    /// JSON file with the initial album list (used only for an empty collection)
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Collection namespace to open
    #[arg(long, value_name = "NAME")]
    collection: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // Set directory permissions on Unix (user-only access)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o700);
        if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
            eprintln!(
                "Warning: failed to set permissions on {}: {}",
                config_dir.display(),
                e
            );
        }
    }

    // Log to a file: stdout belongs to the alternate screen
    let log_path = config_dir.join("albumshelf.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let config = Config::load(&config_dir.join("config.toml")).context("Failed to load config")?;

    let collection = args.collection.unwrap_or_else(|| config.collection.clone());
    validate_collection(&collection)?;

    let seed_fields = match args.seed.as_ref().or(config.seed_file.as_ref()) {
        Some(path) => seed::load_file(path)
            .with_context(|| format!("Failed to load seed file {}", path.display()))?,
        None => seed::builtin().context("Built-in album list is invalid")?,
    };

    // Open database
    let db_path = config_dir.join("albums.db");
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of albumshelf appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    // Handle --reset-db flag
    if args.reset_db {
        let removed = db
            .clear_items(&collection)
            .await
            .context("Failed to reset collection")?;
        tracing::info!(removed, collection = %collection, "Collection reset");
        println!("Removed {} albums from '{}'.", removed, collection);
    }

    // Create app state
    let mut app = App::new(db.clone(), collection, seed_fields);
    match ThemeVariant::from_str_name(&config.theme) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %config.theme, "Unknown theme, using dark"),
    }
    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!(warning = %warning, "Ignored keybinding override");
    }
    app.confirm_remove = config.confirm_remove;
    app.initial_route = args.route.unwrap_or_default();

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    let result = ui::run(&mut app, event_tx, event_rx).await;
    db.close().await;
    result?;

    // The last location, so it can be pasted back with --route
    println!("{}", app.location());
    Ok(())
}
