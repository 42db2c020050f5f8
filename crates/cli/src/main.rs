// Polaris CLI - inspect and edit per-game settings without the frontend

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use polaris_config::{
    EffectiveSettings, GameStore, GlobalSettings, SystemDriverOnly,
};

#[derive(Parser)]
#[command(name = "polaris")]
#[command(about = "Per-game settings for the Polaris emulator (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every stored per-game record
    List,

    /// Print one game's stored record as JSON (defaults when not stored)
    Show {
        /// Title id of the game
        title_id: String,

        /// Game version the record applies to
        #[arg(long, default_value = "")]
        version: String,
    },

    /// Print the settings the runtime would receive for a game
    #[command(after_help = "\
The record contributes only while its custom-settings switch is on;\n\
otherwise every value comes from the global settings file.")]
    Effective {
        /// Title id of the game
        title_id: String,

        /// Game version the record applies to
        #[arg(long, default_value = "")]
        version: String,

        /// Resolve as a release build (validation layer forced off)
        #[arg(long)]
        release: bool,
    },

    /// Toggle a game's favorite flag and save the record
    Favorite {
        /// Title id of the game
        title_id: String,

        /// Game version the record applies to
        #[arg(long, default_value = "")]
        version: String,
    },

    /// Print the settings and store file locations
    Paths,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), String> {
    let store = GameStore::open_default();

    match command {
        Commands::List => {
            let records = store.load_all();
            if records.is_empty() {
                println!("no stored game records");
                return Ok(());
            }

            println!(
                "{:<18} {:<10} {:>5} {:>4} {:>7}  {}",
                "TITLE ID", "VERSION", "PLAYS", "FAV", "CUSTOM", "TITLE"
            );
            for record in records {
                println!(
                    "{:<18} {:<10} {:>5} {:>4} {:>7}  {}",
                    record.title_id,
                    record.version,
                    record.play_count,
                    if record.is_favorite { "*" } else { "" },
                    if record.custom_settings_enabled { "on" } else { "off" },
                    record.title,
                );
            }
            Ok(())
        }

        Commands::Show { title_id, version } => {
            let record = store.get(&title_id, &version, "");
            let json = serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?;
            println!("{}", json);
            Ok(())
        }

        Commands::Effective { title_id, version, release } => {
            let global = GlobalSettings::load();
            let records = store.load_all();
            let record = records
                .iter()
                .find(|r| r.key() == (title_id.as_str(), version.as_str()));

            // Headless resolution has no driver catalog; the frontend passes
            // its installed-package catalog here instead.
            let effective =
                EffectiveSettings::resolve(&global, record, release, &SystemDriverOnly);
            let json = serde_json::to_string_pretty(&effective).map_err(|e| e.to_string())?;
            println!("{}", json);
            Ok(())
        }

        Commands::Favorite { title_id, version } => {
            let mut record = store.get(&title_id, &version, "");
            record.is_favorite = !record.is_favorite;
            let now_favorite = record.is_favorite;
            store.upsert(record).map_err(|e| e.to_string())?;

            println!(
                "{} {}",
                title_id,
                if now_favorite { "marked favorite" } else { "unmarked favorite" }
            );
            Ok(())
        }

        Commands::Paths => {
            println!("settings: {}", GlobalSettings::config_path_display());
            println!("games:    {}", GameStore::default_path().display());
            Ok(())
        }
    }
}
