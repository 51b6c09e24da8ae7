/*
    spotpop | Web service for the Spotify popularity battle game.
    Copyright (C) 2025  Israel Alberto Roldan Vega

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use log::info;
use spotpop_core::lookup::PopularitySource;
use spotpop_core::{get_spotify_client, JsonFileStore, Roster, SpotifyLookup};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

mod api;

use api::AppState;

#[derive(Parser)]
#[command(name = "spotpop")]
#[command(about = "HTTP service for the Spotify popularity battle game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the HTTP API server (the default when no command is given)
    Serve(ServeArgs),
    /// Re-fetches popularity for every roster artist and rewrites the roster file
    RefreshRoster {
        /// Path of the roster JSON file to rewrite
        #[arg(value_name = "ROSTER_FILE")]
        roster: PathBuf,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Roster JSON file; the bundled roster is used when omitted
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Leaderboard storage file
    #[arg(long, default_value = "leaderboard.json")]
    leaderboard: PathBuf,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            port: 8080,
            roster: None,
            leaderboard: PathBuf::from("leaderboard.json"),
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if dotenv().is_err() {
        // Silently ignore
    }

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve(ServeArgs::default()));

    let result = match command {
        Commands::Serve(args) => run_serve(args).await,
        Commands::RefreshRoster { roster } => run_refresh_roster(&roster).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    let roster = match &args.roster {
        Some(path) => {
            Roster::load(path).with_context(|| format!("loading roster {}", path.display()))?
        }
        None => Roster::bundled().context("parsing bundled roster")?,
    };
    info!("Theme roster holds {} artists", roster.len());

    let spotify = get_spotify_client()
        .await
        .context("initializing Spotify client")?;

    let state = Arc::new(AppState {
        lookup: Arc::new(SpotifyLookup::new(spotify)),
        roster,
        store: Arc::new(JsonFileStore::new(&args.leaderboard)),
    });

    let app = api::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}

/// Walks the existing roster (or the bundled one when the file does not
/// exist yet), re-resolves every name against the catalog and rewrites the
/// file with fresh ids and popularity scores.
async fn run_refresh_roster(path: &Path) -> anyhow::Result<()> {
    let roster = if path.exists() {
        Roster::load(path).with_context(|| format!("loading roster {}", path.display()))?
    } else {
        Roster::bundled().context("parsing bundled roster")?
    };

    let spotify = get_spotify_client()
        .await
        .context("initializing Spotify client")?;
    let lookup = SpotifyLookup::new(spotify);

    let names: Vec<String> = roster.names().map(String::from).collect();
    println!("Refreshing popularity for {} artists...", names.len());

    let artists = lookup.popularity_batch(&names).await;
    println!("Resolved {} of {} artists", artists.len(), names.len());

    let refreshed = Roster::new(artists).context("refreshed roster is empty")?;
    refreshed
        .save(path)
        .with_context(|| format!("writing roster {}", path.display()))?;

    println!("[SAVED] Roster written to: {}", path.display());
    Ok(())
}
