use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use cadence_explorer::render;
use cadence_explorer::views::AlbumSort;
use cadence_explorer::{
    chat_artist, Config, ConversationLog, Explorer, ExplorerError, MusicChat, Recommender,
    ViewRequest,
};
use cadence_ollama_client::OllamaClient;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Explore artists, albums and top tracks from TheAudioDB")]
struct Cli {
    /// Print view models as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Profile, styles and links for an artist
    Overview { artist: String },

    /// Album table, summary and release timeline
    Discography {
        artist: String,

        /// newest, oldest, sales or tracks
        #[arg(long, default_value_t = AlbumSort::YearNewest)]
        sort: AlbumSort,
    },

    /// Top tracks ranked by popularity
    Tracks {
        artist: String,

        /// Only show tracks at or above this score (0-100)
        #[arg(long, default_value_t = 0)]
        min_popularity: u32,
    },

    /// All three views at once
    Report {
        artist: String,

        #[arg(long, default_value_t = AlbumSort::YearNewest)]
        sort: AlbumSort,

        #[arg(long, default_value_t = 0)]
        min_popularity: u32,
    },

    /// Recommend an artist based on two favourites
    Recommend { first: String, second: String },

    /// Ask the music assistant; reads prompts from stdin when none is given
    Chat {
        /// Artist to use as conversation context
        #[arg(long)]
        artist: Option<String>,

        prompt: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load environment variables
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            config.common.log_filter("cadence_explorer"),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(environment = %config.environment(), "Configuration loaded");

    let explorer = Arc::new(
        Explorer::from_config(&config).context("Failed to create catalog client")?,
    );

    match run(cli, &config, explorer).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_user_error() => {
            e.log();
            eprintln!("{}", e.user_message());
            if matches!(e, ExplorerError::NotFound(_)) {
                eprintln!("{}", render::suggestions());
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

async fn run(cli: Cli, config: &Config, explorer: Arc<Explorer>) -> Result<(), ExplorerError> {
    let json = cli.json;

    match cli.command {
        Command::Overview { artist } => {
            let dashboard = explorer.lookup(&ViewRequest::overview(artist)).await?;
            emit(json, &dashboard, || render::dashboard(&dashboard));
        }
        Command::Discography { artist, sort } => {
            let dashboard = explorer
                .lookup(&ViewRequest::discography(artist, sort))
                .await?;
            emit(json, &dashboard, || render::dashboard(&dashboard));
        }
        Command::Tracks {
            artist,
            min_popularity,
        } => {
            let dashboard = explorer
                .lookup(&ViewRequest::popular_tracks(artist, min_popularity))
                .await?;
            emit(json, &dashboard, || render::dashboard(&dashboard));
        }
        Command::Report {
            artist,
            sort,
            min_popularity,
        } => {
            let report = explorer.report(&artist, sort, min_popularity).await?;
            emit(json, &report, || render::report(&report));
        }
        Command::Recommend { first, second } => {
            let ollama = OllamaClient::new(config.ollama())?;
            let recommendation = Recommender::new(explorer, ollama)
                .recommend(&first, &second)
                .await?;
            emit(json, &recommendation, || format!("{}\n", recommendation.text));
        }
        Command::Chat { artist, prompt } => {
            let context = chat_artist(&explorer, artist.as_deref()).await?;
            match (&context, &artist) {
                (Some(found), _) => eprintln!("Artist context loaded: {}", found.name),
                (None, Some(name)) if !name.trim().is_empty() => eprintln!("Artist not found!"),
                _ => {}
            }

            let chat = MusicChat::new(OllamaClient::new(config.ollama())?);
            let mut log = ConversationLog::new();

            match prompt {
                Some(prompt) => println!("{}", chat.turn(&mut log, context.as_ref(), &prompt).await),
                None => {
                    let mut lines = BufReader::new(tokio::io::stdin()).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        if line.trim().is_empty() {
                            continue;
                        }
                        println!("{}", chat.turn(&mut log, context.as_ref(), &line).await);
                    }
                }
            }
        }
    }

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) {
    if json {
        match serde_json::to_string_pretty(value) {
            Ok(out) => println!("{out}"),
            Err(e) => tracing::error!(error = %e, "Failed to serialize view"),
        }
    } else {
        print!("{}", text());
    }
}
