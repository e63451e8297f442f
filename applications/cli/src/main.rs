/// Cadence - play media server collections through the queue engine
use cadence_cli::{
    config::AppConfig, device::ConsoleDevice, downloads::LocalDownloads, network::StaticNetwork,
};
use cadence_core::{LibraryFilters, PlayableTrack, QueueReference};
use cadence_playback::{LoadRequest, QueueBackends, QueueService, QueueSnapshot};
use cadence_server_client::MediaServerClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Queue and play music from a media server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Play downloaded tracks only
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an album or playlist
    Play {
        /// Album or playlist identifier
        collection_id: String,
        /// Index of the first track to play
        #[arg(short, long, default_value_t = 0)]
        start: usize,
        /// Shuffle the queue
        #[arg(long)]
        shuffle: bool,
    },
    /// Play a random sample of the whole library
    ShuffleLibrary {
        /// Favorites only
        #[arg(long)]
        favorites: bool,
        /// Never-played tracks only
        #[arg(long)]
        unplayed: bool,
        /// Downloaded tracks only
        #[arg(long)]
        downloaded: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let client = Arc::new(MediaServerClient::new(config.server.clone())?);
    let backends = QueueBackends {
        device: Arc::new(ConsoleDevice::new()),
        catalog: client.clone(),
        downloads: Arc::new(LocalDownloads::new(config.downloads.directory.clone())),
        network: Arc::new(StaticNetwork::from_offline_flag(cli.offline)),
        reporter: client.clone(),
        urls: client.clone(),
    };
    let service = QueueService::new(backends, config.queue.clone());

    match cli.command {
        Commands::Play {
            collection_id,
            start,
            shuffle,
        } => {
            let items = client.fetch_collection_tracks(&collection_id).await?;
            let display_name = items
                .first()
                .and_then(|item| item.album.clone())
                .unwrap_or_else(|| collection_id.clone());
            tracing::info!(collection = %collection_id, tracks = items.len(), "Fetched collection");

            let request = LoadRequest::new(
                items,
                start,
                QueueReference::collection(collection_id, display_name),
            )
            .shuffled(shuffle);
            service.load_queue(request).await?;
        }
        Commands::ShuffleLibrary {
            favorites,
            unplayed,
            downloaded,
        } => {
            service
                .set_library_filters(LibraryFilters {
                    favorites_only: favorites,
                    unplayed_only: unplayed,
                    downloaded_only: downloaded,
                    ..LibraryFilters::default()
                })
                .await;
            service.shuffle_library().await?;
        }
    }

    print_queue(&service.snapshot().await);
    Ok(())
}

fn print_queue(snapshot: &QueueSnapshot) {
    if snapshot.queue.is_empty() {
        println!("Queue is empty");
        return;
    }

    let origin = snapshot
        .queue_ref
        .as_ref()
        .map_or("Queue", QueueReference::playlist_name);
    let mode = if snapshot.shuffled { " (shuffled)" } else { "" };
    println!("{}{}: {} tracks", origin, mode, snapshot.queue.len());

    for (index, track) in snapshot.queue.iter().enumerate() {
        let marker = if snapshot.current_index == Some(index) {
            ">"
        } else {
            " "
        };
        println!("{} {:>3}. {}", marker, index + 1, describe(track));
    }
}

fn describe(track: &PlayableTrack) -> String {
    let title = track.title.as_deref().unwrap_or(track.id.as_str());
    let mut line = match &track.artist {
        Some(artist) => format!("{} - {}", artist, title),
        None => title.to_string(),
    };
    if let Some(secs) = track.duration_secs {
        line.push_str(&format!(" [{}:{:02}]", secs / 60, secs % 60));
    }
    if track.is_downloaded() {
        line.push_str(" (downloaded)");
    }
    line
}
