use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::normalize_server_url, execute, load_settings, Completion, GalleryView,
    HttpGalleryClient, UiState,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gallery", about = "Search and generate prompt gallery images")]
struct Args {
    /// Overrides `server_url` from gallery.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Action {
    /// List stored images whose prompt matches INPUT.
    Search { input: String },
    /// Generate an image for INPUT, then list the refreshed gallery.
    Generate { input: String },
}

impl Action {
    fn input(&self) -> &str {
        match self {
            Self::Search { input } | Self::Generate { input } => input,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url.as_deref() {
        settings.server_url = normalize_server_url(server_url);
    }
    let client = HttpGalleryClient::from_settings(&settings);

    let mut state = UiState::with_input(args.action.input());
    let command = match args.action {
        Action::Search { .. } => state.begin_search(),
        Action::Generate { .. } => state.begin_generate(),
    };

    let finished = execute(&client, command, &settings.refresh_query, |step| {
        tracing::debug!(?step, "generate progress");
    })
    .await;

    match state.complete(finished.token, finished.result) {
        Completion::Applied => {
            let view = GalleryView::render(&state);
            if view.tiles.is_empty() {
                eprintln!("No images found.");
            }
            for tile in &view.tiles {
                println!("{tile}");
            }
            Ok(())
        }
        Completion::Failed => {
            let failure = state
                .last_failure()
                .ok_or_else(|| anyhow!("action failed without a recorded error"))?;
            Err(failure.error.clone())
                .with_context(|| format!("{} against {}", failure.action.label(), settings.server_url))
        }
        Completion::Stale => Err(anyhow!("response arrived for a superseded request")),
    }
}
