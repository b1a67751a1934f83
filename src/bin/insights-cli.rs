use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "insights-cli")]
#[command(about = "Command-line client for the channel insights API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    Recency,
    Views,
    Likes,
}

impl SortBy {
    fn as_str(self) -> &'static str {
        match self {
            SortBy::Recency => "recency",
            SortBy::Views => "views",
            SortBy::Likes => "likes",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check server liveness
    Health,
    /// Show a channel summary
    Channel { id: String },
    /// List a channel's videos
    Videos {
        id: String,
        #[arg(long, value_enum, default_value_t = SortBy::Recency)]
        sort_by: SortBy,
        #[arg(long, default_value_t = 50)]
        max_videos: usize,
    },
    /// Show engagement analytics
    Analytics { id: String },
    /// Show upload and performance trends
    Trends { id: String },
    /// Store a channel from a JSON file
    Ingest { id: String, file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let api = format!("{base}/api/v1");

    let res = match cli.command {
        Commands::Health => client.get(format!("{base}/health")).send().await?,
        Commands::Channel { id } => client.get(format!("{api}/channel/{id}")).send().await?,
        Commands::Videos {
            id,
            sort_by,
            max_videos,
        } => {
            client
                .get(format!("{api}/channel/{id}/videos"))
                .query(&[
                    ("sortBy", sort_by.as_str().to_string()),
                    ("maxVideos", max_videos.to_string()),
                ])
                .send()
                .await?
        }
        Commands::Analytics { id } => {
            client
                .get(format!("{api}/channel/{id}/analytics"))
                .send()
                .await?
        }
        Commands::Trends { id } => {
            client
                .get(format!("{api}/channel/{id}/trends"))
                .send()
                .await?
        }
        Commands::Ingest { id, file } => {
            let body: Value = serde_json::from_str(&std::fs::read_to_string(file)?)?;
            client
                .put(format!("{api}/channel/{id}"))
                .json(&body)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
