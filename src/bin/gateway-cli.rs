use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use coffeechat_gateway::seed::{default_locations, seed_locations};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the CoffeeChat gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(short, long, default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway status
    Status,
    /// List upstream services and rewrite rules
    Services,
    /// Show demo store counts and the current session
    Stores,
    /// Create the test locations through the gateway
    SeedLocations,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let admin_path = match cli.command {
        Commands::Status => "status",
        Commands::Services => "services",
        Commands::Stores => "stores",
        Commands::SeedLocations => {
            let report = seed_locations(&client, &cli.url, &default_locations()).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
    };

    let res = client
        .get(format!("{}/admin/{}", cli.url, admin_path))
        .headers(headers)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
