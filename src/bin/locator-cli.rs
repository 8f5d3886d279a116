use clap::{Parser, Subcommand};
use serde::Serialize;

use edge_locator::config::RegistryConfig;
use edge_locator::RegistryClient;

#[derive(Parser)]
#[command(name = "locator-cli")]
#[command(about = "Query the RDAP registry the way the locator does", long_about = None)]
struct Cli {
    /// RDAP service base URL.
    #[arg(short, long, default_value = "https://rdap.org")]
    registry: String,

    /// Per-lookup timeout in seconds.
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Report failures instead of printing the fallback result.
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an IP address and its origin ASN
    Ip { address: String },
    /// Look up an autonomous system number
    Asn { number: u32 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = RegistryClient::new(&RegistryConfig {
        base_url: cli.registry,
        timeout_secs: cli.timeout,
        ..RegistryConfig::default()
    })?;

    match cli.command {
        Commands::Ip { address } if cli.strict => {
            print_json(&client.try_lookup_by_ip(&address).await?)?;
        }
        Commands::Ip { address } => {
            print_json(&client.enrich_ip(&address).await)?;
        }
        Commands::Asn { number } if cli.strict => {
            print_json(&client.try_lookup_by_asn(number).await?)?;
        }
        Commands::Asn { number } => {
            print_json(&client.lookup_by_asn(number).await)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
