//! Tulip Market operator CLI
//!
//! Thin glue over the auction engine: it drives the local asset ledger
//! (mint, approve) and the market (list, buy, queries) from subcommands.
//! The wall clock is read here and passed into the engine, which never
//! reads time on its own.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde::Deserialize;
use tulip_engine::{Auction, Market, MarketEvent, MemoryOracle, Timestamp};
use tulip_storage::Store;

#[derive(Parser)]
#[command(name = "tulip")]
#[command(about = "Tulip Market - Dutch-auction NFT marketplace")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Act as this account (overrides the configured default)
    #[arg(long, value_name = "ADDRESS")]
    account: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mint a new token to the acting account
    Mint,
    /// Approve the market to transfer a token
    Approve { token_id: u64 },
    /// List a token for Dutch auction
    List {
        token_id: u64,
        /// Price at listing time, in the smallest currency unit
        start_price: u64,
        /// Currency units deducted from the price per second
        price_reduction_rate: u64,
        /// Auction duration in seconds
        duration: u64,
    },
    /// Buy an actively listed token, tendering the given amount
    Buy { token_id: u64, amount: u64 },
    /// Show the current price of an active listing
    Price { token_id: u64 },
    /// Show the full listing history for a token
    History { token_id: u64 },
    /// Show an account balance (defaults to the acting account)
    Balance { account: Option<String> },
}

#[derive(Debug, Deserialize, Default)]
struct Config {
    #[serde(default)]
    market: MarketConfig,
}

#[derive(Debug, Deserialize, Default)]
struct MarketConfig {
    data_dir: Option<String>,
    account: Option<String>,
}

fn load_config(path: &PathBuf) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

fn expand_path(path: &str) -> String {
    path.replace("$HOME", &std::env::var("HOME").unwrap_or_default())
}

/// Current unix time in seconds; the only clock read in the system.
fn now() -> Timestamp {
    chrono::Utc::now().timestamp() as Timestamp
}

fn format_ts(ts: Timestamp) -> String {
    chrono::DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn print_listing(auction: &Auction, now: Timestamp) {
    let status = if auction.sold {
        format!(
            "sold for {} on {}",
            auction.sold_price.to_string().green(),
            format_ts(auction.sold_date)
        )
    } else if auction.is_open(now) {
        format!(
            "active, current price {}",
            tulip_engine::current_price(auction, now).to_string().green()
        )
    } else {
        "expired unsold".to_string()
    };

    println!(
        "  #{} start price {} (-{}/s) {} -> {}",
        auction.auction_id.to_string().bold(),
        auction.start_price.to_string().yellow(),
        auction.price_reduction_rate,
        format_ts(auction.start_date),
        format_ts(auction.end_date),
    );
    println!("     {}", status);
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(expand_path("$HOME/.tulip-market/config.toml")));
    let config = load_config(&config_path);

    let data_dir = config
        .market
        .data_dir
        .map(|dir| expand_path(&dir))
        .unwrap_or_else(|| expand_path("$HOME/.tulip-market/data"));
    let account = cli
        .account
        .or(config.market.account)
        .unwrap_or_else(|| "local".to_string());

    let store = Store::open(&data_dir)
        .with_context(|| format!("cannot open data directory {}", data_dir))?;
    let mut market: Market = store.load_market()?;
    let mut assets: MemoryOracle = store.load_assets()?;

    match cli.command {
        Command::Mint => {
            let token_id = assets.mint(&account);
            store.save_assets(&assets)?;
            println!(
                "Minted token {} to {}",
                token_id.to_string().green().bold(),
                account.cyan()
            );
        }
        Command::Approve { token_id } => {
            assets.set_approval(token_id, true)?;
            store.save_assets(&assets)?;
            println!("Market approved to transfer token {}", token_id.to_string().bold());
        }
        Command::List {
            token_id,
            start_price,
            price_reduction_rate,
            duration,
        } => {
            let event = market.list(
                &assets,
                token_id,
                start_price,
                price_reduction_rate,
                duration,
                &account,
                now(),
            )?;
            store.save_market(&market)?;
            if let MarketEvent::Listed { auction_id, .. } = event {
                println!(
                    "Listed token {} as auction {} at {} (-{}/s, {}s)",
                    token_id.to_string().bold(),
                    auction_id.to_string().bold(),
                    start_price.to_string().yellow(),
                    price_reduction_rate,
                    duration
                );
            }
        }
        Command::Buy { token_id, amount } => {
            let event = market.buy(&mut assets, token_id, &account, amount, now())?;
            store.save_market(&market)?;
            store.save_assets(&assets)?;
            if let MarketEvent::Sold {
                auction_id,
                sold_price,
                ..
            } = event
            {
                println!(
                    "Bought token {} (auction {}) for {}",
                    token_id.to_string().green().bold(),
                    auction_id,
                    sold_price.to_string().yellow()
                );
            }
        }
        Command::Price { token_id } => {
            let price = market.current_price(token_id, now())?;
            println!(
                "Current price for token {}: {}",
                token_id.to_string().bold(),
                price.to_string().green().bold()
            );
        }
        Command::History { token_id } => {
            let listings = market.auctions_for_token(token_id);
            if listings.is_empty() {
                println!("No auctions for token {}", token_id.to_string().bold());
            } else {
                println!(
                    "{} auction(s) for token {}",
                    listings.len().to_string().bold(),
                    token_id.to_string().bold()
                );
                let at = now();
                for auction in listings {
                    print_listing(auction, at);
                }
            }
        }
        Command::Balance { account: target } => {
            let target = target.unwrap_or(account);
            println!(
                "Balance of {}: {}",
                target.cyan(),
                assets.balance_of(&target).to_string().green().bold()
            );
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
