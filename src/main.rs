//! tootbot - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tootbot::{
    bot::{run_forever, shutdown_signal, Bot, CycleReport},
    cli::{Args, Command},
    config::{apply_env_overrides, validate_config, Config},
    dedup::RedisStore,
    error::{exit_codes, Error, Result},
    feed::{FeedPolicy, Poller, RedditFeed},
    http::HttpClient,
    media::MediaResolver,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
    },
    publish::TwitterPublisher,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                e if e.is_config() => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Api(_) | Error::Fetch { .. } | Error::Http(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with environment and CLI overrides");
        Config::default()
    };

    // Environment first, then CLI
    apply_env_overrides(&mut config)?;
    let command = args.command();
    args.merge_into_config(&mut config);

    validate_config(&config)?;
    print_config_summary(&config);

    // Dedup store
    let store = RedisStore::new(&config.redis)?;
    match store.ping().await {
        Ok(()) => print_success("Connected to Redis"),
        Err(e) => print_warning(&format!(
            "Redis is not reachable yet ({}); cycles will fail until it is",
            e
        )),
    }

    let feed = RedditFeed::new(
        config.reddit.clone(),
        config.general.subreddit_to_monitor.clone(),
    )?;
    check_reddit_credentials(&feed).await?;

    let bot = build_bot(&config, feed, store)?;

    match command {
        Command::Run => {
            let shutdown = shutdown_signal()?;
            run_forever(&bot, config.delay(), shutdown).await;
            print_info("Stopped");
        }
        Command::Once => match bot.run_cycle().await? {
            CycleReport::NoCandidates => print_info("No new posts to process"),
            CycleReport::Recorded { id, outcome } => {
                print_success(&format!("{}: {}", id, outcome))
            }
        },
    }

    Ok(())
}

/// Fail fast on rejected Reddit credentials; other failures may be transient.
async fn check_reddit_credentials(feed: &RedditFeed) -> Result<()> {
    match feed.authenticate().await {
        Ok(()) => {
            print_success("Authenticated with Reddit");
            Ok(())
        }
        Err(Error::Fetch { status, .. }) if status == 400 || status == 401 || status == 403 => {
            Err(Error::ConfigValidation {
                field: "reddit".to_string(),
                message: format!(
                    "Reddit rejected the client credentials (HTTP {}); check client_id and client_secret",
                    status
                ),
            })
        }
        Err(e) => {
            print_warning(&format!(
                "Could not reach Reddit yet ({}); cycles will retry",
                e
            ));
            Ok(())
        }
    }
}

/// Wire the feed, resolver, publisher and store into a bot.
fn build_bot(config: &Config, feed: RedditFeed, store: RedisStore) -> Result<Bot> {
    let poller = Poller::new(
        Arc::new(feed),
        FeedPolicy::from_config(&config.general),
        config.general.post_limit,
    );

    let http = Arc::new(HttpClient::new(&config.reddit.user_agent)?);
    let resolver = MediaResolver::new(http, config);
    let publisher = TwitterPublisher::new(&config.twitter)?;

    Ok(Bot::new(
        poller,
        Arc::new(store),
        resolver,
        Arc::new(publisher),
        config,
    ))
}
