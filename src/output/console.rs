//! Console output utilities.

use console::style;

use crate::config::Config;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = format!(
        r#"
╔═══════════════════════════════════════════════════════╗
║     tootbot {:<42}║
║     Subreddit to Twitter repost daemon                ║
╚═══════════════════════════════════════════════════════╝
"#,
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style(banner).cyan());
}

fn on_off(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Print configuration summary. Credentials are never shown.
pub fn print_config_summary(config: &Config) {
    let general = &config.general;
    let hashtags = config.hashtag_string();

    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Subreddit: r/{}", general.subreddit_to_monitor);
    println!("  Posts per poll: {}", general.post_limit);
    println!("  Delay: {}s", general.delay_between_posts);
    println!(
        "  NSFW: {}  Spoilers: {}  Self posts: {}",
        on_off(general.nsfw_posts_allowed),
        on_off(general.spoilers_allowed),
        on_off(general.self_posts_allowed)
    );
    if !hashtags.is_empty() {
        println!("  Hashtags: {}", hashtags);
    }
    println!("  Media folder: {}", config.media.media_folder.display());
    println!("  Media posts only: {}", on_off(config.media.media_posts_only));
    println!("  Redis: {}:{}", config.redis.host, config.redis.port);
    println!();
}
