// logx demo - print sample records with the given logger options

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use logx::log::{self as logx_log, attr, with_logger, Context, Logger, LoggerConfig};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "logx-demo")]
#[command(author = "hatlonely <hatlonely@foxmail.com>")]
#[command(version = "0.1.0")]
#[command(about = "Print sample log records with the given logger options", long_about = None)]
struct Cli {
    /// Path to logger config file (json/json5/yaml/yml/toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Minimum level: debug, info, warn, error
    #[arg(short, long)]
    level: Option<String>,

    /// Output JSON instead of key=value text
    #[arg(long)]
    json: bool,

    /// Include the call site
    #[arg(long)]
    source: bool,

    /// Include the call site as <dir>/<file>:<line>
    #[arg(long)]
    short_source: bool,

    /// Install the logger as the process default
    #[arg(long)]
    set_default: bool,

    /// Rename a reserved key, e.g. --rename time=timestamp
    #[arg(long, value_parser = parse_key_val)]
    rename: Vec<(String, String)>,

    /// Finish with a FATAL record and exit with status 1
    #[arg(long)]
    fatal: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    Ok((key.to_string(), value.to_string()))
}

/// Config file first, then command line flags on top
fn build_config(cli: &Cli) -> Result<LoggerConfig> {
    let mut config = match &cli.config {
        Some(path) => LoggerConfig::from_file(path)
            .with_context(|| format!("Failed to load logger config: {}", path))?,
        None => LoggerConfig::default(),
    };

    if let Some(level) = &cli.level {
        config.level = level.clone();
    }
    config.json_format |= cli.json;
    config.add_source |= cli.source;
    config.add_short_source |= cli.short_source;
    config.set_default |= cli.set_default;
    for (key, name) in &cli.rename {
        config.replace_keys.insert(key.clone(), name.clone());
    }

    Ok(config)
}

fn handle_request(ctx: &Context, path: &str) {
    let logger = logx_log::logger_from_context(Some(ctx));
    logger.infom(
        "handle request",
        vec![
            attr::string("path", path),
            attr::duration("elapsed", Duration::from_millis(12)),
        ],
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let set_default = config.set_default;
    let logger = Arc::new(Logger::from_config(config)?);

    logger.debug("debug message");
    logger.infom(
        "user logged in",
        vec![
            attr::int64("user_id", 12345),
            attr::uint64("quota_bytes", u64::MAX),
            attr::string("username", "alice"),
            attr::string_opt("email", None::<String>),
        ],
    );
    logger.warnm(
        "high memory usage",
        vec![attr::group(
            "memory",
            vec![attr::int64("used_mb", 900), attr::int64("total_mb", 1024)],
        )],
    );

    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    logger.errorm("database unavailable", vec![attr::error(Some(&err))]);

    let ctx = with_logger(&Context::background(), logger.clone());
    handle_request(&ctx, "/api/users");

    if set_default {
        logx_log::info("message from the default logger");
        log::info!("message from the log facade");
    }

    if cli.fatal {
        logger.fatalm("unrecoverable state", vec![attr::string("reason", "demo")]);
    }

    Ok(())
}
