//! Binary entrypoint for the homekeep CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml`, the data directory, empty home documents and
//!   the bundled English catalog
//! - `status` - print home and translation counts
//! - `console [--account <uuid>] [--locale <tag>] [--operator] [--world <id>]` - run home
//!   commands typed on stdin as a simulated player
//!
//! See the library crate docs for module-level details: `homekeep::`.
use std::path::Path;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use homekeep::commands::{HomeService, Requester};
use homekeep::config::Config;
use homekeep::homes::{HomeStore, Location};
use homekeep::i18n::{loader, TranslationResolver};

#[derive(Parser)]
#[command(name = "homekeep")]
#[command(about = "Named personal and global homes with limits, cooldowns and localized replies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration and data layout
    Init,
    /// Show home and translation statistics
    Status,
    /// Run home commands from stdin as one player
    Console {
        /// Account UUID to act as (random when omitted)
        #[arg(short, long)]
        account: Option<Uuid>,

        /// Client language tag, e.g. de_DE
        #[arg(short, long, default_value = "en_US")]
        locale: String,

        /// Grant operator privileges (global homes, limits, cooldown)
        #[arg(long)]
        operator: bool,

        /// Region the simulated player starts in
        #[arg(short, long, default_value = "world")]
        world: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            info!("Initializing new homekeep configuration");
            let cfg = init_layout(&cli.config).await?;
            info!("Initialized data directory at {}", cfg.storage.data_dir);
        }
        Commands::Status => {
            let config = Config::load(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            let service = build_service(&config);
            let registry = service.registry();
            println!("homekeep v{}", env!("CARGO_PKG_VERSION"));
            println!("Accounts with homes: {}", registry.account_count());
            println!(
                "Personal homes:      {}",
                registry
                    .personal()
                    .values()
                    .map(|homes| homes.len())
                    .sum::<usize>()
            );
            println!("Global homes:        {}", registry.global_home_count());
            println!(
                "Max homes:           {}",
                describe_setting(config.homes.max_homes, "unlimited")
            );
            println!(
                "Cooldown seconds:    {}",
                describe_setting(config.homes.cooldown_seconds, "disabled")
            );
            println!(
                "Locales:             {}",
                service.resolver().locales().join(", ")
            );
        }
        Commands::Console {
            account,
            locale,
            operator,
            world,
        } => {
            let mut config = Config::load(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            info!("Starting homekeep v{}", env!("CARGO_PKG_VERSION"));
            let mut service = build_service(&config);
            let mut player = Requester {
                account: account.unwrap_or_else(Uuid::new_v4),
                locale,
                operator,
                location: Location::at(world, 0.0, 64.0, 0.0),
            };
            info!(
                "Console session for {} (locale {}, operator: {})",
                player.account, player.locale, player.operator
            );
            run_console(&cli.config, &mut config, &mut service, &mut player).await?;
            if let Err(e) = service.save_all() {
                warn!("Final save failed: {}", e);
            }
            info!("Console session ended");
        }
    }

    Ok(())
}

/// Write a default config unless one exists, then lay out the paths that config names.
async fn init_layout(config_path: &str) -> Result<Config> {
    let cfg = if Path::new(config_path).exists() {
        warn!("{} already exists; leaving it untouched", config_path);
        Config::load(config_path).await?
    } else {
        Config::create_default(config_path).await?;
        info!("Configuration file created at {}", config_path);
        Config::default()
    };

    let store = HomeStore::from_config(&cfg.storage);
    store.ensure_layout()?;
    let translations = Path::new(&cfg.storage.translations_dir);
    if loader::write_bundled_catalog(translations)? {
        info!("Wrote bundled English catalog to {}", translations.display());
    }
    Ok(cfg)
}

fn describe_setting(value: i64, off: &str) -> String {
    if value <= -1 {
        off.to_string()
    } else {
        value.to_string()
    }
}

fn build_service(config: &Config) -> HomeService {
    let store = HomeStore::from_config(&config.storage);
    let (registry, _summary) = store.load();
    let catalogs = loader::load_catalog_dir(Path::new(&config.storage.translations_dir));
    let resolver = TranslationResolver::new(catalogs);
    HomeService::new(registry, store, resolver, config.homes)
}

/// Parse `pos <world> <x> <y> <z> [yaw] [pitch]` arguments.
fn parse_position(args: &[&str]) -> Result<Location> {
    if !(4..=6).contains(&args.len()) {
        return Err(anyhow!("usage: pos <world> <x> <y> <z> [yaw] [pitch]"));
    }
    // "nan" and "inf" parse as f64 but cannot be stored
    let num = |s: &str| -> Result<f64> {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| anyhow!("'{}' is not a finite number", s))
    };
    let angle = |s: &str| -> Result<f32> {
        Some(num(s)? as f32)
            .filter(|v| v.is_finite())
            .ok_or_else(|| anyhow!("'{}' is out of range for an angle", s))
    };
    let yaw = args.get(4).copied().map(angle).transpose()?.unwrap_or(0.0);
    let pitch = args.get(5).copied().map(angle).transpose()?.unwrap_or(0.0);
    Ok(Location::new(
        args[0],
        num(args[1])?,
        num(args[2])?,
        num(args[3])?,
        yaw,
        pitch,
    ))
}

async fn run_console(
    config_path: &str,
    config: &mut Config,
    service: &mut HomeService,
    player: &mut Requester,
) -> Result<()> {
    println!("Type home commands (e.g. `sethome base`), `pos`, `where`, `complete`, `reload` or `quit`.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let Some(first) = parts.first() else {
            continue;
        };

        match first.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "where" => println!("{}", player.location),
            "pos" => match parse_position(&parts[1..]) {
                Ok(location) => {
                    player.location = location;
                    println!("{}", player.location);
                }
                Err(e) => println!("{}", e),
            },
            "complete" => {
                let command = parts.get(1).copied().unwrap_or("");
                let partial = parts.get(2).copied().unwrap_or("");
                println!("{}", service.complete(player, command, partial).join(" "));
            }
            "reload" => {
                let catalogs =
                    loader::load_catalog_dir(Path::new(&config.storage.translations_dir));
                service.reload_translations(catalogs);
            }
            _ => {
                let now = chrono::Utc::now().timestamp_millis();
                let reply = service.execute_line(player, trimmed, now);
                for message in &reply.messages {
                    println!("{}", message);
                }
                if let Some(target) = reply.teleport {
                    player.location = target;
                }
                if reply.settings_changed {
                    config.homes = service.settings();
                    if let Err(e) = config.save(config_path).await {
                        warn!("Could not persist settings: {}", e);
                    }
                }
            }
        }
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .as_ref()
        .and_then(|cfg| cfg.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Only echo to the console when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
