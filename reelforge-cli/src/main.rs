use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context as _};
use chrono::{Datelike, Local, NaiveTime};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use reelforge_core::config::{ConfigManager, Settings};
use reelforge_core::generation::{preview, VideoGenerator};
use reelforge_core::library::MusicLibrary;
use reelforge_core::services::{GoogleTtsClient, PexelsClient, TikTokClient, TokenStore};

#[derive(Parser, Debug)]
#[command(name = "reelforge", version, about = "Automated short-form video generation and posting")]
struct Cli {
    /// Config file (created with defaults on first run).
    #[arg(long, default_value = "reelforge.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate content JSON for a day without producing media.
    Generate {
        /// Rotation day (defaults to today's day of year).
        #[arg(long)]
        day: Option<u32>,
    },

    /// Run one full job: synthesize, compose and (by default) publish.
    Run {
        /// Rotation day (defaults to today's day of year).
        #[arg(long)]
        day: Option<u32>,

        /// Stop after composition, skip publishing.
        #[arg(long)]
        no_publish: bool,
    },

    /// Run the daily scheduler: one job at the configured post time.
    Daemon,

    /// Test connectivity of all configured services.
    TestApis,

    /// Seed or refresh the publishing token store.
    Auth {
        /// Refresh token to exchange for a fresh access token.
        #[arg(long)]
        refresh_token: Option<String>,

        /// Store this access token directly (with --refresh-token).
        #[arg(long)]
        access_token: Option<String>,

        /// Lifetime in seconds when storing directly.
        #[arg(long, default_value_t = 86400)]
        expires_in: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::new(&cli.config);
    config
        .load_or_create()
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    config.ensure_directories().context("creating directories")?;
    let settings = config.settings().clone();

    let _log_guard = init_logging(&settings, matches!(cli.command, Command::Daemon));

    match cli.command {
        Command::Generate { day } => generate(day),
        Command::Run { day, no_publish } => run_once(&settings, day, !no_publish).await,
        Command::Daemon => daemon(&settings).await,
        Command::TestApis => test_apis(&settings).await,
        Command::Auth {
            refresh_token,
            access_token,
            expires_in,
        } => auth(&settings, refresh_token, access_token, expires_in).await,
    }
}

/// Console logging everywhere; the daemon additionally writes daily
/// rolling log files.
fn init_logging(
    settings: &Settings,
    daemon: bool,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if daemon {
        let appender = tracing_appender::rolling::daily(&settings.paths.logs_dir, "reelforge.log");
        let (file_writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file_writer.and(std::io::stdout))
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        None
    }
}

/// Today's day of year (1-366).
fn today() -> u32 {
    Local::now().ordinal()
}

fn env_or_empty(name: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            warn!("{} not set", name);
            String::new()
        }
    }
}

fn build_publisher(settings: &Settings) -> TikTokClient {
    let token_store = TokenStore::new(&settings.publish.token_file);
    TikTokClient::new(
        env_or_empty("TIKTOK_CLIENT_KEY"),
        env_or_empty("TIKTOK_CLIENT_SECRET"),
        token_store,
    )
}

fn build_generator(
    settings: &Settings,
) -> VideoGenerator<GoogleTtsClient, PexelsClient, TikTokClient> {
    let speech = GoogleTtsClient::new(env_or_empty("GOOGLE_TTS_API_KEY"));
    let footage = PexelsClient::new(env_or_empty("PEXELS_API_KEY"), settings.stock.clone());
    let publisher = build_publisher(settings);

    let manifest = PathBuf::from(&settings.paths.music_manifest);
    let music = if manifest.exists() {
        match MusicLibrary::load(&manifest) {
            Ok(library) => library,
            Err(e) => {
                warn!("Music library unavailable: {}", e);
                MusicLibrary::empty()
            }
        }
    } else {
        warn!(
            "Music manifest not found at {}; videos will use a silent bed",
            manifest.display()
        );
        MusicLibrary::empty()
    };

    VideoGenerator::new(speech, footage, Some(publisher), music, settings.clone())
}

fn generate(day: Option<u32>) -> anyhow::Result<()> {
    let day = day.unwrap_or_else(today);
    let (topic, content) = preview(day);

    info!(
        "Topic for day {}: niche={} angle='{}'",
        day, topic.niche, topic.angle
    );
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

async fn run_once(settings: &Settings, day: Option<u32>, publish: bool) -> anyhow::Result<()> {
    let day = day.unwrap_or_else(today);
    let generator = build_generator(settings);

    let result = generator.generate_and_post(day, publish).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.is_success() {
        bail!("generation failed: {}", result.error.unwrap_or_default());
    }
    Ok(())
}

async fn daemon(settings: &Settings) -> anyhow::Result<()> {
    let post_time = NaiveTime::parse_from_str(&settings.schedule.post_time, "%H:%M")
        .with_context(|| format!("invalid post_time '{}'", settings.schedule.post_time))?;

    info!(
        "Scheduler active: daily post at {} local time",
        settings.schedule.post_time
    );

    if settings.schedule.generate_on_startup {
        info!("generate_on_startup set; running a job now");
        run_scheduled(settings).await;
    }

    loop {
        let wait = until_next(post_time);
        info!("Next run in {}s", wait.as_secs());
        tokio::time::sleep(wait).await;
        run_scheduled(settings).await;
    }
}

async fn run_scheduled(settings: &Settings) {
    info!("Scheduled task triggered - starting video generation");
    let generator = build_generator(settings);
    let result = generator.generate_and_post(today(), true).await;

    if result.is_success() {
        info!(
            "Daily video job finished: {:?} post_id={:?}",
            result.status, result.post_id
        );
    } else {
        error!(
            "Daily video job failed: {}",
            result.error.unwrap_or_default()
        );
    }
}

/// Duration until the next local occurrence of `time`.
fn until_next(time: NaiveTime) -> Duration {
    let now = Local::now().naive_local();
    let mut next = now.date().and_time(time);
    if next <= now {
        next += chrono::Duration::days(1);
    }
    (next - now).to_std().unwrap_or(Duration::from_secs(60))
}

async fn test_apis(settings: &Settings) -> anyhow::Result<()> {
    let generator = build_generator(settings);
    let status = generator.test_connections().await;

    println!("speech:    {}", if status.speech { "ok" } else { "FAILED" });
    println!("footage:   {}", if status.footage { "ok" } else { "FAILED" });
    match status.publisher {
        Some(true) => println!("publisher: ok"),
        Some(false) => println!("publisher: FAILED"),
        None => println!("publisher: not configured"),
    }

    if !status.speech || !status.footage {
        bail!("one or more required services are unavailable");
    }
    Ok(())
}

async fn auth(
    settings: &Settings,
    refresh_token: Option<String>,
    access_token: Option<String>,
    expires_in: i64,
) -> anyhow::Result<()> {
    let token_store = TokenStore::new(&settings.publish.token_file);

    match (access_token, refresh_token) {
        (Some(access), Some(refresh)) => {
            token_store.persist(access, refresh, expires_in)?;
            println!("Tokens stored in {}", token_store.path().display());
        }
        (None, Some(refresh)) => {
            let client = build_publisher(settings);
            let tokens = client.exchange_refresh_token(&refresh).await?;
            println!(
                "Access token refreshed; valid for {}s, stored in {}",
                tokens.expires_in,
                token_store.path().display()
            );
        }
        _ => bail!("provide --refresh-token (optionally with --access-token)"),
    }

    Ok(())
}
