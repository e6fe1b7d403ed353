use anyhow::{Context, Result};
use pythia::assets::require_tracks;
use pythia::installation::{open_sensor, Devices, Installation};
use pythia::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_CONFIG: &str = "pythia.toml";

struct Args {
    config: PathBuf,
    dry_run: bool,
    print_config: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        config: PathBuf::from(DEFAULT_CONFIG),
        dry_run: false,
        print_config: false,
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dry-run" => args.dry_run = true,
            "--print-config" => args.print_config = true,
            "--help" | "-h" => {
                eprintln!("Usage: pythia [CONFIG] [--dry-run] [--print-config]");
                eprintln!("  CONFIG          TOML config file (default: {DEFAULT_CONFIG})");
                eprintln!("  --dry-run       log audio commands instead of playing them");
                eprintln!("  --print-config  print the effective configuration and exit");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => {
                eprintln!("Unknown argument: {flag}");
                std::process::exit(2);
            }
            path => args.config = PathBuf::from(path),
        }
    }
    args
}

fn main() -> Result<()> {
    let args = parse_args();
    let loaded = Config::load_if_exists(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let defaulted = loaded.is_none();
    let config = loaded.unwrap_or_default();

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).compact().init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.config.display(),
        dry_run = args.dry_run,
        "Pythia starting"
    );
    if defaulted {
        tracing::info!(path = %args.config.display(), "no config file, using defaults");
    }

    let tracks = require_tracks(&config.audio.music_dir, &config.audio.extension)?;
    tracing::info!(
        count = tracks.len(),
        dir = %config.audio.music_dir.display(),
        "music loaded"
    );

    let devices = Devices::open(&config, args.dry_run)?;
    let sensor = open_sensor(&config)?;

    let mut installation = Installation::assemble(&config, tracks, devices, sensor)?;
    installation.run()?;

    let history = installation.controller().history();
    tracing::info!(
        events = history.total(),
        summary = %serde_json::to_string(history).unwrap_or_default(),
        "Pythia stopped"
    );
    Ok(())
}
