//! webquota CLI: size and exercise the web storage quota allocator.

mod replay;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use webquota_alloc::{calculate_global_limit, QuotaAllocator};
use webquota_core::config::QuotaConfig;
use webquota_core::provider::DiskInfo;
use webquota_core::units::describe_bytes;
use webquota_io::{AppCacheFileInfo, LoggingNotifier, StatFsDiskInfo};

use crate::replay::{Replay, Trace};

#[derive(Parser)]
#[command(name = "webquota")]
#[command(about = "Web storage quota allocator: global limits and quota decisions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the global limit for a partition size and free space
    Limit {
        /// Total partition size in bytes
        #[arg(long)]
        total: i64,

        /// Free space in bytes
        #[arg(long)]
        free: i64,
    },

    /// Snapshot the real filesystem and show the resulting budget
    Inspect {
        /// Web storage directory (overrides config)
        #[arg(long)]
        storage_path: Option<String>,

        /// App cache directory (overrides config)
        #[arg(long)]
        app_cache_path: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay a YAML trace of quota requests
    Replay {
        /// Path to the trace YAML file
        #[arg(short, long)]
        trace: PathBuf,

        /// Emit one JSON object per decision
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct InspectReport {
    storage_path: String,
    app_cache_file: String,
    total_bytes: i64,
    free_bytes: i64,
    global_limit: i64,
    app_cache_max_size: i64,
    unused_quota: i64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("webquota=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Limit { total, free } => {
            println!("{}", limit_line(total, free));
            Ok(())
        }
        Commands::Inspect {
            storage_path,
            app_cache_path,
            json,
        } => inspect(storage_path, app_cache_path, json),
        Commands::Replay { trace, json } => replay_trace(&trace, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn inspect(
    storage_path: Option<String>,
    app_cache_path: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = QuotaConfig::from_env();
    apply_overrides(&mut config, storage_path, app_cache_path);
    let report = inspect_report(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Storage path:    {}", report.storage_path);
        println!("App cache file:  {}", report.app_cache_file);
        println!("Partition size:  {}", describe_bytes(report.total_bytes));
        println!("Free space:      {}", describe_bytes(report.free_bytes));
        println!("Global limit:    {}", describe_bytes(report.global_limit));
        println!("App cache max:   {}", describe_bytes(report.app_cache_max_size));
        println!("Database room:   {}", describe_bytes(report.unused_quota));
    }
    Ok(())
}

/// Global limit in bytes, as printed by `webquota limit`.
fn limit_line(total: i64, free: i64) -> String {
    calculate_global_limit(total, free).to_string()
}

/// Snapshot the configured paths and size an allocator from them.
fn inspect_report(config: &QuotaConfig) -> Result<InspectReport, Box<dyn std::error::Error>> {
    let disk = StatFsDiskInfo::new(&config.storage_path)?;
    let cache = AppCacheFileInfo::new(&config.app_cache_path);
    let allocator = QuotaAllocator::with_config(config, &disk, &cache)?;

    Ok(InspectReport {
        storage_path: config.storage_path.clone(),
        app_cache_file: cache.file().display().to_string(),
        total_bytes: disk.total_size_bytes(),
        free_bytes: disk.free_space_bytes(),
        global_limit: allocator.global_limit(),
        app_cache_max_size: allocator.app_cache_max_size(),
        unused_quota: allocator.unused_quota(0),
    })
}

fn replay_trace(trace_path: &PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(trace_path)?;
    let trace: Trace = serde_yaml::from_str(&yaml_content)?;
    tracing::debug!(
        path = %trace_path.display(),
        requests = trace.requests.len(),
        "replaying trace"
    );

    let config = QuotaConfig::from_env();
    let mut replay = Replay::new(&trace, &config, LoggingNotifier)?;
    if !json {
        println!(
            "Global limit {}, app cache starts at {}",
            describe_bytes(replay.allocator().global_limit()),
            describe_bytes(replay.allocator().app_cache_max_size())
        );
    }

    for step in replay.run(&trace.requests) {
        if json {
            println!("{}", serde_json::to_string(&step)?);
        } else {
            println!(
                "{:?} -> {} (total used {}, app cache max {})",
                step.request, step.decision, step.total_used_quota, step.app_cache_max_size
            );
        }
    }

    let stats = replay.allocator().stats();
    if !json {
        println!(
            "✓ {} database grants, {} app cache grants, {} out-of-space",
            stats.database_grants, stats.app_cache_grants, stats.out_of_space
        );
    }
    Ok(())
}

fn apply_overrides(
    cfg: &mut QuotaConfig,
    storage_path: Option<String>,
    app_cache_path: Option<String>,
) {
    if let Some(path) = storage_path {
        cfg.storage_path = path;
    }
    if let Some(path) = app_cache_path {
        cfg.app_cache_path = path;
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_overrides, inspect_report, limit_line, QuotaConfig};
    use webquota_core::units::{APP_CACHE_FILE, MIB};

    fn temp_storage_dir(name: &str) -> std::path::PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("webquota-cli-tests-{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn limit_prints_bytes() {
        assert_eq!(limit_line(1_000_000_000, 500_000_000), (120 * MIB).to_string());
        assert_eq!(limit_line(1024 * MIB, 2048 * MIB), "0");
    }

    #[test]
    fn inspect_report_reflects_filesystem_and_policy() {
        let dir = temp_storage_dir("inspect");
        std::fs::write(dir.join(APP_CACHE_FILE), vec![0u8; 4096]).expect("write cache");
        let config = QuotaConfig {
            storage_path: dir.to_string_lossy().to_string(),
            app_cache_path: dir.to_string_lossy().to_string(),
            ..Default::default()
        };

        let report = inspect_report(&config).expect("inspect temp dir");
        assert!(report.total_bytes > 0);
        assert!(report.free_bytes <= report.total_bytes);
        assert_eq!(report.global_limit % MIB, 0);
        assert!(report.app_cache_max_size >= 4096);
        assert!(report.app_cache_max_size >= report.global_limit / 4);
        assert_eq!(
            report.unused_quota,
            report.global_limit - report.app_cache_max_size
        );
        assert!(report.app_cache_file.ends_with(APP_CACHE_FILE));
    }

    #[test]
    fn inspect_report_rejects_missing_path_and_bad_policy() {
        let missing = QuotaConfig {
            storage_path: "/definitely/not/a/real/webquota/path".into(),
            ..Default::default()
        };
        assert!(inspect_report(&missing).is_err());

        let dir = temp_storage_dir("badpolicy");
        let bad = QuotaConfig {
            storage_path: dir.to_string_lossy().to_string(),
            origin_default_quota: -1,
            ..Default::default()
        };
        assert!(inspect_report(&bad).is_err());
    }

    #[test]
    fn cli_overrides_replace_config_paths() {
        let mut config = QuotaConfig::default();
        apply_overrides(&mut config, Some("/tmp/ws".into()), None);
        assert_eq!(config.storage_path, "/tmp/ws");
        assert_eq!(config.app_cache_path, "/data/webstorage/appcache");
    }

    #[test]
    fn cli_overrides_keep_numeric_policy() {
        let mut config = QuotaConfig {
            quota_increase_step: 2 * 1024 * 1024,
            ..Default::default()
        };
        apply_overrides(&mut config, None, Some("/tmp/ac".into()));
        assert_eq!(config.app_cache_path, "/tmp/ac");
        assert_eq!(config.quota_increase_step, 2 * 1024 * 1024);
    }
}
