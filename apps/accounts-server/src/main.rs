use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use db::{ConnectOpts, DbHandle};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};

use accounts::{config::AccountsConfig, Accounts};
use api_ingress::{ApiIngress, ApiIngressConfig};

use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Process exit code when the database cannot be opened or migrated.
const EXIT_DB_INIT_FAILED: i32 = 4;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
/// - Adds `mode=rwc` so a missing database file gets created.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if dsn.contains(":memory:") || dsn.contains("mode=memory") {
        return Ok(dsn.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    match query {
        Some(q) if q.split('&').any(|kv| kv.starts_with("mode=")) => {
            out.push('?');
            out.push_str(q);
        }
        Some(q) => {
            out.push('?');
            out.push_str(q);
            out.push_str("&mode=rwc");
        }
        None => out.push_str("?mode=rwc"),
    }
    Ok(out)
}

/// Account REST API Service
#[derive(Parser)]
#[command(name = "accounts-server")]
#[command(about = "Account REST API Service - CRUD over customer accounts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration and database connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Account REST API Service starting");
    tracing::debug!(?config.server, "Effective server configuration");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Connect, then bring the accounts schema up to date.
async fn open_database(config: &AppConfig) -> Result<DbHandle> {
    let db_config = config.database.clone().unwrap_or_default();
    let backend = detect_from_dsn(&db_config)?;

    let mut dsn = db_config.url.trim().to_owned();
    if backend == "sqlite" {
        dsn = absolutize_sqlite_dsn(&dsn, Path::new(&config.server.home_dir))?;
    }

    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms))),
        create_sqlite_dirs: true,
    };

    tracing::info!("Connecting to database: {}", redact_dsn(&dsn));
    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .context("database connection failed")?;
    tracing::info!("Connected DB backend: {:?}", db.engine());

    Accounts::migrate(&db.sea())
        .await
        .context("database migration failed")?;
    Ok(db)
}

/// Hide the password part of a DSN before logging it.
fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => dsn.to_string(),
    }
}

async fn open_database_or_exit(config: &AppConfig) -> DbHandle {
    match open_database(config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Database initialization failed: {:#}", e);
            eprintln!("Database initialization failed: {e:#}");
            std::process::exit(EXIT_DB_INIT_FAILED);
        }
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let accounts_cfg: AccountsConfig = config.module_config(Accounts::NAME)?;
    let mut ingress_cfg: ApiIngressConfig = config.module_config(ApiIngress::NAME)?;
    if config.server.timeout_sec > 0 {
        ingress_cfg.request_timeout_secs = config.server.timeout_sec;
    }

    let db = open_database_or_exit(&config).await;

    tracing::info!("Initializing modules...");
    let accounts = Accounts::init(db.sea(), &accounts_cfg);
    let ingress = ApiIngress::new(ingress_cfg);

    let routes = accounts.register_rest(axum::Router::new());
    let router = ingress.build_router(routes, Some(accounts.openapi()))?;
    let addr = ingress.bind_addr(&config.server.host, config.server.port)?;

    ingress.serve(router, addr, shutdown_signal()).await?;

    db.close().await;
    tracing::info!("Account REST API Service stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // Module sections must deserialize
    let _: AccountsConfig = config.module_config(Accounts::NAME)?;
    let ingress_cfg: ApiIngressConfig = config.module_config(ApiIngress::NAME)?;
    ApiIngress::new(ingress_cfg).bind_addr(&config.server.host, config.server.port)?;

    let db = open_database_or_exit(&config).await;
    db.close().await;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_sqlite_paths_resolve_under_home() {
        let dsn = absolutize_sqlite_dsn("sqlite://database/accounts.db", Path::new("/srv/home"))
            .unwrap();
        assert_eq!(dsn, "sqlite:///srv/home/database/accounts.db?mode=rwc");
    }

    #[test]
    fn explicit_mode_is_kept() {
        let dsn = absolutize_sqlite_dsn("sqlite:///tmp/a.db?mode=ro", Path::new("/x")).unwrap();
        assert_eq!(dsn, "sqlite:///tmp/a.db?mode=ro");

        let dsn = absolutize_sqlite_dsn("sqlite:///tmp/a.db?cache=shared", Path::new("/x")).unwrap();
        assert_eq!(dsn, "sqlite:///tmp/a.db?cache=shared&mode=rwc");
    }

    #[test]
    fn memory_dsn_untouched() {
        assert_eq!(
            absolutize_sqlite_dsn("sqlite::memory:", Path::new("/x")).unwrap(),
            "sqlite::memory:"
        );
    }

    #[test]
    fn dsn_scheme_detection() {
        let cfg = |url: &str| DatabaseConfig {
            url: url.into(),
            ..Default::default()
        };
        assert_eq!(detect_from_dsn(&cfg("sqlite::memory:")).unwrap(), "sqlite");
        assert_eq!(detect_from_dsn(&cfg("postgres://u@h/db")).unwrap(), "postgres");
        assert!(detect_from_dsn(&cfg("mysql://h/db")).is_err());
        assert!(detect_from_dsn(&cfg("  ")).is_err());
    }

    #[test]
    fn password_is_redacted() {
        assert_eq!(
            redact_dsn("postgres://user:secret@db/accounts"),
            "postgres://user:***@db/accounts"
        );
        assert_eq!(redact_dsn("sqlite::memory:"), "sqlite::memory:");
    }
}
