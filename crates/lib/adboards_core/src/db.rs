//! Ephemeral PostgreSQL management for local development and tests.
//!
//! Spawns `initdb`, `pg_ctl`, and `pg_isready` (discovered via `pg_config`)
//! against a temporary data directory. Integration tests use this to run the
//! full stack against a real database without external setup.

use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;

use sqlx::postgres::PgPool;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::sleep;

/// Database name for the AdBoards application.
const DEFAULT_DATABASE: &str = "adboards";

/// Maximum time to wait for PostgreSQL to become ready.
const PG_READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll interval when waiting for PostgreSQL readiness.
const PG_READY_POLL: Duration = Duration::from_millis(200);

/// Errors that can occur during database lifecycle operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("PostgreSQL command failed: {0}")]
    Command(String),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pg_config not found on PATH")]
    PgConfigNotFound,

    #[error("PostgreSQL not ready after {0:?}")]
    ReadyTimeout(Duration),
}

/// Result type for database lifecycle operations.
pub type Result<T> = std::result::Result<T, DbError>;

/// Manages a throwaway PostgreSQL instance on a free ephemeral port.
///
/// The data directory lives in a tempdir and is cleaned up on drop.
pub struct EphemeralDb {
    bin_dir: PathBuf,
    data_dir: PathBuf,
    port: u16,
    started: bool,
    /// Holds the tempdir so it lives as long as the instance.
    _tempdir: tempfile::TempDir,
}

impl EphemeralDb {
    /// Create a new instance, discovering PG binaries via `pg_config`.
    pub async fn new() -> Result<Self> {
        let output = Command::new("pg_config")
            .arg("--bindir")
            .output()
            .await
            .map_err(|_| DbError::PgConfigNotFound)?;
        if !output.status.success() {
            return Err(DbError::PgConfigNotFound);
        }
        let bin_dir = String::from_utf8_lossy(&output.stdout).trim().to_string();

        let tempdir = tempfile::tempdir()?;
        let data_dir = tempdir.path().join("pgdata");

        Ok(Self {
            bin_dir: PathBuf::from(bin_dir),
            data_dir,
            port: 0,
            started: false,
            _tempdir: tempdir,
        })
    }

    /// Initialize the data directory. Skips if already initialized.
    pub async fn setup(&mut self) -> Result<()> {
        if self.data_dir.join("PG_VERSION").exists() {
            log::info!("Data directory already initialized, skipping initdb");
            return Ok(());
        }

        log::info!("Initializing PostgreSQL data directory...");
        let initdb = self.bin_dir.join("initdb");
        let output = Command::new(&initdb)
            .arg("-D")
            .arg(&self.data_dir)
            .arg("--no-locale")
            .arg("--encoding=UTF8")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("initdb failed: {stderr}")));
        }
        Ok(())
    }

    /// Start the server and ensure the application database exists.
    pub async fn start(&mut self) -> Result<()> {
        if self.port == 0 {
            self.port = find_free_port()?;
        }

        log::info!("Starting PostgreSQL on port {}...", self.port);

        let pg_ctl = self.bin_dir.join("pg_ctl");
        let port_opt = format!(
            "-p {} -k {} -h localhost",
            self.port,
            self.data_dir.display()
        );
        let logfile = self.data_dir.join("postgresql.log");

        let output = Command::new(&pg_ctl)
            .arg("-D")
            .arg(&self.data_dir)
            .arg("-o")
            .arg(&port_opt)
            .arg("-l")
            .arg(&logfile)
            .arg("start")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("pg_ctl start failed: {stderr}")));
        }

        self.wait_for_ready().await?;
        self.started = true;
        self.create_database_if_missing().await?;

        log::info!("Database ready at {}", self.connection_url());
        Ok(())
    }

    /// Stop the server gracefully.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.started {
            return Ok(());
        }

        let pg_ctl = self.bin_dir.join("pg_ctl");
        let output = Command::new(&pg_ctl)
            .arg("-D")
            .arg(&self.data_dir)
            .arg("-m")
            .arg("fast")
            .arg("stop")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("pg_ctl stop failed: {stderr}")));
        }

        self.started = false;
        Ok(())
    }

    /// Connection URL for the application database.
    pub fn connection_url(&self) -> String {
        format!("postgresql://localhost:{}/{}", self.port, DEFAULT_DATABASE)
    }

    /// The port the server is listening on (0 if not yet assigned).
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for PostgreSQL to become ready, polling `pg_isready`.
    async fn wait_for_ready(&self) -> Result<()> {
        let pg_isready = self.bin_dir.join("pg_isready");
        let deadline = tokio::time::Instant::now() + PG_READY_TIMEOUT;

        loop {
            let output = Command::new(&pg_isready)
                .arg("-p")
                .arg(self.port.to_string())
                .arg("-h")
                .arg("localhost")
                .output()
                .await?;

            if output.status.success() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(DbError::ReadyTimeout(PG_READY_TIMEOUT));
            }
            sleep(PG_READY_POLL).await;
        }
    }

    /// Create the application database if it doesn't exist.
    async fn create_database_if_missing(&self) -> Result<()> {
        let maintenance_url = format!("postgresql://localhost:{}/postgres", self.port);
        let pool = PgPool::connect(&maintenance_url).await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
                .bind(DEFAULT_DATABASE)
                .fetch_one(&pool)
                .await?;

        if !exists {
            // CREATE DATABASE cannot use bind parameters.
            let sql = format!("CREATE DATABASE \"{DEFAULT_DATABASE}\"");
            sqlx::query(&sql).execute(&pool).await?;
        }

        pool.close().await;
        Ok(())
    }
}

/// Find a free ephemeral port by binding to port 0.
fn find_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    Ok(port)
}
