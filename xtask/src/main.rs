// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! ### Backend Testing Commands
//!
//! - `cargo test` runs all standard tests against `SQLite`
//! - `cargo xtask test-mariadb` runs the ignored backend validation tests
//!   against a throwaway `MariaDB` container
//! - `cargo xtask verify-migrations` applies both migration sets and fails
//!   if the resulting tables or columns differ
//!
//! Standard `cargo test` never needs Docker. Everything that does lives here.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    process::Output,
    thread::sleep,
    time::Duration,
};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::Text;
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const SQLITE_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations");
const MYSQL_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations_mysql");

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Lint formatting, typos, and clippy
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run `MariaDB` backend validation tests
    #[command(visible_alias = "tm")]
    TestMariadb,

    /// Verify table and column parity between `SQLite` and `MySQL` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestMariadb => test_mariadb(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Lint formatting, typos, and clippy
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Run lib, integration, and doc tests
fn test() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])?;
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// A throwaway `MariaDB` 11 container.
///
/// The container is stopped and removed when this value is dropped, so
/// cleanup happens on every exit path.
struct MariadbContainer {
    name: &'static str,
    database: &'static str,
    user: &'static str,
    password: &'static str,
    port: &'static str,
}

impl MariadbContainer {
    /// Starts the container and waits up to 30 seconds for it to accept
    /// connections.
    fn start(
        name: &'static str,
        database: &'static str,
        password: &'static str,
        port: &'static str,
    ) -> Result<Self> {
        tracing::info!("Checking Docker availability");
        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        let container = Self {
            name,
            database,
            user: "frontdesk",
            password,
            port,
        };
        container.remove();

        tracing::info!("Starting MariaDB container: {name}");
        cmd!(
            "docker",
            "run",
            "--name",
            name,
            "-e",
            format!("MARIADB_DATABASE={database}"),
            "-e",
            format!("MARIADB_USER={}", container.user),
            "-e",
            format!("MARIADB_PASSWORD={password}"),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{port}:3306"),
            "-d",
            "mariadb:11"
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        container.wait_until_ready()?;
        Ok(container)
    }

    fn wait_until_ready(&self) -> Result<()> {
        tracing::info!("Waiting for MariaDB to be ready...");
        let max_attempts = 30;
        for attempt in 1..=max_attempts {
            sleep(Duration::from_secs(1));
            tracing::debug!("Connection attempt {attempt}/{max_attempts}");

            let result = cmd!(
                "docker",
                "exec",
                self.name,
                "mariadb",
                "-u",
                self.user,
                format!("-p{}", self.password),
                "-e",
                "SELECT 1"
            )
            .run();

            if result.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(());
            }
        }
        Err(eyre!("MariaDB did not become ready within timeout"))
    }

    fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            self.user, self.password, self.port, self.database
        )
    }

    fn remove(&self) {
        let _ = cmd!("docker", "stop", self.name).run();
        let _ = cmd!("docker", "rm", self.name).run();
    }
}

impl Drop for MariadbContainer {
    fn drop(&mut self) {
        tracing::info!("Stopping MariaDB container: {}", self.name);
        self.remove();
    }
}

/// Run `MariaDB` backend validation tests
///
/// Starts a `MariaDB` container on port 3307, then runs the ignored tests in
/// the `backend_validation_tests` module of `frontdesk-persistence` with
/// `DATABASE_URL` and `FRONTDESK_TEST_BACKEND=mariadb` set.
///
/// ## Requirements
///
/// - Docker must be installed and running
/// - Port 3307 must be available
/// - `MySQL` client libraries must be available for compilation
fn test_mariadb() -> Result<()> {
    tracing::info!("Starting MariaDB backend validation");

    let container = MariadbContainer::start(
        "frontdesk-test-mariadb",
        "frontdesk_test",
        "test_password",
        "3307",
    )?;

    tracing::info!("Running MariaDB backend validation tests");
    cmd!(
        "cargo",
        "test",
        "--package",
        "frontdesk-persistence",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", container.database_url())
    .env("FRONTDESK_TEST_BACKEND", "mariadb")
    .run_with_trace()
    .wrap_err("MariaDB backend validation tests failed")?;

    tracing::info!("MariaDB backend validation completed successfully");
    Ok(())
}

/// Verify table and column parity between `SQLite` and `MySQL` migrations
///
/// Applies `migrations/` to an in-memory `SQLite` database and
/// `migrations_mysql/` to a `MariaDB` container on port 3308, then compares
/// every table's column names and nullability.
fn verify_migrations() -> Result<()> {
    tracing::info!("Starting schema parity verification");

    let mut sqlite_conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    sqlite_conn
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;
    tracing::info!("SQLite migrations applied successfully");

    let container = MariadbContainer::start(
        "frontdesk-verify-migrations",
        "frontdesk_verify",
        "verify_password",
        "3308",
    )?;
    let mut mysql_conn = MysqlConnection::establish(&container.database_url())
        .wrap_err("Failed to connect to MariaDB")?;
    mysql_conn
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply MySQL migrations: {e}"))?;
    tracing::info!("MySQL migrations applied successfully");

    let sqlite_schema = introspect_sqlite_schema(&mut sqlite_conn)?;
    let mysql_schema = introspect_mysql_schema(&mut mysql_conn, container.database)?;
    compare_schemas(&sqlite_schema, &mysql_schema)?;

    tracing::info!("Schema parity verification passed");
    Ok(())
}

/// Table name to column name to nullability.
type Schema = BTreeMap<String, BTreeMap<String, bool>>;

#[derive(QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    column_name: String,
    #[diesel(sql_type = Text)]
    is_nullable: String,
}

fn collect_schema(rows: Vec<ColumnRow>) -> Schema {
    let mut schema = Schema::new();
    for row in rows {
        if row.table_name.starts_with("__diesel") {
            continue;
        }
        schema
            .entry(row.table_name)
            .or_default()
            .insert(row.column_name, row.is_nullable == "YES");
    }
    schema
}

fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    let rows: Vec<ColumnRow> = diesel::sql_query(
        "SELECT m.name AS table_name, p.name AS column_name, \
         CASE WHEN p.\"notnull\" = 0 AND p.pk = 0 THEN 'YES' ELSE 'NO' END AS is_nullable \
         FROM sqlite_master m JOIN pragma_table_info(m.name) p \
         WHERE m.type = 'table' AND m.name NOT LIKE 'sqlite_%'",
    )
    .load(conn)
    .wrap_err("Failed to introspect SQLite schema")?;
    Ok(collect_schema(rows))
}

fn introspect_mysql_schema(conn: &mut MysqlConnection, database: &str) -> Result<Schema> {
    let rows: Vec<ColumnRow> = diesel::sql_query(
        "SELECT TABLE_NAME AS table_name, COLUMN_NAME AS column_name, \
         IS_NULLABLE AS is_nullable \
         FROM information_schema.COLUMNS WHERE TABLE_SCHEMA = ?",
    )
    .bind::<Text, _>(database)
    .load(conn)
    .wrap_err("Failed to introspect MySQL schema")?;
    Ok(collect_schema(rows))
}

fn compare_schemas(sqlite_schema: &Schema, mysql_schema: &Schema) -> Result<()> {
    let tables: BTreeSet<&String> = sqlite_schema.keys().chain(mysql_schema.keys()).collect();
    let mut mismatches: Vec<String> = Vec::new();

    for table in tables {
        match (sqlite_schema.get(table), mysql_schema.get(table)) {
            (Some(_), None) => mismatches.push(format!("table '{table}' missing from MySQL")),
            (None, Some(_)) => mismatches.push(format!("table '{table}' missing from SQLite")),
            (Some(sqlite_columns), Some(mysql_columns)) => {
                if sqlite_columns != mysql_columns {
                    mismatches.push(format!(
                        "table '{table}' differs: SQLite {sqlite_columns:?}, MySQL {mysql_columns:?}"
                    ));
                }
            }
            (None, None) => {}
        }
    }

    if mismatches.is_empty() {
        return Ok(());
    }
    for mismatch in &mismatches {
        tracing::error!("{mismatch}");
    }
    Err(eyre!("{} schema mismatch(es) found", mismatches.len()))
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
