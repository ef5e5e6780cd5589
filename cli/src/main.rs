mod driver;
mod report;

use std::path::PathBuf;

use clap::Parser;
use oradex_config::{ConnectionSettings, ExtractConfig};
use oradex_oracle::OracleSource;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use crate::report::{ExtractionReport, ObjectReport};

#[derive(Debug, Parser)]
#[command(name = "oradex")]
#[command(version, about = "Extract Oracle object DDL into files or stdout")]
struct Cli {
    /// Database to connect to.
    #[arg(short = 'd', long, env = "ORACLE_SID")]
    database: Option<String>,
    /// Host the database runs on (default: localhost). When given, an
    /// EZConnect string is used instead of a TNS alias.
    #[arg(short = 'H', long, env = "ORACLE_HOST")]
    host: Option<String>,
    /// Listener port (default: 1521).
    #[arg(short = 'p', long, env = "ORACLE_PORT")]
    port: Option<u16>,
    /// User to connect as (default: the OS user).
    #[arg(short = 'u', long = "user", env = "ORACLE_USER")]
    username: Option<String>,
    /// Password file to search first.
    #[arg(short = 'f', long)]
    password_file: Option<PathBuf>,

    /// Base directory for schema-wide output (default: current directory).
    #[arg(short = 'b', long, env = "BASE_DIR")]
    base_dir: Option<PathBuf>,
    /// Comma-separated schemas to extract.
    #[arg(short = 's', long)]
    schemas: Option<String>,
    /// Comma-separated schemas to skip. Ignored when --schemas is given.
    #[arg(short = 'x', long)]
    exclude: Option<String>,
    /// Extract a single `schema.name` object to stdout.
    #[arg(short = 'o', long)]
    object: Option<String>,

    /// Emit constraints as ALTER TABLE statements.
    #[arg(long)]
    alter: bool,
    /// Include the FORCE keyword in CREATE statements.
    #[arg(long)]
    force: bool,
    /// Include storage and segment attributes.
    #[arg(long)]
    storage: bool,
    /// Include grants the object likely needs (best effort).
    #[arg(long)]
    needed: bool,
    /// Include grants on the object.
    #[arg(long)]
    grants: bool,
    /// Include synonyms pointing at the object.
    #[arg(long)]
    synonyms: bool,

    /// YAML configuration file.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Print nothing but the extracted DDL.
    #[arg(short = 'q', long)]
    quiet: bool,
    /// Verbose logging.
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    if !quiet {
        init_logging(cli.debug);
    }

    if let Err(err) = run(cli) {
        if !quiet {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(&cli)?;
    debug!(?config, "effective configuration");

    let credentials = ConnectionSettings {
        host: cli.host,
        port: cli.port,
        database: cli.database,
        username: cli.username,
        password_file: cli.password_file,
    }
    .merge(&config.connection)
    .resolve()
    .map_err(|err| err.to_string())?;

    let source = OracleSource::connect(
        &credentials.username,
        &credentials.password,
        &credentials.connect_string,
        &config.transform(),
    )
    .map_err(|err| err.to_string())?;

    let report = match cli.object {
        Some(object) => {
            let default_schema = config.extraction.schemas.first().map(String::as_str);
            let (object, ddl) = driver::extract_object(
                &source,
                &object,
                default_schema,
                &config.assemble_options(),
            )?;
            println!("{ddl}");

            let mut report = ExtractionReport::new();
            report.push(ObjectReport::printed(&object));
            report
        }
        None => driver::extract_schemas(&source, &config)?,
    };

    if let Some(path) = cli.report {
        report.write(&path)?;
    }
    Ok(())
}

/// Loads `--config` when given and lays the command-line values over it.
fn load_config(cli: &Cli) -> Result<ExtractConfig, String> {
    let mut config = match &cli.config {
        Some(path) => ExtractConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ExtractConfig::default(),
    };

    let extraction = &mut config.extraction;
    if cli.base_dir.is_some() {
        extraction.base_dir = cli.base_dir.clone();
    }
    let schemas = driver::parse_csv_list(cli.schemas.clone());
    if !schemas.is_empty() {
        extraction.schemas = schemas;
    }
    let exclude = driver::parse_csv_list(cli.exclude.clone());
    if !exclude.is_empty() {
        extraction.exclude = exclude;
    }

    extraction.alter |= cli.alter;
    extraction.force |= cli.force;
    extraction.storage |= cli.storage;
    extraction.needed_grants |= cli.needed;
    extraction.grants |= cli.grants;
    extraction.synonyms |= cli.synonyms;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_load_config_overlays_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oradex.yml");
        std::fs::write(
            &path,
            "extract:\n  base_dir: ./from-config\n  schemas: [HR]\n  exclude: [SCOTT]\n  grants: true\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "oradex",
            "-c",
            path.to_str().unwrap(),
            "-s",
            "sales, oe",
            "--alter",
        ]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.extraction.schemas, vec!["sales", "oe"]);
        assert_eq!(config.extraction.exclude, vec!["SCOTT"]);
        assert_eq!(config.extraction.base_dir, Some(PathBuf::from("./from-config")));
        assert!(config.extraction.alter);
        assert!(config.extraction.grants);
        assert!(!config.extraction.force);
    }

    #[test]
    fn test_load_config_without_file() {
        let cli = Cli::parse_from(["oradex", "-b", "/tmp/ddl", "--needed"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.extraction.base_dir, Some(PathBuf::from("/tmp/ddl")));
        assert!(config.assemble_options().needed_grants);
    }
}
