use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Runs the binary with a clean Oracle environment so host settings do
/// not leak into the assertions.
fn oradex(args: &[&str], home: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oradex"))
        .args(args)
        .env_remove("ORACLE_SID")
        .env_remove("ORACLE_HOST")
        .env_remove("ORACLE_PORT")
        .env_remove("ORACLE_USER")
        .env_remove("ORAPASS_FILE")
        .env_remove("BASE_DIR")
        .env("HOME", home)
        .output()
        .expect("failed to run oradex")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Argument handling
// ---------------------------------------------------------------------------

#[test]
fn help_lists_extraction_flags() {
    let home = tempfile::tempdir().unwrap();
    let output = oradex(&["--help"], home.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--database", "--schemas", "--exclude", "--object", "--grants", "--needed"] {
        assert!(stdout.contains(flag), "help should mention {flag}");
    }
}

#[test]
fn version_prints_package_version() {
    let home = tempfile::tempdir().unwrap();
    let output = oradex(&["--version"], home.path());

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn invalid_port_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let output = oradex(&["-d", "ORCL", "-p", "not-a-port"], home.path());
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// Fatal errors before connecting
// ---------------------------------------------------------------------------

#[test]
fn missing_database_is_fatal() {
    let home = tempfile::tempdir().unwrap();
    let output = oradex(&["-u", "scott"], home.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no database specified"));
}

#[test]
fn quiet_suppresses_error_message() {
    let home = tempfile::tempdir().unwrap();
    let output = oradex(&["-q", "-u", "scott"], home.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).is_empty());
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_password_is_fatal() {
    let home = tempfile::tempdir().unwrap();
    let orapass = home.path().join("orapass");
    fs::write(&orapass, "dbhost:1521:OTHER:scott:tiger\n").unwrap();

    let output = oradex(
        &["-d", "ORCL", "-u", "scott", "-f", orapass.to_str().unwrap()],
        home.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no password found for scott@localhost:1521/ORCL"));
}

#[test]
fn malformed_password_file_is_fatal() {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join(".orapass"), "# header\nnot-enough-fields\n").unwrap();

    let output = oradex(&["-d", "ORCL", "-u", "scott"], home.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("line 2"));
}

#[test]
fn database_from_config_file_is_used() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("oradex.yml");
    fs::write(
        &config,
        "connection:\n  database: CFGDB\n  username: hr\n  port: 1600\n",
    )
    .unwrap();

    let output = oradex(&["-c", config.to_str().unwrap()], home.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no password found for hr@localhost:1600/CFGDB"));
}

#[test]
fn unreadable_config_is_fatal() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("broken.yml");
    fs::write(&config, "extract: [not, a, mapping]\n").unwrap();

    let output = oradex(&["-c", config.to_str().unwrap()], home.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load config"));
}
