use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use rusqlite::Connection;

fn schema_doc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schema-doc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run schema-doc")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn bootstrap_db(dir: &Path) -> std::path::PathBuf {
    let db = dir.join("meu_banco_teste.db");
    let out = schema_doc(&["execute", "--db", path_arg(&db), "--default"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    db
}

fn count_rows(db: &Path, table: &str) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn bootstrap_prints_default_script() {
    let out = schema_doc(&["bootstrap"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("DROP TABLE IF EXISTS cliente;"));
    assert!(stdout.contains("(3, NULL, 'maria@example.com', NULL);"));
}

#[test]
fn execute_default_script_resets_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = bootstrap_db(dir.path());
    assert_eq!(count_rows(&db, "empresa"), 2);
    assert_eq!(count_rows(&db, "cliente"), 3);
}

#[test]
fn execute_reports_success_message() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("msg.db");
    let out = schema_doc(&["execute", "--db", path_arg(&db), "--default"]);
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Script executed successfully. Database reset"));
    assert!(stdout.contains("6 statements"));
}

#[test]
fn execute_accepts_sqlite_url() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("url.db");
    let url = format!("sqlite:///{}", path_arg(&db));

    let out = schema_doc(&["execute", "--db", &url, "--default"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(count_rows(&db, "empresa"), 2);
}

#[test]
fn execute_failing_script_leaves_database_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let db = bootstrap_db(dir.path());
    let script = dir.path().join("broken.sql");
    fs::write(
        &script,
        "DELETE FROM cliente;\nDROP TABLE empresa;\nINSERT INTO nowhere VALUES (1);",
    )
    .unwrap();

    let out = schema_doc(&["execute", "--db", path_arg(&db), "--script", path_arg(&script)]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error: Failed to execute SQL script"), "{stderr}");
    assert!(stderr.contains("statement 3"), "{stderr}");

    assert_eq!(count_rows(&db, "cliente"), 3);
    assert_eq!(count_rows(&db, "empresa"), 2);
}

#[test]
fn execute_reads_script_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("stdin.db");

    let mut child = Command::new(env!("CARGO_BIN_EXE_schema-doc"))
        .args(["execute", "--db", path_arg(&db)])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run schema-doc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"CREATE TABLE t (id INTEGER); INSERT INTO t VALUES (1); INSERT INTO t VALUES (2);")
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(count_rows(&db, "t"), 2);
}

#[test]
fn document_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let db = bootstrap_db(dir.path());

    let out = schema_doc(&["document", "--db", path_arg(&db), "--stdout"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("## Database: meu_banco_teste\n"));
    assert!(stdout.contains("### Table: `cliente`"));
    assert!(stdout.contains("- `empresa_id` → `empresa(id)`"));
    assert!(stdout.contains("| 1 | João Victor | joao@example.com | 1 |"));
}

#[test]
fn document_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = bootstrap_db(dir.path());
    let output = dir.path().join("docs").join("documentacao_banco.md");

    let out = schema_doc(&[
        "document",
        "--db",
        path_arg(&db),
        "--output",
        path_arg(&output),
        "--title",
        "exemplo_sqlite",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("## Database: exemplo_sqlite\n"));
    assert!(content.contains("### Table: `empresa`"));
}

#[test]
fn document_artifact_json() {
    let dir = tempfile::tempdir().unwrap();
    let db = bootstrap_db(dir.path());

    let out = schema_doc(&["document", "--db", path_arg(&db), "--stdout", "--format", "artifact"]);
    assert!(out.status.success());
    let artifact: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(artifact["file_name"], "documentacao_banco.md");
    assert_eq!(artifact["media_type"], "text/markdown");
    assert!(artifact["content"].as_str().unwrap().contains("### Table: `cliente`"));
}

#[test]
fn document_schema_json() {
    let dir = tempfile::tempdir().unwrap();
    let db = bootstrap_db(dir.path());

    let out = schema_doc(&[
        "document", "--db", path_arg(&db), "--stdout", "--format", "json", "--ranking", "scan",
    ]);
    assert!(out.status.success());
    let model: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let tables = model["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["status"], "documented");
    assert_eq!(tables[0]["table"]["name"], "cliente");
    assert_eq!(tables[0]["table"]["columns"].as_array().unwrap().len(), 4);
}

#[test]
fn document_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = bootstrap_db(dir.path());
    let config = dir.path().join("schema-doc.yml");
    fs::write(
        &config,
        format!(
            "database: {}\ntitle: exemplo_sqlite\nlanguage: pt\n",
            path_arg(&db)
        ),
    )
    .unwrap();

    let out = schema_doc(&["--config", path_arg(&config), "document", "--stdout"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("## Banco de Dados: exemplo_sqlite\n"));
    assert!(stdout.contains("### Tabela: `empresa`"));
}

#[test]
fn document_missing_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("absent.db");

    let out = schema_doc(&["document", "--db", path_arg(&db), "--stdout"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("cannot enumerate tables"), "{stderr}");
    assert!(!db.exists());
}

#[test]
fn missing_config_file_fails() {
    let out = schema_doc(&["--config", "/nonexistent/schema-doc.yml", "bootstrap"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Failed to load config"));
}
