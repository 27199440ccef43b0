//! End-to-end tests driving the `hoardrisk` binary.

use assert_cmd::Command;
use indoc::formatdoc;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn hoardrisk(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hoardrisk").unwrap();
    cmd.current_dir(dir)
        .env_remove("HOARDRISK_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--plain");
    cmd
}

fn write_config(dir: &Path, layout: &str) -> PathBuf {
    let path = dir.join("campo.toml");
    std::fs::write(
        &path,
        formatdoc! {r#"
            [store]
            path = "dados/avaliacoes.json"
            worksheet = "Avaliacoes_Acumulacao1"

            [form]
            layout = "{layout}"
        "#},
    )
    .unwrap();
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_classify_total_with_critical_item() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(hoardrisk(dir.path()).args(["classify", "--total", "4", "--critical"]));
    assert!(out.contains("RISCO GRAVE (NÍVEL 4)"));
    assert!(out.contains("Acompanhamento intensivo e contínuo"));
}

#[test]
fn test_classify_scores_as_json() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(hoardrisk(dir.path()).args([
        "classify", "--scores", "2,2,2,1,1", "--format", "json",
    ]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["total_score"], 8);
    assert_eq!(value["classification"]["tier"], "MODERADO");
}

#[test]
fn test_classify_total_above_grave_threshold() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(hoardrisk(dir.path()).args(["classify", "--total", "21"]));
    assert!(out.contains("RISCO GRAVE (NÍVEL 4)"));
}

#[test]
fn test_assess_then_list() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "basic");
    let config = config.to_str().unwrap();

    let out = stdout_of(hoardrisk(dir.path()).args([
        "--config", config, "assess", "--name", "Maria", "--address", "Rua A",
        "--estrutural", "3", "--sanitario", "3", "--animais", "3",
    ]));
    assert!(out.contains("Avaliação salva com sucesso!"));
    assert!(out.contains("Pontuação total: 9"));
    assert!(dir.path().join("dados/avaliacoes.json").exists());

    let listed = stdout_of(hoardrisk(dir.path()).args(["--config", config, "list", "--format", "json"]));
    let rows: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["nome_morador"], "Maria");
    assert_eq!(rows[0]["status_risco"], "RISCO MODERADO (NÍVEL 2)");
}

#[test]
fn test_assess_without_name_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "basic");

    hoardrisk(dir.path())
        .args(["--config", config.to_str().unwrap(), "assess", "--animais", "4"])
        .assert()
        .failure();
    assert!(!dir.path().join("dados/avaliacoes.json").exists());
}

#[test]
fn test_verify_headers_exit_code_follows_layout() {
    let dir = TempDir::new().unwrap();
    let basic = write_config(dir.path(), "basic");
    let basic = basic.to_str().unwrap();

    stdout_of(hoardrisk(dir.path()).args(["--config", basic, "assess", "--name", "Ana"]));
    hoardrisk(dir.path())
        .args(["--config", basic, "verify-headers"])
        .assert()
        .success();

    let detailed = write_config(dir.path(), "detailed");
    let output = hoardrisk(dir.path())
        .args(["--config", detailed.to_str().unwrap(), "verify-headers"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Faltando:"));
    assert!(text.contains("qtd_animais"));
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    hoardrisk(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".hoardrisk.toml").exists());

    hoardrisk(dir.path()).arg("init").assert().failure();
    hoardrisk(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_explicit_missing_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    hoardrisk(dir.path())
        .args(["--config", "missing.toml", "list"])
        .assert()
        .failure();
}
