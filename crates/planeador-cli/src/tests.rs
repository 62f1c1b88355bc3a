//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use planeador_core::test_utils::{overspending, plan_date, scenario_a, scenario_b};
use planeador_core::{compute_plan, snapshot, HouseholdFinances, SnapshotFormat};
use tempfile::TempDir;

use crate::commands::{self, render_plan, render_template, template_snapshot};

fn write_snapshot(dir: &TempDir, name: &str, finances: &HouseholdFinances) -> PathBuf {
    let path = dir.path().join(name);
    let format = SnapshotFormat::from_path(&path).unwrap();
    fs::write(&path, snapshot::render(finances, format).unwrap()).unwrap();
    path
}

// ========== Plan Command Tests ==========

#[test]
fn test_cmd_plan_toml_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "snapshot.toml", &scenario_b());
    let result = commands::cmd_plan(&path, plan_date(), false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_plan_json_snapshot_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "snapshot.json", &scenario_a());
    let result = commands::cmd_plan(&path, plan_date(), true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_plan_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");
    let err = commands::cmd_plan(&path, plan_date(), false).unwrap_err();
    assert!(err.to_string().contains("Failed to load snapshot"));
}

#[test]
fn test_cmd_plan_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.yaml");
    fs::write(&path, "monthly_salary: 1500").unwrap();
    assert!(commands::cmd_plan(&path, plan_date(), false).is_err());
}

#[test]
fn test_resolve_today_explicit() {
    let today = commands::resolve_today(Some("2026-01-15")).unwrap();
    assert_eq!(today, plan_date());
}

#[test]
fn test_resolve_today_invalid() {
    let err = commands::resolve_today(Some("15/01/2026")).unwrap_err();
    assert!(err.to_string().contains("YYYY-MM-DD"));
}

#[test]
fn test_resolve_today_defaults_to_system_date() {
    assert!(commands::resolve_today(None).is_ok());
}

#[test]
fn test_resolve_snapshot_path_explicit() {
    let path = commands::resolve_snapshot_path(Some(PathBuf::from("casa.json"))).unwrap();
    assert_eq!(path, PathBuf::from("casa.json"));
}

#[test]
fn test_default_snapshot_path_file_name() {
    if let Some(path) = commands::default_snapshot_path() {
        assert!(path.ends_with("planeador/snapshot.toml"));
    }
}

// ========== Report Rendering Tests ==========

#[test]
fn test_render_plan_headers() {
    let plan = compute_plan(&scenario_a(), plan_date());
    let report = render_plan(&plan).unwrap();
    assert!(report.contains("📋 Plano Financeiro (2026-01-15)"));
    assert!(report.contains("🎯 Recomendações"));
    assert!(report.contains("📈 Projeção a 12 meses"));
    // No debts, no debt table
    assert!(!report.contains("💳 Dívidas"));
}

#[test]
fn test_render_plan_debt_table() {
    let plan = compute_plan(&scenario_b(), plan_date());
    let report = render_plan(&plan).unwrap();
    assert!(report.contains("💳 Dívidas (ordem avalanche)"));

    let card = report.find("Cartão de Crédito").unwrap();
    let loan = report.find("Crédito Pessoal").unwrap();
    assert!(card < loan, "highest rate first");
}

#[test]
fn test_render_plan_lists_every_recommendation() {
    let plan = compute_plan(&overspending(), plan_date());
    let report = render_plan(&plan).unwrap();
    for (i, rec) in plan.recommendations.iter().enumerate() {
        let header = format!("{}. [{}] {}", i + 1, rec.priority, rec.step);
        assert!(report.contains(&header), "missing {header}");
    }
    assert!(report.contains("1. [EMERGÊNCIA]"));
}

// ========== Template Command Tests ==========

#[test]
fn test_cmd_template_formats() {
    assert!(commands::cmd_template("toml").is_ok());
    assert!(commands::cmd_template("json").is_ok());
}

#[test]
fn test_cmd_template_invalid_format() {
    assert!(commands::cmd_template("yaml").is_err());
}

#[test]
fn test_template_parses_back() {
    let toml = render_template("toml").unwrap();
    let parsed = snapshot::parse(&toml, SnapshotFormat::Toml).unwrap();
    assert_eq!(parsed, template_snapshot());

    let json = render_template("json").unwrap();
    let parsed = snapshot::parse(&json, SnapshotFormat::Json).unwrap();
    assert_eq!(parsed.loans.len(), 1);
    assert_eq!(parsed.loans[0].name, "Crédito Automóvel");
}

#[test]
fn test_template_plans_cleanly() {
    let plan = compute_plan(&template_snapshot(), plan_date());
    assert!(plan.disposable.monthly > 0.0);
    assert!(!plan.recommendations.is_empty());
}
