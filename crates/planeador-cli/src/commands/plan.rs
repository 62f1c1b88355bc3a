//! Plan command implementation

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use planeador_core::format::euros;
use planeador_core::{snapshot, Clock, Plan, Planner, SystemClock};

/// Snapshot used when `--file` is not given
pub fn default_snapshot_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("planeador").join("snapshot.toml"))
}

pub fn resolve_snapshot_path(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => default_snapshot_path()
            .context("No --file given and no local data directory to look in"),
    }
}

/// Parse `--today`, falling back to the system date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --today date format (use YYYY-MM-DD)"),
        None => Ok(SystemClock.today()),
    }
}

pub fn cmd_plan(path: &Path, today: NaiveDate, json: bool) -> Result<()> {
    let finances = snapshot::load(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    let plan = Planner::new().plan(&finances, today);
    tracing::info!(
        tier = plan.tier.as_str(),
        recommendations = plan.recommendations.len(),
        "Plan computed"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan(&plan)?);
    }

    Ok(())
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Text report of a plan
pub fn render_plan(plan: &Plan) -> Result<String> {
    let mut out = String::new();
    write_plan(&mut out, plan)?;
    Ok(out)
}

fn write_plan(out: &mut String, plan: &Plan) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "📋 Plano Financeiro ({})", plan.date)?;
    writeln!(
        out,
        "   ─────────────────────────────────────────────────────────────"
    )?;
    writeln!(
        out,
        "   Rendimento mensal:  {:>10}   (anual {})",
        euros(plan.income.average_monthly),
        euros(plan.income.yearly)
    )?;
    if plan.income.subsidies > 0.0 {
        writeln!(out, "   Subsídios:          {:>10}", euros(plan.income.subsidies))?;
    }
    writeln!(
        out,
        "   Despesas mensais:   {:>10}   (fixas {}, variáveis {}, dívidas {})",
        euros(plan.expenses.total),
        euros(plan.expenses.fixed),
        euros(plan.expenses.variable),
        euros(plan.expenses.debt)
    )?;
    writeln!(
        out,
        "   Disponível:         {:>10}   (anual {})",
        euros(plan.disposable.monthly),
        euros(plan.disposable.yearly)
    )?;
    writeln!(
        out,
        "   Taxa de poupança:   {:>10}   {}",
        pct(plan.savings.rate),
        plan.health
    )?;
    writeln!(
        out,
        "   Fundo emergência:   {:>10}   (falta {})",
        euros(plan.savings.recommended_emergency_fund),
        euros(plan.savings.gap)
    )?;
    writeln!(
        out,
        "   Património líquido: {:>10}",
        euros(plan.savings.total_net_worth)
    )?;

    if !plan.debt.avalanche.is_empty() {
        writeln!(out)?;
        writeln!(out, "💳 Dívidas (ordem avalanche)")?;
        writeln!(out, "   {:25} │ {:>10} │ {:>6} │ {:>6}", "Dívida", "Valor", "Taxa", "Meses")?;
        writeln!(out, "   ──────────────────────────┼────────────┼────────┼───────")?;
        for entry in &plan.debt.avalanche {
            writeln!(
                out,
                "   {:25} │ {:>10} │ {:>5}% │ {:>6}",
                entry.name,
                euros(entry.amount),
                entry.rate,
                entry.months
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "🎯 Recomendações")?;
    for (i, rec) in plan.recommendations.iter().enumerate() {
        writeln!(out)?;
        writeln!(
            out,
            "{}. [{}] {} - {}",
            i + 1,
            rec.priority,
            rec.step,
            rec.category
        )?;
        for line in rec.action.lines() {
            writeln!(out, "   {}", line)?;
        }
        for line in rec.impact.lines() {
            writeln!(out, "   {}", line)?;
        }
        if !rec.timeline.is_empty() {
            writeln!(out, "   ⏱  {}", rec.timeline)?;
        }
        for step in &rec.action_steps {
            writeln!(out, "     - {}", step)?;
        }
    }

    if !plan.spending_opportunities.is_empty() {
        writeln!(out)?;
        writeln!(out, "💡 Oportunidades de poupança")?;
        for opportunity in &plan.spending_opportunities {
            writeln!(
                out,
                "   {} = {}/ano",
                opportunity.description,
                euros(opportunity.yearly_savings)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "📈 Projeção a 12 meses")?;
    writeln!(
        out,
        "   Poupança esperada: {}   Saldo final: {}   Juros pagos: {}",
        euros(plan.projection.expected_savings),
        euros(plan.projection.end_balance),
        euros(plan.projection.interest_paid)
    )?;

    Ok(())
}
