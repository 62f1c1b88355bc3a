//! The five mutually-exclusive primary tiers
//!
//! `classify_tier` is an ordered guard chain: the first tier whose guard holds
//! wins, and the chain always ends in `Tier::Optimize`, so every household gets
//! exactly one primary recommendation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::PlannerConfig;
use crate::debt::{AcceleratedPayoff, DebtEntry, PayoffSimulation};
use crate::format::{add_months, euros, month_name, months_word, rate, target_month_year, whole};
use crate::projection::{future_value_of_contributions, grow_lump_sum, years_to_target};

use super::engine::RecommendationContext;
use super::types::{
    DebtEliminationData, EmergencyFundData, InvestData, OptimizeData, Priority, Recommendation,
    RecommendationKind, StarterFundData, Tier,
};

/// Inputs of the tier decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierFacts {
    pub current_savings: f64,
    pub non_mortgage_debt: f64,
    pub recommended_emergency_fund: f64,
    /// Percent of monthly income
    pub savings_rate: f64,
}

/// Select the primary tier; first matching guard wins
pub fn classify_tier(facts: &TierFacts, config: &PlannerConfig) -> Tier {
    if facts.current_savings < config.starter_fund_target {
        Tier::StarterFund
    } else if facts.non_mortgage_debt > 0.0 {
        Tier::DebtElimination
    } else if facts.current_savings < facts.recommended_emergency_fund {
        Tier::FullEmergencyFund
    } else if facts.savings_rate < config.target_savings_rate {
        Tier::Invest15
    } else {
        Tier::Optimize
    }
}

/// Recommendations produced by the selected tier
///
/// Always one primary recommendation; the debt tier adds the full attack
/// order when more than one debt exists.
pub fn primary_recommendations(tier: Tier, ctx: &RecommendationContext<'_>) -> Vec<Recommendation> {
    match tier {
        Tier::StarterFund => vec![starter_fund(ctx)],
        Tier::DebtElimination => debt_elimination(ctx),
        Tier::FullEmergencyFund => vec![full_emergency_fund(ctx)],
        Tier::Invest15 => vec![invest_15(ctx)],
        Tier::Optimize => vec![optimize(ctx)],
    }
}

/// Whole months to save `needed` at `monthly`; None when nothing is saved
fn months_to_save(needed: f64, monthly: f64) -> Option<u32> {
    if monthly > 0.0 {
        Some((needed / monthly).ceil() as u32)
    } else {
        None
    }
}

fn starter_fund(ctx: &RecommendationContext<'_>) -> Recommendation {
    let target = ctx.config.starter_fund_target;
    let disposable = ctx.aggregates.monthly_disposable;
    let needed = target - ctx.finances.current_savings;
    let months = months_to_save(needed, disposable);

    let (impact, timeline) = match months {
        Some(m) => {
            let timeline = if m <= 2 {
                "Imediato".to_string()
            } else if m <= 4 {
                match add_months(ctx.today, m) {
                    Some(date) => format!("Até {}", month_name(date)),
                    None => format!("{} {}", m, months_word(m)),
                }
            } else {
                format!("{} meses", m)
            };
            (
                format!(
                    "Com {}/mês disponível, podem atingir isto em {} {}",
                    euros(disposable),
                    m,
                    months_word(m)
                ),
                timeline,
            )
        }
        None => (
            "Sem margem mensal disponível (€0/mês), este objetivo não avança com o orçamento atual"
                .to_string(),
            "libertar margem mensal primeiro".to_string(),
        ),
    };

    Recommendation::new(
        RecommendationKind::StarterFund,
        Priority::Critical,
        "PASSO 1",
        "🎯 Fundo de Emergência Inicial",
        format!(
            "Primeiro objetivo: guardar {} para emergências. Faltam {}.",
            euros(target),
            euros(needed)
        ),
    )
    .with_impact(impact)
    .with_timeline(format!("Meta: {}", timeline))
    .with_steps([
        "Abrir conta poupança separada HOJE",
        "Transferir todo o dinheiro disponível imediatamente",
        "Cortar despesas não essenciais temporariamente",
        "Considerar vender items que não usam",
        "Este é apenas um colchão inicial - vão aumentar depois",
    ])
    .with_data(&StarterFundData {
        target,
        needed,
        monthly_disposable: disposable,
        months_to_target: months,
    })
}

fn debt_list(entries: &[DebtEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, d)| {
            format!(
                "{}. {}: {} a {}%{}",
                i + 1,
                d.name,
                euros(d.amount),
                rate(d.rate),
                if i == 0 { " ⚠️ ATACAR PRIMEIRO" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn payoff_impact(
    payoff: &AcceleratedPayoff,
    total_debt_payment: f64,
    debt_free_by: Option<&str>,
) -> (String, String) {
    let header = format!(
        "Pagando {} extra/mês na dívida com juros mais altos:",
        euros(payoff.extra_payment)
    );

    match (&payoff.simulation, payoff.months_saved, payoff.interest_saved, debt_free_by) {
        (PayoffSimulation::Converged { .. }, Some(months_saved), Some(interest_saved), Some(date)) => (
            format!(
                "{}\n• Poupa {} meses de pagamentos\n• Poupa {} em juros\n• Ficam livres de TODAS as dívidas em {}\n• Libertam {}/mês quando terminarem!",
                header,
                months_saved,
                euros(interest_saved),
                date,
                euros(total_debt_payment)
            ),
            format!("Meta: Livres de dívida até {}", date),
        ),
        (
            PayoffSimulation::Capped {
                iteration_limit,
                remaining_balance,
                ..
            },
            ..,
        ) => (
            format!(
                "{}\n• Mesmo assim \"{}\" não fica paga em {} anos: o pagamento mal cobre os juros\n• Ficariam ainda {} em dívida\n• É preciso aumentar o pagamento ou renegociar a taxa",
                header,
                payoff.target,
                iteration_limit / 12,
                euros(*remaining_balance)
            ),
            "Meta: pagar mais do que os juros mensais".to_string(),
        ),
        _ => (header, "Meta: Livres de dívida".to_string()),
    }
}

fn debt_elimination(ctx: &RecommendationContext<'_>) -> Vec<Recommendation> {
    let debt = ctx.debt;
    let (Some(target), Some(payoff)) = (debt.target(), debt.payoff.as_ref()) else {
        warn!(
            total = debt.total_non_mortgage_debt,
            "Debt tier selected without an avalanche plan"
        );
        return vec![Recommendation::new(
            RecommendationKind::DebtElimination,
            Priority::Critical,
            "PASSO 2",
            "💳 Eliminar Todas as Dívidas",
            format!(
                "Têm {} em dívidas (excluindo crédito habitação). Pagar primeiro a dívida com MAIOR taxa de juro.",
                euros(debt.total_non_mortgage_debt)
            ),
        )
        .with_timeline("Meta: Livres de dívida")];
    };
    let count = debt.entries.len();

    let debt_free_by = payoff
        .months_to_debt_free
        .map(|m| target_month_year(ctx.today, m));
    let (impact, timeline) =
        payoff_impact(payoff, debt.total_debt_payment, debt_free_by.as_deref());

    let action = format!(
        "Têm {} dívida{} totalizando {} (excluindo crédito habitação).\n\n📊 Vossas dívidas:\n{}\n\nMétodo Avalanche: Pagar primeiro a dívida com MAIOR taxa de juro (\"{}\" a {}%).",
        count,
        if count > 1 { "s" } else { "" },
        euros(debt.total_non_mortgage_debt),
        debt_list(&debt.entries),
        target.name,
        rate(target.rate)
    );

    let mut steps = vec![
        format!(
            "1️⃣ Pagar mínimo em TODAS: {}/mês nas outras",
            euros(debt.total_debt_payment - target.payment)
        ),
        format!(
            "2️⃣ Atacar \"{}\": {}/mês (mínimo {} + {} extra)",
            target.name,
            euros(payoff.new_monthly_payment),
            euros(target.payment),
            euros(payoff.extra_payment)
        ),
    ];
    if let Some(next) = debt.entries.get(1) {
        steps.push(format!(
            "3️⃣ Quando \"{}\" acabar, atacar \"{}\" (próxima com juros mais altos)",
            target.name, next.name
        ));
    }
    steps.extend(
        [
            "4️⃣ Efeito bola de neve: cada dívida paga liberta mais dinheiro para a próxima",
            "5️⃣ Usar subsídios INTEIROS para eliminar dívidas mais rápido",
            "⛔ NÃO fazer novas dívidas enquanto pagam as existentes",
        ]
        .map(String::from),
    );

    let primary = Recommendation::new(
        RecommendationKind::DebtElimination,
        Priority::Critical,
        "PASSO 2",
        "💳 Eliminar Todas as Dívidas",
        action,
    )
    .with_impact(impact)
    .with_timeline(timeline)
    .with_steps(steps)
    .with_data(&DebtEliminationData {
        debt_count: count,
        total_non_mortgage_debt: debt.total_non_mortgage_debt,
        total_debt_payment: debt.total_debt_payment,
        target: target.name.clone(),
        extra_payment: payoff.extra_payment,
        new_monthly_payment: payoff.new_monthly_payment,
        converged: payoff.simulation.is_converged(),
        months_saved: payoff.months_saved,
        interest_saved: payoff.interest_saved,
        months_to_debt_free: payoff.months_to_debt_free,
        debt_free_by,
    });

    let mut recs = vec![primary];

    if count > 1 {
        recs.push(
            Recommendation::new(
                RecommendationKind::DebtOrder,
                Priority::High,
                "PASSO 2 (continuação)",
                "📊 Ordem de Ataque às Dívidas",
                "Método Avalanche - Pagar pela ordem de taxa de juro (maior para menor):",
            )
            .with_impact("Esta ordem poupa o máximo de dinheiro em juros")
            .with_timeline("Seguir esta ordem rigorosamente")
            .with_steps(debt.entries.iter().enumerate().map(|(i, d)| {
                format!(
                    "{}. {}: {} a {}% ({} meses)",
                    i + 1,
                    d.name,
                    euros(d.amount),
                    rate(d.rate),
                    d.months
                )
            }))
            .with_data(&debt.entries),
        );
    }

    recs
}

fn full_emergency_fund(ctx: &RecommendationContext<'_>) -> Recommendation {
    let recommended = ctx.aggregates.recommended_emergency_fund;
    let disposable = ctx.aggregates.monthly_disposable;
    let needed = recommended - ctx.finances.current_savings;
    let months = months_to_save(needed, disposable);
    let target_date = months.map(|m| target_month_year(ctx.today, m));
    let invested = ctx.total_investments;

    let note = if invested > 0.0 {
        format!(
            "\n\nNota: Já têm {} investidos. Excelente! Mas o fundo de emergência deve estar em dinheiro líquido, não investido.",
            euros(invested)
        )
    } else {
        String::new()
    };

    let (impact, timeline) = match &target_date {
        Some(date) => (
            format!(
                "Poupando {}/mês:\n• Atingem o objetivo em {}\n• Estarão protegidos contra desemprego, doença, ou avarias\n• Sem este fundo, qualquer emergência cria nova dívida",
                euros(disposable),
                date
            ),
            format!("Meta: {}", date),
        ),
        None => (
            "Sem margem mensal disponível o fundo não cresce:\n• Libertar margem no orçamento é o primeiro passo\n• Sem este fundo, qualquer emergência cria nova dívida"
                .to_string(),
            "Meta: libertar margem mensal primeiro".to_string(),
        ),
    };

    Recommendation::new(
        RecommendationKind::FullEmergencyFund,
        Priority::VeryHigh,
        "PASSO 3",
        "🏦 Fundo de Emergência Completo",
        format!(
            "Agora sem dívidas, construir fundo completo de {} ({} meses de despesas). Faltam {}.{}\n\nℹ️ Recomendação: {}-{} meses. Usamos {} meses para maior segurança.",
            euros(recommended),
            whole(ctx.config.emergency_fund_months),
            euros(needed),
            note,
            whole(ctx.config.minimum_emergency_fund_months),
            whole(ctx.config.emergency_fund_months),
            whole(ctx.config.emergency_fund_months)
        ),
    )
    .with_impact(impact)
    .with_timeline(timeline)
    .with_steps([
        "Continuar a poupar intensamente (ainda não investir MAIS)",
        if invested > 0.0 {
            "Manter investimentos atuais - não vender!"
        } else {
            "Guardar em conta poupança, não investir"
        },
        "Usar subsídios para acelerar este objetivo",
        "Manter em conta poupança líquida (Bankinter, ActivoBank)",
        "Não investir este dinheiro - tem que estar sempre disponível",
        "Quando atingir: podem RESPIRAR e investir mais agressivamente!",
    ])
    .with_data(&EmergencyFundData {
        recommended,
        needed,
        monthly_disposable: disposable,
        months_to_target: months,
        target_date,
        total_investments: invested,
    })
}

fn investment_breakdown(ctx: &RecommendationContext<'_>) -> String {
    if ctx.total_investments <= 0.0 {
        return String::new();
    }
    let lines: Vec<String> = ctx
        .finances
        .investments
        .categories()
        .iter()
        .filter(|(_, amount)| *amount > 0.0)
        .map(|(label, amount)| format!("• {}: {}", label, euros(*amount)))
        .collect();
    format!(
        "\n\nInvestimentos atuais: {}\n{}",
        euros(ctx.total_investments),
        lines.join("\n")
    )
}

fn invest_15(ctx: &RecommendationContext<'_>) -> Recommendation {
    let config = ctx.config;
    let share = config.target_savings_rate / 100.0;
    let monthly_target = ctx.aggregates.average_monthly_income * share;
    let current_monthly = ctx.aggregates.monthly_disposable;
    let gap = monthly_target - current_monthly;
    let yearly = monthly_target * 12.0;
    let years = config.projection_years;

    let future_value = future_value_of_contributions(yearly, config.annual_return, years);
    let invested = ctx.total_investments;
    let existing_future_value = grow_lump_sum(invested, config.annual_return, years);
    let total_future_value = future_value + existing_future_value;
    let contributed = yearly * years as f64;
    let return_pct = whole(config.annual_return * 100.0);

    let impact = if invested > 0.0 {
        format!(
            "Investindo {}/mês durante {} anos a {}% retorno médio:\n• Novos investimentos: {}\n• Investimentos atuais crescem para: {}\n• TOTAL em {} anos: {}\n• Já têm uma base excelente - continuem!",
            euros(monthly_target),
            years,
            return_pct,
            euros(future_value),
            euros(existing_future_value),
            years,
            euros(total_future_value)
        )
    } else {
        format!(
            "Investindo {}/mês durante {} anos a {}% retorno médio:\n• Total investido: {}\n• Valor final estimado: {}\n• Crescimento: {} (juros compostos!)",
            euros(monthly_target),
            years,
            return_pct,
            euros(contributed),
            euros(future_value),
            euros(future_value - contributed)
        )
    };

    let steps = vec![
        if gap > 0.0 {
            format!(
                "Aumentar poupança em {}/mês para atingir {}%",
                euros(gap),
                whole(config.target_savings_rate)
            )
        } else {
            format!("✓ Já poupam mais de {}%!", whole(config.target_savings_rate))
        },
        if invested > 0.0 {
            "✓ Continuem a diversificar o portfólio existente".to_string()
        } else {
            "Começar com Certificados de Aforro (sem risco)".to_string()
        },
        "PPR (Plano Poupança Reforma): benefício fiscal até €400/ano".to_string(),
        if invested <= 0.0 || ctx.finances.investments.etfs <= 0.0 {
            "ETFs indexados globais (ex: VWCE, IWDA): ~7% histórico".to_string()
        } else {
            "✓ Continuem com ETFs".to_string()
        },
        "Nunca tirar este dinheiro - deixar crescer 20-30 anos".to_string(),
        "Reforçar com aumentos salariais e subsídios".to_string(),
        if invested > 0.0 {
            format!("Portfólio atual de {} é um ótimo começo!", euros(invested))
        } else {
            "Começar pequeno, mas começar JÁ".to_string()
        },
    ];

    Recommendation::new(
        RecommendationKind::Invest15,
        Priority::High,
        "PASSO 4",
        format!(
            "📈 Investir {}% do Rendimento",
            whole(config.target_savings_rate)
        ),
        format!(
            "Objetivo: investir {}% do rendimento ({}/mês). Atualmente poupam: {:.1}% ({}/mês).{}",
            whole(config.target_savings_rate),
            euros(monthly_target),
            ctx.aggregates.savings_rate,
            euros(current_monthly),
            investment_breakdown(ctx)
        ),
    )
    .with_impact(impact)
    .with_timeline("Meta: Começar JÁ e manter durante décadas")
    .with_steps(steps)
    .with_data(&InvestData {
        monthly_target,
        current_monthly,
        gap,
        savings_rate: ctx.aggregates.savings_rate,
        years,
        contributed,
        future_value,
        existing_investments: invested,
        existing_future_value,
        total_future_value,
    })
}

fn optimize(ctx: &RecommendationContext<'_>) -> Recommendation {
    let config = ctx.config;
    let monthly_investment = ctx.aggregates.monthly_disposable;
    let yearly = monthly_investment * 12.0;
    let years = config.projection_years;
    let future_value = future_value_of_contributions(yearly, config.annual_return, years);

    let expenses = ctx.aggregates.total_monthly_expenses;
    let fi_target = expenses * 12.0 * config.fi_multiple;
    let search = years_to_target(
        ctx.finances.current_savings,
        yearly,
        fi_target,
        config.annual_return,
        config.years_to_target_cap,
    );
    let years_to_fi = search.years();
    let fi_age = years_to_fi.map(|y| config.assumed_current_age + y);

    let fi_line = match (years_to_fi, fi_age) {
        (Some(y), Some(age)) => format!(
            "Independência financeira possível em ~{} anos (idade {})",
            y, age
        ),
        _ => format!(
            "Independência financeira não é atingida em {} anos a este ritmo",
            config.years_to_target_cap
        ),
    };

    Recommendation::new(
        RecommendationKind::Optimize,
        Priority::Low,
        "🌟 PARABÉNS",
        "🚀 Otimização Avançada",
        format!(
            "Estão no caminho certo! Sem dívidas, fundo emergência completo, e investem {:.0}% do rendimento.",
            ctx.aggregates.savings_rate
        ),
    )
    .with_impact(format!(
        "Mantendo este ritmo ({}/mês):\n• Em {} anos: ~{}\n• {}\n• Com despesas de {}/mês, precisam de ~{} investidos",
        euros(monthly_investment),
        years,
        euros(future_value),
        fi_line,
        euros(expenses),
        euros(fi_target)
    ))
    .with_timeline("Longo prazo - manter consistência")
    .with_steps([
        "Continuar a investir mensalmente (automatizar)",
        "Maximizar benefícios fiscais (PPR até €400/ano)",
        "Diversificar: Certificados + ETFs + PPR",
        "Considerar aumentar para 20-25% se possível",
        "Rever estratégia anualmente",
        "Nunca parar - consistência é a chave!",
    ])
    .with_data(&OptimizeData {
        monthly_investment,
        future_value,
        fi_target,
        years_to_fi,
        fi_age,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::debt::{plan_debts, DebtPlan};
    use crate::models::{HouseholdFinances, Investments, Loan};
    use crate::test_utils::{plan_date, scenario_a, scenario_b, scenario_d};

    fn facts(savings: f64, debt: f64, fund: f64, rate: f64) -> TierFacts {
        TierFacts {
            current_savings: savings,
            non_mortgage_debt: debt,
            recommended_emergency_fund: fund,
            savings_rate: rate,
        }
    }

    fn primary(finances: &HouseholdFinances) -> Vec<Recommendation> {
        let config = PlannerConfig::default();
        let finances = finances.normalized();
        let aggregates = aggregate(&finances, &config);
        let debt = plan_debts(&finances, aggregates.monthly_disposable, &config);
        let total_investments = if finances.has_investments {
            finances.investments.total()
        } else {
            0.0
        };
        let ctx = RecommendationContext {
            finances: &finances,
            aggregates: &aggregates,
            debt: &debt,
            total_investments,
            today: plan_date(),
            config: &config,
        };
        primary_recommendations(ctx.tier(), &ctx)
    }

    #[test]
    fn test_classify_tier_chain() {
        let config = PlannerConfig::default();
        assert_eq!(
            classify_tier(&facts(999.0, 5000.0, 6000.0, 50.0), &config),
            Tier::StarterFund
        );
        assert_eq!(
            classify_tier(&facts(1000.0, 5000.0, 6000.0, 50.0), &config),
            Tier::DebtElimination
        );
        assert_eq!(
            classify_tier(&facts(5999.0, 0.0, 6000.0, 50.0), &config),
            Tier::FullEmergencyFund
        );
        assert_eq!(
            classify_tier(&facts(6000.0, 0.0, 6000.0, 14.9), &config),
            Tier::Invest15
        );
        assert_eq!(
            classify_tier(&facts(6000.0, 0.0, 6000.0, 15.0), &config),
            Tier::Optimize
        );
    }

    #[test]
    fn test_fund_boundary_takes_no_gap_branch() {
        let config = PlannerConfig::default();
        // savings == recommended fund is not a gap
        let tier = classify_tier(&facts(6000.0, 0.0, 6000.0, 5.0), &config);
        assert_ne!(tier, Tier::FullEmergencyFund);
    }

    #[test]
    fn test_starter_fund_text() {
        let recs = primary(&scenario_a());
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.kind, RecommendationKind::StarterFund);
        assert_eq!(rec.priority, Priority::Critical);
        assert!(rec.action.contains("Faltam €500."));
        // 500 needed at 500/month
        assert_eq!(rec.timeline, "Meta: Imediato");
        assert!(rec.impact.contains("em 1 mês"));
        assert_eq!(rec.data["months_to_target"], 1);
    }

    #[test]
    fn test_starter_fund_timeline_month_name() {
        let finances = HouseholdFinances {
            current_savings: 100.0,
            rent: 650.0,
            ..scenario_a()
        };
        // disposable 250 -> ceil(900 / 250) = 4 months from 15 Jan
        let recs = primary(&finances);
        assert_eq!(recs[0].timeline, "Meta: Até maio");

        let finances = HouseholdFinances {
            current_savings: 0.0,
            rent: 800.0,
            ..scenario_a()
        };
        // disposable 100 -> 10 months
        let recs = primary(&finances);
        assert_eq!(recs[0].timeline, "Meta: 10 meses");
    }

    #[test]
    fn test_starter_fund_without_margin() {
        let finances = HouseholdFinances {
            monthly_salary: 800.0,
            rent: 900.0,
            ..Default::default()
        };
        let recs = primary(&finances);
        assert_eq!(recs[0].timeline, "Meta: libertar margem mensal primeiro");
        assert!(recs[0].data["months_to_target"].is_null());
    }

    #[test]
    fn test_debt_elimination_scenario_b() {
        let recs = primary(&scenario_b());
        assert_eq!(recs.len(), 2);

        let rec = &recs[0];
        assert_eq!(rec.kind, RecommendationKind::DebtElimination);
        assert!(rec.action.contains("Têm 2 dívidas totalizando €12000"));
        assert!(rec
            .action
            .contains("1. Cartão de Crédito: €2000 a 20% ⚠️ ATACAR PRIMEIRO"));
        assert!(rec.action.contains("2. Crédito Pessoal: €10000 a 8%"));
        assert_eq!(rec.data["extra_payment"], 100.0);
        assert_eq!(rec.data["converged"], true);
        // 2000 @ 20% with 200/month -> 12 months, then 10000 at 500/month -> 20
        assert_eq!(rec.data["months_to_debt_free"], 32);
        assert_eq!(rec.timeline, "Meta: Livres de dívida até setembro de 2028");
        assert!(rec.action_steps[2].contains("atacar \"Crédito Pessoal\""));

        let order = &recs[1];
        assert_eq!(order.kind, RecommendationKind::DebtOrder);
        assert_eq!(order.priority, Priority::High);
        assert_eq!(
            order.action_steps,
            vec![
                "1. Cartão de Crédito: €2000 a 20% (20 meses)",
                "2. Crédito Pessoal: €10000 a 8% (40 meses)"
            ]
        );
    }

    #[test]
    fn test_single_debt_has_no_order_list() {
        let finances = HouseholdFinances {
            loans: vec![],
            ..scenario_b()
        };
        let recs = primary(&finances);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].action.starts_with("Têm 1 dívida totalizando"));
        assert_eq!(recs[0].action_steps.len(), 5);
    }

    #[test]
    fn test_debt_elimination_capped() {
        let finances = HouseholdFinances {
            monthly_salary: 1000.0,
            current_savings: 2000.0,
            loans: vec![Loan::new(1, "Agiota", 50_000.0, 0.0, 60.0, 0)],
            ..Default::default()
        };
        let recs = primary(&finances);
        assert_eq!(recs[0].data["converged"], false);
        assert!(recs[0].data["months_to_debt_free"].is_null());
        assert_eq!(recs[0].timeline, "Meta: pagar mais do que os juros mensais");
        assert!(recs[0].impact.contains("não fica paga em 50 anos"));
    }

    #[test]
    fn test_full_emergency_fund() {
        let finances = HouseholdFinances {
            current_savings: 2000.0,
            has_investments: true,
            investments: Investments {
                etfs: 1500.0,
                ..Default::default()
            },
            ..scenario_a()
        };
        let recs = primary(&finances);
        let rec = &recs[0];
        assert_eq!(rec.kind, RecommendationKind::FullEmergencyFund);
        assert_eq!(rec.priority, Priority::VeryHigh);
        assert!(rec.action.contains("fundo completo de €6000"));
        assert!(rec.action.contains("Faltam €4000."));
        assert!(rec.action.contains("Já têm €1500 investidos"));
        // 4000 / 500 = 8 months from 15 Jan 2026
        assert_eq!(rec.timeline, "Meta: setembro de 2026");
        assert_eq!(rec.action_steps[1], "Manter investimentos atuais - não vender!");
    }

    #[test]
    fn test_invest_15() {
        let finances = HouseholdFinances {
            monthly_salary: 1000.0,
            receives_subsidies: false,
            rent: 950.0,
            current_savings: 10_000.0,
            ..Default::default()
        };
        let recs = primary(&finances);
        let rec = &recs[0];
        assert_eq!(rec.kind, RecommendationKind::Invest15);
        assert!(rec.action.contains("(€150/mês)"));
        assert!(rec.action.contains("Atualmente poupam: 5.0% (€50/mês)"));
        assert_eq!(rec.action_steps[0], "Aumentar poupança em €100/mês para atingir 15%");
        let fv = rec.data["future_value"].as_f64().unwrap();
        assert!((fv - 1800.0 * (1.07f64.powi(30) - 1.0) / 0.07).abs() < 1e-6);
    }

    #[test]
    fn test_debt_tier_without_payoff_still_recommends() {
        let config = PlannerConfig::default();
        let finances = scenario_b().normalized();
        let aggregates = aggregate(&finances, &config);
        let debt = DebtPlan {
            entries: vec![],
            total_non_mortgage_debt: 500.0,
            total_debt_payment: 0.0,
            payoff: None,
        };
        let ctx = RecommendationContext {
            finances: &finances,
            aggregates: &aggregates,
            debt: &debt,
            total_investments: 0.0,
            today: plan_date(),
            config: &config,
        };

        let recs = primary_recommendations(Tier::DebtElimination, &ctx);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::DebtElimination);
        assert!(recs[0].action.starts_with("Têm €500 em dívidas"));
    }

    #[test]
    fn test_invest_15_grows_existing_investments() {
        let finances = HouseholdFinances {
            monthly_salary: 1000.0,
            receives_subsidies: false,
            rent: 950.0,
            current_savings: 10_000.0,
            has_investments: true,
            investments: Investments {
                etfs: 2000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let recs = primary(&finances);
        let rec = &recs[0];
        assert_eq!(rec.kind, RecommendationKind::Invest15);

        let existing = rec.data["existing_future_value"].as_f64().unwrap();
        assert!((existing - 2000.0 * 1.07f64.powi(30)).abs() < 1e-6);
        let future = rec.data["future_value"].as_f64().unwrap();
        let total = rec.data["total_future_value"].as_f64().unwrap();
        assert!((total - (future + existing)).abs() < 1e-6);
        assert_eq!(rec.data["existing_investments"], 2000.0);

        assert!(rec.action.contains("Investimentos atuais: €2000"));
        assert!(rec.action.contains("• ETFs: €2000"));
        assert!(!rec.action.contains("• PPR"));
        assert!(rec.impact.contains("Investimentos atuais crescem para"));
        assert_eq!(rec.action_steps[1], "✓ Continuem a diversificar o portfólio existente");
        assert_eq!(rec.action_steps[3], "✓ Continuem com ETFs");
        assert_eq!(rec.action_steps[6], "Portfólio atual de €2000 é um ótimo começo!");
    }

    #[test]
    fn test_optimize_scenario_d() {
        let recs = primary(&scenario_d());
        let rec = &recs[0];
        assert_eq!(rec.kind, RecommendationKind::Optimize);
        assert_eq!(rec.priority, Priority::Low);
        assert!(rec.action.contains("investem 33% do rendimento"));
        assert_eq!(rec.data["fi_target"], 300_000.0);

        let years = rec.data["years_to_fi"].as_u64().unwrap() as u32;
        assert_eq!(rec.data["fi_age"], 30 + years as u64);
        assert!(rec
            .impact
            .contains(&format!("~{} anos (idade {})", years, 30 + years)));
    }

    #[test]
    fn test_months_to_save() {
        assert_eq!(months_to_save(500.0, 500.0), Some(1));
        assert_eq!(months_to_save(501.0, 500.0), Some(2));
        assert_eq!(months_to_save(500.0, 0.0), None);
        assert_eq!(months_to_save(500.0, -10.0), None);
    }
}
