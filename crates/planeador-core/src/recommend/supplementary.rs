//! Supplementary rules, evaluated independently of the primary tier

use crate::format::{euros, whole};
use crate::projection::horizons;

use super::engine::{RecommendationContext, RecommendationRule};
use super::types::{
    ExcessSavingsData, HousingCostData, NegativeSavingsData, Placement, Priority, Recommendation,
    RecommendationKind, SubscriptionsData, SubsidyStrategyData, Tier,
};

/// Horizons (years) of the excess-savings projection
const EXCESS_HORIZONS: [u32; 3] = [10, 20, 30];

/// Idle savings well above the emergency fund with no debt left
pub struct ExcessSavingsRule;

impl RecommendationRule for ExcessSavingsRule {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::ExcessSavings
    }

    fn name(&self) -> &'static str {
        "Excess Savings"
    }

    fn evaluate(&self, ctx: &RecommendationContext<'_>) -> Option<Recommendation> {
        let fund = ctx.aggregates.recommended_emergency_fund;
        let savings = ctx.finances.current_savings;
        let excess = savings - fund;

        if excess <= ctx.config.excess_savings_threshold || ctx.debt.has_debt() || savings < fund {
            return None;
        }

        let projections = horizons(excess, ctx.config.annual_return, &EXCESS_HORIZONS);
        let lines: Vec<String> = projections
            .iter()
            .map(|p| {
                format!(
                    "• Em {} anos: {} (+{})",
                    p.years,
                    euros(p.value),
                    euros(p.gain)
                )
            })
            .collect();

        Some(
            Recommendation::new(
                self.kind(),
                Priority::Medium,
                "OTIMIZAÇÃO",
                "💰 Excesso em Poupança",
                format!(
                    "Têm {} acima do fundo de emergência recomendado. Dinheiro parado perde valor com inflação!",
                    euros(excess)
                ),
            )
            .with_impact(format!(
                "Se investirem este excesso a {}%/ano:\n{}\n\nVs. deixar parado: continua {} (perde valor com inflação)",
                whole(ctx.config.annual_return * 100.0),
                lines.join("\n"),
                euros(excess)
            ))
            .with_timeline("Considerar esta semana")
            .with_steps([
                "⚠️ IMPORTANTE: Estão a poupar para algo específico? (casa, carro, casamento, etc.)".to_string(),
                "Se SIM: manter em conta poupança se precisam nos próximos 3-5 anos".to_string(),
                "Se NÃO: investir o excesso! Está a perder valor parado".to_string(),
                "Opção 1: Certificados de Aforro (seguro, liquidez em 3 meses)".to_string(),
                "Opção 2: ETFs globais para longo prazo (>10 anos)".to_string(),
                "Opção 3: PPR (benefícios fiscais + investimento)".to_string(),
                format!("Manter sempre o fundo emergência ({}) intocável!", euros(fund)),
            ])
            .with_data(&ExcessSavingsData {
                excess_savings: excess,
                projections,
            }),
        )
    }
}

/// Spending exceeds income; always shown first
pub struct NegativeSavingsRule;

impl RecommendationRule for NegativeSavingsRule {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::NegativeSavings
    }

    fn name(&self) -> &'static str {
        "Negative Savings"
    }

    fn placement(&self) -> Placement {
        Placement::Prepend
    }

    fn evaluate(&self, ctx: &RecommendationContext<'_>) -> Option<Recommendation> {
        let rate = ctx.aggregates.savings_rate;
        if rate >= 0.0 {
            return None;
        }
        let shortfall = ctx.aggregates.monthly_disposable.abs();

        Some(
            Recommendation::new(
                self.kind(),
                Priority::Emergency,
                "⚠️ URGENTE",
                "🚨 Despesas > Rendimentos",
                format!(
                    "ALERTA CRÍTICO: Gastam {}/mês MAIS do que ganham!",
                    euros(shortfall)
                ),
            )
            .with_impact(
                "A situação actual é insustentável. Estão a criar dívida nova todos os meses.",
            )
            .with_timeline("RESOLVER ESTA SEMANA")
            .with_steps([
                "PARAR todos os gastos não essenciais HOJE",
                "Listar TODAS as despesas e cortar 30-50%",
                "Vender possessões que não precisam",
                "Procurar rendimento extra (part-time, freelance)",
                "Contactar DECO para aconselhamento de dívida",
                "Não podem seguir os outros passos até equilibrar orçamento",
            ])
            .with_data(&NegativeSavingsData {
                monthly_shortfall: shortfall,
                savings_rate: rate,
            }),
        )
    }
}

/// Rent plus condominium above the alert share of income
pub struct HousingCostRule;

impl RecommendationRule for HousingCostRule {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::HousingCost
    }

    fn name(&self) -> &'static str {
        "Housing Cost"
    }

    fn evaluate(&self, ctx: &RecommendationContext<'_>) -> Option<Recommendation> {
        let ratio = ctx.aggregates.housing_ratio;
        if ratio <= ctx.config.housing_alert_ratio {
            return None;
        }
        let target = ctx.config.housing_target_ratio;
        let yearly_savings =
            (ratio - target) / 100.0 * ctx.aggregates.average_monthly_income * 12.0;

        Some(
            Recommendation::new(
                self.kind(),
                Priority::Medium,
                "OTIMIZAÇÃO",
                "🏠 Custo de Habitação",
                format!(
                    "Habitação custa {}% do rendimento (recomendado: máx {}-{}%).",
                    whole(ratio),
                    whole(target),
                    whole(ctx.config.housing_alert_ratio)
                ),
            )
            .with_impact(format!(
                "Reduzir para {}% libertaria {}/ano = aceleração significativa dos objetivos",
                whole(target),
                euros(yearly_savings)
            ))
            .with_timeline("Considerar a médio prazo")
            .with_steps([
                "Avaliar se podem mudar para zona mais barata",
                "Considerar roommate se aplicável",
                "Renegociar renda no próximo contrato",
                "Esta mudança pode acelerar liberdade financeira em anos",
            ])
            .with_data(&HousingCostData {
                housing_ratio: ratio,
                target_ratio: target,
                yearly_savings_if_reduced: yearly_savings,
            }),
        )
    }
}

/// Subscriptions above the alert share of income
pub struct SubscriptionsRule;

impl RecommendationRule for SubscriptionsRule {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::Subscriptions
    }

    fn name(&self) -> &'static str {
        "Subscriptions"
    }

    fn evaluate(&self, ctx: &RecommendationContext<'_>) -> Option<Recommendation> {
        let monthly = ctx.finances.subscriptions;
        let limit = ctx.aggregates.average_monthly_income * ctx.config.subscription_alert_share;
        if monthly <= limit {
            return None;
        }
        let yearly = monthly * 12.0;
        let half_cut_yearly = yearly * 0.5;

        Some(
            Recommendation::new(
                self.kind(),
                Priority::Low,
                "OTIMIZAÇÃO",
                "📱 Subscrições",
                format!(
                    "Gastam {}/mês ({}/ano) em subscrições.",
                    euros(monthly),
                    euros(yearly)
                ),
            )
            .with_impact(format!(
                "Cortar 50% = {}/ano para objetivos mais importantes",
                euros(half_cut_yearly)
            ))
            .with_timeline("Fazer esta semana")
            .with_steps([
                "Listar TODAS as subscrições (ver extratos bancários)",
                "Cancelar as não usadas nos últimos 30 dias",
                "Partilhar contas familiares quando possível",
                "Usar versões gratuitas quando adequado",
            ])
            .with_data(&SubscriptionsData {
                monthly,
                yearly,
                half_cut_yearly,
            }),
        )
    }
}

/// Where to put the holiday and Christmas bonus pay, matched to the tier
pub struct SubsidyStrategyRule;

impl SubsidyStrategyRule {
    fn suggested_use(tier: Tier, ctx: &RecommendationContext<'_>) -> String {
        match tier {
            Tier::StarterFund => format!(
                "Completar {} de fundo inicial",
                euros(ctx.config.starter_fund_target)
            ),
            Tier::DebtElimination => format!(
                "Eliminar dívidas (atacar \"{}\")",
                ctx.debt.target().map(|d| d.name.as_str()).unwrap_or("dívida")
            ),
            Tier::FullEmergencyFund => "Construir fundo de emergência completo".to_string(),
            Tier::Invest15 | Tier::Optimize => "Investir para o futuro".to_string(),
        }
    }
}

impl RecommendationRule for SubsidyStrategyRule {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::SubsidyStrategy
    }

    fn name(&self) -> &'static str {
        "Subsidy Strategy"
    }

    fn evaluate(&self, ctx: &RecommendationContext<'_>) -> Option<Recommendation> {
        if !ctx.finances.receives_subsidies {
            return None;
        }
        let total = ctx.aggregates.subsidies_total;
        let tier = ctx.tier();
        let suggested_use = Self::suggested_use(tier, ctx);

        Some(
            Recommendation::new(
                self.kind(),
                Priority::High,
                "ESTRATÉGIA",
                format!("🎁 Subsídios {}", ctx.today.format("%Y")),
                format!("Vão receber ~{} em subsídios este ano.", euros(total)),
            )
            .with_impact(format!(
                "Usar estrategicamente pode acelerar objectivos em MESES:\n• Subsídio Férias (Julho): {}\n• Subsídio Natal (Novembro): {}\n• NÃO gastar em luxos/férias caras",
                suggested_use, suggested_use
            ))
            .with_timeline("Planear ANTES de receber")
            .with_steps([
                "Decidir AGORA onde vai cada subsídio".to_string(),
                "Transferir IMEDIATAMENTE ao receber".to_string(),
                "Não deixar \"aquecer\" na conta principal".to_string(),
                format!("Estes {} podem mudar o vosso ano!", euros(total)),
            ])
            .with_data(&SubsidyStrategyData {
                subsidies_total: total,
                tier,
                suggested_use,
            }),
        )
    }
}
