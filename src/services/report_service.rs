// src/services/report_service.rs

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::report::{CategoryBreakdown, MonthlyTrendEntry, ReportResponse, ReportSummary},
};

const MESES: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

#[derive(Clone)]
pub struct ReportService {
    repo: ReportRepository,
}

impl ReportService {
    pub fn new(repo: ReportRepository) -> Self {
        Self { repo }
    }

    /// Relatório completo. O sumário é obrigatório; cada detalhamento
    /// (categorias, atendentes, tripeiros, tendência) degrada sozinho para
    /// vazio em caso de falha.
    pub async fn generate(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<ReportResponse, AppError> {
        let (confirmed_payments, total_revenue) =
            self.repo.revenue_summary(tenant_id, range).await?;
        let (expense_count, total_expenses) = self.repo.expenses_summary(tenant_id, range).await?;
        let (total_commissions, attendant_count) =
            self.repo.commissions_summary(tenant_id, range).await?;
        let (pending_payments, total_pending) = self.repo.pending_summary(tenant_id, range).await?;

        // No sumário do relatório o lucro ignora recebíveis (receita - despesa)
        let net_profit = total_revenue - total_expenses;
        let profit_margin = margem_lucro(net_profit, total_revenue);

        let summary = ReportSummary {
            total_revenue,
            total_expenses,
            net_profit,
            profit_margin,
            total_commissions,
            confirmed_payments,
            expense_count,
            attendant_count,
            pending_payments,
            total_pending,
        };

        let by_category = match self.repo.expenses_by_category(tenant_id, range).await {
            Ok(rows) => montar_categorias(rows),
            Err(e) => {
                tracing::warn!("Detalhamento por categoria degradou para vazio: {e}");
                Vec::new()
            }
        };

        let by_attendant = match self.repo.top_attendants(tenant_id, range).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Detalhamento por atendente degradou para vazio: {e}");
                Vec::new()
            }
        };

        let by_tripeiro = match self.repo.top_tripeiros(tenant_id, range).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Detalhamento por tripeiro degradou para vazio: {e}");
                Vec::new()
            }
        };

        let monthly_trend = match (
            self.repo.monthly_revenue(tenant_id).await,
            self.repo.monthly_expenses(tenant_id).await,
        ) {
            (Ok(receitas), Ok(despesas)) => mesclar_tendencia(receitas, despesas),
            (receitas, despesas) => {
                if let Err(e) = receitas {
                    tracing::warn!("Série mensal de receita degradou para vazio: {e}");
                }
                if let Err(e) = despesas {
                    tracing::warn!("Série mensal de despesa degradou para vazio: {e}");
                }
                Vec::new()
            }
        };

        Ok(ReportResponse { summary, by_category, by_attendant, by_tripeiro, monthly_trend })
    }
}

/// Margem de lucro em %: zero quando não há receita (nunca divide por zero).
pub(crate) fn margem_lucro(net_profit: Decimal, total_revenue: Decimal) -> Decimal {
    if total_revenue > Decimal::ZERO {
        (net_profit / total_revenue * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    }
}

// Percentual de cada categoria sobre o total das categorias listadas
pub(crate) fn montar_categorias(rows: Vec<(String, Decimal, i64)>) -> Vec<CategoryBreakdown> {
    let total: Decimal = rows.iter().map(|(_, value, _)| *value).sum();

    rows.into_iter()
        .map(|(name, value, count)| {
            let percentage = if total > Decimal::ZERO {
                (value / total * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            } else {
                Decimal::ZERO
            };
            CategoryBreakdown { name, value, count, percentage }
        })
        .collect()
}

/// Junta as séries mensais de receita e despesa numa linha por mês,
/// ordenada cronologicamente, com o rótulo formatado.
pub(crate) fn mesclar_tendencia(
    receitas: Vec<(String, Decimal)>,
    despesas: Vec<(String, Decimal)>,
) -> Vec<MonthlyTrendEntry> {
    let mut meses: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for (mes, receita) in receitas {
        meses.entry(mes).or_default().0 = receita;
    }
    for (mes, despesa) in despesas {
        meses.entry(mes).or_default().1 = despesa;
    }

    meses
        .into_iter()
        .map(|(mes, (revenue, expenses))| MonthlyTrendEntry {
            month: formatar_mes(&mes),
            revenue,
            expenses,
        })
        .collect()
}

// "2025-04" -> "Abr/25"; entradas fora do formato passam adiante sem mexer
pub(crate) fn formatar_mes(mes: &str) -> String {
    let Some((ano, numero)) = mes.split_once('-') else {
        return mes.to_string();
    };
    let Ok(indice) = numero.parse::<usize>() else {
        return mes.to_string();
    };
    if indice == 0 || indice > 12 || ano.len() < 2 {
        return mes.to_string();
    }
    format!("{}/{}", MESES[indice - 1], &ano[ano.len() - 2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn margem_normal() {
        // 700 de lucro sobre 1000 de receita = 70%
        assert_eq!(margem_lucro(dec("700"), dec("1000")), dec("70.00"));
    }

    #[test]
    fn margem_sem_receita_vale_zero() {
        assert_eq!(margem_lucro(dec("-300"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn margem_arredondada_a_duas_casas() {
        // 100/300 = 33.333...%
        assert_eq!(margem_lucro(dec("100"), dec("300")), dec("33.33"));
    }

    #[test]
    fn categorias_com_percentuais() {
        let rows = vec![
            ("Infraestrutura".to_string(), dec("300"), 3i64),
            ("Outros".to_string(), dec("100"), 1i64),
        ];
        let categorias = montar_categorias(rows);

        assert_eq!(categorias.len(), 2);
        assert_eq!(categorias[0].percentage, dec("75.00"));
        assert_eq!(categorias[1].percentage, dec("25.00"));
    }

    #[test]
    fn categorias_vazias_nao_dividem_por_zero() {
        assert!(montar_categorias(Vec::new()).is_empty());
    }

    #[test]
    fn tendencia_mescla_meses_sobrepostos_e_disjuntos() {
        let receitas = vec![
            ("2025-03".to_string(), dec("1000")),
            ("2025-04".to_string(), dec("1500")),
        ];
        let despesas = vec![
            ("2025-04".to_string(), dec("400")),
            ("2025-05".to_string(), dec("200")),
        ];

        let trend = mesclar_tendencia(receitas, despesas);

        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0], MonthlyTrendEntry {
            month: "Mar/25".to_string(),
            revenue: dec("1000"),
            expenses: Decimal::ZERO,
        });
        assert_eq!(trend[1], MonthlyTrendEntry {
            month: "Abr/25".to_string(),
            revenue: dec("1500"),
            expenses: dec("400"),
        });
        assert_eq!(trend[2], MonthlyTrendEntry {
            month: "Mai/25".to_string(),
            revenue: Decimal::ZERO,
            expenses: dec("200"),
        });
    }

    #[test]
    fn rotulo_de_mes_formatado() {
        assert_eq!(formatar_mes("2025-01"), "Jan/25");
        assert_eq!(formatar_mes("2024-12"), "Dez/24");
    }

    #[test]
    fn rotulo_invalido_passa_adiante() {
        assert_eq!(formatar_mes("sem-formato"), "sem-formato");
        assert_eq!(formatar_mes("2025"), "2025");
    }
}
