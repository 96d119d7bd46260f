// src/services/dashboard_service.rs

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardMetrics, DashboardResponse},
};

/// Soma das fatias financeiras do painel.
///
/// Receita e despesas são obrigatórias: se falharem, a requisição falha.
/// Todo o resto (recebíveis, comissões, rankings, listas recentes, contagens)
/// é opcional: cada fatia degrada para vazio de forma independente, para que
/// uma tabela quebrada não derrube o painel inteiro.
#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn metrics(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<DashboardResponse, AppError> {
        let total_revenue = self.repo.revenue_sum(tenant_id, range).await?;
        let total_expenses = self.repo.expenses_sum(tenant_id, range).await?;

        let total_receivables =
            fatia_ou_padrao(self.repo.receivables_sum(tenant_id, range).await, "recebimentos");
        let total_commissions =
            fatia_ou_padrao(self.repo.commissions_sum(tenant_id, range).await, "comissões");

        let net_profit = total_revenue + total_receivables - total_expenses;

        // A variação compara só a receita com o período imediatamente anterior
        // de mesma duração; sem intervalo, não há o que comparar.
        let variation = match range {
            Some((inicio, fim)) => {
                let periodo = periodo_anterior(inicio, fim);
                let receita_anterior = fatia_ou_padrao(
                    self.repo.revenue_sum(tenant_id, Some(periodo)).await,
                    "receita do período anterior",
                );
                variacao(total_revenue, receita_anterior)
            }
            None => Decimal::ZERO,
        };

        let metrics = DashboardMetrics {
            total_revenue,
            total_expenses,
            total_receivables,
            total_commissions,
            net_profit,
            variation,
            total_tripeiros: fatia_ou_padrao(
                self.repo.count_active_tripeiros(tenant_id).await,
                "contagem de tripeiros",
            ),
            total_atendentes: fatia_ou_padrao(
                self.repo.count_active_atendentes(tenant_id).await,
                "contagem de atendentes",
            ),
        };

        Ok(DashboardResponse {
            metrics,
            top_attendants: fatia_ou_padrao(
                self.repo.top_attendants(tenant_id).await,
                "top atendentes",
            ),
            latest_payments: fatia_ou_padrao(
                self.repo.latest_payments(tenant_id).await,
                "últimos pagamentos",
            ),
            latest_expenses: fatia_ou_padrao(
                self.repo.latest_expenses(tenant_id).await,
                "últimas despesas",
            ),
            notes: fatia_ou_padrao(self.repo.recent_notes(tenant_id, user_id).await, "notas"),
            reminders: fatia_ou_padrao(
                self.repo.pending_reminders(tenant_id, user_id).await,
                "lembretes",
            ),
        })
    }
}

// Tarefa de agregação independente: em caso de falha, loga e devolve o vazio
// do tipo em vez de propagar o erro.
fn fatia_ou_padrao<T: Default>(result: Result<T, AppError>, fatia: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Fatia '{fatia}' do painel degradou para vazio: {e}");
            T::default()
        }
    }
}

/// Período imediatamente anterior, de mesma duração:
/// termina um dia antes do início e cobre o mesmo número de dias.
pub(crate) fn periodo_anterior(inicio: NaiveDate, fim: NaiveDate) -> (NaiveDate, NaiveDate) {
    let duracao = fim - inicio;
    let fim_anterior = inicio - chrono::Duration::days(1);
    let inicio_anterior = fim_anterior - duracao;
    (inicio_anterior, fim_anterior)
}

/// Variação percentual da receita frente ao período anterior.
///
/// Base zero com receita nova vale exatamente 100%; tudo zerado vale 0%.
pub(crate) fn variacao(atual: Decimal, anterior: Decimal) -> Decimal {
    if anterior > Decimal::ZERO {
        ((atual - anterior) / anterior * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else if atual > Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dia(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn periodo_anterior_preserva_a_duracao() {
        let (inicio, fim) = periodo_anterior(dia(2025, 6, 11), dia(2025, 6, 20));
        assert_eq!(fim, dia(2025, 6, 10));
        assert_eq!(inicio, dia(2025, 6, 1));
        // Mesma quantidade de dias nos dois períodos
        assert_eq!(fim - inicio, dia(2025, 6, 20) - dia(2025, 6, 11));
    }

    #[test]
    fn periodo_anterior_de_um_unico_dia() {
        let (inicio, fim) = periodo_anterior(dia(2025, 6, 15), dia(2025, 6, 15));
        assert_eq!(inicio, dia(2025, 6, 14));
        assert_eq!(fim, dia(2025, 6, 14));
    }

    #[test]
    fn periodo_anterior_atravessa_viradas_de_mes() {
        let (inicio, fim) = periodo_anterior(dia(2025, 3, 1), dia(2025, 3, 31));
        assert_eq!(fim, dia(2025, 2, 28));
        assert_eq!(inicio, dia(2025, 1, 29));
    }

    #[test]
    fn variacao_normal() {
        assert_eq!(variacao(dec("150"), dec("100")), dec("50.00"));
        assert_eq!(variacao(dec("50"), dec("100")), dec("-50.00"));
    }

    #[test]
    fn base_zero_com_receita_nova_vale_cem() {
        assert_eq!(variacao(dec("500"), Decimal::ZERO), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn tudo_zerado_vale_zero() {
        assert_eq!(variacao(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn variacao_arredondada_a_duas_casas() {
        // (100 - 300) / 300 * 100 = -66.666... -> -66.67
        assert_eq!(variacao(dec("100"), dec("300")), dec("-66.67"));
    }

    #[test]
    fn fatia_com_erro_degrada_para_o_padrao() {
        let falha: Result<Vec<i32>, AppError> =
            Err(AppError::NotFound("tabela"));
        assert_eq!(fatia_ou_padrao(falha, "teste"), Vec::<i32>::new());

        let ok: Result<Decimal, AppError> = Ok(dec("10"));
        assert_eq!(fatia_ou_padrao(ok, "teste"), dec("10"));
    }
}
