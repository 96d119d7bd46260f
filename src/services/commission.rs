// src/services/commission.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::payment::PaymentType;

/// Regra de comissão dos pagamentos.
///
/// Só pagamentos de entrada com atendente vinculado geram comissão:
/// `valor * percentual / 100`, arredondado ao centavo. Saídas e pagamentos
/// sem atendente (inclusive quando o atendente referenciado não existe mais)
/// ficam com comissão zero.
pub fn calcular_comissao(
    valor: Decimal,
    tipo: PaymentType,
    comissao_percentual: Option<Decimal>,
) -> Decimal {
    match (tipo, comissao_percentual) {
        (PaymentType::Entrada, Some(percentual)) => (valor * percentual / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn entrada_com_atendente_gera_comissao() {
        let comissao =
            calcular_comissao(Decimal::from(1000), PaymentType::Entrada, Some(Decimal::from(10)));
        assert_eq!(comissao, dec("100.00"));
    }

    #[test]
    fn saida_nunca_gera_comissao() {
        let comissao =
            calcular_comissao(Decimal::from(1000), PaymentType::Saida, Some(Decimal::from(10)));
        assert_eq!(comissao, Decimal::ZERO);
    }

    #[test]
    fn entrada_sem_atendente_fica_em_zero() {
        let comissao = calcular_comissao(Decimal::from(1000), PaymentType::Entrada, None);
        assert_eq!(comissao, Decimal::ZERO);
    }

    #[test]
    fn percentual_zero_fica_em_zero() {
        let comissao =
            calcular_comissao(Decimal::from(1000), PaymentType::Entrada, Some(Decimal::ZERO));
        assert_eq!(comissao, dec("0.00"));
    }

    #[test]
    fn resultado_arredondado_ao_centavo() {
        // 333.33 * 10% = 33.333 -> 33.33
        let comissao =
            calcular_comissao(dec("333.33"), PaymentType::Entrada, Some(Decimal::from(10)));
        assert_eq!(comissao, dec("33.33"));
    }

    #[test]
    fn metade_do_centavo_arredonda_para_cima() {
        // 10.00 * 1.25% = 0.125 -> 0.13
        let comissao = calcular_comissao(dec("10.00"), PaymentType::Entrada, Some(dec("1.25")));
        assert_eq!(comissao, dec("0.13"));
    }

    #[test]
    fn percentuais_fracionarios() {
        // 200 * 2.5% = 5.00
        let comissao = calcular_comissao(dec("200"), PaymentType::Entrada, Some(dec("2.5")));
        assert_eq!(comissao, dec("5.00"));
    }
}
