use rodofin_core::{Money, StatusPagamento};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::pagamentos::LinhaPagamento;
use crate::repasse::LinhaRepasse;

/// Headline figures of the settlement report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumoPagamentos {
    pub total_faturado: Money,
    pub total_pago: Money,
    pub total_a_receber: Money,
    /// Percentage of the billed total already paid; 0 when nothing was
    /// billed, never a division error.
    pub percentual_pago: Decimal,
}

pub fn resumo_pagamentos(linhas: &[LinhaPagamento]) -> ResumoPagamentos {
    let total_faturado: Money = linhas.iter().filter_map(|l| l.total).sum();
    let total_pago: Money = linhas.iter().filter_map(|l| l.valor_pago).sum();
    let total_a_receber: Money = linhas.iter().filter_map(|l| l.saldo_a_receber).sum();
    let percentual_pago = if total_faturado.is_zero() {
        Decimal::ZERO
    } else {
        (total_pago.to_decimal() / total_faturado.to_decimal() * Decimal::from(100)).round_dp(2)
    };
    ResumoPagamentos {
        total_faturado,
        total_pago,
        total_a_receber,
        percentual_pago,
    }
}

/// Row count by settlement status, in status order.
pub fn contagem_por_status(linhas: &[LinhaPagamento]) -> BTreeMap<StatusPagamento, usize> {
    let mut contagem = BTreeMap::new();
    for linha in linhas {
        *contagem.entry(linha.status_pagamento).or_insert(0) += 1;
    }
    contagem
}

/// Billed total per plate. Rows without a plate or total are skipped, the
/// same way a groupby drops null keys.
pub fn total_por_placa(linhas: &[LinhaPagamento]) -> BTreeMap<String, Money> {
    let mut totais: BTreeMap<String, Money> = BTreeMap::new();
    for linha in linhas {
        if let (Some(placa), Some(total)) = (&linha.placa, linha.total) {
            let acumulado = totais.entry(placa.clone()).or_insert_with(Money::zero);
            *acumulado = *acumulado + total;
        }
    }
    totais
}

/// Open balance (Pendente / À vencer rows only) grouped by due month,
/// keyed `YYYY-MM` so the natural ordering is chronological.
pub fn saldo_por_mes_vencimento(linhas: &[LinhaPagamento]) -> BTreeMap<String, Money> {
    let mut saldos: BTreeMap<String, Money> = BTreeMap::new();
    for linha in linhas {
        if !linha.status_pagamento.em_aberto() {
            continue;
        }
        if let (Some(vencimento), Some(saldo)) = (linha.vencimento, linha.saldo_a_receber) {
            let mes = vencimento.format("%Y-%m").to_string();
            let acumulado = saldos.entry(mes).or_insert_with(Money::zero);
            *acumulado = *acumulado + saldo;
        }
    }
    saldos
}

/// Headline figures of the payout report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumoRepasse {
    pub registros: usize,
    pub total_frete_liquido: Money,
}

pub fn resumo_repasse(linhas: &[LinhaRepasse]) -> ResumoRepasse {
    ResumoRepasse {
        registros: linhas.len(),
        total_frete_liquido: linhas.iter().filter_map(|l| l.frete_liq).sum(),
    }
}

/// Net freight per plate. Rows without a plate or net freight are skipped,
/// the same way a groupby drops null keys.
pub fn frete_liquido_por_placa(linhas: &[LinhaRepasse]) -> BTreeMap<String, Money> {
    let mut totais: BTreeMap<String, Money> = BTreeMap::new();
    for linha in linhas {
        if let (Some(placa), Some(frete)) = (&linha.placa, linha.frete_liq) {
            let acumulado = totais.entry(placa.clone()).or_insert_with(Money::zero);
            *acumulado = *acumulado + frete;
        }
    }
    totais
}

/// Net freight per company, over the plate → company assignment already
/// resolved on each row. Plates outside the fleet table have a null company
/// and drop out.
pub fn frete_liquido_por_empresa(linhas: &[LinhaRepasse]) -> BTreeMap<String, Money> {
    let mut totais: BTreeMap<String, Money> = BTreeMap::new();
    for linha in linhas {
        if let (Some(empresa), Some(frete)) = (&linha.empresa, linha.frete_liq) {
            let acumulado = totais.entry(empresa.clone()).or_insert_with(Money::zero);
            *acumulado = *acumulado + frete;
        }
    }
    totais
}
