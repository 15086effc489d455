use chrono::{NaiveDate, NaiveDateTime};
use rodofin_core::{data_vencimento, Money, StatusPagamento};
use rodofin_import::{Faturamento, Pagamento};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::filter::FiltroPagamentos;
use crate::normalize::{normalizar, Emissao};
use crate::reconcile::join_emissao_serie_doc;

/// One row of the settlement report, in display column order. Payment-side
/// fields are null for invoices still without a payment record; `saldo_a_
/// receber` is null with them, since there is no billed total to subtract
/// from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinhaPagamento {
    pub status_pagamento: StatusPagamento,
    pub vencimento: Option<NaiveDate>,
    pub valor_pago: Option<Money>,
    pub total: Option<Money>,
    pub saldo_a_receber: Option<Money>,
    pub doc: String,
    pub dt_emissao: Option<NaiveDate>,
    pub nfe: Option<String>,
    pub remetente: Option<String>,
    pub rem_cidade: Option<String>,
    pub entrega: Option<String>,
    pub mun_entrega: Option<String>,
    pub frete: Option<Money>,
    pub pedagio: Option<Money>,
    pub peso_bruto: Option<Decimal>,
    pub observacao: Option<String>,
    pub placa: Option<String>,
    pub status_repasse: Option<String>,
    pub tomador: Option<String>,
    pub fatura: Option<String>,
    pub dt_repasse: Option<NaiveDate>,
}

/// Settlement report over the full invoice book: composite-key join against
/// the payments, due-date and status derivation, balance, then filter.
/// `agora` anchors the overdue comparison so the pipeline stays pure.
pub fn relatorio_pagamentos(
    faturamento: &[Faturamento],
    pagamentos: &[Pagamento],
    agora: NaiveDateTime,
    filtro: &FiltroPagamentos,
) -> Vec<LinhaPagamento> {
    let emissoes: Vec<Emissao> = faturamento.iter().cloned().map(normalizar).collect();

    let linhas = join_emissao_serie_doc(&emissoes, pagamentos)
        .into_iter()
        .map(|(emissao, pagamento)| montar_linha(emissao, pagamento, agora))
        .collect();

    filtro.aplicar(linhas)
}

fn montar_linha(
    emissao: &Emissao,
    pagamento: Option<&Pagamento>,
    agora: NaiveDateTime,
) -> LinhaPagamento {
    let origem = &emissao.origem;
    let vencimento = origem.dt_emissao.map(data_vencimento);
    let valor_pago = pagamento.and_then(|p| p.valor_pago);
    let total = pagamento.and_then(|p| p.total);
    let status_pagamento = StatusPagamento::classificar(valor_pago, vencimento, agora);
    let saldo_a_receber = total.map(|t| t - valor_pago.unwrap_or_else(Money::zero));

    LinhaPagamento {
        status_pagamento,
        vencimento,
        valor_pago,
        total,
        saldo_a_receber,
        doc: emissao.doc.clone(),
        dt_emissao: origem.dt_emissao,
        nfe: origem.nfe.clone(),
        remetente: origem.remetente.clone(),
        rem_cidade: origem.rem_cidade.clone(),
        entrega: emissao.entrega.nome().map(str::to_string),
        mun_entrega: emissao.entrega.cidade().map(str::to_string),
        frete: origem.frete,
        pedagio: origem.pedagio,
        peso_bruto: origem.peso_bruto,
        observacao: origem.observacao.clone(),
        placa: origem.placa.clone(),
        status_repasse: pagamento.and_then(|p| p.status.clone()),
        tomador: pagamento.and_then(|p| p.tomador.clone()),
        fatura: pagamento.and_then(|p| p.fatura.clone()),
        dt_repasse: pagamento.and_then(|p| p.dt_repasse),
    }
}
