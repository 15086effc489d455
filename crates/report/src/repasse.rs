use chrono::NaiveDate;
use rodofin_core::Money;
use rodofin_import::{Faturamento, Pagamento};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::empresas::TabelaEmpresas;
use crate::filter::FiltroRepasse;
use crate::normalize::{normalizar, Emissao};
use crate::reconcile::join_pagamento_doc;

/// Contractual carrier share of the gross freight value.
pub fn fator_frete_liquido() -> Decimal {
    Decimal::new(6792, 4) // 0.6792
}

/// One row of the payout report: the day's payments enriched with invoice
/// and fleet data. Invoice-side fields are null when the document key found
/// no invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinhaRepasse {
    pub nfe: Option<String>,
    pub cte_nfs: String,
    pub dt_emissao: Option<NaiveDate>,
    pub frete_liq: Option<Money>,
    pub remetente: Option<String>,
    pub entrega: Option<String>,
    pub mun_entrega: Option<String>,
    pub placa: Option<String>,
    pub empresa: Option<String>,
}

/// Payout report for one transfer date: select the payments of that day,
/// join invoices by document key, attach the company for the plate, derive
/// the net freight, then filter.
pub fn relatorio_repasse(
    faturamento: &[Faturamento],
    pagamentos: &[Pagamento],
    data_repasse: NaiveDate,
    empresas: &TabelaEmpresas,
    filtro: &FiltroRepasse,
) -> Vec<LinhaRepasse> {
    let emissoes: Vec<Emissao> = faturamento.iter().cloned().map(normalizar).collect();
    let do_dia: Vec<Pagamento> = pagamentos
        .iter()
        .filter(|p| p.dt_repasse == Some(data_repasse))
        .cloned()
        .collect();

    let linhas = join_pagamento_doc(&do_dia, &emissoes)
        .into_iter()
        .map(|(pagamento, emissao)| montar_linha(pagamento, emissao, empresas))
        .collect();

    filtro.aplicar(linhas)
}

fn montar_linha(
    pagamento: &Pagamento,
    emissao: Option<&Emissao>,
    empresas: &TabelaEmpresas,
) -> LinhaRepasse {
    let placa = emissao.and_then(|e| e.origem.placa.clone());
    let empresa = placa
        .as_deref()
        .and_then(|p| empresas.empresa(p))
        .map(str::to_string);
    LinhaRepasse {
        nfe: emissao.and_then(|e| e.origem.nfe.clone()),
        cte_nfs: pagamento.doc.clone(),
        dt_emissao: emissao.and_then(|e| e.origem.dt_emissao),
        frete_liq: emissao
            .and_then(|e| e.origem.frete)
            .map(|frete| frete * fator_frete_liquido()),
        remetente: emissao.and_then(|e| e.origem.remetente.clone()),
        entrega: emissao.and_then(|e| e.entrega.nome().map(str::to_string)),
        mun_entrega: emissao.and_then(|e| e.entrega.cidade().map(str::to_string)),
        placa,
        empresa,
    }
}
