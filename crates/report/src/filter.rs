use chrono::NaiveDate;
use rodofin_core::{DateRange, StatusPagamento};

use crate::pagamentos::LinhaPagamento;
use crate::repasse::LinhaRepasse;

/// Empty selection means no restriction; otherwise the value must be one of
/// the selected entries. A null column value never satisfies a non-empty
/// selection.
fn passa_selecao(valor: Option<&str>, selecao: &[String]) -> bool {
    selecao.is_empty() || valor.is_some_and(|v| selecao.iter().any(|s| s == v))
}

/// Case-sensitive substring match on the stringified column; null values
/// never match an active filter.
fn passa_contem(valor: Option<&str>, filtro: Option<&str>) -> bool {
    match filtro {
        None => true,
        Some(f) => valor.is_some_and(|v| v.contains(f)),
    }
}

/// Inclusive date range; rows with a null date drop out while the range
/// filter is active.
fn passa_periodo(valor: Option<NaiveDate>, periodo: Option<DateRange>) -> bool {
    match periodo {
        None => true,
        Some(r) => valor.is_some_and(|d| r.contains(d)),
    }
}

/// Payout report filters. All active filters must pass (AND), membership
/// within one selection is OR.
#[derive(Debug, Clone, Default)]
pub struct FiltroRepasse {
    pub placas: Vec<String>,
    pub nfe: Option<String>,
    pub cte_nfs: Option<String>,
}

impl FiltroRepasse {
    pub fn aplicar(&self, mut linhas: Vec<LinhaRepasse>) -> Vec<LinhaRepasse> {
        linhas.retain(|l| self.passa(l));
        linhas
    }

    fn passa(&self, linha: &LinhaRepasse) -> bool {
        passa_selecao(linha.placa.as_deref(), &self.placas)
            && passa_contem(linha.nfe.as_deref(), self.nfe.as_deref())
            && passa_contem(Some(linha.cte_nfs.as_str()), self.cte_nfs.as_deref())
    }
}

/// Settlement report filters.
#[derive(Debug, Clone, Default)]
pub struct FiltroPagamentos {
    pub placas: Vec<String>,
    pub nfe: Option<String>,
    pub status: Vec<StatusPagamento>,
    pub tomadores: Vec<String>,
    pub emissao: Option<DateRange>,
    pub vencimento: Option<DateRange>,
}

impl FiltroPagamentos {
    pub fn aplicar(&self, mut linhas: Vec<LinhaPagamento>) -> Vec<LinhaPagamento> {
        linhas.retain(|l| self.passa(l));
        linhas
    }

    fn passa(&self, linha: &LinhaPagamento) -> bool {
        passa_selecao(linha.placa.as_deref(), &self.placas)
            && passa_contem(linha.nfe.as_deref(), self.nfe.as_deref())
            && (self.status.is_empty() || self.status.contains(&linha.status_pagamento))
            && passa_selecao(linha.tomador.as_deref(), &self.tomadores)
            && passa_periodo(linha.dt_emissao, self.emissao)
            && passa_periodo(linha.vencimento, self.vencimento)
    }
}
