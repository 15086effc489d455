use chrono::NaiveDate;
use rodofin_core::Money;
use std::path::Path;

use crate::sheet::{celula, Cell, Sheet, SheetError};

/// One row of the payments workbook ("Documentos Pagos"). `doc` is the
/// CT-e/NFS key the reconciler joins on; `valor_pago` stays null until a
/// payment is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagamento {
    pub serie: String,
    pub doc: String,
    pub dt_repasse: Option<NaiveDate>,
    pub valor_pago: Option<Money>,
    pub total: Option<Money>,
    pub status: Option<String>,
    pub tomador: Option<String>,
    pub fatura: Option<String>,
}

struct Colunas {
    serie: usize,
    doc: usize,
    dt_repasse: Option<usize>,
    valor_pago: Option<usize>,
    total: Option<usize>,
    status: Option<usize>,
    tomador: Option<usize>,
    fatura: Option<usize>,
}

impl Colunas {
    fn localizar(sheet: &Sheet) -> Result<Self, SheetError> {
        Ok(Colunas {
            serie: sheet.indice_obrigatorio("Serie")?,
            doc: sheet.indice_obrigatorio("CT-e/NFS")?,
            dt_repasse: sheet.indice("Dt. Repasse"),
            valor_pago: sheet.indice("Valor Pago"),
            total: sheet.indice("Total"),
            status: sheet.indice("Status"),
            tomador: sheet.indice("Tomador"),
            fatura: sheet.indice("Fatura"),
        })
    }
}

fn texto(linha: &[Cell], idx: Option<usize>) -> Option<String> {
    celula(linha, idx).as_texto()
}

fn valor(linha: &[Cell], idx: Option<usize>) -> Option<Money> {
    celula(linha, idx).as_decimal().map(Money::from_decimal)
}

pub fn parse_pagamentos(sheet: &Sheet) -> Result<Vec<Pagamento>, SheetError> {
    let col = Colunas::localizar(sheet)?;
    let registros = sheet
        .linhas()
        .iter()
        .map(|linha| Pagamento {
            serie: texto(linha, Some(col.serie)).unwrap_or_default(),
            doc: texto(linha, Some(col.doc)).unwrap_or_default(),
            dt_repasse: celula(linha, col.dt_repasse).as_data(),
            valor_pago: valor(linha, col.valor_pago),
            total: valor(linha, col.total),
            status: texto(linha, col.status),
            tomador: texto(linha, col.tomador),
            fatura: texto(linha, col.fatura),
        })
        .collect();
    Ok(registros)
}

pub fn load_pagamentos(path: &Path) -> Result<Vec<Pagamento>, SheetError> {
    let sheet = Sheet::from_path(path)?;
    parse_pagamentos(&sheet)
}
