use chrono::NaiveDate;
use rodofin_core::Money;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;

use crate::pagamentos::LinhaPagamento;
use crate::repasse::LinhaRepasse;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Workbook error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

pub const COLUNAS_REPASSE: [&str; 9] = [
    "NFe",
    "CT-e/NFS",
    "Dt. Emissão",
    "Frete Liq",
    "Remetente",
    "Entrega",
    "Mun_Entrega",
    "Placa",
    "Empresa",
];

pub const COLUNAS_PAGAMENTO: [&str; 21] = [
    "Status_Pagamento",
    "Vencimento",
    "Valor Pago",
    "Total",
    "Saldo a receber",
    "Doc",
    "Dt. Emissão",
    "NFe",
    "Remetente",
    "Rem. Cidade",
    "Entrega",
    "Mun_Entrega",
    "Frete",
    "Pedágio",
    "Peso Bruto",
    "Observação",
    "Placa",
    "Status",
    "Tomador",
    "Fatura",
    "Dt. Repasse",
];

fn formato_moeda() -> Format {
    Format::new().set_num_format("#,##0.00")
}

fn cabecalho(ws: &mut Worksheet, colunas: &[&str]) -> Result<(), XlsxError> {
    for (c, nome) in colunas.iter().enumerate() {
        ws.write_string(0, c as u16, *nome)?;
    }
    Ok(())
}

fn texto(ws: &mut Worksheet, r: u32, c: u16, valor: Option<&str>) -> Result<(), XlsxError> {
    if let Some(v) = valor {
        ws.write_string(r, c, v)?;
    }
    Ok(())
}

fn moeda(
    ws: &mut Worksheet,
    r: u32,
    c: u16,
    valor: Option<Money>,
    formato: &Format,
) -> Result<(), XlsxError> {
    if let Some(v) = valor {
        ws.write_number_with_format(r, c, v.to_f64(), formato)?;
    }
    Ok(())
}

fn data(ws: &mut Worksheet, r: u32, c: u16, valor: Option<NaiveDate>) -> Result<(), XlsxError> {
    if let Some(v) = valor {
        ws.write_string(r, c, v.format("%d/%m/%Y").to_string())?;
    }
    Ok(())
}

/// Serializes the payout report to a one-sheet workbook named "Repasse",
/// columns in display order, no index column.
pub fn exportar_repasse(linhas: &[LinhaRepasse]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Repasse")?;
    cabecalho(ws, &COLUNAS_REPASSE)?;
    let fmt = formato_moeda();

    for (i, linha) in linhas.iter().enumerate() {
        let r = (i + 1) as u32;
        texto(ws, r, 0, linha.nfe.as_deref())?;
        texto(ws, r, 1, Some(&linha.cte_nfs))?;
        data(ws, r, 2, linha.dt_emissao)?;
        moeda(ws, r, 3, linha.frete_liq, &fmt)?;
        texto(ws, r, 4, linha.remetente.as_deref())?;
        texto(ws, r, 5, linha.entrega.as_deref())?;
        texto(ws, r, 6, linha.mun_entrega.as_deref())?;
        texto(ws, r, 7, linha.placa.as_deref())?;
        texto(ws, r, 8, linha.empresa.as_deref())?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Serializes the settlement report to a one-sheet workbook named
/// "Pagamento".
pub fn exportar_pagamentos(linhas: &[LinhaPagamento]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Pagamento")?;
    cabecalho(ws, &COLUNAS_PAGAMENTO)?;
    let fmt = formato_moeda();

    for (i, linha) in linhas.iter().enumerate() {
        let r = (i + 1) as u32;
        texto(ws, r, 0, Some(&linha.status_pagamento.to_string()))?;
        data(ws, r, 1, linha.vencimento)?;
        moeda(ws, r, 2, linha.valor_pago, &fmt)?;
        moeda(ws, r, 3, linha.total, &fmt)?;
        moeda(ws, r, 4, linha.saldo_a_receber, &fmt)?;
        texto(ws, r, 5, Some(&linha.doc))?;
        data(ws, r, 6, linha.dt_emissao)?;
        texto(ws, r, 7, linha.nfe.as_deref())?;
        texto(ws, r, 8, linha.remetente.as_deref())?;
        texto(ws, r, 9, linha.rem_cidade.as_deref())?;
        texto(ws, r, 10, linha.entrega.as_deref())?;
        texto(ws, r, 11, linha.mun_entrega.as_deref())?;
        moeda(ws, r, 12, linha.frete, &fmt)?;
        moeda(ws, r, 13, linha.pedagio, &fmt)?;
        if let Some(peso) = linha.peso_bruto {
            ws.write_number(r, 14, peso.to_f64().unwrap_or(0.0))?;
        }
        texto(ws, r, 15, linha.observacao.as_deref())?;
        texto(ws, r, 16, linha.placa.as_deref())?;
        texto(ws, r, 17, linha.status_repasse.as_deref())?;
        texto(ws, r, 18, linha.tomador.as_deref())?;
        texto(ws, r, 19, linha.fatura.as_deref())?;
        data(ws, r, 20, linha.dt_repasse)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn fingerprint<T: Serialize>(linhas: &[T]) -> Result<[u8; 32], serde_json::Error> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(linhas)?);
    Ok(hasher.finalize().into())
}

/// Memoizes export serialization by content: identical derived tables hash
/// to the same key and reuse the bytes already produced in this session.
#[derive(Default)]
pub struct ExportCache {
    entradas: HashMap<[u8; 32], Vec<u8>>,
}

impl ExportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repasse(&mut self, linhas: &[LinhaRepasse]) -> Result<Vec<u8>, ExportError> {
        self.obter(linhas, exportar_repasse)
    }

    pub fn pagamentos(&mut self, linhas: &[LinhaPagamento]) -> Result<Vec<u8>, ExportError> {
        self.obter(linhas, exportar_pagamentos)
    }

    pub fn len(&self) -> usize {
        self.entradas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entradas.is_empty()
    }

    fn obter<T: Serialize>(
        &mut self,
        linhas: &[T],
        gerar: impl Fn(&[T]) -> Result<Vec<u8>, ExportError>,
    ) -> Result<Vec<u8>, ExportError> {
        let chave = fingerprint(linhas)?;
        if let Some(bytes) = self.entradas.get(&chave) {
            return Ok(bytes.clone());
        }
        let bytes = gerar(linhas)?;
        self.entradas.insert(chave, bytes.clone());
        Ok(bytes)
    }
}
