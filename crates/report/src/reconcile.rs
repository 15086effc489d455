use rodofin_import::Pagamento;
use std::collections::HashMap;

use crate::normalize::Emissao;

/// Payout join: each payment row against the invoices sharing its document
/// key, document key alone. Left-outer from the payment side — a payment
/// with no invoice survives with a null invoice half. A key that repeats
/// across series fans out to one row per matching invoice, in invoice
/// input order.
///
/// Joining without the series is how the payout report has always worked;
/// the composite-key variant below exists for the settlement report. Blank
/// keys never match.
pub fn join_pagamento_doc<'a>(
    pagamentos: &'a [Pagamento],
    emissoes: &'a [Emissao],
) -> Vec<(&'a Pagamento, Option<&'a Emissao>)> {
    let mut indice: HashMap<&str, Vec<&Emissao>> = HashMap::new();
    for emissao in emissoes {
        if !emissao.doc.is_empty() {
            indice.entry(emissao.doc.as_str()).or_default().push(emissao);
        }
    }

    let mut linhas = Vec::new();
    for pagamento in pagamentos {
        match indice.get(pagamento.doc.as_str()) {
            Some(casados) => {
                for emissao in casados {
                    linhas.push((pagamento, Some(*emissao)));
                }
            }
            None => linhas.push((pagamento, None)),
        }
    }
    linhas
}

/// Settlement join: each invoice against the payments sharing its
/// (series, document) composite key. Left-outer from the invoice side —
/// unmatched invoices survive with a null payment half, unmatched payments
/// are dropped. Fan-out follows payment input order.
pub fn join_emissao_serie_doc<'a>(
    emissoes: &'a [Emissao],
    pagamentos: &'a [Pagamento],
) -> Vec<(&'a Emissao, Option<&'a Pagamento>)> {
    let mut indice: HashMap<(&str, &str), Vec<&Pagamento>> = HashMap::new();
    for pagamento in pagamentos {
        if !pagamento.doc.is_empty() {
            indice
                .entry((pagamento.serie.as_str(), pagamento.doc.as_str()))
                .or_default()
                .push(pagamento);
        }
    }

    let mut linhas = Vec::new();
    for emissao in emissoes {
        let chave = (emissao.serie.as_str(), emissao.doc.as_str());
        match indice.get(&chave) {
            Some(casados) => {
                for pagamento in casados {
                    linhas.push((emissao, Some(*pagamento)));
                }
            }
            None => linhas.push((emissao, None)),
        }
    }
    linhas
}
