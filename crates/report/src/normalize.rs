use rodofin_import::Faturamento;
use serde::Serialize;

/// Delivery destination of an invoice row: either the recorded receiver or,
/// when the receiver field is blank, the consignee. A tagged choice so the
/// two name/city pairs can never blend within one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Entrega {
    Recebedor {
        nome: String,
        cidade: Option<String>,
    },
    Destinatario {
        nome: Option<String>,
        cidade: Option<String>,
    },
}

impl Entrega {
    pub fn nome(&self) -> Option<&str> {
        match self {
            Entrega::Recebedor { nome, .. } => Some(nome),
            Entrega::Destinatario { nome, .. } => nome.as_deref(),
        }
    }

    pub fn cidade(&self) -> Option<&str> {
        match self {
            Entrega::Recebedor { cidade, .. } | Entrega::Destinatario { cidade, .. } => {
                cidade.as_deref()
            }
        }
    }
}

/// Invoice row with its canonical identifiers derived.
///
/// Series "1" documents are identified by their NFS number and re-filed
/// under series "0"; every other series keeps its own document number.
#[derive(Debug, Clone, PartialEq)]
pub struct Emissao {
    pub doc: String,
    pub serie: String,
    pub entrega: Entrega,
    pub origem: Faturamento,
}

pub fn normalizar(origem: Faturamento) -> Emissao {
    let (doc, serie) = if origem.serie == "1" {
        (origem.nfs.clone(), "0".to_string())
    } else {
        (origem.num_doc.clone(), origem.serie.clone())
    };
    // The loader already maps blank strings to None, so a single match
    // covers both the null and empty-string receiver cases.
    let entrega = match &origem.recebedor {
        Some(nome) => Entrega::Recebedor {
            nome: nome.clone(),
            cidade: origem.rec_cidade.clone(),
        },
        None => Entrega::Destinatario {
            nome: origem.destinatario.clone(),
            cidade: origem.dest_cidade.clone(),
        },
    };
    Emissao {
        doc,
        serie,
        entrega,
        origem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faturamento(serie: &str, recebedor: Option<&str>) -> Faturamento {
        Faturamento {
            serie: serie.to_string(),
            num_doc: "12345".to_string(),
            nfs: "777".to_string(),
            nfe: None,
            dt_emissao: None,
            remetente: None,
            rem_cidade: None,
            destinatario: Some("DEST LTDA".to_string()),
            dest_cidade: Some("CAMPINAS".to_string()),
            recebedor: recebedor.map(str::to_string),
            rec_cidade: recebedor.map(|_| "SOROCABA".to_string()),
            frete: None,
            pedagio: None,
            peso_bruto: None,
            observacao: None,
            placa: None,
        }
    }

    // ── canonical identifiers ─────────────────────────────────────────────────

    #[test]
    fn serie_1_takes_nfs_and_becomes_serie_0() {
        let e = normalizar(faturamento("1", None));
        assert_eq!(e.doc, "777");
        assert_eq!(e.serie, "0");
    }

    #[test]
    fn other_series_keep_doc_number_and_serie() {
        let e = normalizar(faturamento("0", None));
        assert_eq!(e.doc, "12345");
        assert_eq!(e.serie, "0");

        let e = normalizar(faturamento("3", None));
        assert_eq!(e.doc, "12345");
        assert_eq!(e.serie, "3");
    }

    // ── entrega fallback ──────────────────────────────────────────────────────

    #[test]
    fn receiver_present_takes_receiver_pair() {
        let e = normalizar(faturamento("0", Some("RECEB SA")));
        assert!(matches!(e.entrega, Entrega::Recebedor { .. }));
        assert_eq!(e.entrega.nome(), Some("RECEB SA"));
        assert_eq!(e.entrega.cidade(), Some("SOROCABA"));
    }

    #[test]
    fn receiver_absent_falls_back_to_consignee_pair() {
        let e = normalizar(faturamento("0", None));
        assert!(matches!(e.entrega, Entrega::Destinatario { .. }));
        assert_eq!(e.entrega.nome(), Some("DEST LTDA"));
        assert_eq!(e.entrega.cidade(), Some("CAMPINAS"));
    }

    #[test]
    fn sides_never_blend() {
        // Receiver chosen: the consignee city must not leak in even though
        // the receiver city is null.
        let mut f = faturamento("0", Some("RECEB SA"));
        f.rec_cidade = None;
        let e = normalizar(f);
        assert_eq!(e.entrega.nome(), Some("RECEB SA"));
        assert_eq!(e.entrega.cidade(), None);
    }
}
