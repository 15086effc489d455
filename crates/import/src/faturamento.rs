use chrono::NaiveDate;
use rodofin_core::Money;
use rust_decimal::Decimal;
use std::path::Path;

use crate::sheet::{celula, Cell, Sheet, SheetError};

/// One row of the billing workbook ("Banco de Emissões"), as issued.
/// Identifier columns are kept as strings; everything the header lacks
/// reads as null.
#[derive(Debug, Clone, PartialEq)]
pub struct Faturamento {
    pub serie: String,
    pub num_doc: String,
    pub nfs: String,
    pub nfe: Option<String>,
    pub dt_emissao: Option<NaiveDate>,
    pub remetente: Option<String>,
    pub rem_cidade: Option<String>,
    pub destinatario: Option<String>,
    pub dest_cidade: Option<String>,
    pub recebedor: Option<String>,
    pub rec_cidade: Option<String>,
    pub frete: Option<Money>,
    pub pedagio: Option<Money>,
    pub peso_bruto: Option<Decimal>,
    pub observacao: Option<String>,
    pub placa: Option<String>,
}

struct Colunas {
    serie: usize,
    num_doc: usize,
    nfs: usize,
    dt_emissao: usize,
    nfe: Option<usize>,
    remetente: Option<usize>,
    rem_cidade: Option<usize>,
    destinatario: Option<usize>,
    dest_cidade: Option<usize>,
    recebedor: Option<usize>,
    rec_cidade: Option<usize>,
    frete: Option<usize>,
    pedagio: Option<usize>,
    peso_bruto: Option<usize>,
    observacao: Option<usize>,
    placa: Option<usize>,
}

impl Colunas {
    fn localizar(sheet: &Sheet) -> Result<Self, SheetError> {
        Ok(Colunas {
            serie: sheet.indice_obrigatorio("Série")?,
            num_doc: sheet.indice_obrigatorio("Nº Doc")?,
            nfs: sheet.indice_obrigatorio("NFS")?,
            dt_emissao: sheet.indice_obrigatorio("Dt. Emissão")?,
            nfe: sheet.indice("NFe"),
            remetente: sheet.indice("Remetente"),
            rem_cidade: sheet.indice("Rem. Cidade"),
            destinatario: sheet.indice("Destinatário"),
            dest_cidade: sheet.indice("Dest. Cidade"),
            recebedor: sheet.indice("Recebedor"),
            rec_cidade: sheet.indice("Rec. Cidade"),
            frete: sheet.indice("Frete"),
            pedagio: sheet.indice("Pedágio"),
            peso_bruto: sheet.indice("Peso Bruto"),
            observacao: sheet.indice("Observação"),
            placa: sheet.indice("Placa"),
        })
    }
}

fn texto(linha: &[Cell], idx: Option<usize>) -> Option<String> {
    celula(linha, idx).as_texto()
}

fn valor(linha: &[Cell], idx: Option<usize>) -> Option<Money> {
    celula(linha, idx).as_decimal().map(Money::from_decimal)
}

pub fn parse_faturamento(sheet: &Sheet) -> Result<Vec<Faturamento>, SheetError> {
    let col = Colunas::localizar(sheet)?;
    let registros = sheet
        .linhas()
        .iter()
        .map(|linha| Faturamento {
            serie: texto(linha, Some(col.serie)).unwrap_or_default(),
            num_doc: texto(linha, Some(col.num_doc)).unwrap_or_default(),
            nfs: texto(linha, Some(col.nfs)).unwrap_or_default(),
            nfe: texto(linha, col.nfe),
            dt_emissao: celula(linha, Some(col.dt_emissao)).as_data(),
            remetente: texto(linha, col.remetente),
            rem_cidade: texto(linha, col.rem_cidade),
            destinatario: texto(linha, col.destinatario),
            dest_cidade: texto(linha, col.dest_cidade),
            recebedor: texto(linha, col.recebedor),
            rec_cidade: texto(linha, col.rec_cidade),
            frete: valor(linha, col.frete),
            pedagio: valor(linha, col.pedagio),
            peso_bruto: celula(linha, col.peso_bruto).as_decimal(),
            observacao: texto(linha, col.observacao),
            placa: texto(linha, col.placa),
        })
        .collect();
    Ok(registros)
}

pub fn load_faturamento(path: &Path) -> Result<Vec<Faturamento>, SheetError> {
    let sheet = Sheet::from_path(path)?;
    parse_faturamento(&sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &[u8] = b"\
banner\n\
S\xc3\xa9rie,N\xc2\xba Doc,NFS,NFe,Dt. Emiss\xc3\xa3o,Remetente,Destinat\xc3\xa1rio,Dest. Cidade,Recebedor,Rec. Cidade,Frete,Placa\n\
0,12345,,987,01/01/2024,ACME,DEST LTDA,CAMPINAS,,,\"1.000,00\",MXF7C50\n\
1,55,777,,data ruim,ACME,DEST LTDA,CAMPINAS,RECEB SA,SOROCABA,500,DZH1627\n";

    fn registros() -> Vec<Faturamento> {
        let sheet = Sheet::from_csv(CSV).unwrap();
        parse_faturamento(&sheet).unwrap()
    }

    #[test]
    fn identifiers_stay_strings() {
        let regs = registros();
        assert_eq!(regs[0].serie, "0");
        assert_eq!(regs[0].num_doc, "12345");
        assert_eq!(regs[1].nfs, "777");
    }

    #[test]
    fn malformed_emission_date_propagates_as_null() {
        let regs = registros();
        assert_eq!(
            regs[0].dt_emissao,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(regs[1].dt_emissao, None);
    }

    #[test]
    fn missing_optional_column_reads_null() {
        let regs = registros();
        // CSV above carries no "Rem. Cidade" or "Pedágio" columns.
        assert_eq!(regs[0].rem_cidade, None);
        assert_eq!(regs[0].pedagio, None);
    }

    #[test]
    fn frete_parses_brazilian_amount() {
        let regs = registros();
        assert_eq!(regs[0].frete, Some(Money::from_cents(100000)));
        assert_eq!(regs[1].frete, Some(Money::from_cents(50000)));
    }

    #[test]
    fn missing_required_column_blocks() {
        let data = b"banner\nN\xc2\xba Doc,NFS,Dt. Emiss\xc3\xa3o\n1,2,01/01/2024\n";
        let sheet = Sheet::from_csv(data.as_ref()).unwrap();
        assert!(matches!(
            parse_faturamento(&sheet),
            Err(SheetError::MissingColumn(c)) if c == "Série"
        ));
    }
}
