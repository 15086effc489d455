use calamine::{Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use rodofin_core::{Money, StatusPagamento};
use rodofin_import::{parse_faturamento, parse_pagamentos, Sheet};
use rodofin_report::{
    exportar_pagamentos, relatorio_pagamentos, relatorio_repasse, resumo_pagamentos,
    FiltroPagamentos, FiltroRepasse, TabelaEmpresas,
};
use std::io::Cursor;

const FATURAMENTO_CSV: &[u8] = b"\
banner\n\
S\xc3\xa9rie,N\xc2\xba Doc,NFS,NFe,Dt. Emiss\xc3\xa3o,Remetente,Rem. Cidade,Destinat\xc3\xa1rio,Dest. Cidade,Recebedor,Rec. Cidade,Frete,Placa\n\
0,12345,,987,01/01/2024,ACME,SAO PAULO,DEST LTDA,CAMPINAS,,,\"1.000,00\",MXF7C50\n\
1,88,777,988,02/09/2024,ACME,SAO PAULO,DEST LTDA,CAMPINAS,RECEB SA,SOROCABA,\"500,00\",DZH1627\n\
0,55555,,989,05/01/2024,BETA,SANTOS,OUTRA LTDA,JUNDIAI,,,\"2.000,00\",ERY7461\n";

const PAGOS_CSV: &[u8] = b"\
banner\n\
Serie,CT-e/NFS,Dt. Repasse,Valor Pago,Total,Status,Tomador,Fatura\n\
0,12345,10/05/2024,\"950,00\",\"1.000,00\",OK,TRANSPORTES XYZ,F-01\n\
0,777,,,\"600,00\",,TRANSPORTES XYZ,\n\
2,55555,,,\"9.999,00\",,OUTRO TOMADOR,\n";

fn carregar() -> (Vec<rodofin_import::Faturamento>, Vec<rodofin_import::Pagamento>) {
    let faturamento = parse_faturamento(&Sheet::from_csv(FATURAMENTO_CSV).unwrap()).unwrap();
    let pagamentos = parse_pagamentos(&Sheet::from_csv(PAGOS_CSV).unwrap()).unwrap();
    (faturamento, pagamentos)
}

fn agora() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn settlement_pipeline_end_to_end() {
    let (faturamento, pagamentos) = carregar();
    let linhas = relatorio_pagamentos(
        &faturamento,
        &pagamentos,
        agora(),
        &FiltroPagamentos::default(),
    );
    assert_eq!(linhas.len(), 3);

    // Doc 12345 (serie 0) matched its payment and is settled.
    let pago = linhas.iter().find(|l| l.doc == "12345").unwrap();
    assert_eq!(pago.status_pagamento, StatusPagamento::Pago);
    assert_eq!(pago.saldo_a_receber, Some(Money::from_cents(5000)));
    assert_eq!(pago.vencimento, NaiveDate::from_ymd_opt(2024, 4, 1));

    // Serie "1" invoice was re-keyed to its NFS under serie "0" and found
    // the unpaid payment row; emission 2024-09-02 is due 2024-12-02
    // (2024-12-01 is a Sunday), still upcoming at the reference time.
    let a_vencer = linhas.iter().find(|l| l.doc == "777").unwrap();
    assert_eq!(a_vencer.status_pagamento, StatusPagamento::AVencer);
    assert_eq!(a_vencer.vencimento, NaiveDate::from_ymd_opt(2024, 12, 2));
    assert_eq!(a_vencer.saldo_a_receber, Some(Money::from_cents(60000)));
    assert_eq!(a_vencer.entrega.as_deref(), Some("RECEB SA"));
    assert_eq!(a_vencer.mun_entrega.as_deref(), Some("SOROCABA"));

    // Doc 55555 exists in the payments file only under serie 2, so the
    // composite key leaves the invoice unmatched and overdue.
    let pendente = linhas.iter().find(|l| l.doc == "55555").unwrap();
    assert_eq!(pendente.status_pagamento, StatusPagamento::Pendente);
    assert_eq!(pendente.total, None);
    assert_eq!(pendente.saldo_a_receber, None);

    let resumo = resumo_pagamentos(&linhas);
    assert_eq!(resumo.total_faturado, Money::from_cents(160000));
    assert_eq!(resumo.total_pago, Money::from_cents(95000));
}

#[test]
fn payout_pipeline_end_to_end() {
    let (faturamento, pagamentos) = carregar();
    let linhas = relatorio_repasse(
        &faturamento,
        &pagamentos,
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        &TabelaEmpresas::padrao(),
        &FiltroRepasse::default(),
    );
    assert_eq!(linhas.len(), 1);
    assert_eq!(linhas[0].cte_nfs, "12345");
    assert_eq!(linhas[0].empresa.as_deref(), Some("LINEMASE"));
    // 1000.00 * 0.6792
    assert_eq!(linhas[0].frete_liq.map(Money::to_cents), Some(67920));
}

#[test]
fn filters_shrink_monotonically() {
    let (faturamento, pagamentos) = carregar();
    let todos = relatorio_pagamentos(
        &faturamento,
        &pagamentos,
        agora(),
        &FiltroPagamentos::default(),
    );
    let filtrado = relatorio_pagamentos(
        &faturamento,
        &pagamentos,
        agora(),
        &FiltroPagamentos {
            tomadores: vec!["TRANSPORTES XYZ".to_string()],
            status: vec![StatusPagamento::Pago],
            ..Default::default()
        },
    );
    assert!(filtrado.len() <= todos.len());
    assert_eq!(filtrado.len(), 1);
    assert_eq!(filtrado[0].doc, "12345");
}

#[test]
fn export_round_trip_preserves_rows_and_values() {
    let (faturamento, pagamentos) = carregar();
    let linhas = relatorio_pagamentos(
        &faturamento,
        &pagamentos,
        agora(),
        &FiltroPagamentos::default(),
    );
    let bytes = exportar_pagamentos(&linhas).unwrap();

    let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();

    // Header + one row per report line.
    assert_eq!(range.rows().count(), linhas.len() + 1);
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("Status_Pagamento".to_string()))
    );

    let status_exportados: Vec<String> = (1..=linhas.len())
        .map(|r| match range.get_value((r as u32, 0)) {
            Some(Data::String(s)) => s.clone(),
            other => panic!("unexpected cell: {other:?}"),
        })
        .collect();
    let status_esperados: Vec<String> = linhas
        .iter()
        .map(|l| l.status_pagamento.to_string())
        .collect();
    assert_eq!(status_exportados, status_esperados);

    // Money survives as a number.
    let pago = linhas.iter().position(|l| l.doc == "12345").unwrap();
    assert_eq!(
        range.get_value(((pago + 1) as u32, 3)),
        Some(&Data::Float(1000.0))
    );
}
