use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;

use rodofin_import::{load_faturamento, load_pagamentos};
use rodofin_report::{
    contagem_por_status, frete_liquido_por_empresa, frete_liquido_por_placa, relatorio_pagamentos,
    relatorio_repasse, resumo_pagamentos, resumo_repasse, saldo_por_mes_vencimento,
    total_por_placa, ExportCache, FiltroPagamentos, FiltroRepasse, TabelaEmpresas,
};

mod config;

use config::Config;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let caminho_config = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rodofin.toml".to_string());
    let config = Config::load(Path::new(&caminho_config))?;

    if let Some(logo) = &config.logo {
        if !logo.exists() {
            tracing::warn!("Logo da empresa não encontrado: {}", logo.display());
        }
    }

    let empresas = match &config.empresas {
        Some(caminho) => {
            let conteudo = std::fs::read_to_string(caminho)
                .with_context(|| format!("Falha ao ler tabela de empresas: {}", caminho.display()))?;
            TabelaEmpresas::from_toml(&conteudo)
                .with_context(|| format!("Tabela de empresas inválida: {}", caminho.display()))?
        }
        None => TabelaEmpresas::padrao(),
    };

    let faturamento = load_faturamento(&config.faturamento).with_context(|| {
        format!(
            "Falha ao carregar faturamento: {}",
            config.faturamento.display()
        )
    })?;
    let pagamentos = load_pagamentos(&config.pagamentos).with_context(|| {
        format!(
            "Falha ao carregar pagamentos: {}",
            config.pagamentos.display()
        )
    })?;
    tracing::info!(
        faturamento = faturamento.len(),
        pagamentos = pagamentos.len(),
        "Planilhas carregadas"
    );

    std::fs::create_dir_all(&config.saida)
        .with_context(|| format!("Falha ao criar diretório de saída: {}", config.saida.display()))?;
    let mut cache = ExportCache::new();

    // ── Análise de pagamentos ─────────────────────────────────────────────────
    let agora = Local::now().naive_local();
    let linhas = relatorio_pagamentos(
        &faturamento,
        &pagamentos,
        agora,
        &FiltroPagamentos::default(),
    );
    let resumo = resumo_pagamentos(&linhas);
    tracing::info!(
        linhas = linhas.len(),
        total_faturado = %resumo.total_faturado,
        total_pago = %resumo.total_pago,
        total_a_receber = %resumo.total_a_receber,
        percentual_pago = %resumo.percentual_pago,
        "Análise de pagamentos"
    );
    for (status, quantidade) in contagem_por_status(&linhas) {
        tracing::info!(status = %status, quantidade, "Contagem por status");
    }
    for (placa, total) in total_por_placa(&linhas) {
        tracing::info!(placa, total = %total, "Total faturado por placa");
    }
    for (mes, saldo) in saldo_por_mes_vencimento(&linhas) {
        tracing::info!(mes, saldo = %saldo, "Saldo em aberto por mês de vencimento");
    }
    let destino = config.saida.join("relatorio_faturamento.xlsx");
    std::fs::write(&destino, cache.pagamentos(&linhas)?)
        .with_context(|| format!("Falha ao gravar {}", destino.display()))?;
    tracing::info!("Relatório de pagamentos gravado em {}", destino.display());

    // ── Relatório de repasses ─────────────────────────────────────────────────
    if let Some(data_repasse) = config.data_repasse {
        let linhas = relatorio_repasse(
            &faturamento,
            &pagamentos,
            data_repasse,
            &empresas,
            &FiltroRepasse::default(),
        );
        let resumo = resumo_repasse(&linhas);
        tracing::info!(
            registros = resumo.registros,
            total_frete_liquido = %resumo.total_frete_liquido,
            "Relatório de repasses para {data_repasse}"
        );
        for (empresa, frete) in frete_liquido_por_empresa(&linhas) {
            tracing::info!(empresa, frete_liquido = %frete, "Frete líquido por empresa");
        }
        for (placa, frete) in frete_liquido_por_placa(&linhas) {
            tracing::info!(placa, frete_liquido = %frete, "Frete líquido por placa");
        }
        let destino = config
            .saida
            .join(format!("relatorio_repasse_{data_repasse}.xlsx"));
        std::fs::write(&destino, cache.repasse(&linhas)?)
            .with_context(|| format!("Falha ao gravar {}", destino.display()))?;
        tracing::info!("Relatório de repasses gravado em {}", destino.display());
    }

    Ok(())
}
