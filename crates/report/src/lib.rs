pub mod empresas;
pub mod export;
pub mod filter;
pub mod normalize;
pub mod pagamentos;
pub mod reconcile;
pub mod repasse;
pub mod resumo;

pub use empresas::TabelaEmpresas;
pub use export::{exportar_pagamentos, exportar_repasse, ExportCache, ExportError};
pub use filter::{FiltroPagamentos, FiltroRepasse};
pub use normalize::{normalizar, Emissao, Entrega};
pub use pagamentos::{relatorio_pagamentos, LinhaPagamento};
pub use repasse::{relatorio_repasse, LinhaRepasse};
pub use resumo::{
    contagem_por_status, frete_liquido_por_empresa, frete_liquido_por_placa, resumo_pagamentos,
    resumo_repasse, saldo_por_mes_vencimento, total_por_placa, ResumoPagamentos, ResumoRepasse,
};
