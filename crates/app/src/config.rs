use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Session configuration. The report pipelines themselves take their
/// inputs as parameters; everything filesystem-related lives here.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Billing workbook ("Banco de Emissões").
    pub faturamento: PathBuf,
    /// Payments workbook ("Documentos Pagos").
    pub pagamentos: PathBuf,
    /// Output directory for the generated reports.
    #[serde(default = "saida_padrao")]
    pub saida: PathBuf,
    /// Sidebar logo; purely cosmetic, its absence only warns.
    pub logo: Option<PathBuf>,
    /// Transfer date for the payout report (quoted `"YYYY-MM-DD"`).
    /// When absent only the settlement report runs.
    pub data_repasse: Option<NaiveDate>,
    /// Optional TOML override for the plate → company table.
    pub empresas: Option<PathBuf>,
}

fn saida_padrao() -> PathBuf {
    PathBuf::from("relatorios")
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let conteudo = std::fs::read_to_string(path)
            .with_context(|| format!("Falha ao ler configuração: {}", path.display()))?;
        let config = toml::from_str(&conteudo)
            .with_context(|| format!("Configuração inválida: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses() {
        let config: Config = toml::from_str(
            "faturamento = \"emissoes.xlsm\"\npagamentos = \"pagos.xlsm\"\n",
        )
        .unwrap();
        assert_eq!(config.saida, PathBuf::from("relatorios"));
        assert_eq!(config.data_repasse, None);
        assert_eq!(config.logo, None);
    }

    #[test]
    fn transfer_date_parses_from_quoted_string() {
        let config: Config = toml::from_str(
            "faturamento = \"a.csv\"\npagamentos = \"b.csv\"\ndata_repasse = \"2024-05-10\"\n",
        )
        .unwrap();
        assert_eq!(config.data_repasse, NaiveDate::from_ymd_opt(2024, 5, 10));
    }

    #[test]
    fn missing_input_path_is_an_error() {
        assert!(toml::from_str::<Config>("pagamentos = \"b.csv\"\n").is_err());
    }
}
