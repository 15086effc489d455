use std::collections::BTreeMap;

/// Immutable plate → company reference table. Loaded once at startup and
/// injected into the repasse pipeline; never derived from the input files.
#[derive(Debug, Clone, Default)]
pub struct TabelaEmpresas(BTreeMap<String, String>);

/// The carrier fleet as registered with the billing office.
const FROTA: [(&str, &str); 18] = [
    ("MXF7C50", "LINEMASE"),
    ("DPF6642", "LINEMASE"),
    ("FBP5269", "LINEMASE"),
    ("FBP5C69", "LINEMASE"),
    ("EZU5717", "LINEMASE"),
    ("DZH1627", "ANDERSON HENRIQUE"),
    ("DLP0249", "LUIZ CARLOS"),
    ("DPE2217", "MARCO ANTONIO"),
    ("DQN4261", "A M SANTOS"),
    ("DTC5939", "A M SANTOS"),
    ("ATN7300", "A M SANTOS"),
    ("BUD4I62", "A M SANTOS"),
    ("DQN4C61", "A M SANTOS"),
    ("IRS3513", "EDUARDO LEITE"),
    ("DQV2091", "BRUTUS"),
    ("EJY3619", "BRUTUS"),
    ("DQV2A91", "BRUTUS"),
    ("ERY7461", "DIEGO PACHECO"),
];

impl TabelaEmpresas {
    pub fn padrao() -> Self {
        Self::from_pares(
            FROTA
                .iter()
                .map(|(placa, empresa)| (placa.to_string(), empresa.to_string())),
        )
    }

    pub fn from_pares(pares: impl IntoIterator<Item = (String, String)>) -> Self {
        TabelaEmpresas(pares.into_iter().collect())
    }

    /// Parses a flat TOML table of `PLACA = "EMPRESA"` entries, the override
    /// format the session config points at.
    pub fn from_toml(conteudo: &str) -> Result<Self, toml::de::Error> {
        let mapa: BTreeMap<String, String> = toml::from_str(conteudo)?;
        Ok(TabelaEmpresas(mapa))
    }

    /// Exact-match lookup; an unknown plate is simply absent, never an error.
    pub fn empresa(&self, placa: &str) -> Option<&str> {
        self.0.get(placa).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
