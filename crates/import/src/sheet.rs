use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Rows skipped before the header row. Both source workbooks carry one
/// leading banner row above the column names.
const HEADER_OFFSET: usize = 1;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),
    #[error("Workbook has no worksheets")]
    NoWorksheet,
    #[error("Missing header row")]
    NoHeaderRow,
    #[error("No data rows")]
    NoDataRows,
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// A loaded cell, already trimmed and typed. Coercion to the domain types
/// happens lazily through the `as_*` accessors so each column decides its
/// own typing (identifier columns stay strings).
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Vazio,
    Texto(String),
    Numero(f64),
    Data(NaiveDate),
}

impl Cell {
    pub fn from_campo(campo: &str) -> Self {
        let campo = campo.trim();
        if campo.is_empty() {
            Cell::Vazio
        } else {
            Cell::Texto(campo.to_string())
        }
    }

    pub fn is_vazio(&self) -> bool {
        matches!(self, Cell::Vazio)
    }

    /// String view of the cell. Numeric cells with no fractional part render
    /// without a decimal point, so document numbers that Excel stored as
    /// numbers come back as plain digit strings. Leading zeros are only
    /// preserved when the source column was already text.
    pub fn as_texto(&self) -> Option<String> {
        match self {
            Cell::Vazio => None,
            Cell::Texto(s) => Some(s.clone()),
            Cell::Numero(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            Cell::Data(d) => Some(d.format("%d/%m/%Y").to_string()),
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Cell::Vazio | Cell::Data(_) => None,
            Cell::Texto(s) => parse_valor(s),
            Cell::Numero(n) => Decimal::from_f64(*n).map(|d| d.round_dp(4)),
        }
    }

    /// Date view. Malformed date strings coerce to `None` rather than
    /// aborting the load; the null flows through the due-date policy.
    pub fn as_data(&self) -> Option<NaiveDate> {
        match self {
            Cell::Data(d) => Some(*d),
            Cell::Texto(s) => parse_data(s),
            Cell::Vazio | Cell::Numero(_) => None,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Vazio,
            Data::String(s) => Cell::from_campo(s),
            Data::Float(f) => Cell::Numero(*f),
            Data::Int(i) => Cell::Numero(*i as f64),
            Data::Bool(b) => Cell::Texto(b.to_string()),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(ndt) => Cell::Data(ndt.date()),
                None => Cell::Vazio,
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_campo(s),
        }
    }
}

/// Parses a monetary/numeric string, accepting the Brazilian `1.234,56`
/// convention, an `R$` prefix, and accounting parentheses for negatives.
fn parse_valor(s: &str) -> Option<Decimal> {
    let s = s.trim().trim_start_matches("R$").trim();
    let (negativo, s) = if s.starts_with('(') && s.ends_with(')') {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };
    let s = s.replace(' ', "");
    let normalizado = if s.contains(',') {
        // Comma is the decimal separator; dots are thousand separators.
        s.replace('.', "").replace(',', ".")
    } else {
        s
    };
    let mut dec = Decimal::from_str(&normalizado).ok()?;
    if negativo {
        dec = -dec;
    }
    Some(dec)
}

fn parse_data(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%d/%m/%Y", "%Y-%m-%d", "%d/%m/%y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// A tabular source after the header-offset convention has been applied:
/// one banner row skipped, then column names, then data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    colunas: Vec<String>,
    linhas: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Loads a sheet from disk, dispatching on the file extension:
    /// `.xlsx`/`.xlsm`/`.xls` go through calamine, `.csv` through the csv
    /// reader. A missing file surfaces as a blocking IO error.
    pub fn from_path(path: &Path) -> Result<Self, SheetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Self::from_workbook_path(path),
            "csv" => {
                let file = std::fs::File::open(path)?;
                Self::from_csv(file)
            }
            other => Err(SheetError::UnsupportedExtension(other.to_string())),
        }
    }

    pub fn from_workbook_path(path: &Path) -> Result<Self, SheetError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)??;
        let brutas: Vec<Vec<Cell>> = range
            .rows()
            .map(|linha| linha.iter().map(Cell::from).collect())
            .collect();
        Self::montar(brutas)
    }

    pub fn from_csv<R: Read>(data: R) -> Result<Self, SheetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);
        let mut brutas = Vec::new();
        for registro in reader.records() {
            let registro = registro?;
            brutas.push(registro.iter().map(Cell::from_campo).collect());
        }
        Self::montar(brutas)
    }

    fn montar(mut brutas: Vec<Vec<Cell>>) -> Result<Self, SheetError> {
        if brutas.len() <= HEADER_OFFSET {
            return Err(SheetError::NoHeaderRow);
        }
        let linhas = brutas.split_off(HEADER_OFFSET + 1);
        let cabecalho = brutas.pop().unwrap();
        if linhas.is_empty() {
            return Err(SheetError::NoDataRows);
        }
        let colunas = cabecalho
            .iter()
            .map(|c| c.as_texto().unwrap_or_default())
            .collect();
        Ok(Sheet { colunas, linhas })
    }

    pub fn colunas(&self) -> &[String] {
        &self.colunas
    }

    pub fn linhas(&self) -> &[Vec<Cell>] {
        &self.linhas
    }

    pub fn indice(&self, coluna: &str) -> Option<usize> {
        self.colunas.iter().position(|c| c == coluna)
    }

    pub fn indice_obrigatorio(&self, coluna: &str) -> Result<usize, SheetError> {
        self.indice(coluna)
            .ok_or_else(|| SheetError::MissingColumn(coluna.to_string()))
    }
}

static VAZIO: Cell = Cell::Vazio;

/// Fetches a cell by optional column index; columns missing from the header
/// read as empty so their nulls propagate through the fallback logic.
pub(crate) fn celula<'a>(linha: &'a [Cell], idx: Option<usize>) -> &'a Cell {
    idx.and_then(|i| linha.get(i)).unwrap_or(&VAZIO)
}
