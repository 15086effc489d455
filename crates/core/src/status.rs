use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

/// Settlement state of an invoice. No partial-payment state exists: any
/// recorded payment counts as settled regardless of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusPagamento {
    Pendente,
    #[serde(rename = "À vencer")]
    AVencer,
    Pago,
}

impl fmt::Display for StatusPagamento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPagamento::Pendente => write!(f, "Pendente"),
            StatusPagamento::AVencer => write!(f, "À vencer"),
            StatusPagamento::Pago => write!(f, "Pago"),
        }
    }
}

impl StatusPagamento {
    pub fn em_aberto(self) -> bool {
        matches!(self, StatusPagamento::Pendente | StatusPagamento::AVencer)
    }

    /// Classifies a row from its recorded payment and due date.
    ///
    /// `agora` is injected by the caller so classification stays pure. The
    /// comparison is against midnight of the due date, exclusive: a document
    /// is overdue from any moment within the due day onward. An unpaid row
    /// without a due date (null emission date upstream) classifies as
    /// `AVencer`, since it cannot be overdue without one.
    pub fn classificar(
        valor_pago: Option<Money>,
        vencimento: Option<NaiveDate>,
        agora: NaiveDateTime,
    ) -> Self {
        if valor_pago.is_some() {
            return StatusPagamento::Pago;
        }
        match vencimento {
            Some(v) if agora > v.and_time(NaiveTime::MIN) => StatusPagamento::Pendente,
            _ => StatusPagamento::AVencer,
        }
    }
}
