pub mod calendar;
pub mod money;
pub mod status;

pub use calendar::{data_vencimento, proximo_dia_util, DateRange};
pub use money::Money;
pub use status::StatusPagamento;
