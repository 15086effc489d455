pub mod faturamento;
pub mod pagamento;
pub mod sheet;

pub use faturamento::{load_faturamento, parse_faturamento, Faturamento};
pub use pagamento::{load_pagamentos, parse_pagamentos, Pagamento};
pub use sheet::{Cell, Sheet, SheetError};
