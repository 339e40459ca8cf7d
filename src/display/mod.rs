//! Display formatting for terminal and document output

pub mod currency;
pub mod summary;
pub mod text;

pub use currency::{CurrencyFormat, DateTimeFormat, Formats};
pub use summary::{render_summary_table, BudgetSummary};
pub use text::{format_percentage, single_line, truncate};
