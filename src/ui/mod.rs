pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{empty, error, header, inserted, success, summary_row, warn};
pub use table::{phrase_table, stats_table};
pub use theme::{theme, Theme};
