//! Year filters over tabular data.
//!
//! The tabular-data capability is the `tabular` cargo feature, enabled by
//! default. It provides the [`Table`] type, its year filters, and CSV
//! parsing. The CSV stream filters ([`mask_csv_by_year`],
//! [`mask_csv_by_source`]) are always compiled so callers holding raw CSV
//! bytes can ask for filtering in any build; without the capability they
//! fail with `Unavailable`.

#[cfg(feature = "tabular")]
mod csv_io;
#[cfg(feature = "tabular")]
mod filter;
#[cfg(feature = "tabular")]
mod model;
mod stream;

#[cfg(feature = "tabular")]
pub use filter::{mask_table_by_source, mask_table_by_year};
#[cfg(feature = "tabular")]
pub use model::{Cell, Table};
pub use stream::{mask_csv_by_source, mask_csv_by_year};

/// Returns true when this build includes the tabular-data capability.
pub fn tabular_available() -> bool {
    cfg!(feature = "tabular")
}
