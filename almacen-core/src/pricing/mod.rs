//! Line and order pricing
//!
//! - [`line`]: line subtotal with percentage discount
//! - [`totals`]: tax-inclusive order totals (IGV)

mod line;
mod totals;

pub use line::{compute_subtotal, compute_subtotal_decimal, validate_discount, validate_price, validate_quantity};
pub use totals::{IGV_RATE, OrderTotals};
