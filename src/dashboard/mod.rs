//! Dashboard module
//!
//! Read-only rollups over the bill and purchase ledgers: monthly totals, an
//! all-time and current month summary, and the top customers and suppliers.

mod handlers;
mod monthly;
mod summary;
mod top_parties;
mod totals;

pub use handlers::{
    get_monthly_purchases_endpoint, get_monthly_sales_endpoint, get_summary_endpoint,
    get_top_customers_endpoint, get_top_suppliers_endpoint,
};
