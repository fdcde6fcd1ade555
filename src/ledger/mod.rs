//! Bills and purchases, and the balances derived from them.

mod balances;
mod db;
mod domain;
mod handlers;

pub use balances::{PartyBalance, get_party_balances};
pub use db::{
    create_ledger_entry, create_ledger_tables, get_all_ledger_entries,
    get_ledger_entries_for_party,
};
pub use domain::{LedgerEntry, LedgerKind, NewBill, NewLedgerEntry, NewPurchase, PartyRef};
pub use handlers::{
    create_bill_endpoint, create_purchase_endpoint, get_bills_by_customer_endpoint,
    get_customer_balances_endpoint, get_purchases_by_supplier_endpoint,
    get_supplier_balances_endpoint, list_bills_endpoint, list_purchases_endpoint,
};
