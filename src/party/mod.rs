//! Customers and suppliers, the parties that ledger entries are recorded against.

mod db;
mod domain;
mod handlers;

pub use db::{
    count_parties, create_party, create_party_tables, get_all_parties, get_party, map_party_row,
};
pub use domain::{NewParty, Party, PartyId, PartyKind};
pub use handlers::{
    create_customer_endpoint, create_supplier_endpoint, get_customer_endpoint,
    get_supplier_endpoint, list_customers_endpoint, list_suppliers_endpoint,
};
