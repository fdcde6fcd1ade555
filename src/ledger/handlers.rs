//! Route handlers for bills and purchases.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    ledger::{
        LedgerEntry, LedgerKind, NewBill, NewLedgerEntry, NewPurchase, PartyBalance,
        create_ledger_entry, get_all_ledger_entries, get_ledger_entries_for_party,
        get_party_balances,
    },
    party::PartyId,
};

/// The state needed to record and list ledger entries.
#[derive(Debug, Clone)]
pub struct LedgerState {
    /// The database connection for managing bills and purchases.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for the balance routes.
#[derive(Debug, Default, Deserialize)]
pub struct BalanceQuery {
    /// Only include parties whose shop name starts with this letter.
    pub initial: Option<char>,
}

/// A route handler for recording a sale to a customer.
pub async fn create_bill_endpoint(
    State(state): State<LedgerState>,
    payload: Result<Json<NewBill>, JsonRejection>,
) -> Result<(StatusCode, Json<LedgerEntry>), Error> {
    let Json(bill) = payload?;

    create_entry(bill.into(), state)
}

/// A route handler for recording stock bought from a supplier.
pub async fn create_purchase_endpoint(
    State(state): State<LedgerState>,
    payload: Result<Json<NewPurchase>, JsonRejection>,
) -> Result<(StatusCode, Json<LedgerEntry>), Error> {
    let Json(purchase) = payload?;

    create_entry(purchase.into(), state)
}

/// A route handler that lists every bill with its customer, most recently recorded first.
pub async fn list_bills_endpoint(
    State(state): State<LedgerState>,
) -> Result<Json<Vec<LedgerEntry>>, Error> {
    let connection = lock_connection(&state)?;

    get_all_ledger_entries(LedgerKind::Bill, &connection).map(Json)
}

/// A route handler that lists every purchase with its supplier, most recently recorded first.
pub async fn list_purchases_endpoint(
    State(state): State<LedgerState>,
) -> Result<Json<Vec<LedgerEntry>>, Error> {
    let connection = lock_connection(&state)?;

    get_all_ledger_entries(LedgerKind::Purchase, &connection).map(Json)
}

/// A route handler for the bills of one customer, latest business date first.
pub async fn get_bills_by_customer_endpoint(
    State(state): State<LedgerState>,
    path: Result<Path<PartyId>, PathRejection>,
) -> Result<Json<Vec<LedgerEntry>>, Error> {
    let Path(customer_id) = path?;
    let connection = lock_connection(&state)?;

    get_ledger_entries_for_party(LedgerKind::Bill, customer_id, &connection).map(Json)
}

/// A route handler for the purchases from one supplier, latest business date first.
pub async fn get_purchases_by_supplier_endpoint(
    State(state): State<LedgerState>,
    path: Result<Path<PartyId>, PathRejection>,
) -> Result<Json<Vec<LedgerEntry>>, Error> {
    let Path(supplier_id) = path?;
    let connection = lock_connection(&state)?;

    get_ledger_entries_for_party(LedgerKind::Purchase, supplier_id, &connection).map(Json)
}

/// A route handler for how much each customer owes.
pub async fn get_customer_balances_endpoint(
    State(state): State<LedgerState>,
    query: Result<Query<BalanceQuery>, QueryRejection>,
) -> Result<Json<Vec<PartyBalance>>, Error> {
    let Query(query) = query?;
    let connection = lock_connection(&state)?;

    get_party_balances(LedgerKind::Bill, query.initial, &connection).map(Json)
}

/// A route handler for how much is owed to each supplier.
pub async fn get_supplier_balances_endpoint(
    State(state): State<LedgerState>,
    query: Result<Query<BalanceQuery>, QueryRejection>,
) -> Result<Json<Vec<PartyBalance>>, Error> {
    let Query(query) = query?;
    let connection = lock_connection(&state)?;

    get_party_balances(LedgerKind::Purchase, query.initial, &connection).map(Json)
}

fn create_entry(
    new_entry: NewLedgerEntry,
    state: LedgerState,
) -> Result<(StatusCode, Json<LedgerEntry>), Error> {
    let new_entry = new_entry
        .validate()
        .inspect_err(|error| tracing::debug!("rejected new ledger entry: {error}"))?;
    let connection = lock_connection(&state)?;

    let entry = create_ledger_entry(new_entry, &connection).inspect_err(|error| match error {
        Error::UnknownParty => tracing::warn!("could not create ledger entry: {error}"),
        _ => tracing::error!("could not create ledger entry: {error}"),
    })?;
    tracing::debug!("created {:?} {} for party {}", entry.kind, entry.id, entry.party.id());

    Ok((StatusCode::CREATED, Json(entry)))
}

fn lock_connection(state: &LedgerState) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
    state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}
