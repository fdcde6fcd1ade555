//! Route handlers for creating and fetching customers and suppliers.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderName, StatusCode, header::LOCATION},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    party::{NewParty, Party, PartyId, PartyKind, create_party, get_all_parties, get_party},
};

/// The state needed to create or fetch parties.
#[derive(Debug, Clone)]
pub struct PartyState {
    /// The database connection for managing customers and suppliers.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PartyState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The response to a successful create: 201 Created, the location of the new party and the party itself.
type CreatedParty = (StatusCode, [(HeaderName, String); 1], Json<Party>);

/// A route handler for creating a new customer.
pub async fn create_customer_endpoint(
    State(state): State<PartyState>,
    payload: Result<Json<NewParty>, JsonRejection>,
) -> Result<CreatedParty, Error> {
    create_party_endpoint(PartyKind::Customer, state, payload)
}

/// A route handler for creating a new supplier.
pub async fn create_supplier_endpoint(
    State(state): State<PartyState>,
    payload: Result<Json<NewParty>, JsonRejection>,
) -> Result<CreatedParty, Error> {
    create_party_endpoint(PartyKind::Supplier, state, payload)
}

/// A route handler that lists every customer.
pub async fn list_customers_endpoint(
    State(state): State<PartyState>,
) -> Result<Json<Vec<Party>>, Error> {
    list_parties_endpoint(PartyKind::Customer, state)
}

/// A route handler that lists every supplier.
pub async fn list_suppliers_endpoint(
    State(state): State<PartyState>,
) -> Result<Json<Vec<Party>>, Error> {
    list_parties_endpoint(PartyKind::Supplier, state)
}

/// A route handler for fetching one customer, responds with 404 if the ID is unknown.
pub async fn get_customer_endpoint(
    State(state): State<PartyState>,
    path: Result<Path<PartyId>, PathRejection>,
) -> Result<Json<Party>, Error> {
    let Path(customer_id) = path?;
    get_party_endpoint(PartyKind::Customer, customer_id, state)
}

/// A route handler for fetching one supplier, responds with 404 if the ID is unknown.
pub async fn get_supplier_endpoint(
    State(state): State<PartyState>,
    path: Result<Path<PartyId>, PathRejection>,
) -> Result<Json<Party>, Error> {
    let Path(supplier_id) = path?;
    get_party_endpoint(PartyKind::Supplier, supplier_id, state)
}

fn create_party_endpoint(
    kind: PartyKind,
    state: PartyState,
    payload: Result<Json<NewParty>, JsonRejection>,
) -> Result<CreatedParty, Error> {
    let Json(new_party) = payload?;
    let new_party = new_party
        .validate()
        .inspect_err(|error| tracing::debug!("rejected new {kind:?}: {error}"))?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let party = create_party(kind, new_party, &connection)
        .inspect_err(|error| tracing::error!("could not create {kind:?}: {error}"))?;
    tracing::debug!("created {kind:?} {}", party.id);

    let path = match kind {
        PartyKind::Customer => endpoints::CUSTOMER,
        PartyKind::Supplier => endpoints::SUPPLIER,
    };
    let location = format_endpoint(path, party.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(party)))
}

fn list_parties_endpoint(kind: PartyKind, state: PartyState) -> Result<Json<Vec<Party>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_all_parties(kind, &connection).map(Json)
}

fn get_party_endpoint(
    kind: PartyKind,
    id: PartyId,
    state: PartyState,
) -> Result<Json<Party>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_party(kind, id, &connection).map(Json)
}
