//! Route handlers for the dashboard rollups.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::{
        monthly::{MonthlyTotals, get_monthly_totals},
        summary::{DashboardSummary, get_summary},
        top_parties::{TOP_PARTY_LIMIT, TopParty, get_top_parties},
    },
    ledger::LedgerKind,
    timezone::get_local_date,
};

/// The state needed for the dashboard rollups.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading bills, purchases and parties.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for bill totals per calendar month.
pub async fn get_monthly_sales_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<MonthlyTotals>>, Error> {
    let connection = lock_connection(&state)?;
    get_monthly_totals(LedgerKind::Bill, &connection).map(Json)
}

/// A route handler for purchase totals per calendar month.
pub async fn get_monthly_purchases_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<MonthlyTotals>>, Error> {
    let connection = lock_connection(&state)?;
    get_monthly_totals(LedgerKind::Purchase, &connection).map(Json)
}

/// A route handler for the all-time and current month summary.
///
/// "This month" is the calendar month of today's date in the server's configured timezone.
pub async fn get_summary_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<DashboardSummary>, Error> {
    let today = get_local_date(&state.local_timezone)?;
    let connection = lock_connection(&state)?;

    get_summary(today, &connection)
        .inspect_err(|error| tracing::error!("could not build dashboard summary: {error}"))
        .map(Json)
}

/// A route handler for the customers with the largest total sales.
pub async fn get_top_customers_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<TopParty>>, Error> {
    let connection = lock_connection(&state)?;
    get_top_parties(LedgerKind::Bill, TOP_PARTY_LIMIT, &connection).map(Json)
}

/// A route handler for the suppliers with the largest total purchases.
pub async fn get_top_suppliers_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<TopParty>>, Error> {
    let connection = lock_connection(&state)?;
    get_top_parties(LedgerKind::Purchase, TOP_PARTY_LIMIT, &connection).map(Json)
}

fn lock_connection(state: &DashboardState) -> Result<MutexGuard<'_, Connection>, Error> {
    state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        ledger::{LedgerKind, NewLedgerEntry, create_ledger_entry},
        party::{NewParty, create_party},
    };

    use super::{
        DashboardState, get_monthly_sales_endpoint, get_summary_endpoint,
        get_top_suppliers_endpoint,
    };

    fn get_test_state(local_timezone: &str) -> DashboardState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        DashboardState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: local_timezone.to_owned(),
        }
    }

    fn insert_entry(state: &DashboardState, kind: LedgerKind, purchased: f64, settled: f64) {
        let connection = state.db_connection.lock().unwrap();
        let party = create_party(
            kind.party_kind(),
            NewParty {
                shop_name: "Acme".to_owned(),
                area: "Market Road".to_owned(),
                contact_number: "9876543210".to_owned(),
                gst_number: None,
            },
            &connection,
        )
        .unwrap();
        create_ledger_entry(
            NewLedgerEntry {
                kind,
                party_id: party.id,
                amount_purchased: purchased,
                amount_settled: settled,
                date: date!(2024 - 03 - 10),
            },
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn monthly_sales_only_include_bills() {
        let state = get_test_state("Etc/UTC");
        insert_entry(&state, LedgerKind::Bill, 1000.0, 400.0);
        insert_entry(&state, LedgerKind::Purchase, 300.0, 100.0);

        let Json(months) = get_monthly_sales_endpoint(State(state)).await.unwrap();

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].kind, LedgerKind::Bill);
        assert_eq!(months[0].total_purchased, 1000.0);
        assert_eq!(months[0].outstanding_amount(), 600.0);
    }

    #[tokio::test]
    async fn top_suppliers_only_include_purchases() {
        let state = get_test_state("Etc/UTC");
        insert_entry(&state, LedgerKind::Bill, 1000.0, 400.0);
        insert_entry(&state, LedgerKind::Purchase, 300.0, 100.0);

        let Json(top) = get_top_suppliers_endpoint(State(state)).await.unwrap();

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].total_purchased, 300.0);
    }

    #[tokio::test]
    async fn summary_counts_parties() {
        let state = get_test_state("Asia/Kolkata");
        insert_entry(&state, LedgerKind::Bill, 1000.0, 400.0);

        let Json(summary) = get_summary_endpoint(State(state)).await.unwrap();

        assert_eq!(summary.active_customers, 1);
        assert_eq!(summary.active_suppliers, 0);
        assert_eq!(summary.customer_outstanding.total_purchased, 1000.0);
    }

    #[tokio::test]
    async fn summary_fails_with_invalid_timezone() {
        let state = get_test_state("Middle/Earth");

        let result = get_summary_endpoint(State(state)).await;

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidTimezoneError("Middle/Earth".to_owned())
        );
    }
}
