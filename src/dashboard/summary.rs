//! The key figures shown at the top of the dashboard.

use std::ops::Range;

use rusqlite::Connection;
use serde::Serialize;
use time::{Date, Month};

use crate::{
    Error,
    dashboard::totals::{LedgerTotals, get_ledger_totals},
    ledger::LedgerKind,
    party::{PartyKind, count_parties},
};

/// All-time and current month totals for both ledgers.
///
/// Every field is always present. Ledgers without matching entries report zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub customer_outstanding: LedgerTotals,
    pub supplier_outstanding: LedgerTotals,
    pub this_month_sales: LedgerTotals,
    pub this_month_purchases: LedgerTotals,
    pub active_customers: i64,
    pub active_suppliers: i64,
}

/// Build the dashboard summary, treating the calendar month that contains `today` as "this month".
pub(super) fn get_summary(today: Date, connection: &Connection) -> Result<DashboardSummary, Error> {
    let this_month = month_containing(today);

    Ok(DashboardSummary {
        customer_outstanding: get_ledger_totals(LedgerKind::Bill, None, connection)?,
        supplier_outstanding: get_ledger_totals(LedgerKind::Purchase, None, connection)?,
        this_month_sales: get_ledger_totals(
            LedgerKind::Bill,
            Some(this_month.clone()),
            connection,
        )?,
        this_month_purchases: get_ledger_totals(
            LedgerKind::Purchase,
            Some(this_month),
            connection,
        )?,
        active_customers: count_parties(PartyKind::Customer, connection)?,
        active_suppliers: count_parties(PartyKind::Supplier, connection)?,
    })
}

/// The dates from the first of `date`'s month up to, but excluding, the first of the next month.
fn month_containing(date: Date) -> Range<Date> {
    let start = date.replace_day(1).unwrap_or(date);

    let end = match start.month() {
        Month::December => Date::from_calendar_date(start.year() + 1, Month::January, 1),
        month => Date::from_calendar_date(start.year(), month.next(), 1),
    }
    // Only fails past the maximum representable year.
    .unwrap_or(Date::MAX);

    start..end
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use serde_json::json;
    use time::{Date, macros::date};

    use crate::{
        db::initialize,
        ledger::{LedgerKind, NewLedgerEntry, create_ledger_entry},
        party::{NewParty, Party, PartyKind, create_party},
    };

    use super::{get_summary, month_containing};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn insert_party(kind: PartyKind, shop_name: &str, connection: &Connection) -> Party {
        create_party(
            kind,
            NewParty {
                shop_name: shop_name.to_owned(),
                area: "Market Road".to_owned(),
                contact_number: "9876543210".to_owned(),
                gst_number: None,
            },
            connection,
        )
        .unwrap()
    }

    fn insert_entry(
        kind: LedgerKind,
        party: &Party,
        purchased: f64,
        settled: f64,
        date: Date,
        connection: &Connection,
    ) {
        create_ledger_entry(
            NewLedgerEntry {
                kind,
                party_id: party.id,
                amount_purchased: purchased,
                amount_settled: settled,
                date,
            },
            connection,
        )
        .unwrap();
    }

    #[test]
    fn empty_store_is_zero_filled() {
        let connection = get_test_connection();

        let summary = get_summary(date!(2024 - 04 - 15), &connection).unwrap();

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "customerOutstanding": {"totalSales": 0.0, "totalReceived": 0.0, "billCount": 0},
                "supplierOutstanding": {"totalPurchases": 0.0, "totalPaid": 0.0, "purchaseCount": 0},
                "thisMonthSales": {"totalSales": 0.0, "totalReceived": 0.0, "billCount": 0},
                "thisMonthPurchases": {"totalPurchases": 0.0, "totalPaid": 0.0, "purchaseCount": 0},
                "activeCustomers": 0,
                "activeSuppliers": 0,
            })
        );
    }

    #[test]
    fn this_month_only_counts_current_calendar_month() {
        let connection = get_test_connection();
        let acme = insert_party(PartyKind::Customer, "Acme", &connection);
        let idle = insert_party(PartyKind::Customer, "Idle", &connection);
        let supplier = insert_party(PartyKind::Supplier, "Wholesale Co", &connection);
        insert_entry(LedgerKind::Bill, &acme, 1000.0, 400.0, date!(2024 - 03 - 10), &connection);
        insert_entry(LedgerKind::Bill, &acme, 500.0, 500.0, date!(2024 - 04 - 02), &connection);
        insert_entry(LedgerKind::Bill, &idle, 7.0, 0.0, date!(2023 - 04 - 02), &connection);
        insert_entry(
            LedgerKind::Purchase,
            &supplier,
            300.0,
            100.0,
            date!(2024 - 04 - 30),
            &connection,
        );

        let summary = get_summary(date!(2024 - 04 - 15), &connection).unwrap();

        assert_eq!(summary.customer_outstanding.total_purchased, 1507.0);
        assert_eq!(summary.customer_outstanding.total_settled, 900.0);
        assert_eq!(summary.this_month_sales.total_purchased, 500.0);
        assert_eq!(summary.this_month_sales.count, 1);
        assert_eq!(summary.this_month_purchases.total_purchased, 300.0);
        assert_eq!(summary.this_month_purchases.total_settled, 100.0);
        assert_eq!(summary.active_customers, 2);
        assert_eq!(summary.active_suppliers, 1);
    }

    #[test]
    fn parties_without_entries_still_count_as_active() {
        let connection = get_test_connection();
        insert_party(PartyKind::Supplier, "Wholesale Co", &connection);

        let summary = get_summary(date!(2024 - 04 - 15), &connection).unwrap();

        assert_eq!(summary.active_suppliers, 1);
        assert_eq!(summary.supplier_outstanding.count, 0);
    }

    #[test]
    fn month_containing_handles_december() {
        assert_eq!(
            month_containing(date!(2024 - 12 - 25)),
            date!(2024 - 12 - 01)..date!(2025 - 01 - 01)
        );
    }

    #[test]
    fn month_containing_handles_leap_february() {
        assert_eq!(
            month_containing(date!(2024 - 02 - 29)),
            date!(2024 - 02 - 01)..date!(2024 - 03 - 01)
        );
    }
}
