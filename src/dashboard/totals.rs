//! Ledger-wide totals, optionally limited to a range of business dates.

use std::ops::Range;

use rusqlite::{Connection, Row};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use time::Date;

use crate::{Error, ledger::LedgerKind};

/// The sum of the amounts in one ledger and the number of entries summed.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTotals {
    pub kind: LedgerKind,
    pub total_purchased: f64,
    pub total_settled: f64,
    pub count: i64,
}

impl LedgerTotals {
    /// Totals for a ledger with no matching entries.
    pub fn zero(kind: LedgerKind) -> Self {
        Self {
            kind,
            total_purchased: 0.0,
            total_settled: 0.0,
            count: 0,
        }
    }
}

impl Serialize for LedgerTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let labels = self.kind.labels();

        let mut state = serializer.serialize_struct("LedgerTotals", 3)?;
        state.serialize_field(labels.total_purchased, &self.total_purchased)?;
        state.serialize_field(labels.total_settled, &self.total_settled)?;
        state.serialize_field(labels.count, &self.count)?;
        state.end()
    }
}

/// Sum every entry in the `kind` ledger whose business date is in `dates`, or
/// every entry if `dates` is `None`.
///
/// An empty ledger yields [LedgerTotals::zero], never an error.
pub(super) fn get_ledger_totals(
    kind: LedgerKind,
    dates: Option<Range<Date>>,
    connection: &Connection,
) -> Result<LedgerTotals, Error> {
    let base_query = format!(
        "SELECT SUM(amount_purchased), SUM({settled_column}), COUNT(*) FROM {ledger}",
        ledger = kind.table(),
        settled_column = kind.settled_column(),
    );

    let totals = match dates {
        Some(dates) => connection.query_row(
            &format!("{base_query} WHERE date >= ?1 AND date < ?2"),
            (dates.start, dates.end),
            |row| map_totals_row(kind, row),
        )?,
        None => connection.query_row(&base_query, [], |row| map_totals_row(kind, row))?,
    };

    Ok(totals)
}

fn map_totals_row(kind: LedgerKind, row: &Row) -> Result<LedgerTotals, rusqlite::Error> {
    let count: i64 = row.get(2)?;

    // SUM over no rows is NULL.
    if count == 0 {
        return Ok(LedgerTotals::zero(kind));
    }

    Ok(LedgerTotals {
        kind,
        total_purchased: row.get(0)?,
        total_settled: row.get(1)?,
        count,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        db::initialize,
        ledger::{LedgerKind, NewLedgerEntry, create_ledger_entry},
        party::{NewParty, PartyKind, create_party},
    };

    use super::{LedgerTotals, get_ledger_totals};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn insert_bills(bills: &[(f64, f64, time::Date)], connection: &Connection) {
        let customer = create_party(
            PartyKind::Customer,
            NewParty {
                shop_name: "Acme".to_owned(),
                area: "Market Road".to_owned(),
                contact_number: "9876543210".to_owned(),
                gst_number: None,
            },
            connection,
        )
        .unwrap();

        for &(purchased, given, date) in bills {
            create_ledger_entry(
                NewLedgerEntry {
                    kind: LedgerKind::Bill,
                    party_id: customer.id,
                    amount_purchased: purchased,
                    amount_settled: given,
                    date,
                },
                connection,
            )
            .unwrap();
        }
    }

    #[test]
    fn empty_ledger_is_zero() {
        let connection = get_test_connection();

        let totals = get_ledger_totals(LedgerKind::Purchase, None, &connection).unwrap();

        assert_eq!(totals, LedgerTotals::zero(LedgerKind::Purchase));
    }

    #[test]
    fn sums_all_entries() {
        let connection = get_test_connection();
        insert_bills(
            &[
                (1000.0, 400.0, date!(2024 - 03 - 10)),
                (500.0, 500.0, date!(2024 - 04 - 02)),
            ],
            &connection,
        );

        let totals = get_ledger_totals(LedgerKind::Bill, None, &connection).unwrap();

        assert_eq!(totals.total_purchased, 1500.0);
        assert_eq!(totals.total_settled, 900.0);
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn date_range_is_half_open() {
        let connection = get_test_connection();
        insert_bills(
            &[
                (1.0, 0.0, date!(2024 - 02 - 29)),
                (10.0, 0.0, date!(2024 - 03 - 01)),
                (100.0, 0.0, date!(2024 - 03 - 31)),
                (1000.0, 0.0, date!(2024 - 04 - 01)),
            ],
            &connection,
        );

        let totals = get_ledger_totals(
            LedgerKind::Bill,
            Some(date!(2024 - 03 - 01)..date!(2024 - 04 - 01)),
            &connection,
        )
        .unwrap();

        assert_eq!(totals.total_purchased, 110.0);
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn serializes_with_ledger_specific_names() {
        let bill_totals = serde_json::to_value(LedgerTotals::zero(LedgerKind::Bill)).unwrap();
        let purchase_totals =
            serde_json::to_value(LedgerTotals::zero(LedgerKind::Purchase)).unwrap();

        assert_eq!(
            bill_totals,
            json!({"totalSales": 0.0, "totalReceived": 0.0, "billCount": 0})
        );
        assert_eq!(
            purchase_totals,
            json!({"totalPurchases": 0.0, "totalPaid": 0.0, "purchaseCount": 0})
        );
    }
}
