//! Ledger totals bucketed by calendar month.

use rusqlite::{Connection, Row};
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{Error, ledger::LedgerKind};

/// The totals of one ledger for a single calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    pub kind: LedgerKind,
    pub year: i32,
    /// The month number, 1 for January through 12 for December.
    pub month: u8,
    pub total_purchased: f64,
    pub total_settled: f64,
    pub count: i64,
}

impl MonthlyTotals {
    /// The amount that was bought during the month but not yet settled.
    pub fn outstanding_amount(&self) -> f64 {
        self.total_purchased - self.total_settled
    }
}

impl Serialize for MonthlyTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let labels = self.kind.labels();

        let mut state = serializer.serialize_struct("MonthlyTotals", 6)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month)?;
        state.serialize_field(labels.total_purchased, &self.total_purchased)?;
        state.serialize_field(labels.total_settled, &self.total_settled)?;
        state.serialize_field(labels.count, &self.count)?;
        state.serialize_field("outstandingAmount", &self.outstanding_amount())?;
        state.end()
    }
}

/// Get the totals of the `kind` ledger for every month that has at least one
/// entry, in chronological order.
///
/// Entries are bucketed by the year and month of their business date.
pub(super) fn get_monthly_totals(
    kind: LedgerKind,
    connection: &Connection,
) -> Result<Vec<MonthlyTotals>, Error> {
    let months = connection
        .prepare(&format!(
            "SELECT CAST(strftime('%Y', date) AS INTEGER) AS year,
                CAST(strftime('%m', date) AS INTEGER) AS month,
                SUM(amount_purchased), SUM({settled_column}), COUNT(*)
            FROM {ledger}
            GROUP BY year, month
            ORDER BY year ASC, month ASC",
            ledger = kind.table(),
            settled_column = kind.settled_column(),
        ))?
        .query_map([], |row| map_monthly_row(kind, row))?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    Ok(months)
}

fn map_monthly_row(kind: LedgerKind, row: &Row) -> Result<MonthlyTotals, rusqlite::Error> {
    Ok(MonthlyTotals {
        kind,
        year: row.get(0)?,
        month: row.get(1)?,
        total_purchased: row.get(2)?,
        total_settled: row.get(3)?,
        count: row.get(4)?,
    })
}
