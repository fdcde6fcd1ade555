//! Database operations for bills and purchases.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    ledger::{LedgerEntry, LedgerKind, NewLedgerEntry, PartyRef},
    party::{PartyId, map_party_row},
};

/// Store a bill or purchase and return it with its generated ID.
///
/// # Errors
/// Returns [Error::UnknownParty] if `new_entry` refers to a party that does not exist.
pub fn create_ledger_entry(
    new_entry: NewLedgerEntry,
    connection: &Connection,
) -> Result<LedgerEntry, Error> {
    let kind = new_entry.kind;
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        &format!(
            "INSERT INTO {} ({}, amount_purchased, {}, date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)",
            kind.table(),
            kind.party_column(),
            kind.settled_column()
        ),
        (
            new_entry.party_id,
            new_entry.amount_purchased,
            new_entry.amount_settled,
            new_entry.date,
            created_at,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(LedgerEntry {
        id,
        kind,
        party: PartyRef::Id(new_entry.party_id),
        amount_purchased: new_entry.amount_purchased,
        amount_settled: new_entry.amount_settled,
        date: new_entry.date,
        created_at,
    })
}

/// Retrieve every entry in a ledger with its party's details, newest first.
///
/// Entries are ordered by when they were recorded, not by their business date.
pub fn get_all_ledger_entries(
    kind: LedgerKind,
    connection: &Connection,
) -> Result<Vec<LedgerEntry>, Error> {
    connection
        .prepare(&format!(
            "SELECT e.id, e.{party_column}, e.amount_purchased, e.{settled_column}, e.date, e.created_at,
                p.id, p.shop_name, p.area, p.contact_number, p.gst_number, p.created_at
            FROM {ledger} e
            INNER JOIN {party} p ON p.id = e.{party_column}
            ORDER BY e.created_at DESC, e.id DESC",
            ledger = kind.table(),
            party = kind.party_kind().table(),
            party_column = kind.party_column(),
            settled_column = kind.settled_column(),
        ))?
        .query_map([], |row| {
            let mut entry = map_ledger_row(kind, row)?;
            entry.party = PartyRef::Expanded(map_party_row(row, 6)?);
            Ok(entry)
        })?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the entries of a single party, latest business date first.
///
/// An unknown `party_id` yields an empty list.
pub fn get_ledger_entries_for_party(
    kind: LedgerKind,
    party_id: PartyId,
    connection: &Connection,
) -> Result<Vec<LedgerEntry>, Error> {
    connection
        .prepare(&format!(
            "SELECT id, {party_column}, amount_purchased, {settled_column}, date, created_at
            FROM {ledger}
            WHERE {party_column} = :party_id
            ORDER BY date DESC, id DESC",
            ledger = kind.table(),
            party_column = kind.party_column(),
            settled_column = kind.settled_column(),
        ))?
        .query_map(&[(":party_id", &party_id)], |row| map_ledger_row(kind, row))?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

/// Initialize the bill and purchase tables and their indexes.
///
/// The party tables must exist first since both ledgers reference them.
pub fn create_ledger_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    for kind in [LedgerKind::Bill, LedgerKind::Purchase] {
        connection.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {ledger} (
                id INTEGER PRIMARY KEY,
                {party_column} INTEGER NOT NULL,
                amount_purchased REAL NOT NULL,
                {settled_column} REAL NOT NULL DEFAULT 0,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY({party_column}) REFERENCES {party}(id) ON UPDATE CASCADE ON DELETE RESTRICT
            );

            CREATE INDEX IF NOT EXISTS idx_{ledger}_{party_column} ON {ledger}({party_column});
            CREATE INDEX IF NOT EXISTS idx_{ledger}_date ON {ledger}(date);",
            ledger = kind.table(),
            party = kind.party_kind().table(),
            party_column = kind.party_column(),
            settled_column = kind.settled_column(),
        ))?;
    }

    Ok(())
}

fn map_ledger_row(kind: LedgerKind, row: &Row) -> Result<LedgerEntry, rusqlite::Error> {
    Ok(LedgerEntry {
        id: row.get(0)?,
        kind,
        party: PartyRef::Id(row.get(1)?),
        amount_purchased: row.get(2)?,
        amount_settled: row.get(3)?,
        date: row.get(4)?,
        created_at: row.get(5)?,
    })
}
