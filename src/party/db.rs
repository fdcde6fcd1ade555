//! Database operations for customers and suppliers.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    party::{NewParty, Party, PartyId, PartyKind},
};

/// Create a party of the given kind and return it with its generated ID.
///
/// The caller is expected to have validated `new_party`.
pub fn create_party(
    kind: PartyKind,
    new_party: NewParty,
    connection: &Connection,
) -> Result<Party, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        &format!(
            "INSERT INTO {} (shop_name, area, contact_number, gst_number, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)",
            kind.table()
        ),
        (
            &new_party.shop_name,
            &new_party.area,
            &new_party.contact_number,
            &new_party.gst_number,
            created_at,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Party {
        id,
        shop_name: new_party.shop_name,
        area: new_party.area,
        contact_number: new_party.contact_number,
        gst_number: new_party.gst_number,
        created_at,
    })
}

/// Retrieve a single party by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no party of `kind` with `id`.
pub fn get_party(kind: PartyKind, id: PartyId, connection: &Connection) -> Result<Party, Error> {
    connection
        .prepare(&format!(
            "SELECT id, shop_name, area, contact_number, gst_number, created_at
            FROM {} WHERE id = :id",
            kind.table()
        ))?
        .query_row(&[(":id", &id)], |row| map_party_row(row, 0))
        .map_err(|error| error.into())
}

/// Retrieve every party of the given kind in the order they were added.
pub fn get_all_parties(kind: PartyKind, connection: &Connection) -> Result<Vec<Party>, Error> {
    connection
        .prepare(&format!(
            "SELECT id, shop_name, area, contact_number, gst_number, created_at
            FROM {} ORDER BY id ASC",
            kind.table()
        ))?
        .query_map([], |row| map_party_row(row, 0))?
        .map(|maybe_party| maybe_party.map_err(|error| error.into()))
        .collect()
}

/// Count the parties of the given kind.
pub fn count_parties(kind: PartyKind, connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row(&format!("SELECT COUNT(*) FROM {}", kind.table()), [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Initialize the customer and supplier tables.
pub fn create_party_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    for kind in [PartyKind::Customer, PartyKind::Supplier] {
        connection.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY,
                    shop_name TEXT NOT NULL,
                    area TEXT NOT NULL,
                    contact_number TEXT NOT NULL,
                    gst_number TEXT,
                    created_at TEXT NOT NULL
                )",
                kind.table()
            ),
            (),
        )?;
    }

    Ok(())
}

/// Map the six party columns starting at `offset` to a [Party].
///
/// Joined queries use `offset` to read the party that follows another record's columns.
pub fn map_party_row(row: &Row, offset: usize) -> Result<Party, rusqlite::Error> {
    Ok(Party {
        id: row.get(offset)?,
        shop_name: row.get(offset + 1)?,
        area: row.get(offset + 2)?,
        contact_number: row.get(offset + 3)?,
        gst_number: row.get(offset + 4)?,
        created_at: row.get(offset + 5)?,
    })
}
