//! Schema setup for the application's SQLite database.

use rusqlite::Connection;

use crate::{Error, ledger::create_ledger_tables, party::create_party_tables};

/// Create the tables for all domain models if they do not already exist.
///
/// Foreign key enforcement is switched on for `connection`, which makes the
/// database reject ledger entries that refer to a missing customer or supplier.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = connection.unchecked_transaction()?;

    create_party_tables(&transaction)?;
    create_ledger_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}
