//! Outstanding balances per customer and supplier.
//!
//! A balance is derived from the full history of a party's entries every time
//! it is requested: the total purchased minus the total given (bills) or paid
//! (purchases). Parties without any entries have no balance and are left out.

use rusqlite::Connection;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{Error, ledger::LedgerKind, party::PartyId};

/// The running balance between the business and one party.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyBalance {
    pub kind: LedgerKind,
    pub party_id: PartyId,
    pub shop_name: String,
    pub area: String,
    pub contact_number: String,
    pub total_purchased: f64,
    pub total_settled: f64,
    /// `total_purchased - total_settled`. Positive when the party still owes
    /// money (bills) or is still owed money (purchases).
    pub balance: f64,
}

impl Serialize for PartyBalance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PartyBalance", 7)?;
        state.serialize_field("partyId", &self.party_id)?;
        state.serialize_field("shopName", &self.shop_name)?;
        state.serialize_field("area", &self.area)?;
        state.serialize_field("contactNumber", &self.contact_number)?;
        state.serialize_field("totalPurchased", &self.total_purchased)?;
        state.serialize_field(self.kind.labels().balance_settled, &self.total_settled)?;
        state.serialize_field("balance", &self.balance)?;
        state.end()
    }
}

/// Compute the balance of every party that has at least one entry in the `kind` ledger.
///
/// If `initial` is given, only parties whose shop name starts with that
/// character (ignoring case) are returned. Results are ordered by shop name.
pub fn get_party_balances(
    kind: LedgerKind,
    initial: Option<char>,
    connection: &Connection,
) -> Result<Vec<PartyBalance>, Error> {
    let balances = connection
        .prepare(&format!(
            "SELECT p.id, p.shop_name, p.area, p.contact_number,
                SUM(e.amount_purchased), SUM(e.{settled_column})
            FROM {ledger} e
            INNER JOIN {party} p ON p.id = e.{party_column}
            GROUP BY p.id
            ORDER BY p.shop_name ASC, p.id ASC",
            ledger = kind.table(),
            party = kind.party_kind().table(),
            party_column = kind.party_column(),
            settled_column = kind.settled_column(),
        ))?
        .query_map([], |row| {
            let total_purchased: f64 = row.get(4)?;
            let total_settled: f64 = row.get(5)?;

            Ok(PartyBalance {
                kind,
                party_id: row.get(0)?,
                shop_name: row.get(1)?,
                area: row.get(2)?,
                contact_number: row.get(3)?,
                total_purchased,
                total_settled,
                balance: total_purchased - total_settled,
            })
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    let Some(initial) = initial else {
        return Ok(balances);
    };

    Ok(balances
        .into_iter()
        .filter(|balance| starts_with_ignore_case(&balance.shop_name, initial))
        .collect())
}

fn starts_with_ignore_case(text: &str, initial: char) -> bool {
    text.chars()
        .next()
        .is_some_and(|first| first.to_lowercase().eq(initial.to_lowercase()))
}
