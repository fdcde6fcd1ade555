//! Rankings of the customers and suppliers the business trades with most.

use rusqlite::Connection;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{Error, ledger::LedgerKind, party::PartyId};

/// The number of parties shown in each ranking.
pub(super) const TOP_PARTY_LIMIT: usize = 5;

/// A party's lifetime totals in one ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TopParty {
    pub kind: LedgerKind,
    pub party_id: PartyId,
    pub shop_name: String,
    pub total_purchased: f64,
    pub total_settled: f64,
    pub count: i64,
}

impl Serialize for TopParty {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let labels = self.kind.labels();

        let mut state = serializer.serialize_struct("TopParty", 5)?;
        state.serialize_field("id", &self.party_id)?;
        state.serialize_field("shopName", &self.shop_name)?;
        state.serialize_field(labels.total_purchased, &self.total_purchased)?;
        state.serialize_field(labels.total_settled, &self.total_settled)?;
        state.serialize_field(labels.count, &self.count)?;
        state.end()
    }
}

/// Get up to `limit` parties with the largest total purchased amount in the
/// `kind` ledger, largest first.
///
/// Parties with equal totals are ordered by ID.
pub(super) fn get_top_parties(
    kind: LedgerKind,
    limit: usize,
    connection: &Connection,
) -> Result<Vec<TopParty>, Error> {
    connection
        .prepare(&format!(
            "SELECT p.id, p.shop_name,
                SUM(e.amount_purchased) AS total_purchased,
                SUM(e.{settled_column}),
                COUNT(e.id)
            FROM {ledger} e
            INNER JOIN {party} p ON p.id = e.{party_column}
            GROUP BY p.id
            ORDER BY total_purchased DESC, p.id ASC
            LIMIT ?1",
            ledger = kind.table(),
            party = kind.party_kind().table(),
            party_column = kind.party_column(),
            settled_column = kind.settled_column(),
        ))?
        .query_map([limit as i64], |row| {
            Ok(TopParty {
                kind,
                party_id: row.get(0)?,
                shop_name: row.get(1)?,
                total_purchased: row.get(2)?,
                total_settled: row.get(3)?,
                count: row.get(4)?,
            })
        })?
        .map(|maybe_party| maybe_party.map_err(|error| error.into()))
        .collect()
}
