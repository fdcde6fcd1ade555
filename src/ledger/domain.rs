//! Bill and purchase domain types.
//!
//! Bills and purchases are stored and aggregated the same way. They only differ
//! in which kind of party they refer to and in the names their fields are given
//! in JSON, which [LedgerKind::labels] describes.

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeStruct};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    Error,
    database_id::DatabaseId,
    party::{Party, PartyId, PartyKind},
};

/// The two ledgers the business keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKind {
    /// Sales to customers.
    Bill,
    /// Stock bought from suppliers.
    Purchase,
}

/// The JSON field names used for one kind of ledger.
#[derive(Debug, PartialEq, Eq)]
pub struct LedgerLabels {
    /// Struct name reported to serde.
    pub entry: &'static str,
    /// The party reference on an entry, e.g. "customer".
    pub party: &'static str,
    /// The settled amount on an entry, e.g. "amountGiven".
    pub settled: &'static str,
    /// The per-party settled total in a balance, e.g. "totalGiven".
    pub balance_settled: &'static str,
    /// The purchased total in dashboard views, e.g. "totalSales".
    pub total_purchased: &'static str,
    /// The settled total in dashboard views, e.g. "totalReceived".
    pub total_settled: &'static str,
    /// The entry count in dashboard views, e.g. "billCount".
    pub count: &'static str,
}

const BILL_LABELS: LedgerLabels = LedgerLabels {
    entry: "Bill",
    party: "customer",
    settled: "amountGiven",
    balance_settled: "totalGiven",
    total_purchased: "totalSales",
    total_settled: "totalReceived",
    count: "billCount",
};

const PURCHASE_LABELS: LedgerLabels = LedgerLabels {
    entry: "Purchase",
    party: "supplier",
    settled: "amountPaid",
    balance_settled: "totalPaid",
    total_purchased: "totalPurchases",
    total_settled: "totalPaid",
    count: "purchaseCount",
};

impl LedgerKind {
    /// The name of the table that stores this ledger.
    pub fn table(self) -> &'static str {
        match self {
            LedgerKind::Bill => "bill",
            LedgerKind::Purchase => "purchase",
        }
    }

    /// The column holding the ID of the party an entry belongs to.
    pub fn party_column(self) -> &'static str {
        match self {
            LedgerKind::Bill => "customer_id",
            LedgerKind::Purchase => "supplier_id",
        }
    }

    /// The column holding the amount given by the customer or paid to the supplier.
    pub fn settled_column(self) -> &'static str {
        match self {
            LedgerKind::Bill => "amount_given",
            LedgerKind::Purchase => "amount_paid",
        }
    }

    /// The kind of party entries in this ledger refer to.
    pub fn party_kind(self) -> PartyKind {
        match self {
            LedgerKind::Bill => PartyKind::Customer,
            LedgerKind::Purchase => PartyKind::Supplier,
        }
    }

    pub fn labels(self) -> &'static LedgerLabels {
        match self {
            LedgerKind::Bill => &BILL_LABELS,
            LedgerKind::Purchase => &PURCHASE_LABELS,
        }
    }
}

pub type LedgerEntryId = DatabaseId;

/// The party an entry belongs to, either as a bare ID or with the party's details.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PartyRef {
    Id(PartyId),
    Expanded(Party),
}

impl PartyRef {
    pub fn id(&self) -> PartyId {
        match self {
            PartyRef::Id(id) => *id,
            PartyRef::Expanded(party) => party.id,
        }
    }
}

/// A bill or a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: LedgerEntryId,
    pub kind: LedgerKind,
    pub party: PartyRef,
    /// The value of the goods bought.
    pub amount_purchased: f64,
    /// The amount given by the customer, or paid to the supplier.
    pub amount_settled: f64,
    /// The business date of the transaction.
    pub date: Date,
    /// When the entry was added to the database.
    pub created_at: OffsetDateTime,
}

impl Serialize for LedgerEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let labels = self.kind.labels();
        let created_at = self
            .created_at
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?;

        let mut state = serializer.serialize_struct(labels.entry, 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field(labels.party, &self.party)?;
        state.serialize_field("amountPurchased", &self.amount_purchased)?;
        state.serialize_field(labels.settled, &self.amount_settled)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("createdAt", &created_at)?;
        state.end()
    }
}

/// The JSON payload for creating a bill.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub customer: PartyId,
    pub amount_purchased: f64,
    #[serde(default)]
    pub amount_given: f64,
    #[serde(deserialize_with = "deserialize_business_date")]
    pub date: Date,
}

/// The JSON payload for creating a purchase.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub supplier: PartyId,
    pub amount_purchased: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(deserialize_with = "deserialize_business_date")]
    pub date: Date,
}

/// Read a business date given either as `YYYY-MM-DD` or as an RFC 3339
/// datetime, e.g. `2024-03-10T08:30:00.000Z`.
///
/// A datetime is reduced to its calendar date in UTC.
fn deserialize_business_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_business_date(&text).map_err(serde::de::Error::custom)
}

fn parse_business_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, format_description!("[year]-[month]-[day]")).or_else(|_| {
        OffsetDateTime::parse(text, &Rfc3339)
            .map(|datetime| datetime.to_offset(UtcOffset::UTC).date())
    })
}

/// A bill or purchase that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLedgerEntry {
    pub kind: LedgerKind,
    pub party_id: PartyId,
    pub amount_purchased: f64,
    pub amount_settled: f64,
    pub date: Date,
}

impl NewLedgerEntry {
    /// Check that both amounts are finite and not negative.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] naming the JSON field of the first bad amount.
    pub fn validate(self) -> Result<Self, Error> {
        check_amount("amountPurchased", self.amount_purchased)?;
        check_amount(self.kind.labels().settled, self.amount_settled)?;

        Ok(self)
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), Error> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidAmount { field, value });
    }

    Ok(())
}

impl From<NewBill> for NewLedgerEntry {
    fn from(bill: NewBill) -> Self {
        Self {
            kind: LedgerKind::Bill,
            party_id: bill.customer,
            amount_purchased: bill.amount_purchased,
            amount_settled: bill.amount_given,
            date: bill.date,
        }
    }
}

impl From<NewPurchase> for NewLedgerEntry {
    fn from(purchase: NewPurchase) -> Self {
        Self {
            kind: LedgerKind::Purchase,
            party_id: purchase.supplier,
            amount_purchased: purchase.amount_purchased,
            amount_settled: purchase.amount_paid,
            date: purchase.date,
        }
    }
}
