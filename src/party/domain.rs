//! Customer and supplier domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId};

/// The two kinds of trading partner the ledger tracks.
///
/// Customers and suppliers share the same shape and are stored in separate
/// tables with identical schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyKind {
    /// Someone the business sells to. Bills are raised against customers.
    Customer,
    /// Someone the business buys from. Purchases are made from suppliers.
    Supplier,
}

impl PartyKind {
    /// The name of the table that stores this kind of party.
    pub fn table(self) -> &'static str {
        match self {
            PartyKind::Customer => "customer",
            PartyKind::Supplier => "supplier",
        }
    }
}

pub type PartyId = DatabaseId;

/// A customer or supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: PartyId,
    pub shop_name: String,
    pub area: String,
    pub contact_number: String,
    /// The party's GST registration number, if they have one.
    pub gst_number: Option<String>,
    /// When the party was added to the database.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The JSON payload for creating a customer or supplier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParty {
    pub shop_name: String,
    pub area: String,
    pub contact_number: String,
    #[serde(default, alias = "gst")]
    pub gst_number: Option<String>,
}

impl NewParty {
    /// Check that the required fields are filled in and normalise the optional ones.
    ///
    /// Surrounding whitespace is trimmed from every field and a blank GST
    /// number is treated as missing.
    ///
    /// # Errors
    /// Returns [Error::EmptyField] naming the first required field that is blank.
    pub fn validate(self) -> Result<Self, Error> {
        let shop_name = require("shopName", &self.shop_name)?;
        let area = require("area", &self.area)?;
        let contact_number = require("contactNumber", &self.contact_number)?;
        let gst_number = self
            .gst_number
            .as_deref()
            .map(str::trim)
            .filter(|gst| !gst.is_empty())
            .map(str::to_owned);

        Ok(Self {
            shop_name,
            area,
            contact_number,
            gst_number,
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        return Err(Error::EmptyField(field));
    }

    Ok(value.to_owned())
}

#[cfg(test)]
mod new_party_tests {
    use crate::Error;

    use super::NewParty;

    fn new_party(shop_name: &str, area: &str, contact_number: &str) -> NewParty {
        NewParty {
            shop_name: shop_name.to_owned(),
            area: area.to_owned(),
            contact_number: contact_number.to_owned(),
            gst_number: None,
        }
    }

    #[test]
    fn validate_trims_fields() {
        let party = NewParty {
            gst_number: Some(" 27AAPFU0939F1ZV ".to_owned()),
            ..new_party("  Acme  ", "Market Road ", " 9876543210")
        };

        let got = party.validate().unwrap();

        assert_eq!(got.shop_name, "Acme");
        assert_eq!(got.area, "Market Road");
        assert_eq!(got.contact_number, "9876543210");
        assert_eq!(got.gst_number.as_deref(), Some("27AAPFU0939F1ZV"));
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        assert_eq!(
            new_party(" ", "Area", "123").validate().unwrap_err(),
            Error::EmptyField("shopName")
        );
        assert_eq!(
            new_party("Acme", "", "123").validate().unwrap_err(),
            Error::EmptyField("area")
        );
        assert_eq!(
            new_party("Acme", "Area", "\t").validate().unwrap_err(),
            Error::EmptyField("contactNumber")
        );
    }

    #[test]
    fn blank_gst_number_is_dropped() {
        let party = NewParty {
            gst_number: Some("   ".to_owned()),
            ..new_party("Acme", "Area", "123")
        };

        assert_eq!(party.validate().unwrap().gst_number, None);
    }

    #[test]
    fn accepts_legacy_gst_key() {
        let party: NewParty = serde_json::from_str(
            r#"{"shopName": "Acme", "area": "Area", "contactNumber": "123", "gst": "GST1"}"#,
        )
        .unwrap();

        assert_eq!(party.gst_number.as_deref(), Some("GST1"));
    }

    #[test]
    fn gst_number_is_optional() {
        let party: NewParty =
            serde_json::from_str(r#"{"shopName": "Acme", "area": "Area", "contactNumber": "123"}"#)
                .unwrap();

        assert_eq!(party.gst_number, None);
    }
}
