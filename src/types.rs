//! Common datatypes supporting functions throughout Loyalty

use std::fmt::Display;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Award points, always whole and never negative
pub type Points = u64;

/// Headers of the columns that do not depend on the summarized months
pub const CUSTOMER_ID_HEADER: &str = "Customer ID";
/// See [`CUSTOMER_ID_HEADER`]
pub const CUSTOMER_NAME_HEADER: &str = "Customer Name";
/// See [`CUSTOMER_ID_HEADER`]
pub const TOTAL_HEADER: &str = "Total";

/// Identifier for a customer.
///
/// Identifiers are opaque tokens: numeric identifiers are kept as their decimal text, and
/// ordering is by string comparison, so `"10"` sorts before `"9"`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomerId(String);

impl CustomerId {
    /// Returns the identifier's text
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CustomerId {
    fn from(customer_id: String) -> Self {
        Self(customer_id)
    }
}

impl From<&str> for CustomerId {
    fn from(customer_id: &str) -> Self {
        Self(customer_id.to_owned())
    }
}

impl From<u64> for CustomerId {
    fn from(customer_id: u64) -> Self {
        Self(customer_id.to_string())
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts either a string or an integer, since upstream feeds send both
impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CustomerIdVisitor;

        impl<'de> de::Visitor<'de> for CustomerIdVisitor {
            type Value = CustomerId;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a customer identifier string or integer")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<CustomerId, E> {
                Ok(value.into())
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<CustomerId, E> {
                Ok(value.into())
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<CustomerId, E> {
                Ok(value.into())
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<CustomerId, E> {
                Ok(value.to_string().into())
            }
        }

        deserializer.deserialize_any(CustomerIdVisitor)
    }
}

/// A single purchase made by a customer
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The customer making the purchase
    pub(crate) customer_id: CustomerId,
    /// The customer's display name
    pub(crate) customer_name: String,
    /// The day of the purchase, as `YYYY-MM-DD`
    pub(crate) date: NaiveDate,
    /// The purchase amount in dollars. Accepts JSON numbers as well as decimal strings.
    pub(crate) amount: Decimal,
}

impl Transaction {
    /// Creates a transaction
    #[must_use]
    pub fn new(
        customer_id: impl Into<CustomerId>,
        customer_name: impl Into<String>,
        date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            date,
            amount,
        }
    }

    /// Returns the customer's identifier
    #[must_use]
    #[inline]
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the customer's name
    #[must_use]
    #[inline]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns the date of the purchase
    #[must_use]
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the purchase amount
    #[must_use]
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Running point totals for one customer while transactions are summarized
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tally {
    /// Name taken from the first transaction seen for the customer
    pub(crate) name: String,
    pub(crate) month1: Points,
    pub(crate) month2: Points,
    pub(crate) month3: Points,
    /// Kept equal to the sum of the three months after every credit
    pub(crate) total: Points,
}

impl Tally {
    /// Creates an empty tally for a newly seen customer
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            month1: 0,
            month2: 0,
            month3: 0,
            total: 0,
        }
    }
}

/// One line of a [`Summary`]
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// The customer's identifier
    pub id: CustomerId,
    /// The customer's name
    pub name: String,
    /// Points earned in the first month
    pub month1: Points,
    /// Points earned in the second month
    pub month2: Points,
    /// Points earned in the third month
    pub month3: Points,
    /// Points earned over all three months
    pub total: Points,
}

impl SummaryRow {
    pub(crate) fn new(id: CustomerId, tally: Tally) -> Self {
        Self {
            id,
            name: tally.name,
            month1: tally.month1,
            month2: tally.month2,
            month3: tally.month3,
            total: tally.total,
        }
    }
}

/// Display-ready points report over three months.
///
/// `headers` name the columns in the order of [`SummaryRow`]'s fields.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Summary {
    /// e.g. `Customer Points by Month, July 2023 to September 2023`
    pub title: String,
    /// Customer ID, Customer Name, the three month names, and Total
    pub headers: [String; 6],
    /// One row per customer, ordered by [`CustomerId`]
    pub rows: Vec<SummaryRow>,
}
