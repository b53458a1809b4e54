use serde::{Deserialize, Deserializer, Serialize};

/// A single listed agency as returned by the listing endpoint.
///
/// Every field falls back to its default when absent from the payload or
/// sent as `null`, so a partially populated record still renders (with
/// blanks) instead of failing the whole fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyRecord {
    /// Server-assigned identifier. Higher values are newer listings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Grouping key. May be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub niche: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Free-form price text such as `"$100/mo"`; see [`crate::parse_price`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub pricing: String,
    /// Review count. Not necessarily whole or positive.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl AgencyRecord {
    /// `tel:` URI for the phone number, with whitespace removed.
    #[must_use]
    pub fn tel_link(&self) -> String {
        let digits: String = self
            .phone_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("tel:{digits}")
    }

    #[must_use]
    pub fn mailto_link(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

/// UI identity of a fetched record: its position in fetch order.
///
/// Server ids are not guaranteed unique, so expansion state is keyed on this
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(pub usize);

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
