pub mod chart;
pub mod currency;
pub mod ledger;
pub mod settings;
pub mod transaction;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Deserialize an opaque server identifier that may arrive as a JSON string or number.
pub(crate) fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

/// [`opaque_id`] for optional fields; `null` and absent both map to `None`.
pub(crate) fn opaque_id_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Id(#[serde(deserialize_with = "opaque_id")] String);

    Ok(Option::<Id>::deserialize(deserializer)?.map(|Id(id)| id))
}
