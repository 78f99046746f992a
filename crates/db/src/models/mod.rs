//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` row struct matching the database table
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for partial updates: plain `Option` fields
//!   for non-nullable columns, `Option<Option<..>>` (deserialized with
//!   [`double_option`]) for nullable columns where an explicit JSON `null`
//!   clears the value and an absent key leaves it untouched

pub mod address;
pub mod article;
pub mod article_order;
pub mod budget;
pub mod client;
pub mod contact;
pub mod dedicated_time;
pub mod order;
pub mod payment_condition;
pub mod photo;
pub mod project;
pub mod report;
pub mod requirement;
pub mod state;
pub mod supplier;
pub mod user;

/// Deserializer for `Option<Option<T>>` update fields.
///
/// The derive alone would collapse `"field": null` and a missing key into
/// the same `None`; wrapping the parsed value keeps them distinct:
/// missing -> `None` (via `#[serde(default)]`), `null` -> `Some(None)`,
/// a value -> `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::contact::UpdateContact;

    #[test]
    fn missing_key_and_explicit_null_stay_distinct() {
        let patch: UpdateContact = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.email, None);

        let patch: UpdateContact = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert_eq!(patch.email, Some(None));

        let patch: UpdateContact = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert_eq!(patch.email, Some(Some("a@b.c".to_string())));
    }
}
