use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

const NAME_KEY: &str = "Name";
const AMOUNT_KEY: &str = "Amount";

/// One scholarship. `name` is the store key.
///
/// Serialized as `{"Name": .., "Amount": ..}`. Decoding is lenient about
/// the object, strict about value types:
/// - keys match case-insensitively, the last occurrence wins;
/// - a `null` value leaves the field as it was, a `null` body is the zero record;
/// - missing fields stay zero and unknown keys are skipped.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Scholarship {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Amount")]
    pub amount: i64,
}

impl Scholarship {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self { name: name.into(), amount }
    }
}

impl<'de> Deserialize<'de> for Scholarship {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Option::<Fields>::deserialize(deserializer)?;
        Ok(fields.map(|f| f.0).unwrap_or_default())
    }
}

struct Fields(Scholarship);

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FieldsVisitor)
    }
}

struct FieldsVisitor;

impl<'de> Visitor<'de> for FieldsVisitor {
    type Value = Fields;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scholarship object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Fields, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut out = Scholarship::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case(NAME_KEY) {
                if let Some(name) = map.next_value::<Option<String>>()? {
                    out.name = name;
                }
            } else if key.eq_ignore_ascii_case(AMOUNT_KEY) {
                if let Some(amount) = map.next_value::<Option<i64>>()? {
                    out.amount = amount;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(Fields(out))
    }
}

/// The whole store, keyed by name. Serializes as a JSON object.
pub type Scholarships = HashMap<String, Scholarship>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_capitalised_keys() {
        let v = serde_json::to_value(Scholarship::new("test", 1000)).unwrap();
        assert_eq!(v, json!({"Name": "test", "Amount": 1000}));
    }

    #[test]
    fn decodes_either_key_case() {
        let a: Scholarship = serde_json::from_str(r#"{"Name":"x","Amount":5}"#).unwrap();
        let b: Scholarship = serde_json::from_str(r#"{"name":"x","amount":5}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_fields_are_zero_and_extras_ignored() {
        let s: Scholarship = serde_json::from_str(r#"{"Name":"x","Other":true}"#).unwrap();
        assert_eq!(s, Scholarship::new("x", 0));
        let empty: Scholarship = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Scholarship::default());
    }

    #[test]
    fn keys_ignore_case_and_last_wins() {
        let s: Scholarship = serde_json::from_str(r#"{"NAME":"caps","aMoUnT":7}"#).unwrap();
        assert_eq!(s, Scholarship::new("caps", 7));
        let s: Scholarship = serde_json::from_str(r#"{"Name":"a","name":"b","Amount":1}"#).unwrap();
        assert_eq!(s, Scholarship::new("b", 1));
        let s: Scholarship = serde_json::from_str(r#"{"amount":1,"Amount":2,"Name":"x"}"#).unwrap();
        assert_eq!(s, Scholarship::new("x", 2));
    }

    #[test]
    fn nulls_leave_fields_alone() {
        let s: Scholarship = serde_json::from_str("null").unwrap();
        assert_eq!(s, Scholarship::default());
        let s: Scholarship = serde_json::from_str(r#"{"Name":null,"Amount":5}"#).unwrap();
        assert_eq!(s, Scholarship::new("", 5));
        let s: Scholarship = serde_json::from_str(r#"{"Name":"x","name":null,"Amount":null}"#).unwrap();
        assert_eq!(s, Scholarship::new("x", 0));
    }

    #[test]
    fn rejects_malformed() {
        assert!(serde_json::from_str::<Scholarship>("").is_err());
        assert!(serde_json::from_str::<Scholarship>(r#"{"Name":"x","Amount":1.5}"#).is_err());
        assert!(serde_json::from_str::<Scholarship>(r#"{"Name":"x","Amount":"5"}"#).is_err());
        assert!(serde_json::from_str::<Scholarship>("[1,2]").is_err());
        assert!(serde_json::from_str::<Scholarship>("42").is_err());
        assert!(serde_json::from_str::<Scholarship>(r#"{"Name":5}"#).is_err());
    }

    #[test]
    fn map_encodes_as_object() {
        let mut all = Scholarships::new();
        all.insert("a".into(), Scholarship::new("a", 1));
        let v = serde_json::to_value(&all).unwrap();
        assert_eq!(v, json!({"a": {"Name": "a", "Amount": 1}}));
    }
}
