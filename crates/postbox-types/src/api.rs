use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

// -- Submission --

/// Fields exactly as the client sent them. Anything missing stays `None` so
/// the validator can report it instead of the body parser rejecting it.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawSubmission {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub message: Option<String>,
}

struct ScalarVisitor;

impl<'de> de::Visitor<'de> for ScalarVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

/// Accept strings, numbers and booleans; `null` counts as missing.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarVisitor)
}

// -- Violations --

/// Why one field failed validation.
///
/// Serialized as `{ "type": "field", "value", "msg", "path", "location": "body" }`
/// so existing form scripts can keep reading `errors[i].path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: String,
    pub msg: String,
    pub path: String,
    pub location: &'static str,
}

impl Violation {
    pub fn field(path: impl Into<String>, value: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            kind: "field",
            value: value.into(),
            msg: msg.into(),
            path: path.into(),
            location: "body",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorsResponse {
    pub errors: Vec<Violation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_are_none() {
        let raw: RawSubmission = serde_json::from_str(r#"{"name": null, "message": "hi"}"#).unwrap();
        assert_eq!(raw.name, None);
        assert_eq!(raw.email, None);
        assert_eq!(raw.message.as_deref(), Some("hi"));
    }

    #[test]
    fn scalars_are_stringified() {
        let raw: RawSubmission =
            serde_json::from_str(r#"{"name": 42, "email": true, "message": 1.5}"#).unwrap();
        assert_eq!(raw.name.as_deref(), Some("42"));
        assert_eq!(raw.email.as_deref(), Some("true"));
        assert_eq!(raw.message.as_deref(), Some("1.5"));
    }

    #[test]
    fn nested_values_are_rejected() {
        let result = serde_json::from_str::<RawSubmission>(r#"{"name": ["a", "b"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn violation_wire_shape() {
        let v = Violation::field("name", "", "Invalid value");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "field",
                "value": "",
                "msg": "Invalid value",
                "path": "name",
                "location": "body",
            })
        );
    }
}
