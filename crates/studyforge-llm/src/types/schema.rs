use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type names understood by the structured-output endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// Response schema for structured output.
///
/// Only the subset the model endpoint accepts: scalar types, arrays with an
/// item schema and objects with named properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl Schema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            items: None,
            properties: None,
            required: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// Object schema; every listed property is required
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        let properties: Vec<(String, Schema)> = properties
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();
        let required = properties.iter().map(|(name, _)| name.clone()).collect();

        Self {
            properties: Some(properties.into_iter().collect()),
            required: Some(required),
            ..Self::of(SchemaType::Object)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_marks_all_properties_required() {
        let schema = Schema::object([("question", Schema::string()), ("answer", Schema::string())]);
        let required = schema.required.unwrap();
        assert!(required.contains(&"question".to_string()));
        assert!(required.contains(&"answer".to_string()));
    }

    #[test]
    fn test_serializes_uppercase_types() {
        let schema = Schema::array(Schema::string().describe("a topic"));
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "ARRAY");
        assert_eq!(json["items"]["type"], "STRING");
        assert_eq!(json["items"]["description"], "a topic");
        assert!(json.get("properties").is_none());
    }
}
