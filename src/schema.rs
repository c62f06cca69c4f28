//! Response schema sent to Gemini as a structured-output constraint.
//!
//! Gemini accepts a subset of OpenAPI 3 schema objects with upper-case type
//! names. Properties are kept in a `BTreeMap` so serialization is stable.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    Object,
    String,
    Number,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
}

impl Schema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            property_ordering: Vec::new(),
        }
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn string(description: &str) -> Self {
        Self::of(SchemaType::String).describe(description)
    }

    pub fn number(description: &str) -> Self {
        Self::of(SchemaType::Number).describe(description)
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Add a property; insertion order becomes `propertyOrdering`.
    pub fn property(mut self, name: &str, schema: Schema) -> Self {
        self.property_ordering.push(name.to_string());
        self.properties.insert(name.to_string(), schema);
        self
    }

    pub fn require(mut self, names: &[&str]) -> Self {
        self.required.extend(names.iter().map(|n| n.to_string()));
        self
    }
}

/// Shape of the classification answer.
///
/// Nothing is required at the top level: the model answers either with
/// `error` alone or with the dish fields.
pub fn food_result_schema() -> Schema {
    let nutrition = Schema::object()
        .describe("Estimated nutrition for the whole portion")
        .property("calories", Schema::number("Energy in kcal"))
        .property("protein", Schema::number("Protein in grams"))
        .property("carbs", Schema::number("Carbohydrates in grams"))
        .property("fat", Schema::number("Fat in grams"))
        .require(&["calories", "protein", "carbs", "fat"]);

    Schema::object()
        .property(
            "error",
            Schema::string("Set only when the image contains no recognizable food"),
        )
        .property("name", Schema::string("Dish name taken from the provided list"))
        .property(
            "portionSize",
            Schema::string("Visible serving size, e.g. \"2 units\" or \"1 plate\""),
        )
        .property("nutrition", nutrition)
}
