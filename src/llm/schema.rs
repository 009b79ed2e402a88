//! Provider-agnostic structured-output schema descriptors
//!
//! Each orchestration operation describes its expected result shape once,
//! here, independent of provider wire format. The same descriptor is then
//! translated two ways:
//!
//! - [`SchemaDescriptor::response_schema`] - the JSON-mode response schema
//!   the primary provider accepts (OpenAPI subset, uppercase types)
//! - [`SchemaDescriptor::tool_parameters`] - a JSON-Schema parameter block
//!   for a single forced tool-call on the secondary provider
//!
//! Tool parameters must be an object at the top level, so array-shaped
//! results are wrapped in a single-key object on the way out and unwrapped
//! on the way back, keeping the logical payload identical across providers.

use serde_json::{Value, json};

/// The logical shape of a structured result
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A string, optionally constrained to a closed value set
    String {
        description: Option<String>,
        allowed: Option<Vec<String>>,
    },

    /// An ordered list of one item shape
    Array { items: Box<Shape> },

    /// An object with named properties; properties not listed in `required`
    /// are optional and may be omitted entirely by the provider
    Object {
        properties: Vec<(String, Shape)>,
        required: Vec<String>,
    },
}

impl Shape {
    /// An unconstrained string
    pub fn string() -> Self {
        Shape::String {
            description: None,
            allowed: None,
        }
    }

    /// A string with a hint for the provider
    pub fn string_described(description: impl Into<String>) -> Self {
        Shape::String {
            description: Some(description.into()),
            allowed: None,
        }
    }

    /// A string constrained to a closed value set (e.g. agent names)
    pub fn enumeration<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Shape::String {
            description: None,
            allowed: Some(allowed.into_iter().map(Into::into).collect()),
        }
    }

    /// An array of the given item shape
    pub fn array(items: Shape) -> Self {
        Shape::Array { items: Box::new(items) }
    }

    /// An object with the given properties, all-or-subset required
    pub fn object(properties: Vec<(&str, Shape)>, required: &[&str]) -> Self {
        Shape::Object {
            properties: properties.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            required: required.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Render as a primary-provider response schema (uppercase types)
    ///
    /// Optional object properties are marked `nullable` so the provider is
    /// free to omit them.
    fn to_response_schema(&self, nullable: bool) -> Value {
        let mut schema = match self {
            Shape::String { description, allowed } => {
                let mut s = json!({"type": "STRING"});
                if let Some(d) = description {
                    s["description"] = json!(d);
                }
                if let Some(values) = allowed {
                    s["enum"] = json!(values);
                }
                s
            }
            Shape::Array { items } => {
                json!({"type": "ARRAY", "items": items.to_response_schema(false)})
            }
            Shape::Object { properties, required } => {
                let props: serde_json::Map<String, Value> = properties
                    .iter()
                    .map(|(name, shape)| {
                        let optional = !required.contains(name);
                        (name.clone(), shape.to_response_schema(optional))
                    })
                    .collect();
                let mut s = json!({"type": "OBJECT", "properties": props});
                if !required.is_empty() {
                    s["required"] = json!(required);
                }
                s
            }
        };
        if nullable {
            schema["nullable"] = json!(true);
        }
        schema
    }

    /// Render as a JSON-Schema fragment for tool parameters (lowercase types)
    fn to_tool_schema(&self) -> Value {
        match self {
            Shape::String { description, allowed } => {
                let mut s = json!({"type": "string"});
                if let Some(d) = description {
                    s["description"] = json!(d);
                }
                if let Some(values) = allowed {
                    s["enum"] = json!(values);
                }
                s
            }
            Shape::Array { items } => {
                json!({"type": "array", "items": items.to_tool_schema()})
            }
            Shape::Object { properties, required } => {
                let props: serde_json::Map<String, Value> = properties
                    .iter()
                    .map(|(name, shape)| (name.clone(), shape.to_tool_schema()))
                    .collect();
                json!({"type": "object", "properties": props, "required": required})
            }
        }
    }
}

/// A complete operation descriptor: logical shape plus tool-call identity
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    pub shape: Shape,
    /// Function name declared to the tool-call provider
    pub tool_name: &'static str,
    pub tool_description: &'static str,
    /// Key the shape is wrapped under when it is not already an object
    pub wrapper_key: Option<&'static str>,
}

impl SchemaDescriptor {
    /// Descriptor for an object-shaped result (no wrapping needed)
    pub fn object(shape: Shape, tool_name: &'static str, tool_description: &'static str) -> Self {
        Self {
            shape,
            tool_name,
            tool_description,
            wrapper_key: None,
        }
    }

    /// Descriptor for an array-shaped result, wrapped under `key` for the
    /// tool-call provider
    pub fn wrapped(shape: Shape, key: &'static str, tool_name: &'static str, tool_description: &'static str) -> Self {
        Self {
            shape,
            tool_name,
            tool_description,
            wrapper_key: Some(key),
        }
    }

    /// The primary provider's response schema for this operation
    pub fn response_schema(&self) -> Value {
        self.shape.to_response_schema(false)
    }

    /// The secondary provider's tool parameter schema for this operation
    pub fn tool_parameters(&self) -> Value {
        match self.wrapper_key {
            Some(key) => json!({
                "type": "object",
                "properties": { key: self.shape.to_tool_schema() },
                "required": [key],
            }),
            None => self.shape.to_tool_schema(),
        }
    }

    /// Undo the tool-call wrapping so both providers yield the same logical
    /// payload
    ///
    /// A missing wrapper key yields `Null`, which the operation's validator
    /// rejects like any other malformed payload.
    pub fn unwrap_arguments(&self, mut arguments: Value) -> Value {
        match self.wrapper_key {
            Some(key) => arguments.get_mut(key).map(Value::take).unwrap_or(Value::Null),
            None => arguments,
        }
    }
}
