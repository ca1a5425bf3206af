//! Projection of a [`SurfaceRegistry`] into an OpenAPI document.
//!
//! Pure, read-only transform: the rendered artifact is a contract handed to
//! API consumers, so two renders of the same registry must be byte-identical.
//! serde_json's map keeps keys in sorted order, which makes the output
//! deterministic without any extra bookkeeping.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::surface::{EndpointDescriptor, FieldDescriptor, FieldKind, SurfaceRegistry};

/// Render the registry as a pretty-printed OpenAPI 3.0 JSON document.
pub fn render(registry: &SurfaceRegistry) -> String {
    let doc = document(registry);
    serde_json::to_string_pretty(&doc).expect("surface document serializes to JSON")
}

/// The document as a JSON value, for callers that want to inspect rather
/// than serve it.
pub fn document(registry: &SurfaceRegistry) -> Value {
    // Group operations under their path item, keyed by lowercase method.
    let mut paths: BTreeMap<String, Map<String, Value>> = BTreeMap::new();
    for endpoint in registry.endpoints() {
        paths
            .entry(endpoint.path.clone())
            .or_default()
            .insert(endpoint.method.key().to_string(), operation(endpoint));
    }
    let paths: Map<String, Value> = paths
        .into_iter()
        .map(|(path, item)| (path, Value::Object(item)))
        .collect();

    let tags: Vec<Value> = registry
        .tags()
        .into_iter()
        .map(|t| json!({ "name": t }))
        .collect();

    json!({
        "openapi": "3.0.1",
        "info": {
            "title": "E-Commerce Gateway",
            "version": "v1",
            "description": "Gateway for User and Product Services",
        },
        "tags": tags,
        "components": {
            "securitySchemes": {
                "Bearer": {
                    "type": "http",
                    "scheme": "bearer",
                    "bearerFormat": "JWT",
                    "description": "JWT Authorization header using the Bearer scheme",
                }
            }
        },
        "security": [{ "Bearer": [] }],
        "paths": paths,
    })
}

fn operation(endpoint: &EndpointDescriptor) -> Value {
    let mut op = Map::new();
    op.insert("tags".into(), json!([endpoint.tag]));
    op.insert("summary".into(), json!(endpoint.summary));

    if !endpoint.request_schema.is_empty() {
        let mut schema = schema_object(&endpoint.request_schema);
        if let Some(example) = &endpoint.example {
            schema.insert("example".into(), example.clone());
        }
        op.insert(
            "requestBody".into(),
            json!({
                "required": true,
                "content": {
                    "application/json": { "schema": Value::Object(schema) }
                }
            }),
        );
    }

    Value::Object(op)
}

fn schema_object(fields: &[FieldDescriptor]) -> Map<String, Value> {
    let mut properties = Map::new();
    for field in fields {
        properties.insert(field.name.clone(), field_schema(field));
    }
    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    schema
}

fn field_schema(field: &FieldDescriptor) -> Value {
    let mut schema = match &field.kind {
        FieldKind::String => {
            let mut m = Map::new();
            m.insert("type".into(), json!("string"));
            m
        }
        FieldKind::Integer => {
            let mut m = Map::new();
            m.insert("type".into(), json!("integer"));
            m
        }
        FieldKind::Number => {
            let mut m = Map::new();
            m.insert("type".into(), json!("number"));
            m
        }
        FieldKind::Boolean => {
            let mut m = Map::new();
            m.insert("type".into(), json!("boolean"));
            m
        }
        FieldKind::Object(nested) => schema_object(nested),
        FieldKind::Array(item) => {
            let mut m = Map::new();
            m.insert("type".into(), json!("array"));
            m.insert("items".into(), field_schema(item));
            m
        }
    };
    if let Some(format) = &field.format {
        schema.insert("format".into(), json!(format));
    }
    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{EndpointDescriptor, Method, SurfaceRegistry};

    fn registry() -> SurfaceRegistry {
        SurfaceRegistry::build(vec![
            EndpointDescriptor::new(Method::Post, "/user/login", "User", "User Login")
                .request_schema(vec![
                    FieldDescriptor::string("email").with_format("email"),
                    FieldDescriptor::string("password"),
                ])
                .example(json!({
                    "email": "john.doe@example.com",
                    "password": "Test@123",
                })),
            EndpointDescriptor::new(Method::Get, "/products", "Products", "Get All Products"),
            EndpointDescriptor::new(Method::Post, "/products", "Products", "Create Product")
                .request_schema(vec![
                    FieldDescriptor::string("name"),
                    FieldDescriptor::number("price"),
                ]),
        ])
        .unwrap()
    }

    #[test]
    fn render_is_byte_stable() {
        let registry = registry();
        assert_eq!(render(&registry), render(&registry));
    }

    #[test]
    fn operations_group_under_one_path_item() {
        let doc = document(&registry());
        let products = &doc["paths"]["/products"];
        assert!(products.get("get").is_some());
        assert!(products.get("post").is_some());
    }

    #[test]
    fn example_values_carried_verbatim() {
        let doc = document(&registry());
        let schema =
            &doc["paths"]["/user/login"]["post"]["requestBody"]["content"]["application/json"]
                ["schema"];
        assert_eq!(schema["example"]["email"], "john.doe@example.com");
        assert_eq!(schema["example"]["password"], "Test@123");
        assert_eq!(schema["properties"]["email"]["format"], "email");
    }

    #[test]
    fn bodyless_operation_has_no_request_body() {
        let doc = document(&registry());
        assert!(doc["paths"]["/products"]["get"].get("requestBody").is_none());
        assert_eq!(doc["paths"]["/products"]["get"]["summary"], "Get All Products");
    }

    #[test]
    fn bearer_scheme_declared_document_wide() {
        let doc = document(&registry());
        assert_eq!(
            doc["components"]["securitySchemes"]["Bearer"]["scheme"],
            "bearer"
        );
        assert_eq!(doc["security"][0]["Bearer"], json!([]));
    }

    #[test]
    fn nested_array_of_object_renders() {
        let registry = SurfaceRegistry::build(vec![EndpointDescriptor::new(
            Method::Post,
            "/user",
            "User",
            "Create User",
        )
        .request_schema(vec![FieldDescriptor::array(
            "address",
            FieldDescriptor::object(
                "item",
                vec![
                    FieldDescriptor::string("city"),
                    FieldDescriptor::integer("pincode"),
                ],
            ),
        )])])
        .unwrap();

        let doc = document(&registry);
        let address = &doc["paths"]["/user"]["post"]["requestBody"]["content"]
            ["application/json"]["schema"]["properties"]["address"];
        assert_eq!(address["type"], "array");
        assert_eq!(address["items"]["properties"]["city"]["type"], "string");
        assert_eq!(address["items"]["properties"]["pincode"]["type"], "integer");
    }
}
