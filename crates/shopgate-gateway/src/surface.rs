//! The gateway's declared public surface: three endpoint groups (User,
//! Products, Categories) with the literal request schemas and example
//! payloads consumers rely on, plus the authentication bypass list.

use serde_json::json;
use shopgate::{
    BypassRule, EndpointDescriptor, FieldDescriptor, Method, SurfaceError, SurfaceRegistry,
};

/// Paths exempt from authentication. Login only — everything else behind
/// the gate.
pub fn bypass_rules() -> Vec<BypassRule> {
    vec![BypassRule::any_method("/user/login")]
}

/// Build the full surface registry. Deterministic; fails fast on a
/// duplicate (path, method) entry.
pub fn registry() -> Result<SurfaceRegistry, SurfaceError> {
    let mut endpoints = Vec::new();
    endpoints.extend(user_endpoints());
    endpoints.extend(product_endpoints());
    endpoints.extend(category_endpoints());
    SurfaceRegistry::build(endpoints)
}

fn user_endpoints() -> Vec<EndpointDescriptor> {
    let address_item = FieldDescriptor::object(
        "address",
        vec![
            FieldDescriptor::string("name"),
            FieldDescriptor::string("type"),
            FieldDescriptor::integer("phone"),
            FieldDescriptor::string("line1"),
            FieldDescriptor::string("line2"),
            FieldDescriptor::string("city"),
            FieldDescriptor::integer("pincode"),
            FieldDescriptor::string("state"),
            FieldDescriptor::string("country"),
        ],
    );

    vec![
        EndpointDescriptor::new(Method::Post, "/user/login", "User", "User Login")
            .request_schema(vec![
                FieldDescriptor::string("email").with_format("email"),
                FieldDescriptor::string("password"),
            ])
            .example(json!({
                "email": "john.doe@example.com",
                "password": "Test@123",
            })),
        EndpointDescriptor::new(Method::Post, "/user", "User", "Create User")
            .request_schema(vec![
                FieldDescriptor::string("firstName"),
                FieldDescriptor::string("lastName"),
                FieldDescriptor::string("email").with_format("email"),
                FieldDescriptor::string("password"),
                FieldDescriptor::integer("phone"),
                FieldDescriptor::string("role"),
                FieldDescriptor::array("address", address_item),
            ])
            .example(json!({
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com",
                "password": "Test@123",
                "phone": 1234567890,
                "role": "user",
                "address": [
                    {
                        "name": "Home",
                        "type": "residential",
                        "phone": 1234567890,
                        "line1": "123 Main St",
                        "line2": "Apt 4B",
                        "city": "Bangalore",
                        "pincode": 560001,
                        "state": "Karnataka",
                        "country": "India",
                    }
                ],
            })),
        EndpointDescriptor::new(Method::Get, "/user", "User", "Get All Users"),
    ]
}

fn product_endpoints() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::new(Method::Post, "/products", "Products", "Create Product")
            .request_schema(vec![
                FieldDescriptor::string("name"),
                FieldDescriptor::string("description"),
                FieldDescriptor::number("price"),
                FieldDescriptor::string("categoryId"),
            ])
            .example(json!({
                "name": "Sample Product",
                "description": "Product Description",
                "price": 99.99,
                "categoryId": "category123",
            })),
        EndpointDescriptor::new(Method::Get, "/products", "Products", "Get All Products"),
    ]
}

fn category_endpoints() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::new(Method::Post, "/categories", "Categories", "Create Category")
            .request_schema(vec![
                FieldDescriptor::string("name"),
                FieldDescriptor::string("description"),
            ])
            .example(json!({
                "name": "Electronics",
                "description": "Electronic Products Category",
            })),
        EndpointDescriptor::new(Method::Get, "/categories", "Categories", "Get All Categories"),
    ]
}
