//! Declarative registry of the gateway's externally exposed API surface.
//!
//! The registry is the gateway's public contract: every path, method,
//! request schema, and literal example a caller may rely on, independent
//! of how the backends are routed internally. It is built once at startup
//! and read-only thereafter.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// HTTP method of a declared operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Lowercase form, as OpenAPI path items key their operations.
    pub fn key(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Delete => "delete",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// Type tag of a request-body field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// Composite object with nested fields.
    Object(Vec<FieldDescriptor>),
    /// Homogeneous array of the given item shape.
    Array(Box<FieldDescriptor>),
}

/// One named field of a request schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Format hint, e.g. `email`.
    pub format: Option<String>,
}

impl FieldDescriptor {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            format: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn object(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(name, FieldKind::Object(fields))
    }

    pub fn array(name: impl Into<String>, item: FieldDescriptor) -> Self {
        Self::new(name, FieldKind::Array(Box::new(item)))
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// One public path+method entry of the surface.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    pub path: String,
    pub method: Method,
    pub tag: String,
    pub summary: String,
    /// Empty when the operation takes no request body.
    pub request_schema: Vec<FieldDescriptor>,
    /// Literal example payload, carried verbatim into the rendered document.
    pub example: Option<Value>,
}

impl EndpointDescriptor {
    pub fn new(
        method: Method,
        path: impl Into<String>,
        tag: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            method,
            tag: tag.into(),
            summary: summary.into(),
            request_schema: Vec::new(),
            example: None,
        }
    }

    pub fn request_schema(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.request_schema = fields;
        self
    }

    pub fn example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

/// Registry construction failure. Fatal at startup: a duplicate entry is a
/// programming defect, never silently overwritten.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("duplicate endpoint: {method} {path}")]
    DuplicateEndpoint { method: Method, path: String },
}

/// Ordered, immutable sequence of endpoint descriptors with a unique
/// (path, method) per entry.
#[derive(Debug, Clone)]
pub struct SurfaceRegistry {
    endpoints: Vec<EndpointDescriptor>,
}

impl SurfaceRegistry {
    /// Deterministic, I/O-free construction; rejects duplicates.
    pub fn build(endpoints: Vec<EndpointDescriptor>) -> Result<Self, SurfaceError> {
        let mut seen = HashSet::new();
        for e in &endpoints {
            if !seen.insert((e.path.clone(), e.method)) {
                return Err(SurfaceError::DuplicateEndpoint {
                    method: e.method,
                    path: e.path.clone(),
                });
            }
        }
        Ok(Self { endpoints })
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    /// Tag names in first-declared order, deduplicated.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.endpoints
            .iter()
            .filter(|e| seen.insert(e.tag.as_str()))
            .map(|e| e.tag.as_str())
            .collect()
    }
}
