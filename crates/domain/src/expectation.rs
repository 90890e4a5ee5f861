//! Declarative expectations over resource responses.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::request::HttpMethod;

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

impl From<u16> for StatusExpectation {
    fn from(code: u16) -> Self {
        Self::Exact(code)
    }
}

/// A required field, optionally with required sub-fields of its own.
///
/// `FieldSpec::nested("address", [FieldSpec::nested("geo", ["lat", "lng"])])`
/// requires `address` to be an object holding `geo`, which in turn holds
/// `lat` and `lng`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name within the enclosing object.
    pub name: String,
    /// Fields the value itself must contain. Empty for leaf fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl FieldSpec {
    /// A leaf field that only has to be present.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// A field whose value must be an object containing `children`.
    #[must_use]
    pub fn nested<I, F>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Self>,
    {
        Self {
            name: name.into(),
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds leaf specs for every name.
    #[must_use]
    pub fn all(names: &[&str]) -> Vec<Self> {
        names.iter().map(|name| Self::new(*name)).collect()
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.children.is_empty() {
            let inner: Vec<_> = self.children.iter().map(ToString::to_string).collect();
            write!(f, "{{{}}}", inner.join(", "))?;
        }
        Ok(())
    }
}

/// Dotted path to a value inside a record, e.g. `address.geo.lat`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Parses a dotted path.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFieldPath` when the path or any of its
    /// segments is empty.
    pub fn parse(path: &str) -> DomainResult<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(DomainError::InvalidFieldPath(path.to_string()));
        }
        Ok(Self(segments))
    }

    /// A single top-level field. Dots in `name` are kept literally.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Resolves the path against a JSON value.
    #[must_use]
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(record, |current, segment| current.as_object()?.get(segment))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

/// Structural shape the response body must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    /// Body is not inspected.
    #[default]
    Any,
    /// Body is a single JSON object.
    Record,
    /// Body is a non-empty JSON array; field checks apply to its first element.
    Sequence,
}

/// What a response must satisfy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Expectation {
    /// Expected status.
    pub status: StatusExpectation,
    /// Expected body shape.
    #[serde(default)]
    pub shape: BodyShape,
    /// Fields that must be present.
    #[serde(default)]
    pub required_fields: Vec<FieldSpec>,
    /// Field values that must match exactly.
    #[serde(default)]
    pub expected_values: Vec<(FieldPath, Value)>,
}

impl Expectation {
    /// Starts an expectation with the given status.
    #[must_use]
    pub fn status(status: impl Into<StatusExpectation>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    /// Requires a single-object body.
    #[must_use]
    pub const fn record(mut self) -> Self {
        self.shape = BodyShape::Record;
        self
    }

    /// Requires a non-empty array body.
    #[must_use]
    pub const fn sequence(mut self) -> Self {
        self.shape = BodyShape::Sequence;
        self
    }

    /// Adds required fields.
    #[must_use]
    pub fn require<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.required_fields
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Adds an expected value for a field path.
    #[must_use]
    pub fn value(mut self, path: FieldPath, expected: impl Into<Value>) -> Self {
        self.expected_values.push((path, expected.into()));
        self
    }

    /// Adds one expected value per top-level payload field.
    #[must_use]
    pub fn echoes(mut self, payload: &crate::request::Payload) -> Self {
        for (name, value) in payload.iter() {
            self.expected_values
                .push((FieldPath::field(name.clone()), value.clone()));
        }
        self
    }
}

/// High-level resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Read the whole collection.
    List,
    /// Read one entity.
    Get,
    /// Create an entity.
    Create,
    /// Replace an entity.
    Update,
    /// Remove an entity.
    Delete,
}

impl Operation {
    /// HTTP verb the operation maps to.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::List | Self::Get => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Success status a particular service returns for each operation.
///
/// Defaults follow the JSONPlaceholder convention, including `200` for
/// delete where plain REST would use `204`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConventions {
    /// Status for list.
    pub list: StatusExpectation,
    /// Status for get.
    pub get: StatusExpectation,
    /// Status for create.
    pub create: StatusExpectation,
    /// Status for update.
    pub update: StatusExpectation,
    /// Status for delete.
    pub delete: StatusExpectation,
}

impl ServiceConventions {
    /// Returns the expected status for an operation.
    #[must_use]
    pub const fn expected_for(&self, operation: Operation) -> &StatusExpectation {
        match operation {
            Operation::List => &self.list,
            Operation::Get => &self.get,
            Operation::Create => &self.create,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    /// Overrides the expected status of one operation.
    #[must_use]
    pub fn with(mut self, operation: Operation, status: impl Into<StatusExpectation>) -> Self {
        let status = status.into();
        match operation {
            Operation::List => self.list = status,
            Operation::Get => self.get = status,
            Operation::Create => self.create = status,
            Operation::Update => self.update = status,
            Operation::Delete => self.delete = status,
        }
        self
    }
}

impl Default for ServiceConventions {
    fn default() -> Self {
        Self {
            list: StatusExpectation::exact(200),
            get: StatusExpectation::exact(200),
            create: StatusExpectation::exact(201),
            update: StatusExpectation::exact(200),
            delete: StatusExpectation::exact(200),
        }
    }
}
