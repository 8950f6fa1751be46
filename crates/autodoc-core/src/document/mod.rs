//! Document inputs and assembly
//!
//! Callers describe their API as [`SectionDescriptor`]s keyed by section and a
//! list of [`EndpointDescriptor`]s; [`DocAssembler`] turns them into one
//! Markdown document.

mod assembler;

pub use assembler::{render_models, DocAssembler};

use crate::model::{ApiModel, Ty};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Section metadata keyed by section key
pub type Sections = BTreeMap<String, SectionDescriptor>;

/// A documentation section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// Sort key; sections print in ascending order
    #[serde(rename = "index")]
    pub display_index: i64,
    pub title: String,
}

impl SectionDescriptor {
    pub fn new(display_index: i64, title: impl Into<String>) -> Self {
        Self {
            display_index,
            title: title.into(),
        }
    }
}

/// An example payload together with the type it documents.
///
/// The JSON text is produced when the example is built; a serialization
/// failure is kept and reported when the endpoint is rendered.
#[derive(Debug, Clone)]
pub struct Example {
    json: Option<Result<String, String>>,
    ty: Ty,
}

impl Example {
    /// Example from a live value
    pub fn of<T: Serialize + ApiModel + ?Sized>(value: &T) -> Self {
        Self {
            json: Some(serde_json::to_string_pretty(value).map_err(|e| e.to_string())),
            ty: T::ty(),
        }
    }

    /// Example from an already-parsed JSON value documented as `ty`
    pub fn from_json(value: &serde_json::Value, ty: Ty) -> Self {
        Self {
            json: Some(serde_json::to_string_pretty(value).map_err(|e| e.to_string())),
            ty,
        }
    }

    /// Document the type only, without example text
    pub fn shape(ty: Ty) -> Self {
        Self { json: None, ty }
    }

    /// Pretty-printed JSON, the serialization error, or `None` for shape-only
    /// examples
    pub fn json(&self) -> Option<Result<&str, &str>> {
        self.json
            .as_ref()
            .map(|r| r.as_deref().map_err(String::as_str))
    }

    pub fn ty(&self) -> &Ty {
        &self.ty
    }
}

/// One documented endpoint
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// Sort key within the section; higher indexes print first
    pub sequence_index: i64,
    pub title: String,
    pub section_key: String,
    pub description: String,
    pub http_method: String,
    pub uri: String,
    pub request: Option<Example>,
    pub response: Option<Example>,
}

impl EndpointDescriptor {
    pub fn new(
        sequence_index: i64,
        title: impl Into<String>,
        section_key: impl Into<String>,
        http_method: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            sequence_index,
            title: title.into(),
            section_key: section_key.into(),
            description: String::new(),
            http_method: http_method.into(),
            uri: uri.into(),
            request: None,
            response: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn request(mut self, example: Example) -> Self {
        self.request = Some(example);
        self
    }

    pub fn response(mut self, example: Example) -> Self {
        self.response = Some(example);
        self
    }

    /// Request examples are never printed for GET endpoints
    pub fn is_get(&self) -> bool {
        self.http_method.eq_ignore_ascii_case("GET")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scalar;

    #[test]
    fn test_example_of_value() {
        let example = Example::of(&vec![1u8, 2]);
        assert_eq!(example.json(), Some(Ok("[\n  1,\n  2\n]")));
        assert_eq!(example.ty().label(), "Vec<u8>");
    }

    #[test]
    fn test_shape_only_example() {
        let example = Example::shape(Ty::Scalar(Scalar::Bool));
        assert!(example.json().is_none());
    }

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("broken value"))
        }
    }

    impl ApiModel for Broken {
        fn ty() -> Ty {
            Ty::Scalar(Scalar::String)
        }
    }

    #[test]
    fn test_failed_serialization_is_kept() {
        let example = Example::of(&Broken);
        assert_eq!(example.json(), Some(Err("broken value")));

        let example = Example::from_json(&serde_json::json!({"ok": true}), Ty::Scalar(Scalar::Bool));
        assert_eq!(example.json(), Some(Ok("{\n  \"ok\": true\n}")));
    }

    #[test]
    fn test_get_detection() {
        let ep = EndpointDescriptor::new(1, "List", "users", "get", "/users");
        assert!(ep.is_get());
        let ep = EndpointDescriptor::new(1, "Create", "users", "POST", "/users");
        assert!(!ep.is_get());
    }
}
