//! API manifests
//!
//! A manifest describes an API without any Rust types: models are declared
//! as field lists with type expressions (see [`type_expr`]), enumerations as
//! token lists, and endpoints reference models by expression. It is the
//! input format of the command-line tool.
//!
//! ```yaml
//! title: Account Service
//! sections:
//!   users: { index: 1, title: Users }
//! enums:
//!   user_status: [active, locked]
//! models:
//!   - name: User
//!     namespace: accounts
//!     fields:
//!       - { name: id, json: id, type: u64, note: "user id" }
//!       - { name: status, json: status, type: String, enum: user_status }
//! endpoints:
//!   - index: 1
//!     title: Get user
//!     section: users
//!     method: GET
//!     uri: /users/{id}
//!     response:
//!       model: User
//!       example: { id: 7, status: active }
//! ```

pub mod type_expr;

pub use type_expr::parse_type;

use crate::document::{DocAssembler, EndpointDescriptor, Example, Sections};
use crate::enums::EnumTable;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::model::{FieldDesc, ModelCatalog, StructDesc, StructRef, Ty};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Manifest file as written on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestFile {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub models: Vec<ModelSpec>,
    #[serde(default)]
    pub endpoints: Vec<EndpointSpec>,
}

/// A named model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// A model field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    /// Serialization tag; an absent tag documents the field with an empty name
    #[serde(default)]
    pub json: String,
    #[serde(rename = "type")]
    pub ty: TypeSpec,
    #[serde(default)]
    pub note: String,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_key: Option<String>,
    #[serde(default)]
    pub flatten: bool,
}

/// A field type: an expression or an anonymous inline shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    Expr(String),
    Inline(InlineSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InlineSpec {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// An endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointSpec {
    pub index: i64,
    pub title: String,
    pub section: String,
    #[serde(default)]
    pub description: String,
    pub method: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<PayloadSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<PayloadSpec>,
}

/// Request or response payload: a type expression and an optional example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayloadSpec {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// Manifest format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// `.json` selects JSON; everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// A manifest with its models resolved and validated
#[derive(Debug, Clone)]
pub struct ApiManifest {
    pub title: String,
    pub sections: Sections,
    pub enums: EnumTable,
    pub catalog: ModelCatalog,
    pub endpoints: Vec<EndpointDescriptor>,
}

impl ApiManifest {
    /// Load and resolve a manifest file
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Io {
            message: format!("Failed to read manifest {}", path.display()),
            source: e,
        })?;

        let file = match ManifestFormat::from_path(path) {
            ManifestFormat::Json => serde_json::from_str::<ManifestFile>(&text)?,
            ManifestFormat::Yaml => serde_yaml::from_str::<ManifestFile>(&text)?,
        };
        debug!(
            models = file.models.len(),
            endpoints = file.endpoints.len(),
            "manifest parsed"
        );
        Self::resolve(file)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::resolve(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::resolve(serde_json::from_str(text)?)
    }

    /// Turn the on-disk form into documentation inputs.
    ///
    /// Every model reference must name a declared model. Endpoints naming a
    /// section without metadata are kept; the assembler titles them by key.
    pub fn resolve(file: ManifestFile) -> Result<Self> {
        let mut catalog = ModelCatalog::new();
        for model in &file.models {
            let desc = StructDesc::new(model.namespace.clone(), Some(model.name.clone()));
            let desc = convert_fields(&model.fields)?
                .into_iter()
                .fold(desc, StructDesc::field);
            catalog.insert(desc)?;
        }

        for name in catalog.names() {
            if let Some(desc) = catalog.get(name) {
                check_fields(&desc, &catalog, &format!("model `{}`", name))?;
            }
        }

        let mut enums = EnumTable::new();
        for (key, tokens) in &file.enums {
            enums.insert(key.clone(), tokens.iter().cloned());
        }

        let mut endpoints = Vec::with_capacity(file.endpoints.len());
        for spec in &file.endpoints {
            if !file.sections.contains_key(&spec.section) {
                warn!(
                    endpoint = %spec.title,
                    section = %spec.section,
                    "endpoint references a section without metadata"
                );
            }

            let mut endpoint = EndpointDescriptor::new(
                spec.index,
                spec.title.clone(),
                spec.section.clone(),
                spec.method.clone(),
                spec.uri.clone(),
            )
            .description(spec.description.clone());

            let context = format!("endpoint `{}`", spec.title);
            if let Some(payload) = &spec.request {
                endpoint = endpoint.request(payload_example(payload, &catalog, &context)?);
            }
            if let Some(payload) = &spec.response {
                endpoint = endpoint.response(payload_example(payload, &catalog, &context)?);
            }
            endpoints.push(endpoint);
        }

        info!(
            models = catalog.len(),
            enums = enums.len(),
            endpoints = endpoints.len(),
            "manifest resolved"
        );

        Ok(Self {
            title: file.title,
            sections: file.sections,
            enums,
            catalog,
            endpoints,
        })
    }

    /// Assembler wired to this manifest's catalog and enumerations
    pub fn assembler(&self, locale: Locale) -> DocAssembler<'_> {
        DocAssembler::new(locale)
            .with_catalog(&self.catalog)
            .with_enums(&self.enums)
    }

    /// Render the full document
    pub fn render(&self, locale: Locale) -> String {
        self.assembler(locale)
            .assemble(&self.title, &self.sections, &self.endpoints)
    }

    /// Render the full document to `path`
    pub fn generate(&self, path: impl AsRef<Path>, locale: Locale) -> Result<()> {
        self.assembler(locale)
            .generate(path, &self.title, &self.sections, &self.endpoints)
    }

    /// Model tables for a single type expression
    pub fn model_text(&self, expr: &str, locale: Locale) -> Result<String> {
        let ty = parse_type(expr)?;
        check_ty(&ty, &self.catalog, "the command line")?;
        Ok(self.assembler(locale).model_text(&ty))
    }
}

fn convert_fields(fields: &[FieldSpec]) -> Result<Vec<FieldDesc>> {
    fields.iter().map(convert_field).collect()
}

fn convert_field(spec: &FieldSpec) -> Result<FieldDesc> {
    let ty = match &spec.ty {
        TypeSpec::Expr(expr) => parse_type(expr)?,
        TypeSpec::Inline(inline) => Ty::inline(
            convert_fields(&inline.fields)?
                .into_iter()
                .fold(StructDesc::anonymous(), StructDesc::field),
        ),
    };

    let mut field = FieldDesc::new(spec.name.clone(), ty)
        .json(spec.json.clone())
        .note(spec.note.clone());
    if let Some(key) = &spec.enum_key {
        field = field.enum_key(key.clone());
    }
    if spec.flatten {
        field = field.flatten();
    }
    Ok(field)
}

fn payload_example(payload: &PayloadSpec, catalog: &ModelCatalog, context: &str) -> Result<Example> {
    let ty = parse_type(&payload.model)?;
    check_ty(&ty, catalog, context)?;
    Ok(match &payload.example {
        Some(value) => Example::from_json(value, ty),
        None => Example::shape(ty),
    })
}

fn check_fields(desc: &StructDesc, catalog: &ModelCatalog, context: &str) -> Result<()> {
    desc.fields
        .iter()
        .try_for_each(|field| check_ty(&field.ty, catalog, context))
}

/// Reject references to models the catalog does not hold
fn check_ty(ty: &Ty, catalog: &ModelCatalog, context: &str) -> Result<()> {
    match ty {
        Ty::Scalar(_) | Ty::Unsupported(_) => Ok(()),
        Ty::Wrapped { inner, .. } | Ty::Array { inner, .. } => check_ty(inner, catalog, context),
        Ty::Map { key, value, .. } => {
            check_ty(key, catalog, context)?;
            check_ty(value, catalog, context)
        }
        Ty::Struct(StructRef::Named(name)) if !catalog.contains(name) => Err(Error::UnknownModel {
            name: name.clone(),
            context: context.to_string(),
        }),
        Ty::Struct(StructRef::Inline(desc)) => check_fields(desc, catalog, context),
        Ty::Struct(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"
title: Shop
sections:
  orders: { index: 2, title: Orders }
enums:
  order_state: [open, paid]
models:
  - name: Order
    namespace: shop
    fields:
      - { name: id, json: id, type: u64, note: "order id" }
      - { name: state, json: state, type: String, enum: order_state }
      - name: lines
        json: lines
        type:
          fields:
            - { name: sku, json: sku, type: String }
endpoints:
  - index: 1
    title: Get order
    section: orders
    method: GET
    uri: /orders/{id}
    response:
      model: Order
      example: { id: 1, state: open, lines: { sku: A1 } }
"#;

    #[test]
    fn test_resolve_yaml() {
        let manifest = ApiManifest::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(manifest.title, "Shop");
        assert_eq!(manifest.catalog.len(), 1);
        assert_eq!(manifest.enums.len(), 1);
        assert_eq!(manifest.endpoints.len(), 1);

        let order = manifest.catalog.get("Order").unwrap();
        assert_eq!(order.identity(), "shop::Order");
        assert_eq!(order.fields.len(), 3);
        assert!(order.fields[2].ty.label().starts_with("struct {"));
    }

    #[test]
    fn test_model_text_uses_enums() {
        let manifest = ApiManifest::from_yaml_str(MANIFEST).unwrap();
        let text = manifest.model_text("Order", Locale::English).unwrap();
        assert!(text.contains("|state|String| Type Enum[open paid]|"));
        assert!(text.contains("\n\nlines0\n\n|"));
    }

    #[test]
    fn test_unknown_model_rejected() {
        let text = r#"
title: Bad
models:
  - name: A
    fields:
      - { name: b, json: b, type: "Vec<B>" }
"#;
        match ApiManifest::from_yaml_str(text) {
            Err(Error::UnknownModel { name, context }) => {
                assert_eq!(name, "B");
                assert_eq!(context, "model `A`");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_model_rejected() {
        let text = r#"
title: Bad
models:
  - { name: A }
  - { name: A }
"#;
        assert!(matches!(
            ApiManifest::from_yaml_str(text),
            Err(Error::DuplicateModel { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let text = "title: Bad\nmodles: []\n";
        assert!(matches!(
            ApiManifest::from_yaml_str(text),
            Err(Error::Manifest { .. })
        ));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ManifestFormat::from_path(Path::new("api.json")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("api.yml")), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path(Path::new("api")), ManifestFormat::Yaml);
    }
}
