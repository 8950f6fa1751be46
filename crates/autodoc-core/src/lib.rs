//! Autodoc Core - Markdown API documentation from model descriptions
//!
//! This crate turns described request and response types into Markdown API
//! documents: one block per endpoint, with a field table for every struct
//! shape reachable from the payload types.
//!
//! # Main Components
//!
//! - **Model descriptions**: [`ApiModel`] / [`ApiStruct`] describe Rust types
//!   as [`Ty`] expressions and [`StructDesc`] field lists
//! - **Walker**: discovers every nested struct shape once, in a stable order
//! - **Tables**: Markdown tables padded to the widest row
//! - **Assembler**: groups endpoints into sections and renders the document
//! - **Manifests**: the same inputs declared in YAML or JSON
//!
//! # Example
//!
//! ```
//! use autodoc_core::{
//!     api_struct, ApiStruct, DocAssembler, EndpointDescriptor, Example, FieldDesc, Locale,
//!     SectionDescriptor, Sections, StructDesc,
//! };
//!
//! #[derive(serde::Serialize)]
//! struct Pong {
//!     ok: bool,
//! }
//!
//! impl ApiStruct for Pong {
//!     fn describe() -> StructDesc {
//!         StructDesc::named("health", "Pong")
//!             .field(FieldDesc::of::<bool>("ok").json("ok").note("service is up"))
//!     }
//! }
//!
//! api_struct!(Pong);
//!
//! let mut sections = Sections::new();
//! sections.insert("health".to_string(), SectionDescriptor::new(1, "Health"));
//! let endpoints = vec![EndpointDescriptor::new(1, "Ping", "health", "GET", "/ping")
//!     .response(Example::of(&Pong { ok: true }))];
//!
//! let doc = DocAssembler::new(Locale::English).assemble("Service", &sections, &endpoints);
//! assert!(doc.starts_with("# Service\n\n## Health\n\n### Ping"));
//! assert!(doc.contains("|ok|bool|service is up|"));
//! ```

pub mod document;
pub mod enums;
pub mod error;
pub mod locale;
pub mod manifest;
pub mod model;
pub mod table;
pub mod walker;

// Re-export main types for convenience
pub use document::{
    render_models, DocAssembler, EndpointDescriptor, Example, SectionDescriptor, Sections,
};
pub use enums::{EnumRegistry, EnumTable};
pub use error::{Error, Result};
pub use locale::{EndpointBlock, Locale};
pub use manifest::{parse_type, ApiManifest, ManifestFile};
pub use model::{
    ApiModel, ApiStruct, FieldDesc, MapKind, ModelCatalog, Scalar, StructDesc, StructRef, Ty,
    Wrapper,
};
pub use table::render_table;
pub use walker::{FieldRow, ModelRecord, Walker};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
