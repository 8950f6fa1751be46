//! Markdown document assembly
//!
//! Endpoints are grouped by section key. Sections print in ascending display
//! index, endpoints within a section in descending sequence index. Each
//! endpoint is rendered through the locale's template with its request and
//! response model tables and JSON examples.

use super::{EndpointDescriptor, Example, SectionDescriptor, Sections};
use crate::enums::{EnumRegistry, EnumTable};
use crate::error::Result;
use crate::locale::{EndpointBlock, Locale};
use crate::model::{ModelCatalog, Ty};
use crate::table::render_table;
use crate::walker::{ModelRecord, Walker};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

static EMPTY_CATALOG: ModelCatalog = ModelCatalog::new();
static NO_ENUMS: EnumTable = EnumTable::new();

/// Render every record as `<name>\n\n<table>`.
///
/// The first (root) record is printed without a name: the endpoint heading
/// already introduces it.
pub fn render_models<S: AsRef<str>>(records: &[ModelRecord], header: &[S]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let name = if i == 0 { "" } else { record.display_name() };
            format!("{}\n\n{}", name, render_table(header, &record.table_rows()))
        })
        .collect()
}

/// Builds Markdown API documentation
pub struct DocAssembler<'a> {
    locale: Locale,
    catalog: &'a ModelCatalog,
    enums: &'a dyn EnumRegistry,
}

impl<'a> DocAssembler<'a> {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            catalog: &EMPTY_CATALOG,
            enums: &NO_ENUMS,
        }
    }

    /// Catalog used to resolve models referenced by name
    pub fn with_catalog(mut self, catalog: &'a ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Registry used to list enumeration tokens in notes
    pub fn with_enums(mut self, enums: &'a dyn EnumRegistry) -> Self {
        self.enums = enums;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// A fresh walker sharing this assembler's locale, catalog and enums
    pub fn walker(&self) -> Walker<'a> {
        Walker::new(self.locale)
            .with_catalog(self.catalog)
            .with_enums(self.enums)
    }

    /// Model tables for `ty`, joined with blank lines
    pub fn model_text(&self, ty: &Ty) -> String {
        let records = self.walker().walk(ty);
        render_models(&records, &self.locale.table_header()).join("\n\n")
    }

    /// Render the whole document
    #[instrument(skip(self, sections, endpoints), fields(locale = %self.locale, endpoints = endpoints.len()))]
    pub fn assemble(
        &self,
        title: &str,
        sections: &Sections,
        endpoints: &[EndpointDescriptor],
    ) -> String {
        let mut grouped: BTreeMap<&str, Vec<&EndpointDescriptor>> = BTreeMap::new();
        for endpoint in endpoints {
            grouped
                .entry(endpoint.section_key.as_str())
                .or_default()
                .push(endpoint);
        }

        let mut ordered: Vec<(&str, SectionDescriptor, Vec<&EndpointDescriptor>)> = grouped
            .into_iter()
            .map(|(key, mut docs)| {
                docs.sort_by(|a, b| b.sequence_index.cmp(&a.sequence_index));
                let section = sections.get(key).cloned().unwrap_or_else(|| {
                    warn!(section = key, "no section metadata, using the key as title");
                    SectionDescriptor::new(0, key)
                });
                (key, section, docs)
            })
            .collect();
        ordered.sort_by(|a, b| {
            a.1.display_index
                .cmp(&b.1.display_index)
                .then_with(|| a.0.cmp(b.0))
        });

        let mut doc = format!("# {}\n\n", title);
        for (_, section, docs) in &ordered {
            doc.push_str(&self.render_section(&section.title, docs));
            doc.push_str("\n\n");
        }

        info!(sections = ordered.len(), bytes = doc.len(), "document assembled");
        doc
    }

    /// Render one section: its heading followed by every endpoint block
    pub fn render_section(&self, title: &str, endpoints: &[&EndpointDescriptor]) -> String {
        let mut s = format!("## {}\n\n", title);
        for endpoint in endpoints {
            s.push_str(&self.render_endpoint(endpoint));
        }
        s
    }

    /// Render one endpoint through the locale template
    pub fn render_endpoint(&self, endpoint: &EndpointDescriptor) -> String {
        debug!(endpoint = %endpoint.title, method = %endpoint.http_method, "rendering endpoint");

        let mut request_model = String::new();
        let mut request_example = String::new();
        if let Some(request) = &endpoint.request {
            if let Some(json) = self.example_json(endpoint, request, "request") {
                if !endpoint.is_get() {
                    request_example = format!("```\n{}\n```", json);
                }
            }
            request_model = self.model_text(request.ty());
        }

        let mut response_model = String::new();
        let mut response_example = String::new();
        if let Some(response) = &endpoint.response {
            if let Some(json) = self.example_json(endpoint, response, "response") {
                response_example = format!("```\n{}\n```\n", json);
            }
            response_model = self.model_text(response.ty());
        }

        self.locale.render_endpoint(&EndpointBlock {
            name: &endpoint.title,
            description: &endpoint.description,
            uri: &endpoint.uri,
            method: &endpoint.http_method,
            request_model: &request_model,
            request_example: &request_example,
            response_model: &response_model,
            response_example: &response_example,
        })
    }

    fn example_json<'e>(
        &self,
        endpoint: &EndpointDescriptor,
        example: &'e Example,
        kind: &str,
    ) -> Option<&'e str> {
        match example.json()? {
            Ok(json) => Some(json),
            Err(err) => {
                error!(
                    endpoint = %endpoint.title,
                    uri = %endpoint.uri,
                    kind,
                    error = err,
                    "example marshal error"
                );
                None
            }
        }
    }

    /// Render the document into `out`
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        title: &str,
        sections: &Sections,
        endpoints: &[EndpointDescriptor],
    ) -> Result<()> {
        let doc = self.assemble(title, sections, endpoints);
        out.write_all(doc.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Render the document and write it to `path`, replacing any previous
    /// content. Failing to create the file aborts the whole generation.
    #[instrument(skip(self, path, sections, endpoints), fields(path = %path.as_ref().display()))]
    pub fn generate(
        &self,
        path: impl AsRef<Path>,
        title: &str,
        sections: &Sections,
        endpoints: &[EndpointDescriptor],
    ) -> Result<()> {
        let path = path.as_ref();
        let doc = self.assemble(title, sections, endpoints);

        let mut file = File::create(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "open doc file fail");
            e
        })?;
        file.write_all(doc.as_bytes())?;
        file.flush()?;

        info!(path = %path.display(), bytes = doc.len(), "documentation written");
        Ok(())
    }
}
