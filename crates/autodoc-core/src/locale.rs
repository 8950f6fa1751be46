//! Locales: endpoint template, table header and enum label
//!
//! A locale is chosen once by the caller and passed to the assembler; there
//! is no process-wide switch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in documentation locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    English,
    #[default]
    Chinese,
}

/// Text pieces substituted into the endpoint template
#[derive(Debug, Clone, Default)]
pub struct EndpointBlock<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub uri: &'a str,
    pub method: &'a str,
    pub request_model: &'a str,
    pub request_example: &'a str,
    pub response_model: &'a str,
    pub response_example: &'a str,
}

impl Locale {
    /// Resolve a locale code. `"english"` selects English; any other code,
    /// including the empty string, falls back to the default locale.
    pub fn from_code(code: &str) -> Self {
        match code {
            "english" => Locale::English,
            _ => Locale::default(),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "english",
            Locale::Chinese => "chinese",
        }
    }

    /// Column labels for model tables: field, type, note
    pub fn table_header(self) -> [&'static str; 3] {
        match self {
            Locale::English => ["Field Name", "Type", "Remark"],
            Locale::Chinese => ["字段名", "类型", "备注"],
        }
    }

    /// Label placed before an enumeration's token list
    pub fn enum_label(self) -> &'static str {
        match self {
            Locale::English => "Type Enum",
            Locale::Chinese => "枚举类型",
        }
    }

    /// Render one endpoint block
    pub fn render_endpoint(self, block: &EndpointBlock<'_>) -> String {
        match self {
            Locale::English => format!(
                "### {name}\n\n\
                 {description}\n\n\
                 #### Request URL:\n\
                 - {uri}\n\n\
                 #### Request Method:\n\
                 - {method}\n\n\
                 #### Request Parameters:\n\n\
                 {request_model}\n\n\
                 #### Request Example:\n\n\
                 {request_example}\n\n\
                 #### Return Parameters:\n\n\
                 {response_model}\n\n\
                 #### Response Example:\n\n\
                 {response_example}\n\n\
                 ------\n",
                name = block.name,
                description = block.description,
                uri = block.uri,
                method = block.method,
                request_model = block.request_model,
                request_example = block.request_example,
                response_model = block.response_model,
                response_example = block.response_example,
            ),
            Locale::Chinese => format!(
                "### {name}\n\n\
                 {description}\n\n\
                 #### 请求URL:\n\
                 - {uri}\n\n\
                 #### 请求方式:\n\
                 - {method}\n\n\
                 #### 请求参数:\n\n\
                 {request_model}\n\n\
                 #### 请求示例:\n\n\
                 {request_example}\n\n\
                 #### 返回参数:\n\n\
                 {response_model}\n\n\
                 #### 返回示例:\n\n\
                 {response_example}\n\n\
                 ------\n",
                name = block.name,
                description = block.description,
                uri = block.uri,
                method = block.method,
                request_model = block.request_model,
                request_example = block.request_example,
                response_model = block.response_model,
                response_example = block.response_example,
            ),
        }
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Locale::from_code(s))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
