//! Static type descriptions
//!
//! Documented payload types describe their own shape once through
//! [`ApiStruct::describe`]; everything else (scalars, std containers) gets an
//! [`ApiModel`] implementation from this crate. Struct references stay lazy
//! ([`StructRef::Described`] holds a function pointer), so self-referencing and
//! mutually-referencing types can be described without infinite recursion.
//!
//! # Example
//!
//! ```rust
//! use autodoc_core::model::{ApiStruct, FieldDesc, StructDesc};
//! use autodoc_core::api_struct;
//!
//! struct Login {
//!     user: String,
//!     remember: bool,
//! }
//!
//! impl ApiStruct for Login {
//!     fn describe() -> StructDesc {
//!         StructDesc::named(module_path!(), "Login")
//!             .field(FieldDesc::of::<String>("user").json("user").note("login name"))
//!             .field(FieldDesc::of::<bool>("remember").json("remember,omitempty"))
//!     }
//! }
//!
//! api_struct!(Login);
//! ```

pub mod catalog;
mod impls;

pub use catalog::ModelCatalog;

use std::fmt;
use std::sync::Arc;

/// Nesting bound for label rendering of anonymous shapes
const MAX_LABEL_DEPTH: usize = 16;

/// Terminal value kinds. These are never recursed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    String,
}

impl Scalar {
    /// Every scalar kind, in declaration order
    pub const ALL: [Scalar; 17] = [
        Scalar::Bool,
        Scalar::I8,
        Scalar::I16,
        Scalar::I32,
        Scalar::I64,
        Scalar::I128,
        Scalar::Isize,
        Scalar::U8,
        Scalar::U16,
        Scalar::U32,
        Scalar::U64,
        Scalar::U128,
        Scalar::Usize,
        Scalar::F32,
        Scalar::F64,
        Scalar::Char,
        Scalar::String,
    ];

    /// Rust spelling of the type
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::I8 => "i8",
            Scalar::I16 => "i16",
            Scalar::I32 => "i32",
            Scalar::I64 => "i64",
            Scalar::I128 => "i128",
            Scalar::Isize => "isize",
            Scalar::U8 => "u8",
            Scalar::U16 => "u16",
            Scalar::U32 => "u32",
            Scalar::U64 => "u64",
            Scalar::U128 => "u128",
            Scalar::Usize => "usize",
            Scalar::F32 => "f32",
            Scalar::F64 => "f64",
            Scalar::Char => "char",
            Scalar::String => "String",
        }
    }

    /// Parse a scalar from its Rust spelling. `str` is accepted as `String`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "str" {
            return Some(Scalar::String);
        }
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single-parameter wrappers that are unwrapped when looking for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wrapper {
    Option,
    Box,
    Rc,
    Arc,
    Vec,
    VecDeque,
    HashSet,
    BTreeSet,
}

impl Wrapper {
    pub const ALL: [Wrapper; 8] = [
        Wrapper::Option,
        Wrapper::Box,
        Wrapper::Rc,
        Wrapper::Arc,
        Wrapper::Vec,
        Wrapper::VecDeque,
        Wrapper::HashSet,
        Wrapper::BTreeSet,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Wrapper::Option => "Option",
            Wrapper::Box => "Box",
            Wrapper::Rc => "Rc",
            Wrapper::Arc => "Arc",
            Wrapper::Vec => "Vec",
            Wrapper::VecDeque => "VecDeque",
            Wrapper::HashSet => "HashSet",
            Wrapper::BTreeSet => "BTreeSet",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|w| w.name() == name)
    }

}

/// Map flavours; they only differ in how the type label is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    HashMap,
    BTreeMap,
}

impl MapKind {
    pub fn name(self) -> &'static str {
        match self {
            MapKind::HashMap => "HashMap",
            MapKind::BTreeMap => "BTreeMap",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HashMap" => Some(MapKind::HashMap),
            "BTreeMap" => Some(MapKind::BTreeMap),
            _ => None,
        }
    }
}

/// A type expression as it appears on a field.
#[derive(Debug, Clone)]
pub enum Ty {
    Scalar(Scalar),
    Wrapped { wrapper: Wrapper, inner: Box<Ty> },
    Array { inner: Box<Ty>, len: usize },
    Map { kind: MapKind, key: Box<Ty>, value: Box<Ty> },
    Struct(StructRef),
    /// Kinds with no tabular representation (fn pointers, trait objects,
    /// channels). Fields of these types are left out of the tables.
    Unsupported(String),
}

impl Ty {
    pub fn wrapped(wrapper: Wrapper, inner: Ty) -> Self {
        Ty::Wrapped {
            wrapper,
            inner: Box::new(inner),
        }
    }

    pub fn array(inner: Ty, len: usize) -> Self {
        Ty::Array {
            inner: Box::new(inner),
            len,
        }
    }

    pub fn map(kind: MapKind, key: Ty, value: Ty) -> Self {
        Ty::Map {
            kind,
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Reference to a struct that describes itself
    pub fn structure<T: ApiStruct + ?Sized>() -> Self {
        Ty::Struct(StructRef::Described(T::describe))
    }

    /// Reference to a model registered by name in a [`ModelCatalog`]
    pub fn named(name: impl Into<String>) -> Self {
        Ty::Struct(StructRef::Named(name.into()))
    }

    /// An anonymous (or inline named) shape
    pub fn inline(desc: StructDesc) -> Self {
        Ty::Struct(StructRef::Inline(Arc::new(desc)))
    }

    pub fn unsupported(description: impl Into<String>) -> Self {
        Ty::Unsupported(description.into())
    }

    /// Rust-style type label; anonymous shapes are spelled out structurally.
    pub fn label(&self) -> String {
        let mut out = String::new();
        self.write_label(&mut out, None, 0);
        out
    }

    /// Type label for a field column: anonymous shapes are replaced by
    /// `synthetic` so the table can refer to the inner model by name.
    pub fn field_label(&self, synthetic: &str) -> String {
        let mut out = String::new();
        self.write_label(&mut out, Some(synthetic), 0);
        out
    }

    fn write_label(&self, out: &mut String, synthetic: Option<&str>, depth: usize) {
        if depth > MAX_LABEL_DEPTH {
            out.push_str("..");
            return;
        }
        match self {
            Ty::Scalar(s) => out.push_str(s.name()),
            Ty::Wrapped { wrapper, inner } => {
                out.push_str(wrapper.name());
                out.push('<');
                inner.write_label(out, synthetic, depth + 1);
                out.push('>');
            }
            Ty::Array { inner, len } => {
                out.push('[');
                inner.write_label(out, synthetic, depth + 1);
                out.push_str(&format!("; {}]", len));
            }
            Ty::Map { kind, key, value } => {
                out.push_str(kind.name());
                out.push('<');
                key.write_label(out, synthetic, depth + 1);
                out.push_str(", ");
                value.write_label(out, synthetic, depth + 1);
                out.push('>');
            }
            Ty::Struct(StructRef::Named(name)) => out.push_str(name),
            Ty::Struct(r) => {
                let desc = r.describe_local();
                match (&desc.name, synthetic) {
                    (Some(name), _) => out.push_str(name),
                    (None, Some(synthetic)) => out.push_str(synthetic),
                    (None, None) => desc.write_signature(out, depth + 1),
                }
            }
            Ty::Unsupported(description) => out.push_str(description),
        }
    }
}

/// How a field reaches a struct shape.
#[derive(Clone)]
pub enum StructRef {
    /// Lazily described Rust type
    Described(fn() -> StructDesc),
    /// Model registered by name in a [`ModelCatalog`]
    Named(String),
    /// Shape carried inline, usually anonymous
    Inline(Arc<StructDesc>),
}

impl StructRef {
    /// Resolve the reference to its description.
    ///
    /// Returns `None` only for a `Named` reference missing from `catalog`.
    pub fn resolve(&self, catalog: &ModelCatalog) -> Option<Arc<StructDesc>> {
        match self {
            StructRef::Described(describe) => Some(Arc::new(describe())),
            StructRef::Named(name) => catalog.get(name),
            StructRef::Inline(desc) => Some(Arc::clone(desc)),
        }
    }

    // Only called for the variants that do not need a catalog.
    fn describe_local(&self) -> Arc<StructDesc> {
        match self {
            StructRef::Described(describe) => Arc::new(describe()),
            StructRef::Inline(desc) => Arc::clone(desc),
            StructRef::Named(name) => Arc::new(StructDesc::new(None, Some(name.clone()))),
        }
    }
}

impl fmt::Debug for StructRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructRef::Described(_) => {
                let desc = self.describe_local();
                f.debug_tuple("Described").field(&desc.identity()).finish()
            }
            StructRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            StructRef::Inline(desc) => f.debug_tuple("Inline").field(&desc.identity()).finish(),
        }
    }
}

/// Description of one struct shape.
#[derive(Debug, Clone, Default)]
pub struct StructDesc {
    /// Enclosing module or package, if any
    pub namespace: Option<String>,
    /// Declared type name; `None` for anonymous shapes
    pub name: Option<String>,
    pub fields: Vec<FieldDesc>,
}

impl StructDesc {
    pub fn new(namespace: Option<String>, name: Option<String>) -> Self {
        Self {
            namespace,
            name,
            fields: Vec::new(),
        }
    }

    /// A named shape inside `namespace` (typically `module_path!()`)
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Some(namespace.into()), Some(name.into()))
    }

    /// A shape without a declared name
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Append a field (builder style)
    pub fn field(mut self, field: FieldDesc) -> Self {
        self.fields.push(field);
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Key identifying this shape within a walk.
    ///
    /// `namespace::name` when both are known, the bare name when only the name
    /// is, and the structural signature for anonymous shapes.
    pub fn identity(&self) -> String {
        match (&self.namespace, &self.name) {
            (Some(ns), Some(name)) if !ns.is_empty() => format!("{}::{}", ns, name),
            (_, Some(name)) => name.clone(),
            (_, None) => self.signature(),
        }
    }

    /// Canonical structural spelling, e.g.
    /// `struct { id: i64 "json:id note:user id", tags: Vec<String> }`.
    ///
    /// Field tags are part of the spelling: shapes that differ only in tags
    /// are distinct shapes.
    pub fn signature(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out, 0);
        out
    }

    fn write_signature(&self, out: &mut String, depth: usize) {
        if self.fields.is_empty() {
            out.push_str("struct {}");
            return;
        }
        out.push_str("struct { ");
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if field.flatten {
                out.push_str("..");
            } else {
                out.push_str(&field.name);
                out.push_str(": ");
            }
            field.ty.write_label(out, None, depth + 1);
            field.write_tags(out);
        }
        out.push_str(" }");
    }
}

/// One declared field of a struct shape.
#[derive(Debug, Clone)]
pub struct FieldDesc {
    /// Field name in source; used to name anonymous inner shapes
    pub name: String,
    pub ty: Ty,
    /// Serialization tag, `name[,modifier...]`
    pub json: String,
    /// Free-text note tag
    pub note: String,
    /// Key into the enumeration registry
    pub enum_key: Option<String>,
    /// Splice the inner shape's fields into the owner instead of nesting it
    pub flatten: bool,
}

impl FieldDesc {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            json: String::new(),
            note: String::new(),
            enum_key: None,
            flatten: false,
        }
    }

    /// Field typed by a Rust type implementing [`ApiModel`]
    pub fn of<T: ApiModel + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::ty())
    }

    pub fn json(mut self, tag: impl Into<String>) -> Self {
        self.json = tag.into();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn enum_key(mut self, key: impl Into<String>) -> Self {
        self.enum_key = Some(key.into());
        self
    }

    pub fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    /// Display name: the serialization tag up to its first modifier.
    /// An untagged field has an empty name.
    pub fn json_name(&self) -> &str {
        self.json.split(',').next().unwrap_or_default()
    }

    /// Note text up to the first `,`
    pub fn note_text(&self) -> &str {
        self.note.split(',').next().unwrap_or_default()
    }

    fn write_tags(&self, out: &mut String) {
        let tags: Vec<String> = [
            ("json", self.json.as_str()),
            ("note", self.note.as_str()),
            ("enum", self.enum_key.as_deref().unwrap_or_default()),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect();
        if !tags.is_empty() {
            out.push_str(&format!(" {:?}", tags.join(" ")));
        }
    }
}

/// Types that can appear in a documented payload.
pub trait ApiModel {
    /// Type expression for this type
    fn ty() -> Ty;
}

/// Struct types that describe their own fields.
///
/// Pair with [`api_struct!`](crate::api_struct) to get the [`ApiModel`]
/// implementation.
pub trait ApiStruct {
    fn describe() -> StructDesc;
}

/// Implement [`ApiModel`] for types that implement [`ApiStruct`].
#[macro_export]
macro_rules! api_struct {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::model::ApiModel for $ty {
                fn ty() -> $crate::model::Ty {
                    $crate::model::Ty::structure::<$ty>()
                }
            }
        )+
    };
}
