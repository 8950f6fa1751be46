//! Model discovery
//!
//! Starting from a root type, the walker collects one [`ModelRecord`] for
//! every distinct struct shape reachable through wrappers, arrays and map
//! values. Records are keyed by type identity, so a shape reached along
//! several paths (or through a cycle) is recorded once.
//!
//! Order of discovery: a record's rows are collected first, then the shapes
//! it references are walked one after another, each to completion.

use crate::enums::{EnumRegistry, EnumTable};
use crate::locale::Locale;
use crate::model::{ApiModel, FieldDesc, ModelCatalog, Scalar, StructDesc, StructRef, Ty};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

static EMPTY_CATALOG: ModelCatalog = ModelCatalog::new();
static NO_ENUMS: EnumTable = EnumTable::new();

/// One row of a model table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub name: String,
    pub type_label: String,
    pub note: String,
}

impl FieldRow {
    pub fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.type_label.clone(), self.note.clone()]
    }
}

/// A discovered struct shape, ready to be tabulated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRecord {
    /// Discovery order; the root shape is 0
    pub sequence_index: usize,
    pub identity: String,
    /// Declared type name, `None` for anonymous shapes
    pub type_name: Option<String>,
    /// Label of the field this shape was first reached through
    pub declared_field_name: String,
    pub rows: Vec<FieldRow>,
}

impl ModelRecord {
    /// Heading used when the record is printed: the bare declared name, or
    /// the field-derived name of an anonymous shape
    pub fn display_name(&self) -> &str {
        self.type_name
            .as_deref()
            .unwrap_or(self.declared_field_name.as_str())
    }

    pub fn table_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(FieldRow::cells).collect()
    }
}

/// What a type expression points at once wrappers are peeled off
enum Target<'t> {
    Scalar(Scalar),
    Struct(&'t StructRef),
}

/// Why a field cannot be tabulated
enum Excluded<'t> {
    MapKey(&'t Ty),
    Unsupported(&'t str),
}

/// Unwrap pointers, sequences, arrays and map values down to a scalar or a
/// struct. Map keys must themselves be scalars.
fn deref(ty: &Ty) -> Result<Target<'_>, Excluded<'_>> {
    match ty {
        Ty::Scalar(scalar) => Ok(Target::Scalar(*scalar)),
        Ty::Wrapped { inner, .. } | Ty::Array { inner, .. } => deref(inner),
        Ty::Map { key, value, .. } => match &**key {
            Ty::Scalar(_) => deref(value),
            other => Err(Excluded::MapKey(other)),
        },
        Ty::Struct(r) => Ok(Target::Struct(r)),
        Ty::Unsupported(kind) => Err(Excluded::Unsupported(kind)),
    }
}

/// A shape queued for walking after the current record is complete
struct Pending {
    identity: String,
    declared: String,
    desc: Arc<StructDesc>,
}

/// Collects model records for one root type.
///
/// A walker is single-use: records never carry over between walks.
pub struct Walker<'a> {
    locale: Locale,
    catalog: &'a ModelCatalog,
    enums: &'a dyn EnumRegistry,
    records: HashMap<String, ModelRecord>,
}

impl<'a> Walker<'a> {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            catalog: &EMPTY_CATALOG,
            enums: &NO_ENUMS,
            records: HashMap::new(),
        }
    }

    /// Catalog used to resolve [`StructRef::Named`] references
    pub fn with_catalog(mut self, catalog: &'a ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Registry used to annotate enumeration fields
    pub fn with_enums(mut self, enums: &'a dyn EnumRegistry) -> Self {
        self.enums = enums;
        self
    }

    /// Walk the shape of `T`
    pub fn walk_type<T: ApiModel + ?Sized>(self) -> Vec<ModelRecord> {
        self.walk(&T::ty())
    }

    /// Walk the shape of `value`'s type
    pub fn walk_value<T: ApiModel + ?Sized>(self, _value: &T) -> Vec<ModelRecord> {
        self.walk_type::<T>()
    }

    /// Walk `root` and return every discovered record in discovery order.
    ///
    /// A root that does not dereference to a struct yields no records.
    #[instrument(level = "debug", skip_all, fields(root = %root.label()))]
    pub fn walk(mut self, root: &Ty) -> Vec<ModelRecord> {
        match deref(root) {
            Ok(Target::Struct(r)) => match r.resolve(self.catalog) {
                Some(desc) => self.walk_struct(String::new(), desc),
                None => warn!(root = %root.label(), "root model is not registered"),
            },
            Ok(Target::Scalar(_)) => debug!("root is a scalar, no models to document"),
            Err(_) => debug!("root type cannot be documented"),
        }

        let mut records: Vec<ModelRecord> = self.records.into_values().collect();
        records.sort_by_key(|r| r.sequence_index);
        records
    }

    fn walk_struct(&mut self, declared: String, desc: Arc<StructDesc>) {
        let identity = desc.identity();
        if self.records.contains_key(&identity) {
            return;
        }

        let sequence_index = self.records.len();
        let mut rows = Vec::new();
        let mut pending: Vec<Pending> = Vec::new();

        for field in self.flattened_fields(&desc, &identity) {
            let synthetic = format!("{}{}", field.name, sequence_index);

            let target = match deref(&field.ty) {
                Ok(target) => target,
                Err(Excluded::MapKey(key)) => {
                    warn!(
                        model = %identity,
                        field = %field.name,
                        key = %key.label(),
                        "map key should be a scalar type, field skipped"
                    );
                    continue;
                }
                Err(Excluded::Unsupported(kind)) => {
                    debug!(model = %identity, field = %field.name, kind, "unsupported field type skipped");
                    continue;
                }
            };

            if let Target::Struct(r) = target {
                let Some(inner) = r.resolve(self.catalog) else {
                    warn!(model = %identity, field = %field.name, "field references an unregistered model, skipped");
                    continue;
                };
                let inner_identity = inner.identity();
                if !self.records.contains_key(&inner_identity)
                    && !pending.iter().any(|p| p.identity == inner_identity)
                {
                    let declared = if inner.is_anonymous() {
                        synthetic.clone()
                    } else {
                        field.ty.field_label(&synthetic)
                    };
                    pending.push(Pending {
                        identity: inner_identity,
                        declared,
                        desc: inner,
                    });
                }
            }

            rows.push(FieldRow {
                name: field.json_name().to_string(),
                type_label: field.ty.field_label(&synthetic),
                note: self.note(&field),
            });
        }

        debug!(model = %identity, sequence_index, rows = rows.len(), "model recorded");
        self.records.insert(
            identity.clone(),
            ModelRecord {
                sequence_index,
                identity,
                type_name: desc.name.clone(),
                declared_field_name: declared,
                rows,
            },
        );

        for inner in pending {
            self.walk_struct(inner.declared, inner.desc);
        }
    }

    /// Fields of `desc` with flattened fields replaced by the fields of the
    /// shape they point at, recursively.
    fn flattened_fields(&self, desc: &StructDesc, identity: &str) -> Vec<FieldDesc> {
        let mut fields = Vec::with_capacity(desc.fields.len());
        let mut stack = vec![identity.to_string()];
        self.collect_fields(desc, &mut fields, &mut stack);
        fields
    }

    fn collect_fields(&self, desc: &StructDesc, out: &mut Vec<FieldDesc>, stack: &mut Vec<String>) {
        for field in &desc.fields {
            if field.flatten {
                if let Some(inner) = self.flatten_target(field) {
                    let inner_identity = inner.identity();
                    if stack.contains(&inner_identity) {
                        warn!(field = %field.name, model = %inner_identity, "flatten cycle, field skipped");
                        continue;
                    }
                    stack.push(inner_identity);
                    self.collect_fields(&inner, out, stack);
                    stack.pop();
                    continue;
                }
            }
            out.push(field.clone());
        }
    }

    fn flatten_target(&self, field: &FieldDesc) -> Option<Arc<StructDesc>> {
        match deref(&field.ty) {
            Ok(Target::Struct(r)) => r.resolve(self.catalog),
            _ => None,
        }
    }

    fn note(&self, field: &FieldDesc) -> String {
        let text = field.note_text();
        let Some(key) = field.enum_key.as_deref().filter(|k| !k.is_empty()) else {
            return text.to_string();
        };
        let tokens = self.enums.tokens(key).unwrap_or_else(|| {
            warn!(field = %field.name, enum_key = key, "unknown enumeration, no tokens listed");
            Vec::new()
        });
        format!("{} {}[{}]", text, self.locale.enum_label(), tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiStruct, MapKind, Wrapper};
    use pretty_assertions::assert_eq;

    struct Profile;
    struct User;

    impl ApiStruct for Profile {
        fn describe() -> StructDesc {
            StructDesc::named("acct", "Profile")
                .field(FieldDesc::of::<String>("nick").json("nick").note("nickname"))
        }
    }

    impl ApiStruct for User {
        fn describe() -> StructDesc {
            StructDesc::named("acct", "User")
                .field(FieldDesc::of::<i64>("id").json("id,omitempty").note("user id"))
                .field(FieldDesc::of::<Option<Box<Profile>>>("profile").json("profile"))
                .field(FieldDesc::of::<Vec<Profile>>("history").json("history"))
        }
    }

    crate::api_struct!(Profile, User);

    #[test]
    fn test_nested_model_discovered_once() {
        let records = Walker::new(Locale::English).walk_type::<User>();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].identity, "acct::User");
        assert_eq!(records[0].sequence_index, 0);
        assert_eq!(
            records[0].table_rows(),
            vec![
                vec!["id".to_string(), "i64".to_string(), "user id".to_string()],
                vec!["profile".to_string(), "Option<Box<Profile>>".to_string(), String::new()],
                vec!["history".to_string(), "Vec<Profile>".to_string(), String::new()],
            ]
        );

        assert_eq!(records[1].identity, "acct::Profile");
        assert_eq!(records[1].display_name(), "Profile");
        assert_eq!(records[1].declared_field_name, "Option<Box<Profile>>");
    }

    #[test]
    fn test_scalar_root_has_no_records() {
        assert!(Walker::new(Locale::English).walk_type::<Vec<u8>>().is_empty());
    }

    #[test]
    fn test_wrapped_root_is_unwrapped() {
        let records = Walker::new(Locale::English).walk_type::<Vec<Option<User>>>();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identity, "acct::User");
    }

    #[test]
    fn test_map_with_struct_key_is_skipped() {
        let desc = StructDesc::named("m", "Index")
            .field(FieldDesc::new(
                "by_user",
                Ty::map(MapKind::HashMap, User::ty(), Ty::Scalar(Scalar::U32)),
            ).json("by_user"))
            .field(FieldDesc::new(
                "counts",
                Ty::map(MapKind::BTreeMap, Ty::Scalar(Scalar::String), Profile::ty()),
            ).json("counts"));
        let records = Walker::new(Locale::English).walk(&Ty::inline(desc));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rows.len(), 1);
        assert_eq!(records[0].rows[0].type_label, "BTreeMap<String, Profile>");
        assert_eq!(records[1].identity, "acct::Profile");
    }

    #[test]
    fn test_unsupported_field_is_dropped() {
        let desc = StructDesc::named("m", "Callback")
            .field(FieldDesc::new("handler", Ty::unsupported("fn(u32)")).json("handler"))
            .field(FieldDesc::new("events", Ty::wrapped(Wrapper::Vec, Ty::unsupported("Receiver<u8>"))).json("events"))
            .field(FieldDesc::of::<bool>("enabled").json("enabled"));
        let records = Walker::new(Locale::English).walk(&Ty::inline(desc));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rows.len(), 1);
        assert_eq!(records[0].rows[0].name, "enabled");
    }

    #[test]
    fn test_enum_note() {
        let enums = EnumTable::new().with("status", ["OK", "FAIL"]);
        let desc = StructDesc::named("m", "Reply").field(
            FieldDesc::of::<String>("status")
                .json("status")
                .note("result")
                .enum_key("status"),
        );
        let records = Walker::new(Locale::English)
            .with_enums(&enums)
            .walk(&Ty::inline(desc.clone()));
        assert_eq!(records[0].rows[0].note, "result Type Enum[OK FAIL]");

        let records = Walker::new(Locale::Chinese).walk(&Ty::inline(desc));
        assert_eq!(records[0].rows[0].note, "result 枚举类型[]");
    }

    #[test]
    fn test_anonymous_shapes_differing_in_tags_stay_apart() {
        let alpha = StructDesc::anonymous()
            .field(FieldDesc::of::<i64>("x").json("alpha").note("first"));
        let beta = StructDesc::anonymous()
            .field(FieldDesc::of::<i64>("x").json("beta").note("second"));
        let root = StructDesc::named("p", "Root")
            .field(FieldDesc::new("a", Ty::inline(alpha)).json("a"))
            .field(FieldDesc::new("b", Ty::inline(beta)).json("b"));

        let records = Walker::new(Locale::English).walk(&Ty::inline(root));
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].table_rows(),
            vec![
                vec!["a".to_string(), "a0".to_string(), String::new()],
                vec!["b".to_string(), "b0".to_string(), String::new()],
            ]
        );
        assert_eq!(records[1].display_name(), "a0");
        assert_eq!(records[1].rows[0].name, "alpha");
        assert_eq!(records[2].display_name(), "b0");
        assert_eq!(
            records[2].table_rows(),
            vec![vec!["beta".to_string(), "i64".to_string(), "second".to_string()]]
        );
    }

    struct Outer;
    struct Mid;
    struct Inner;

    impl ApiStruct for Outer {
        fn describe() -> StructDesc {
            StructDesc::named("p", "Outer")
                .field(FieldDesc::of::<u8>("o").json("o"))
                .field(FieldDesc::of::<Mid>("mid").flatten())
        }
    }

    impl ApiStruct for Mid {
        fn describe() -> StructDesc {
            StructDesc::named("p", "Mid")
                .field(FieldDesc::of::<u8>("m").json("m"))
                .field(FieldDesc::of::<Box<Inner>>("inner").flatten())
        }
    }

    impl ApiStruct for Inner {
        fn describe() -> StructDesc {
            StructDesc::named("p", "Inner")
                .field(FieldDesc::of::<u8>("i").json("i"))
                .field(FieldDesc::of::<Outer>("outer").flatten())
        }
    }

    crate::api_struct!(Outer, Mid, Inner);

    #[test]
    fn test_nested_flatten_and_cycle() {
        let records = Walker::new(Locale::English).walk_type::<Outer>();

        // Inner flattens Outer again; that field is cut and nothing nests.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identity, "p::Outer");
        let names: Vec<&str> = records[0].rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["o", "m", "i"]);
    }

    #[test]
    fn test_flatten_starting_below_the_cycle() {
        let records = Walker::new(Locale::English).walk_type::<Mid>();
        assert_eq!(records.len(), 1);
        let names: Vec<&str> = records[0].rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["m", "i", "o"]);
    }

    #[test]
    fn test_unregistered_named_reference_is_dropped() {
        let desc = StructDesc::named("m", "Holder")
            .field(FieldDesc::new("ghost", Ty::named("Ghost")).json("ghost"))
            .field(FieldDesc::of::<u8>("n").json("n"));
        let records = Walker::new(Locale::English).walk(&Ty::inline(desc));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rows.len(), 1);
    }
}
