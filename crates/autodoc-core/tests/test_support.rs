//! Shared test support utilities for integration tests

#![allow(dead_code)]

use autodoc_core::{api_struct, ApiStruct, EnumTable, FieldDesc, StructDesc, Ty};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub label: String,
}

impl ApiStruct for Tag {
    fn describe() -> StructDesc {
        StructDesc::named("tests", "Tag")
            .field(FieldDesc::of::<String>("label").json("label").note("tag label"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub tags: Vec<Tag>,
}

impl ApiStruct for User {
    fn describe() -> StructDesc {
        StructDesc::named("tests", "User")
            .field(FieldDesc::of::<u64>("id").json("id").note("user id"))
            .field(FieldDesc::of::<Vec<Tag>>("tags").json("tags,omitempty").note("tags"))
    }
}

/// Creation and update timestamps spliced into other models
#[derive(Debug, Clone, Serialize)]
pub struct Audit {
    pub created_at: String,
    pub updated_at: String,
}

impl ApiStruct for Audit {
    fn describe() -> StructDesc {
        StructDesc::named("tests", "Audit")
            .field(FieldDesc::of::<String>("created_at").json("created_at").note("creation time"))
            .field(FieldDesc::of::<String>("updated_at").json("updated_at").note("last update"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub city: String,
}

impl ApiStruct for Address {
    fn describe() -> StructDesc {
        StructDesc::named("tests", "Address")
            .field(FieldDesc::of::<String>("city").json("city").note("city name, upper case"))
    }
}

/// A model touching every walker feature: self reference, flattening,
/// enumerations, maps, anonymous shapes and unsupported fields.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: u64,
    pub status: String,
    pub home: Option<Box<Address>>,
    pub offices: HashMap<String, Vec<Address>>,
    pub referrer: Option<Box<Account>>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl ApiStruct for Account {
    fn describe() -> StructDesc {
        let settings = StructDesc::anonymous()
            .field(FieldDesc::of::<bool>("public").json("public").note("visible to others"));

        StructDesc::named("tests", "Account")
            .field(FieldDesc::of::<u64>("id").json("id").note("account id"))
            .field(
                FieldDesc::of::<String>("status")
                    .json("status")
                    .note("state")
                    .enum_key("account_status"),
            )
            .field(FieldDesc::of::<Option<Box<Address>>>("home").json("home,omitempty"))
            .field(FieldDesc::of::<HashMap<String, Vec<Address>>>("offices").json("offices"))
            .field(FieldDesc::of::<Option<Box<Account>>>("referrer").json("referrer"))
            .field(FieldDesc::new("settings", Ty::inline(settings)).json("settings"))
            .field(FieldDesc::new("on_change", Ty::unsupported("fn(u64)")).json("-"))
            .field(FieldDesc::of::<Audit>("audit").flatten())
    }
}

api_struct!(Tag, User, Audit, Address, Account);

pub fn account_enums() -> EnumTable {
    EnumTable::new().with("account_status", ["active", "locked", "closed"])
}

pub fn sample_user() -> User {
    User {
        id: 7,
        tags: vec![Tag {
            label: "a".to_string(),
        }],
    }
}
