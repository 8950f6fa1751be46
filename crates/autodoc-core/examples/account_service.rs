//! Document a small account service from its Rust types.
//!
//! Run with `cargo run -p autodoc-core --example account_service [OUT]`;
//! set `DOC_LANG=english` for English headings.

use autodoc_core::{
    api_struct, ApiStruct, DocAssembler, EndpointDescriptor, EnumTable, Example, FieldDesc,
    Locale, SectionDescriptor, Sections, StructDesc,
};
use serde::Serialize;

#[derive(Serialize)]
struct Address {
    city: String,
    zip: String,
}

#[derive(Serialize)]
struct Account {
    id: u64,
    name: String,
    status: String,
    addresses: Vec<Address>,
    referrer: Option<Box<Account>>,
}

#[derive(Serialize)]
struct CreateAccount {
    name: String,
    addresses: Vec<Address>,
}

#[derive(Serialize)]
struct Reply<T> {
    code: i32,
    data: T,
}

impl ApiStruct for Address {
    fn describe() -> StructDesc {
        StructDesc::named("accounts", "Address")
            .field(FieldDesc::of::<String>("city").json("city").note("city"))
            .field(FieldDesc::of::<String>("zip").json("zip").note("postal code"))
    }
}

impl ApiStruct for Account {
    fn describe() -> StructDesc {
        StructDesc::named("accounts", "Account")
            .field(FieldDesc::of::<u64>("id").json("id").note("account id"))
            .field(FieldDesc::of::<String>("name").json("name").note("display name"))
            .field(
                FieldDesc::of::<String>("status")
                    .json("status")
                    .note("status")
                    .enum_key("account_status"),
            )
            .field(FieldDesc::of::<Vec<Address>>("addresses").json("addresses"))
            .field(FieldDesc::of::<Option<Box<Account>>>("referrer").json("referrer,omitempty"))
    }
}

impl ApiStruct for CreateAccount {
    fn describe() -> StructDesc {
        StructDesc::named("accounts", "CreateAccount")
            .field(FieldDesc::of::<String>("name").json("name").note("display name"))
            .field(FieldDesc::of::<Vec<Address>>("addresses").json("addresses"))
    }
}

impl ApiStruct for Reply<Account> {
    fn describe() -> StructDesc {
        StructDesc::named("accounts", "AccountReply")
            .field(FieldDesc::of::<i32>("code").json("code").note("0 on success"))
            .field(FieldDesc::of::<Account>("data").json("data"))
    }
}

api_struct!(Address, Account, CreateAccount, Reply<Account>);

fn sample_account() -> Account {
    Account {
        id: 42,
        name: "Ada".to_string(),
        status: "active".to_string(),
        addresses: vec![Address {
            city: "London".to_string(),
            zip: "N1".to_string(),
        }],
        referrer: None,
    }
}

fn main() -> autodoc_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let locale = Locale::from_code(&std::env::var("DOC_LANG").unwrap_or_default());
    let out = std::env::args().nth(1).unwrap_or_else(|| "account_api.md".to_string());

    let enums = EnumTable::new().with("account_status", ["active", "suspended", "closed"]);
    let mut sections = Sections::new();
    sections.insert("accounts".to_string(), SectionDescriptor::new(1, "Accounts"));

    let endpoints = vec![
        EndpointDescriptor::new(1, "Get account", "accounts", "GET", "/accounts/{id}")
            .description("Fetch one account by id")
            .response(Example::of(&Reply {
                code: 0,
                data: sample_account(),
            })),
        EndpointDescriptor::new(2, "Create account", "accounts", "POST", "/accounts")
            .description("Open a new account")
            .request(Example::of(&CreateAccount {
                name: "Ada".to_string(),
                addresses: Vec::new(),
            }))
            .response(Example::of(&Reply {
                code: 0,
                data: sample_account(),
            })),
    ];

    DocAssembler::new(locale)
        .with_enums(&enums)
        .generate(&out, "Account Service", &sections, &endpoints)?;
    println!("wrote {}", out);
    Ok(())
}
