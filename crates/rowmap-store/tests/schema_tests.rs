// Integration tests for create_table / drop_table and configuration errors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{row_count, setup_db, table_columns, Book, CountingFetcher, User};
use rowmap_core::errors::{ErrorClass, ExErrorKind, Result};
use rowmap_core::model::{Entity, FieldDescriptor, SemanticType, TypeDescriptor, Value};
use rowmap_core::naming::NamingStrategy;
use rowmap_store::{Database, FieldAccess, StoreConfig};
use std::sync::Arc;

/// Declares a field type the coder cannot store
#[derive(Debug, Default)]
struct Measurement {
    id: i64,
}

static MEASUREMENT: TypeDescriptor = TypeDescriptor::new(
    "Measurement",
    &[
        FieldDescriptor::new("id", SemanticType::Integer)
            .persistable()
            .primary_key(),
        FieldDescriptor::new("reading", SemanticType::Other("f64")).persistable(),
    ],
);

impl Entity for Measurement {
    fn descriptor() -> &'static TypeDescriptor {
        &MEASUREMENT
    }

    fn field(&self, name: &str) -> Result<Value> {
        match name {
            "id" => Ok(self.id.into()),
            "reading" => Ok(Value::Null),
            _ => Err(Self::unknown_field(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "id" => self.id = value.into_integer(name)?,
            "reading" => {}
            _ => return Err(Self::unknown_field(name)),
        }
        Ok(())
    }
}

/// Declares two primary keys
#[derive(Debug, Default)]
struct Pair;

static PAIR: TypeDescriptor = TypeDescriptor::new(
    "Pair",
    &[
        FieldDescriptor::new("left", SemanticType::Integer)
            .persistable()
            .primary_key(),
        FieldDescriptor::new("right", SemanticType::Integer)
            .persistable()
            .primary_key(),
    ],
);

impl Entity for Pair {
    fn descriptor() -> &'static TypeDescriptor {
        &PAIR
    }

    fn field(&self, name: &str) -> Result<Value> {
        match name {
            "left" | "right" => Ok(Value::Integer(1)),
            _ => Err(Self::unknown_field(name)),
        }
    }

    fn set_field(&mut self, name: &str, _value: Value) -> Result<()> {
        Err(Self::unknown_field(name))
    }
}

/// Reports a value that does not match its declared type
#[derive(Debug, Default)]
struct Sloppy;

static SLOPPY: TypeDescriptor = TypeDescriptor::new(
    "Sloppy",
    &[
        FieldDescriptor::new("id", SemanticType::Integer)
            .persistable()
            .primary_key(),
        FieldDescriptor::new("label", SemanticType::Text).persistable(),
    ],
);

impl Entity for Sloppy {
    fn descriptor() -> &'static TypeDescriptor {
        &SLOPPY
    }

    fn field(&self, name: &str) -> Result<Value> {
        match name {
            "id" => Ok(Value::Integer(1)),
            "label" => Ok(Value::Integer(42)),
            _ => Err(Self::unknown_field(name)),
        }
    }

    fn set_field(&mut self, _name: &str, _value: Value) -> Result<()> {
        Ok(())
    }
}

fn db() -> Database {
    setup_db(Arc::new(CountingFetcher::default()))
}

#[test]
fn test_create_table_is_idempotent() {
    let db = db();

    db.create_table::<User>().unwrap();
    db.create_table::<User>().unwrap();

    assert!(db.table_exists::<User>().unwrap());
    let tables: i64 = db
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'User'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}

#[test]
fn test_drop_table_is_idempotent() {
    let db = db();

    // Never created
    db.drop_table::<User>().unwrap();

    db.create_table::<User>().unwrap();
    db.drop_table::<User>().unwrap();
    db.drop_table::<User>().unwrap();

    assert!(!db.table_exists::<User>().unwrap());
}

#[test]
fn test_create_keeps_existing_rows() {
    let db = db();
    db.create_table::<User>().unwrap();
    db.insert_row(&User::new(1, "Ann", b"x")).unwrap();

    db.create_table::<User>().unwrap();

    assert_eq!(row_count(&db, "User"), 1);
}

#[test]
fn test_columns_follow_declaration_order() {
    let db = db();
    db.create_table::<Book>().unwrap();

    assert_eq!(
        table_columns(&db, "Book"),
        vec!["title", "isbn", "page_count", "cover"]
    );
}

#[test]
fn test_primary_key_clause_on_flagged_column() {
    let db = db();
    db.create_table::<Book>().unwrap();

    let mut stmt = db.connection().prepare("PRAGMA table_info(Book)").unwrap();
    let keyed: Vec<(String, i64)> = stmt
        .query_map([], |row| Ok((row.get(1)?, row.get(5)?)))
        .unwrap()
        .collect::<std::result::Result<_, _>>()
        .unwrap();

    let keys: Vec<&str> = keyed
        .iter()
        .filter(|(_, pk)| *pk > 0)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(keys, vec!["isbn"]);
}

#[test]
fn test_unsupported_type_rejected_before_sql() {
    let db = db();

    let err = db.create_table::<Measurement>().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::UnsupportedType);
    assert_eq!(err.class(), ErrorClass::Configuration);
    assert!(!db.table_exists::<Measurement>().unwrap());

    let err = db.insert_row(&Measurement { id: 1 }).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::UnsupportedType);
}

#[test]
fn test_duplicate_primary_key_declaration_rejected() {
    let db = db();

    let err = db.create_table::<Pair>().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::DuplicatePrimaryKey);

    let err = db.insert_row(&Pair).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::DuplicatePrimaryKey);

    let err = db.load_row(&Pair).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::DuplicatePrimaryKey);
}

#[test]
fn test_mismatched_value_writes_nothing() {
    let db = db();
    db.create_table::<Sloppy>().unwrap();

    let err = db.insert_row(&Sloppy).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::TypeMismatch);
    assert_eq!(err.field(), Some("label"));
    assert_eq!(row_count(&db, "Sloppy"), 0);
}

#[test]
fn test_verbatim_naming_from_config() {
    let config = StoreConfig {
        naming: NamingStrategy::Verbatim,
        ..StoreConfig::in_memory()
    };
    let db = Database::open(&config).unwrap();

    db.create_table::<Book>().unwrap();

    assert_eq!(
        table_columns(&db, "Book"),
        vec!["title", "isbn", "pageCount", "cover"]
    );
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.db");

    {
        let db = Database::open_path(&path).unwrap();
        db.create_table::<Book>().unwrap();
        db.insert_row(&Book {
            isbn: "1".to_string(),
            title: "Emma".to_string(),
            page_count: 474,
            cover: vec![1, 2, 3],
        })
        .unwrap();
        db.close().unwrap();
    }

    let db = Database::open_path(&path).unwrap();
    let loaded = db.load_row(&Book::key("1")).unwrap();
    assert_eq!(loaded.text("title").unwrap().as_deref(), Some("Emma"));
    assert_eq!(loaded.integer("pageCount").unwrap(), Some(474));
}

#[test]
fn test_wal_config_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::from_toml_str(&format!(
        "path = {:?}\nwal = true\n",
        dir.path().join("wal.db").display().to_string()
    ))
    .unwrap();

    let db = Database::open(&config).unwrap();
    let mode: String = db
        .connection()
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();

    assert_eq!(mode.to_lowercase(), "wal");
}
