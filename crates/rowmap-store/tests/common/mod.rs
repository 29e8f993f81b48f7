#![allow(dead_code)]

use rowmap_core::errors::{ExError, ExErrorKind, Result};
use rowmap_core::fetch::RemoteFetcher;
use rowmap_core::model::{Entity, FieldDescriptor, SemanticType, TypeDescriptor, Value};
use rowmap_store::Database;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ---------- User: one deferred remote field ----------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub avatar: Option<Vec<u8>>,
    /// Not persistable; never stored
    pub session_note: String,
}

static USER: TypeDescriptor = TypeDescriptor::new(
    "User",
    &[
        FieldDescriptor::new("id", SemanticType::Integer)
            .persistable()
            .primary_key(),
        FieldDescriptor::new("name", SemanticType::Text).persistable(),
        FieldDescriptor::new("avatar", SemanticType::RawBytes)
            .persistable()
            .deferred_remote(),
        FieldDescriptor::new("sessionNote", SemanticType::Text),
    ],
);

impl Entity for User {
    fn descriptor() -> &'static TypeDescriptor {
        &USER
    }

    fn field(&self, name: &str) -> Result<Value> {
        match name {
            "id" => Ok(self.id.into()),
            "name" => Ok(self.name.clone().into()),
            "avatar" => Ok(self.avatar.clone().into()),
            "sessionNote" => Ok(self.session_note.clone().into()),
            _ => Err(Self::unknown_field(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "id" => self.id = value.into_optional_integer(name)?,
            "name" => self.name = value.into_optional_text(name)?.unwrap_or_default(),
            "avatar" => self.avatar = value.into_optional_bytes(name)?,
            "sessionNote" => self.session_note = value.into_text(name)?,
            _ => return Err(Self::unknown_field(name)),
        }
        Ok(())
    }
}

impl User {
    pub fn new(id: i64, name: &str, avatar: &[u8]) -> Self {
        Self {
            id: Some(id),
            name: name.to_string(),
            avatar: Some(avatar.to_vec()),
            session_note: String::new(),
        }
    }

    pub fn key(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

// ---------- Book: text key, no deferred fields ----------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub page_count: i64,
    pub cover: Vec<u8>,
}

static BOOK: TypeDescriptor = TypeDescriptor::new(
    "Book",
    &[
        FieldDescriptor::new("title", SemanticType::Text).persistable(),
        FieldDescriptor::new("isbn", SemanticType::Text)
            .persistable()
            .primary_key(),
        FieldDescriptor::new("pageCount", SemanticType::Integer).persistable(),
        FieldDescriptor::new("cover", SemanticType::RawBytes).persistable(),
    ],
);

impl Entity for Book {
    fn descriptor() -> &'static TypeDescriptor {
        &BOOK
    }

    fn field(&self, name: &str) -> Result<Value> {
        match name {
            // An empty isbn counts as unset
            "isbn" if self.isbn.is_empty() => Ok(Value::Null),
            "isbn" => Ok(self.isbn.clone().into()),
            "title" => Ok(self.title.clone().into()),
            "pageCount" => Ok(self.page_count.into()),
            "cover" => Ok(self.cover.clone().into()),
            _ => Err(Self::unknown_field(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "isbn" => self.isbn = value.into_text(name)?,
            "title" => self.title = value.into_text(name)?,
            "pageCount" => self.page_count = value.into_integer(name)?,
            "cover" => self.cover = value.into_bytes(name)?,
            _ => return Err(Self::unknown_field(name)),
        }
        Ok(())
    }
}

impl Book {
    pub fn key(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            ..Self::default()
        }
    }
}

// ---------- Fetchers ----------

/// Returns fixed content and records every URL it was asked for
#[derive(Default)]
pub struct CountingFetcher {
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl CountingFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

impl RemoteFetcher for CountingFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, ExError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(url.to_string());
        }
        Ok(format!("content of {}", url).into_bytes())
    }
}

/// Fails the first `failures` fetches, then succeeds
pub struct FlakyFetcher {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyFetcher {
    pub fn failing(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteFetcher for FlakyFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, ExError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            return Err(ExError::new(ExErrorKind::Fetch)
                .with_op("fetch")
                .with_message(format!("unreachable: {}", url)));
        }
        Ok(b"remote bytes".to_vec())
    }
}

/// An in-memory database whose remote fetches go to `fetcher`
pub fn setup_db(fetcher: Arc<dyn RemoteFetcher>) -> Database {
    Database::open_in_memory().unwrap().with_fetcher(fetcher)
}

/// Column names of `table` in table order
pub fn table_columns(db: &Database, table: &str) -> Vec<String> {
    let mut stmt = db
        .connection()
        .prepare(&format!("PRAGMA table_info({})", table))
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<std::result::Result<Vec<_>, _>>()
        .unwrap()
}

pub fn row_count(db: &Database, table: &str) -> i64 {
    db.connection()
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .unwrap()
}
