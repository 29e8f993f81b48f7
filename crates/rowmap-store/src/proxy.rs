//! Deferred-load proxy
//!
//! A loaded entity whose type has `deferred_remote` fields is wrapped in
//! [`Deferred`]. Each flagged field gets a slot decided once at load time:
//!
//! - `Stored`: the raw value is not a URL and is returned unchanged
//! - `RemoteRef`: the raw bytes are an HTTP(S) URL; the first read fetches the
//!   content and caches it, later reads return the cached bytes
//!
//! A failed fetch is reported at that access and not cached, so the next
//! read tries again. Fields without the flag are read straight from the
//! captured instance.

use crate::coder;
use crate::errors::Result;
use once_cell::sync::OnceCell;
use rowmap_core::fetch::RemoteFetcher;
use rowmap_core::model::{Entity, Value};
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Read contract shared by plain and deferred loads
pub trait FieldAccess {
    /// Read a field, resolving deferred content where needed
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for undeclared names and `Fetch` when deferred
    /// content cannot be retrieved.
    fn get(&self, field: &str) -> Result<Value>;

    /// # Errors
    ///
    /// As [`FieldAccess::get`], plus `TypeMismatch` if the value is not text.
    fn text(&self, field: &str) -> Result<Option<String>> {
        Ok(self.get(field)?.into_optional_text(field)?)
    }

    /// # Errors
    ///
    /// As [`FieldAccess::get`], plus `TypeMismatch` if the value is not an integer.
    fn integer(&self, field: &str) -> Result<Option<i64>> {
        Ok(self.get(field)?.into_optional_integer(field)?)
    }

    /// # Errors
    ///
    /// As [`FieldAccess::get`], plus `TypeMismatch` if the value is not bytes.
    fn bytes(&self, field: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.get(field)?.into_optional_bytes(field)?)
    }
}

#[derive(Debug)]
enum Slot {
    Stored,
    RemoteRef {
        url: String,
        resolved: OnceCell<Vec<u8>>,
    },
}

/// An entity with lazily resolved deferred fields
pub struct Deferred<T: Entity> {
    inner: T,
    slots: BTreeMap<&'static str, Slot>,
    fetcher: Arc<dyn RemoteFetcher>,
}

impl<T: Entity> Deferred<T> {
    /// Wrap a populated instance
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the entity cannot read one of its own
    /// declared deferred fields.
    pub fn new(inner: T, fetcher: Arc<dyn RemoteFetcher>) -> Result<Self> {
        let mut slots = BTreeMap::new();
        for field in T::descriptor().fields.iter().filter(|f| f.is_deferred_remote()) {
            let slot = match inner.field(field.name)? {
                Value::Bytes(bytes) => match coder::remote_ref(&bytes) {
                    Some(url) => Slot::RemoteRef {
                        url: url.to_string(),
                        resolved: OnceCell::new(),
                    },
                    None => Slot::Stored,
                },
                _ => Slot::Stored,
            };
            slots.insert(field.name, slot);
        }

        Ok(Self {
            inner,
            slots,
            fetcher,
        })
    }

    /// The stored value of a field, without resolving remote content
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for undeclared names.
    pub fn raw(&self, field: &str) -> Result<Value> {
        Ok(self.inner.field(field)?)
    }

    /// Whether reading `field` would not trigger a fetch
    pub fn is_resolved(&self, field: &str) -> bool {
        match self.slots.get(field) {
            Some(Slot::RemoteRef { resolved, .. }) => resolved.get().is_some(),
            Some(Slot::Stored) | None => true,
        }
    }

    /// The URL a deferred field points at, if its stored bytes are one
    pub fn remote_url(&self, field: &str) -> Option<&str> {
        match self.slots.get(field) {
            Some(Slot::RemoteRef { url, .. }) => Some(url),
            _ => None,
        }
    }

    /// Names of the deferred fields, in name order
    pub fn deferred_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.keys().copied()
    }

    /// The captured instance, holding stored values only
    pub fn as_stored(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    fn resolve(&self, field: &str, url: &str, resolved: &OnceCell<Vec<u8>>) -> Result<Value> {
        let bytes = resolved.get_or_try_init(|| {
            let table = T::descriptor().name;
            let start = Instant::now();
            log_op_start!("resolve_deferred", table = table, field = field);
            let fetched = self.fetcher.fetch(url).map_err(|e| e.with_field(field));
            let duration_ms = start.elapsed().as_millis() as u64;
            match &fetched {
                Ok(bytes) => {
                    log_op_end!(
                        "resolve_deferred",
                        duration_ms = duration_ms,
                        table = table,
                        field = field,
                        bytes = bytes.len()
                    );
                }
                Err(e) => {
                    log_op_error!(
                        "resolve_deferred",
                        e.clone(),
                        duration_ms = duration_ms,
                        table = table,
                        field = field
                    );
                }
            }
            fetched
        })?;
        Ok(Value::Bytes(bytes.clone()))
    }
}

impl<T: Entity> FieldAccess for Deferred<T> {
    fn get(&self, field: &str) -> Result<Value> {
        match self.slots.get(field) {
            Some(Slot::RemoteRef { url, resolved }) => self.resolve(field, url, resolved),
            Some(Slot::Stored) | None => self.raw(field),
        }
    }
}

impl<T: Entity + fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("inner", &self.inner)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

/// Result of a load: the plain instance, or a proxy when the type has
/// deferred fields
#[derive(Debug)]
pub enum Loaded<T: Entity> {
    Plain(T),
    Deferred(Deferred<T>),
}

impl<T: Entity> Loaded<T> {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Loaded::Deferred(_))
    }

    /// The instance with stored values, discarding any proxy
    pub fn into_stored(self) -> T {
        match self {
            Loaded::Plain(t) => t,
            Loaded::Deferred(d) => d.into_inner(),
        }
    }

    pub fn as_deferred(&self) -> Option<&Deferred<T>> {
        match self {
            Loaded::Plain(_) => None,
            Loaded::Deferred(d) => Some(d),
        }
    }
}

impl<T: Entity> FieldAccess for Loaded<T> {
    fn get(&self, field: &str) -> Result<Value> {
        match self {
            Loaded::Plain(t) => Ok(t.field(field)?),
            Loaded::Deferred(d) => d.get(field),
        }
    }
}
