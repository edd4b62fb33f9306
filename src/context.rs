//! Request-scoped values that can be copied into a record.
//!
//! Loggers pull named values out of whatever the application uses to carry
//! request state through the [`Lookup`] capability. Implementations are
//! provided for the common map types and for closures via [`lookup_fn`].

use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Looks up a value by key.
///
/// `None` and JSON `null` both mean "absent"; neither ends up in a record.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<JsonValue>;
}

impl<T: Lookup + ?Sized> Lookup for &T {
    fn lookup(&self, key: &str) -> Option<JsonValue> {
        (**self).lookup(key)
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<JsonValue> {
        self.get(key).map(|v| JsonValue::String(v.clone()))
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, JsonValue, S> {
    fn lookup(&self, key: &str) -> Option<JsonValue> {
        self.get(key).cloned()
    }
}

impl<S: BuildHasher> Lookup for HashMap<&str, &str, S> {
    fn lookup(&self, key: &str) -> Option<JsonValue> {
        self.get(key).map(|v| JsonValue::String((*v).to_string()))
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<JsonValue> {
        self.get(key).map(|v| JsonValue::String(v.clone()))
    }
}

impl Lookup for BTreeMap<String, JsonValue> {
    fn lookup(&self, key: &str) -> Option<JsonValue> {
        self.get(key).cloned()
    }
}

impl Lookup for serde_json::Map<String, JsonValue> {
    fn lookup(&self, key: &str) -> Option<JsonValue> {
        self.get(key).cloned()
    }
}

/// Adapter returned by [`lookup_fn`].
pub struct FnLookup<F>(F);

impl<F> Lookup for FnLookup<F>
where
    F: Fn(&str) -> Option<JsonValue>,
{
    fn lookup(&self, key: &str) -> Option<JsonValue> {
        (self.0)(key)
    }
}

/// Use a closure as a [`Lookup`].
pub fn lookup_fn<F>(f: F) -> FnLookup<F>
where
    F: Fn(&str) -> Option<JsonValue>,
{
    FnLookup(f)
}

/// Build the map of `keys` that `source` can resolve.
///
/// Returns `None` when no key resolves, so callers attach nothing rather
/// than an empty map.
pub fn extract<L, I, K>(source: &L, keys: I) -> Option<BTreeMap<String, JsonValue>>
where
    L: Lookup + ?Sized,
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let mut found = BTreeMap::new();
    for key in keys {
        let key = key.as_ref();
        match source.lookup(key) {
            Some(JsonValue::Null) | None => {}
            Some(value) => {
                found.insert(key.to_string(), value);
            }
        }
    }
    (!found.is_empty()).then_some(found)
}
