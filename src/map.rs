//! Dotted path attribute map.
use std::{collections::BTreeMap, error::Error, fmt};

/// A dynamically typed value held by a [`Map`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(value: Vec<V>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

// ===== Map =====

/// Nested key value entries addressed by dotted paths.
///
/// A key such as `"group.subgroup.param"` walks intermediate [`Value::Map`]
/// levels. [`Map::set`] creates the intermediate levels it needs,
/// replacing any non-map value standing in the way.
///
/// # Example
///
/// ```
/// use velin::Map;
///
/// let mut map = Map::new();
/// map.set("db.host", "localhost").set("db.port", 5432i64);
/// assert_eq!(map.get("db.port").unwrap().as_int(), Some(5432));
/// assert!(map.get("db.user").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Map {
    entries: BTreeMap<String, Value>,
}

impl Map {
    pub fn new() -> Map {
        Map { entries: BTreeMap::new() }
    }

    /// Look an entry up by dotted path.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut current: Option<&Value> = None;
        for part in key.split('.') {
            let level = match current {
                None => &self.entries,
                Some(Value::Map(map)) => map,
                Some(_) => return None,
            };
            current = Some(level.get(part)?);
        }
        current
    }

    /// Look an entry up, falling back to `default` when the path resolves
    /// to nothing.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Like [`Map::get`] but missing entries are an error.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] naming the full path.
    pub fn require(&self, key: &str) -> Result<&Value, NotFound> {
        self.get(key).ok_or_else(|| NotFound { key: key.to_owned() })
    }

    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store an entry, creating intermediate levels along the path.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let mut level = &mut self.entries;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                level.insert(part.to_owned(), value.into());
                return self;
            }
            let slot = level
                .entry(part.to_owned())
                .or_insert_with(|| Value::Map(BTreeMap::new()));
            if !matches!(slot, Value::Map(_)) {
                *slot = Value::Map(BTreeMap::new());
            }
            level = match slot {
                Value::Map(map) => map,
                _ => unreachable!(),
            };
        }
        self
    }

    /// Drop an entry. Paths that do not resolve are ignored.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        let mut level = &mut self.entries;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                level.remove(part);
                return self;
            }
            level = match level.get_mut(part) {
                Some(Value::Map(map)) => map,
                _ => return self,
            };
        }
        self
    }

    /// Overlay another map's top level entries onto this one.
    ///
    /// On key conflicts `other` wins; nested maps are replaced whole, not
    /// merged recursively.
    pub fn merge(&mut self, other: Map) -> &mut Self {
        self.entries.extend(other.entries);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the top level entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ===== Error =====

/// Error from [`Map::require`] when a path resolves to nothing.
#[derive(Debug)]
pub struct NotFound {
    key: String,
}

impl NotFound {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Error for NotFound {}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry `{}` was not found", self.key)
    }
}

#[cfg(test)]
mod test {
    use super::{Map, Value};

    #[test]
    fn flat_entries() {
        let mut map = Map::new();
        map.set("name", "velin").set("workers", 4i64);
        assert_eq!(map.get("name").unwrap().as_str(), Some("velin"));
        assert_eq!(map.get("workers").unwrap().as_int(), Some(4));
        assert!(map.has("name"));
        assert!(!map.has("missing"));

        let fallback = Value::Int(0);
        assert_eq!(map.get_or("workers", &fallback).as_int(), Some(4));
        assert_eq!(map.get_or("missing", &fallback).as_int(), Some(0));
    }

    #[test]
    fn dotted_paths_create_levels() {
        let mut map = Map::new();
        map.set("a.b.c", true);
        assert_eq!(map.get("a.b.c").unwrap().as_bool(), Some(true));
        assert!(matches!(map.get("a.b"), Some(Value::Map(_))));
        assert!(map.get("a.b.c.d").is_none());
    }

    #[test]
    fn set_replaces_scalar_intermediate() {
        let mut map = Map::new();
        map.set("a", 1i64);
        map.set("a.b", 2i64);
        assert_eq!(map.get("a.b").unwrap().as_int(), Some(2));
        assert!(map.get("a").unwrap().as_int().is_none());
    }

    #[test]
    fn require_names_the_path() {
        let map = Map::new();
        let err = map.require("svc.endpoint").unwrap_err();
        assert_eq!(err.key(), "svc.endpoint");
        assert_eq!(err.to_string(), "entry `svc.endpoint` was not found");
    }

    #[test]
    fn remove_is_lenient() {
        let mut map = Map::new();
        map.set("a.b", 1i64);
        map.remove("a.b").remove("a.x.y").remove("nope");
        assert!(map.get("a.b").is_none());
        assert!(map.has("a"));
    }

    #[test]
    fn merge_other_wins_at_top_level() {
        let mut base: Map = [("kept", 1i64), ("replaced", 2i64)].into_iter().collect();
        let other: Map = [("replaced", 20i64), ("added", 3i64)].into_iter().collect();
        base.merge(other);
        assert_eq!(base.get("kept").unwrap().as_int(), Some(1));
        assert_eq!(base.get("replaced").unwrap().as_int(), Some(20));
        assert_eq!(base.get("added").unwrap().as_int(), Some(3));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn list_values() {
        let mut map = Map::new();
        map.set("tags", vec!["a", "b"]);
        let tags = map.get("tags").unwrap().as_list().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].as_str(), Some("a"));
    }
}
