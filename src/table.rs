//! Property tables with chained defaults.
//!
//! A [`Table`] maps string keys to string values and may point to a
//! defaults table that is searched when a key is missing. The defaults are
//! held through a [`SharedTable`] handle, so several tables can share one
//! set of defaults.
//!
//! ## Examples
//!
//! ```rust
//! use proptable::Table;
//!
//! let mut defaults = Table::new();
//! defaults.set("color", "blue");
//! defaults.set("size", "small");
//! let defaults = defaults.into_shared();
//!
//! let mut table = Table::with_defaults(defaults.clone());
//! table.set("size", "large");
//!
//! assert_eq!(table.get("color"), "blue");
//! assert_eq!(table.get("size"), "large");
//! assert_eq!(table.get("missing"), "");
//!
//! // only `clear_all` reaches into the defaults
//! table.clear();
//! assert_eq!(table.get("size"), "small");
//! table.clear_all();
//! assert!(defaults.borrow().is_empty());
//! ```
//!
//! The defaults chain must not loop back on itself. Traversals stop when
//! they reach a table they already visited instead of running forever.

use crate::de::{split_entry, LogicalLine, LogicalLines};
use crate::ser::{encode_pair, Serializer};
use crate::{Error, Result, StoreOptions};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Read, Write};
use std::rc::Rc;

/// Shared handle to a table used as defaults by other tables.
///
/// No locking is done: the handle is single-threaded, and a table borrowed
/// mutably elsewhere is skipped by lookups.
pub type SharedTable = Rc<RefCell<Table>>;

/// A property table: key-value pairs plus an optional defaults table.
///
/// Entries keep their insertion order, so storing the same table twice
/// produces the same bytes.
#[derive(Debug, Clone, Default)]
pub struct Table {
    data: IndexMap<String, String>,
    defaults: Option<SharedTable>,
}

/// Walks the defaults chain, stopping at the first table seen twice.
struct DefaultsChain {
    next: Option<SharedTable>,
    seen: Vec<*const RefCell<Table>>,
}

impl Iterator for DefaultsChain {
    type Item = SharedTable;

    fn next(&mut self) -> Option<SharedTable> {
        let table = self.next.take()?;
        let ptr = Rc::as_ptr(&table);
        if self.seen.contains(&ptr) {
            log::warn!("defaults chain loops back on itself, stopping traversal");
            return None;
        }
        self.seen.push(ptr);
        self.next = match table.try_borrow() {
            Ok(inner) => inner.defaults.clone(),
            Err(_) => None,
        };
        Some(table)
    }
}

impl Table {
    /// Creates an empty table without defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table backed by `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: SharedTable) -> Self {
        Table {
            data: IndexMap::new(),
            defaults: Some(defaults),
        }
    }

    /// Wraps this table in a handle that other tables can use as defaults.
    #[must_use]
    pub fn into_shared(self) -> SharedTable {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    pub fn defaults(&self) -> Option<&SharedTable> {
        self.defaults.as_ref()
    }

    pub fn set_defaults(&mut self, defaults: Option<SharedTable>) {
        self.defaults = defaults;
    }

    fn chain(&self) -> DefaultsChain {
        DefaultsChain {
            next: self.defaults.clone(),
            seen: Vec::new(),
        }
    }

    /// Reads key-value pairs from `reader` into this table.
    ///
    /// Returns the number of pairs read. A key read twice keeps the last
    /// value. On an I/O error the pairs read so far stay in the table and
    /// [`Error::Load`] carries their count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proptable::Table;
    ///
    /// let input = "firstKey=firstValue\n\
    ///              second\\ key = second value\n\
    ///              third\\ key third \\\n  \textended value\n";
    ///
    /// let mut table = Table::new();
    /// assert_eq!(table.load(input.as_bytes()).unwrap(), 3);
    /// assert_eq!(table.get("second key"), "second value");
    /// assert_eq!(table.get("third key"), "third extended value");
    /// ```
    pub fn load<R: Read>(&mut self, reader: R) -> Result<usize> {
        self.load_buffered(io::BufReader::new(reader))
    }

    /// Like [`Table::load`], for a reader that is already buffered.
    pub fn load_buffered<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut loaded = 0;
        for line in LogicalLines::new(reader) {
            let line = line.map_err(|e| Error::load(loaded, e))?;
            if let LogicalLine::Entry(bytes) = line {
                let (key, value) = split_entry(&bytes);
                log::trace!("loaded property {:?}", key);
                self.data.insert(key, value);
                loaded += 1;
            }
        }
        log::debug!("loaded {} properties", loaded);
        Ok(loaded)
    }

    /// Reads key-value pairs from a string.
    pub fn load_str(&mut self, s: &str) -> Result<usize> {
        self.load_buffered(s.as_bytes())
    }

    /// Writes the pairs of this table, one record per line.
    ///
    /// Pairs of the defaults table are not written. With `ascii` set, every
    /// character outside `' '..='~'` is written as a `\uXXXX` escape.
    /// Returns the number of pairs written.
    pub fn store<W: Write>(&self, writer: W, ascii: bool) -> Result<usize> {
        self.store_with(writer, &StoreOptions::new().with_ascii(ascii))
    }

    /// Writes a comment block, then the pairs as [`Table::store`] does.
    ///
    /// Empty comments write nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proptable::Table;
    ///
    /// let mut table = Table::new();
    /// table.set("firstKey", "firstValue");
    ///
    /// let mut out = Vec::new();
    /// table.save(&mut out, "The first\r\nproperties entry", false).unwrap();
    /// assert_eq!(out, b"#The first\n#properties entry\nfirstKey=firstValue\n");
    /// ```
    pub fn save<W: Write>(&self, writer: W, comments: &str, ascii: bool) -> Result<usize> {
        let options = StoreOptions::new()
            .with_ascii(ascii)
            .with_comments(comments);
        self.store_with(writer, &options)
    }

    /// Writes this table as configured by `options`.
    pub fn store_with<W: Write>(&self, writer: W, options: &StoreOptions) -> Result<usize> {
        let mut serializer = Serializer::new(writer, options.clone());
        if let Some(comments) = &options.comments {
            serializer.write_comments(comments)?;
        }
        for (key, value) in &self.data {
            serializer.write_entry(key, value)?;
        }
        serializer.flush()?;
        log::debug!("stored {} properties", serializer.written());
        Ok(serializer.written())
    }

    /// Returns the text [`Table::save`] would write.
    pub fn save_to_string(&self, comments: &str, ascii: bool) -> Result<String> {
        let mut buf = Vec::new();
        self.save(&mut buf, comments, ascii)?;
        String::from_utf8(buf).map_err(Error::custom)
    }

    /// Searches `key` in this table, then along the defaults chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proptable::Table;
    ///
    /// let mut defaults = Table::new();
    /// defaults.set("k", "from defaults");
    /// let table = Table::with_defaults(defaults.into_shared());
    ///
    /// assert_eq!(table.lookup("k").as_deref(), Some("from defaults"));
    /// assert_eq!(table.lookup("nope"), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        if let Some(value) = self.data.get(key) {
            return Some(value.clone());
        }
        self.chain().find_map(|table| {
            let table = table.try_borrow().ok()?;
            table.data.get(key).cloned()
        })
    }

    /// Returns the value of `key`, or the empty string if neither this table
    /// nor its defaults hold it.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_default()
    }

    /// Associates `value` with `key` in this table, replacing any previous
    /// value. The defaults are left untouched.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.data.insert(key.into(), value.into())
    }

    /// Removes `key` from this table. Missing keys are ignored; the defaults
    /// are left untouched.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.data.shift_remove(key)
    }

    /// Removes every pair of this table, keeping the defaults.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Removes every pair of this table and of every table in its defaults
    /// chain.
    pub fn clear_all(&mut self) {
        self.clear();
        for table in self.chain() {
            match table.try_borrow_mut() {
                Ok(mut inner) => inner.data.clear(),
                Err(_) => log::warn!("defaults table is borrowed, not cleared"),
            };
        }
    }

    /// Returns the distinct keys of this table and its defaults chain.
    ///
    /// Local keys come first, followed by the keys only found in defaults.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: IndexSet<String> = self.data.keys().cloned().collect();
        for table in self.chain() {
            if let Ok(inner) = table.try_borrow() {
                keys.extend(inner.data.keys().cloned());
            }
        }
        keys.into_iter().collect()
    }

    /// Whether this table itself holds `key`; defaults are not searched.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Number of pairs in this table, defaults excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over the pairs of this table in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.data.iter()
    }

    #[must_use]
    pub fn as_map(&self) -> &IndexMap<String, String> {
        &self.data
    }
}

/// Formats the pairs of the table as UTF-8 properties text.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.data {
            writeln!(f, "{}", encode_pair(key, value, false))?;
        }
        Ok(())
    }
}

impl From<IndexMap<String, String>> for Table {
    fn from(data: IndexMap<String, String>) -> Self {
        Table {
            data,
            defaults: None,
        }
    }
}

impl From<HashMap<String, String>> for Table {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let data: IndexMap<String, String> = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Table::from(data)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Table {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.data
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(&self.data)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        IndexMap::<String, String>::deserialize(deserializer).map(Table::from)
    }
}
