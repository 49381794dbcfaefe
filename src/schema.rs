//! Static shape of the configuration tree and per-record field dispatch.
//!
//! Every record type carries two things:
//!
//! - a `FIELDS` table of [`FieldMeta`] in declaration order. Each entry names
//!   the serialization key, whether the field is required, a one-line doc, and
//!   the field's [`Shape`]. Nested records point at their own tables, so a
//!   dotted path can be checked end to end without touching a live tree.
//! - an implementation of [`Record`], a hand-written `key -> accessor` match
//!   that hands out borrowed views of a field ([`NodeRef`] / [`NodeMut`]).
//!
//! The override engine uses the tables to resolve a path and pick a coercion,
//! then uses the accessors to walk the live tree and write the leaf.

use std::fmt;

/// The closed set of scalar types a leaf can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Text,
    Bool,
    Int,
    Uint,
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeafKind::Text => "text",
            LeafKind::Bool => "boolean",
            LeafKind::Int => "signed integer",
            LeafKind::Uint => "unsigned integer",
        };
        f.write_str(name)
    }
}

/// An owned scalar, already coerced to its leaf's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
}

impl LeafValue {
    pub fn kind(&self) -> LeafKind {
        match self {
            LeafValue::Text(_) => LeafKind::Text,
            LeafValue::Bool(_) => LeafKind::Bool,
            LeafValue::Int(_) => LeafKind::Int,
            LeafValue::Uint(_) => LeafKind::Uint,
        }
    }

    /// Whether this is the type's zero value (empty text, `false`, `0`).
    pub fn is_zero(&self) -> bool {
        match self {
            LeafValue::Text(s) => s.is_empty(),
            LeafValue::Bool(b) => !b,
            LeafValue::Int(i) => *i == 0,
            LeafValue::Uint(u) => *u == 0,
        }
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafValue::Text(s) => f.write_str(s),
            LeafValue::Bool(b) => write!(f, "{b}"),
            LeafValue::Int(i) => write!(f, "{i}"),
            LeafValue::Uint(u) => write!(f, "{u}"),
        }
    }
}

/// What a field holds.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Leaf(LeafKind),
    Record(&'static [FieldMeta]),
    /// A record that stays absent until something is written beneath it.
    OptionalRecord(&'static [FieldMeta]),
}

/// Static description of one record field.
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta {
    pub key: &'static str,
    pub required: bool,
    pub doc: &'static str,
    pub shape: Shape,
}

impl FieldMeta {
    pub const fn leaf(key: &'static str, kind: LeafKind) -> Self {
        Self::new(key, Shape::Leaf(kind))
    }

    pub const fn record(key: &'static str, fields: &'static [FieldMeta]) -> Self {
        Self::new(key, Shape::Record(fields))
    }

    pub const fn optional_record(key: &'static str, fields: &'static [FieldMeta]) -> Self {
        Self::new(key, Shape::OptionalRecord(fields))
    }

    const fn new(key: &'static str, shape: Shape) -> Self {
        Self {
            key,
            required: false,
            doc: "",
            shape,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }
}

/// Find a field by serialization key. First match in declaration order wins.
pub fn find_field(fields: &'static [FieldMeta], key: &str) -> Option<&'static FieldMeta> {
    fields.iter().find(|f| f.key == key)
}

/// A record whose fields are addressable by serialization key.
pub trait Record {
    /// The record's field table, in declaration order.
    fn fields(&self) -> &'static [FieldMeta];

    fn get(&self, key: &str) -> Option<NodeRef<'_>>;

    fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>>;
}

/// Read-only view of a field.
pub enum NodeRef<'a> {
    Record(&'a dyn Record),
    Optional(Option<&'a dyn Record>),
    Leaf(LeafValue),
}

/// Mutable view of a field.
pub enum NodeMut<'a> {
    Record(&'a mut dyn Record),
    Optional(&'a mut dyn OptionalRecord),
    Leaf(LeafMut<'a>),
}

/// Mutable borrow of a scalar field.
pub enum LeafMut<'a> {
    Text(&'a mut String),
    Bool(&'a mut bool),
    Int(&'a mut i64),
    Uint(&'a mut u64),
}

impl LeafMut<'_> {
    pub fn kind(&self) -> LeafKind {
        match self {
            LeafMut::Text(_) => LeafKind::Text,
            LeafMut::Bool(_) => LeafKind::Bool,
            LeafMut::Int(_) => LeafKind::Int,
            LeafMut::Uint(_) => LeafKind::Uint,
        }
    }

    /// Store `value`, handing it back if its type does not match the slot.
    pub fn assign(self, value: LeafValue) -> Result<(), LeafValue> {
        match (self, value) {
            (LeafMut::Text(slot), LeafValue::Text(v)) => *slot = v,
            (LeafMut::Bool(slot), LeafValue::Bool(v)) => *slot = v,
            (LeafMut::Int(slot), LeafValue::Int(v)) => *slot = v,
            (LeafMut::Uint(slot), LeafValue::Uint(v)) => *slot = v,
            (_, other) => return Err(other),
        }
        Ok(())
    }
}

/// An owned-optional record slot (`Option<T>`).
pub trait OptionalRecord {
    fn record(&self) -> Option<&dyn Record>;

    /// The contained record, allocating `T::default()` first if absent.
    fn allocate(&mut self) -> &mut dyn Record;
}

impl<T: Record + Default> OptionalRecord for Option<T> {
    fn record(&self) -> Option<&dyn Record> {
        self.as_ref().map(|r| r as &dyn Record)
    }

    fn allocate(&mut self) -> &mut dyn Record {
        self.get_or_insert_with(T::default)
    }
}

/// Collect every addressable leaf path under `fields`, in declaration order.
///
/// Optional records contribute their leaves too, since writing one of them
/// allocates the record.
pub fn leaf_paths(fields: &'static [FieldMeta]) -> Vec<String> {
    let mut out = Vec::new();
    collect_leaf_paths(fields, "", &mut out);
    out
}

fn collect_leaf_paths(fields: &'static [FieldMeta], prefix: &str, out: &mut Vec<String>) {
    for field in fields {
        let dotted = if prefix.is_empty() {
            field.key.to_string()
        } else {
            format!("{prefix}.{}", field.key)
        };
        match field.shape {
            Shape::Leaf(_) => out.push(dotted),
            Shape::Record(nested) | Shape::OptionalRecord(nested) => {
                collect_leaf_paths(nested, &dotted, out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{TestConfig, TestLimits};

    #[test]
    fn leaf_mut_assigns_matching_kind() {
        let mut n = 0u64;
        LeafMut::Uint(&mut n).assign(LeafValue::Uint(42)).unwrap();
        assert_eq!(n, 42);
    }

    #[test]
    fn leaf_mut_rejects_mismatched_kind() {
        let mut s = String::from("keep");
        let err = LeafMut::Text(&mut s).assign(LeafValue::Bool(true));
        assert_eq!(err, Err(LeafValue::Bool(true)));
        assert_eq!(s, "keep");
    }

    #[test]
    fn zero_values() {
        assert!(LeafValue::Text(String::new()).is_zero());
        assert!(LeafValue::Bool(false).is_zero());
        assert!(LeafValue::Int(0).is_zero());
        assert!(!LeafValue::Uint(1).is_zero());
        assert!(!LeafValue::Text("x".into()).is_zero());
    }

    #[test]
    fn optional_allocates_once() {
        let mut slot: Option<TestLimits> = None;
        assert!(slot.record().is_none());
        slot.allocate();
        assert!(slot.record().is_some());
        assert_eq!(slot, Some(TestLimits::default()));
    }

    #[test]
    fn find_field_is_case_sensitive() {
        assert!(find_field(TestConfig::FIELDS, "host").is_some());
        assert!(find_field(TestConfig::FIELDS, "HOST").is_none());
    }

    #[test]
    fn leaf_paths_descend_into_all_records() {
        let paths = leaf_paths(TestConfig::FIELDS);
        assert_eq!(
            paths,
            vec![
                "host",
                "port",
                "debug",
                "offset",
                "database.url",
                "database.pool_size",
                "database.limits.max_rows",
                "database.limits.label",
            ]
        );
    }

    #[test]
    fn leaf_paths_exclude_sections() {
        let paths = leaf_paths(TestConfig::FIELDS);
        assert!(!paths.iter().any(|p| p == "database"));
        assert!(!paths.iter().any(|p| p == "database.limits"));
    }
}
