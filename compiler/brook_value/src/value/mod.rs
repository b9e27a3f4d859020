//! Runtime values for the Brook interpreter.
//!
//! # Factory Methods
//!
//! Heap variants are created through factory methods; `Heap::new` is
//! crate-private.
//!
//! ```text
//! let s = Value::string("hello");
//! let list = Value::array(vec![Value::Number(1.0)]);
//! let dict = Value::dictionary(ValueMap::new());
//! ```
//!
//! # Conversion Rules
//!
//! - Truthiness: only `Nil` and `Boolean(false)` are falsy. `0`, `""` and
//!   empty collections are truthy.
//! - Numbers: strings parse with the invariant culture, everything that is
//!   not a number converts to `0`.
//! - Strings: total; containers that have no textual form produce `""`.
//!
//! # Equality
//!
//! Equality is pairwise by variant. `Nil` equals an empty array or an empty
//! dictionary; no other cross-variant pair is equal. Dictionary equality
//! walks only the left operand's keys, so two host `Indexable`
//! implementations that enumerate differently can compare unequal in one
//! direction and equal in the other.

mod heap;
mod iter;
mod number;

use std::fmt;
use std::sync::Arc;

pub use heap::Heap;
pub use iter::ValueIter;
pub use number::{format_number, parse_number};

use crate::{Culture, HostObject, Indexable, MemberLookup, ValueMap};

/// Runtime value of a template expression.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Number(f64),
    String(Heap<String>),
    Array(Heap<Vec<Value>>),
    /// Anything exposing key lookup, key enumeration and a count.
    Dictionary(Heap<dyn Indexable>),
    /// Opaque host value; members resolve through the member-access registry.
    Object(Heap<dyn HostObject>),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    pub fn dictionary<T: Indexable>(map: T) -> Self {
        let shared: Arc<dyn Indexable> = Arc::new(map);
        Value::Dictionary(Heap::from_arc(shared))
    }

    /// Wrap an indexable that the host keeps a handle to.
    pub fn shared_dictionary(map: Arc<dyn Indexable>) -> Self {
        Value::Dictionary(Heap::from_arc(map))
    }

    pub fn object<T: HostObject>(object: T) -> Self {
        let shared: Arc<dyn HostObject> = Arc::new(object);
        Value::Object(Heap::from_arc(shared))
    }

    /// Wrap a host object that the host keeps a handle to.
    pub fn shared_object(object: Arc<dyn HostObject>) -> Self {
        Value::Object(Heap::from_arc(object))
    }
}

// Conversions

impl Value {
    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Dictionary(_) => "dictionary",
            Value::Object(_) => "object",
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Only `nil` and `false` are falsy.
    #[inline]
    pub fn to_boolean(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Boolean(true) => 1.0,
            Value::Number(n) => *n,
            Value::String(s) => parse_number(s).unwrap_or(0.0),
            Value::Nil
            | Value::Boolean(false)
            | Value::Array(_)
            | Value::Dictionary(_)
            | Value::Object(_) => 0.0,
        }
    }

    /// `to_number` truncated toward zero. NaN converts to `0`, out-of-range
    /// values saturate.
    pub fn to_integer(&self) -> i64 {
        self.to_number().trunc() as i64
    }

    /// Invariant-culture text of this value.
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Nil | Value::Dictionary(_) => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => (**s).clone(),
            Value::Array(items) => items.iter().map(Value::to_string_value).collect(),
            Value::Object(object) => object.to_text(),
        }
    }

    /// Text written by an output statement: numbers follow `culture`.
    pub fn to_output_string(&self, culture: &Culture) -> String {
        match self {
            Value::Number(n) => culture.format_number(*n),
            Value::Array(items) => items.iter().map(|v| v.to_output_string(culture)).collect(),
            _ => self.to_string_value(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Element, key or character count for values that have one.
    pub fn size(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            Value::Dictionary(map) => Some(map.count()),
            Value::Object(object) => object.as_indexable().map(|map| map.count()),
            Value::Nil | Value::Boolean(_) | Value::Number(_) => None,
        }
    }
}

// Enumeration and Access

impl Value {
    /// Sequence this value produces as a loop source.
    ///
    /// Arrays yield their elements, dictionaries yield `[key, value]` pairs,
    /// objects yield their host enumeration (or their indexable pairs), and
    /// everything else is empty.
    pub fn enumerate(&self) -> ValueIter {
        match self {
            Value::Array(items) => ValueIter::array(items.clone()),
            Value::Dictionary(map) => ValueIter::dictionary(map.clone()),
            Value::Object(object) => {
                if let Some(items) = object.enumerate() {
                    ValueIter::elements(items)
                } else if let Some(map) = object.as_indexable() {
                    ValueIter::elements(indexable_pairs(map))
                } else {
                    ValueIter::empty()
                }
            }
            Value::Nil | Value::Boolean(_) | Value::Number(_) | Value::String(_) => {
                ValueIter::empty()
            }
        }
    }

    /// Bracket access. Misses are `Nil`, never errors.
    ///
    /// Arrays accept numbers and numeric strings, truncated; negative and
    /// out-of-range positions miss. Dictionaries and indexable objects use
    /// the key's string form.
    pub fn get_index(&self, key: &Value) -> Value {
        match self {
            Value::Array(items) => array_position(key)
                .and_then(|i| items.get(i).cloned())
                .unwrap_or(Value::Nil),
            Value::Dictionary(map) => map
                .try_get_value(&key.to_string_value())
                .unwrap_or(Value::Nil),
            Value::Object(object) => object
                .as_indexable()
                .and_then(|map| map.try_get_value(&key.to_string_value()))
                .unwrap_or(Value::Nil),
            Value::Nil | Value::Boolean(_) | Value::Number(_) | Value::String(_) => Value::Nil,
        }
    }

    /// Property-style access (`value.name`).
    ///
    /// `size` is answered by the value itself; arrays also answer `first`
    /// and `last`, and treat any other name as a position (`items.1`).
    /// Dictionaries and objects ask `members` first and fall
    /// back to key lookup.
    pub fn get_value(&self, name: &str, members: &dyn MemberLookup) -> Value {
        match self {
            Value::Array(items) => match name {
                "size" => Value::from(items.len()),
                "first" => items.first().cloned().unwrap_or(Value::Nil),
                "last" => items.last().cloned().unwrap_or(Value::Nil),
                _ => self.get_index(&Value::string(name)),
            },
            Value::String(s) if name == "size" => Value::from(s.chars().count()),
            Value::Dictionary(map) => {
                if name == "size" {
                    return Value::from(map.count());
                }
                let target: &dyn Indexable = &**map;
                members
                    .lookup_indexable(target, name)
                    .or_else(|| target.try_get_value(name))
                    .unwrap_or(Value::Nil)
            }
            Value::Object(object) => {
                let target: &dyn HostObject = &**object;
                if let Some(found) = members.lookup_object(target, name) {
                    return found;
                }
                match target.as_indexable() {
                    Some(map) if name == "size" => Value::from(map.count()),
                    Some(map) => map.try_get_value(name).unwrap_or(Value::Nil),
                    None => Value::Nil,
                }
            }
            Value::Nil | Value::Boolean(_) | Value::Number(_) | Value::String(_) => Value::Nil,
        }
    }

    /// Membership test used by the `contains` operator.
    pub fn contains(&self, needle: &Value) -> bool {
        match self {
            Value::Array(items) => items.iter().any(|item| item.equals(needle)),
            Value::String(s) => s.contains(needle.to_string_value().as_str()),
            Value::Dictionary(map) => map
                .keys()
                .iter()
                .any(|key| map.try_get_value(key).is_some_and(|v| v.equals(needle))),
            Value::Nil | Value::Boolean(_) | Value::Number(_) | Value::Object(_) => false,
        }
    }

    /// Template equality. See the module docs for the cross-variant rules.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Nil, Value::Array(items)) | (Value::Array(items), Value::Nil) => {
                items.is_empty()
            }
            (Value::Nil, Value::Dictionary(map)) | (Value::Dictionary(map), Value::Nil) => {
                map.count() == 0
            }
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a.as_str() == b.as_str(),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Dictionary(a), Value::Dictionary(b)) => dictionary_equals(&**a, &**b),
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Walks `left`'s keys only; see the module docs.
fn dictionary_equals(left: &dyn Indexable, right: &dyn Indexable) -> bool {
    if left.count() != right.count() {
        return false;
    }
    left.keys().iter().all(|key| match right.try_get_value(key) {
        Some(theirs) => left
            .try_get_value(key)
            .unwrap_or(Value::Nil)
            .equals(&theirs),
        None => false,
    })
}

fn indexable_pairs(map: &dyn Indexable) -> Vec<Value> {
    map.keys()
        .into_iter()
        .map(|key| {
            let value = map.try_get_value(&key).unwrap_or(Value::Nil);
            Value::array(vec![Value::string(key), value])
        })
        .collect()
}

fn array_position(key: &Value) -> Option<usize> {
    let n = match key {
        Value::Number(n) => *n,
        Value::String(s) => parse_number(s)?,
        _ => return None,
    };
    let n = n.trunc();
    if n.is_nan() || n < 0.0 {
        None
    } else {
        Some(n as usize)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_value())
    }
}

// From impls for host convenience

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::dictionary(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::array(iter.into_iter().collect())
    }
}
