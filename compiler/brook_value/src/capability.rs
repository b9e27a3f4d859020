//! Capabilities host code implements to expose its data to templates.
//!
//! Templates never see Rust types directly. A host type either implements
//! [`Indexable`] (and becomes a `Value::Dictionary`), or implements
//! [`HostObject`] (and becomes a `Value::Object`) whose members are read by
//! accessors registered in the evaluator's member-access registry.

use std::any::Any;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::Value;

/// Upcast helper so registries can key accessors on the concrete type.
///
/// Blanket-implemented for every `'static` type; host code never implements
/// it by hand. Call it through a `&dyn Indexable` / `&dyn HostObject`
/// receiver so the concrete type's `TypeId` is reported, not the pointer's.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Key-based lookup, count, and ordered key enumeration.
///
/// Implemented by [`ValueMap`] and by any host collection that wants to
/// behave like a dictionary in templates.
pub trait Indexable: AsAny + Send + Sync + fmt::Debug {
    fn count(&self) -> usize;

    /// Keys in enumeration order.
    fn keys(&self) -> Vec<String>;

    fn try_get_value(&self, key: &str) -> Option<Value>;
}

impl dyn Indexable {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// An opaque host value.
///
/// Members are resolved by the evaluator's member-access registry. The
/// optional capability hooks let the registry and the loop machinery treat
/// the object as a dictionary or as a sequence without knowing its type.
pub trait HostObject: AsAny + Send + Sync + fmt::Debug {
    /// Indexable view of this object, if it has one.
    fn as_indexable(&self) -> Option<&dyn Indexable> {
        None
    }

    /// Elements produced when the object is the source of a `for` loop.
    fn enumerate(&self) -> Option<Vec<Value>> {
        None
    }

    /// Text written when the object itself is output.
    fn to_text(&self) -> String {
        String::new()
    }
}

impl dyn HostObject {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Resolves named members of host values.
///
/// Implemented by the evaluator's member-access registry. Values call back
/// into it from `Value::get_value`; both methods return `None` on a miss so
/// the value can fall back to its own index lookup.
pub trait MemberLookup {
    fn lookup_object(&self, object: &dyn HostObject, name: &str) -> Option<Value>;

    fn lookup_indexable(&self, indexable: &dyn Indexable, name: &str) -> Option<Value>;
}

/// A lookup that never resolves anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMembers;

impl MemberLookup for NoMembers {
    fn lookup_object(&self, _object: &dyn HostObject, _name: &str) -> Option<Value> {
        None
    }

    fn lookup_indexable(&self, _indexable: &dyn Indexable, _name: &str) -> Option<Value> {
        None
    }
}

/// Insertion-ordered string-keyed map, the built-in dictionary.
#[derive(Clone, Default)]
pub struct ValueMap {
    entries: Vec<(String, Value)>,
    index: FxHashMap<String, usize>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Replacing keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Indexable for ValueMap {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    fn try_get_value(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
