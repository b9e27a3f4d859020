//! Member resolution for host values.
//!
//! Templates reach into host data with `a.b`. For dictionaries that is a key
//! lookup, but host objects are opaque: the host decides which members are
//! visible by registering accessors here, keyed by the object's `TypeId`.
//!
//! # Resolution Order
//!
//! 1. A property accessor registered for the exact type and member name
//! 2. A type-wide accessor registered for the exact type
//! 3. Capability accessors, in registration order (the built-in
//!    `indexable` capability is installed first)
//! 4. Otherwise `None`, which the caller turns into `Value::Nil`
//!
//! Types that were never registered skip the first two stages entirely.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use brook_value::{HostObject, Indexable, MemberLookup, Value};

/// Resolves `name` on an instance of one registered type.
///
/// The instance is passed as `&dyn Any`; accessors created through the
/// typed `register*` methods downcast it back to the registered type.
pub type MemberAccessor = Arc<dyn Fn(&dyn Any, &str) -> Option<Value> + Send + Sync>;

type CapabilityAccessor = Arc<dyn Fn(&dyn HostObject, &str) -> Option<Value> + Send + Sync>;

/// Which resolution stage produced a member.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemberSource {
    Property,
    Type,
    Capability(&'static str),
}

#[derive(Default)]
struct TypeAccessors {
    type_name: &'static str,
    properties: FxHashMap<String, MemberAccessor>,
    fallback: Option<MemberAccessor>,
}

impl TypeAccessors {
    fn resolve(&self, instance: &dyn Any, name: &str) -> Option<(Value, MemberSource)> {
        if let Some(getter) = self.properties.get(name) {
            if let Some(value) = getter(instance, name) {
                return Some((value, MemberSource::Property));
            }
        }
        let fallback = self.fallback.as_ref()?;
        fallback(instance, name).map(|value| (value, MemberSource::Type))
    }
}

/// Registry of member accessors, shared by every context that renders with
/// it (see [`crate::SharedMutableRegistry`]).
pub struct MemberAccessStrategy {
    types: FxHashMap<TypeId, TypeAccessors>,
    capabilities: Vec<(&'static str, CapabilityAccessor)>,
}

impl MemberAccessStrategy {
    /// A strategy with the built-in `indexable` capability: host objects
    /// exposing [`HostObject::as_indexable`] answer member names as keys.
    pub fn new() -> Self {
        let mut strategy = Self::empty();
        strategy.register_capability("indexable", |object, name| {
            object.as_indexable()?.try_get_value(name)
        });
        strategy
    }

    /// A strategy that resolves nothing until accessors are registered.
    pub fn empty() -> Self {
        MemberAccessStrategy {
            types: FxHashMap::default(),
            capabilities: Vec::new(),
        }
    }

    /// Register a type-wide accessor for `T`, consulted for every member
    /// name that has no dedicated property accessor.
    pub fn register<T, F>(&mut self, accessor: F)
    where
        T: Any,
        F: Fn(&T, &str) -> Option<Value> + Send + Sync + 'static,
    {
        tracing::debug!(ty = std::any::type_name::<T>(), "registered member accessor");
        let erased: MemberAccessor = Arc::new(move |instance: &dyn Any, name: &str| {
            accessor(instance.downcast_ref::<T>()?, name)
        });
        self.entry::<T>().fallback = Some(erased);
    }

    /// Register a single named member of `T`. Re-registering a name replaces
    /// the previous getter.
    pub fn register_property<T, F>(&mut self, name: impl Into<String>, getter: F)
    where
        T: Any,
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(
            ty = std::any::type_name::<T>(),
            member = %name,
            "registered member property"
        );
        let erased: MemberAccessor = Arc::new(move |instance: &dyn Any, _name: &str| {
            instance.downcast_ref::<T>().map(&getter)
        });
        self.entry::<T>().properties.insert(name, erased);
    }

    /// Register a capability lookup, asked for any host object whose exact
    /// type had no answer. Probes run in registration order.
    pub fn register_capability<F>(&mut self, capability: &'static str, lookup: F)
    where
        F: Fn(&dyn HostObject, &str) -> Option<Value> + Send + Sync + 'static,
    {
        tracing::debug!(capability, "registered member capability");
        self.capabilities.push((capability, Arc::new(lookup)));
    }

    pub fn is_registered<T: Any>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    /// Names of registered types, for diagnostics.
    pub fn registered_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.values().map(|accessors| accessors.type_name)
    }

    /// Resolve `name` on `instance` using only the accessors registered for
    /// its exact type.
    pub fn try_resolve(&self, instance: &dyn Any, name: &str) -> Option<Value> {
        self.resolve_exact(instance, name).map(|(value, _)| value)
    }

    /// Resolve `name` on a host object through every stage, reporting which
    /// stage answered.
    pub fn resolve_object(
        &self,
        object: &dyn HostObject,
        name: &str,
    ) -> Option<(Value, MemberSource)> {
        let any: &dyn Any = object.as_any();
        if let Some(found) = self.resolve_exact(any, name) {
            return Some(found);
        }
        for (capability, lookup) in &self.capabilities {
            if let Some(value) = lookup(object, name) {
                return Some((value, MemberSource::Capability(capability)));
            }
        }
        tracing::trace!(member = name, "member not resolved");
        None
    }

    fn resolve_exact(&self, instance: &dyn Any, name: &str) -> Option<(Value, MemberSource)> {
        self.types.get(&instance.type_id())?.resolve(instance, name)
    }

    fn entry<T: Any>(&mut self) -> &mut TypeAccessors {
        self.types
            .entry(TypeId::of::<T>())
            .or_insert_with(|| TypeAccessors {
                type_name: std::any::type_name::<T>(),
                ..TypeAccessors::default()
            })
    }
}

impl MemberLookup for MemberAccessStrategy {
    fn lookup_object(&self, object: &dyn HostObject, name: &str) -> Option<Value> {
        self.resolve_object(object, name).map(|(value, _)| value)
    }

    fn lookup_indexable(&self, map: &dyn Indexable, name: &str) -> Option<Value> {
        let any: &dyn Any = map.as_any();
        self.try_resolve(any, name)
    }
}

impl Default for MemberAccessStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemberAccessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capabilities: Vec<_> = self.capabilities.iter().map(|(name, _)| *name).collect();
        f.debug_struct("MemberAccessStrategy")
            .field("types", &self.types.len())
            .field("capabilities", &capabilities)
            .finish()
    }
}
