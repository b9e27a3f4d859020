//! Brook Value - Runtime values for the Brook template interpreter.
//!
//! This crate provides:
//! - The closed `Value` union (nil, boolean, number, string, array,
//!   dictionary, host object) with its conversion, equality and
//!   enumeration rules
//! - The `Indexable` and `HostObject` capabilities host code implements to
//!   expose its own data
//! - `Culture`, the numeric formatting hook used when values are written
//!
//! # Value Types
//!
//! Heap-backed variants go through `Heap<T>`, an `Arc` wrapper with a
//! crate-private constructor. Values are therefore cheap to clone and
//! `Send + Sync`, which lets independent renders run on separate threads.
//!
//! # Totality
//!
//! Nothing in this crate fails. Conversions have defaults, lookups that miss
//! return `Value::Nil`, and cross-variant equality is simply `false`.

mod capability;
mod culture;
mod value;

pub use capability::{AsAny, HostObject, Indexable, MemberLookup, NoMembers, ValueMap};
pub use culture::Culture;
pub use value::{format_number, parse_number, Heap, Value, ValueIter};
