//! Shared variable cells that flags write into.
//!
//! A [`Var`] plays the part of a pointer to caller-owned memory: the caller
//! keeps one handle, the flag set keeps another, and every value parsed from
//! the command line lands in the shared cell.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::TypeKey;

/// A cloneable, thread-safe handle to a value that a flag writes into.
pub struct Var<T>(Arc<RwLock<T>>);

impl<T> Var<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Copy of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.read().clone()
    }

    pub fn set(&self, value: T) {
        *self.0.write() = value;
    }

    /// Swap in `value`, returning what was there before.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.0.write(), value)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Whether both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Var<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for Var<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Var<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Var").field(&*self.0.read()).finish()
    }
}

impl<T: Serialize> Serialize for Var<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.read().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Var<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Var::new)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Something that can be handed to [`Confinator::bind`](crate::Confinator::bind).
///
/// Implemented for [`Var<T>`] (never nil) and `Option<Var<T>>` (nil when
/// `None`). Both resolve to the key of `T`, so a handler registered for `T`
/// serves either form.
pub trait Pointer: sealed::Sealed {
    /// Key of the pointee type.
    fn type_key(&self) -> TypeKey;

    /// The underlying `Var<T>` as `Any`, or `None` for a nil pointer.
    fn target(&self) -> Option<&dyn Any>;
}

impl<T: Send + Sync + 'static> sealed::Sealed for Var<T> {}

impl<T: Send + Sync + 'static> Pointer for Var<T> {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn target(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl<T: Send + Sync + 'static> sealed::Sealed for Option<Var<T>> {}

impl<T: Send + Sync + 'static> Pointer for Option<Var<T>> {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn target(&self) -> Option<&dyn Any> {
        self.as_ref().map(|var| var as &dyn Any)
    }
}
