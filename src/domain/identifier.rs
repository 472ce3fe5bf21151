//! Identifier extraction for tree payloads
//!
//! The tree never inspects payloads directly. It asks an [`IdentifierOf`]
//! implementation for the key of a payload and compares keys.

use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

/// Payloads that carry their own identifier.
///
/// Returning `None` means "this payload has no identifier"; such nodes never
/// match a lookup but their children are still searched.
pub trait HasIdentifier {
    type Id: Clone + Eq + Hash + Debug;

    fn identifier(&self) -> Option<Self::Id>;
}

/// Extracts the identifier of a payload of type `T`.
///
/// Must be deterministic and free of side effects.
pub trait IdentifierOf<T> {
    type Id: Clone + Eq + Hash + Debug;

    fn identifier_of(&self, payload: &T) -> Option<Self::Id>;
}

/// Uses the payload's own [`HasIdentifier`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByTrait;

impl<T: HasIdentifier> IdentifierOf<T> for ByTrait {
    type Id = T::Id;

    fn identifier_of(&self, payload: &T) -> Option<T::Id> {
        payload.identifier()
    }
}

/// Closure-based extraction for payload types that cannot implement
/// [`HasIdentifier`] (foreign types, or types keyed differently per tree).
pub struct Extractor<F, K> {
    f: F,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> Extractor<F, K> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            _key: PhantomData,
        }
    }
}

impl<F, K> Debug for Extractor<F, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor").finish_non_exhaustive()
    }
}

impl<T, F, K> IdentifierOf<T> for Extractor<F, K>
where
    F: Fn(&T) -> Option<K>,
    K: Clone + Eq + Hash + Debug,
{
    type Id = K;

    fn identifier_of(&self, payload: &T) -> Option<K> {
        (self.f)(payload)
    }
}

impl HasIdentifier for u64 {
    type Id = u64;

    fn identifier(&self) -> Option<u64> {
        Some(*self)
    }
}
