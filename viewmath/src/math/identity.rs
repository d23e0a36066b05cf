//! Process-wide shared values keyed by type.
//!
//! Rust statics cannot be generic, so every `Matrix<T, N>` instantiation stores its identity in
//! one registry keyed by `TypeId`. Each value is built once, leaked, and read-only afterwards.
use parking_lot::RwLock;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::OnceLock,
};

type Registry = RwLock<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>;

fn registry() -> &'static Registry {
    static SHARED: OnceLock<Registry> = OnceLock::new();
    SHARED.get_or_init(Default::default)
}

/// Returns the shared value of type `M`, calling `build` only if no thread has built it yet.
///
/// Concurrent first callers serialize on the write lock and the second one finds the entry
/// already present, so `build` runs at most once per type.
pub(crate) fn shared<M: Any + Send + Sync>(build: impl FnOnce() -> M) -> &'static M {
    let key = TypeId::of::<M>();
    if let Some(&value) = registry().read().get(&key) {
        return downcast(value);
    }

    let mut map = registry().write();
    let value = *map
        .entry(key)
        .or_insert_with(|| -> &'static (dyn Any + Send + Sync) {
            log::debug!("building shared {}", std::any::type_name::<M>());
            let leaked: &'static M = Box::leak(Box::new(build()));
            leaked
        });
    downcast(value)
}

fn downcast<M: Any>(value: &'static (dyn Any + Send + Sync)) -> &'static M {
    match value.downcast_ref::<M>() {
        Some(value) => value,
        None => unreachable!(
            "registry entry for {} has the wrong type",
            std::any::type_name::<M>()
        ),
    }
}
