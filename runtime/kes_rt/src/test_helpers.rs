//! Shared fixtures for runtime tests.

use kes_types::{TypeId, TypeTable};

use crate::Heap;

// Ids follow declaration order in `sample_types`.
pub(crate) const PAIR: TypeId = TypeId::from_raw(1);
pub(crate) const EMPTY: TypeId = TypeId::from_raw(2);
pub(crate) const WRAPPER: TypeId = TypeId::from_raw(3);
pub(crate) const STATUS: TypeId = TypeId::from_raw(4);

/// A table covering each declarable kind: two-field and zero-field
/// products, a one-field product, and a three-variant union.
pub(crate) fn sample_types() -> TypeTable {
    let mut types = TypeTable::new();
    types.declare_product("Pair", &["first", "second"]);
    types.declare_product("Empty", &[]);
    types.declare_product("Wrapper", &["inner"]);
    types.declare_union("Status", &["Idle", "Busy", "Done"]);
    types
}

pub(crate) fn sample_heap() -> Heap {
    Heap::new(sample_types())
}
