//! Kestrel runtime value layer (`libkes_rt`).
//!
//! Runtime support for compiled Kestrel programs. Generated code constructs,
//! inspects, and destroys algebraic values through this crate without
//! knowing the in-memory layout of any user-defined type.
//!
//! # Operation Categories
//!
//! - **Constructors**: [`Heap::make_unit`], [`Heap::make_product`],
//!   [`Heap::make_union`]
//! - **Accessors**: [`Heap::project`], [`Heap::variant_index`],
//!   [`Heap::union_payload`], [`Heap::has_type`]
//! - **Ownership**: [`Heap::retain`], [`Heap::release`], [`Heap::refcount`]
//! - **Debugging**: [`Heap::format_value`]
//!
//! # Ownership Protocol
//!
//! Every value starts at refcount 1. Handing a value to a constructor as a
//! field or payload transfers ownership — retain first to keep using it.
//! Every handle an accessor returns is an additional shared reference the
//! receiver must eventually release. The unit singleton is shared, never
//! owned, and exempt from all counting.
//!
//! # Embedding
//!
//! The compiler declares its types into a [`TypeTable`], builds a [`Heap`]
//! around it, and threads `&mut Heap` through generated code. All
//! operations are synchronous and allocation-proportional; a multi-threaded
//! embedding serializes access with a lock of its choosing.

mod access;
mod errors;
mod format;
mod heap;
mod rc;
mod value;

pub use errors::{RuntimeError, RuntimeResult};
pub use heap::Heap;
pub use value::ValueId;

// Generated code needs the table types at startup; re-export them so the
// runtime crate is a one-stop dependency.
pub use kes_types::{TypeDecl, TypeId, TypeKind, TypeTable};

#[cfg(test)]
mod test_helpers;
