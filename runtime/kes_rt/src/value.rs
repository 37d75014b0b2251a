//! Runtime value representation.
//!
//! A value is a slot in the [`Heap`](crate::Heap) holding a `type_id`, a
//! refcount, and one of three shapes: unit, product, or union. Generated
//! code never sees the slot — it holds [`ValueId`] handles and goes through
//! the heap for every construction, projection, and refcount operation.

use std::fmt;

use kes_types::TypeKind;
use smallvec::SmallVec;

/// Handle to a value slot.
///
/// A `ValueId` is a 32-bit slot index paired with the slot's generation at
/// the time the value was created. Freeing a slot bumps its generation, so
/// a handle that outlives its value stops resolving instead of aliasing the
/// slot's next occupant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ValueId {
    index: u32,
    generation: u32,
}

impl ValueId {
    /// The absent-value sentinel.
    ///
    /// Stands in for "no value" wherever generated code carries a nullable
    /// slot: the payload argument of a nullary union variant, or the result
    /// of [`union_payload`](crate::Heap::union_payload) on one.
    pub const NONE: Self = Self {
        index: u32::MAX,
        generation: 0,
    };

    /// The unit singleton. Occupies reserved slot 0 of every heap.
    pub const UNIT: Self = Self {
        index: 0,
        generation: 0,
    };

    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Check if this is the absent-value sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.index == u32::MAX
    }

    /// Check if this is a present handle (possibly stale).
    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Check if this is the unit singleton handle.
    #[inline]
    pub const fn is_unit(self) -> bool {
        self.index == 0 && self.generation == 0
    }

    #[inline]
    pub(crate) const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "ValueId(none)")
        } else if self.is_unit() {
            write!(f, "ValueId(unit)")
        } else {
            write!(f, "ValueId({}g{})", self.index, self.generation)
        }
    }
}

/// The payload of an occupied slot: one of the three algebraic shapes.
///
/// The discriminant is fixed at construction and never reinterpreted; an
/// operation expecting a different shape fails with `TypeMismatch` instead.
#[derive(Clone, Debug)]
pub(crate) enum Shape {
    /// The unit value. Exactly one per heap, at slot 0.
    Unit,
    /// Ordered owned fields; length fixed at construction.
    Product { fields: SmallVec<[ValueId; 4]> },
    /// Active variant plus an optional owned payload.
    Union {
        variant: u32,
        payload: Option<ValueId>,
    },
}

impl Shape {
    /// The shape's kind, for consistency checks and error reporting.
    ///
    /// Shares [`TypeKind`] with the type table: by the construction-time
    /// checks, a value's shape kind always equals its declared type's kind.
    pub(crate) const fn kind(&self) -> TypeKind {
        match self {
            Shape::Unit => TypeKind::Unit,
            Shape::Product { .. } => TypeKind::Product,
            Shape::Union { .. } => TypeKind::Union,
        }
    }
}
