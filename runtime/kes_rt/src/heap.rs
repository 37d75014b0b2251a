//! The value arena.
//!
//! All runtime values live in a `Heap`: a slot vector with a free list.
//! Slot 0 is the unit singleton, created with the heap and never freed.
//! Every other slot is allocated by a constructor with a refcount of 1 and
//! reclaimed by [`release`](Heap::release) when the count reaches zero.
//!
//! Handles are generational: reclaiming a slot bumps its generation, so a
//! handle held past its value's death resolves to nothing instead of to the
//! slot's next occupant. Exclusive access (`&mut Heap`) is required for
//! every mutation, which is what makes unsynchronized cross-thread refcount
//! traffic unrepresentable here.

use kes_types::{TypeDecl, TypeId, TypeKind, TypeTable};
use smallvec::SmallVec;

use crate::errors::{RuntimeError, RuntimeResult};
use crate::value::{Shape, ValueId};

/// An occupied slot: the value's identity, its refcount, and its shape.
///
/// `type_id` and `shape` are immutable after construction; only `refcount`
/// changes over the value's lifetime.
#[derive(Clone, Debug)]
pub(crate) struct ValueCell {
    pub(crate) type_id: TypeId,
    pub(crate) refcount: u32,
    pub(crate) shape: Shape,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    cell: Option<ValueCell>,
}

/// Arena owning every runtime value, plus the type table constructors
/// validate against.
#[derive(Debug)]
pub struct Heap {
    types: TypeTable,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Heap {
    /// Slot indices must stay below the `ValueId::NONE` sentinel index.
    const MAX_SLOTS: usize = u32::MAX as usize;

    /// Create a heap validating against `types`, with the unit singleton
    /// occupying slot 0.
    pub fn new(types: TypeTable) -> Self {
        let unit = Slot {
            generation: 0,
            cell: Some(ValueCell {
                type_id: TypeId::UNIT,
                refcount: 1,
                shape: Shape::Unit,
            }),
        };
        Self {
            types,
            slots: vec![unit],
            free: Vec::new(),
        }
    }

    /// The type table this heap validates against.
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    // ── Constructors ────────────────────────────────────────────────────

    /// The unit singleton. Never allocates; every call returns the same
    /// handle, and `retain`/`release` ignore it.
    pub fn make_unit(&self) -> ValueId {
        ValueId::UNIT
    }

    /// Allocate a product value owning each of `fields`, in order.
    ///
    /// Ownership of every field transfers to the new value: the caller must
    /// not release a handed-off field, and must [`retain`](Heap::retain) it
    /// first if it intends to keep using it independently.
    ///
    /// Validation happens before any ownership transfer, so on `Err` the
    /// caller still owns all of `fields`.
    pub fn make_product(&mut self, type_id: TypeId, fields: &[ValueId]) -> RuntimeResult<ValueId> {
        let declared = match self.types.decl(type_id) {
            Some(TypeDecl::Product {
                fields: declared_fields,
                ..
            }) => declared_fields.len(),
            other => {
                return Err(RuntimeError::TypeMismatch {
                    expected: TypeKind::Product,
                    got: other.map(TypeDecl::kind),
                })
            }
        };
        if fields.len() != declared {
            return Err(RuntimeError::ArityMismatch {
                type_id,
                expected: declared,
                got: fields.len(),
            });
        }
        for &field in fields {
            self.require_live(field, "make_product")?;
        }

        let id = self.alloc(
            type_id,
            Shape::Product {
                fields: SmallVec::from_slice(fields),
            },
        );
        tracing::trace!(value = ?id, ty = type_id.raw(), fields = fields.len(), "product allocated");
        Ok(id)
    }

    /// Allocate a union value with the given active variant, owning
    /// `payload` when it is present (`ValueId::NONE` marks a nullary
    /// variant).
    ///
    /// Same ownership-transfer contract as [`make_product`](Heap::make_product).
    pub fn make_union(
        &mut self,
        type_id: TypeId,
        variant: u32,
        payload: ValueId,
    ) -> RuntimeResult<ValueId> {
        let declared = match self.types.decl(type_id) {
            Some(TypeDecl::Union { variants, .. }) => variants.len(),
            other => {
                return Err(RuntimeError::TypeMismatch {
                    expected: TypeKind::Union,
                    got: other.map(TypeDecl::kind),
                })
            }
        };
        if variant as usize >= declared {
            return Err(RuntimeError::VariantOutOfRange {
                variant,
                variant_count: declared,
            });
        }
        let payload = if payload.is_none() {
            None
        } else {
            self.require_live(payload, "make_union")?;
            Some(payload)
        };

        let id = self.alloc(type_id, Shape::Union { variant, payload });
        tracing::trace!(value = ?id, ty = type_id.raw(), variant, "union allocated");
        Ok(id)
    }

    // ── Observation ─────────────────────────────────────────────────────

    /// Check if a handle currently resolves to a live value.
    pub fn is_live(&self, value: ValueId) -> bool {
        self.cell(value).is_some()
    }

    /// Number of live values, the unit singleton excluded.
    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.cell.is_some())
            .count()
            .saturating_sub(1)
    }

    // ── Slot plumbing ───────────────────────────────────────────────────

    pub(crate) fn cell(&self, value: ValueId) -> Option<&ValueCell> {
        if value.is_none() {
            return None;
        }
        let slot = self.slots.get(value.index() as usize)?;
        if slot.generation != value.generation() {
            return None;
        }
        slot.cell.as_ref()
    }

    pub(crate) fn cell_mut(&mut self, value: ValueId) -> Option<&mut ValueCell> {
        if value.is_none() {
            return None;
        }
        let slot = self.slots.get_mut(value.index() as usize)?;
        if slot.generation != value.generation() {
            return None;
        }
        slot.cell.as_mut()
    }

    /// Resolve a handle that an operation requires to be present and live.
    pub(crate) fn require_live(
        &self,
        value: ValueId,
        op: &'static str,
    ) -> RuntimeResult<&ValueCell> {
        if value.is_none() {
            return Err(RuntimeError::NullValue { op });
        }
        self.cell(value)
            .ok_or(RuntimeError::UseAfterFree { value })
    }

    /// Reclaim a live slot: take its cell, bump the generation so stale
    /// handles stop resolving, and return the slot to the free list.
    pub(crate) fn take_cell(&mut self, value: ValueId) -> Option<ValueCell> {
        let slot = self.slots.get_mut(value.index() as usize)?;
        if slot.generation != value.generation() || slot.cell.is_none() {
            return None;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(value.index());
        slot.cell.take()
    }

    fn alloc(&mut self, type_id: TypeId, shape: Shape) -> ValueId {
        let cell = ValueCell {
            type_id,
            refcount: 1,
            shape,
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.cell.is_none());
            slot.cell = Some(cell);
            return ValueId::new(index, slot.generation);
        }

        assert!(self.slots.len() < Self::MAX_SLOTS, "value heap exhausted");
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            cell: Some(cell),
        });
        ValueId::new(index, 0)
    }
}
