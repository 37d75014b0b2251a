//! Accessors: destructure values without exposing their slots.
//!
//! Shared-reference discipline: `project` and `union_payload` hand back a
//! handle the caller now co-owns — its refcount is incremented and the
//! caller must eventually [`release`](Heap::release) it. The container keeps
//! ownership of the child itself.

use kes_types::{TypeId, TypeKind};

use crate::errors::{RuntimeError, RuntimeResult};
use crate::heap::Heap;
use crate::value::{Shape, ValueId};

impl Heap {
    /// Return the field at `field_index` of a product value, as a new
    /// shared reference.
    pub fn project(&mut self, value: ValueId, field_index: usize) -> RuntimeResult<ValueId> {
        let cell = self.require_live(value, "project")?;
        let field = match &cell.shape {
            Shape::Product { fields } => {
                *fields
                    .get(field_index)
                    .ok_or(RuntimeError::IndexOutOfRange {
                        index: field_index,
                        field_count: fields.len(),
                    })?
            }
            other => {
                return Err(RuntimeError::TypeMismatch {
                    expected: TypeKind::Product,
                    got: Some(other.kind()),
                })
            }
        };
        self.bump(field);
        Ok(field)
    }

    /// The active variant index of a union value.
    pub fn variant_index(&self, value: ValueId) -> RuntimeResult<u32> {
        let cell = self.require_live(value, "variant_index")?;
        match &cell.shape {
            Shape::Union { variant, .. } => Ok(*variant),
            other => Err(RuntimeError::TypeMismatch {
                expected: TypeKind::Union,
                got: Some(other.kind()),
            }),
        }
    }

    /// The payload of a union value as a new shared reference, or
    /// `ValueId::NONE` for a nullary variant.
    pub fn union_payload(&mut self, value: ValueId) -> RuntimeResult<ValueId> {
        let cell = self.require_live(value, "union_payload")?;
        let payload = match &cell.shape {
            Shape::Union { payload, .. } => payload.unwrap_or(ValueId::NONE),
            other => {
                return Err(RuntimeError::TypeMismatch {
                    expected: TypeKind::Union,
                    got: Some(other.kind()),
                })
            }
        };
        self.bump(payload);
        Ok(payload)
    }

    /// Check if `value` is present, live, and declared with `type_id`.
    /// Total: never fails, false for absent and stale handles.
    pub fn has_type(&self, value: ValueId, type_id: TypeId) -> bool {
        self.cell(value)
            .is_some_and(|cell| cell.type_id == type_id)
    }

    /// The declared type of a live value.
    pub fn type_of(&self, value: ValueId) -> Option<TypeId> {
        self.cell(value).map(|cell| cell.type_id)
    }

    /// The shape kind of a live value.
    pub fn shape_kind(&self, value: ValueId) -> Option<TypeKind> {
        self.cell(value).map(|cell| cell.shape.kind())
    }
}

#[cfg(test)]
mod tests;
