//! Ownership tracking: explicit reference counts, deterministic teardown.
//!
//! Counts live on the values themselves; the heap carries no other
//! bookkeeping. Constructors start a value at count 1 and transfer field
//! ownership without touching child counts. Accessors and
//! [`retain`](Heap::retain) add shared references; [`release`](Heap::release)
//! removes one, and at zero the value's owned children are released and the
//! slot reclaimed.
//!
//! The unit singleton and the `NONE` sentinel are outside the protocol:
//! retain and release ignore both.

use crate::errors::{RuntimeError, RuntimeResult};
use crate::heap::Heap;
use crate::value::{Shape, ValueId};

impl Heap {
    /// Add a shared reference to a value.
    ///
    /// No-op for the unit singleton and the absent sentinel. Fails with
    /// fatal `UseAfterFree` on a stale handle, leaving the heap untouched.
    pub fn retain(&mut self, value: ValueId) -> RuntimeResult<()> {
        if value.is_none() || value.is_unit() {
            return Ok(());
        }
        let cell = self
            .cell_mut(value)
            .ok_or(RuntimeError::UseAfterFree { value })?;
        cell.refcount += 1;
        Ok(())
    }

    /// Drop a reference to a value; at zero, release its owned children and
    /// reclaim its slot.
    ///
    /// Children are processed through an explicit worklist, so teardown of
    /// arbitrarily deep ownership chains runs in constant stack space.
    /// No-op for the unit singleton and the absent sentinel. Fails with
    /// fatal `UseAfterFree` on a stale handle — a slot is reclaimed the
    /// moment its count reaches zero, so any handle to it afterwards no
    /// longer resolves.
    pub fn release(&mut self, value: ValueId) -> RuntimeResult<()> {
        if value.is_none() || value.is_unit() {
            return Ok(());
        }
        if self.cell(value).is_none() {
            return Err(RuntimeError::UseAfterFree { value });
        }

        let mut worklist = vec![value];
        while let Some(id) = worklist.pop() {
            if id.is_none() || id.is_unit() {
                continue;
            }
            let Some(cell) = self.cell_mut(id) else {
                // An owned child failed to resolve: the ownership invariant
                // is already broken somewhere else.
                return Err(RuntimeError::UseAfterFree { value: id });
            };
            cell.refcount -= 1;
            if cell.refcount > 0 {
                continue;
            }

            let Some(cell) = self.take_cell(id) else {
                return Err(RuntimeError::UseAfterFree { value: id });
            };
            match cell.shape {
                Shape::Unit => {}
                Shape::Product { fields } => {
                    tracing::debug!(value = ?id, children = fields.len(), "product reclaimed");
                    worklist.extend(fields);
                }
                Shape::Union { payload, .. } => {
                    tracing::debug!(value = ?id, payload = payload.is_some(), "union reclaimed");
                    if let Some(payload) = payload {
                        worklist.push(payload);
                    }
                }
            }
        }
        Ok(())
    }

    /// Current reference count of a live value; `None` for absent or stale
    /// handles. The unit singleton reports its floor of 1.
    ///
    /// Observation hook for tests and debugging, not part of the generated
    /// code contract.
    pub fn refcount(&self, value: ValueId) -> Option<u32> {
        self.cell(value).map(|cell| cell.refcount)
    }

    /// Infallible count bump for handles the heap itself hands out
    /// (projection results, payloads). Skips unit and the sentinel.
    pub(crate) fn bump(&mut self, value: ValueId) {
        if value.is_none() || value.is_unit() {
            return;
        }
        if let Some(cell) = self.cell_mut(value) {
            cell.refcount += 1;
        }
    }
}
