//! Debug rendering of values.
//!
//! Total and non-recursive: every handle renders to something — `<null>`
//! for the absent sentinel, `<freed>` for a stale handle — and composite
//! values render a summary (field count, active variant) rather than their
//! children, so formatting completes in constant time per value.

#![allow(clippy::format_push_string)] // Debug formatting prioritizes clarity over allocation

use kes_types::TypeId;

use crate::heap::Heap;
use crate::value::{Shape, ValueId};

impl Heap {
    /// Render a value as a human-readable string. Never fails.
    pub fn format_value(&self, value: ValueId) -> String {
        let mut buf = String::new();
        self.format_value_into(value, &mut buf);
        buf
    }

    /// Render a value into an existing string buffer.
    pub fn format_value_into(&self, value: ValueId, buf: &mut String) {
        if value.is_none() {
            buf.push_str("<null>");
            return;
        }
        let Some(cell) = self.cell(value) else {
            buf.push_str("<freed>");
            return;
        };

        match &cell.shape {
            Shape::Unit => self.push_type_name(cell.type_id, buf),
            Shape::Product { fields } => {
                self.push_type_name(cell.type_id, buf);
                let field_word = if fields.len() == 1 { "field" } else { "fields" };
                buf.push_str(&format!("({} {field_word})", fields.len()));
            }
            Shape::Union { variant, payload } => {
                self.push_type_name(cell.type_id, buf);
                buf.push_str("::");
                match self.types().variant_name(cell.type_id, *variant as usize) {
                    Some(name) => buf.push_str(name),
                    None => buf.push_str(&variant.to_string()),
                }
                if payload.is_some() {
                    buf.push_str("(_)");
                }
            }
        }
    }

    /// `name#id` for declared types, `type#id` when the id is unknown.
    fn push_type_name(&self, type_id: TypeId, buf: &mut String) {
        let name = self.types().type_name(type_id).unwrap_or("type");
        buf.push_str(&format!("{name}#{type_id}"));
    }
}
