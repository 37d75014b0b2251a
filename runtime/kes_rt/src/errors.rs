//! Error types for runtime operations.
//!
//! Every fallible operation validates its inputs before touching the heap,
//! so an `Err` always leaves the heap exactly as it was. Most errors are
//! recoverable — generated code (or its trap shim) decides what to do with
//! them. [`RuntimeError::UseAfterFree`] is the exception: it means a handle
//! outlived its value, the heap can no longer be trusted, and the embedding
//! must abort (see [`RuntimeError::is_fatal`]).

use std::fmt;

use kes_types::{TypeId, TypeKind};

use crate::value::ValueId;

/// Result of a runtime operation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Failure reported by a runtime operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeError {
    /// An operation required a value but was given the absent sentinel.
    NullValue {
        /// The operation that needed the value.
        op: &'static str,
    },

    /// An operation was applied to a value of the wrong shape, or a
    /// constructor was given a type id declared with a different kind.
    TypeMismatch {
        expected: TypeKind,
        /// The kind actually found; `None` for an undeclared type id.
        got: Option<TypeKind>,
    },

    /// Product field index outside `[0, field_count)`.
    IndexOutOfRange { index: usize, field_count: usize },

    /// Union variant index at or beyond the declared variant count.
    VariantOutOfRange { variant: u32, variant_count: usize },

    /// Constructor field count disagrees with the declared arity.
    ArityMismatch {
        type_id: TypeId,
        expected: usize,
        got: usize,
    },

    /// A handle resolved to a freed or reused slot. Fatal: the caller must
    /// not continue using the heap.
    UseAfterFree { value: ValueId },
}

impl RuntimeError {
    /// True for violations the embedding must treat as unrecoverable.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, RuntimeError::UseAfterFree { .. })
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::NullValue { op } => {
                write!(f, "{op}: expected a value, got none")
            }
            RuntimeError::TypeMismatch { expected, got } => match got {
                Some(got) => write!(
                    f,
                    "type mismatch: expected {}, got {}",
                    expected.name(),
                    got.name()
                ),
                None => write!(
                    f,
                    "type mismatch: expected {}, got undeclared type",
                    expected.name()
                ),
            },
            RuntimeError::IndexOutOfRange { index, field_count } => {
                write!(f, "field index {index} out of range for {field_count} fields")
            }
            RuntimeError::VariantOutOfRange {
                variant,
                variant_count,
            } => {
                write!(
                    f,
                    "variant index {variant} out of range for {variant_count} variants"
                )
            }
            RuntimeError::ArityMismatch {
                type_id,
                expected,
                got,
            } => {
                let field_word = if *expected == 1 { "field" } else { "fields" };
                write!(
                    f,
                    "type {type_id} declares {expected} {field_word}, got {got}"
                )
            }
            RuntimeError::UseAfterFree { value } => {
                write!(f, "use after free: {value:?}")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
