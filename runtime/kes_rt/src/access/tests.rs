#![allow(clippy::unwrap_used, reason = "tests can panic")]

use pretty_assertions::assert_eq;

use kes_types::{TypeId, TypeKind};

use crate::test_helpers::{sample_heap, EMPTY, PAIR, STATUS, WRAPPER};
use crate::{RuntimeError, ValueId};

// ── project ─────────────────────────────────────────────────────────────

#[test]
fn project_returns_the_field_as_a_shared_reference() {
    let mut heap = sample_heap();
    let a = heap.make_product(EMPTY, &[]).unwrap();
    let b = heap.make_product(EMPTY, &[]).unwrap();
    let pair = heap.make_product(PAIR, &[a, b]).unwrap();

    let first = heap.project(pair, 0).unwrap();
    let second = heap.project(pair, 1).unwrap();

    assert_eq!(first, a);
    assert_eq!(second, b);
    // Each projection added one shared reference; the pair still owns its.
    assert_eq!(heap.refcount(a), Some(2));
    assert_eq!(heap.refcount(b), Some(2));
}

#[test]
fn project_is_bounds_checked() {
    let mut heap = sample_heap();
    let unit = heap.make_unit();
    let pair = heap.make_product(PAIR, &[unit, unit]).unwrap();

    let err = heap.project(pair, 2).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::IndexOutOfRange {
            index: 2,
            field_count: 2
        }
    );
}

#[test]
fn project_requires_a_product() {
    let mut heap = sample_heap();
    let status = heap.make_union(STATUS, 0, ValueId::NONE).unwrap();

    let err = heap.project(status, 0).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::TypeMismatch {
            expected: TypeKind::Product,
            got: Some(TypeKind::Union)
        }
    );
}

#[test]
fn project_requires_a_present_live_value() {
    let mut heap = sample_heap();
    assert_eq!(
        heap.project(ValueId::NONE, 0),
        Err(RuntimeError::NullValue { op: "project" })
    );

    let freed = heap.make_product(EMPTY, &[]).unwrap();
    heap.release(freed).unwrap();
    assert_eq!(
        heap.project(freed, 0),
        Err(RuntimeError::UseAfterFree { value: freed })
    );
}

// ── variant_index / union_payload ───────────────────────────────────────

#[test]
fn variant_index_reads_the_active_variant() {
    let mut heap = sample_heap();
    let idle = heap.make_union(STATUS, 0, ValueId::NONE).unwrap();
    let done = heap.make_union(STATUS, 2, ValueId::NONE).unwrap();

    assert_eq!(heap.variant_index(idle), Ok(0));
    assert_eq!(heap.variant_index(done), Ok(2));
}

#[test]
fn variant_index_requires_a_union() {
    let mut heap = sample_heap();
    let unit = heap.make_unit();
    let pair = heap.make_product(PAIR, &[unit, unit]).unwrap();

    assert_eq!(
        heap.variant_index(pair),
        Err(RuntimeError::TypeMismatch {
            expected: TypeKind::Union,
            got: Some(TypeKind::Product)
        })
    );
}

#[test]
fn union_payload_shares_the_payload() {
    let mut heap = sample_heap();
    let payload = heap.make_product(EMPTY, &[]).unwrap();
    let busy = heap.make_union(STATUS, 1, payload).unwrap();

    let got = heap.union_payload(busy).unwrap();
    assert_eq!(got, payload);
    assert_eq!(heap.refcount(payload), Some(2));
}

#[test]
fn union_payload_is_absent_for_nullary_variants() {
    let mut heap = sample_heap();
    let idle = heap.make_union(STATUS, 0, ValueId::NONE).unwrap();
    assert_eq!(heap.union_payload(idle), Ok(ValueId::NONE));
}

#[test]
fn union_payload_requires_a_union() {
    let mut heap = sample_heap();
    let unit = heap.make_unit();
    let pair = heap.make_product(PAIR, &[unit, unit]).unwrap();

    assert_eq!(
        heap.union_payload(pair),
        Err(RuntimeError::TypeMismatch {
            expected: TypeKind::Union,
            got: Some(TypeKind::Product)
        })
    );
}

// ── has_type / queries ──────────────────────────────────────────────────

#[test]
fn has_type_matches_the_constructed_type_only() {
    let mut heap = sample_heap();
    let unit = heap.make_unit();
    let pair = heap.make_product(PAIR, &[unit, unit]).unwrap();

    assert!(heap.has_type(pair, PAIR));
    assert!(!heap.has_type(pair, EMPTY));
    assert!(!heap.has_type(pair, STATUS));
}

#[test]
fn has_type_is_total() {
    let mut heap = sample_heap();
    assert!(!heap.has_type(ValueId::NONE, PAIR));

    let freed = heap.make_product(EMPTY, &[]).unwrap();
    heap.release(freed).unwrap();
    assert!(!heap.has_type(freed, EMPTY));

    assert!(!heap.has_type(ValueId::UNIT, TypeId::from_raw(99)));
}

#[test]
fn queries_resolve_nothing_for_dead_handles() {
    let mut heap = sample_heap();
    let wrapper = heap.make_product(WRAPPER, &[ValueId::UNIT]).unwrap();
    heap.release(wrapper).unwrap();

    assert_eq!(heap.type_of(wrapper), None);
    assert_eq!(heap.shape_kind(wrapper), None);
    assert_eq!(heap.type_of(ValueId::NONE), None);
}
