//! Dotted attribute-path resolution.
//!
//! Resolution is a pure step-by-step walk: maps resolve by key, records
//! resolve by named attribute, and any missing step ends the walk with
//! [`Extracted::Absent`]. Nothing here retries or raises.

use crate::{
    traits::{Extracted, Record},
    value::Value,
};

/// Resolve an ordered attribute path against a record.
///
/// The first segment is resolved through the record's named-attribute
/// access; each later segment steps through the previous result. A `Null`
/// value or a missing step short-circuits to `Absent` without attempting
/// further traversal.
#[must_use]
pub fn resolve_path(record: &dyn Record, path: &[String]) -> Extracted {
    let Some((first, rest)) = path.split_first() else {
        return Extracted::Absent;
    };

    let mut current = record.attribute(first);
    for attr in rest {
        if current.is_absent() {
            // Break out early on the missing sentinel.
            return Extracted::Absent;
        }
        current = step(current, attr);
    }

    current
}

// One traversal step against an already-resolved value.
fn step(current: Extracted, attr: &str) -> Extracted {
    match current {
        Extracted::Absent => Extracted::Absent,
        Extracted::Scalar(Value::Map(map)) => match map.get(attr) {
            Some(Value::Null) | None => Extracted::Absent,
            Some(value) => Extracted::Scalar(value.clone()),
        },
        // Scalars have no named attributes; collections are not traversed.
        Extracted::Scalar(_) | Extracted::Many(_) => Extracted::Absent,
        Extracted::One(record) => record.attribute(attr),
    }
}
