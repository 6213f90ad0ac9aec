//! Registry validation.
//!
//! Metadata misconfiguration is detected here, at first registry read, and
//! surfaces as one loud `ErrorTree` naming every defect. Runtime absence
//! during extraction is deliberately not a defect (computed fields are
//! declared as descriptors over undeclared storage fields); validation only
//! rejects declarations that can never work.

use crate::{
    MAX_FIELD_NAME_LEN, MAX_MODEL_NAME_LEN, err,
    error::ErrorTree,
    field::{AnyField, BaseField, RelatedFields, SearchField},
    model::ModelDescriptor,
    registry::{IndexedModel, ModelRegistry},
};
use std::collections::BTreeMap;

pub(crate) fn validate_registry(registry: &ModelRegistry) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    validate_duplicate_paths(registry, &mut errs);
    for record in registry.records() {
        validate_record(record, &mut errs);
    }

    errs.result()
}

fn validate_duplicate_paths(registry: &ModelRegistry, errs: &mut ErrorTree) {
    let mut seen: BTreeMap<&str, ()> = BTreeMap::new();

    for record in registry.records() {
        let path = record.model().path;
        if seen.insert(path, ()).is_some() {
            err!(errs, "duplicate registration for model '{path}'");
        }
    }
}

pub(crate) fn validate_record(record: &IndexedModel, errs: &mut ErrorTree) {
    let model = record.model();

    validate_identifier(model.path, "app label", model.app_label, errs);
    validate_identifier(model.path, "model name", model.model_name, errs);

    if model.get_field(model.primary_key).is_none() {
        err!(
            errs,
            "model '{}' declares primary key '{}' but has no such field",
            model.path,
            model.primary_key
        );
    }

    for field in record.declared_fields() {
        validate_any_field(model, field, errs);
    }
}

fn validate_identifier(path: &str, what: &str, value: &str, errs: &mut ErrorTree) {
    if value.is_empty() {
        err!(errs, "model '{path}' has an empty {what}");
    } else if value.len() > MAX_MODEL_NAME_LEN {
        err!(
            errs,
            "model '{path}' {what} exceeds {MAX_MODEL_NAME_LEN} characters"
        );
    }
}

fn validate_any_field(model: &ModelDescriptor, field: &AnyField, errs: &mut ErrorTree) {
    validate_field_name(model, field.field_name(), errs);

    match field {
        AnyField::Search(search) => {
            validate_base(model, search.base(), errs);
            validate_boost(model, search, errs);
        }
        AnyField::Filter(filter) => validate_base(model, filter.base(), errs),
        AnyField::Related(related) => validate_related(model, related, errs),
    }
}

fn validate_field_name(model: &ModelDescriptor, name: &str, errs: &mut ErrorTree) {
    if name.is_empty() {
        err!(errs, "model '{}' declares an empty field name", model.path);
    } else if name.len() > MAX_FIELD_NAME_LEN {
        err!(
            errs,
            "model '{}' field '{name}' exceeds {MAX_FIELD_NAME_LEN} characters",
            model.path
        );
    }
}

fn validate_base(model: &ModelDescriptor, base: &BaseField, errs: &mut ErrorTree) {
    for segment in base.source() {
        if segment.is_empty() {
            err!(
                errs,
                "model '{}' field '{}' has an empty source path segment",
                model.path,
                base.alias()
            );
        }
    }
}

fn validate_boost(model: &ModelDescriptor, search: &SearchField, errs: &mut ErrorTree) {
    if let Some(boost) = search.boost()
        && (!boost.is_finite() || boost <= 0.0)
    {
        err!(
            errs,
            "model '{}' field '{}' has invalid boost {boost}",
            model.path,
            search.field_name()
        );
    }
}

fn validate_related(model: &ModelDescriptor, related: &RelatedFields, errs: &mut ErrorTree) {
    if related.fields().is_empty() {
        err!(
            errs,
            "model '{}' related group '{}' declares no nested fields",
            model.path,
            related.field_name()
        );
    }

    // A declared non-relation field can never extract as a related group.
    // Undeclared names stay legal: the relation may live outside the
    // declared storage fields.
    if let Some(field) = model.get_field(related.field_name())
        && !field.is_relation()
    {
        err!(
            errs,
            "model '{}' related group '{}' targets non-relation field '{}'",
            model.path,
            related.field_name(),
            field.name
        );
    }

    // Nested descriptors are validated structurally; their target model is
    // not known at this layer.
    for nested in related.fields() {
        validate_field_name(model, nested.field_name(), errs);
        match nested {
            AnyField::Search(search) => validate_boost(model, search, errs),
            AnyField::Related(group) => validate_related(model, group, errs),
            AnyField::Filter(_) => {}
        }
    }
}
