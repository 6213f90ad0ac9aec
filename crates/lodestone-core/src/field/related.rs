use crate::{
    field::AnyField,
    model::RelationKind,
    query::{EagerKind, QuerySpec},
    traits::{Extracted, Record},
};
use serde::Serialize;

///
/// RelatedFields
/// A nested group of descriptors applied to a related object or collection.
///
/// The group contributes its relation's field name to the index unchanged;
/// nested descriptors are namespaced by the consuming backend, not here.
///

#[derive(Clone, Debug, Serialize)]
pub struct RelatedFields {
    field_name: String,
    fields: Vec<AnyField>,
}

impl RelatedFields {
    #[must_use]
    pub fn new(field_name: &str, fields: Vec<AnyField>) -> Self {
        Self {
            field_name: field_name.to_string(),
            fields,
        }
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub fn fields(&self) -> &[AnyField] {
        &self.fields
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.field_name
    }

    /// The related object or collection, as-is.
    ///
    /// Only genuine forward relations extract; recursion into the nested
    /// descriptors is the backend's responsibility.
    #[must_use]
    pub fn extract(&self, record: &dyn Record) -> Extracted {
        match record.model().get_field(&self.field_name) {
            Some(field) if field.relation.is_some_and(RelationKind::is_forward) => {
                record.attribute(&self.field_name)
            }
            _ => Extracted::Absent,
        }
    }

    /// Attach the relation's eager-load strategy to a query: join-based for
    /// single-valued relations, batched for multi-valued ones. Unresolvable
    /// relations leave the query unchanged.
    ///
    /// Avoids N+1 access patterns when bulk-indexing.
    #[must_use]
    pub fn apply_eager_load(&self, query: QuerySpec) -> QuerySpec {
        let Some(field) = query.model.get_field(&self.field_name) else {
            return query;
        };
        let Some(relation) = field.relation else {
            return query;
        };

        let kind = if relation.is_single() {
            EagerKind::Join
        } else {
            EagerKind::Batch
        };

        query.eager(&self.field_name, kind)
    }
}
