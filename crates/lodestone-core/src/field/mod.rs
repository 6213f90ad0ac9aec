//! Field descriptors.
//!
//! Descriptors are pure metadata declared by a model author: built once at
//! model-definition time, immutable, never persisted. Extraction reads from
//! instances through the [`Record`](crate::traits::Record) boundary and
//! never mutates them.

mod related;

pub use related::RelatedFields;

use crate::{
    model::{FieldKind, ModelDescriptor},
    resolve::resolve_path,
    traits::{Extracted, Record},
};
use derive_more::{Deref, IntoIterator};
use serde::Serialize;

/// Index-name suffix for filter fields; search fields have none.
pub const FILTER_SUFFIX: &str = "_filter";

///
/// BaseField
/// Declaration data shared by search and filter descriptors.
///
/// Construction invariant: `field_name` always refers to the source path's
/// first segment and `alias` holds the originally-declared name; the two
/// are swapped when a dotted source is declared under a different name.
///

#[derive(Clone, Debug, Serialize)]
pub struct BaseField {
    field_name: String,
    source: Vec<String>,
    alias: String,
    kind_override: Option<FieldKind>,
}

impl BaseField {
    fn new(field_name: &str, source: Option<&str>) -> Self {
        let declared = source.unwrap_or(field_name);
        let source: Vec<String> = declared.split('.').map(ToString::to_string).collect();

        // split always yields at least one segment
        let mut alias = source[0].clone();
        let mut field_name = field_name.to_string();
        if alias != field_name {
            std::mem::swap(&mut field_name, &mut alias);
        }

        Self {
            field_name,
            source,
            alias,
            kind_override: None,
        }
    }

    fn with_source(&self, source: &str) -> Self {
        // the originally-declared name is always held in `alias`
        let mut rebuilt = Self::new(&self.alias, Some(source));
        rebuilt.kind_override = self.kind_override;
        rebuilt
    }

    const fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind_override = Some(kind);
        self
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[must_use]
    pub fn source(&self) -> &[String] {
        &self.source
    }

    fn attname_on(&self, model: &ModelDescriptor) -> String {
        model
            .get_field(&self.field_name)
            .map_or_else(|| self.field_name.clone(), |field| field.attname.to_string())
    }

    fn index_name_with(&self, model: &ModelDescriptor, suffix: &str) -> String {
        let stem = if self.alias == self.field_name {
            self.attname_on(model)
        } else {
            self.alias.clone()
        };

        format!("{stem}{suffix}")
    }

    /// Native index kind: explicit override, else the declared field's
    /// kind, else the generic text default.
    #[must_use]
    pub fn inferred_kind(&self, model: &ModelDescriptor) -> FieldKind {
        if let Some(kind) = self.kind_override {
            return kind;
        }

        model
            .get_field(&self.field_name)
            .map_or(FieldKind::Text, |field| field.kind)
    }

    /// Extract this descriptor's value from an instance.
    ///
    /// With no declared storage field, falls back to the record's
    /// statically-declared plain/derived attribute accessor. A dotted
    /// source delegates to the attribute resolver; a single segment reads
    /// through the model's own value-extraction mechanism. A declared
    /// `searchable_content` transform applies to scalar results.
    #[must_use]
    pub fn extract(&self, record: &dyn Record) -> Extracted {
        let model = record.model();
        let Some(field) = model.get_field(&self.field_name) else {
            return record.attribute(&self.field_name);
        };

        let extracted = if self.source.len() > 1 {
            resolve_path(record, &self.source)
        } else {
            match record.get_value(&self.field_name) {
                Some(value) => Extracted::Scalar(value),
                None => Extracted::Absent,
            }
        };

        match (field.searchable_content, extracted) {
            (Some(transform), Extracted::Scalar(value)) => Extracted::Scalar(transform(&value)),
            (_, extracted) => extracted,
        }
    }
}

///
/// SearchField
///

#[derive(Clone, Debug, Serialize)]
pub struct SearchField {
    base: BaseField,
    boost: Option<f32>,
    partial_match: bool,
}

impl SearchField {
    #[must_use]
    pub fn new(field_name: &str) -> Self {
        Self {
            base: BaseField::new(field_name, None),
            boost: None,
            partial_match: false,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.base = self.base.with_source(source);
        self
    }

    #[must_use]
    pub fn with_kind(self, kind: FieldKind) -> Self {
        Self {
            base: self.base.with_kind(kind),
            boost: self.boost,
            partial_match: self.partial_match,
        }
    }

    #[must_use]
    pub const fn with_boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    #[must_use]
    pub const fn with_partial_match(mut self, partial_match: bool) -> Self {
        self.partial_match = partial_match;
        self
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        self.base.field_name()
    }

    #[must_use]
    pub const fn boost(&self) -> Option<f32> {
        self.boost
    }

    #[must_use]
    pub const fn partial_match(&self) -> bool {
        self.partial_match
    }

    #[must_use]
    pub const fn base(&self) -> &BaseField {
        &self.base
    }

    #[must_use]
    pub fn index_name(&self, model: &ModelDescriptor) -> String {
        self.base.index_name_with(model, "")
    }

    #[must_use]
    pub fn inferred_kind(&self, model: &ModelDescriptor) -> FieldKind {
        self.base.inferred_kind(model)
    }

    #[must_use]
    pub fn extract(&self, record: &dyn Record) -> Extracted {
        self.base.extract(record)
    }
}

///
/// FilterField
///

#[derive(Clone, Debug, Serialize)]
pub struct FilterField {
    base: BaseField,
}

impl FilterField {
    #[must_use]
    pub fn new(field_name: &str) -> Self {
        Self {
            base: BaseField::new(field_name, None),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.base = self.base.with_source(source);
        self
    }

    #[must_use]
    pub fn with_kind(self, kind: FieldKind) -> Self {
        Self {
            base: self.base.with_kind(kind),
        }
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        self.base.field_name()
    }

    #[must_use]
    pub const fn base(&self) -> &BaseField {
        &self.base
    }

    #[must_use]
    pub fn index_name(&self, model: &ModelDescriptor) -> String {
        self.base.index_name_with(model, FILTER_SUFFIX)
    }

    #[must_use]
    pub fn inferred_kind(&self, model: &ModelDescriptor) -> FieldKind {
        self.base.inferred_kind(model)
    }

    #[must_use]
    pub fn extract(&self, record: &dyn Record) -> Extracted {
        self.base.extract(record)
    }
}

///
/// DescriptorKind
/// Dedup-key discriminant: one descriptor survives per
/// `(DescriptorKind, field_name)` pair.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum DescriptorKind {
    Filter,
    Related,
    Search,
}

///
/// AnyField
///

#[derive(Clone, Debug, Serialize)]
#[remain::sorted]
pub enum AnyField {
    Filter(FilterField),
    Related(RelatedFields),
    Search(SearchField),
}

impl AnyField {
    #[must_use]
    pub fn field_name(&self) -> &str {
        match self {
            Self::Filter(field) => field.field_name(),
            Self::Related(fields) => fields.field_name(),
            Self::Search(field) => field.field_name(),
        }
    }

    #[must_use]
    pub fn index_name(&self, model: &ModelDescriptor) -> String {
        match self {
            Self::Filter(field) => field.index_name(model),
            Self::Related(fields) => fields.index_name().to_string(),
            Self::Search(field) => field.index_name(model),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> DescriptorKind {
        match self {
            Self::Filter(_) => DescriptorKind::Filter,
            Self::Related(_) => DescriptorKind::Related,
            Self::Search(_) => DescriptorKind::Search,
        }
    }
}

impl From<SearchField> for AnyField {
    fn from(field: SearchField) -> Self {
        Self::Search(field)
    }
}

impl From<FilterField> for AnyField {
    fn from(field: FilterField) -> Self {
        Self::Filter(field)
    }
}

impl From<RelatedFields> for AnyField {
    fn from(fields: RelatedFields) -> Self {
        Self::Related(fields)
    }
}

///
/// FieldSet
/// Deduplicated, ordered descriptor list for one model.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator, Serialize)]
pub struct FieldSet(Vec<AnyField>);

impl FieldSet {
    /// Merge declared descriptors: at most one per
    /// `(DescriptorKind, field_name)`, later declarations replacing
    /// earlier ones in place (insertion order preserved for first-seen
    /// keys).
    #[must_use]
    pub fn merge(declared: &[AnyField]) -> Self {
        let mut merged: Vec<AnyField> = Vec::with_capacity(declared.len());
        for field in declared {
            let key = (field.kind(), field.field_name());
            match merged
                .iter()
                .position(|seen| (seen.kind(), seen.field_name()) == key)
            {
                Some(position) => merged[position] = field.clone(),
                None => merged.push(field.clone()),
            }
        }

        Self(merged)
    }

    /// Search-kind descriptors, in merged order.
    pub fn searchable(&self) -> impl Iterator<Item = &SearchField> {
        self.0.iter().filter_map(|field| match field {
            AnyField::Search(search) => Some(search),
            _ => None,
        })
    }

    /// Filter-kind descriptors, in merged order.
    pub fn filterable(&self) -> impl Iterator<Item = &FilterField> {
        self.0.iter().filter_map(|field| match field {
            AnyField::Filter(filter) => Some(filter),
            _ => None,
        })
    }

    /// Related groups, in merged order.
    pub fn related(&self) -> impl Iterator<Item = &RelatedFields> {
        self.0.iter().filter_map(|field| match field {
            AnyField::Related(related) => Some(related),
            _ => None,
        })
    }
}
