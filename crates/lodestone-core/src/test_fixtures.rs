//! Test-only model family, in-memory store, and recording backends.
//!
//! A small CMS-flavored domain: `Page` (with a forward-one `author`
//! relation, a forward-many `tags` relation, a derived `intro_excerpt`
//! accessor, and a `searchable_content` transform on `summary`) plus an
//! `EventPage` specialization and the `Author`/`Tag` relation targets.

use crate::{
    backend::{BackendError, SearchBackend},
    error::StoreError,
    field::{AnyField, FilterField, RelatedFields, SearchField},
    model::{FieldKind, FieldModel, ModelDescriptor, RelationKind},
    obs::SyncOp,
    query::{ObjectStore, QuerySpec},
    register_indexable,
    registry::IndexedModel,
    traits::{Canonical, Extracted, Indexable, Record, RecordRef},
    value::Value,
};
use chrono::{DateTime, Utc};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};
use ulid::Ulid;

///
/// MODELS
///

fn lowercase_content(value: &Value) -> Value {
    match value {
        Value::Text(text) => Value::Text(text.to_lowercase()),
        other => other.clone(),
    }
}

const PAGE_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::Uint),
    FieldModel::new("title", FieldKind::Text),
    FieldModel::new("summary", FieldKind::Text).with_searchable_content(lowercase_content),
    FieldModel::new("live", FieldKind::Bool),
    FieldModel::new("author", FieldKind::Ulid)
        .with_attname("author_id")
        .with_relation(RelationKind::ForwardOne),
    FieldModel::new("tags", FieldKind::Ulid).with_relation(RelationKind::ForwardMany),
];

const PAGE_MODEL: ModelDescriptor = ModelDescriptor {
    path: "fixtures::Page",
    app_label: "cms",
    model_name: "Page",
    primary_key: "id",
    fields: PAGE_FIELDS,
    is_abstract: false,
    parent: None,
};

const EVENT_PAGE_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::Uint),
    FieldModel::new("location", FieldKind::Text),
    FieldModel::new("starts", FieldKind::DateTime),
];

const EVENT_PAGE_MODEL: ModelDescriptor = ModelDescriptor {
    path: "fixtures::EventPage",
    app_label: "events",
    model_name: "EventPage",
    primary_key: "id",
    fields: EVENT_PAGE_FIELDS,
    is_abstract: false,
    parent: Some(&PAGE_MODEL),
};

const AUTHOR_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::Ulid),
    FieldModel::new("name", FieldKind::Text),
];

const AUTHOR_MODEL: ModelDescriptor = ModelDescriptor {
    path: "fixtures::Author",
    app_label: "directory",
    model_name: "Author",
    primary_key: "id",
    fields: AUTHOR_FIELDS,
    is_abstract: false,
    parent: None,
};

const TAG_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::Ulid),
    FieldModel::new("slug", FieldKind::Text),
];

const TAG_MODEL: ModelDescriptor = ModelDescriptor {
    path: "fixtures::Tag",
    app_label: "cms",
    model_name: "Tag",
    primary_key: "id",
    fields: TAG_FIELDS,
    is_abstract: false,
    parent: None,
};

const CONTENT_BASE_FIELDS: &[FieldModel] = &[FieldModel::new("id", FieldKind::Uint)];

const CONTENT_BASE_MODEL: ModelDescriptor = ModelDescriptor {
    path: "fixtures::ContentBase",
    app_label: "cms",
    model_name: "ContentBase",
    primary_key: "id",
    fields: CONTENT_BASE_FIELDS,
    is_abstract: true,
    parent: None,
};

const STRAY_MODEL: ModelDescriptor = ModelDescriptor {
    path: "fixtures::Stray",
    app_label: "misc",
    model_name: "Stray",
    primary_key: "id",
    fields: CONTENT_BASE_FIELDS,
    is_abstract: false,
    parent: None,
};

pub fn page_model() -> &'static ModelDescriptor {
    &PAGE_MODEL
}

pub fn tag_model() -> &'static ModelDescriptor {
    &TAG_MODEL
}

pub fn abstract_content_model() -> &'static ModelDescriptor {
    &CONTENT_BASE_MODEL
}

///
/// Author
///

pub struct Author {
    pub id: Ulid,
    pub name: String,
    pub profile: BTreeMap<String, Value>,
}

impl Author {
    pub fn sample() -> Self {
        Self {
            id: Ulid::from_parts(1, 11),
            name: "Meridel Fox".to_string(),
            profile: BTreeMap::from([(
                "bio".to_string(),
                Value::from("Writes about rivers"),
            )]),
        }
    }

    pub fn with_null_bio() -> Self {
        let mut author = Self::sample();
        author.profile.insert("bio".to_string(), Value::Null);
        author
    }
}

impl Record for Author {
    fn model(&self) -> &'static ModelDescriptor {
        &AUTHOR_MODEL
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Ulid(self.id)),
            "name" => Some(Value::from(self.name.clone())),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Extracted {
        match name {
            "id" | "name" => self.get_value(name).map_or(Extracted::Absent, Into::into),
            "profile" => Extracted::Scalar(Value::Map(self.profile.clone())),
            _ => Extracted::Absent,
        }
    }
}

impl Indexable for Author {
    const MODEL: &'static ModelDescriptor = &AUTHOR_MODEL;

    fn search_fields() -> Vec<AnyField> {
        vec![SearchField::new("name").into()]
    }
}

///
/// Tag
///

pub struct Tag {
    pub id: Ulid,
    pub slug: String,
}

impl Tag {
    pub fn new(slug: &str, seed: u128) -> Self {
        Self {
            id: Ulid::from_parts(2, seed),
            slug: slug.to_string(),
        }
    }
}

impl Record for Tag {
    fn model(&self) -> &'static ModelDescriptor {
        &TAG_MODEL
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Ulid(self.id)),
            "slug" => Some(Value::from(self.slug.clone())),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Extracted {
        self.get_value(name).map_or(Extracted::Absent, Into::into)
    }
}

impl Indexable for Tag {
    const MODEL: &'static ModelDescriptor = &TAG_MODEL;

    fn search_fields() -> Vec<AnyField> {
        vec![SearchField::new("slug").into()]
    }
}

///
/// Page
///

pub struct Page {
    pub id: u64,
    pub title: String,
    pub summary: String,
    pub live: bool,
    pub topic: String,
    pub author: Option<Arc<Author>>,
    pub tags: Vec<Arc<Tag>>,
}

impl Page {
    pub fn sample() -> Self {
        Self {
            id: 1,
            title: "Autumn programme".to_string(),
            summary: "A Season on the Water".to_string(),
            live: true,
            topic: "Rivers".to_string(),
            author: Some(Arc::new(Author::sample())),
            tags: vec![Arc::new(Tag::new("rivers", 21)), Arc::new(Tag::new("boats", 22))],
        }
    }

    pub fn unauthored() -> Self {
        let mut page = Self::sample();
        page.author = None;
        page
    }

    pub fn with_id(id: u64) -> Self {
        let mut page = Self::sample();
        page.id = id;
        page
    }
}

impl Record for Page {
    fn model(&self) -> &'static ModelDescriptor {
        &PAGE_MODEL
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "title" => Some(Value::from(self.title.clone())),
            "summary" => Some(Value::from(self.summary.clone())),
            "live" => Some(Value::Bool(self.live)),
            "author" => Some(
                self.author
                    .as_ref()
                    .map_or(Value::Null, |author| Value::Ulid(author.id)),
            ),
            "tags" => Some(Value::from_list(
                self.tags.iter().map(|tag| Value::Ulid(tag.id)).collect(),
            )),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Extracted {
        match name {
            "id" | "title" | "summary" | "live" => {
                self.get_value(name).map_or(Extracted::Absent, Into::into)
            }
            "topic" => Extracted::Scalar(Value::from(self.topic.clone())),
            // derived accessor, declared at definition time
            "intro_excerpt" => Extracted::Scalar(Value::from(format!(
                "{}: {}",
                self.title.to_uppercase(),
                self.topic.to_uppercase()
            ))),
            "author" => self
                .author
                .as_ref()
                .map_or(Extracted::Absent, |author| {
                    Extracted::One(Arc::clone(author) as RecordRef)
                }),
            "tags" => Extracted::Many(
                self.tags
                    .iter()
                    .map(|tag| Arc::clone(tag) as RecordRef)
                    .collect(),
            ),
            _ => Extracted::Absent,
        }
    }
}

impl Indexable for Page {
    const MODEL: &'static ModelDescriptor = &PAGE_MODEL;

    fn search_fields() -> Vec<AnyField> {
        vec![
            SearchField::new("title")
                .with_boost(2.0)
                .with_partial_match(true)
                .into(),
            SearchField::new("summary").into(),
            FilterField::new("live").into(),
            RelatedFields::new("author", vec![SearchField::new("name").into()]).into(),
            RelatedFields::new("tags", vec![SearchField::new("slug").into()]).into(),
        ]
    }
}

///
/// EventPage
/// Specialized subtype of `Page` (table-per-subtype storage).
///

pub struct EventPage {
    pub id: u64,
    pub location: String,
    pub starts: DateTime<Utc>,
}

impl EventPage {
    pub fn sample() -> Self {
        Self {
            id: 1,
            location: "Boathouse".to_string(),
            starts: DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
        }
    }
}

impl Record for EventPage {
    fn model(&self) -> &'static ModelDescriptor {
        &EVENT_PAGE_MODEL
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "location" => Some(Value::from(self.location.clone())),
            "starts" => Some(Value::DateTime(self.starts)),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Extracted {
        self.get_value(name).map_or(Extracted::Absent, Into::into)
    }
}

impl Indexable for EventPage {
    const MODEL: &'static ModelDescriptor = &EVENT_PAGE_MODEL;

    fn search_fields() -> Vec<AnyField> {
        vec![
            SearchField::new("location").into(),
            FilterField::new("starts").into(),
        ]
    }
}

///
/// StubPageRow
/// Base-table row standing in for a specialized instance: canonical
/// resolution either redirects to the specialized row or skips.
///

pub struct StubPageRow {
    target: Option<RecordRef>,
}

impl StubPageRow {
    pub fn redirecting_to(target: RecordRef) -> Self {
        Self {
            target: Some(target),
        }
    }

    pub fn skipping() -> Self {
        Self { target: None }
    }
}

impl Record for StubPageRow {
    fn model(&self) -> &'static ModelDescriptor {
        &PAGE_MODEL
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(1)),
            _ => None,
        }
    }

    fn attribute(&self, _name: &str) -> Extracted {
        Extracted::Absent
    }

    fn canonical_instance(&self) -> Canonical {
        match &self.target {
            Some(target) => Canonical::Redirect(Arc::clone(target)),
            None => Canonical::Skip,
        }
    }
}

///
/// UnregisteredRow
/// A record whose model never registered; saving it is a config error.
///

pub struct UnregisteredRow;

impl UnregisteredRow {
    pub fn new() -> Self {
        Self
    }
}

impl Record for UnregisteredRow {
    fn model(&self) -> &'static ModelDescriptor {
        &STRAY_MODEL
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(99)),
            _ => None,
        }
    }

    fn attribute(&self, _name: &str) -> Extracted {
        Extracted::Absent
    }
}

///
/// MemoryStore
///

pub struct MemoryStore {
    records: Vec<RecordRef>,
    fail: bool,
    queries: Mutex<Vec<QuerySpec>>,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<RecordRef>) -> Self {
        Self {
            records,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        let mut store = Self::empty();
        store.fail = true;
        store
    }

    /// Queries seen so far, in call order.
    pub fn queries(&self) -> Vec<QuerySpec> {
        self.queries.lock().unwrap().clone()
    }

    fn matches(record: &RecordRef, query: &QuerySpec) -> bool {
        record.model().path == query.model.path
            && query
                .identity
                .as_ref()
                .is_none_or(|identity| *identity == record.identity())
    }
}

impl ObjectStore for MemoryStore {
    fn exists(&self, query: &QuerySpec) -> Result<bool, StoreError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(StoreError::query_failed(query.model.path, "store offline"));
        }

        Ok(self
            .records
            .iter()
            .any(|record| Self::matches(record, query)))
    }

    fn fetch(&self, query: &QuerySpec) -> Result<Vec<RecordRef>, StoreError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(StoreError::query_failed(query.model.path, "store offline"));
        }

        Ok(self
            .records
            .iter()
            .filter(|record| Self::matches(record, query))
            .cloned()
            .collect())
    }
}

///
/// RecordingBackend
///

pub struct RecordingBackend {
    calls: Mutex<Vec<(SyncOp, &'static str, Value)>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn adds(&self) -> Vec<Value> {
        self.identities(SyncOp::Add)
    }

    pub fn deletes(&self) -> Vec<Value> {
        self.identities(SyncOp::Delete)
    }

    pub fn add_paths(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(op, ..)| *op == SyncOp::Add)
            .map(|(_, path, _)| *path)
            .collect()
    }

    fn identities(&self, wanted: SyncOp) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(op, ..)| *op == wanted)
            .map(|(.., identity)| identity.clone())
            .collect()
    }

    fn push(&self, op: SyncOp, instance: &dyn Record) {
        self.calls
            .lock()
            .unwrap()
            .push((op, instance.model().path, instance.identity()));
    }
}

impl SearchBackend for RecordingBackend {
    fn add(&self, instance: &dyn Record) -> Result<(), BackendError> {
        self.push(SyncOp::Add, instance);
        Ok(())
    }

    fn delete(&self, instance: &dyn Record) -> Result<(), BackendError> {
        self.push(SyncOp::Delete, instance);
        Ok(())
    }
}

///
/// FailingBackend
///

pub struct FailingBackend;

impl SearchBackend for FailingBackend {
    fn add(&self, _instance: &dyn Record) -> Result<(), BackendError> {
        Err("backend unavailable".into())
    }

    fn delete(&self, _instance: &dyn Record) -> Result<(), BackendError> {
        Err("backend unavailable".into())
    }
}

///
/// REGISTRATION
///

register_indexable!(Page);
register_indexable!(EventPage);
register_indexable!(Author);
register_indexable!(Tag);

// abstract models have no instances; their record registers directly
const _: () = {
    #[crate::__reexports::ctor::ctor(unsafe, anonymous, crate_path = crate::__reexports::ctor)]
    fn __register_abstract() {
        crate::registry::registry_write()
            .insert(IndexedModel::from_parts(&CONTENT_BASE_MODEL, vec![]));
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialization_chain_content_types() {
        assert_eq!(PAGE_MODEL.content_type(), "cms_page");
        assert_eq!(EVENT_PAGE_MODEL.content_type(), "cms_page_events_eventpage");
        assert_eq!(EVENT_PAGE_MODEL.toplevel_content_type(), "cms_page");
    }

    #[test]
    fn page_identity_is_its_primary_key_value() {
        assert_eq!(Page::sample().identity(), Value::Uint(1));
        assert_eq!(Page::with_id(9).identity(), Value::Uint(9));
    }

    #[test]
    fn declared_relation_fields_classify() {
        let author = PAGE_MODEL.get_field("author").unwrap();
        assert_eq!(author.relation, Some(RelationKind::ForwardOne));
        assert_eq!(author.attname, "author_id");

        let title = PAGE_MODEL.get_field("title").unwrap();
        assert!(!title.is_relation());
    }
}
