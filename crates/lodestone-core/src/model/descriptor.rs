use crate::model::field::FieldModel;
use convert_case::{Case, Casing};

///
/// ModelDescriptor
/// Static registration record for one indexable model type.
///
/// Declared once at model-definition time and read-only thereafter; safe to
/// share across threads without synchronization.
///

#[derive(Debug)]
pub struct ModelDescriptor {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Application/package qualifier used in content types.
    pub app_label: &'static str,
    /// Type name used in content types.
    pub model_name: &'static str,
    /// Identity field name (the store's `.filter(pk=..)` key).
    pub primary_key: &'static str,
    /// Declared storage fields (authoritative for extraction planning).
    pub fields: &'static [FieldModel],
    /// Abstract models participate in specialization chains but are never
    /// indexed themselves.
    pub is_abstract: bool,
    /// Nearest ancestor that also implements the indexable capability.
    /// Set once at declaration; content types are derived by walking this.
    pub parent: Option<&'static ModelDescriptor>,
}

impl ModelDescriptor {
    // get
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Nearest indexable ancestor, skipping abstract models unless
    /// `require_concrete` is false.
    #[must_use]
    pub fn parent_indexable(&self, require_concrete: bool) -> Option<&'static Self> {
        let mut current = self.parent;
        while let Some(parent) = current {
            if require_concrete && parent.is_abstract {
                current = parent.parent;
                continue;
            }
            return Some(parent);
        }

        None
    }

    /// This model's own content-type segment: the flat-cased app label and
    /// model name joined with an underscore.
    #[must_use]
    pub fn local_content_type(&self) -> String {
        format!(
            "{}_{}",
            self.app_label.to_case(Case::Flat),
            self.model_name.to_case(Case::Flat)
        )
    }

    /// Dot-free content type encoding the full specialization chain, so a
    /// backend can filter "this type or any subtype" by prefix matching on
    /// the toplevel content type.
    #[must_use]
    pub fn content_type(&self) -> String {
        match self.parent_indexable(true) {
            Some(parent) => format!("{}_{}", parent.content_type(), self.local_content_type()),
            None => self.local_content_type(),
        }
    }

    /// The root ancestor's content type, regardless of chain depth.
    #[must_use]
    pub fn toplevel_content_type(&self) -> String {
        match self.parent_indexable(true) {
            Some(parent) => parent.toplevel_content_type(),
            None => self.local_content_type(),
        }
    }
}
