use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use ulid::Ulid;

///
/// Value
/// Dynamic value produced by field extraction.
///
/// `Null` is the defined "missing" sentinel: attribute resolution treats it
/// the same as an absent step and stops traversal.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Float(f64),
    Int(i64),
    /// Ordered list of values.
    /// Used for multi-valued extraction transport; order is preserved.
    List(Vec<Self>),
    /// String-keyed mapping. Attribute resolution steps into maps by key.
    Map(BTreeMap<String, Self>),
    Null,
    Text(String),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from a list literal.
    ///
    /// Intended for tests and inline construction.
    /// Requires `Clone` because items are borrowed.
    pub fn from_slice<T>(items: &[T]) -> Self
    where
        T: Into<Self> + Clone,
    {
        Self::List(items.iter().cloned().map(Into::into).collect())
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::Map` from owned key/value entries.
    ///
    /// Later entries overwrite earlier ones with the same key.
    pub fn from_entries<K, V>(entries: Vec<(K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    ///
    /// TYPES
    ///

    /// Returns true if the value is the missing sentinel.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the value is Text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        match self {
            // definitely not scalar:
            Self::List(_) | Self::Map(_) => false,
            _ => true,
        }
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        if let Self::Map(entries) = self {
            Some(entries)
        } else {
            None
        }
    }

    ///
    /// EMPTY
    ///

    #[must_use]
    pub fn is_empty(&self) -> Option<bool> {
        match self {
            Self::List(xs) => Some(xs.is_empty()),
            Self::Map(entries) => Some(entries.is_empty()),
            Self::Text(s) => Some(s.is_empty()),

            // fields represented as Value::Null:
            Self::Null => Some(true),

            _ => None,
        }
    }
}

// impl_value_from
#[macro_export]
macro_rules! impl_value_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool            => Bool,
    NaiveDate       => Date,
    DateTime<Utc>   => DateTime,
    f32             => Float,
    f64             => Float,
    i8              => Int,
    i16             => Int,
    i32             => Int,
    i64             => Int,
    &str            => Text,
    String          => Text,
    u8              => Uint,
    u16             => Uint,
    u32             => Uint,
    u64             => Uint,
    Ulid            => Ulid,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
