use serde::Serialize;

///
/// RelationKind
///
/// Relation classification for a declared field, as reported by the
/// object store's introspection. Cardinality (single vs. many) selects
/// the eager-load strategy; direction (forward vs. reverse) gates
/// related-value extraction.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum RelationKind {
    /// Many-to-many declared on this model.
    ForwardMany,
    /// Many-to-one or one-to-one declared on this model.
    ForwardOne,
    /// Reverse foreign key or reverse many-to-many.
    ReverseMany,
    /// Reverse side of a one-to-one.
    ReverseOne,
}

impl RelationKind {
    /// Single-valued relations take a join-based eager load; multi-valued
    /// ones take a batched eager load.
    #[must_use]
    pub const fn is_single(self) -> bool {
        matches!(self, Self::ForwardOne | Self::ReverseOne)
    }

    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::ForwardOne | Self::ForwardMany)
    }
}
