//! Shared registry vocabulary.

/// Outcome of an upsert against a registry: the record was either appended
/// with a freshly assigned sequential id, or an existing record was
/// overwritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted<T> {
    Created(T),
    Updated(T),
}

impl<T> Upserted<T> {
    pub fn record(&self) -> &T {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
