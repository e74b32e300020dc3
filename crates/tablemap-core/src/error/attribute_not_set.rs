use super::Error;

/// Error when a declared attribute is read from a record that has no value
/// for it yet.
///
/// This is distinct from [`Error::unknown_column`]: the attribute exists in
/// the entity's mapping, it simply has not been assigned (and no write
/// operation has filled in its default).
#[derive(Debug)]
pub(super) struct AttributeNotSet {
    entity: Box<str>,
    attribute: Box<str>,
}

impl std::error::Error for AttributeNotSet {}

impl core::fmt::Display for AttributeNotSet {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "attribute `{}` is not set on entity `{}`",
            self.attribute, self.entity
        )
    }
}

impl Error {
    /// Creates an attribute-not-set error.
    pub fn attribute_not_set(entity: &str, attribute: &str) -> Error {
        Error::from(super::ErrorKind::AttributeNotSet(AttributeNotSet {
            entity: entity.into(),
            attribute: attribute.into(),
        }))
    }

    /// Returns `true` if this error is an attribute-not-set error.
    pub fn is_attribute_not_set(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AttributeNotSet(_))
    }
}
