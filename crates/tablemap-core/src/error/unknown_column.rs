use super::Error;

/// Error when a record is asked for an attribute its entity does not map.
#[derive(Debug)]
pub(super) struct UnknownColumn {
    entity: Box<str>,
    attribute: Box<str>,
}

impl std::error::Error for UnknownColumn {}

impl core::fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown column `{}` on entity `{}`",
            self.attribute, self.entity
        )
    }
}

impl Error {
    /// Creates an unknown column error.
    pub fn unknown_column(entity: &str, attribute: &str) -> Error {
        Error::from(super::ErrorKind::UnknownColumn(UnknownColumn {
            entity: entity.into(),
            attribute: attribute.into(),
        }))
    }

    /// Returns `true` if this error is an unknown column error.
    pub fn is_unknown_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownColumn(_))
    }
}
