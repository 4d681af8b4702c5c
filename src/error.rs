/// Errors returned by the containers and analyzers of this crate.
///
/// Every variant is raised synchronously at the point of violation,
/// before the receiving container has been mutated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A precondition on an argument was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Lookup or removal of a key the dictionary does not hold.
    #[error("key not found")]
    KeyNotFound,
    /// Removal of an element the set does not hold.
    #[error("element not found")]
    ElementNotFound,
    /// Sequence access outside the valid index range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Removal or peek on a container with no elements.
    #[error("container is empty")]
    EmptyContainer,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
        assert_eq!(
            Error::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "index 3 out of range for length 2"
        );
        assert_eq!(
            Error::InvalidArgument("decay must lie in [0, 1]").to_string(),
            "invalid argument: decay must lie in [0, 1]"
        );
    }
}
