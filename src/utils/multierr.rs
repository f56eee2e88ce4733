use std::error::Error;
use std::fmt;

/// Failures collected by a best-effort loop, kept in the order they happened.
#[derive(Debug)]
pub struct MultiError<E> {
    errors: Vec<E>,
}

impl<E> MultiError<E> {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: E) {
        self.errors.push(error);
    }

    /// The earliest failure, the one reported as the group's terminal error.
    pub fn first(&self) -> Option<&E> {
        self.errors.first()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl<E> Default for MultiError<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Display> fmt::Display for MultiError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "no errors"),
            [only] => write!(f, "{}", only),
            [first, rest @ ..] => write!(f, "{} (and {} more)", first, rest.len()),
        }
    }
}

impl<E: Error + 'static> Error for MultiError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.errors.first().map(|e| e as &dyn Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_empty_has_no_first() {
        let errs: MultiError<io::Error> = MultiError::default();
        assert_eq!(errs.len(), 0);
        assert!(errs.first().is_none());
        assert_eq!(errs.to_string(), "no errors");
    }

    #[test]
    fn test_display_names_first_and_counts_rest() {
        let mut errs = MultiError::new();
        errs.push(io::Error::new(io::ErrorKind::NotFound, "med.mp4 missing"));
        errs.push(io::Error::new(io::ErrorKind::Other, "timeout"));
        errs.push(io::Error::new(io::ErrorKind::Other, "reset"));

        assert_eq!(errs.to_string(), "med.mp4 missing (and 2 more)");
        assert_eq!(errs.first().unwrap().to_string(), "med.mp4 missing");
        assert_eq!(errs.len(), 3);
        assert!(errs.source().is_some());
    }
}
