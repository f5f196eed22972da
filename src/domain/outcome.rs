use crate::domain::validation::Violation;

/// Result envelope returned by every notice operation.
///
/// Expected failures (bad input, unknown id) are variants here. Infrastructure
/// failures travel separately as `Err(AppError)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    NotFound,
    BadRequest(Vec<Violation>),
    NoContent,
}

impl<T> Outcome<T> {
    /// Transforms the payload of an `Ok` outcome, leaving the other variants untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::NotFound => Outcome::NotFound,
            Self::BadRequest(violations) => Outcome::BadRequest(violations),
            Self::NoContent => Outcome::NoContent,
        }
    }

    /// Short label used for metrics and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ok(_) => "ok",
            Self::NotFound => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::NoContent => "no_content",
        }
    }
}

#[cfg(test)]
impl<T> Outcome<T> {
    pub(crate) const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub(crate) fn into_ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_only_touches_ok() {
        assert_eq!(Outcome::Ok(2).map(|v| v * 10), Outcome::Ok(20));
        assert_eq!(Outcome::<i32>::NotFound.map(|v| v * 10), Outcome::NotFound);
        assert_eq!(Outcome::<i32>::NoContent.map(|v| v * 10), Outcome::NoContent);

        let violations = vec![Violation::new("id", "Id must be greater than zero")];
        assert_eq!(
            Outcome::<i32>::BadRequest(violations.clone()).map(|v| v * 10),
            Outcome::BadRequest(violations)
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Outcome::from(Some("x")), Outcome::Ok("x"));
        assert_eq!(Outcome::<&str>::from(None), Outcome::NotFound);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(Outcome::Ok(()).kind(), "ok");
        assert_eq!(Outcome::<()>::NotFound.kind(), "not_found");
        assert_eq!(Outcome::<()>::BadRequest(vec![]).kind(), "bad_request");
        assert_eq!(Outcome::<()>::NoContent.kind(), "no_content");
    }
}
