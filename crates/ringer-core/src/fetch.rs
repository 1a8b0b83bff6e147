// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Outcome of a read that is allowed to degrade.
//!
//! Reads in Ringer never block the user: a failure falls back to an empty
//! result. `Fetched` keeps the three cases apart so a caller can still tell
//! "nothing there" from "could not look".

/// Result of a degradable read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// A value was read.
    Found(T),
    /// Nothing is stored; this is a legitimate state, not a failure.
    Empty,
    /// The read failed; the string describes why.
    Failed(String),
}

impl<T> Fetched<T> {
    /// True for [`Fetched::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The value, if one was read.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    /// Map the found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Found(value) => Fetched::Found(f(value)),
            Self::Empty => Fetched::Empty,
            Self::Failed(reason) => Fetched::Failed(reason),
        }
    }

    /// The value, or `fallback()` for both `Empty` and `Failed`.
    ///
    /// A failure is logged at `warn` under `what` before falling back.
    pub fn or_fallback(self, what: &str, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Found(value) => value,
            Self::Empty => fallback(),
            Self::Failed(reason) => {
                tracing::warn!(%reason, "{what}: read failed, using fallback");
                fallback()
            }
        }
    }
}

impl<T: Default> Fetched<T> {
    /// The value, or `T::default()`, logging failures under `what`.
    pub fn or_default_logged(self, what: &str) -> T {
        self.or_fallback(what, T::default)
    }
}

impl<T> From<Option<T>> for Fetched<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Self::Found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_applies_to_empty_and_failed() {
        assert_eq!(Fetched::Found(3).or_fallback("n", || 0), 3);
        assert_eq!(Fetched::<i32>::Empty.or_fallback("n", || 7), 7);
        assert_eq!(Fetched::<i32>::Failed("boom".into()).or_default_logged("n"), 0);
    }

    #[test]
    fn failed_is_distinguishable_from_empty() {
        let empty: Fetched<Vec<u8>> = None.into();
        let failed: Fetched<Vec<u8>> = Fetched::Failed("denied".into());
        assert!(!empty.is_failed());
        assert!(failed.is_failed());
        assert_eq!(empty.into_option(), None);
    }

    #[test]
    fn map_preserves_the_case() {
        assert_eq!(Fetched::Found(2).map(|n| n * 2), Fetched::Found(4));
        assert_eq!(
            Fetched::<i32>::Failed("x".into()).map(|n| n * 2),
            Fetched::Failed("x".into())
        );
    }
}
