//! Tri-state field for partial updates.
//!
//! JSON update bodies distinguish three cases per key: the key is missing
//! (leave the stored value alone), the key is `null` (clear it), or the key
//! carries a value (replace it). `Option<T>` cannot tell the first two apart,
//! so payloads use [`Patch`] together with `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

/// One key of a partial update.
///
/// # Examples
/// ```
/// use apptrack::domain::Patch;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Body {
///     #[serde(default)]
///     notes: Patch<String>,
/// }
///
/// let absent: Body = serde_json::from_str("{}").expect("json");
/// let cleared: Body = serde_json::from_str(r#"{"notes":null}"#).expect("json");
/// let set: Body = serde_json::from_str(r#"{"notes":"call back"}"#).expect("json");
/// assert_eq!(absent.notes, Patch::Absent);
/// assert_eq!(cleared.notes, Patch::Clear);
/// assert_eq!(set.notes, Patch::Set("call back".to_owned()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not supplied.
    Absent,
    /// Key supplied as `null`.
    Clear,
    /// Key supplied with a value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    /// Whether the key was omitted.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the carried value.
    #[must_use]
    pub const fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(value),
        }
    }

    /// Transform the carried value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(f(value)),
        }
    }

    /// Transform the carried value with a fallible function.
    ///
    /// # Errors
    /// Propagates the first error returned by `f`.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        match self {
            Self::Absent => Ok(Patch::Absent),
            Self::Clear => Ok(Patch::Clear),
            Self::Set(value) => f(value).map(Patch::Set),
        }
    }

    /// Flatten into the `Option<Option<T>>` shape used by changesets:
    /// `None` leaves the column untouched, `Some(None)` writes `NULL`.
    #[must_use]
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }

    /// Apply the change to an optional slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        if let Some(next) = self.into_change() {
            *slot = next;
        }
    }
}

impl<T> Patch<Option<T>> {
    /// Collapse `Set(None)` into [`Patch::Clear`].
    #[must_use]
    pub fn flatten(self) -> Patch<T> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Clear | Self::Set(None) => Patch::Clear,
            Self::Set(Some(value)) => Patch::Set(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Clear, Self::Set))
    }
}
