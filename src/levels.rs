//! The ordinal scale every permission grant is expressed in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A permission level on the five-valued ordinal scale.
///
/// Levels merge by taking the numerically highest value among all applicable
/// grants, so the declaration order is the precedence order:
/// `Always > Never > Yes > No > Undefined`.
///
/// The order is deliberately not monotonic with the boolean meaning. `Never`
/// outranks `Yes` so a higher-priority source can forcibly deny what a
/// lower-priority source grants, while `Always` outranks `Never` so an even
/// higher authority can force-grant over a denial.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    /// No source has expressed an opinion.
    #[default]
    Undefined = 0,
    /// Denied, overridable by `Yes` from any source.
    No = 1,
    /// Granted, overridable by `Never`.
    Yes = 2,
    /// Forcibly denied, overridable only by `Always`.
    Never = 3,
    /// Forcibly granted, beats everything.
    Always = 4,
}

impl PermissionLevel {
    /// Boolean coercion of a level: only `Yes` and `Always` grant.
    ///
    /// `Never` coerces to `false` despite outranking `Yes` numerically.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Yes | Self::Always)
    }

    /// Returns the level name used in serialized form and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::No => "no",
            Self::Yes => "yes",
            Self::Never => "never",
            Self::Always => "always",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
