//! Closed value sets for application records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A string did not name a member of a closed value set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownKind {
    /// Name of the value set.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

macro_rules! closed_kind {
    (
        $(#[$meta:meta])*
        $name:ident as $label:literal, default $default:ident {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every accepted spelling, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$(stringify!($variant)),+];

            /// Wire spelling of the value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(Self::$variant),)+
                    other => Err(UnknownKind {
                        kind: $label,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

closed_kind! {
    /// Where an application sits in the hiring pipeline.
    ///
    /// Any status may follow any other; the tracker records what the user
    /// reports rather than enforcing a workflow.
    ApplicationStatus as "status", default Applied {
        /// Submitted, awaiting response.
        Applied,
        /// At least one interview scheduled or held.
        Interview,
        /// Offer received.
        Offer,
        /// Closed without an offer.
        Rejected,
    }
}

closed_kind! {
    /// How much attention the user wants to give an application.
    Priority as "priority", default Medium {
        /// Background.
        Low,
        /// Normal.
        Medium,
        /// Top of the list.
        High,
    }
}

closed_kind! {
    /// Working arrangement offered by the role.
    WorkMode as "work mode", default Remote {
        /// Fully remote.
        Remote,
        /// Split between home and office.
        Hybrid,
        /// Office based.
        Onsite,
    }
}
