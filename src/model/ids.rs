//! Identifier newtypes.
//!
//! Every identifier is a random v4 UUID rendered as a string, so ids and share
//! tokens are unguessable and never derived from one another.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifies a [`BreadType`](crate::model::BreadType).
    BreadTypeId
);
string_id!(
    /// Identifies a [`BakingDay`](crate::model::BakingDay).
    BakingDayId
);
string_id!(
    /// The secret handed to customers; possession grants access to one baking day.
    ShareToken
);
string_id!(
    /// Identifies a single stored [`OrderLine`](crate::model::OrderLine).
    OrderLineId
);
string_id!(
    /// Shared by all lines of one customer submission.
    OrderGroupId
);
