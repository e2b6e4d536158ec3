//! Type-safe identifiers for buoys and hazard reports.
//!
//! All identifiers use Arc<str> for cheap cloning and minimal memory overhead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::Rng;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(BuoyIdentifier);
impl_identifier!(ReportIdentifier);

const GENERATED_ID_PREFIX: &str = "id-";
const GENERATED_ID_LEN: usize = 8;

impl ReportIdentifier {
    /// Random identifier of the form `id-xxxxxxxx` (base-36 suffix).
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let mut id = String::with_capacity(GENERATED_ID_PREFIX.len() + GENERATED_ID_LEN);
        id.push_str(GENERATED_ID_PREFIX);
        for _ in 0..GENERATED_ID_LEN {
            let digit = rng.random_range(0..36u32);
            // 0..36 is always a valid base-36 digit
            id.push(char::from_digit(digit, 36).unwrap_or('0'));
        }
        Self::new(id)
    }
}
