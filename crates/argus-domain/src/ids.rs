//! Identifier module - UUIDv7-based ids for every pipeline entity
//!
//! UUIDv7 provides:
//! - Chronological sortability for temporal queries
//! - 128-bit uniqueness
//! - RFC 9562-standard format with broad ecosystem support
//! - No coordination required for distributed generation

use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u128);

        impl $name {
            /// Generate a new UUIDv7-based id
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().as_u128())
            }

            /// Create an id from a raw u128 value
            ///
            /// This is primarily for storage layer deserialization.
            pub fn from_value(value: u128) -> Self {
                Self(value)
            }

            /// Parse an id from a UUIDv7 string
            pub fn from_string(s: &str) -> Result<Self, String> {
                uuid::Uuid::parse_str(s)
                    .map(|u| Self(u.as_u128()))
                    .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0
            }

            /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
            pub fn timestamp(&self) -> u64 {
                // UUIDv7: top 48 bits are Unix millisecond timestamp
                (self.0 >> 80) as u64
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", uuid::Uuid::from_u128(self.0))
            }
        }
    };
}

entity_id! {
    /// Unique identifier for an ingested content item
    ItemId
}

entity_id! {
    /// Unique identifier for an extracted claim
    ClaimId
}

entity_id! {
    /// Unique identifier for one piece of evidence
    EvidenceId
}

entity_id! {
    /// Unique identifier for a synthesized verdict
    VerdictId
}

entity_id! {
    /// Unique identifier for a ground-truth resolution
    ResolutionId
}

entity_id! {
    /// Unique identifier for a publisher/handle/regulator entity
    SourceId
}
