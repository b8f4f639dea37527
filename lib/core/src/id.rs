//! Strongly-typed identifiers used to correlate log output.
//!
//! All IDs use ULID format, providing both uniqueness and temporal ordering.

use std::fmt;
use ulid::Ulid;

/// Macro to generate a strongly-typed ID wrapper around ULID.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a new ID with a randomly generated ULID.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// Identifies one inbound study request.
    RequestId,
    "req"
);

define_id!(
    /// Identifies one run of the generation pipeline.
    GenerationId,
    "gen"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_display_format() {
        let id = RequestId::new();
        assert!(id.to_string().starts_with("req_"));
    }

    #[test]
    fn generation_id_display_format() {
        let id = GenerationId::new();
        let rendered = id.to_string();
        assert!(rendered.starts_with("gen_"));
        assert_eq!(rendered.len(), "gen_".len() + 26);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
        assert_ne!(GenerationId::default(), GenerationId::default());
    }
}
