//! Opaque resource identifiers.

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its server representation.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }
    };
}

opaque_id!(
    /// Identifier of a job application.
    ApplicationId
);
opaque_id!(
    /// Identifier of a company.
    CompanyId
);
opaque_id!(
    /// Identifier of a note attached to an application.
    NoteId
);
opaque_id!(
    /// Identifier of a reminder.
    ReminderId
);
opaque_id!(
    /// Identifier of a user account.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(CompanyId::from(1), CompanyId::from("1"));
        assert_ne!(ApplicationId::new("1"), ApplicationId::new("01"));
    }

    #[test]
    fn test_display_is_raw_value() {
        assert_eq!(ReminderId::new("r-9").to_string(), "r-9");
    }
}
