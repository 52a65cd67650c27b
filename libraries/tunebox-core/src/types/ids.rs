/// ID types for Tunebox entities
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

/// Identity of a user as yielded by token verification.
///
/// Opaque: the library never inspects or validates its contents, it only
/// compares identities for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record identifiers are UUIDs generated by the library; `parse` rejects
/// anything that is not a well-formed UUID.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier without validating it
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Parse an identifier supplied by a caller
            pub fn parse(raw: &str) -> Result<Self> {
                let trimmed = raw.trim();
                Uuid::parse_str(trimmed).map_err(|_| {
                    CoreError::invalid_argument(format!(
                        "Invalid {} ID format: {:?}",
                        $entity, raw
                    ))
                })?;
                Ok(Self(trimmed.to_string()))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        #[cfg(feature = "sqlx")]
        impl Type<Sqlite> for $name {
            fn type_info() -> SqliteTypeInfo {
                <String as Type<Sqlite>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> Encode<'q, Sqlite> for $name {
            fn encode_by_ref(
                &self,
                args: &mut Vec<SqliteArgumentValue<'q>>,
            ) -> std::result::Result<IsNull, BoxDynError> {
                <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> Decode<'r, Sqlite> for $name {
            fn decode(value: SqliteValueRef<'r>) -> std::result::Result<Self, BoxDynError> {
                let s = <String as Decode<Sqlite>>::decode(value)?;
                Ok($name(s))
            }
        }
    };
}

record_id!(
    /// Song identifier
    SongId,
    "Song"
);

record_id!(
    /// Playlist identifier
    PlaylistId,
    "Playlist"
);

record_id!(
    /// Favorite record identifier
    FavoriteId,
    "Favorite"
);

#[cfg(feature = "sqlx")]
impl Type<Sqlite> for UserId {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}

#[cfg(feature = "sqlx")]
impl<'q> Encode<'q, Sqlite> for UserId {
    fn encode_by_ref(
        &self,
        args: &mut Vec<SqliteArgumentValue<'q>>,
    ) -> std::result::Result<IsNull, BoxDynError> {
        <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> Decode<'r, Sqlite> for UserId {
    fn decode(value: SqliteValueRef<'r>) -> std::result::Result<Self, BoxDynError> {
        let s = <String as Decode<Sqlite>>::decode(value)?;
        Ok(UserId(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn generated_ids_are_unique_and_parse_back() {
        let a = SongId::generate();
        let b = SongId::generate();
        assert_ne!(a, b);
        assert_eq!(SongId::parse(a.as_str()).unwrap(), a);
    }

    #[test]
    fn malformed_id_is_invalid_argument() {
        let err = SongId::parse("12345").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = PlaylistId::parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let id = FavoriteId::generate();
        let padded = format!("  {}\n", id);
        assert_eq!(FavoriteId::parse(&padded).unwrap(), id);
    }

    #[test]
    fn user_id_is_opaque() {
        let id = UserId::new("not a uuid at all");
        assert_eq!(id.as_str(), "not a uuid at all");
        assert_eq!(format!("{}", id), "not a uuid at all");
    }
}
