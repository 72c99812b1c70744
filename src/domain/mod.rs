//! Domain models
//!
//! These are the shapes repositories return and services hand to callers.
//! JSON uses camelCase field names; stored rows use snake_case columns.

/// Declares a string-backed identifier newtype.
///
/// Must stay above the submodule declarations that invoke it.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// A fresh random (v4) identifier
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&$name> for crate::value::Value {
            fn from(id: &$name) -> Self {
                crate::value::Value::Text(id.0.clone())
            }
        }

        impl From<$name> for crate::value::Value {
            fn from(id: $name) -> Self {
                crate::value::Value::Text(id.0)
            }
        }
    };
}

pub mod assembly;
pub mod decision;
pub mod official;

pub use assembly::{Assembly, AssemblyId, AssemblyType, PoliticalParty, PoliticalPartyId};
pub use decision::{
    Decision, DecisionFilters, DecisionId, DecisionPatch, IndividualVote, NewDecision,
    VoteId, VoteResultsOverview, VoteResultsPatch, VoteValue,
};
pub use official::{
    ContactInfo, ElectedOfficial, ElectedOfficialId, ElectedOfficialPatch, NewElectedOfficial,
    SocialMedia,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_generated_ids_are_uuids() {
        let id = DecisionId::generate();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, DecisionId::generate());
    }

    #[test]
    fn test_id_into_value() {
        let id = ElectedOfficialId::from("official-1");
        assert_eq!(Value::from(&id), Value::from("official-1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"official-1\"");
    }
}
