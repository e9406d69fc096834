use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Identifier type of an aggregate.
///
/// All ids are integer keys assigned by the backend database.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    fn value(&self) -> i64;

    fn as_string(&self) -> String {
        self.value().to_string()
    }

    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for i64 {
    fn value(&self) -> i64 {
        *self
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid id: {}", e))
    }
}

/// Declares an integer id newtype that serializes as a bare number.
#[macro_export]
macro_rules! aggregate_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Default,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }
        }

        impl $crate::domain::common::AggregateId for $name {
            fn value(&self) -> i64 {
                self.0
            }

            fn from_string(s: &str) -> Result<Self, String> {
                <i64 as $crate::domain::common::AggregateId>::from_string(s).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    aggregate_id!(SampleId);

    #[test]
    fn test_id_serializes_as_number() {
        let id = SampleId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: SampleId = serde_json::from_str("7").unwrap();
        assert_eq!(back, SampleId(7));
    }

    #[test]
    fn test_from_string() {
        assert_eq!(SampleId::from_string(" 15 ").unwrap(), SampleId(15));
        assert!(SampleId::from_string("abc").is_err());
        assert_eq!(SampleId(3).as_string(), "3");
    }
}
