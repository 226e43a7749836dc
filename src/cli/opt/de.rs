use std::fmt;

use serde::{
    de::{Error, Visitor},
    Deserialize, Deserializer,
};

/// Read a plain value into `Some`, so that settings files need no `Some(..)`
pub(super) fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub(super) fn deserialize_opt_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_u64(OptUsizeVisitor)
}

struct OptUsizeVisitor;

impl<'de> Visitor<'de> for OptUsizeVisitor {
    type Value = Option<usize>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a positive integer")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        usize::try_from(v)
            .map(Some)
            .map_err(|_| E::custom(format!("{} is too large", v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("{} is negative", v)))
            .and_then(|v| self.visit_u64(v))
    }
}
