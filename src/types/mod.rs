// src/types/mod.rs
//! Domain types shared by the backend clients, the local store and the ranking pipeline

pub mod analysis;
pub mod answer;
pub mod question;
pub mod ranking;
pub mod response;
pub mod session;

pub use analysis::{AnalysisResult, AnalysisSource};
pub use answer::Answer;
pub use question::{Question, DEFAULT_GROUPING_KEY};
pub use ranking::{RankedCandidate, RankingStatus};
pub use session::{SessionContext, UserRole};

use serde::{Deserialize, Deserializer};

/// The backend sends `null` for empty collections and names; fold it into the default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// String list where `null` entries are dropped and a `null` list is empty
pub(crate) fn non_null_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(entries.unwrap_or_default().into_iter().flatten().collect())
}
