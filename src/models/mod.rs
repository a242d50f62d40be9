use std::collections::HashMap;
use std::hash::Hash;

pub mod details;
pub mod movie;
pub mod review;

pub use details::{CastMember, LegacyDetailsForm, MovieDetails, RecommendationCard};
pub use movie::MovieRecord;
pub use review::{ReviewFetch, ReviewRecord, ReviewSet, ReviewStatus, SentimentLabel};

/// Collapses items sharing a key, keyed-map style.
///
/// The first occurrence keeps its position; a later item with the same key
/// replaces its value.
pub(crate) fn upsert_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut merged: Vec<T> = Vec::new();

    for item in items {
        match positions.get(&key(&item)) {
            Some(&index) => merged[index] = item,
            None => {
                positions.insert(key(&item), merged.len());
                merged.push(item);
            }
        }
    }

    merged
}
