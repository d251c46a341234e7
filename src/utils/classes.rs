use std::{collections::HashSet, hash::Hash};

/// Invert a map by swapping keys and values
pub fn invert_map<K, V, MK, MV>(original: MK) -> MV
where
    K: Eq + Hash,
    V: Eq + Hash,
    MK: IntoIterator<Item = (K, V)>,
    MV: FromIterator<(V, K)>,
{
    original
        .into_iter()
        .map(|(key, value)| (value, key))
        .collect()
}

/// Collect the distinct class labels in the order they are first seen
pub fn first_seen<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();

    labels
        .into_iter()
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_invert_map() {
        let id2label = vec![(0, "FAKE".to_string()), (1, "REAL".to_string())];
        let label2id: HashMap<String, usize> = invert_map(id2label);

        assert_eq!(label2id["FAKE"], 0);
        assert_eq!(label2id["REAL"], 1);
    }

    #[test]
    fn test_first_seen() {
        let labels = ["REAL", "FAKE", "REAL", "FAKE"];

        assert_eq!(first_seen(labels), vec!["REAL".to_string(), "FAKE".to_string()]);
    }
}
