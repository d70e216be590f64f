/// Group items by key, keeping groups in first-seen order and members in
/// input order
///
/// Keys only need equality; the number of distinct signal types or device
/// names in a vendor file is small, so lookup is linear.
pub fn group_first_seen<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_groups_keep_first_seen_order() {
        let signals = vec![("UV", 1), ("FLD", 2), ("UV", 3), ("MS", 4), ("FLD", 5)];
        let groups = group_first_seen(signals, |(kind, _)| *kind);

        let keys: Vec<_> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["UV", "FLD", "MS"]);
        assert_eq!(groups[0].1, vec![("UV", 1), ("UV", 3)]);
        assert_eq!(groups[1].1, vec![("FLD", 2), ("FLD", 5)]);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_first_seen(Vec::<u8>::new(), |v| *v);
        assert!(groups.is_empty());
    }

    proptest! {
        #[test]
        fn prop_grouping_preserves_order(keys in proptest::collection::vec(0u8..5, 0..40)) {
            let items: Vec<(u8, usize)> = keys.iter().copied().zip(0..).collect();
            let groups = group_first_seen(items.clone(), |(k, _)| *k);

            // Groups appear in order of each key's first occurrence
            let mut first_seen = Vec::new();
            for k in &keys {
                if !first_seen.contains(k) {
                    first_seen.push(*k);
                }
            }
            let group_keys: Vec<u8> = groups.iter().map(|(k, _)| *k).collect();
            prop_assert_eq!(group_keys, first_seen);

            // Members keep input order and nothing is lost
            let mut total = 0;
            for (k, members) in &groups {
                let expected: Vec<(u8, usize)> =
                    items.iter().copied().filter(|(key, _)| key == k).collect();
                prop_assert_eq!(members, &expected);
                total += members.len();
            }
            prop_assert_eq!(total, items.len());
        }
    }
}
