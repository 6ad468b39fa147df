//! Group key/value records by key, keeping first-seen key order.

use std::collections::HashMap;
use std::hash::Hash;

use rapidmq_core::KeyedRecord;

/// Group record values by key.
///
/// The i-th group holds the values of the i-th distinct key in order of
/// first appearance. Values keep their input order within a group and
/// nothing is dropped or deduplicated.
pub fn group<K, V, I>(records: I) -> Vec<Vec<V>>
where
    K: Eq + Hash,
    I: IntoIterator<Item = KeyedRecord<K, V>>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<V>> = Vec::new();

    for record in records {
        let idx = *slots.entry(record.key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[idx].push(record.value);
    }

    groups
}

/// Like [`group`], but each group is returned with its key.
pub fn group_with_keys<K, V, I>(records: I) -> Vec<(K, Vec<V>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = KeyedRecord<K, V>>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();

    for record in records {
        match slots.get(&record.key) {
            Some(&idx) => groups[idx].1.push(record.value),
            None => {
                slots.insert(record.key.clone(), groups.len());
                groups.push((record.key, vec![record.value]));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(key: &str, value: i32) -> KeyedRecord<String, i32> {
        KeyedRecord::new(key.to_string(), value)
    }

    #[test]
    fn groups_by_first_seen_key() {
        let records = vec![rec("a", 1), rec("b", 2), rec("a", 3)];
        assert_eq!(group(records), vec![vec![1, 3], vec![2]]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let records: Vec<KeyedRecord<String, i32>> = Vec::new();
        assert!(group(records).is_empty());
    }

    #[test]
    fn conserves_every_value() {
        let records = vec![
            rec("x", 1),
            rec("y", 2),
            rec("x", 1),
            rec("z", 3),
            rec("y", 2),
            rec("x", 4),
        ];
        let total = records.len();
        let groups = group(records);
        assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), total);
        // Duplicates are kept, order within a group preserved.
        assert_eq!(groups, vec![vec![1, 1, 4], vec![2, 2], vec![3]]);
    }

    #[test]
    fn later_keys_do_not_reorder_groups() {
        let records = vec![rec("b", 1), rec("a", 2), rec("b", 3), rec("c", 4), rec("a", 5)];
        assert_eq!(group(records), vec![vec![1, 3], vec![2, 5], vec![4]]);
    }

    #[test]
    fn single_key_is_one_group() {
        let records = (0..5).map(|i| rec("only", i));
        assert_eq!(group(records), vec![vec![0, 1, 2, 3, 4]]);
    }

    #[test]
    fn keyed_groups_carry_their_key() {
        let records = vec![rec("a", 1), rec("b", 2), rec("a", 3)];
        let groups = group_with_keys(records);
        assert_eq!(
            groups,
            vec![("a".to_string(), vec![1, 3]), ("b".to_string(), vec![2])]
        );
    }
}
