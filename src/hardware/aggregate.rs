use std::collections::HashMap;

use crate::hardware::types::AggregatedItem;

/// Count occurrences of each label, keeping the order labels were first seen.
pub fn aggregate<I, S>(labels: I) -> Vec<AggregatedItem>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut items: Vec<AggregatedItem> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for label in labels {
        let label = label.as_ref();
        if label.is_empty() {
            continue;
        }
        match positions.get(label) {
            Some(&index) => items[index].count += 1,
            None => {
                positions.insert(label.to_string(), items.len());
                items.push(AggregatedItem {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    items
}
