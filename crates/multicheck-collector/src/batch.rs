use std::collections::HashMap;

use multicheck_common::types::MetricRecord;

/// Builds submission records from one rule's matched values.
///
/// Produces one record per distinct discriminator with
/// `item_key = <prefix>[<discriminator>]` and the run's fixed timestamp.
/// Records are emitted in sorted discriminator order so logs and staging
/// files are deterministic; nothing downstream relies on it.
pub fn build_records(
    item_prefix: &str,
    values: &HashMap<String, String>,
    timestamp: i64,
) -> Vec<MetricRecord> {
    let mut discriminators: Vec<&String> = values.keys().collect();
    discriminators.sort();
    discriminators
        .into_iter()
        .map(|discriminator| MetricRecord {
            item_key: format!("{item_prefix}[{discriminator}]"),
            timestamp,
            value: values[discriminator].clone(),
        })
        .collect()
}
