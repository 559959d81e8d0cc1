//! Status bucketing and in-bucket ranking.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::types::{NormalizedRecord, RankedCollection};

/// Rank order: featured first, then `date` descending by plain string
/// comparison. Equal keys compare `Equal` so a stable sort keeps input order.
#[must_use]
pub fn compare_records(a: &NormalizedRecord, b: &NormalizedRecord) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| b.date.cmp(&a.date))
}

/// Partition `records` by status and order each bucket.
///
/// Every input record lands in exactly one bucket. Within a bucket, records
/// with equal featured flag and date keep their input order.
#[must_use]
pub fn rank(records: impl IntoIterator<Item = NormalizedRecord>) -> RankedCollection {
    let mut buckets: BTreeMap<String, Vec<NormalizedRecord>> = BTreeMap::new();
    for record in records {
        buckets.entry(record.status.clone()).or_default().push(record);
    }
    for bucket in buckets.values_mut() {
        // `sort_by` is stable.
        bucket.sort_by(compare_records);
    }
    RankedCollection::from_buckets(buckets)
}
