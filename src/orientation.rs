//! Orientation Estimator (spec §4.2): for each (contig, partner) pair,
//! decides direction by comparing summed lengths of forward vs inverted
//! merged alignment intervals.

use rustc_hash::FxHashMap;

use crate::align::AlignRecord;

/// Direction keyed by (this-side contig, partner contig).
pub type OrientationMap = FxHashMap<(String, String), i8>;

fn merged_sum(mut ranges: Vec<(u64, u64)>) -> u64 {
    if ranges.is_empty() {
        return 0;
    }
    ranges.sort_unstable();
    let mut total = 0u64;
    let (mut cur_start, mut cur_end) = ranges[0];
    for &(s, e) in &ranges[1..] {
        if s <= cur_end {
            cur_end = cur_end.max(e);
        } else {
            total += cur_end - cur_start;
            cur_start = s;
            cur_end = e;
        }
    }
    total + (cur_end - cur_start)
}

/// Estimate orientation for the reference-side view: contig = ref contig,
/// partner = qry contig, interval = ref coordinates.
pub fn estimate_ref_orientation(records: &[AlignRecord]) -> OrientationMap {
    estimate(records, |r| {
        (r.ref_contig.0.as_str(), r.qry_contig.0.as_str(), r.ref_start, r.ref_end)
    })
}

/// Estimate orientation for the query-side view: contig = qry contig,
/// partner = ref contig, interval = inversion-corrected qry coordinates.
pub fn estimate_qry_orientation(records: &[AlignRecord]) -> OrientationMap {
    estimate(records, |r| {
        let (s, e) = r.normalized_qry_interval();
        (r.qry_contig.0.as_str(), r.ref_contig.0.as_str(), s, e)
    })
}

fn estimate<'a, F>(records: &'a [AlignRecord], extract: F) -> OrientationMap
where
    F: Fn(&'a AlignRecord) -> (&'a str, &'a str, u64, u64),
{
    let mut forward: FxHashMap<(String, String), Vec<(u64, u64)>> = FxHashMap::default();
    let mut inverted: FxHashMap<(String, String), Vec<(u64, u64)>> = FxHashMap::default();

    for r in records {
        let (contig, partner, start, end) = extract(r);
        let key = (contig.to_string(), partner.to_string());
        if r.qry_dir == -1 {
            inverted.entry(key).or_default().push((start, end));
        } else {
            forward.entry(key).or_default().push((start, end));
        }
    }

    let mut keys: std::collections::HashSet<(String, String)> =
        forward.keys().cloned().collect();
    keys.extend(inverted.keys().cloned());

    let mut result = OrientationMap::default();
    for key in keys {
        let fwd_len = merged_sum(forward.remove(&key).unwrap_or_default());
        let inv_len = merged_sum(inverted.remove(&key).unwrap_or_default());
        result.insert(key, if fwd_len >= inv_len { 1 } else { -1 });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{QryContigId, RefContigId};

    fn rec(rs: u64, re: u64, qd: i8) -> AlignRecord {
        AlignRecord {
            ref_contig: RefContigId("A".into()),
            qry_contig: QryContigId("a".into()),
            ref_start: rs,
            ref_end: re,
            qry_start: 0,
            qry_end: re - rs,
            ref_len: 50000,
            qry_len: 50000,
            identity: 99.0,
            qry_dir: qd,
        }
    }

    #[test]
    fn forward_dominates_when_no_inversion() {
        let records = vec![rec(0, 50000, 1)];
        let orient = estimate_ref_orientation(&records);
        assert_eq!(orient.get(&("A".to_string(), "a".to_string())), Some(&1));
    }

    #[test]
    fn inverted_wins_when_strictly_longer() {
        let records = vec![rec(0, 10000, 1), rec(0, 50000, -1)];
        let orient = estimate_ref_orientation(&records);
        assert_eq!(orient.get(&("A".to_string(), "a".to_string())), Some(&-1));
    }

    #[test]
    fn ties_favor_forward() {
        let records = vec![rec(0, 10000, 1), rec(20000, 30000, -1)];
        let orient = estimate_ref_orientation(&records);
        assert_eq!(orient.get(&("A".to_string(), "a".to_string())), Some(&1));
    }
}
