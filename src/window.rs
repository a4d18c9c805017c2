//! Window Binner (spec §4.1): quantizes alignments into fixed-size windows
//! per contig, assigning each window to whichever opposite-side contig
//! covers the most bases within it.

use rustc_hash::FxHashMap;

use crate::align::AlignRecord;
use crate::config::WINDOW_SIZE;
use crate::genome::ContigLengths;

/// One contig's windowed partner assignments, ascending by window start.
/// Windows with no overlapping alignment are simply absent.
pub type WindowAssignments = FxHashMap<String, Vec<(u64, String)>>;

struct SideInterval<'a> {
    contig: &'a str,
    start: u64,
    end: u64,
    partner: &'a str,
}

/// Merge (sort + coalesce) overlapping/touching ranges and sum their length.
fn merged_length(ranges: &mut [(u64, u64)]) -> u64 {
    ranges.sort_unstable();
    let mut total = 0u64;
    let mut iter = ranges.iter();
    let Some(&(mut cur_start, mut cur_end)) = iter.next() else {
        return 0;
    };
    for &(s, e) in iter {
        if s <= cur_end {
            cur_end = cur_end.max(e);
        } else {
            total += cur_end - cur_start;
            cur_start = s;
            cur_end = e;
        }
    }
    total += cur_end - cur_start;
    total
}

fn bin_windows(intervals: &[SideInterval<'_>], lengths: &ContigLengths) -> WindowAssignments {
    let mut by_contig: FxHashMap<&str, Vec<&SideInterval<'_>>> = FxHashMap::default();
    for iv in intervals {
        by_contig.entry(iv.contig).or_default().push(iv);
    }

    let mut result: WindowAssignments = FxHashMap::default();
    for contig in lengths.contigs() {
        let Some(len) = lengths.get(contig) else {
            continue;
        };
        let ivs = by_contig.get(contig.as_str());
        let mut windows = Vec::new();
        let mut w = 0u64;
        while w < len {
            let w_end = w + WINDOW_SIZE;
            if let Some(ivs) = ivs {
                // First-seen order of partners within this window, for
                // deterministic tie-breaking (spec §4.1: "ties broken by
                // first encountered").
                let mut partner_order: Vec<&str> = Vec::new();
                let mut partner_ranges: FxHashMap<&str, Vec<(u64, u64)>> = FxHashMap::default();
                for iv in ivs.iter().filter(|iv| iv.start < w_end && iv.end > w) {
                    if !partner_ranges.contains_key(iv.partner) {
                        partner_order.push(iv.partner);
                    }
                    partner_ranges
                        .entry(iv.partner)
                        .or_default()
                        .push((iv.start.max(w), iv.end.min(w_end)));
                }
                let mut best: Option<(&str, u64)> = None;
                for partner in &partner_order {
                    let ranges = partner_ranges.get_mut(partner).unwrap();
                    let sum = merged_length(ranges);
                    let is_better = match best {
                        Some((_, best_sum)) => sum > best_sum,
                        None => true,
                    };
                    if is_better {
                        best = Some((partner, sum));
                    }
                }
                if let Some((partner, _)) = best {
                    windows.push((w, partner.to_string()));
                }
            }
            w += WINDOW_SIZE;
        }
        result.insert(contig.clone(), windows);
    }
    result
}

/// Bin windows on the reference side: each ref-contig window is assigned the
/// query contig covering it most.
pub fn bin_ref_windows(records: &[AlignRecord], ref_lengths: &ContigLengths) -> WindowAssignments {
    let intervals: Vec<SideInterval<'_>> = records
        .iter()
        .map(|r| SideInterval {
            contig: &r.ref_contig.0,
            start: r.ref_start,
            end: r.ref_end,
            partner: &r.qry_contig.0,
        })
        .collect();
    bin_windows(&intervals, ref_lengths)
}

/// Bin windows on the query side: each qry-contig window is assigned the
/// reference contig covering it most. Query coordinates are
/// inversion-corrected (spec §3) before binning.
pub fn bin_qry_windows(records: &[AlignRecord], qry_lengths: &ContigLengths) -> WindowAssignments {
    let intervals: Vec<SideInterval<'_>> = records
        .iter()
        .map(|r| {
            let (start, end) = r.normalized_qry_interval();
            SideInterval {
                contig: &r.qry_contig.0,
                start,
                end,
                partner: &r.ref_contig.0,
            }
        })
        .collect();
    bin_windows(&intervals, qry_lengths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{QryContigId, RefContigId};

    fn rec(rs: u64, re: u64, qs: u64, qe: u64, qd: i8) -> AlignRecord {
        AlignRecord {
            ref_contig: RefContigId("A".into()),
            qry_contig: QryContigId("a".into()),
            ref_start: rs,
            ref_end: re,
            qry_start: qs,
            qry_end: qe,
            ref_len: 30000,
            qry_len: 30000,
            identity: 99.0,
            qry_dir: qd,
        }
    }

    #[test]
    fn single_alignment_covers_every_window() {
        let records = vec![rec(0, 30000, 0, 30000, 1)];
        let lengths = ContigLengths::from_pairs(vec![("A".to_string(), 30000)]);
        let windows = bin_ref_windows(&records, &lengths);
        let a = windows.get("A").unwrap();
        assert_eq!(a.len(), 3);
        assert!(a.iter().all(|(_, p)| p == "a"));
    }

    #[test]
    fn argmax_picks_larger_overlap_in_window() {
        let mut records = vec![rec(0, 10000, 0, 10000, 1)];
        records.push(AlignRecord {
            ref_contig: RefContigId("A".into()),
            qry_contig: QryContigId("b".into()),
            ref_start: 0,
            ref_end: 4000,
            qry_start: 0,
            qry_end: 4000,
            ref_len: 10000,
            qry_len: 10000,
            identity: 99.0,
            qry_dir: 1,
        });
        let lengths = ContigLengths::from_pairs(vec![("A".to_string(), 10000)]);
        let windows = bin_ref_windows(&records, &lengths);
        assert_eq!(windows.get("A").unwrap(), &vec![(0u64, "a".to_string())]);
    }

    #[test]
    fn window_without_overlap_is_absent() {
        let records = vec![rec(0, 10000, 0, 10000, 1)];
        let lengths = ContigLengths::from_pairs(vec![("A".to_string(), 30000)]);
        let windows = bin_ref_windows(&records, &lengths);
        assert_eq!(windows.get("A").unwrap().len(), 1);
    }

    #[test]
    fn qry_side_normalizes_inverted_coordinates() {
        let records = vec![rec(0, 50000, 50000, 0, -1)];
        let lengths = ContigLengths::from_pairs(vec![("a".to_string(), 50000)]);
        let windows = bin_qry_windows(&records, &lengths);
        assert_eq!(windows.get("a").unwrap().len(), 5);
    }
}
