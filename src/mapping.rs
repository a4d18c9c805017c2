//! Mapping Summarizer (spec §4.5) and Conflict Resolver (spec §4.6).

use rustc_hash::FxHashMap;

use crate::config::WINDOW_SIZE;
use crate::error::{ChroderError, GraphWarning, Result};
use crate::lrs;
use crate::orientation::OrientationMap;
use crate::run::extract_sequence;
use crate::window::WindowAssignments;

/// One matched partner interval on a contig (spec §3 "Mapping entry").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingEntry {
    pub start: u64,
    pub end: u64,
    pub length: u64,
    pub direction: i8,
}

/// Per-contig partner tables: contig -> partner -> entry.
pub type MappingTable = FxHashMap<String, FxHashMap<String, MappingEntry>>;

/// Walk each contig's LRS-selected window positions and emit a mapping entry
/// per contiguous partner block.
pub fn summarize(windows: &WindowAssignments, orientation: &OrientationMap) -> Result<MappingTable> {
    let mut out: MappingTable = FxHashMap::default();
    for (contig, win) in windows {
        if win.is_empty() {
            out.insert(contig.clone(), FxHashMap::default());
            continue;
        }

        let seq = extract_sequence(contig, win)?;
        let selected = lrs::solve(&seq.symbols).map_err(|source| ChroderError::LrsFailure {
            contig: contig.clone(),
            length: seq.symbols.len(),
            source,
        })?;

        let mut entries: FxHashMap<String, MappingEntry> = FxHashMap::default();
        if !selected.is_empty() {
            let direction_of = |partner: &str| {
                *orientation
                    .get(&(contig.clone(), partner.to_string()))
                    .unwrap_or(&1)
            };

            let mut partner = seq.symbols[selected[0]].clone();
            let mut start = seq.window_starts[selected[0]];
            let mut end = start;
            for &idx in &selected[1..] {
                if seq.symbols[idx] == partner {
                    end = seq.window_starts[idx];
                } else {
                    entries.insert(
                        partner.clone(),
                        MappingEntry {
                            start,
                            end,
                            length: end - start + WINDOW_SIZE,
                            direction: direction_of(&partner),
                        },
                    );
                    partner = seq.symbols[idx].clone();
                    start = seq.window_starts[idx];
                    end = start;
                }
            }
            entries.insert(
                partner.clone(),
                MappingEntry {
                    start,
                    end,
                    length: end - start + WINDOW_SIZE,
                    direction: direction_of(&partner),
                },
            );
        }
        out.insert(contig.clone(), entries);
    }
    Ok(out)
}

/// Pass 1 (spec §4.6): drop a mapping that isn't reciprocated on the other side.
pub fn prune_non_reciprocal(ref_mappings: &mut MappingTable, qry_mappings: &mut MappingTable) {
    let rids: Vec<String> = ref_mappings.keys().cloned().collect();
    for rid in &rids {
        let qids: Vec<String> = ref_mappings[rid].keys().cloned().collect();
        for qid in qids {
            let reciprocal = qry_mappings
                .get(&qid)
                .map_or(false, |m| m.contains_key(rid.as_str()));
            if !reciprocal {
                ref_mappings.get_mut(rid).unwrap().remove(&qid);
            }
        }
    }

    let qids: Vec<String> = qry_mappings.keys().cloned().collect();
    for qid in &qids {
        let rids: Vec<String> = qry_mappings[qid].keys().cloned().collect();
        for rid in rids {
            let reciprocal = ref_mappings
                .get(&rid)
                .map_or(false, |m| m.contains_key(qid.as_str()));
            if !reciprocal {
                qry_mappings.get_mut(qid).unwrap().remove(&rid);
            }
        }
    }
}

fn edge_partners(entries: &FxHashMap<String, MappingEntry>) -> (String, String) {
    let start_id = entries
        .iter()
        .min_by_key(|(_, e)| e.start)
        .map(|(id, _)| id.clone())
        .unwrap();
    let end_id = entries
        .iter()
        .max_by_key(|(_, e)| e.end)
        .map(|(id, _)| id.clone())
        .unwrap();
    (start_id, end_id)
}

/// One side of pass 2's middle-partner sweep: for each contig on `owner`'s
/// side with a candidate middle partner that itself maps to multiple
/// contigs on `other`'s side, keep whichever side has the larger aligned
/// length and purge the rest.
fn resolve_middle_sweep(owner: &mut MappingTable, other: &mut MappingTable, noref: bool) {
    let owner_ids: Vec<String> = owner.keys().cloned().collect();
    for id in &owner_ids {
        let entries = match owner.get(id) {
            Some(e) if !e.is_empty() => e,
            _ => continue,
        };

        let candidates: Vec<String> = if noref {
            let (start_id, end_id) = edge_partners(entries);
            entries
                .keys()
                .filter(|p| **p != start_id && **p != end_id)
                .cloned()
                .collect()
        } else {
            entries.keys().cloned().collect()
        };

        for partner in candidates {
            let partner_entries = match other.get(&partner) {
                Some(e) => e,
                None => continue,
            };
            if partner_entries.len() <= 1 {
                continue;
            }
            let len_to_owner = match partner_entries.get(id) {
                Some(e) => e.length,
                None => continue,
            };
            let sum_other: u64 = partner_entries
                .iter()
                .filter(|(k, _)| *k != id)
                .map(|(_, e)| e.length)
                .sum();

            if len_to_owner > sum_other {
                let rivals: Vec<String> = other[&partner]
                    .keys()
                    .filter(|k| **k != *id)
                    .cloned()
                    .collect();
                for rival in rivals {
                    other.get_mut(&partner).unwrap().remove(&rival);
                    if let Some(m) = owner.get_mut(&rival) {
                        m.remove(&partner);
                    }
                }
            } else {
                owner.get_mut(id).unwrap().remove(&partner);
                if let Some(m) = other.get_mut(&partner) {
                    m.remove(id);
                }
            }
        }
    }
}

/// Pass 2 (spec §4.6): resolve middle-positioned partners that conflict with
/// a neighbor, by total aligned length.
pub fn resolve_middle_partners(ref_mappings: &mut MappingTable, qry_mappings: &mut MappingTable, noref: bool) {
    resolve_middle_sweep(ref_mappings, qry_mappings, noref);
    if noref {
        resolve_middle_sweep(qry_mappings, ref_mappings, noref);
    }

    ref_mappings.retain(|_, v| !v.is_empty());
    qry_mappings.retain(|_, v| !v.is_empty());
}

/// Log (non-fatal) any query contig that still maps to more than one
/// reference contig after resolution, when running in chromosome-scale mode.
pub fn report_unresolved_branching(qry_mappings: &MappingTable, noref: bool) {
    if noref {
        return;
    }
    for (qid, entries) in qry_mappings {
        if entries.len() > 1 {
            eprintln!(
                "{}",
                GraphWarning::BranchingUnresolved {
                    contig: qid.clone()
                }
            );
        }
    }
}

/// Run both conflict-resolution passes and the branching diagnostic.
pub fn resolve(ref_mappings: &mut MappingTable, qry_mappings: &mut MappingTable, noref: bool) {
    prune_non_reciprocal(ref_mappings, qry_mappings);
    resolve_middle_partners(ref_mappings, qry_mappings, noref);
    report_unresolved_branching(qry_mappings, noref);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: u64, end: u64, dir: i8) -> MappingEntry {
        MappingEntry {
            start,
            end,
            length: end - start + WINDOW_SIZE,
            direction: dir,
        }
    }

    fn table(pairs: Vec<(&str, Vec<(&str, MappingEntry)>)>) -> MappingTable {
        pairs
            .into_iter()
            .map(|(id, partners)| {
                (
                    id.to_string(),
                    partners
                        .into_iter()
                        .map(|(p, e)| (p.to_string(), e))
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn non_reciprocal_entry_is_pruned() {
        let mut refs = table(vec![("A", vec![("a", entry(0, 30000, 1))])]);
        let mut qrys = table(vec![("a", vec![])]);
        prune_non_reciprocal(&mut refs, &mut qrys);
        assert!(refs["A"].is_empty());
    }

    #[test]
    fn middle_partner_conflict_purges_weaker_side() {
        // spec §8 scenario 5: A -> [p, q(10k), r], q also maps to B with 80k.
        let mut refs = table(vec![(
            "A",
            vec![
                ("p", entry(0, 20000, 1)),
                ("q", entry(30000, 30000, 1)),
                ("r", entry(40000, 60000, 1)),
            ],
        )]);
        let mut qrys = table(vec![(
            "q",
            vec![
                ("A", entry(30000, 30000, 1)),
                ("B", entry(0, 70000, 1)),
            ],
        )]);
        resolve_middle_partners(&mut refs, &mut qrys, true);
        assert!(!refs["A"].contains_key("q"));
        assert!(refs["A"].contains_key("p"));
        assert!(refs["A"].contains_key("r"));
        assert!(!qrys["q"].contains_key("A"));
        assert!(qrys["q"].contains_key("B"));
    }

    #[test]
    fn winning_middle_partner_purges_rivals() {
        let mut refs = table(vec![
            (
                "A",
                vec![
                    ("p", entry(0, 20000, 1)),
                    ("q", entry(30000, 90000, 1)),
                    ("r", entry(100000, 110000, 1)),
                ],
            ),
            ("B", vec![("q", entry(0, 10000, 1))]),
        ]);
        let mut qrys = table(vec![(
            "q",
            vec![("A", entry(30000, 90000, 1)), ("B", entry(0, 10000, 1))],
        )]);
        resolve_middle_partners(&mut refs, &mut qrys, true);
        assert!(refs["A"].contains_key("q"));
        assert!(!refs.contains_key("B"));
        assert!(!qrys["q"].contains_key("B"));
    }

    #[test]
    fn not_noref_skips_qry_side_sweep() {
        let mut refs = table(vec![(
            "A",
            vec![("p", entry(0, 10000, 1)), ("q", entry(20000, 20000, 1))],
        )]);
        let mut qrys = table(vec![(
            "q",
            vec![("A", entry(20000, 20000, 1)), ("C", entry(0, 50000, 1))],
        )]);
        resolve_middle_partners(&mut refs, &mut qrys, false);
        // ref->qry sweep still runs: q loses to C on length.
        assert!(!refs["A"].contains_key("q"));
    }
}
