//! Bipartite Adjacency Graph & Path Enumerator (spec §4.7).
//!
//! Builds one locus graph per connected component, enumerates linear paths
//! by alternating self-edge traversal on both sides with backtracking at
//! branch points, filters circular/duplicate/repeat-visiting paths, picks
//! the best-scoring surviving path, and assigns per-contig orientations.
//!
//! Transliterated closely from `original_source/syri/scripts/chroder.py`'s
//! `scaf()` (the locus dict construction and the `while True` path-walker),
//! replacing its `"-"` string sentinel for "no self-neighbor" with
//! `Option<usize>`, and its `rdir`/`qdir` ∈ {1, -1, "unknown"} with
//! `Option<i8>` (`None` standing in for the source's `0`).

use std::collections::{HashSet, VecDeque};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::align::Side;
use crate::error::GraphWarning;
use crate::genome::ContigLengths;
use crate::mapping::MappingTable;

/// An endpoint between two consecutive partner mappings on one contig.
#[derive(Debug, Clone)]
pub struct Locus {
    pub contig: String,
    pub side: Side,
    pub position: usize,
    pub up_self: Option<usize>,
    pub down_self: Option<usize>,
    pub align_nbrs: SmallVec<[usize; 2]>,
}

impl Locus {
    fn is_end(&self) -> bool {
        self.up_self.is_none() || self.down_self.is_none()
    }
}

/// A connected group of ref/qry contigs discovered by alternating
/// ref<->qry reciprocal-mapping expansion.
#[derive(Debug, Clone)]
pub struct Component {
    pub ref_contigs: Vec<String>,
    pub qry_contigs: Vec<String>,
}

/// Find connected components by BFS over reciprocal mappings, alternating
/// ref/qry expansion (spec §4.7 "Component discovery").
pub fn discover_components(ref_mappings: &MappingTable, qry_mappings: &MappingTable) -> Vec<Component> {
    let mut r_visited: HashSet<String> = HashSet::new();
    let mut q_visited: HashSet<String> = HashSet::new();
    let mut components = Vec::new();

    let mut rids: Vec<&String> = ref_mappings.keys().collect();
    rids.sort();

    for rid in rids {
        if r_visited.contains(rid) {
            continue;
        }
        r_visited.insert(rid.clone());
        let mut rgroup = vec![rid.clone()];
        let mut qgroup: Vec<String> = Vec::new();

        let mut rtogo: VecDeque<String> = VecDeque::new();
        let mut qtogo: VecDeque<String> = {
            let mut v: Vec<String> = ref_mappings[rid].keys().cloned().collect();
            v.sort();
            v.into()
        };

        while !rtogo.is_empty() || !qtogo.is_empty() {
            let batch: Vec<String> = rtogo.drain(..).collect();
            for r in batch {
                if r_visited.insert(r.clone()) {
                    rgroup.push(r.clone());
                    if let Some(m) = ref_mappings.get(&r) {
                        let mut ks: Vec<String> = m.keys().cloned().collect();
                        ks.sort();
                        qtogo.extend(ks);
                    }
                }
            }
            let batch: Vec<String> = qtogo.drain(..).collect();
            for q in batch {
                if q_visited.insert(q.clone()) {
                    qgroup.push(q.clone());
                    if let Some(m) = qry_mappings.get(&q) {
                        let mut ks: Vec<String> = m.keys().cloned().collect();
                        ks.sort();
                        rtogo.extend(ks);
                    }
                }
            }
        }
        components.push(Component {
            ref_contigs: rgroup,
            qry_contigs: qgroup,
        });
    }
    components
}

struct LocusGraph {
    loci: Vec<Locus>,
}

fn build_locus_graph(component: &Component, ref_mappings: &MappingTable, qry_mappings: &MappingTable) -> LocusGraph {
    let mut loci: Vec<Locus> = Vec::new();
    let mut ref_head: FxHashMap<String, usize> = FxHashMap::default();
    let mut ref_order: FxHashMap<String, Vec<String>> = FxHashMap::default();
    let mut qry_head: FxHashMap<String, usize> = FxHashMap::default();
    let mut qry_order: FxHashMap<String, Vec<String>> = FxHashMap::default();

    for rid in &component.ref_contigs {
        let entries = &ref_mappings[rid];
        let mut ordered: Vec<String> = entries.keys().cloned().collect();
        ordered.sort_by_key(|p| entries[p].start);
        ref_head.insert(rid.clone(), loci.len());
        for pos in 0..=ordered.len() {
            loci.push(Locus {
                contig: rid.clone(),
                side: Side::Ref,
                position: pos,
                up_self: None,
                down_self: None,
                align_nbrs: SmallVec::new(),
            });
        }
        ref_order.insert(rid.clone(), ordered);
    }

    for qid in &component.qry_contigs {
        let entries = &qry_mappings[qid];
        let mut ordered: Vec<String> = entries.keys().cloned().collect();
        ordered.sort_by_key(|p| entries[p].start);
        qry_head.insert(qid.clone(), loci.len());
        for pos in 0..=ordered.len() {
            loci.push(Locus {
                contig: qid.clone(),
                side: Side::Qry,
                position: pos,
                up_self: None,
                down_self: None,
                align_nbrs: SmallVec::new(),
            });
        }
        qry_order.insert(qid.clone(), ordered);
    }

    let n = loci.len();
    for idx in 0..n {
        if idx > 0 && loci[idx - 1].contig == loci[idx].contig && loci[idx - 1].position + 1 == loci[idx].position {
            loci[idx].up_self = Some(idx - 1);
        }
        if idx + 1 < n && loci[idx + 1].contig == loci[idx].contig && loci[idx].position + 1 == loci[idx + 1].position
        {
            loci[idx].down_self = Some(idx + 1);
        }
    }

    for rid in &component.ref_contigs {
        let mut rh = ref_head[rid];
        for qid in &ref_order[rid] {
            let qh = qry_head[qid] + qry_order[qid].iter().position(|x| x == rid).unwrap();
            let dir = ref_mappings[rid][qid].direction;
            if dir == 1 {
                loci[rh].align_nbrs.push(qh);
                loci[rh + 1].align_nbrs.push(qh + 1);
            } else {
                loci[rh].align_nbrs.push(qh + 1);
                loci[rh + 1].align_nbrs.push(qh);
            }
            rh = loci[rh].down_self.expect("ref head chain exhausted early");
        }
    }

    for qid in &component.qry_contigs {
        let mut qh = qry_head[qid];
        for rid in &qry_order[qid] {
            let rh = ref_head[rid] + ref_order[rid].iter().position(|x| x == qid).unwrap();
            let dir = qry_mappings[qid][rid].direction;
            if dir == 1 {
                loci[qh].align_nbrs.push(rh);
                loci[qh + 1].align_nbrs.push(rh + 1);
            } else {
                loci[qh].align_nbrs.push(rh + 1);
                loci[qh + 1].align_nbrs.push(rh);
            }
            qh = loci[qh].down_self.expect("qry head chain exhausted early");
        }
    }

    LocusGraph { loci }
}

fn find_endpoints(loci: &[Locus]) -> Vec<(usize, usize)> {
    let mut endlist: Vec<(usize, usize)> = Vec::new();
    for (k, locus) in loci.iter().enumerate() {
        if !locus.is_end() {
            continue;
        }
        let Some(&nbr) = locus.align_nbrs.first() else {
            continue;
        };
        if !loci[nbr].is_end() {
            continue;
        }
        match locus.side {
            Side::Ref => endlist.push((k, nbr)),
            Side::Qry => endlist.push((nbr, k)),
        }
    }
    endlist.sort_unstable();
    endlist.dedup();
    endlist
}

fn other_align_nbr(loci: &[Locus], node: usize, exclude: usize) -> Option<usize> {
    loci[node].align_nbrs.iter().copied().find(|&x| x != exclude)
}

fn move_self(loci: &[Locus], node: usize, dir: i8) -> Option<usize> {
    if dir == 1 {
        loci[node].down_self
    } else {
        loci[node].up_self
    }
}

fn resync_self(loci: &[Locus], node: usize, target_nbrs: &[usize]) -> Option<usize> {
    [loci[node].up_self, loci[node].down_self]
        .into_iter()
        .flatten()
        .find(|cand| target_nbrs.contains(cand))
}

fn start_dir(locus: &Locus) -> Option<i8> {
    Some(if locus.up_self.is_none() { 1 } else { -1 })
}

#[derive(Debug, Clone)]
struct Path {
    rout: Vec<usize>,
    qout: Vec<usize>,
}

/// Walk every candidate endpoint, alternating self-edge traversal on both
/// sides with branch backtracking (spec §4.7 "Path enumeration"). A
/// traversal error aborts the whole component: `None` means the caller
/// should drop it and log nothing further.
fn enumerate_paths(loci: &[Locus], endpoints: &[(usize, usize)]) -> Option<Vec<Path>> {
    let mut paths = Vec::new();

    for &(r0, q0) in endpoints {
        let mut ends = [r0, q0];
        let mut rdir = start_dir(&loci[ends[0]]);
        let mut qdir = start_dir(&loci[ends[1]]);

        let mut rout = vec![ends[0]];
        let mut qout = vec![ends[1]];

        let mut rout_stack: Vec<Vec<usize>> = Vec::new();
        let mut qout_stack: Vec<Vec<usize>> = Vec::new();
        let mut rdir_stack: Vec<Option<i8>> = Vec::new();
        let mut endtogo: Vec<(usize, usize)> = Vec::new();

        loop {
            if let Some(d) = rdir {
                match move_self(loci, ends[0], d) {
                    Some(n) => ends[0] = n,
                    None => {
                        eprintln!(
                            "{}",
                            GraphWarning::TraversalError {
                                from: ends[0],
                                to: ends[1]
                            }
                        );
                        return None;
                    }
                }
            }
            if let Some(d) = qdir {
                match move_self(loci, ends[1], d) {
                    Some(n) => ends[1] = n,
                    None => {
                        eprintln!(
                            "{}",
                            GraphWarning::TraversalError {
                                from: ends[0],
                                to: ends[1]
                            }
                        );
                        return None;
                    }
                }
            }
            if rdir.is_none() {
                match resync_self(loci, ends[0], &loci[ends[1]].align_nbrs) {
                    Some(n) => ends[0] = n,
                    None => {
                        eprintln!(
                            "{}",
                            GraphWarning::TraversalError {
                                from: ends[0],
                                to: ends[1]
                            }
                        );
                        return None;
                    }
                }
            }
            if qdir.is_none() {
                match resync_self(loci, ends[1], &loci[ends[0]].align_nbrs) {
                    Some(n) => ends[1] = n,
                    None => {
                        eprintln!(
                            "{}",
                            GraphWarning::TraversalError {
                                from: ends[0],
                                to: ends[1]
                            }
                        );
                        return None;
                    }
                }
            }

            rout.push(ends[0]);
            qout.push(ends[1]);

            if !loci[ends[0]].align_nbrs.contains(&ends[1]) || !loci[ends[1]].align_nbrs.contains(&ends[0]) {
                eprintln!(
                    "{}",
                    GraphWarning::TraversalError {
                        from: ends[0],
                        to: ends[1]
                    }
                );
                return None;
            }

            let r_deg = loci[ends[0]].align_nbrs.len();
            let q_deg = loci[ends[1]].align_nbrs.len();

            if r_deg > 1 && q_deg > 1 {
                rout_stack.push(rout.clone());
                qout_stack.push(qout.clone());
                let Some(alt) = other_align_nbr(loci, ends[0], ends[1]) else {
                    return None;
                };
                endtogo.push((ends[0], alt));
                rdir_stack.push(rdir);

                let Some(next_r) = other_align_nbr(loci, ends[1], ends[0]) else {
                    return None;
                };
                ends[0] = next_r;
                rout.push(ends[0]);
                rdir = if loci[ends[0]].align_nbrs.len() == 1 {
                    start_dir(&loci[ends[0]])
                } else {
                    None
                };
                continue;
            }

            if r_deg == 1 && q_deg == 1 {
                paths.push(Path {
                    rout: rout.clone(),
                    qout: qout.clone(),
                });
                if let (Some(e), Some(pr), Some(pq), Some(prd)) =
                    (endtogo.pop(), rout_stack.pop(), qout_stack.pop(), rdir_stack.pop())
                {
                    ends = [e.0, e.1];
                    rout = pr;
                    qout = pq;
                    qout.push(ends[1]);
                    rdir = prd;
                    qdir = if loci[ends[1]].align_nbrs.len() == 1 {
                        start_dir(&loci[ends[1]])
                    } else {
                        None
                    };
                    continue;
                } else {
                    break;
                }
            }

            if loci[ends[0]].is_end() {
                let Some(next_r) = other_align_nbr(loci, ends[1], ends[0]) else {
                    return None;
                };
                ends[0] = next_r;
                rout.push(ends[0]);
                rdir = if loci[ends[0]].align_nbrs.len() == 1 {
                    start_dir(&loci[ends[0]])
                } else {
                    None
                };
                continue;
            }

            if loci[ends[1]].is_end() {
                let Some(next_q) = other_align_nbr(loci, ends[0], ends[1]) else {
                    return None;
                };
                ends[1] = next_q;
                qout.push(ends[1]);
                qdir = if loci[ends[1]].align_nbrs.len() == 1 {
                    start_dir(&loci[ends[1]])
                } else {
                    None
                };
                continue;
            }
        }
    }

    Some(paths)
}

fn has_repeat(path: &[usize]) -> bool {
    let mut seen = HashSet::with_capacity(path.len());
    path.iter().any(|x| !seen.insert(*x))
}

fn dedup_reverse_equivalent(paths: Vec<Path>) -> Vec<Path> {
    let mut kept: Vec<Path> = Vec::new();
    for p in paths {
        let is_dup = kept.iter().any(|u| u.rout.iter().rev().eq(p.rout.iter()))
            || kept.iter().any(|u| u.qout.iter().rev().eq(p.qout.iter()));
        if !is_dup {
            kept.push(p);
        }
    }
    kept
}

fn unique_contigs_in_order(loci: &[Locus], path: &[usize]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for &idx in path {
        let c = &loci[idx].contig;
        if seen.insert(c.clone()) {
            result.push(c.clone());
        }
    }
    result
}

fn score_path(loci: &[Locus], path: &Path, ref_lengths: &ContigLengths, qry_lengths: &ContigLengths) -> f64 {
    let rids = unique_contigs_in_order(loci, &path.rout);
    let qids = unique_contigs_in_order(loci, &path.qout);
    let rsum: u64 = rids.iter().filter_map(|c| ref_lengths.get(c)).sum();
    let qsum: u64 = qids.iter().filter_map(|c| qry_lengths.get(c)).sum();
    (rsum as f64 + qsum as f64) / 2.0
}

fn assign_orientations(loci: &[Locus], path: &[usize]) -> FxHashMap<String, i8> {
    let mut dirs: FxHashMap<String, i8> = FxHashMap::default();
    let mut last: Option<String> = None;
    for &i in path {
        let contig = loci[i].contig.clone();
        if dirs.contains_key(&contig) {
            continue;
        }
        if loci[i].align_nbrs.len() == 2 {
            last = Some(contig);
            continue;
        }
        if loci[i].up_self.is_none() {
            dirs.insert(contig, if last.is_some() { -1 } else { 1 });
            last = None;
        } else if loci[i].down_self.is_none() {
            dirs.insert(contig, if last.is_some() { 1 } else { -1 });
            last = None;
        }
    }
    dirs
}

/// The winning path through one component: ordered contigs and orientations
/// on both sides, plus the component's anchor ref contig (used for plan IDs
/// when not running in `noref` mode).
pub struct ComponentResult {
    pub anchor_ref_contig: String,
    pub ref_contigs: Vec<String>,
    pub ref_orientations: Vec<i8>,
    pub qry_contigs: Vec<String>,
    pub qry_orientations: Vec<i8>,
}

/// Process one connected component end to end: build its locus graph, find
/// endpoints (logging and skipping if circular), enumerate and filter
/// paths, pick the best-scoring survivor, and assign orientations.
pub fn process_component(
    component: &Component,
    ref_mappings: &MappingTable,
    qry_mappings: &MappingTable,
    ref_lengths: &ContigLengths,
    qry_lengths: &ContigLengths,
) -> Option<ComponentResult> {
    let graph = build_locus_graph(component, ref_mappings, qry_mappings);
    let endpoints = find_endpoints(&graph.loci);

    if endpoints.is_empty() {
        eprintln!("{}", GraphWarning::CircularComponent);
        return None;
    }

    let Some(paths) = enumerate_paths(&graph.loci, &endpoints) else {
        eprintln!(
            "{}",
            GraphWarning::TraversalError {
                from: endpoints[0].0,
                to: endpoints[0].1
            }
        );
        return None;
    };

    if paths.iter().any(|p| has_repeat(&p.rout)) {
        eprintln!(
            "{}",
            GraphWarning::NonUniquePath {
                locus: endpoints[0].0
            }
        );
        return None;
    }
    if paths.is_empty() {
        eprintln!(
            "could not assemble component anchored at {}",
            component.ref_contigs[0]
        );
        return None;
    }

    let unique_paths = dedup_reverse_equivalent(paths);

    let mut best: Option<(f64, &Path)> = None;
    for p in &unique_paths {
        let score = score_path(&graph.loci, p, ref_lengths, qry_lengths);
        match best {
            None => best = Some((score, p)),
            Some((best_score, _)) if score > best_score => best = Some((score, p)),
            _ => {}
        }
    }
    let (_, best_path) = best?;

    let ref_contigs = unique_contigs_in_order(&graph.loci, &best_path.rout);
    let qry_contigs = unique_contigs_in_order(&graph.loci, &best_path.qout);
    let rdirs = assign_orientations(&graph.loci, &best_path.rout);
    let qdirs = assign_orientations(&graph.loci, &best_path.qout);

    let ref_orientations = ref_contigs.iter().map(|c| *rdirs.get(c).unwrap_or(&1)).collect();
    let qry_orientations = qry_contigs.iter().map(|c| *qdirs.get(c).unwrap_or(&1)).collect();

    Some(ComponentResult {
        anchor_ref_contig: component.ref_contigs[0].clone(),
        ref_contigs,
        ref_orientations,
        qry_contigs,
        qry_orientations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingEntry;

    fn entry(start: u64, end: u64, dir: i8) -> MappingEntry {
        MappingEntry {
            start,
            end,
            length: end - start + 10_000,
            direction: dir,
        }
    }

    fn table(pairs: Vec<(&str, Vec<(&str, MappingEntry)>)>) -> MappingTable {
        pairs
            .into_iter()
            .map(|(id, partners)| {
                (
                    id.to_string(),
                    partners.into_iter().map(|(p, e)| (p.to_string(), e)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn one_to_one_component_is_single_contig_both_orientations_forward() {
        let refs = table(vec![("A", vec![("a", entry(0, 30000, 1))])]);
        let qrys = table(vec![("a", vec![("A", entry(0, 30000, 1))])]);
        let components = discover_components(&refs, &qrys);
        assert_eq!(components.len(), 1);

        let ref_lengths = ContigLengths::from_pairs(vec![("A".to_string(), 30000)]);
        let qry_lengths = ContigLengths::from_pairs(vec![("a".to_string(), 30000)]);
        let result = process_component(&components[0], &refs, &qrys, &ref_lengths, &qry_lengths).unwrap();

        assert_eq!(result.ref_contigs, vec!["A"]);
        assert_eq!(result.ref_orientations, vec![1]);
        assert_eq!(result.qry_contigs, vec!["a"]);
        assert_eq!(result.qry_orientations, vec![1]);
    }

    #[test]
    fn inversion_flips_qry_orientation() {
        let refs = table(vec![("A", vec![("a", entry(0, 50000, -1))])]);
        let qrys = table(vec![("a", vec![("A", entry(0, 50000, -1))])]);
        let components = discover_components(&refs, &qrys);
        let ref_lengths = ContigLengths::from_pairs(vec![("A".to_string(), 50000)]);
        let qry_lengths = ContigLengths::from_pairs(vec![("a".to_string(), 50000)]);
        let result = process_component(&components[0], &refs, &qrys, &ref_lengths, &qry_lengths).unwrap();

        assert_eq!(result.ref_orientations, vec![1]);
        assert_eq!(result.qry_orientations, vec![-1]);
    }

    #[test]
    fn two_ref_one_qry_orders_both_ref_contigs() {
        // Ref A:[0,50k] <-> a:[0,50k] +1 ; Ref B:[0,40k] <-> a:[50k,90k] +1
        let refs = table(vec![
            ("A", vec![("a", entry(0, 50000, 1))]),
            ("B", vec![("a", entry(0, 40000, 1))]),
        ]);
        let qrys = table(vec![(
            "a",
            vec![("A", entry(0, 50000, 1)), ("B", entry(50000, 90000, 1))],
        )]);
        let components = discover_components(&refs, &qrys);
        assert_eq!(components.len(), 1);

        let ref_lengths = ContigLengths::from_pairs(vec![("A".to_string(), 50000), ("B".to_string(), 40000)]);
        let qry_lengths = ContigLengths::from_pairs(vec![("a".to_string(), 90000)]);
        let result = process_component(&components[0], &refs, &qrys, &ref_lengths, &qry_lengths).unwrap();

        assert_eq!(result.ref_contigs, vec!["A", "B"]);
        assert_eq!(result.ref_orientations, vec![1, 1]);
        assert_eq!(result.qry_contigs, vec!["a"]);
    }

    #[test]
    fn two_distinct_partners_still_assembles() {
        let refs = table(vec![("A", vec![("a", entry(0, 10000, 1)), ("a2", entry(10000, 20000, 1))])]);
        let qrys = table(vec![
            ("a", vec![("A", entry(0, 10000, 1))]),
            ("a2", vec![("A", entry(10000, 20000, 1))]),
        ]);
        let components = discover_components(&refs, &qrys);
        let ref_lengths = ContigLengths::from_pairs(vec![("A".to_string(), 20000)]);
        let qry_lengths = ContigLengths::from_pairs(vec![("a".to_string(), 10000), ("a2".to_string(), 10000)]);
        let result = process_component(&components[0], &refs, &qrys, &ref_lengths, &qry_lengths);
        assert!(result.is_some());
    }

    #[test]
    fn no_self_chain_gaps_yields_no_endpoints() {
        // A closed ring where every locus has both self-neighbors: no locus
        // is ever a self-chain end, so no endpoint pair can form.
        let loci = vec![
            Locus {
                contig: "r".into(),
                side: Side::Ref,
                position: 0,
                up_self: Some(1),
                down_self: Some(1),
                align_nbrs: SmallVec::from_slice(&[2]),
            },
            Locus {
                contig: "r".into(),
                side: Side::Ref,
                position: 1,
                up_self: Some(0),
                down_self: Some(0),
                align_nbrs: SmallVec::from_slice(&[3]),
            },
            Locus {
                contig: "q".into(),
                side: Side::Qry,
                position: 0,
                up_self: Some(3),
                down_self: Some(3),
                align_nbrs: SmallVec::from_slice(&[0]),
            },
            Locus {
                contig: "q".into(),
                side: Side::Qry,
                position: 1,
                up_self: Some(2),
                down_self: Some(2),
                align_nbrs: SmallVec::from_slice(&[1]),
            },
        ];
        assert!(find_endpoints(&loci).is_empty());
    }

    #[test]
    fn dedup_drops_reverse_equivalent_paths() {
        let forward = Path { rout: vec![0, 1, 2], qout: vec![3, 4] };
        let reverse = Path { rout: vec![2, 1, 0], qout: vec![5, 6] };
        let distinct = Path { rout: vec![7, 8], qout: vec![9, 10] };
        let kept = dedup_reverse_equivalent(vec![forward, reverse, distinct]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn score_path_is_symmetric_under_reversal() {
        let loci = vec![
            Locus { contig: "A".into(), side: Side::Ref, position: 0, up_self: None, down_self: None, align_nbrs: SmallVec::new() },
            Locus { contig: "B".into(), side: Side::Ref, position: 0, up_self: None, down_self: None, align_nbrs: SmallVec::new() },
        ];
        let ref_lengths = ContigLengths::from_pairs(vec![("A".to_string(), 30000), ("B".to_string(), 20000)]);
        let qry_lengths = ContigLengths::from_pairs(vec![]);

        let forward = Path { rout: vec![0, 1], qout: vec![] };
        let reverse = Path { rout: vec![1, 0], qout: vec![] };
        assert_eq!(
            score_path(&loci, &forward, &ref_lengths, &qry_lengths),
            score_path(&loci, &reverse, &ref_lengths, &qry_lengths),
        );
    }
}
