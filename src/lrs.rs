//! Longest Run Subsequence solver (spec §4.4).
//!
//! Given a sequence of per-window partner labels, finds the maximum-length
//! subsequence in which every distinct label occurs in a single contiguous
//! block. Implemented as the concat-rule / nested-rule divide-and-conquer
//! reduction described in `original_source/syri/scripts/chroder.py`'s
//! embedded `lrs` fallback, wrapping a bitset DP base case, transliterated
//! into an explicit index-tagged recursion (spec REDESIGN FLAGS: "convert
//! recursive reductions to explicit work-stack iteration" — here achieved by
//! always tagging sub-slices with their absolute offset into the top-level
//! run array, so no separate un-recursion pass is needed to recover
//! positions).
//!
//! Simplification versus the original: where the source threads through
//! every tied-optimal subsequence (a list of alternatives at each level, via
//! `itertools.product`), this solver keeps only one witness per optimum. The
//! maximized size is identical; spec §4.4 only requires "the selected
//! indices" of *a* longest run subsequence, not the full solution set.

use rustc_hash::FxHashMap;
use std::collections::{HashMap, HashSet};

use crate::error::LrsInternalError;

#[derive(Debug, Clone)]
struct RunSeg {
    symbol: String,
    win_count: usize,
    /// First position in the original per-window symbol sequence this run covers.
    orig_start: usize,
}

struct Solution {
    size: u64,
    /// Absolute indices into the top-level run array (not window positions).
    selected: Vec<usize>,
}

fn build_runs(symbols: &[String]) -> Vec<RunSeg> {
    let mut runs = Vec::new();
    if symbols.is_empty() {
        return runs;
    }
    let mut cur_symbol = symbols[0].clone();
    let mut cur_start = 0usize;
    let mut count = 1usize;
    for (i, s) in symbols.iter().enumerate().skip(1) {
        if *s == cur_symbol {
            count += 1;
        } else {
            runs.push(RunSeg {
                symbol: std::mem::replace(&mut cur_symbol, s.clone()),
                win_count: count,
                orig_start: cur_start,
            });
            cur_start = i;
            count = 1;
        }
    }
    runs.push(RunSeg {
        symbol: cur_symbol,
        win_count: count,
        orig_start: cur_start,
    });
    runs
}

fn first_last_occurrences(runs: &[RunSeg]) -> (HashMap<&str, usize>, HashMap<&str, usize>) {
    let mut first = HashMap::new();
    let mut last = HashMap::new();
    for (i, r) in runs.iter().enumerate() {
        first.entry(r.symbol.as_str()).or_insert(i);
        last.insert(r.symbol.as_str(), i);
    }
    (first, last)
}

/// DP base case (spec §4.4): bitset-indexed longest run subsequence over a
/// flat run sequence with no further reduction applied.
fn solve_dp(runs: &[RunSeg], lo: usize) -> Result<Solution, LrsInternalError> {
    let n = runs.len();
    if n == 0 {
        return Ok(Solution {
            size: 0,
            selected: Vec::new(),
        });
    }

    let mut sigma: Vec<&str> = runs.iter().map(|r| r.symbol.as_str()).collect();
    sigma.sort_unstable();
    sigma.dedup();
    let k = sigma.len();
    if k > 63 {
        return Err(LrsInternalError::NoSolution);
    }
    let char_idx: HashMap<&str, usize> = sigma.iter().enumerate().map(|(i, s)| (*s, i)).collect();

    // pred[col][c] = largest position <= col-1 (1-based) whose symbol index
    // is c, or 0 (meaning "none", which always resolves to the D[0] anchor).
    let mut pred: Vec<Vec<usize>> = vec![vec![0usize; k]; n + 1];
    let mut last_seen = vec![0usize; k];
    for col in 1..=n {
        pred[col] = last_seen.clone();
        let s_idx = char_idx[runs[col - 1].symbol.as_str()];
        last_seen[s_idx] = col;
    }

    let mut d: Vec<FxHashMap<u64, u64>> = vec![FxHashMap::default(); n + 1];
    let mut b: Vec<FxHashMap<u64, (usize, u64)>> = vec![FxHashMap::default(); n + 1];
    d[0].insert(0, 0);

    let mut max_col = 0usize;
    let mut max_mask = 0u64;
    let mut max_val = 0u64;

    for col in 1..=n {
        let len = runs[col - 1].win_count as u64;
        let s_idx = char_idx[runs[col - 1].symbol.as_str()];

        for c_idx in 0..k {
            let pr = pred[col][c_idx];
            if c_idx == s_idx && pr > 0 {
                let entries: Vec<(u64, u64)> = d[pr].iter().map(|(&a, &v)| (a, v)).collect();
                for (mask, val) in entries {
                    let candidate = val + len;
                    let better = d[col].get(&mask).map_or(true, |&v| candidate > v);
                    if better {
                        d[col].insert(mask, candidate);
                        b[col].insert(mask, (pr, mask));
                    }
                }
            } else {
                let entries: Vec<(u64, u64)> = d[pr].iter().map(|(&a, &v)| (a, v)).collect();
                for (mask, val) in entries {
                    if mask & (1 << s_idx) == 0 {
                        let new_mask = mask | (1 << s_idx);
                        let candidate = val + len;
                        let better = d[col].get(&new_mask).map_or(true, |&v| candidate > v);
                        if better {
                            d[col].insert(new_mask, candidate);
                            b[col].insert(new_mask, (pr, mask));
                        }
                    }
                }
            }
        }

        let mut masks: Vec<u64> = d[col].keys().copied().collect();
        masks.sort_unstable();
        for mask in masks {
            let val = d[col][&mask];
            if val > max_val {
                max_val = val;
                max_col = col;
                max_mask = mask;
            }
        }
    }

    let mut selected_local = Vec::new();
    let mut col = max_col;
    let mut mask = max_mask;
    while col > 0 {
        selected_local.push(col - 1);
        let (prev_col, prev_mask) = b[col][&mask];
        col = prev_col;
        mask = prev_mask;
    }
    selected_local.reverse();

    Ok(Solution {
        size: max_val,
        selected: selected_local.into_iter().map(|i| lo + i).collect(),
    })
}

/// Concat rule (spec §4.4): partition into maximal secluded intervals, solve
/// each with the nested rule, concatenate.
fn reduce_concat(runs: &[RunSeg], lo: usize) -> Result<Solution, LrsInternalError> {
    let n = runs.len();
    if n == 0 {
        return Ok(Solution {
            size: 0,
            selected: Vec::new(),
        });
    }
    let (_, last_occ) = first_last_occurrences(runs);

    let mut solutions = Vec::new();
    let mut pos;
    let mut current_end = 0usize;
    while current_end < n {
        let current_start = current_end;
        current_end = last_occ[runs[current_start].symbol.as_str()] + 1;
        pos = current_start + 1;
        while pos < current_end {
            current_end = current_end.max(last_occ[runs[pos].symbol.as_str()] + 1);
            pos += 1;
        }
        let sub = reduce_nested(&runs[current_start..current_end], lo + current_start)?;
        solutions.push(sub);
    }

    let size = solutions.iter().map(|s| s.size).sum();
    let mut selected: Vec<usize> = solutions.into_iter().flat_map(|s| s.selected).collect();
    selected.sort_unstable();
    Ok(Solution { size, selected })
}

enum Origin {
    Direct(usize),
    Placeholder(usize),
}

/// Nested rule (spec §4.4): find symbol-closed sub-intervals, solve each
/// independently via the concat rule, compress them into placeholders, solve
/// the remainder with the DP, then splice the sub-solutions back in.
fn reduce_nested(runs: &[RunSeg], lo: usize) -> Result<Solution, LrsInternalError> {
    let n = runs.len();
    if n == 0 {
        return Ok(Solution {
            size: 0,
            selected: Vec::new(),
        });
    }
    let (first_occ, last_occ) = first_last_occurrences(runs);

    let mut sigma: Vec<&str> = first_occ.keys().copied().collect();
    sigma.sort_by_key(|c| std::cmp::Reverse(last_occ[c] as isize - first_occ[c] as isize));

    let mut checked: HashSet<&str> = HashSet::new();
    let mut independent: Vec<(usize, usize)> = Vec::new();

    for &symbol in &sigma {
        if checked.contains(symbol) {
            continue;
        }
        let mut left_bound = first_occ[symbol] as isize;
        let mut right_bound = last_occ[symbol] as isize + 1;
        let mut chars_in_interval: HashSet<&str> = HashSet::new();
        chars_in_interval.insert(symbol);

        let mut left = left_bound - 1;
        let mut right = left_bound + 1;

        while left > left_bound || right < right_bound - 1 {
            if right < right_bound - 1 {
                let c = runs[right as usize].symbol.as_str();
                chars_in_interval.insert(c);
                left_bound = left_bound.min(first_occ[c] as isize);
                right_bound = right_bound.max(last_occ[c] as isize + 1);
                right += 1;
            } else {
                let c = runs[left as usize].symbol.as_str();
                chars_in_interval.insert(c);
                left_bound = left_bound.min(first_occ[c] as isize);
                right_bound = right_bound.max(last_occ[c] as isize + 1);
                left -= 1;
            }
        }

        if left_bound > 0 || (right_bound as usize) < n {
            independent.push((left_bound as usize, right_bound as usize));
            checked.extend(chars_in_interval);
        }
    }

    if independent.is_empty() {
        return solve_dp(runs, lo);
    }
    independent.sort_by_key(|iv| iv.0);

    let mut intervals: Vec<(usize, usize)> = Vec::new();
    let mut partial_solutions: Vec<Solution> = Vec::new();
    let mut left = independent[0].0;
    let mut right = independent[0].0;
    for &(s, e) in &independent {
        if s == right {
            right = e;
        } else {
            if right - left >= 2 {
                intervals.push((left, right));
                partial_solutions.push(reduce_concat(&runs[left..right], lo + left)?);
            }
            left = s;
            right = e;
        }
    }
    if right - left >= 2 {
        intervals.push((left, right));
        partial_solutions.push(reduce_concat(&runs[left..right], lo + left)?);
    }

    if intervals.is_empty() {
        return solve_dp(runs, lo);
    }

    let mut compressed: Vec<RunSeg> = Vec::new();
    let mut origin: Vec<Origin> = Vec::new();
    let mut pos = 0usize;
    for (i, &(s, e)) in intervals.iter().enumerate() {
        for j in pos..s {
            compressed.push(runs[j].clone());
            origin.push(Origin::Direct(lo + j));
        }
        compressed.push(RunSeg {
            symbol: format!("$placeholder{}", i),
            win_count: partial_solutions[i].size as usize,
            orig_start: 0,
        });
        origin.push(Origin::Placeholder(i));
        pos = e;
    }
    for j in pos..n {
        compressed.push(runs[j].clone());
        origin.push(Origin::Direct(lo + j));
    }

    let sol = solve_dp(&compressed, 0)?;
    let mut selected: Vec<usize> = Vec::new();
    for idx in sol.selected {
        match origin[idx] {
            Origin::Direct(abs) => selected.push(abs),
            Origin::Placeholder(pi) => selected.extend(partial_solutions[pi].selected.iter()),
        }
    }
    selected.sort_unstable();
    Ok(Solution {
        size: sol.size,
        selected,
    })
}

/// Solve the LRS problem for one contig's denoised window-label sequence,
/// returning the selected positions (indices into `symbols`) in ascending
/// order.
pub fn solve(symbols: &[String]) -> Result<Vec<usize>, LrsInternalError> {
    let runs = build_runs(symbols);
    if runs.is_empty() {
        return Ok(Vec::new());
    }
    let sol = reduce_concat(&runs, 0)?;

    let mut positions = Vec::new();
    for run_idx in sol.selected {
        let run = &runs[run_idx];
        for k in 0..run.win_count {
            positions.push(run.orig_start + k);
        }
    }
    positions.sort_unstable();
    Ok(positions)
}

/// Verify that the positions selected out of `symbols` form contiguous
/// blocks per distinct symbol (spec §8 invariant).
pub fn is_valid_run_subsequence(symbols: &[String], selected: &[usize]) -> bool {
    let mut seen_closed: HashSet<&str> = HashSet::new();
    let mut current: Option<&str> = None;
    for &idx in selected {
        let symbol = symbols[idx].as_str();
        match current {
            Some(c) if c == symbol => {}
            _ => {
                if let Some(c) = current {
                    seen_closed.insert(c);
                }
                if seen_closed.contains(symbol) {
                    return false;
                }
                current = Some(symbol);
            }
        }
    }
    true
}
