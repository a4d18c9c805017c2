//! Run Extractor (spec §4.3): denoises a contig's per-window partner
//! assignments with a sliding-window majority filter, then emits the ordered
//! label sequence the LRS solver consumes.

use rustc_hash::FxHashSet;

use crate::config::{DENOISE_WINDOW_THRESHOLD, SLIDING_WINDOW_SIZE, SLIDING_WINDOW_THRESHOLD};
use crate::error::{ChroderError, Result};

/// A maximal stretch of consecutive windows assigned the same partner.
/// `length` is in base units (a multiple of [`crate::config::WINDOW_SIZE`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub symbol: String,
    pub length: u64,
}

/// The denoised, ordered (window start, partner label) sequence for one
/// contig, ready to be fed to the LRS solver.
#[derive(Debug, Clone, Default)]
pub struct ExtractedSequence {
    pub window_starts: Vec<u64>,
    pub symbols: Vec<String>,
}

fn candidate_partners(contig: &str, windows: &[(u64, String)]) -> Result<FxHashSet<String>> {
    let kept: FxHashSet<String> = if windows.len() > DENOISE_WINDOW_THRESHOLD {
        let mut kept = FxHashSet::default();
        for start in 0..=(windows.len() - SLIDING_WINDOW_SIZE) {
            let slice = &windows[start..start + SLIDING_WINDOW_SIZE];
            let mut counts: rustc_hash::FxHashMap<&str, usize> = rustc_hash::FxHashMap::default();
            for (_, partner) in slice {
                *counts.entry(partner.as_str()).or_insert(0) += 1;
            }
            for (partner, count) in counts {
                if count >= SLIDING_WINDOW_THRESHOLD {
                    kept.insert(partner.to_string());
                }
            }
        }
        kept
    } else {
        windows.iter().map(|(_, p)| p.clone()).collect()
    };

    if kept.is_empty() {
        return Err(ChroderError::NoMatchingContig {
            contig: contig.to_string(),
        });
    }
    Ok(kept)
}

/// Filter a contig's windows down to the denoised partner set and produce
/// the ordered label sequence fed to the LRS solver.
pub fn extract_sequence(contig: &str, windows: &[(u64, String)]) -> Result<ExtractedSequence> {
    let kept = candidate_partners(contig, windows)?;
    let mut seq = ExtractedSequence::default();
    for (start, partner) in windows {
        if kept.contains(partner) {
            seq.window_starts.push(*start);
            seq.symbols.push(partner.clone());
        }
    }
    Ok(seq)
}

/// Run-length encode a symbol sequence into [`Run`]s; each run's length is
/// its window count times the window size (spec §4.4's `Run` type operates
/// on base units; since every window is the same size, maximizing total
/// window count is equivalent to maximizing total covered length).
pub fn to_runs(symbols: &[String]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut iter = symbols.iter();
    let Some(first) = iter.next() else {
        return runs;
    };
    let mut symbol = first.clone();
    let mut count = 1u64;
    for s in iter {
        if *s == symbol {
            count += 1;
        } else {
            runs.push(Run {
                symbol: std::mem::replace(&mut symbol, s.clone()),
                length: count * crate::config::WINDOW_SIZE,
            });
            count = 1;
        }
    }
    runs.push(Run {
        symbol,
        length: count * crate::config::WINDOW_SIZE,
    });
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows(pairs: &[(u64, &str)]) -> Vec<(u64, String)> {
        pairs.iter().map(|(w, p)| (*w, p.to_string())).collect()
    }

    #[test]
    fn small_contig_keeps_every_partner() {
        let w = windows(&[(0, "a"), (10000, "b")]);
        let seq = extract_sequence("C", &w).unwrap();
        assert_eq!(seq.symbols, vec!["a", "b"]);
    }

    #[test]
    fn denoises_scattered_partner_on_large_contig() {
        // 60 windows: "a" throughout, except two isolated "b" windows that
        // never cluster 3-in-5 (spec scenario 4).
        let mut pairs = Vec::new();
        for i in 0..60u64 {
            let label = if i == 52 || i == 58 { "b" } else { "a" };
            pairs.push((i * 10000, label));
        }
        let w = windows(&pairs.iter().map(|(w, p)| (*w, *p)).collect::<Vec<_>>());
        let seq = extract_sequence("C", &w).unwrap();
        assert!(seq.symbols.iter().all(|s| s == "a"));
    }

    #[test]
    fn zero_candidates_is_fatal() {
        // 51 windows, single partner appearing fewer than 3 times in any
        // window of 5 is impossible with one partner, so force a genuinely
        // empty outcome via an artificial contrived filter: a contig with
        // 51 windows whose sole partner never repeats 3x in any 5-window.
        let mut pairs = Vec::new();
        for i in 0..51u64 {
            let label = format!("p{}", i);
            pairs.push((i * 10000, label));
        }
        let w: Vec<(u64, String)> = pairs;
        let err = extract_sequence("C", &w).unwrap_err();
        assert!(matches!(err, ChroderError::NoMatchingContig { .. }));
    }

    #[test]
    fn to_runs_collapses_consecutive_symbols() {
        let symbols: Vec<String> = vec!["a", "a", "b", "a"]
            .into_iter()
            .map(String::from)
            .collect();
        let runs = to_runs(&symbols);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].symbol, "a");
        assert_eq!(runs[0].length, 20000);
        assert_eq!(runs[1].symbol, "b");
        assert_eq!(runs[1].length, 10000);
    }
}
