//! Fixed constants and run-level configuration for the reconciliation pipeline.

/// Width of a window, in bases, used by the window binner (§4.1).
pub const WINDOW_SIZE: u64 = 10_000;

/// Number of consecutive windows examined by the sliding-window denoise filter.
pub const SLIDING_WINDOW_SIZE: usize = 5;

/// Minimum number of matches within a sliding window for a partner to survive denoising.
pub const SLIDING_WINDOW_THRESHOLD: usize = 3;

/// Contigs with more windows than this are subject to sliding-window denoising;
/// smaller contigs keep every unique partner they were assigned.
pub const DENOISE_WINDOW_THRESHOLD: usize = 50;

/// Below this many connected components, running them through `rayon` is
/// pure overhead; `scaffold::run` falls back to a plain sequential iterator.
pub const PARALLEL_COMPONENT_THRESHOLD: usize = 8;

/// Options that vary per invocation of the reconciliation pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    /// Treat neither assembly as chromosome-scale: symmetric conflict
    /// resolution and sequential pseudochromosome ids.
    pub noref: bool,
    /// Count of N bases a downstream writer inserts between concatenated
    /// contigs. Not consumed by the core; carried through so collaborators
    /// don't need a second configuration channel.
    pub ncount: usize,
}

impl RunConfig {
    pub fn new(noref: bool, ncount: usize) -> Self {
        Self { noref, ncount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_chromosome_scale() {
        let cfg = RunConfig::default();
        assert!(!cfg.noref);
        assert_eq!(cfg.ncount, 0);
    }
}
