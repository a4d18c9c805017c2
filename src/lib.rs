//! chroder-core: chromosome-level assembly reconciliation.
//!
//! Given pairwise alignments between the contigs of a reference and a query
//! genome assembly, this crate orders and orients contigs from each side so
//! that homologous contigs line up, and emits an assembly plan — which
//! contigs, in what order, at what orientation, grouped into
//! pseudochromosomes. Parsing alignment files, reading/writing FASTA, and
//! calling variants are all out of scope; see [`commands::scaffold`] for the
//! single entry point that drives the pipeline end to end.
//!
//! # Example
//!
//! ```rust,no_run
//! use chroder_core::align::{AlignRecord, QryContigId, RefContigId};
//! use chroder_core::{commands::ScaffoldCommand, config::RunConfig};
//!
//! let records = vec![AlignRecord {
//!     ref_contig: RefContigId("A".to_string()),
//!     qry_contig: QryContigId("a".to_string()),
//!     ref_start: 0,
//!     ref_end: 30000,
//!     qry_start: 0,
//!     qry_end: 30000,
//!     ref_len: 30000,
//!     qry_len: 30000,
//!     identity: 99.5,
//!     qry_dir: 1,
//! }];
//! let plan = ScaffoldCommand::new()
//!     .with_config(RunConfig::new(false, 100))
//!     .run(&records, Default::default(), Default::default())
//!     .unwrap();
//! ```
//!
//! Parsing an on-disk alignment file into [`align::AlignRecord`]s is left to
//! the caller — see `chroder`'s own `src/ingest.rs` for the format the CLI
//! reads.

pub mod align;
pub mod commands;
pub mod config;
pub mod error;
pub mod genome;
pub mod graph;
pub mod lrs;
pub mod mapping;
pub mod orientation;
pub mod plan;
pub mod run;
pub mod window;

pub use error::{ChroderError, Result};
pub use plan::Pseudochromosome;

/// Convenient re-exports for consumers driving the full pipeline.
pub mod prelude {
    pub use crate::align::{AlignRecord, QryContigId, RefContigId};
    pub use crate::commands::ScaffoldCommand;
    pub use crate::config::RunConfig;
    pub use crate::error::{ChroderError, Result};
    pub use crate::genome::ContigLengths;
    pub use crate::plan::Pseudochromosome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{AlignRecord, QryContigId, RefContigId};
    use crate::config::RunConfig;
    use crate::genome::ContigLengths;

    fn one_to_one_record() -> AlignRecord {
        AlignRecord {
            ref_contig: RefContigId("A".to_string()),
            qry_contig: QryContigId("a".to_string()),
            ref_start: 0,
            ref_end: 30000,
            qry_start: 0,
            qry_end: 30000,
            ref_len: 30000,
            qry_len: 30000,
            identity: 99.5,
            qry_dir: 1,
        }
    }

    #[test]
    fn one_to_one_contig_pair_round_trips_through_the_whole_pipeline() {
        let records = vec![one_to_one_record()];
        let ref_lengths = ContigLengths::from_pairs(vec![("A".to_string(), 30000)]);
        let qry_lengths = ContigLengths::from_pairs(vec![("a".to_string(), 30000)]);

        let plan = commands::ScaffoldCommand::new()
            .with_config(RunConfig::new(false, 100))
            .run(&records, ref_lengths, qry_lengths)
            .unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].ref_contigs, vec!["A"]);
        assert_eq!(plan[0].qry_contigs, vec!["a"]);
    }
}
