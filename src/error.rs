//! Error types for the reconciliation pipeline.

use thiserror::Error;

/// Fatal errors that halt the pipeline.
#[derive(Error, Debug)]
pub enum ChroderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("contig id '{0}' is numeric-only; alignment collaborators must supply string ids")]
    NumericContigId(String),

    #[error(
        "no matching contig found for '{contig}': this could be a result of incorrect assembly \
         or extensive repeats, or '{contig}' could be a novel region; pseudo-genome cannot be \
         generated for it"
    )]
    NoMatchingContig { contig: String },

    #[error("LRS solver failed for contig '{contig}' (sequence length {length}): {source}")]
    LrsFailure {
        contig: String,
        length: usize,
        #[source]
        source: LrsInternalError,
    },
}

pub type Result<T> = std::result::Result<T, ChroderError>;

/// Internal failure modes of the LRS solver, wrapped by [`ChroderError::LrsFailure`].
#[derive(Error, Debug)]
pub enum LrsInternalError {
    #[error("selected subsequence is not a valid subsequence of the input run sequence")]
    InvalidSubsequence,
    #[error("dynamic program produced no solution for a non-empty input")]
    NoSolution,
}

/// Non-fatal conditions produced while enumerating paths through a component's
/// locus graph. These are logged by the caller and the affected component (or
/// path) is skipped; they never abort the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphWarning {
    #[error("traversal error: missing edge between loci {from} and {to}")]
    TraversalError { from: usize, to: usize },

    #[error("circular configuration; skipped")]
    CircularComponent,

    #[error("branching found for query scaffold {contig}")]
    BranchingUnresolved { contig: String },

    #[error("path revisits locus {locus}; dropped")]
    NonUniquePath { locus: usize },
}
