//! Scaffold command: drives the reconciliation pipeline end to end, from a
//! normalized alignment table to a finished assembly plan.

use rayon::prelude::*;

use crate::align::AlignRecord;
use crate::config::{RunConfig, PARALLEL_COMPONENT_THRESHOLD};
use crate::error::Result;
use crate::genome::ContigLengths;
use crate::graph::{self, ComponentResult};
use crate::mapping;
use crate::orientation;
use crate::plan::{self, Pseudochromosome};
use crate::window;

/// Runs the full pipeline (window binning through plan writing) over one
/// pair of assemblies. Configured with the builder methods below, the way
/// the teacher's `MergeCommand`/`IntersectCommand` are.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldCommand {
    config: RunConfig,
}

impl ScaffoldCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the run configuration (`noref` mode and `ncount`).
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_noref(mut self, noref: bool) -> Self {
        self.config.noref = noref;
        self
    }

    pub fn with_ncount(mut self, ncount: usize) -> Self {
        self.config.ncount = ncount;
        self
    }

    /// Run the pipeline: bin windows, estimate orientation, extract and
    /// LRS-filter runs, summarize mappings, resolve conflicts, discover
    /// components, enumerate and score paths, and write the plan.
    pub fn run(
        &self,
        records: &[AlignRecord],
        ref_lengths: ContigLengths,
        qry_lengths: ContigLengths,
    ) -> Result<Vec<Pseudochromosome>> {
        let ref_windows = window::bin_ref_windows(records, &ref_lengths);
        let qry_windows = window::bin_qry_windows(records, &qry_lengths);

        let ref_orientation = orientation::estimate_ref_orientation(records);
        let qry_orientation = orientation::estimate_qry_orientation(records);

        let mut ref_mappings = mapping::summarize(&ref_windows, &ref_orientation)?;
        let mut qry_mappings = mapping::summarize(&qry_windows, &qry_orientation)?;

        mapping::resolve(&mut ref_mappings, &mut qry_mappings, self.config.noref);

        let components = graph::discover_components(&ref_mappings, &qry_mappings);

        let results: Vec<ComponentResult> = if components.len() >= PARALLEL_COMPONENT_THRESHOLD {
            components
                .par_iter()
                .filter_map(|c| graph::process_component(c, &ref_mappings, &qry_mappings, &ref_lengths, &qry_lengths))
                .collect()
        } else {
            components
                .iter()
                .filter_map(|c| graph::process_component(c, &ref_mappings, &qry_mappings, &ref_lengths, &qry_lengths))
                .collect()
        };

        Ok(plan::build_plan(results, self.config.noref))
    }
}
