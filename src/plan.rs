//! Plan Writer (spec §4.8): turns each component's winning path into a
//! [`Pseudochromosome`] record — the core's final output (spec §6). Actually
//! writing FASTA/annotation files from this record is a downstream
//! collaborator's job (spec §1); this module stops at the record shape.

use crate::graph::ComponentResult;

/// One assembled pseudochromosome: ordered contigs and per-contig
/// orientation on each side, ready for a FASTA/annotation writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pseudochromosome {
    pub id: String,
    pub ref_contigs: Vec<String>,
    pub ref_orientations: Vec<i8>,
    pub qry_contigs: Vec<String>,
    pub qry_orientations: Vec<i8>,
}

/// Assign output ids to a sequence of component results: sequential
/// `Pseudochrom{n}` in `noref` mode, the component's anchor ref contig id
/// otherwise (`original_source`'s `scaf` names chromosome-scale output after
/// the first reference contig it swallows).
pub fn build_plan(results: Vec<ComponentResult>, noref: bool) -> Vec<Pseudochromosome> {
    results
        .into_iter()
        .enumerate()
        .map(|(idx, r)| Pseudochromosome {
            id: if noref {
                format!("Pseudochrom{}", idx + 1)
            } else {
                r.anchor_ref_contig.clone()
            },
            ref_contigs: r.ref_contigs,
            ref_orientations: r.ref_orientations,
            qry_contigs: r.qry_contigs,
            qry_orientations: r.qry_orientations,
        })
        .collect()
}
