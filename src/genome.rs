//! Per-assembly contig length table.
//!
//! Adapted from the teacher's `Genome` file parser, generalized so the
//! caller holds one table per side (ref and qry) instead of one shared
//! table; genomic contig lengths are the other external input the core
//! needs beyond the alignment table (spec §3: "Contig lengths per side").

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::{ChroderError, Result};

/// Chromosome/contig sizes for one assembly side. Preserves insertion order.
#[derive(Debug, Clone, Default)]
pub struct ContigLengths {
    sizes: FxHashMap<String, u64>,
    order: Vec<String>,
}

impl ContigLengths {
    pub fn new() -> Self {
        Self {
            sizes: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Build a table from an iterator of (contig, length) pairs, in order.
    pub fn from_pairs<I: IntoIterator<Item = (String, u64)>>(pairs: I) -> Self {
        let mut table = Self::new();
        for (contig, len) in pairs {
            table.insert(contig, len);
        }
        table
    }

    /// Load a table from a tab-delimited `contig\tlength` file, one per line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut table = Self::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 {
                return Err(ChroderError::Parse {
                    line: line_num + 1,
                    message: "genome file requires two columns: contig and length".to_string(),
                });
            }
            let len: u64 = fields[1].parse().map_err(|_| ChroderError::Parse {
                line: line_num + 1,
                message: format!("invalid contig length: '{}'", fields[1]),
            })?;
            table.insert(fields[0].to_string(), len);
        }
        Ok(table)
    }

    pub fn insert(&mut self, contig: String, len: u64) {
        if !self.sizes.contains_key(&contig) {
            self.order.push(contig.clone());
        }
        self.sizes.insert(contig, len);
    }

    #[inline]
    pub fn get(&self, contig: &str) -> Option<u64> {
        self.sizes.get(contig).copied()
    }

    #[inline]
    pub fn contains(&self, contig: &str) -> bool {
        self.sizes.contains_key(contig)
    }

    pub fn contigs(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let table = ContigLengths::from_pairs(vec![
            ("B".to_string(), 200),
            ("A".to_string(), 100),
        ]);
        let order: Vec<&String> = table.contigs().collect();
        assert_eq!(order, vec!["B", "A"]);
        assert_eq!(table.get("A"), Some(100));
        assert_eq!(table.get("Z"), None);
    }

    #[test]
    fn loads_tab_delimited_genome_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment\nA\t100\n\nB\t200").unwrap();

        let table = ContigLengths::from_file(file.path()).unwrap();
        assert_eq!(table.get("A"), Some(100));
        assert_eq!(table.get("B"), Some(200));
        assert_eq!(table.contigs().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn rejects_malformed_genome_line() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A\tnotanumber").unwrap();

        let err = ContigLengths::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ChroderError::Parse { .. }));
    }
}
