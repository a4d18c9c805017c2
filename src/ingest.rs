//! TSV ingestion for the `chroder` binary: turns the plain alignment table
//! `original_source` calls `F == 'T'` into [`AlignRecord`]s.
//!
//! Not part of `chroder_core`'s public API — parsing alignment files is out
//! of scope for the library (spec.md §1 names PAF/SAM/BAM/delta/TSV
//! together as external-collaborator work). This module is the
//! collaborator for the one format the corpus's original implementation
//! reads directly.

use std::io::BufRead;

use chroder_core::align::{AlignRecord, QryContigId, RefContigId};
use chroder_core::error::{ChroderError, Result};

fn is_numeric_only(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn validate_contig_id(id: &str) -> Result<()> {
    if is_numeric_only(id) {
        return Err(ChroderError::NumericContigId(id.to_string()));
    }
    Ok(())
}

/// Parse the normalized alignment table: one row per alignment, columns
/// `refStart refEnd qryStart qryEnd refLen qryLen identity refDir qryDir
/// refChr qryChr`, tab-separated, no header.
pub fn parse_table(content: &str) -> Result<Vec<AlignRecord>> {
    let mut records = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        records.push(parse_line(line, line_num + 1)?);
    }
    Ok(records)
}

/// Read the normalized alignment table from any buffered reader.
pub fn read_table<R: BufRead>(reader: R) -> Result<Vec<AlignRecord>> {
    let mut records = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        records.push(parse_line(line, line_num + 1)?);
    }
    Ok(records)
}

fn parse_line(line: &str, line_num: usize) -> Result<AlignRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 11 {
        return Err(ChroderError::Parse {
            line: line_num,
            message: format!("expected 11 columns, got {}", fields.len()),
        });
    }

    let parse_u64 = |s: &str, name: &str| -> Result<u64> {
        s.parse().map_err(|_| ChroderError::Parse {
            line: line_num,
            message: format!("invalid {}: '{}'", name, s),
        })
    };
    let parse_i8 = |s: &str, name: &str| -> Result<i8> {
        s.parse().map_err(|_| ChroderError::Parse {
            line: line_num,
            message: format!("invalid {}: '{}'", name, s),
        })
    };

    let ref_start = parse_u64(fields[0], "refStart")?;
    let ref_end = parse_u64(fields[1], "refEnd")?;
    let qry_start = parse_u64(fields[2], "qryStart")?;
    let qry_end = parse_u64(fields[3], "qryEnd")?;
    let ref_len = parse_u64(fields[4], "refLen")?;
    let qry_len = parse_u64(fields[5], "qryLen")?;
    let identity: f64 = fields[6].parse().map_err(|_| ChroderError::Parse {
        line: line_num,
        message: format!("invalid identity: '{}'", fields[6]),
    })?;
    let _ref_dir = parse_i8(fields[7], "refDir")?;
    let qry_dir = parse_i8(fields[8], "qryDir")?;
    let ref_chr = fields[9].to_string();
    let qry_chr = fields[10].to_string();

    if ref_start > ref_end {
        return Err(ChroderError::Parse {
            line: line_num,
            message: format!("refStart ({}) > refEnd ({})", ref_start, ref_end),
        });
    }
    validate_contig_id(&ref_chr)?;
    validate_contig_id(&qry_chr)?;

    Ok(AlignRecord {
        ref_contig: RefContigId(ref_chr),
        qry_contig: QryContigId(qry_chr),
        ref_start,
        ref_end,
        qry_start,
        qry_end,
        ref_len,
        qry_len,
        identity,
        qry_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forward_row() {
        let content = "0\t30000\t0\t30000\t30000\t30000\t99.5\t1\t1\tA\ta\n";
        let records = parse_table(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ref_contig, RefContigId("A".to_string()));
        assert_eq!(records[0].qry_contig, QryContigId("a".to_string()));
        assert_eq!(records[0].qry_dir, 1);
    }

    #[test]
    fn rejects_numeric_contig_id() {
        let content = "0\t1000\t0\t1000\t1000\t1000\t99.0\t1\t1\t1\tqry1\n";
        let err = parse_table(content).unwrap_err();
        assert!(matches!(err, ChroderError::NumericContigId(_)));
    }

    #[test]
    fn rejects_inverted_ref_interval() {
        let content = "1000\t0\t0\t1000\t1000\t1000\t99.0\t1\t1\tA\ta\n";
        let err = parse_table(content).unwrap_err();
        assert!(matches!(err, ChroderError::Parse { .. }));
    }

    #[test]
    fn normalizes_inverted_qry_interval() {
        let content = "0\t50000\t50000\t0\t50000\t50000\t99.0\t1\t-1\tA\ta\n";
        let records = parse_table(content).unwrap();
        assert_eq!(records[0].normalized_qry_interval(), (0, 50000));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let content = "# header\n\n0\t1000\t0\t1000\t1000\t1000\t99.0\t1\t1\tA\ta\n";
        let records = parse_table(content).unwrap();
        assert_eq!(records.len(), 1);
    }
}
