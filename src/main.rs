//! chroder: chromosome-level assembly reconciliation CLI.
//!
//! Usage: chroder scaffold --align <table> --ref-genome <file> --qry-genome <file>

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use chroder_core::commands::ScaffoldCommand;
use chroder_core::config::RunConfig;
use chroder_core::error::ChroderError;
use chroder_core::genome::ContigLengths;

mod ingest;

#[derive(Parser)]
#[command(name = "chroder")]
#[command(author = "Manish Kumar Bobbili")]
#[command(version)]
#[command(about = "Chromosome-level assembly reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Order and orient contigs from two assemblies into pseudochromosomes
    Scaffold {
        /// Normalized alignment table (refStart refEnd qryStart qryEnd
        /// refLen qryLen identity refDir qryDir refChr qryChr, tab-separated)
        #[arg(short, long)]
        align: PathBuf,

        /// Reference genome contig sizes (contig\tlength per line)
        #[arg(long = "ref-genome")]
        ref_genome: PathBuf,

        /// Query genome contig sizes (contig\tlength per line)
        #[arg(long = "qry-genome")]
        qry_genome: PathBuf,

        /// Treat neither assembly as chromosome-scale
        #[arg(long)]
        noref: bool,

        /// Count of N bases a downstream writer inserts between contigs
        #[arg(long, default_value = "100")]
        ncount: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scaffold {
            align,
            ref_genome,
            qry_genome,
            noref,
            ncount,
        } => run_scaffold(align, ref_genome, qry_genome, noref, ncount),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_scaffold(
    align_path: PathBuf,
    ref_genome: PathBuf,
    qry_genome: PathBuf,
    noref: bool,
    ncount: usize,
) -> Result<(), ChroderError> {
    let content = std::fs::read_to_string(&align_path)?;
    let records = ingest::parse_table(&content)?;

    let ref_lengths = ContigLengths::from_file(&ref_genome)?;
    let qry_lengths = ContigLengths::from_file(&qry_genome)?;

    let plan = ScaffoldCommand::new()
        .with_config(RunConfig::new(noref, ncount))
        .run(&records, ref_lengths, qry_lengths)?;

    for chrom in &plan {
        let ref_side: Vec<String> = chrom
            .ref_contigs
            .iter()
            .zip(&chrom.ref_orientations)
            .map(|(c, d)| format!("{}{}", c, if *d == 1 { "+" } else { "-" }))
            .collect();
        let qry_side: Vec<String> = chrom
            .qry_contigs
            .iter()
            .zip(&chrom.qry_orientations)
            .map(|(c, d)| format!("{}{}", c, if *d == 1 { "+" } else { "-" }))
            .collect();
        println!("{}\tref:{}\tqry:{}", chrom.id, ref_side.join(","), qry_side.join(","));
    }

    Ok(())
}
