//! huffcode - build a prefix code for a file, encode, decode and report.
//!
//!   huffcode book.txt             → statistics for character symbols
//!   huffcode --alphabet bytes img → statistics for byte symbols
//!   cat file | huffcode --table   → also print the code table
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use huffcode::{CodeTable, FrequencyTable, Symbol};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Alphabet {
    /// One symbol per byte.
    Bytes,
    /// One symbol per Unicode scalar value (input must be UTF-8).
    Chars,
}

#[derive(Parser)]
#[command(about = "Huffman-code a file and verify the round trip")]
struct Cli {
    /// Input file; reads stdin when omitted.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// How to split the input into symbols.
    #[arg(short, long, value_enum, default_value_t = Alphabet::Chars)]
    alphabet: Alphabet,

    /// Print the code table.
    #[arg(short, long)]
    table: bool,

    /// Print the encoded bit string.
    #[arg(short, long)]
    bits: bool,
}

struct Report {
    symbols: usize,
    alphabet: usize,
    input_bytes: usize,
    encoded_bits: usize,
    entropy: f64,
    encode_time: Duration,
    decode_time: Duration,
    matched: bool,
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn run<S: Symbol>(cli: &Cli, input: &[S], input_bytes: usize) -> Result<Report> {
    let start = Instant::now();
    let (bits, table) = huffcode::encode(input)?;
    let encode_time = start.elapsed();
    info!("encoding took {:?}", encode_time);

    if cli.table {
        print_table(&table);
    }
    if cli.bits {
        println!("{}", bits);
    }

    let start = Instant::now();
    let decoded = huffcode::decode(&bits, &table)?;
    let decode_time = start.elapsed();
    info!("decoding took {:?}", decode_time);

    Ok(Report {
        symbols: input.len(),
        alphabet: table.len(),
        input_bytes,
        encoded_bits: bits.len(),
        entropy: FrequencyTable::from_symbols(input.iter().cloned()).entropy(),
        encode_time,
        decode_time,
        matched: decoded == input,
    })
}

fn print_table<S: Symbol>(table: &CodeTable<S>) {
    println!("  SYMBOL        CODE");
    for (symbol, code) in table.iter() {
        println!("  {:12}  {}", format!("{:?}", symbol), code);
    }
}

fn print_report(report: &Report) {
    let packed = report.encoded_bits.div_ceil(8);
    let avg = if report.symbols == 0 {
        0.0
    } else {
        report.encoded_bits as f64 / report.symbols as f64
    };
    let ratio = if report.input_bytes == 0 {
        0.0
    } else {
        packed as f64 / report.input_bytes as f64
    };

    println!("symbols:        {}", report.symbols);
    println!("alphabet:       {}", report.alphabet);
    println!("input size:     {} bytes", report.input_bytes);
    println!("encoded:        {} bits (~{} bytes packed)", report.encoded_bits, packed);
    println!("ratio:          {:.3}", ratio);
    println!("entropy:        {:.3} bits/symbol", report.entropy);
    println!("average code:   {:.3} bits/symbol", avg);
    println!("encode time:    {:?}", report.encode_time);
    println!("decode time:    {:?}", report.decode_time);
    println!("round trip:     {}", if report.matched { "ok" } else { "MISMATCH" });
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::init();

    let raw = read_input(cli.input.as_ref())?;
    let report = match cli.alphabet {
        Alphabet::Bytes => run(&cli, &raw, raw.len())?,
        Alphabet::Chars => {
            let text = std::str::from_utf8(&raw)
                .context("input is not UTF-8; try --alphabet bytes")?;
            let symbols: Vec<char> = text.chars().collect();
            run(&cli, &symbols, raw.len())?
        }
    };
    print_report(&report);

    if report.matched {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

