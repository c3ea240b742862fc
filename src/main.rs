use code_tables::*;

use blake2::{Blake2b, Digest};
use clap::Parser;
use flate2::write::{DeflateEncoder, GzEncoder};
use flate2::Compression;
use log::info;
use serde::Serialize;
use sha2::Sha512;
use std::default::Default;
use std::fs::File;
use std::io::prelude::*;

#[derive(clap::ArgEnum, PartialEq, Debug, Clone)]
enum Format {
    Rust,
    Json,
    Bin,
}

impl Default for Format {
    fn default() -> Self {
        Format::Rust
    }
}

#[derive(clap::ArgEnum, PartialEq, Debug, Clone)]
enum CompressionType {
    #[clap(name = "none")]
    Plain,
    Gzip,
    Deflate,
}

impl Default for CompressionType {
    fn default() -> Self {
        CompressionType::Plain
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Window width in bits
    #[clap(short, long, default_value_t = DEFAULT_WINDOW_BITS)]
    bits: u8,

    /// Zeta parameter, repeat for several tables [default: 3]
    #[clap(short = 'k', long = "zeta")]
    zeta: Vec<u32>,

    /// Output format
    #[clap(short, long, arg_enum, default_value_t)]
    format: Format,

    /// Output file, stdout if omitted
    #[clap(short, long)]
    output: Option<String>,

    /// Compression
    #[clap(short, long, arg_enum, default_value_t)]
    compression: CompressionType,
}

#[derive(Serialize)]
struct JSONTable {
    code: String,
    entries: Vec<(u16, u8)>,
    digest: String,
}

#[derive(Serialize)]
struct JSONTables {
    version: String,
    window_bits: u32,
    miss: u16,
    tables: Vec<JSONTable>,
}

#[derive(Serialize)]
struct JSONStats {
    size: usize,
    sha512: String,
}

fn digest(table: &CodeTable) -> std::io::Result<String> {
    let mut entries = Vec::with_capacity(table.len() * 3);
    packed::write_entries(&mut entries, table)?;

    let mut hasher = Blake2b::<blake2::digest::consts::U18>::new();
    hasher.update(&entries);
    Ok(base64::encode(hasher.finalize()))
}

fn to_json(tables: &Tables) -> std::io::Result<JSONTables> {
    let mut json = JSONTables {
        version: "1".to_string(),
        window_bits: tables.window().bits(),
        miss: MISS,
        tables: Vec::new(),
    };
    for table in tables.iter() {
        json.tables.push(JSONTable {
            code: table.code().to_string(),
            entries: table.entries().iter().map(|e| (e.value, e.len)).collect(),
            digest: digest(table)?,
        });
    }
    Ok(json)
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let zeta_ks = if args.zeta.is_empty() {
        vec![DEFAULT_ZETA_K]
    } else {
        args.zeta.clone()
    };
    let tables = Tables::new(&TableOptions {
        window_bits: args.bits,
        zeta_ks,
    })?;

    let mut rendered = Vec::new();
    match args.format {
        Format::Rust => render::write_rust_source(&mut rendered, &tables)?,
        Format::Bin => packed::write_packed(&mut rendered, &tables)?,
        Format::Json => serde_json::to_writer(&mut rendered, &to_json(&tables)?)?,
    }

    let compressed = match args.compression {
        CompressionType::Plain => rendered,
        CompressionType::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
            encoder.write_all(&rendered)?;
            encoder.finish()?
        }
        CompressionType::Deflate => {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
            encoder.write_all(&rendered)?;
            encoder.finish()?
        }
    };

    match &args.output {
        Some(path) => {
            let mut output = File::create(path)?;
            output.write_all(&compressed)?;
            info!("wrote {} bytes to {}", compressed.len(), path);

            println!(
                "{}",
                serde_json::to_string(&JSONStats {
                    size: compressed.len(),
                    sha512: base64::encode(Sha512::digest(&compressed)),
                })
                .expect("JSON serialization")
            );
        }
        None => std::io::stdout().write_all(&compressed)?,
    }

    Ok(())
}
