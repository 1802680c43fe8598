use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use pp::{Config, Encoding, Preprocessor};

#[derive(Parser, Debug)]
#[command(
    name = "asm51",
    about = "8051 assembler toolchain — source preprocessing stage",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten includes, apply macros and escape literals; print the result
    Preprocess(PreprocessArgs),
}

#[derive(Args, Debug)]
struct PreprocessArgs {
    /// Input assembler source file
    input: PathBuf,
    /// Seed an object-like macro, NAME or NAME=VALUE (VALUE defaults to 1)
    #[arg(short = 'D', value_name = "NAME[=VALUE]")]
    define: Vec<String>,
    /// Remove a seeded macro NAME before the run
    #[arg(short = 'U', value_name = "NAME")]
    undef: Vec<String>,
    /// Folder that `#include <...>` paths resolve against
    #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
    include_dir: Option<PathBuf>,
    /// Encoding of source and include files: utf8 or latin1
    #[arg(long, value_name = "NAME", default_value = "utf8")]
    encoding: String,
    /// Drop lines in false conditional branches instead of only tracking
    /// the nesting
    #[arg(long)]
    apply_conditionals: bool,
    /// Prefix each output line with its original line number
    #[arg(long)]
    line_numbers: bool,
    /// Print the text of every included file after the listing
    #[arg(long)]
    dump_includes: bool,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("ASM51_LOG", "warn"));
    let cli = Cli::parse();
    match cli.command {
        Commands::Preprocess(args) => cmd_preprocess(&args),
    }
}

fn parse_encoding(name: &str) -> Result<Encoding> {
    Encoding::from_name(name)
        .ok_or_else(|| anyhow!("unknown encoding `{name}` (expected utf8 or latin1)"))
}

/// Quoted includes resolve against the directory the input file lives in.
fn base_dir_of(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if dir != Path::new("") => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn apply_defines_undefs(pp: &mut Preprocessor, defines: &[String], undefs: &[String]) -> Result<()> {
    for d in defines {
        if let Some((name, value)) = d.split_once('=') {
            pp.define_object(name, value)?;
        } else {
            pp.define_object(d, "1")?;
        }
    }
    for u in undefs {
        pp.undefine(u);
    }
    Ok(())
}

fn cmd_preprocess(args: &PreprocessArgs) -> Result<()> {
    let encoding = parse_encoding(&args.encoding)?;
    let bytes = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let source = encoding
        .decode(bytes)
        .with_context(|| format!("failed to decode {}", args.input.display()))?;

    let config = Config {
        base_dir: base_dir_of(&args.input),
        include_dir: args.include_dir.clone(),
        encoding,
        apply_conditionals: args.apply_conditionals,
        ..Config::default()
    };
    let mut pp = Preprocessor::new(config);
    apply_defines_undefs(&mut pp, &args.define, &args.undef)?;

    let out = pp.run(&source)?;
    info!(
        "{}: {} lines, {} includes",
        args.input.display(),
        out.lines.len(),
        out.includes.len()
    );

    for line in &out.lines {
        if args.line_numbers {
            println!("{:>5}  {}", line.number, line.text);
        } else {
            println!("{}", line.text);
        }
    }
    if args.dump_includes {
        for (name, text) in &out.includes {
            println!("--- {name} ---");
            print!("{text}");
            if !text.ends_with('\n') && !text.is_empty() {
                println!();
            }
        }
    }
    Ok(())
}
