use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Args;

use crate::commands::{CommandResult, IndexOptions};

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub index: IndexOptions,

    /// Write a text rendering of the built dictionary to this file
    #[arg(long)]
    pub dump: Option<PathBuf>,
}

pub fn run(args: BuildArgs) -> ExitCode {
    match execute(args) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(1)
        }
    }
}

fn execute(args: BuildArgs) -> CommandResult<()> {
    let start = Instant::now();
    let index = args.index.build_index()?;
    let elapsed = start.elapsed();

    let stats = index.stats();
    println!("rows:           {}", stats.rows);
    println!("trigram keys:   {}", stats.keys);
    println!("inline tuples:  {}", stats.inline_tuples);
    println!("tree tuples:    {}", stats.tree_tuples);
    println!("posting bytes:  {}", stats.posting_bytes);
    println!("dictionary:     {}", index.params().dictionary.name());
    println!("build time:     {:.6}s", elapsed.as_secs_f64());

    if let Some(path) = &args.dump {
        let file = File::create(path)
            .with_context(|| format!("failed to create dump file {}", path.display()))?;
        let mut out = BufWriter::new(file);
        index.dump(&mut out)?;
        out.flush()?;
        println!("dictionary dumped to {}", path.display());
    }

    Ok(())
}
