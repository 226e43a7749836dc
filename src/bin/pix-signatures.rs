use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use log::info;
use prettytable::{cell, format, row, Table};
use restoration::{lines::DEFAULT_MAX_LINE_LEN, LineReader, Signature};

use pix_restore::cli;

#[derive(Parser, Debug)]
/// List the line signatures of a corrupted raster
pub struct SigOpts {
    /// The corrupted file (reads STDIN if omitted)
    file: Option<PathBuf>,
    /// Maximum length of an input line, newline included
    #[clap(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,
}

struct Entry {
    signature: Signature,
    first_line: usize,
    count: usize,
}

fn collect<R: BufRead>(reader: R, max_len: usize) -> eyre::Result<Vec<Entry>> {
    let mut index: HashMap<Signature, usize> = HashMap::new();
    let mut entries: Vec<Entry> = Vec::new();
    let mut lines = LineReader::with_max_len(reader, Some(max_len));
    while let Some(line) = lines.next() {
        let signature = Signature::of(&line?);
        match index.get(&signature) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(signature.clone(), entries.len());
                entries.push(Entry {
                    signature,
                    first_line: lines.line_no(),
                    count: 1,
                });
            }
        }
    }
    Ok(entries)
}

fn main() -> eyre::Result<()> {
    let opt: SigOpts = cli::init()?;

    let entries = match &opt.file {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("Failed to open file: `{}`", path.display()))?;
            collect(BufReader::new(file), opt.max_line_len)?
        }
        None => collect(io::stdin().lock(), opt.max_line_len)?,
    };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["first", "count", "kind", "len", "signature"]);
    for entry in &entries {
        let kind = if entry.count > 1 { "authentic" } else { "noise" };
        table.add_row(row![
            r->entry.first_line,
            r->entry.count,
            kind,
            r->entry.signature.len(),
            entry.signature
        ]);
    }
    table.printstd();

    let authentic = entries.iter().filter(|e| e.count > 1).count();
    info!(
        "{} distinct signatures, {} repeated",
        entries.len(),
        authentic
    );
    Ok(())
}
