//! Compile text dictionaries into fst + bincode artifacts.
//!
//! Usage:
//!   cargo run -p convert_dict -- --dict dict/jieba.dict.utf8 --user-dict dict/user.dict.utf8 --out data/

use anyhow::{Context, Result};
use clap::Parser;
use libjieba_core::{split_dict_paths, DictTrie, Dictionary, UserWordWeight};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "convert_dict")]
#[command(about = "Build dict.fst + dict.bincode from jieba-style text dictionaries")]
struct Args {
    /// Main dictionary (`word freq tag` per line)
    #[arg(short, long)]
    dict: PathBuf,

    /// User dictionaries; a single value may list several paths separated by `|` or `;`
    #[arg(short, long = "user-dict")]
    user_dict: Vec<String>,

    /// Weight for user words without a frequency: min, median or max
    #[arg(long, default_value = "median")]
    user_weight: String,

    /// Output directory
    #[arg(short, long)]
    out: PathBuf,
}

fn parse_user_weight(raw: &str) -> Result<UserWordWeight> {
    match raw {
        "min" => Ok(UserWordWeight::Min),
        "median" => Ok(UserWordWeight::Median),
        "max" => Ok(UserWordWeight::Max),
        _ => anyhow::bail!("Unsupported user weight: {}. Use 'min', 'median' or 'max'", raw),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let user_weight = parse_user_weight(&args.user_weight)?;
    let user_paths: Vec<PathBuf> = args.user_dict.iter().flat_map(|p| split_dict_paths(p)).collect();

    let dict = DictTrie::load(&args.dict, &user_paths, user_weight)
        .with_context(|| format!("load {}", args.dict.display()))?;
    dict.save_artifacts(&args.out)?;

    println!(
        "wrote {} units to {} (min weight {:.4})",
        dict.len(),
        args.out.display(),
        dict.min_weight()
    );
    Ok(())
}
