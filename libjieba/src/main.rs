//! Segment text from the command line or stdin.
//!
//! Usage:
//!   cargo run -p libjieba -- --dict dict/jieba.dict.utf8 我来到北京清华大学
//!   echo 我来到北京清华大学 | cargo run -p libjieba -- --artifacts data/ --tag --format json

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use libjieba::{Config, MpSegment};
use libjieba_core::split_dict_paths;

#[derive(Parser, Debug)]
#[command(name = "libjieba")]
#[command(about = "Maximum-probability Chinese word segmentation")]
struct Args {
    /// Main dictionary (`word freq tag` per line)
    #[arg(short, long)]
    dict: Option<PathBuf>,

    /// User dictionary, may be repeated or joined with `|` / `;`
    #[arg(short, long = "user-dict")]
    user_dict: Vec<String>,

    /// Directory with compiled dict.fst + dict.bincode
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// TOML configuration; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Longest dictionary word considered, in characters
    #[arg(long)]
    max_word_len: Option<usize>,

    /// Print part-of-speech tags
    #[arg(long)]
    tag: bool,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Text to segment; reads stdin line by line when empty
    text: Vec<String>,
}

fn build_config(args: &Args) -> Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::load_toml(path).with_context(|| format!("load config {}", path.display()))?,
        None => Config::default(),
    };
    if args.dict.is_some() {
        cfg.dict_path = args.dict.clone();
    }
    if args.artifacts.is_some() {
        cfg.artifacts_dir = args.artifacts.clone();
    }
    cfg.user_dict_paths.extend(args.user_dict.iter().flat_map(|p| split_dict_paths(p)));
    if let Some(n) = args.max_word_len {
        cfg.max_word_len = n;
    }
    Ok(cfg)
}

fn render(seg: &MpSegment, line: &str, tag: bool, format: &str) -> Result<String> {
    let out = match (format, tag) {
        ("text", false) => seg.cut(line).join("/"),
        ("text", true) => seg
            .tag(line)
            .iter()
            .map(|(word, tag)| format!("{}/{}", word, tag))
            .collect::<Vec<_>>()
            .join(" "),
        ("json", false) => serde_json::to_string(&seg.cut_words(line, seg.max_word_len()))?,
        ("json", true) => serde_json::to_string(&seg.tag(line))?,
        _ => bail!("Unsupported format: {}. Use 'text' or 'json'", format),
    };
    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = build_config(&args)?;
    let seg = MpSegment::from_config(&cfg)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.text.is_empty() {
        let line = args.text.join(" ");
        writeln!(out, "{}", render(&seg, &line, args.tag, &args.format)?)?;
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        writeln!(out, "{}", render(&seg, &line, args.tag, &args.format)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_dict_lists_are_split() {
        let args = Args::parse_from(["libjieba", "-u", "a.utf8|b.utf8", "--user-dict", "c.utf8;d.utf8", "北京"]);
        let cfg = build_config(&args).unwrap();
        let expected: Vec<PathBuf> = ["a.utf8", "b.utf8", "c.utf8", "d.utf8"].iter().map(PathBuf::from).collect();
        assert_eq!(cfg.user_dict_paths, expected);
        assert_eq!(args.text, vec!["北京".to_string()]);
    }
}
