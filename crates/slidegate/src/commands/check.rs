use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::compat;
use crate::deck::Deck;
use crate::parser;

pub fn run(file: &Path, quiet: bool) -> Result<()> {
    let presentation = parser::load(file)?;
    let base_dir = file.parent().unwrap_or(Path::new("."));
    let warnings = compat::check(&presentation, base_dir);

    if !quiet {
        let deck = Deck::new(&presentation);
        let sensitive = deck.sensitive_numbers();
        println!("{} {}", "Deck:".bold(), file.display());
        println!("  {} slides", deck.len());
        if sensitive.is_empty() {
            println!("  no sensitive slides");
        } else {
            let list: Vec<String> = sensitive.iter().map(ToString::to_string).collect();
            println!("  sensitive: {}", list.join(", ").yellow());
        }
        println!();
    }

    if warnings.is_empty() {
        println!("{}", "No problems found.".green());
        return Ok(());
    }

    for warning in &warnings {
        println!("{} {warning}", "warning:".yellow().bold());
    }
    anyhow::bail!("{} problem(s) found", warnings.len())
}
