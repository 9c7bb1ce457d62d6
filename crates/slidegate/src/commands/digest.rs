use anyhow::{Context, Result};
use colored::Colorize;
use inquire::{Password, PasswordDisplayMode};

use crate::controller::access::digest_hex;

pub fn run(code: Option<String>, salt: &str) -> Result<()> {
    let code = match code {
        Some(code) => code,
        None => Password::new("Admin code:")
            .with_display_mode(PasswordDisplayMode::Hidden)
            .with_custom_confirmation_message("Confirm code:")
            .with_custom_confirmation_error_message("The codes don't match.")
            .prompt()
            .context("No code entered")?,
    };

    let code = code.trim();
    if code.is_empty() {
        anyhow::bail!("The admin code cannot be empty.");
    }

    let digest = digest_hex(code, salt);
    println!("{digest}");
    eprintln!();
    eprintln!("{}", "Add to the deck front matter:".dimmed());
    eprintln!("  access:");
    eprintln!("    digest: {}", digest.green());
    eprintln!("    salt: {salt:?}");
    Ok(())
}
