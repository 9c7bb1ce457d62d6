use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let defaults = config.defaults.clone().unwrap_or_default();
    print_value("defaults.theme", defaults.theme.as_deref(), "light");
    print_value("defaults.start_mode", defaults.start_mode.as_deref(), "first");
    let windowed = defaults.windowed.map(|w| w.to_string());
    print_value("defaults.windowed", windowed.as_deref(), "false");
    Ok(())
}

fn print_value(key: &str, value: Option<&str>, default: &str) {
    match value {
        Some(v) => println!("  {:<22} {}", key.cyan(), v),
        None => println!("  {:<22} {} {}", key.cyan(), default, "(default)".dimmed()),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Saved".green().bold());
    println!("{}", path.display().to_string().dimmed());
    Ok(())
}
