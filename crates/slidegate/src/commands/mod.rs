pub mod check;
pub mod completion;
pub mod config;
pub mod digest;

use colored::Colorize;

pub fn print_version() {
    println!(
        "{} {}",
        "slidegate".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
}
