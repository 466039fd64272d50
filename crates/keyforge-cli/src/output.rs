//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use zeroize::Zeroizing;

/// Everything a command reports about one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyReport {
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub address: String,
    pub address_hex: String,
    pub public_key: String,
    pub public_key_json: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<Zeroizing<String>>,
}

/// Print a key report as aligned `label: value` lines.
pub fn print_key_report(report: &KeyReport) {
    println!("{}", "Key".bold());
    println!("{}", "=".repeat(50));
    println!("Algorithm:    {}", report.algorithm.bright_cyan());
    if let Some(path) = &report.path {
        println!("Path:         {}", path);
    }
    println!("Address:      {}", report.address.bright_green());
    println!("Address hex:  {}", report.address_hex);
    println!("Public key:   {}", report.public_key);
    println!("Public JSON:  {}", report.public_key_json);
    if let Some(private_key) = &report.private_key {
        print_warning("The private key below grants full control of this account");
        println!("Private key:  {}", private_key.as_str().bright_red());
    }
}

/// Print a report as a single JSON document.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{}", format!("⚠ {}", msg).yellow());
}
