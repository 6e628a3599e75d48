//! The `pwmeter init` command.

use anyhow::Result;

use pwmeter_core::config::SAMPLE_CONFIG;

pub fn execute() -> Result<()> {
    if std::path::Path::new("pwmeter.toml").exists() {
        println!("pwmeter.toml already exists, skipping.");
    } else {
        std::fs::write("pwmeter.toml", SAMPLE_CONFIG)?;
        println!("Created pwmeter.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust generator defaults in pwmeter.toml");
    println!("  2. Run: pwmeter generate");
    println!("  3. Run: pwmeter session");

    Ok(())
}
