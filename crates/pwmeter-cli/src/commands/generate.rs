//! The `pwmeter generate` command.

use anyhow::Result;
use serde::Serialize;

use pwmeter_core::config::load_config_from;
use pwmeter_core::generator::{generate, CharClasses, UI_LENGTH_RANGE};
use pwmeter_core::strength::{evaluate, Strength};

use crate::GenerateArgs;

#[derive(Serialize)]
struct GeneratedPassword {
    password: String,
    score: f64,
    strength: Strength,
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let length = args.length.unwrap_or(config.generator.length);
    let defaults = config.generator.classes;
    let classes = CharClasses {
        uppercase: defaults.uppercase && !args.no_upper,
        lowercase: defaults.lowercase && !args.no_lower,
        digits: defaults.digits && !args.no_digits,
        special: defaults.special && !args.no_special,
    };

    if !UI_LENGTH_RANGE.contains(&length) {
        tracing::warn!(
            "length {length} is outside the recommended range {}-{}",
            UI_LENGTH_RANGE.start(),
            UI_LENGTH_RANGE.end()
        );
    }
    if classes.is_empty() {
        tracing::warn!("all character classes excluded, using the default mixed alphabet");
    }

    let passwords: Vec<GeneratedPassword> = (0..args.count)
        .map(|_| {
            let password = generate(length, classes);
            let evaluation = evaluate(&password);
            GeneratedPassword {
                score: evaluation.score,
                strength: evaluation.strength(),
                password,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&passwords)?);
    } else {
        for generated in &passwords {
            println!("{}", generated.password);
            eprintln!("  strength: {} ({:.1}/6)", generated.strength, generated.score);
        }
    }

    Ok(())
}
