//! The `pwmeter tips` command.

use anyhow::Result;
use rand::Rng;

const GUIDELINES: &str = "\
Strong password guidelines:
  - Use at least 12 characters
  - Mix uppercase and lowercase letters
  - Include numbers and special characters
  - Avoid common words or patterns
  - Don't reuse passwords across sites

Common password mistakes:
  - Using personal information
  - Using dictionary words
  - Simple character substitutions
  - Using keyboard patterns (qwerty)
  - Writing passwords down

Password manager benefits:
  - Store complex passwords securely
  - Generate strong unique passwords
  - Auto-fill credentials
  - Sync across devices";

const FACTS: [&str; 8] = [
    "The most common password is still '123456'",
    "It would take a computer about 7 quintillion years to crack a 12-character password with numbers, upper and lowercase letters, and symbols",
    "The average person has 100 passwords",
    "59% of people use the same password for multiple accounts",
    "Password managers can help you create and store strong, unique passwords",
    "Two-factor authentication adds an extra layer of security beyond just passwords",
    "Passwords like 'qwerty' and 'password' can be cracked instantly",
    "A 12-character password is 62 trillion times stronger than a 6-character password",
];

pub fn execute() -> Result<()> {
    println!("{}", render(&mut rand::rng()));
    Ok(())
}

fn render<R: Rng + ?Sized>(rng: &mut R) -> String {
    let fact = FACTS[rng.random_range(0..FACTS.len())];
    format!("{GUIDELINES}\n\nDid you know? {fact}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn includes_guidelines_and_one_fact() {
        let out = render(&mut StdRng::seed_from_u64(7));
        assert!(out.starts_with("Strong password guidelines:"));
        let fact = out.rsplit("Did you know? ").next().unwrap();
        assert!(FACTS.contains(&fact));
    }

    #[test]
    fn fact_varies_with_seed() {
        let facts: std::collections::HashSet<_> = (0..32)
            .map(|seed| render(&mut StdRng::seed_from_u64(seed)))
            .collect();
        assert!(facts.len() > 1);
    }
}
