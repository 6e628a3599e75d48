//! Property-based tests for the evaluator, generator, and duplicate check.

use proptest::prelude::*;

use pwmeter_core::generator::{generate, CharClasses, FALLBACK_SPECIAL_CHARS};
use pwmeter_core::history::History;
use pwmeter_core::record::PasswordRecord;
use pwmeter_core::strength::{evaluate, label, Strength, MAX_SCORE, SPECIAL_CHARS};

fn arb_classes() -> impl Strategy<Value = CharClasses> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(uppercase, lowercase, digits, special)| CharClasses {
            uppercase,
            lowercase,
            digits,
            special,
        },
    )
}

/// Requested classes in mandatory-selection order, as predicates.
fn requested(classes: CharClasses) -> Vec<fn(char) -> bool> {
    let mut preds: Vec<fn(char) -> bool> = Vec::new();
    if classes.lowercase {
        preds.push(|c: char| c.is_ascii_lowercase());
    }
    if classes.uppercase {
        preds.push(|c: char| c.is_ascii_uppercase());
    }
    if classes.digits {
        preds.push(|c: char| c.is_ascii_digit());
    }
    if classes.special {
        preds.push(|c: char| SPECIAL_CHARS.contains(c));
    }
    preds
}

proptest! {
    #[test]
    fn score_stays_in_range(password in any::<String>()) {
        let eval = evaluate(&password);
        prop_assert!(eval.score >= 0.0);
        prop_assert!(eval.score <= MAX_SCORE);
        prop_assert_eq!(eval.strength(), label(eval.score));
    }

    #[test]
    fn any_script_digit_satisfies_digits(
        prefix in "[a-z]{0,8}",
        digit in prop::sample::select(vec!['7', '٣', '۵', '०', '৯', '๓', '７', '①']),
    ) {
        let password = format!("{prefix}{digit}");
        prop_assert!(evaluate(&password).criteria.digits);
    }

    #[test]
    fn criteria_are_order_independent(mut chars in proptest::collection::vec(any::<char>(), 0..32)) {
        let forward: String = chars.iter().collect();
        chars.reverse();
        let backward: String = chars.iter().collect();
        prop_assert_eq!(evaluate(&forward).criteria, evaluate(&backward).criteria);
    }

    #[test]
    fn denylisted_words_are_weak_in_any_case(
        word in prop_oneof![Just("password"), Just("123456"), Just("qwerty"), Just("admin")],
        mask in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let mixed: String = word
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let eval = evaluate(&mixed);
        prop_assert!(eval.score <= 1.0);
        prop_assert_eq!(eval.strength(), Strength::Weak);
    }

    #[test]
    fn generated_length_is_exact(length in 1usize..=64, classes in arb_classes()) {
        let password = generate(length, classes);
        prop_assert_eq!(password.chars().count(), length);
    }

    #[test]
    fn generated_password_covers_surviving_classes(length in 1usize..=64, classes in arb_classes()) {
        prop_assume!(!classes.is_empty());
        let password = generate(length, classes);
        let preds = requested(classes);

        for pred in preds.iter().take(length) {
            prop_assert!(password.chars().any(pred), "missing class in {:?}", password);
        }
        prop_assert!(password.chars().all(|c| preds.iter().any(|p| p(c))));
    }

    #[test]
    fn empty_request_uses_fallback_alphabet(length in 4usize..=64) {
        let password = generate(length, CharClasses::none());
        prop_assert_eq!(password.chars().count(), length);
        prop_assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        prop_assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        prop_assert!(password.chars().any(|c| c.is_ascii_digit()));
        prop_assert!(password.chars().any(|c| FALLBACK_SPECIAL_CHARS.contains(c)));
    }

    #[test]
    fn duplicate_iff_two_or_more(occurrences in 0usize..4, others in 0usize..4) {
        let mut history = History::new();
        for i in 0..others {
            history.push(PasswordRecord::evaluated(None, &format!("other-{i}")).unwrap());
        }
        for _ in 0..occurrences {
            history.push(PasswordRecord::evaluated(None, "target").unwrap());
        }
        prop_assert_eq!(history.is_duplicate("target"), occurrences >= 2);
    }
}
