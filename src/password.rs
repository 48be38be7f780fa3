use rand::Rng;
use rand::seq::SliceRandom;

/// Characters used for generated credentials. Ambiguous glyphs (0/O, 1/l/I)
/// are excluded so a credential read off the screen can be retyped.
const LETTERS: &[u8] = b"abcdefghjkmnpqrstuvwxyzABCDEFGHJKMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%&*";

/// Length of generated credentials. Forms enforce the 8-character minimum
/// for hand-typed passwords; generated ones exceed it.
pub const GENERATED_LENGTH: usize = 12;

/// Generate a random credential string.
///
/// Guarantees at least one digit and one symbol so the result passes
/// common backend complexity checks, with the remainder drawn from the
/// full alphabet.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let mut chars: Vec<u8> = Vec::with_capacity(GENERATED_LENGTH);

    chars.push(DIGITS[rng.gen_range(0..DIGITS.len())]);
    chars.push(SYMBOLS[rng.gen_range(0..SYMBOLS.len())]);

    let all: Vec<u8> = [LETTERS, DIGITS, SYMBOLS].concat();
    while chars.len() < GENERATED_LENGTH {
        chars.push(all[rng.gen_range(0..all.len())]);
    }

    chars.shuffle(&mut rng);
    String::from_utf8(chars).expect("alphabet is ascii")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_credential_is_long_enough() {
        for _ in 0..32 {
            assert!(generate().len() >= 8);
        }
    }

    #[test]
    fn generated_credential_uses_known_alphabet() {
        let all: Vec<u8> = [LETTERS, DIGITS, SYMBOLS].concat();
        for _ in 0..32 {
            for b in generate().bytes() {
                assert!(all.contains(&b), "unexpected character {}", b as char);
            }
        }
    }

    #[test]
    fn generated_credential_contains_digit_and_symbol() {
        for _ in 0..32 {
            let pw = generate();
            assert!(pw.bytes().any(|b| DIGITS.contains(&b)));
            assert!(pw.bytes().any(|b| SYMBOLS.contains(&b)));
        }
    }

    #[test]
    fn consecutive_credentials_differ() {
        assert_ne!(generate(), generate());
    }
}
