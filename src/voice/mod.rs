//! Spoken-command mapping.
//!
//! A speech recognizer delivers a growing transcript. Only its last
//! recognizable word matters: each partial result is mapped to at most one
//! [`Button`], which the handler then presses like any other key.
//!
//! Words are looked up case-insensitively in a Russian and an English
//! vocabulary. Bare numbers are split into digits, so "12" ends in the digit
//! button `2`.
//!
//! ```
//! use rpncalc::voice::recognized_final_token;
//! use rpncalc::Button;
//!
//! assert_eq!(recognized_final_token("два плюс"), Some(Button::Add));
//! assert_eq!(recognized_final_token("seven times 12"), Some(Button::Digit(2)));
//! assert_eq!(recognized_final_token("hello"), None);
//! ```

use crate::domain::Button;

/// Spoken words and the key symbols they stand for.
const VOCABULARY: &[(&str, &str)] = &[
    ("ноль", "0"),
    ("один", "1"),
    ("два", "2"),
    ("три", "3"),
    ("четыре", "4"),
    ("пять", "5"),
    ("шесть", "6"),
    ("семь", "7"),
    ("восемь", "8"),
    ("девять", "9"),
    ("плюс", "+"),
    ("минус", "-"),
    ("умножь", "×"),
    ("раздели", "÷"),
    ("точка", "."),
    ("равно", "="),
    ("открой", "("),
    ("закрой", ")"),
    ("очисти", "AC"),
    ("удали", "⌫"),
    ("стоп", "M"),
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("plus", "+"),
    ("minus", "-"),
    ("times", "×"),
    ("divide", "÷"),
    ("point", "."),
    ("equals", "="),
    ("open", "("),
    ("close", ")"),
    ("clear", "AC"),
    ("delete", "⌫"),
    ("stop", "M"),
    ("*", "×"),
    ("/", "÷"),
];

/// Maps a transcript to the button its last word names.
///
/// Returns `None` when the transcript is empty or its last word is not a
/// known command, digit or symbol.
#[must_use]
pub fn recognized_final_token(text: &str) -> Option<Button> {
    let components = components(text);
    let last = components.last()?;
    let button = Button::from_symbol(last);

    tracing::debug!(
        transcript = %text,
        last = %last,
        button = ?button,
        "voice transcript mapped"
    );
    button
}

/// Splits a transcript into key symbols, last one final.
fn components(text: &str) -> Vec<String> {
    let padded = text
        .replace('+', " + ")
        .replace('-', " - ")
        .replace('*', " * ")
        .replace('/', " / ");

    let mut out = Vec::new();
    for word in padded.split_whitespace() {
        match word.parse::<u64>() {
            Ok(number) if number > 9 => {
                out.extend(number.to_string().chars().map(String::from));
            }
            _ => out.push(lookup(word).unwrap_or(word).to_string()),
        }
    }
    out
}

fn lookup(word: &str) -> Option<&'static str> {
    let lowered = word.to_lowercase();
    VOCABULARY
        .iter()
        .find(|(spoken, _)| *spoken == lowered)
        .map(|(_, symbol)| *symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_word_wins() {
        assert_eq!(recognized_final_token("пять умножь три"), Some(Button::Digit(3)));
        assert_eq!(recognized_final_token("Пять РАВНО"), Some(Button::Equals));
        assert_eq!(recognized_final_token("open"), Some(Button::OpenParen));
    }

    #[test]
    fn operators_split_from_numbers() {
        assert_eq!(recognized_final_token("3+"), Some(Button::Add));
        assert_eq!(recognized_final_token("8*"), Some(Button::Multiply));
        assert_eq!(recognized_final_token("8/"), Some(Button::Divide));
        assert_eq!(recognized_final_token("2-7"), Some(Button::Digit(7)));
    }

    #[test]
    fn multi_digit_numbers_expand() {
        assert_eq!(
            components("45 плюс"),
            vec!["4".to_string(), "5".to_string(), "+".to_string()]
        );
        assert_eq!(recognized_final_token("130"), Some(Button::Digit(0)));
    }

    #[test]
    fn control_words() {
        assert_eq!(recognized_final_token("очисти"), Some(Button::Clear));
        assert_eq!(recognized_final_token("delete"), Some(Button::Backspace));
        assert_eq!(recognized_final_token("стоп"), Some(Button::Mic));
    }

    #[test]
    fn unknown_or_empty() {
        assert_eq!(recognized_final_token(""), None);
        assert_eq!(recognized_final_token("   "), None);
        assert_eq!(recognized_final_token("два привет"), None);
    }
}
