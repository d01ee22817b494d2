// src/morse.rs
// Text to Morse token mapping and the symbol timeline consumed by the renderer

use phf::phf_map;

static MORSE_TABLE: phf::Map<char, &'static str> = phf_map! {
    'A' => ".-",
    'B' => "-...",
    'C' => "-.-.",
    'D' => "-..",
    'E' => ".",
    'F' => "..-.",
    'G' => "--.",
    'H' => "....",
    'I' => "..",
    'J' => ".---",
    'K' => "-.-",
    'L' => ".-..",
    'M' => "--",
    'N' => "-.",
    'O' => "---",
    'P' => ".--.",
    'Q' => "--.-",
    'R' => ".-.",
    'S' => "...",
    'T' => "-",
    'U' => "..-",
    'V' => "...-",
    'W' => ".--",
    'X' => "-..-",
    'Y' => "-.--",
    'Z' => "--..",
    '1' => ".----",
    '2' => "..---",
    '3' => "...--",
    '4' => "....-",
    '5' => ".....",
    '6' => "-....",
    '7' => "--...",
    '8' => "---..",
    '9' => "----.",
    '0' => "-----",
    ',' => "--..--",
    '.' => ".-.-.-",
    '?' => "..--..",
    '/' => "-..-.",
    '-' => "-....-",
    '(' => "-.--.",
    ')' => "-.--.-",
    ' ' => "_",
};

/// Translate `text` into a Morse token string.
///
/// Each mapped character becomes one token (`.`/`-` runs, or `_` for a space)
/// and tokens are joined with a single space. Characters without a table
/// entry are dropped. `trailing_word_gaps` extra spaces are appended to the
/// text before translation so a looped playback pauses before repeating.
pub fn text_to_morse(text: &str, trailing_word_gaps: usize) -> String {
    let padded = format!("{}{}", text, " ".repeat(trailing_word_gaps));

    padded
        .chars()
        .filter_map(|ch| MORSE_TABLE.get(&ch.to_ascii_uppercase()).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorseSymbol {
    Dot,
    Dash,
    IntraCharacterGap,
    InterWordGap,
}

impl MorseSymbol {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(MorseSymbol::Dot),
            '-' => Some(MorseSymbol::Dash),
            ' ' => Some(MorseSymbol::IntraCharacterGap),
            '_' => Some(MorseSymbol::InterWordGap),
            _ => None,
        }
    }

    /// Time this symbol occupies on the dit clock. Dots and dashes include
    /// their one-dit trailing gap.
    pub fn dit_cost(self) -> u64 {
        match self {
            MorseSymbol::Dot => 2,
            MorseSymbol::Dash => 4,
            MorseSymbol::IntraCharacterGap => 0,
            MorseSymbol::InterWordGap => 4,
        }
    }

    pub fn is_tone(self) -> bool {
        matches!(self, MorseSymbol::Dot | MorseSymbol::Dash)
    }
}

/// Tokenize a Morse string into symbols. The input is expected to come from
/// [`text_to_morse`]; characters outside `. - space _` are skipped.
pub fn from_morse_string(morse: &str) -> Vec<MorseSymbol> {
    morse
        .chars()
        .filter_map(|ch| {
            let symbol = MorseSymbol::from_char(ch);
            if symbol.is_none() {
                log::trace!("Skipping non-Morse character {:?}", ch);
            }
            symbol
        })
        .collect()
}

/// Total dit time of a symbol sequence.
pub fn total_dits(symbols: &[MorseSymbol]) -> u64 {
    symbols.iter().map(|s| s.dit_cost()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_morse_joins_tokens() {
        assert_eq!(text_to_morse("SOS", 0), "... --- ...");
        assert_eq!(text_to_morse("e t", 0), ". _ -");
    }

    #[test]
    fn test_text_to_morse_trailing_gaps() {
        assert_eq!(text_to_morse("A", 2), ".- _ _");
        assert_eq!(text_to_morse("", 2), "_ _");
        assert_eq!(text_to_morse("", 0), "");
    }

    #[test]
    fn test_unmapped_characters_dropped() {
        assert_eq!(text_to_morse("A#B", 0), ".- -...");
        assert_eq!(text_to_morse("@!", 0), "");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(text_to_morse("?", 0), "..--..");
        assert_eq!(text_to_morse("(x)", 0), "-.--. -..- -.--.-");
    }

    #[test]
    fn test_from_morse_string() {
        use MorseSymbol::*;
        assert_eq!(
            from_morse_string(".- _ -"),
            vec![
                Dot,
                Dash,
                IntraCharacterGap,
                InterWordGap,
                IntraCharacterGap,
                Dash
            ]
        );
        assert!(from_morse_string("").is_empty());
    }

    #[test]
    fn test_dit_costs() {
        let symbols = from_morse_string(".- _");
        // 2 + 4 + 0 + 4
        assert_eq!(total_dits(&symbols), 10);
        assert!(MorseSymbol::Dash.is_tone());
        assert!(!MorseSymbol::InterWordGap.is_tone());
    }
}
