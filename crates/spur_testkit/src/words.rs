//! English number-word codec.
//!
//! Spells unsigned integers below one billion as English words
//! ("ninety nine", "one thousand two hundred thirty four") and encodes
//! the spelling one byte per word, where each byte is the word's
//! alphabetical rank in the vocabulary. Encoded values therefore compare
//! exactly like the spelled-out text, which makes them useful as
//! secondary index keys that sort differently from the numeric value.

use spur_core::{Error, Result};

/// Every word the codec can emit, in ascending alphabetical order. A
/// word's encoded byte is its position here plus one; zero is reserved
/// for key padding.
const VOCAB: [&str; 31] = [
    "eight",
    "eighteen",
    "eighty",
    "eleven",
    "fifteen",
    "fifty",
    "five",
    "forty",
    "four",
    "fourteen",
    "hundred",
    "million",
    "nine",
    "nineteen",
    "ninety",
    "one",
    "seven",
    "seventeen",
    "seventy",
    "six",
    "sixteen",
    "sixty",
    "ten",
    "thirteen",
    "thirty",
    "thousand",
    "three",
    "twelve",
    "twenty",
    "two",
    "zero",
];

const SMALL: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 8] = [
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Appends the words for a value in 1..=999.
fn push_group(out: &mut Vec<&'static str>, value: u32) {
    let mut value = value;
    if value >= 100 {
        out.push(SMALL[(value / 100) as usize]);
        out.push("hundred");
        value %= 100;
    }
    if value >= 20 {
        out.push(TENS[(value / 10 - 2) as usize]);
        value %= 10;
        if value > 0 {
            out.push(SMALL[value as usize]);
        }
    } else if value > 0 {
        out.push(SMALL[value as usize]);
    }
}

/// Spells a value as words, or `None` above the supported range.
fn spell(value: u32) -> Option<Vec<&'static str>> {
    if value >= 1_000_000_000 {
        return None;
    }
    if value == 0 {
        return Some(vec!["zero"]);
    }
    let mut out = Vec::new();
    let millions = value / 1_000_000;
    let thousands = (value / 1_000) % 1_000;
    let rest = value % 1_000;
    if millions > 0 {
        push_group(&mut out, millions);
        out.push("million");
    }
    if thousands > 0 {
        push_group(&mut out, thousands);
        out.push("thousand");
    }
    if rest > 0 {
        push_group(&mut out, rest);
    }
    Some(out)
}

/// Returns the English spelling of `value`, or its decimal digits above
/// the supported range.
#[must_use]
pub fn quantity(value: u32) -> String {
    match spell(value) {
        Some(words) => words.join(" "),
        None => value.to_string(),
    }
}

/// Encodes `value` as one rank byte per word of its English spelling.
pub fn encode(value: u32) -> Result<Vec<u8>> {
    let words = spell(value)
        .ok_or_else(|| Error::record(format!("{value} exceeds the spellable range")))?;
    Ok(words
        .iter()
        .map(|word| {
            // spell() only emits vocabulary words.
            let rank = VOCAB.binary_search(word).unwrap();
            rank as u8 + 1
        })
        .collect())
}

/// Decodes rank bytes back to their spelled-out form, skipping padding.
#[must_use]
pub fn decode(encoded: &[u8]) -> String {
    encoded
        .iter()
        .filter(|&&rank| rank != 0)
        .map(|&rank| VOCAB.get(rank as usize - 1).copied().unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(" ")
}
