//! Letter-to-number tables for the two Western systems and the Devanagari
//! script, plus vowel/consonant classification.

use serde::{Deserialize, Serialize};

/// Which Western letter-value table to use. The Devanagari table is always
/// consulted as a fallback regardless of this choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterSystem {
    /// A-Z assigned 1-9 cyclically by alphabet position.
    Pythagorean,
    /// The older Babylonian table; only 1-8 are assigned, 9 is never used.
    Chaldean,
}

impl LetterSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            LetterSystem::Pythagorean => "pythagorean",
            LetterSystem::Chaldean => "chaldean",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pythagorean" => Some(LetterSystem::Pythagorean),
            "chaldean" => Some(LetterSystem::Chaldean),
            _ => None,
        }
    }
}

/// One character's contribution to a summed number, kept for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterBreakdown {
    pub letter: char,
    pub value: u32,
}

/// Value of a Latin letter in the selected Western table. Case-insensitive;
/// None for anything outside A-Z.
pub fn western_value(system: LetterSystem, ch: char) -> Option<u32> {
    let ch = ch.to_ascii_uppercase();
    match system {
        LetterSystem::Pythagorean => pythagorean_value(ch),
        LetterSystem::Chaldean => chaldean_value(ch),
    }
}

fn pythagorean_value(ch: char) -> Option<u32> {
    match ch {
        'A' | 'J' | 'S' => Some(1),
        'B' | 'K' | 'T' => Some(2),
        'C' | 'L' | 'U' => Some(3),
        'D' | 'M' | 'V' => Some(4),
        'E' | 'N' | 'W' => Some(5),
        'F' | 'O' | 'X' => Some(6),
        'G' | 'P' | 'Y' => Some(7),
        'H' | 'Q' | 'Z' => Some(8),
        'I' | 'R' => Some(9),
        _ => None,
    }
}

fn chaldean_value(ch: char) -> Option<u32> {
    match ch {
        'A' | 'I' | 'J' | 'Q' | 'Y' => Some(1),
        'B' | 'K' | 'R' => Some(2),
        'C' | 'G' | 'L' | 'S' => Some(3),
        'D' | 'M' | 'T' => Some(4),
        'E' | 'H' | 'N' | 'X' => Some(5),
        'U' | 'V' | 'W' => Some(6),
        'O' | 'Z' => Some(7),
        'F' | 'P' => Some(8),
        _ => None,
    }
}

/// Value of a Devanagari character per the traditional varga table.
/// Covers consonants, independent vowels, matras, and the nasal marks.
pub fn devanagari_value(ch: char) -> Option<u32> {
    match ch {
        // ka varga
        'क' => Some(1),
        'ख' => Some(2),
        'ग' => Some(3),
        'घ' => Some(4),
        'ङ' => Some(5),
        // cha varga
        'च' => Some(6),
        'छ' => Some(7),
        'ज' => Some(8),
        'झ' => Some(9),
        'ञ' => Some(1),
        // ta varga (retroflex)
        'ट' => Some(2),
        'ठ' => Some(3),
        'ड' => Some(4),
        'ढ' => Some(5),
        'ण' => Some(6),
        // ta varga (dental)
        'त' => Some(7),
        'थ' => Some(8),
        'द' => Some(9),
        'ध' => Some(1),
        'न' => Some(2),
        // pa varga
        'प' => Some(3),
        'फ' => Some(4),
        'ब' => Some(5),
        'भ' => Some(6),
        'म' => Some(7),
        // antastha
        'य' => Some(8),
        'र' => Some(9),
        'ल' => Some(1),
        'व' => Some(2),
        // ushma
        'श' => Some(3),
        'ष' => Some(4),
        'स' => Some(5),
        'ह' => Some(6),
        // independent vowels
        'अ' => Some(1),
        'आ' => Some(2),
        'इ' => Some(3),
        'ई' => Some(4),
        'उ' => Some(5),
        'ऊ' => Some(6),
        'ऋ' => Some(7),
        'ए' => Some(8),
        'ऐ' => Some(9),
        'ओ' => Some(1),
        'औ' => Some(2),
        // matras
        'ा' => Some(2),
        'ि' => Some(3),
        'ी' => Some(4),
        'ु' => Some(5),
        'ू' => Some(6),
        'ृ' => Some(7),
        'े' => Some(8),
        'ै' => Some(9),
        'ो' => Some(1),
        'ौ' => Some(2),
        // anusvara, visarga, candrabindu
        'ं' => Some(3),
        'ः' => Some(4),
        'ँ' => Some(5),
        _ => None,
    }
}

/// Value of any supported character: the active Western table first, then
/// the Devanagari table. None means the character does not participate.
pub fn value_of(ch: char, system: LetterSystem) -> Option<u32> {
    western_value(system, ch).or_else(|| devanagari_value(ch))
}

/// Latin vowels (Y counts as a consonant here, as in the classic tables).
pub fn is_western_vowel(ch: char) -> bool {
    matches!(ch.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U')
}

pub fn is_western_consonant(ch: char) -> bool {
    ch.is_ascii_alphabetic() && !is_western_vowel(ch)
}

/// Devanagari independent vowels and matras.
pub fn is_devanagari_vowel(ch: char) -> bool {
    matches!(
        ch,
        'अ' | 'आ' | 'इ' | 'ई' | 'उ' | 'ऊ' | 'ऋ' | 'ए' | 'ऐ' | 'ओ' | 'औ'
            | 'ा' | 'ि' | 'ी' | 'ु' | 'ू' | 'ृ' | 'े' | 'ै' | 'ो' | 'ौ'
    )
}

/// Devanagari base consonants.
pub fn is_devanagari_consonant(ch: char) -> bool {
    matches!(
        ch,
        'क' | 'ख' | 'ग' | 'घ' | 'ङ'
            | 'च' | 'छ' | 'ज' | 'झ' | 'ञ'
            | 'ट' | 'ठ' | 'ड' | 'ढ' | 'ण'
            | 'त' | 'थ' | 'द' | 'ध' | 'न'
            | 'प' | 'फ' | 'ब' | 'भ' | 'म'
            | 'य' | 'र' | 'ल' | 'व'
            | 'श' | 'ष' | 'स' | 'ह'
    )
}

/// Vowel in either script.
pub fn is_vowel(ch: char) -> bool {
    is_western_vowel(ch) || is_devanagari_vowel(ch)
}

/// Consonant in either script. Devanagari matras overlap the vowel set, so
/// the consonant test explicitly excludes vowels.
pub fn is_consonant(ch: char) -> bool {
    is_western_consonant(ch) || (is_devanagari_consonant(ch) && !is_devanagari_vowel(ch))
}
