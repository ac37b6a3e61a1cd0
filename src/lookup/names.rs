//! District-name normalization shared by the irregular table builder and the
//! codec's name path.

use std::sync::LazyLock;

use regex::{Captures, Regex};

const TENS: [&str; 10] = ["", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety"];

const ORDINAL_ONES: [&str; 10] = [
    "", "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
];
const ORDINAL_TEENS: [&str; 10] = [
    "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth",
    "fifteenth", "sixteenth", "seventeenth", "eighteenth", "nineteenth",
];
const ORDINAL_TENS: [&str; 10] = [
    "", "", "twentieth", "thirtieth", "fortieth", "fiftieth", "sixtieth", "seventieth", "eightieth", "ninetieth",
];

static CHAMBER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(state|house|senate|district)\b").unwrap());
static NUMERAL_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)(st|nd|rd|th)\b").unwrap());
static COMPOUND_ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b({})[-\s]({})\b",
        TENS[2..].join("|"),
        ORDINAL_ONES[1..].join("|"),
    )).unwrap()
});
static WORD_ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = ORDINAL_ONES[1..].iter()
        .chain(ORDINAL_TEENS.iter())
        .chain(ORDINAL_TENS[2..].iter())
        .copied()
        .collect();
    Regex::new(&format!(r"\b({})\b", words.join("|"))).unwrap()
});

fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn numeral_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn ordinal_word_value(word: &str) -> Option<u32> {
    let find = |table: &[&str], word: &str| table.iter().position(|w| !w.is_empty() && *w == word);
    if let Some(i) = find(&ORDINAL_ONES[..], word) { return Some(i as u32) }
    if let Some(i) = find(&ORDINAL_TEENS[..], word) { return Some(10 + i as u32) }
    find(&ORDINAL_TENS[..], word).map(|i| 10 * i as u32)
}

/// Spells out `n` as an ordinal ("21" -> "twenty-first"). Only 1..=99.
fn ordinal_words(n: u32) -> Option<String> {
    match n {
        1..=9 => Some(ORDINAL_ONES[n as usize].to_string()),
        10..=19 => Some(ORDINAL_TEENS[n as usize - 10].to_string()),
        20..=99 if n % 10 == 0 => Some(ORDINAL_TENS[n as usize / 10].to_string()),
        21..=99 => Some(format!("{}-{}", TENS[n as usize / 10], ORDINAL_ONES[n as usize % 10])),
        _ => None,
    }
}

/// "second" -> "2nd", "twenty-first" -> "21st".
fn ordinal_words_to_numerals(name: &str) -> String {
    let name = COMPOUND_ORDINAL.replace_all(name, |caps: &Captures| {
        let tens = TENS.iter().position(|w| *w == &caps[1]).unwrap_or(0) as u32;
        let ones = ordinal_word_value(&caps[2]).unwrap_or(0);
        let n = tens * 10 + ones;
        format!("{n}{}", numeral_suffix(n))
    });
    WORD_ORDINAL.replace_all(&name, |caps: &Captures| match ordinal_word_value(&caps[1]) {
        Some(n) => format!("{n}{}", numeral_suffix(n)),
        None => caps[0].to_string(),
    }).into_owned()
}

/// "2nd" -> "second", "21st" -> "twenty-first". Numbers past 99 are left alone.
fn ordinal_numerals_to_words(name: &str) -> String {
    NUMERAL_ORDINAL.replace_all(name, |caps: &Captures| {
        caps[1].parse::<u32>().ok()
            .and_then(ordinal_words)
            .unwrap_or_else(|| caps[0].to_string())
    }).into_owned()
}

fn strip_chamber_words(name: &str) -> String {
    CHAMBER_WORDS.replace_all(name, "").into_owned()
}

fn transliterate(name: &str) -> String {
    deunicode::deunicode(name).to_lowercase()
}

/// Returns every accepted spelling of a district name. The first entry is the
/// plain lower-cased name; the rest apply each applicable cleanup (ASCII
/// transliteration, chamber-word removal, ordinal words to numerals and back)
/// in every combination. Never empty, never fails.
pub fn name_variants(raw: &str) -> Vec<String> {
    let name = collapse_whitespace(&raw.to_lowercase());

    let mut steps: Vec<fn(&str) -> String> = Vec::new();
    if !name.is_ascii() {
        steps.push(transliterate);
    }
    if CHAMBER_WORDS.is_match(&name) {
        steps.push(strip_chamber_words);
    }
    if ordinal_words_to_numerals(&name) != name {
        steps.push(ordinal_words_to_numerals);
    }
    if ordinal_numerals_to_words(&name) != name {
        steps.push(ordinal_numerals_to_words);
    }

    let mut variants = vec![name];
    for step in steps {
        let applied: Vec<String> = variants.iter()
            .map(|v| collapse_whitespace(&step(v)))
            .collect();
        variants.extend(applied);
    }

    let mut seen = ahash::AHashSet::new();
    variants.retain(|v| !v.is_empty() && seen.insert(v.clone()));
    if variants.is_empty() {
        variants.push(String::new());
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_comes_first() {
        let variants = name_variants("  Barnstable  ");
        assert_eq!(variants, vec!["barnstable".to_string()]);
    }

    #[test]
    fn ordinals_convert_both_ways() {
        let variants = name_variants("Second Essex");
        assert_eq!(variants[0], "second essex");
        assert!(variants.contains(&"2nd essex".to_string()));

        let variants = name_variants("2nd Essex");
        assert!(variants.contains(&"second essex".to_string()));

        let variants = name_variants("Twenty-First Middlesex");
        assert!(variants.contains(&"21st middlesex".to_string()));
        assert!(name_variants("21st Middlesex").contains(&"twenty-first middlesex".to_string()));
    }

    #[test]
    fn teens_are_not_clobbered_by_ones() {
        assert_eq!(ordinal_words_to_numerals("eighteenth suffolk"), "18th suffolk");
        assert_eq!(ordinal_words_to_numerals("fourteenth worcester"), "14th worcester");
        assert_eq!(ordinal_numerals_to_words("11th hampden"), "eleventh hampden");
        assert_eq!(ordinal_numerals_to_words("112th"), "112th");
    }

    #[test]
    fn chamber_words_are_optional() {
        let variants = name_variants("State Senate District Bristol and Plymouth");
        assert!(variants.contains(&"state senate district bristol and plymouth".to_string()));
        assert!(variants.contains(&"bristol and plymouth".to_string()));
    }

    #[test]
    fn non_ascii_names_are_transliterated() {
        let variants = name_variants("Ñorth Pólk");
        assert_eq!(variants[0], "ñorth pólk");
        assert!(variants.contains(&"north polk".to_string()));
    }

    #[test]
    fn combinations_are_complete_and_deterministic() {
        let a = name_variants("First Senate District");
        let b = name_variants("First Senate District");
        assert_eq!(a, b);
        for expected in ["first senate district", "first", "1st senate district", "1st"] {
            assert!(a.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn total_on_odd_input() {
        for raw in ["", "   ", "district", "0th", "999999999999999999999th", "—"] {
            assert!(!name_variants(raw).is_empty());
        }
    }
}
