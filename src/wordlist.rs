use std::sync::OnceLock;

const EMBEDDED_WORDS: &str = include_str!("../assets/wordlist.txt");

static WORDS: OnceLock<Vec<String>> = OnceLock::new();

/// Embedded dictionary, parsed on first use.
pub(crate) fn words() -> &'static [String] {
    WORDS.get_or_init(|| parse_words(EMBEDDED_WORDS))
}

fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
