use md5::{Digest, Md5};
use thiserror::Error;

/// Number of hex digits of the digest that seed the word selection.
const SEED_HEX_DIGITS: usize = 15;

pub(crate) const DEFAULT_WORD_COUNT: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MnemonicError {
    #[error("word count must be greater than 0")]
    InvalidWordCount,
    #[error("dictionary is empty")]
    EmptyDictionary,
    #[error("failed to derive seed from hash '{0}'")]
    Seed(String),
}

/// Derives a CamelCase name from `secret` by hashing it and walking the
/// dictionary with the resulting seed. Same inputs always give the same name.
///
/// The seed is not refreshed: once it has been divided down to zero every
/// further word is `dictionary[0]`.
pub(crate) fn generate_mnemonic(
    secret: &str,
    word_count: usize,
    dictionary: &[String],
) -> Result<String, MnemonicError> {
    if word_count == 0 {
        return Err(MnemonicError::InvalidWordCount);
    }
    if dictionary.is_empty() {
        return Err(MnemonicError::EmptyDictionary);
    }

    let hex = hex::encode(Md5::digest(secret.as_bytes()));
    let Some(prefix) = hex.get(..SEED_HEX_DIGITS) else {
        return Err(MnemonicError::Seed(hex));
    };
    let seed = u64::from_str_radix(prefix, 16).map_err(|_| MnemonicError::Seed(hex.clone()))?;

    let size = dictionary.len() as u64;
    let mut current = seed;
    let mut name = String::new();
    for _ in 0..word_count {
        let word = &dictionary[(current % size) as usize];
        name.push_str(&capitalize(word));
        current /= size;
    }
    Ok(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name used when no mnemonic can be derived.
pub(crate) fn fallback_name(key: &str) -> String {
    format!("GsConn-{}", crate::model::key_preview(key, 8))
}
