use crate::config::TokenizerConfig;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        // Apostrophes split tokens, so contractions are listed by their fragments.
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "d","did","do","does","doing","don","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","isn","it","its","itself",
            "ll","m","me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "re","s","same","she","should","so","some","such",
            "t","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","won","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Split text into terms on non-alphanumeric boundaries.
///
/// With the default config this only lowercases and NFKC-normalizes; stopword
/// removal and stemming are applied only when switched on.
pub fn tokenize(text: &str, config: &TokenizerConfig) -> Vec<String> {
    let mut normalized = if config.unicode_normalize { text.nfkc().collect::<String>() } else { text.to_string() };
    if config.lowercase {
        normalized = normalized.to_lowercase();
    }
    let mut tokens = Vec::new();
    for mat in RE.find_iter(&normalized) {
        let token = mat.as_str();
        if token.chars().count() < config.min_token_len { continue; }
        if config.remove_stopwords && is_stopword(&token.to_lowercase()) { continue; }
        let term = if config.stem { STEMMER.stem(token).into_owned() } else { token.to_string() };
        tokens.push(term);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Python/SQL, C++ & Rust!", &TokenizerConfig::default());
        assert_eq!(t, vec!["python", "sql", "c", "rust"]);
    }

    #[test]
    fn stemming_is_opt_in() {
        let cfg = TokenizerConfig { stem: true, ..TokenizerConfig::default() };
        let t = tokenize("Running, runner's run!", &cfg);
        assert!(t.iter().any(|w| w == "run"));
        let plain = tokenize("Running", &TokenizerConfig::default());
        assert_eq!(plain, vec!["running"]);
    }
}
