//! Text normalization shared by training and inference.
//!
//! Cleaning lowercases the text, strips URLs and everything that is not an ASCII letter, removes
//! English stopwords and lemmatizes what remains. It never fails: any input yields a (possibly
//! empty) string of lemmas separated by single spaces.

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::{lemmatizer::lemmatize, stopwords::is_stopword};

lazy_static! {
    static ref URL: Regex = Regex::new(r"http\S+|www\.\S+").unwrap();
    static ref NON_LETTER: Regex = Regex::new(r"[^a-z\s]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Clean raw text into space separated lemmas
pub fn clean_text(raw: &str) -> String {
    let text = raw.to_lowercase();
    let text = URL.replace_all(&text, " ");
    let text = NON_LETTER.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");

    text.split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}
