//! Token pipeline over a plain-text (tab-separated) input file: tokenize,
//! upper-case, strip punctuation, keep alphabetic tokens, drop stop words.

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read input file: {0}")]
    Read(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    Punctuation,
}

#[derive(Clone, Debug)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    fn new(text: String, kind: TokenKind) -> Self {
        Token { text, kind }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Splits text into word, number and punctuation tokens. Apostrophes and
/// hyphens inside a word stick to it (`don't`, `mother-in-law`); whitespace
/// is dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }

        if ch.is_alphabetic() {
            let mut word = String::from(ch);
            while let Some(&next) = chars.peek() {
                if next.is_alphabetic() || next == '\'' || next == '-' {
                    word.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::new(word, TokenKind::Word));
        } else if ch.is_numeric() {
            let mut number = String::from(ch);
            while let Some(&next) = chars.peek() {
                if next.is_numeric() || next == '.' || next == ',' {
                    number.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::new(number, TokenKind::Number));
        } else {
            tokens.push(Token::new(ch.to_string(), TokenKind::Punctuation));
        }
    }

    tokens
}

// English stop-word list of the corpus the original coursework filtered
// against.
const STOP_WORD_LIST: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = STOP_WORD_LIST.iter().copied().collect();
}

/// Case-insensitive stop-word lookup.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word.to_lowercase().as_str())
}

/// The filter chain of the original script, in its order: keep word tokens,
/// upper-case them, strip any punctuation left inside a word, keep purely
/// alphabetic results, drop stop words.
pub fn content_words(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(Token::is_word)
        .map(|token| {
            token
                .text
                .to_uppercase()
                .chars()
                .filter(|c| *c != '\'' && *c != '-')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
        .filter(|word| !is_stop_word(word))
        .collect()
}

pub fn run_pipeline<P: AsRef<Path>>(path: P) -> Result<Vec<String>, PipelineError> {
    let text = std::fs::read_to_string(path)?;
    Ok(content_words(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_words_and_punctuation() {
        let tokens = tokenize("Where is the nearest bank?");

        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[0].text, "Where");
        assert!(tokens[0].is_word());
        assert_eq!(tokens[5].text, "?");
        assert_eq!(tokens[5].kind, TokenKind::Punctuation);
    }

    #[test]
    fn tokenize_keeps_inner_apostrophes_and_numbers() {
        let tokens = tokenize("don't stop at 42");

        assert_eq!(tokens[0].text, "don't");
        assert_eq!(tokens[3].text, "42");
        assert_eq!(tokens[3].kind, TokenKind::Number);
    }

    #[test]
    fn content_words_uppercase_and_drop_stop_words() {
        let words = content_words("Where is the nearest bank in Paris?");

        assert_eq!(words, vec!["NEAREST", "BANK", "PARIS"]);
    }

    #[test]
    fn content_words_strip_punctuation_inside_words() {
        assert_eq!(content_words("a well-known fact about them"), vec!["WELLKNOWN", "FACT"]);
    }

    #[test]
    fn numbers_and_bare_punctuation_never_survive() {
        assert!(content_words("42 , ; 1000").is_empty());
    }

    #[test]
    fn stop_word_lookup_ignores_case() {
        assert!(is_stop_word("THE"));
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("garden"));
    }
}
