use serde_derive::Deserialize;

use crate::chart::DEFAULT_PARSE_LIMIT;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CheckConfig {
    #[serde(default)]
    pub grammar: GrammarConfig,

    #[serde(default)]
    pub sentences: SentenceConfig,

    #[serde(default)]
    pub parser: ParserConfig,

    /// Input file for the token and entity passes; both are skipped when
    /// this section is absent.
    #[serde(default)]
    pub tokens: Option<TokenConfig>,
}

/// Path to a grammar rule file. Without one the embedded toy English
/// grammar is used.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct GrammarConfig {
    #[serde(default)]
    pub path: Option<String>,
}

/// Path to a file with one sentence per line. Without one the built-in
/// exercise sentences are checked.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct SentenceConfig {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_parse_limit")]
    pub parse_limit: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            parse_limit: default_parse_limit(),
        }
    }
}

fn default_parse_limit() -> usize {
    DEFAULT_PARSE_LIMIT
}

#[derive(Clone, Debug, Deserialize)]
pub struct TokenConfig {
    pub path: String,
}

pub enum ConfigReadError {
    ReadError(std::io::Error),
    ParseError(toml::de::Error),
}

pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> Result<CheckConfig, ConfigReadError> {
    let config = std::fs::read_to_string(path).map_err(ConfigReadError::ReadError)?;

    toml::from_str::<CheckConfig>(&config).map_err(ConfigReadError::ParseError)
}

/// Loads the optional config file. Only a genuinely absent file falls back
/// to the defaults; a file that exists but cannot be read stays an error.
pub fn load_optional_config<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<CheckConfig, ConfigReadError> {
    match load_config(path) {
        Err(ConfigReadError::ReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(CheckConfig::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: CheckConfig = toml::from_str("").unwrap();

        assert!(config.grammar.path.is_none());
        assert!(config.sentences.path.is_none());
        assert!(config.tokens.is_none());
        assert_eq!(config.parser.parse_limit, DEFAULT_PARSE_LIMIT);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = match load_optional_config("definitely/not/here/check.toml") {
            Ok(config) => config,
            Err(_) => panic!("a missing file should fall back to defaults"),
        };

        assert!(config.grammar.path.is_none());
        assert!(config.tokens.is_none());
    }

    #[test]
    fn unreadable_config_path_stays_an_error() {
        // a directory is present but unreadable as a file; it must not be
        // mistaken for a missing config
        assert!(load_optional_config("src").is_err());
    }

    #[test]
    fn sections_override_defaults() {
        let text = "
            [grammar]
            path = \"grammars/toy_english.fcfg\"

            [parser]
            parse_limit = 5

            [tokens]
            path = \"nlmaps.tsv\"
        ";
        let config: CheckConfig = toml::from_str(text).unwrap();

        assert_eq!(
            config.grammar.path.as_deref(),
            Some("grammars/toy_english.fcfg")
        );
        assert_eq!(config.parser.parse_limit, 5);
        assert_eq!(config.tokens.unwrap().path, "nlmaps.tsv");
    }
}
