mod parse;
mod validate;

pub use parse::Grammar;
pub use parse::Production;
pub use parse::Symbol;
pub use parse::Term;

/// The feature grammar from the coursework exercise, extended with the
/// number and location agreement the sentence list calls for.
pub const TOY_ENGLISH: &str = include_str!("../../grammars/toy_english.fcfg");

pub fn parse_grammar(content: &str) -> Result<Grammar, anyhow::Error> {
    let parsed = parse::parse_text(content)?;

    validate::validate_grammar(&parsed)?;
    Ok(parsed)
}
