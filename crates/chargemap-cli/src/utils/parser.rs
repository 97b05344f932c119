use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Preprocessor symbol cannot be empty.")]
    EmptySymbol,

    #[error("Invalid preprocessor symbol '{0}'. Values (e.g., 'POSRES=1') are not supported.")]
    SymbolWithValue(String),

    #[error("Invalid preprocessor symbol '{0}'. Symbols cannot contain whitespace.")]
    SymbolWithWhitespace(String),
}

/// Parses a preprocessor symbol given as `POSRES` or in the GROMACS `-DPOSRES` spelling.
pub fn parse_define(s: &str) -> Result<String, ParseError> {
    let symbol = s.trim();
    let symbol = symbol.strip_prefix("-D").unwrap_or(symbol);

    if symbol.is_empty() {
        return Err(ParseError::EmptySymbol);
    }
    if symbol.contains('=') {
        return Err(ParseError::SymbolWithValue(symbol.to_string()));
    }
    if symbol.contains(char::is_whitespace) {
        return Err(ParseError::SymbolWithWhitespace(symbol.to_string()));
    }
    Ok(symbol.to_string())
}
