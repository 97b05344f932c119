const COMMENT_CHAR: char = ';';
const ATOMS_SECTION: &str = "atoms";

/// The raw columns of an `[ atoms ]` record that are consumed. The record also needs a
/// numeric first column, which is checked but not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomFields<'a> {
    pub residue_name: &'a str,
    pub atom_name: &'a str,
    pub charge: &'a str,
}

/// A single topology line, classified by shape alone.
///
/// Classification is context free: whether an [`TopologyLine::Atom`] line is really an atom
/// record depends on the enclosing section, which is tracked by
/// [`ParserState`](super::state::ParserState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyLine<'a> {
    IfDef(&'a str),
    IfNDef(&'a str),
    Else,
    EndIf,
    Include(&'a str),
    Section(&'a str),
    Atom(AtomFields<'a>),
    Other,
}

impl<'a> TopologyLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        let content = strip_comment(line).trim();
        if content.is_empty() {
            return Self::Other;
        }

        if let Some(name) = section_name(content) {
            return Self::Section(name);
        }

        let tokens: Vec<&str> = content.split_whitespace().collect();
        match tokens[..] {
            ["#ifdef", symbol, ..] => Self::IfDef(symbol),
            ["#ifndef", symbol, ..] => Self::IfNDef(symbol),
            ["#else", ..] => Self::Else,
            ["#endif", ..] => Self::EndIf,
            ["#include", path, ..] => Self::Include(unwrap_include_path(path)),
            [index, _, _, residue_name, atom_name, _, charge, ..] if is_atom_index(index) => {
                Self::Atom(AtomFields {
                    residue_name,
                    atom_name,
                    charge,
                })
            }
            _ => Self::Other,
        }
    }

    pub fn is_atoms_section(&self) -> bool {
        matches!(self, Self::Section(name) if *name == ATOMS_SECTION)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_CHAR) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

// Accepts both `[ atoms ]` and the compact `[atoms]`.
fn section_name(content: &str) -> Option<&str> {
    let inner = content.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() || inner.contains(char::is_whitespace) {
        return None;
    }
    Some(inner)
}

fn unwrap_include_path(token: &str) -> &str {
    let delimited = move |open: char, close: char| {
        token
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
    };
    delimited('"', '"')
        .or_else(|| delimited('<', '>'))
        .unwrap_or(token)
}

fn is_atom_index(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
