//! Word list parsing.
//!
//! The source is a loose comma-delimited file: the first non-empty line is a
//! header and every other cell holds at most one word. Quoted cells are only
//! unwrapped, never unescaped, so a comma inside quotes still splits the cell.

use std::fmt;
use std::rc::Rc;

/// A single word token. Cheap to clone; the text is shared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word(Rc<str>);

impl Word {
    pub fn new(text: &str) -> Self {
        Self(Rc::from(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub fn parse_words(text: &str) -> Vec<Word> {
    text.split(|ch| ch == '\r' || ch == '\n')
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .flat_map(|line| line.split(','))
        .filter_map(clean_cell)
        .map(Word::new)
        .collect()
}

fn clean_cell(cell: &str) -> Option<&str> {
    let mut word = cell.trim();
    if word.len() >= 2 && word.starts_with('"') && word.ends_with('"') {
        word = &word[1..word.len() - 1];
    }
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}
