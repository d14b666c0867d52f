//! Parser for type tag text.
//!
//! Grammar:
//!
//! ```text
//! union  := branch (',' branch)*
//! branch := '#' method
//!         | name ( '<' param (',' param)* '>' | '{' union '=>' union '}' )?
//! param  := branch ('|' branch)*
//! ```
//!
//! `|` is accepted as an alternative union separator at the top level.

use crate::{ComplexType, Parameters, UniqueType};

/// A tag that could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TypeParseError {
    #[error("empty type tag")]
    Empty,
    #[error("unexpected `{found}` at offset {offset} in type tag")]
    Unexpected { found: char, offset: usize },
    #[error("unclosed `{open}` in type tag")]
    Unclosed { open: char },
}

pub(crate) fn parse(text: &str) -> Result<ComplexType, TypeParseError> {
    let mut parser = Parser {
        chars: text.char_indices().collect(),
        pos: 0,
    };
    let result = parser.union()?;
    parser.skip_ws();
    match parser.peek() {
        None => Ok(result),
        Some((offset, found)) => Err(TypeParseError::Unexpected { found, offset }),
    }
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if matches!(self.peek(), Some((_, c)) if c == expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_arrow(&mut self) -> bool {
        self.skip_ws();
        let arrow = matches!(
            (self.chars.get(self.pos), self.chars.get(self.pos + 1)),
            (Some((_, '=')), Some((_, '>')))
        );
        if arrow {
            self.pos += 2;
        }
        arrow
    }

    fn union(&mut self) -> Result<ComplexType, TypeParseError> {
        let mut result = ComplexType::from(self.branch()?);
        while self.eat(',') || self.eat('|') {
            result = result | ComplexType::from(self.branch()?);
        }
        Ok(result)
    }

    fn branch(&mut self) -> Result<UniqueType, TypeParseError> {
        self.skip_ws();
        let name = self.name()?;
        if name.starts_with('#') {
            return Ok(UniqueType::new(name));
        }
        if self.eat('<') {
            self.skip_ws();
            if matches!(self.peek(), Some((_, '>'))) {
                return Err(self.unexpected_or_unclosed('<'));
            }
            let mut params = vec![self.parameter()?];
            while self.eat(',') {
                params.push(self.parameter()?);
            }
            if !self.eat('>') {
                return Err(self.unexpected_or_unclosed('<'));
            }
            return Ok(UniqueType::with_parameters(name, Parameters::List(params)));
        }
        if self.eat('{') {
            let key = self.union()?;
            if !self.eat_arrow() {
                return Err(self.unexpected_or_unclosed('{'));
            }
            let value = self.union()?;
            if !self.eat('}') {
                return Err(TypeParseError::Unclosed { open: '{' });
            }
            return Ok(UniqueType::with_parameters(
                name,
                Parameters::Hash { key, value },
            ));
        }
        Ok(UniqueType::new(name))
    }

    /// Inside `<>` a comma separates parameters, so a parameter is a union
    /// joined only by `|`: `Hash<Symbol, String | nil>`.
    fn parameter(&mut self) -> Result<ComplexType, TypeParseError> {
        let mut result = ComplexType::from(self.branch()?);
        while self.eat('|') {
            result = result | ComplexType::from(self.branch()?);
        }
        Ok(result)
    }

    fn name(&mut self) -> Result<String, TypeParseError> {
        let start = self.pos;
        let duck = matches!(self.peek(), Some((_, '#')));
        if duck {
            self.bump();
        }
        while let Some((_, c)) = self.peek() {
            let accepted = c.is_alphanumeric()
                || matches!(c, '_' | ':')
                || (duck && matches!(c, '?' | '!' | '[' | ']' | '+' | '-' | '*' | '/'));
            if !accepted {
                break;
            }
            self.bump();
        }
        let name: String = self.chars[start..self.pos].iter().map(|(_, c)| c).collect();
        if name.is_empty() || name == "#" {
            return Err(self.unexpected_or_empty());
        }
        Ok(name)
    }

    fn unexpected_or_empty(&self) -> TypeParseError {
        match self.peek() {
            Some((offset, found)) => TypeParseError::Unexpected { found, offset },
            None => TypeParseError::Empty,
        }
    }

    fn unexpected_or_unclosed(&self, open: char) -> TypeParseError {
        match self.peek() {
            Some((offset, found)) => TypeParseError::Unexpected { found, offset },
            None => TypeParseError::Unclosed { open },
        }
    }
}
