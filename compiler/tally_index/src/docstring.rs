//! Structured documentation tags.
//!
//! Only the tags the checker consumes are recognised:
//!
//! ```text
//! @param name [String, nil] description
//! @param [String] name       (types-first form)
//! @return [Array<String>] description
//! @type [Integer]
//! @abstract
//! ```

/// The kind of a documentation tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TagKind {
    Param,
    Return,
    Type,
    Abstract,
}

impl TagKind {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "param" => Some(TagKind::Param),
            "return" => Some(TagKind::Return),
            "type" => Some(TagKind::Type),
            "abstract" => Some(TagKind::Abstract),
            _ => None,
        }
    }
}

/// A single documentation tag.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Tag {
    pub kind: TagKind,
    /// Parameter name for `@param` tags.
    pub name: Option<String>,
    /// Raw type strings from the bracketed list, split at top-level commas.
    pub types: Vec<String>,
}

impl Tag {
    /// The tag's type list as written, e.g. `String, nil`.
    pub fn tagged(&self) -> String {
        self.types.join(", ")
    }
}

/// The parsed documentation attached to a declaration.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Docstring {
    tags: Vec<Tag>,
}

impl Docstring {
    pub fn new(tags: Vec<Tag>) -> Self {
        Docstring { tags }
    }

    /// Parse comment text. Unknown tags and free text are ignored.
    pub fn parse(text: &str) -> Self {
        let tags = text
            .lines()
            .filter_map(|line| {
                let line = line.trim().trim_start_matches('#').trim();
                let rest = line.strip_prefix('@')?;
                let (keyword, rest) = split_word(rest);
                let kind = TagKind::from_keyword(keyword)?;
                Some(parse_tag(kind, rest))
            })
            .collect();
        Docstring { tags }
    }

    pub fn tags(&self, kind: TagKind) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(move |t| t.kind == kind)
    }

    pub fn has_tag(&self, kind: TagKind) -> bool {
        self.tags(kind).next().is_some()
    }

    /// The first `@return` tag.
    pub fn return_tag(&self) -> Option<&Tag> {
        self.tags(TagKind::Return).next()
    }

    /// The first `@type` tag.
    pub fn type_tag(&self) -> Option<&Tag> {
        self.tags(TagKind::Type).next()
    }

    /// The `@param` tag for `name`.
    pub fn param_tag(&self, name: &str) -> Option<&Tag> {
        self.tags(TagKind::Param)
            .find(|t| t.name.as_deref() == Some(name))
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(at) => (&text[..at], text[at..].trim_start()),
        None => (text, ""),
    }
}

fn parse_tag(kind: TagKind, rest: &str) -> Tag {
    let mut rest = rest.trim();
    let mut name = None;
    if kind == TagKind::Param && !rest.starts_with('[') {
        let (word, tail) = split_word(rest);
        if !word.is_empty() {
            name = Some(word.to_owned());
        }
        rest = tail;
    }
    let types = match bracketed(rest) {
        Some((inner, tail)) => {
            rest = tail;
            split_types(inner)
        }
        None => Vec::new(),
    };
    if kind == TagKind::Param && name.is_none() {
        let (word, _) = split_word(rest);
        if !word.is_empty() {
            name = Some(word.to_owned());
        }
    }
    Tag { kind, name, types }
}

/// Split `[inner] tail` into `inner` and `tail`, honouring nested brackets.
fn bracketed(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_prefix('[')?;
    let mut depth = 0usize;
    for (at, c) in body.char_indices() {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => return Some((&body[..at], body[at + 1..].trim_start())),
            ']' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn split_types(inner: &str) -> Vec<String> {
    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev = ' ';
    for (at, c) in inner.char_indices() {
        let arrow = prev == '=' && c == '>';
        prev = c;
        match c {
            '<' | '{' | '(' => depth += 1,
            '>' | '}' | ')' if !arrow => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                types.push(inner[start..at].trim().to_owned());
                start = at + 1;
            }
            _ => {}
        }
    }
    types.push(inner[start..].trim().to_owned());
    types.retain(|t| !t.is_empty());
    types
}

#[cfg(test)]
mod tests;
