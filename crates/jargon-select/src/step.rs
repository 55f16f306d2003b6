//! Steps: the compound units a selector is made of, and how one step is
//! matched against one element.

use std::fmt;

use jargon_dom::{DomTree, ElementData, NodeId};

use crate::SelectorError;

/// The prefix that narrows an attribute step: `a[href]` or `.foo[href]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// `tag[...]`
    Tag(String),
    /// `.class[...]`
    Class(String),
}

impl Qualifier {
    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Tag(tag) => tag_matches(element, tag),
            Self::Class(class) => element.has_class(class),
        }
    }
}

/// `*` names every element; anything else compares ASCII case-insensitively.
fn tag_matches(element: &ElementData, tag: &str) -> bool {
    tag == "*" || element.has_tag_name(tag)
}

/// One compound selector unit.
///
/// Exactly one category per step; the tokenizer decides which once and
/// the candidate locator and matcher dispatch on the variant.
///
/// | text | step |
/// |------|------|
/// | `#main` | `Id("main")` |
/// | `.foo`, `div.foo` | `Class { tag, class }` |
/// | `[href]`, `a[href="x"]`, `.foo[data-x]` | `Attribute { qualifier, name, value }` |
/// | `div` | `Tag("div")` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Matches the element whose `id` attribute equals the literal.
    /// Never combined with other filters.
    Id(String),

    /// Matches elements carrying the class token, optionally restricted to
    /// one tag name.
    Class {
        /// Optional tag name (`div` in `div.foo`).
        tag: Option<String>,
        /// The class token (`foo` in `div.foo`).
        class: String,
    },

    /// Matches elements that have the attribute, optionally with an exact
    /// value, optionally narrowed by a tag or class qualifier.
    Attribute {
        /// `a` in `a[href]`, `.foo` in `.foo[href]`.
        qualifier: Option<Qualifier>,
        /// Attribute name.
        name: String,
        /// Required value, unquoted. `None` tests presence only.
        value: Option<String>,
    },

    /// Matches by tag name, ASCII case-insensitively.
    Tag(String),
}

impl Step {
    /// Parse a single step, e.g. `div.foo` or `.bar[href="x y"]`.
    ///
    /// Surrounding whitespace is ignored. Text that is not an id, class, or
    /// attribute step is read as a tag name.
    ///
    /// # Errors
    /// Returns a [`SelectorError`] when the token is empty or is a
    /// malformed id, class, or attribute step.
    pub fn parse(token: &str) -> Result<Self, SelectorError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SelectorError::Empty);
        }

        if let Some(open) = token.find('[') {
            return parse_attribute_step(token, &token[..open], &token[open..]);
        }

        if let Some(id) = token.strip_prefix('#') {
            if id.is_empty() {
                return Err(SelectorError::EmptyId(token.to_string()));
            }
            if id.contains(['#', '.']) {
                return Err(SelectorError::CompoundId(token.to_string()));
            }
            return Ok(Self::Id(id.to_string()));
        }

        if token.contains('#') {
            return Err(SelectorError::CompoundId(token.to_string()));
        }

        if let Some((tag, class)) = token.split_once('.') {
            return Ok(Self::Class {
                tag: (!tag.is_empty()).then(|| tag.to_string()),
                class: parse_class(token, class)?,
            });
        }

        Ok(Self::Tag(token.to_string()))
    }

    /// Whether `node` is an element satisfying this step.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.as_element(node)
            .is_some_and(|element| self.matches_element(element))
    }

    /// Whether `element` satisfies this step.
    #[must_use]
    pub fn matches_element(&self, element: &ElementData) -> bool {
        match self {
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Tag(tag) => tag_matches(element, tag),
            Self::Class { tag, class } => {
                tag.as_deref().is_none_or(|tag| tag_matches(element, tag))
                    && element.has_class(class)
            }
            Self::Attribute {
                qualifier,
                name,
                value,
            } => {
                qualifier.as_ref().is_none_or(|q| q.matches(element))
                    && match (element.attribute(name), value) {
                        (None, _) => false,
                        (Some(_), None) => true,
                        (Some(actual), Some(expected)) => actual == expected,
                    }
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Tag(tag) => f.write_str(tag),
            Self::Class { tag, class } => {
                if let Some(tag) = tag {
                    f.write_str(tag)?;
                }
                write!(f, ".{class}")
            }
            Self::Attribute {
                qualifier,
                name,
                value,
            } => {
                match qualifier {
                    Some(Qualifier::Tag(tag)) => f.write_str(tag)?,
                    Some(Qualifier::Class(class)) => write!(f, ".{class}")?,
                    None => {}
                }
                match value {
                    Some(value) if value.contains('"') => write!(f, "[{name}='{value}']"),
                    Some(value) => write!(f, "[{name}=\"{value}\"]"),
                    None => write!(f, "[{name}]"),
                }
            }
        }
    }
}

fn parse_class(token: &str, class: &str) -> Result<String, SelectorError> {
    if class.is_empty() {
        return Err(SelectorError::EmptyClass(token.to_string()));
    }
    if class.contains('.') {
        return Err(SelectorError::MultipleClasses(token.to_string()));
    }
    Ok(class.to_string())
}

/// `prefix[inner]`, where `bracketed` starts at the `[`.
fn parse_attribute_step(token: &str, prefix: &str, bracketed: &str) -> Result<Step, SelectorError> {
    let qualifier = if prefix.is_empty() {
        None
    } else if prefix.contains('#') {
        return Err(SelectorError::CompoundId(token.to_string()));
    } else if let Some(class) = prefix.strip_prefix('.') {
        Some(Qualifier::Class(parse_class(token, class)?))
    } else if prefix.contains('.') {
        return Err(SelectorError::CompoundQualifier(token.to_string()));
    } else {
        Some(Qualifier::Tag(prefix.to_string()))
    };

    let (inner, trailing) = split_bracket(token, bracketed)?;
    if trailing.starts_with('[') {
        return Err(SelectorError::MultipleAttributes(token.to_string()));
    }
    if !trailing.is_empty() {
        return Err(SelectorError::TrailingCharacters(token.to_string()));
    }

    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => (name.trim(), Some(unquote(token, value.trim())?)),
        None => (inner.trim(), None),
    };
    if name.is_empty() {
        return Err(SelectorError::EmptyAttributeName(token.to_string()));
    }

    Ok(Step::Attribute {
        qualifier,
        name: name.to_string(),
        value: value.map(str::to_string),
    })
}

/// Split `[inner]rest` at the closing bracket, skipping brackets inside
/// quoted values.
fn split_bracket<'a>(token: &str, bracketed: &'a str) -> Result<(&'a str, &'a str), SelectorError> {
    let mut quote = None;
    for (i, c) in bracketed.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ']') => return Ok((&bracketed[1..i], &bracketed[i + 1..])),
            (None, _) => {}
        }
    }
    if quote.is_some() {
        Err(SelectorError::UnterminatedQuote(token.to_string()))
    } else {
        Err(SelectorError::UnterminatedAttribute(token.to_string()))
    }
}

fn unquote<'a>(token: &str, value: &'a str) -> Result<&'a str, SelectorError> {
    let Some(q) = value.chars().next().filter(|c| matches!(c, '"' | '\'')) else {
        return Ok(value);
    };
    value
        .strip_prefix(q)
        .and_then(|rest| rest.strip_suffix(q))
        .ok_or_else(|| SelectorError::UnterminatedQuote(token.to_string()))
}
