//! Selector tokenizer: turns `div > div.foo .bar a[href="x"]` into an
//! ordered list of typed steps joined by combinators.

use std::fmt;

use crate::SelectorError;
use crate::step::Step;

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    #[default]
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    Child,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// A parsed selector: the rightmost step (the subject) plus the chain of
/// (combinator, step) pairs going left from it.
///
/// ```text
/// div > p.bar a[href]
/// subject:     a[href]
/// combinators: [(Descendant, p.bar), (Child, div)]
/// ```
///
/// Each combinator relates its step to the element matched just before
/// it, so the chain reads in the order the ancestor walk consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    subject: Step,
    combinators: Vec<(Combinator, Step)>,
}

/// A raw token before step parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken<'a> {
    Step(&'a str),
    Child,
}

impl Selector {
    /// Tokenize and parse a selector string.
    ///
    /// Whitespace separates steps and collapses; inside quoted attribute
    /// values it is kept. `>` is a combinator with or without surrounding
    /// whitespace.
    ///
    /// # Errors
    /// Returns a [`SelectorError`] when the string holds no step, when a
    /// `>` is misplaced, or when a step is malformed.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        // Left to right, each step with the combinator on its left
        let mut steps: Vec<(Combinator, Step)> = Vec::new();
        let mut pending: Option<Combinator> = None;

        for token in split(input) {
            match token {
                RawToken::Child => {
                    if steps.is_empty() {
                        return Err(SelectorError::LeadingCombinator);
                    }
                    if pending == Some(Combinator::Child) {
                        return Err(SelectorError::RepeatedCombinator);
                    }
                    pending = Some(Combinator::Child);
                }
                RawToken::Step(text) => {
                    let step = Step::parse(text)?;
                    steps.push((pending.take().unwrap_or_default(), step));
                }
            }
        }

        if pending.is_some() {
            return Err(SelectorError::TrailingCombinator);
        }
        let Some((mut incoming, subject)) = steps.pop() else {
            return Err(SelectorError::Empty);
        };

        let mut combinators = Vec::with_capacity(steps.len());
        while let Some((combinator, step)) = steps.pop() {
            combinators.push((incoming, step));
            incoming = combinator;
        }
        Ok(Self {
            subject,
            combinators,
        })
    }

    /// A selector made of one step.
    #[must_use]
    pub const fn from_step(subject: Step) -> Self {
        Self {
            subject,
            combinators: Vec::new(),
        }
    }

    /// The rightmost step: the one candidates are located by.
    ///
    /// "The elements represented by a complex selector are the elements matched
    /// by the last compound selector in the complex selector."
    #[must_use]
    pub const fn subject(&self) -> &Step {
        &self.subject
    }

    /// The steps left of the subject, nearest first, each with the
    /// combinator relating it to the step on its right.
    #[must_use]
    pub fn combinators(&self) -> &[(Combinator, Step)] {
        &self.combinators
    }

    /// Number of steps, the subject included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.combinators.len() + 1
    }

    /// Whether the selector is a single step with no combinators.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.combinators.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (combinator, step) in self.combinators.iter().rev() {
            match combinator {
                Combinator::Descendant => write!(f, "{step} ")?,
                Combinator::Child => write!(f, "{step} > ")?,
            }
        }
        write!(f, "{}", self.subject)
    }
}

/// Split on whitespace and `>`, except inside `[...]`, and inside quotes
/// within brackets.
fn split(input: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_bracket = false;
    let mut quote: Option<char> = None;

    for (i, c) in input.char_indices() {
        if in_bracket {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, ']') => in_bracket = false,
                (None, _) => {}
            }
            continue;
        }

        if c.is_whitespace() || c == '>' {
            if let Some(s) = start.take() {
                tokens.push(RawToken::Step(&input[s..i]));
            }
            if c == '>' {
                tokens.push(RawToken::Child);
            }
            continue;
        }

        if start.is_none() {
            start = Some(i);
        }
        if c == '[' {
            in_bracket = true;
        }
    }

    // An unterminated bracket or quote leaves the rest of the input in one
    // token; the step parser reports it.
    if let Some(s) = start {
        tokens.push(RawToken::Step(&input[s..]));
    }
    tokens
}
