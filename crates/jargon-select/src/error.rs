use thiserror::Error;

/// Why a selector string was rejected by the tokenizer.
///
/// The query facade never surfaces these to callers; a rejected selector
/// matches nothing and is reported once through the warning channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// No step at all, e.g. `""` or `"   "`.
    #[error("selector is empty")]
    Empty,
    /// `>` before the first step.
    #[error("combinator '>' has no step on its left")]
    LeadingCombinator,
    /// `>` after the last step.
    #[error("combinator '>' has no step on its right")]
    TrailingCombinator,
    /// `> >` with no step in between.
    #[error("combinator '>' repeated without a step in between")]
    RepeatedCombinator,
    /// `#` with nothing after it.
    #[error("empty id in '{0}'")]
    EmptyId(String),
    /// `.` with nothing after it.
    #[error("empty class name in '{0}'")]
    EmptyClass(String),
    /// `.a.b`: a step carries at most one class.
    #[error("more than one class in '{0}'")]
    MultipleClasses(String),
    /// `div#x`, `#x.y`: id steps stand alone.
    #[error("id cannot be combined with other filters in '{0}'")]
    CompoundId(String),
    /// `a[href` without the closing bracket.
    #[error("unterminated attribute filter in '{0}'")]
    UnterminatedAttribute(String),
    /// `a[href="x` without the closing quote.
    #[error("unterminated quoted value in '{0}'")]
    UnterminatedQuote(String),
    /// `a[]` or `a[="x"]`.
    #[error("empty attribute name in '{0}'")]
    EmptyAttributeName(String),
    /// `a[href][title]`: a step carries at most one attribute filter.
    #[error("more than one attribute filter in '{0}'")]
    MultipleAttributes(String),
    /// `a[href]x`.
    #[error("unexpected characters after attribute filter in '{0}'")]
    TrailingCharacters(String),
    /// `div.foo[href]`: attribute filters are qualified by a tag or a class.
    #[error("attribute filter takes a tag or a class qualifier, not both, in '{0}'")]
    CompoundQualifier(String),
}
