use std::{ops::Deref, sync::OnceLock};

use internment::ArcIntern;
use pest::RuleType;

/// Render `message` as a pest diagnostic pointing at `span`
pub fn mk_error<Rule: RuleType>(
    message: impl Into<String>,
    span: &Span,
) -> Box<pest::error::Error<Rule>> {
    let err = pest::error::ErrorVariant::CustomError {
        message: message.into(),
    };

    Box::new(match span.pest() {
        Some(span) => pest::error::Error::new_from_span(err, span),
        None => pest::error::Error::new_from_pos(err, pest::Position::from_start(&span.source)),
    })
}

/// A slice of the notation text; attached to parsed moves for error reporting
#[derive(Clone)]
pub struct Span {
    source: ArcIntern<str>,
    start: usize,
    end: usize,
    line_and_col: OnceLock<(usize, usize)>,
}

impl Span {
    pub fn new(source: ArcIntern<str>, start: usize, end: usize) -> Span {
        assert!(start <= end);
        assert!(end <= source.len());

        Span {
            source,
            start,
            end,
            line_and_col: OnceLock::new(),
        }
    }

    pub fn slice(&self) -> &str {
        &self.source[self.start..self.end]
    }

    pub fn line_and_col(&self) -> (usize, usize) {
        *self.line_and_col.get_or_init(|| {
            let mut current_line = 1;
            let mut current_col = 1;

            for c in self.source[..self.start].chars() {
                if c == '\n' {
                    current_line += 1;
                    current_col = 1;
                } else {
                    current_col += 1;
                }
            }

            (current_line, current_col)
        })
    }

    fn pest(&self) -> Option<pest::Span<'_>> {
        pest::Span::new(&self.source, self.start, self.end)
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.start == other.start && self.end == other.end
    }
}

impl Eq for Span {}

impl core::fmt::Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slice())
    }
}

/// A value attached to a `Span`
#[derive(Clone)]
pub struct WithSpan<T> {
    pub value: T,
    span: Span,
}

impl<T: core::fmt::Debug> core::fmt::Debug for WithSpan<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        core::fmt::Debug::fmt(&self.value, f)
    }
}

impl<T> Deref for WithSpan<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> WithSpan<T> {
    pub fn new(value: T, span: Span) -> WithSpan<T> {
        WithSpan { value, span }
    }

    pub fn map<V>(self, f: impl FnOnce(T) -> V) -> WithSpan<V> {
        WithSpan {
            value: f(self.value),
            span: self.span,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl<T: PartialEq> PartialEq for WithSpan<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for WithSpan<T> {}
