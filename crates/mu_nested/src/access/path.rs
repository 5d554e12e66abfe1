//! Provide the path parser.

use alloc::borrow::Cow;
use core::fmt;
use core::str::CharIndices;

use thiserror::Error;

use crate::access::{Accessor, AccessorKind, OffsetAccessor};

// -----------------------------------------------------------------------------
// Error

/// The kind of [`ParseError`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// An opening operator was expected, at the start of the path or right
    /// after a closed key. `None` if the path is empty.
    #[error("expected one of `.`, `[` or `#`, found {}", Found(*.0))]
    MissingOpenOperator(Option<char>),

    /// A key was not closed before the next segment or the end of the path.
    #[error("the {0} accessor is missing its closing `]`")]
    MissingCloseOperator(AccessorKind),

    /// A closing operator appeared without an open key.
    #[error("unexpected closing operator `{0}`")]
    UnexpectedCloseOperator(char),

    /// An accessor has no text between its operators.
    #[error("missing value for the {0} accessor")]
    MissingValue(AccessorKind),
}

struct Found(Option<char>);

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(c) => write!(f, "`{c}`"),
            None => f.write_str("an empty path"),
        }
    }
}

/// An error while parsing a path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Byte position in `path`.
    pub offset: usize,
    /// The path that the error occurred in.
    pub path: Cow<'a, str>,
    /// The underlying error.
    pub kind: ParseErrorKind,
}

impl ParseError<'_> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> ParseError<'static> {
        ParseError {
            offset: self.offset,
            path: Cow::Owned(self.path.into_owned()),
            kind: self.kind,
        }
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at offset {} while parsing `{}`: {}",
            self.offset, self.path, self.kind,
        )
    }
}

impl core::error::Error for ParseError<'_> {}

// -----------------------------------------------------------------------------
// AccessPath

/// An interface where the type implementing
/// this trait can be considered as a "Path" for path access.
///
/// This crate provides the implementation for [`&str`].
///
/// # Syntax
///
/// - Attribute: `.name`, e.g. `.field_0`
/// - Key: `[name]`, e.g. `[first name]`
/// - Index: `#number`, e.g. `#1` or `#-1`
///
/// Text runs until the next operator character (`.`, `[`, `#`, `]`) and can
/// hold anything else, including spaces. There is no escaping.
///
/// # Examples
///
/// ```
/// use mu_nested::access::{AccessPath, Accessor};
///
/// let accessors: Vec<Accessor> = "[x]#1.y"
///     .parse_to_accessor()
///     .map(|res| res.unwrap().accessor)
///     .collect();
///
/// assert_eq!(
///     accessors,
///     [Accessor::Key("x".into()), Accessor::Index("1".into()), Accessor::Attribute("y".into())],
/// );
/// ```
///
/// [`&str`]: str
pub trait AccessPath<'a> {
    /// Parses the path and returns an iterator of [`OffsetAccessor`].
    ///
    /// The iterator stops after the first error.
    fn parse_to_accessor(&self)
    -> impl Iterator<Item = Result<OffsetAccessor<'a>, ParseError<'a>>>;
}

impl<'a> AccessPath<'a> for &'a str {
    #[inline]
    fn parse_to_accessor(&self)
    -> impl Iterator<Item = Result<OffsetAccessor<'a>, ParseError<'a>>> {
        PathParser::new(*self)
    }
}

// -----------------------------------------------------------------------------
// Parser

/// A single-pass parser over a path string.
///
/// Each segment is emitted as soon as the operator ending it is read.
struct PathParser<'a> {
    path: &'a str,
    chars: CharIndices<'a>,
    /// Kind and offset of the opening operator of the current segment.
    segment: Option<(AccessorKind, usize)>,
    finished: bool,
}

impl<'a> PathParser<'a> {
    #[inline]
    fn new(path: &'a str) -> Self {
        Self {
            path,
            chars: path.char_indices(),
            segment: None,
            finished: false,
        }
    }

    #[inline]
    fn fail(&mut self, offset: usize, kind: ParseErrorKind) -> Option<<Self as Iterator>::Item> {
        self.finished = true;
        Some(Err(ParseError {
            offset,
            path: Cow::Borrowed(self.path),
            kind,
        }))
    }

    /// Ends the current segment at `end`, the offset of the operator
    /// (or the end of the path) that terminated it.
    fn take_segment(
        &mut self,
        kind: AccessorKind,
        start: usize,
        end: usize,
    ) -> Result<OffsetAccessor<'a>, ParseErrorKind> {
        // Opening operators are one byte long.
        let text = &self.path[start + 1..end];
        if text.is_empty() {
            return Err(ParseErrorKind::MissingValue(kind));
        }
        Ok(OffsetAccessor {
            accessor: Accessor::new(kind, text),
            offset: Some(start),
        })
    }
}

impl<'a> Iterator for PathParser<'a> {
    type Item = Result<OffsetAccessor<'a>, ParseError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some((offset, c)) = self.chars.next() else {
                let end = self.path.len();
                let Some((kind, start)) = self.segment.take() else {
                    self.finished = true;
                    if self.path.is_empty() {
                        return self.fail(0, ParseErrorKind::MissingOpenOperator(None));
                    }
                    return None;
                };

                let segment = match self.take_segment(kind, start, end) {
                    Ok(segment) => segment,
                    Err(err) => return self.fail(end, err),
                };
                if kind.close_char().is_some() {
                    return self.fail(end, ParseErrorKind::MissingCloseOperator(kind));
                }
                self.finished = true;
                return Some(Ok(segment));
            };

            let Some((kind, start)) = self.segment else {
                match AccessorKind::from_open(c) {
                    Some(kind) => self.segment = Some((kind, offset)),
                    None => return self.fail(offset, ParseErrorKind::MissingOpenOperator(Some(c))),
                }
                continue;
            };

            if !AccessorKind::is_operator(c) {
                continue;
            }

            let segment = match self.take_segment(kind, start, offset) {
                Ok(segment) => segment,
                Err(err) => return self.fail(offset, err),
            };

            let next = AccessorKind::from_open(c);
            self.segment = match (kind.close_char(), next) {
                // closing `]` of a key
                (Some(_), None) => None,
                (Some(_), Some(_)) => {
                    return self.fail(offset, ParseErrorKind::MissingCloseOperator(kind));
                }
                (None, Some(next)) => Some((next, offset)),
                (None, None) => {
                    return self.fail(offset, ParseErrorKind::UnexpectedCloseOperator(c));
                }
            };
            return Some(Ok(segment));
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
