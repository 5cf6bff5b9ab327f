//! Turning the eager recursive-descent parser into a lazy token stream.
//!
//! The parser's token callback is routed into a [`Pull`] coroutine's channel,
//! so each call to [`TokenStream::next`] runs the descent just far enough to
//! recognize one more token.

use core::iter::FusedIterator;

use either::Either::{Left, Right};

use crate::error::Result;
use crate::grammar::CharSource;
use crate::grammar::GrammarError;
use crate::grammar::Parser;
use crate::grammar::TokenSink;
use crate::pull::Pull;
use crate::stack::Builder;

/// A lazily-stepped parse.
///
/// Yields `Ok(token)` for every token in source order. If the expression is
/// malformed, the last item is the `Err` describing where the parse stopped.
///
/// ```rust
/// use symco::{GrammarError, tokens};
///
/// let items: Vec<_> = tokens("1+)".chars()).unwrap().collect();
/// assert_eq!(
///     items,
///     [
///         Ok('1'),
///         Ok('+'),
///         Err(GrammarError::UnexpectedSymbol { found: Some(')'), position: 2 }),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct TokenStream<'a> {
    pull: Pull<'a, char, Result<(), GrammarError>>,
}

impl<'a> TokenStream<'a> {
    pub fn with_builder<S>(builder: Builder, source: S) -> Result<Self>
    where
        S: CharSource + 'a,
    {
        let pull = Pull::<char, Result<(), GrammarError>>::with_builder(builder, move |yielder| {
            Parser::new(source, |token: char| yielder.suspend(token)).run()
        })?;
        Ok(TokenStream { pull })
    }

    /// True until the parse has finished, successfully or not.
    pub fn is_active(&self) -> bool {
        self.pull.is_active()
    }

    /// Abandons the parse, unwinding the parser's stack.
    pub fn cancel(&mut self) {
        self.pull.cancel()
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Result<char, GrammarError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.pull.is_active() {
            return None;
        }
        match self.pull.step().ok()?.into_either() {
            Left(token) => Some(Ok(token)),
            Right(outcome) => outcome.err().map(Err),
        }
    }
}

impl FusedIterator for TokenStream<'_> {}

/// Starts a lazy parse of `source`. Nothing is read until the first token is
/// requested.
pub fn tokens<'a, S>(source: S) -> Result<TokenStream<'a>>
where
    S: CharSource + 'a,
{
    TokenStream::with_builder(Builder::new().name("expression"), source)
}

/// Parses `source` eagerly, handing every token to `sink` as it is found.
pub fn parse_with<S, K>(source: S, sink: K) -> Result<(), GrammarError>
where
    S: CharSource,
    K: TokenSink,
{
    Parser::new(source, sink).run()
}

/// Parses `source` eagerly and collects its tokens.
pub fn collect_tokens<S>(source: S) -> Result<Vec<char>, GrammarError>
where
    S: CharSource,
{
    let mut tokens = Vec::new();
    parse_with(source, |token: char| tokens.push(token))?;
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn lazy_and_eager_agree() {
        for input in ["1+1", "2*(3+4)", "(1+2)*(3-4)/5", "1+)", "(1+1", "1$1"] {
            let lazy: Vec<_> = tokens(input.chars()).unwrap().collect();
            let mut eager = Vec::new();
            let outcome = parse_with(input.chars(), |c: char| eager.push(Ok(c)));
            if let Err(err) = outcome {
                eager.push(Err(err));
            }
            assert_eq!(lazy, eager, "input {input:?}");
        }
    }

    struct CountingSource<'c, S> {
        inner: S,
        reads: &'c Cell<u32>,
    }

    impl<S: Iterator<Item = char>> CharSource for CountingSource<'_, S> {
        fn next_char(&mut self) -> Option<char> {
            self.reads.set(self.reads.get() + 1);
            self.inner.next()
        }
    }

    #[test]
    fn source_is_read_on_demand() {
        let reads = Cell::new(0);
        let source = CountingSource {
            inner: "1+2".chars(),
            reads: &reads,
        };
        let mut stream = tokens(source).unwrap();
        assert_eq!(reads.get(), 0);
        assert_eq!(stream.next(), Some(Ok('1')));
        assert_eq!(reads.get(), 1);
        assert_eq!(stream.next(), Some(Ok('+')));
        assert_eq!(reads.get(), 2);
        assert_eq!(stream.next(), Some(Ok('2')));
        assert_eq!(reads.get(), 3);
        assert_eq!(stream.next(), None);
        assert!(!stream.is_active());
        // three characters plus the read that found the end
        assert_eq!(reads.get(), 4);
    }

    #[test]
    fn nothing_is_read_before_the_first_pull() {
        let mut reads = 0;
        let stream = tokens("1".chars().inspect(|_| reads += 1)).unwrap();
        drop(stream);
        assert_eq!(reads, 0);
    }

    #[test]
    fn collect_tokens_reports_errors() {
        assert_eq!(collect_tokens("2*(3+4)".chars()), Ok("2*(3+4)".chars().collect()));
        assert_eq!(
            collect_tokens("1$1".chars()),
            Err(GrammarError::TrailingInput {
                found: '$',
                position: 1
            })
        );
    }

    #[test]
    fn cancelled_stream_ends() {
        let mut stream = tokens("1+1".chars()).unwrap();
        assert_eq!(stream.next(), Some(Ok('1')));
        stream.cancel();
        assert!(!stream.is_active());
        assert_eq!(stream.next(), None);
    }
}
