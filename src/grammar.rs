//! A recursive-descent recognizer for arithmetic expressions.
//!
//! ```text
//! P → E '\0'
//! E → T { ('+'|'-') T }
//! T → S { ('*'|'/') S }
//! S → digit | '(' E ')'
//! ```
//!
//! The parser reports every significant terminal (digits, operators and
//! parentheses) to a [`TokenSink`] before moving past it. It knows nothing
//! about coroutines; [`tokens()`](crate::tokens()) decides what the
//! sink does.

use thiserror::Error;

/// Where the parser reads raw characters from. `None` marks the end of input.
pub trait CharSource {
    fn next_char(&mut self) -> Option<char>;
}

impl<I> CharSource for I
where
    I: Iterator<Item = char>,
{
    fn next_char(&mut self) -> Option<char> {
        self.next()
    }
}

/// Receives each token as the parser recognizes it.
///
/// A sink must not call back into the parser that feeds it.
pub trait TokenSink {
    fn emit(&mut self, token: char);
}

impl<F> TokenSink for F
where
    F: FnMut(char),
{
    fn emit(&mut self, token: char) {
        self(token)
    }
}

/// Why an expression was rejected. Positions count raw characters from zero,
/// whitespace included; the end of input sits one past the last character.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarError {
    /// An operand (a digit or a parenthesized expression) was expected.
    #[error("expected a digit or '(' but found {} at position {position}", describe(.found))]
    UnexpectedSymbol {
        found: Option<char>,
        position: usize,
    },

    /// A parenthesized expression was not closed.
    #[error("expected ')' but found {} at position {position}", describe(.found))]
    UnclosedParen {
        found: Option<char>,
        position: usize,
    },

    /// The expression ended before the input did.
    #[error("unexpected trailing input '{found}' at position {position}")]
    TrailingInput { found: char, position: usize },
}

impl GrammarError {
    pub fn position(&self) -> usize {
        match *self {
            GrammarError::UnexpectedSymbol { position, .. }
            | GrammarError::UnclosedParen { position, .. }
            | GrammarError::TrailingInput { position, .. } => position,
        }
    }

    /// The offending character, or `None` if the input ended too early.
    pub fn found(&self) -> Option<char> {
        match *self {
            GrammarError::UnexpectedSymbol { found, .. }
            | GrammarError::UnclosedParen { found, .. } => found,
            GrammarError::TrailingInput { found, .. } => Some(found),
        }
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{}'", c.escape_debug()),
        None => String::from("end of input"),
    }
}

/// One parse of one expression.
pub struct Parser<S, K> {
    source: S,
    sink: K,
    // `None` is the end-of-input sentinel.
    lookahead: Option<char>,
    position: usize,
    consumed: usize,
}

impl<S, K> Parser<S, K>
where
    S: CharSource,
    K: TokenSink,
{
    pub fn new(source: S, sink: K) -> Self {
        Parser {
            source,
            sink,
            lookahead: None,
            position: 0,
            consumed: 0,
        }
    }

    /// Parses a complete expression, emitting tokens along the way.
    ///
    /// Stops at the first error; no token past the failure point is emitted.
    pub fn run(mut self) -> Result<(), GrammarError> {
        self.scan();
        self.expression()?;
        match self.lookahead {
            None => Ok(()),
            Some(found) => Err(GrammarError::TrailingInput {
                found,
                position: self.position,
            }),
        }
    }

    fn scan(&mut self) {
        self.lookahead = loop {
            let Some(c) = self.source.next_char() else {
                self.position = self.consumed;
                break None;
            };
            self.position = self.consumed;
            self.consumed += 1;
            match c {
                '\0' => break None,
                c if c.is_whitespace() => continue,
                c => break Some(c),
            }
        };
    }

    // Emits the lookahead and moves past it.
    fn accept(&mut self, token: char) {
        self.sink.emit(token);
        self.scan();
    }

    fn expression(&mut self) -> Result<(), GrammarError> {
        self.term()?;
        while let Some(op @ ('+' | '-')) = self.lookahead {
            self.accept(op);
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> Result<(), GrammarError> {
        self.operand()?;
        while let Some(op @ ('*' | '/')) = self.lookahead {
            self.accept(op);
            self.operand()?;
        }
        Ok(())
    }

    fn operand(&mut self) -> Result<(), GrammarError> {
        match self.lookahead {
            Some(digit) if digit.is_ascii_digit() => {
                self.accept(digit);
                Ok(())
            }
            Some('(') => {
                self.accept('(');
                self.expression()?;
                match self.lookahead {
                    Some(')') => {
                        self.accept(')');
                        Ok(())
                    }
                    found => Err(GrammarError::UnclosedParen {
                        found,
                        position: self.position,
                    }),
                }
            }
            found => Err(GrammarError::UnexpectedSymbol {
                found,
                position: self.position,
            }),
        }
    }
}
