//! The `symco` crate provides stackful coroutines with symmetric control
//! transfer, and uses them to turn an ordinary recursive-descent parser into a
//! lazy token stream.
//!
//! A *coroutine context* is an execution with its own call stack. The driver
//! calls `resume()` to jump onto that stack; the body calls
//! `Yielder::suspend()` to jump straight back, handing over a payload. The
//! body can suspend from any depth of its call chain, so code that was
//! written as plain nested function calls (such as a recursive-descent
//! parser calling a token callback) can be stepped one piece at a time
//! without rewriting it as a state machine.
//!
//! The two sides never run at the same time. There is no scheduler, no
//! thread, and no locking: one driver, one body, and a single-slot
//! [`Channel`] in each direction.
//!
//! In this crate, the core types look like:
//!
//! ```rust,ignore
//! pub struct Context<'a, I, Y, R> { /* ... */ }
//!
//! impl<'a, I, Y, R> Context<'a, I, Y, R> {
//!     pub fn new<F>(body: F) -> Result<Self>
//!     where
//!         F: FnOnce(&mut Yielder<'_, I, Y>, I) -> R + 'a;
//!     pub fn resume(&mut self, input: I) -> Result<State>;
//!     pub fn take_yield(&mut self) -> Result<Y>;
//!     pub fn take_return(&mut self) -> Result<R>;
//! }
//!
//! impl<I, Y> Yielder<'_, I, Y> {
//!     pub fn suspend(&mut self, value: Y) -> I;
//! }
//! ```
//!
//! `I` is what the driver passes in on each resume, `Y` is what the body
//! transfers out on each suspension, and `R` is the *terminal value* the body
//! returns when it completes. The terminal value never travels through the
//! channel: a driver looping on `resume()` sees only the transferred
//! payloads, and collects the terminal value separately, once.
//!
//! # Examples
//!
//! ## Values and a terminal value
//!
//! ```rust
//! use symco::{Pull, PullAssertions};
//!
//! Pull::new(|yielder| {
//!     yielder.suspend(5); // transferred through the channel
//!     yielder.suspend(7); // transferred through the channel
//!     11 // not transferred; the terminal value
//! })
//! .unwrap()
//! .assert_yields(5)
//! .assert_yields(7)
//! .assert_returns(11)
//! .assert_finished();
//! ```
//!
//! ## A fixed-shape payload
//!
//! The payload type fixes the shape of every transfer. A pair always arrives
//! whole:
//!
//! ```rust
//! use symco::Pull;
//!
//! let mut pull = Pull::new(|yielder| yielder.suspend((7, 11))).unwrap();
//! let (x, y) = pull.next().unwrap();
//! assert_eq!((x, y), (7, 11));
//! ```
//!
//! ## Pushing values into a body
//!
//! ```rust
//! use symco::Push;
//!
//! let mut largest = Push::new(|source| source.max()).unwrap();
//! for n in [3, 9, 4] {
//!     largest.send(n).unwrap();
//! }
//! assert_eq!(largest.finish(), Ok(Some(9)));
//! ```
//!
//! ## Lazy parsing
//!
//! The [`grammar`] module holds a recursive-descent recognizer for
//! arithmetic expressions that reports tokens through a callback. [`tokens()`]
//! routes that callback through a [`Pull`] coroutine, so the parse advances
//! only as far as the consumer reads:
//!
//! ```rust
//! use symco::tokens;
//!
//! let mut stream = tokens("2*(3+4)".chars()).unwrap();
//! assert_eq!(stream.next(), Some(Ok('2')));
//! assert_eq!(stream.next(), Some(Ok('*')));
//! // The parser is suspended in the middle of its descent here.
//! let rest: Result<String, _> = stream.collect();
//! assert_eq!(rest.unwrap(), "(3+4)");
//! ```
//!
//! # Cancellation
//!
//! Dropping a context whose body is suspended unwinds the body's stack, so
//! its destructors run exactly once and it never transfers again.
//! `cancel()` does the same without dropping the context. This relies on
//! unwinding, so the crate requires `panic = "unwind"`.
//!
//! The one exception is a context dropped while the driver's own thread is
//! already unwinding from a panic. A second unwind cannot start then, so the
//! suspended body is left as it is: its stack memory is released but its
//! pending destructors do not run, and a warning is logged. Call `cancel()`
//! before anything that may panic if the body holds resources that must be
//! released.

mod assertions;
mod channel;
mod context;
mod error;
pub mod grammar;
mod pull;
mod push;
mod stack;
mod suspend;
mod tokens;

pub use assertions::PullAssertions;
pub use channel::{Channel, Direction};
pub use context::{Context, State, Yielder};
pub use error::{Error, Result};
pub use grammar::{CharSource, GrammarError, Parser, TokenSink};
pub use pull::Pull;
pub use push::{Push, Source};
pub use stack::{Builder, DEFAULT_STACK_WORDS, MAX_STACK_WORDS, MIN_STACK_WORDS, StackSize};
pub use suspend::Suspend;
pub use tokens::{TokenStream, collect_tokens, parse_with, tokens};

/// `Yield` and `Return` are imported into the crate root namespace because
/// they are used so often.
pub use Suspend::{Return, Yield};

#[cfg(test)]
mod test;
