use thiserror::Error;

/// Errors raised by coroutine contexts and their transfer channels.
///
/// Grammar failures are not represented here: they are ordinary values
/// returned by the body (see [`GrammarError`](crate::GrammarError)), so a
/// context that hits one still completes normally.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The stack for a new context could not be provisioned.
    #[error("failed to provision a coroutine stack of {words} words")]
    StackExhausted { words: usize },

    /// The requested stack is smaller than the allocator accepts.
    #[error("a stack of {words} words is below the minimum of {min} words")]
    StackTooSmall { words: usize, min: usize },

    /// `resume()` was called on a context that is already done.
    #[error("the coroutine has already finished")]
    Finished,

    /// A channel was read while no payload was pending.
    #[error("no payload is pending in the channel")]
    EmptyChannel,

    /// The terminal value was requested while the body can still run.
    #[error("the coroutine has not finished yet")]
    NotFinished,

    /// The terminal value was already taken, or the body never produced one
    /// because it was cancelled.
    #[error("the coroutine has no terminal value to hand out")]
    NoReturnValue,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
