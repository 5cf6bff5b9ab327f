use either::Either;

/// What a single step of a coroutine produced.
///
/// After a call to `step()` finishes, the coroutine is in one of two states:
///
///   * `Yield(y)`: The body transferred `y` through the channel and is
///     suspended, ready to be resumed again.
///   * `Return(r)`: The body ran to completion with the terminal value `r`.
///     The coroutine cannot be resumed again.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Suspend<Y, R> {
    Yield(Y),
    Return(R),
}

use Suspend::*;

impl<Y, R> Suspend<Y, R> {
    /// Returns the yielded value, if the coroutine is in the `Yield` state, or
    /// `None` otherwise.
    ///
    /// Compare to `Result::ok()` or `ControlFlow::continue_value()`.
    pub fn into_yield(self) -> Option<Y> {
        match self {
            Yield(y) => Some(y),
            Return(_) => None,
        }
    }

    /// Returns the terminal value of the coroutine, if the coroutine is in the
    /// `Return` state, or `None` otherwise.
    ///
    /// Compare to `Result::err()` or `ControlFlow::break_value()`.
    pub fn into_return(self) -> Option<R> {
        match self {
            Yield(_) => None,
            Return(r) => Some(r),
        }
    }

    pub fn is_yield(&self) -> bool {
        matches!(self, Yield(_))
    }

    /// Yielded values go to the left, the terminal value to the right.
    pub fn into_either(self) -> Either<Y, R> {
        match self {
            Yield(y) => Either::Left(y),
            Return(r) => Either::Right(r),
        }
    }
}

impl<Y, R> From<Either<Y, R>> for Suspend<Y, R> {
    fn from(either: Either<Y, R>) -> Self {
        either.either(Yield, Return)
    }
}
