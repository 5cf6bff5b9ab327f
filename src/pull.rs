use core::iter::FusedIterator;

use crate::context::Context;
use crate::context::State;
use crate::context::Yielder;
use crate::error::Result;
use crate::stack::Builder;
use crate::suspend::Suspend;

/// A producer coroutine: the body yields values, the driver pulls them one
/// resume at a time.
///
/// The sequence is lazy and cannot be restarted. Iterating a `Pull` yields
/// every channel payload and then stops; the terminal value is left for
/// [`take_return`](Pull::take_return).
///
/// ```rust
/// use symco::Pull;
///
/// let mut pull = Pull::new(|yielder| {
///     yielder.suspend(5);
///     yielder.suspend(7);
///     11
/// })
/// .unwrap();
/// assert_eq!(pull.by_ref().collect::<Vec<_>>(), [5, 7]);
/// assert_eq!(pull.take_return(), Ok(11));
/// ```
#[derive(Debug)]
pub struct Pull<'a, Y, R> {
    context: Context<'a, (), Y, R>,
}

impl<'a, Y, R> Pull<'a, Y, R>
where
    Y: 'a,
    R: 'a,
{
    pub fn new<F>(body: F) -> Result<Self>
    where
        F: FnOnce(&mut Yielder<'_, (), Y>) -> R + 'a,
    {
        Self::with_builder(Builder::new(), body)
    }

    pub fn with_builder<F>(builder: Builder, body: F) -> Result<Self>
    where
        F: FnOnce(&mut Yielder<'_, (), Y>) -> R + 'a,
    {
        let context = builder.spawn(move |yielder, ()| body(yielder))?;
        Ok(Pull { context })
    }

    /// Runs the body up to its next transfer or to completion.
    pub fn resume(&mut self) -> Result<State> {
        self.context.resume(())
    }

    /// Reads the value produced by the last `resume()`.
    pub fn get(&mut self) -> Result<Y> {
        self.context.take_yield()
    }

    pub fn step(&mut self) -> Result<Suspend<Y, R>> {
        self.context.step(())
    }

    pub fn take_return(&mut self) -> Result<R> {
        self.context.take_return()
    }

    pub fn cancel(&mut self) {
        self.context.cancel()
    }

    pub fn is_active(&self) -> bool {
        self.context.is_active()
    }

    pub fn state(&self) -> State {
        self.context.state()
    }

    pub fn context(&self) -> &Context<'a, (), Y, R> {
        &self.context
    }
}

impl<'a, Y: 'a, R: 'a> Iterator for Pull<'a, Y, R> {
    type Item = Y;

    fn next(&mut self) -> Option<Y> {
        if !self.is_active() {
            return None;
        }
        match self.resume().ok()? {
            State::Done => None,
            _ => self.get().ok(),
        }
    }
}

impl<'a, Y: 'a, R: 'a> FusedIterator for Pull<'a, Y, R> {}
