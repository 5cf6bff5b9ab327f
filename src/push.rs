use crate::context::Context;
use crate::context::State;
use crate::context::Yielder;
use crate::error::Error;
use crate::error::Result;
use crate::stack::Builder;

/// The body's end of a [`Push`] coroutine: the values the driver sends, in
/// the order they were sent.
///
/// Each [`recv`](Source::recv) after the first suspends the body until the
/// driver sends the next value. Once the driver calls
/// [`Push::finish`], `recv` returns `None` and keeps returning it without
/// suspending again.
pub struct Source<'s, 'y, T> {
    yielder: &'s mut Yielder<'y, Option<T>, ()>,
    first: Option<Option<T>>,
    exhausted: bool,
}

impl<T> Source<'_, '_, T> {
    pub fn recv(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        let item = match self.first.take() {
            Some(item) => item,
            None => self.yielder.suspend(()),
        };
        self.exhausted = item.is_none();
        item
    }
}

impl<T> Iterator for Source<'_, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.recv()
    }
}

/// A consumer coroutine: the driver pushes values into a running body.
///
/// From the driver's side, [`send`](Push::send) looks like an ordinary
/// callback, which lets traversal code feed items to logic that processes
/// them incrementally without knowing about coroutines.
///
/// ```rust
/// use symco::Push;
///
/// let mut push = Push::new(|source| source.sum::<i32>()).unwrap();
/// for n in [1, 2, 3] {
///     push.send(n).unwrap();
/// }
/// assert_eq!(push.finish(), Ok(6));
/// ```
#[derive(Debug)]
pub struct Push<'a, T, R> {
    context: Context<'a, Option<T>, (), R>,
}

impl<'a, T, R> Push<'a, T, R>
where
    T: 'a,
    R: 'a,
{
    pub fn new<F>(body: F) -> Result<Self>
    where
        F: FnOnce(&mut Source<'_, '_, T>) -> R + 'a,
    {
        Self::with_builder(Builder::new(), body)
    }

    pub fn with_builder<F>(builder: Builder, body: F) -> Result<Self>
    where
        F: FnOnce(&mut Source<'_, '_, T>) -> R + 'a,
    {
        let context = builder.spawn::<Option<T>, (), R, _>(move |yielder, first| {
            let mut source = Source {
                yielder,
                first: Some(first),
                exhausted: false,
            };
            body(&mut source)
        })?;
        Ok(Push { context })
    }

    /// Resumes the body with `value`. Returns once the body asks for the
    /// next value ([`State::Suspended`]) or returns ([`State::Done`]).
    pub fn send(&mut self, value: T) -> Result<State> {
        let state = self.context.resume(Some(value))?;
        if state == State::Suspended {
            // The body's request for more input carries no payload.
            self.context.take_yield()?;
        }
        Ok(state)
    }

    /// Signals the end of input and returns the body's terminal value.
    pub fn finish(mut self) -> Result<R> {
        if self.context.is_active() && self.context.resume(None)? != State::Done {
            return Err(Error::NotFinished);
        }
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
}
