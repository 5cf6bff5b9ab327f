//! Stackful coroutine contexts.
//!
//! A [`Context`] owns a separate call stack on which its body runs. The driver
//! and the body take turns: `resume()` jumps onto the body's stack, and the
//! body's [`Yielder::suspend`] jumps straight back into the blocked `resume()`
//! call. Neither side ever runs while the other does.

use core::fmt;
use std::borrow::Cow;
use std::cell::RefCell;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;
use std::thread;

use generator::Gn;
use generator::LocalGenerator;
use log::debug;
use log::trace;
use log::warn;

use crate::channel::Channel;
use crate::channel::Direction;
use crate::error::Error;
use crate::error::Result;
use crate::stack::Builder;
use crate::suspend::Suspend;

/// Where a [`Context`] is in its lifecycle.
///
/// `Created → Suspended ⇄ Running → Done`. Nothing leaves `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// The body has not run yet.
    Created,
    /// The body transferred a payload and is waiting to be resumed.
    Suspended,
    /// The body is executing inside a `resume()` call.
    Running,
    /// The body returned, panicked, or was cancelled.
    Done,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::Created => "created",
            State::Suspended => "suspended",
            State::Running => "running",
            State::Done => "done",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The body's handle for transferring control back to the driver.
///
/// Every [`suspend`](Yielder::suspend) hands one payload of type `Y` to the
/// driver and blocks the body, with its whole call chain intact, until the
/// driver resumes it with the next input of type `I`.
pub struct Yielder<'y, I, Y> {
    transfer: &'y mut dyn FnMut(Y),
    inbox: &'y RefCell<Channel<I>>,
}

impl<I, Y> Yielder<'_, I, Y> {
    /// Transfers `value` to the driver and returns the input the driver
    /// resumes with.
    ///
    /// If the context is dropped or cancelled while the body waits here, the
    /// call never returns: the body's stack is unwound from this point.
    pub fn suspend(&mut self, value: Y) -> I {
        (self.transfer)(value);
        match self.inbox.borrow_mut().take() {
            Ok(input) => input,
            Err(_) => unreachable!("coroutine resumed without an input"),
        }
    }
}

/// An independently suspendable execution with its own call stack.
///
/// The body is a closure receiving a [`Yielder`] and the first resume input.
/// It transfers payloads of type `Y` to the driver through a single-slot
/// [`Channel`], and may finally return a terminal value of type `R`. The
/// terminal value never travels through the channel; it is handed out once
/// by [`take_return`](Context::take_return).
///
/// ```rust
/// use symco::{Context, Error, State};
///
/// let mut context = Context::new(|yielder, ()| {
///     yielder.suspend(5);
///     yielder.suspend(7);
///     11
/// })
/// .unwrap();
///
/// let mut channel = Vec::new();
/// while context.resume(()).unwrap() == State::Suspended {
///     channel.push(context.take_yield().unwrap());
/// }
/// assert_eq!(channel, [5, 7]);
/// assert_eq!(context.take_return(), Ok(11));
/// assert_eq!(context.take_return(), Err(Error::NoReturnValue));
/// assert_eq!(context.resume(()), Err(Error::Finished));
/// ```
///
/// Dropping a context whose body has started but not finished unwinds the
/// body's stack, running its pending destructors exactly once.
/// [`cancel`](Context::cancel) does the same thing without dropping.
pub struct Context<'a, I, Y, R> {
    generator: Option<LocalGenerator<'a, (), Suspend<Y, R>>>,
    inbox: Rc<RefCell<Channel<I>>>,
    outbox: Channel<Y>,
    terminal: Option<R>,
    state: State,
    cancelled: bool,
    name: Cow<'static, str>,
}

impl<'a, I, Y, R> Context<'a, I, Y, R>
where
    I: 'a,
    Y: 'a,
    R: 'a,
{
    /// Creates a context with the default [`Builder`] settings.
    pub fn new<F>(body: F) -> Result<Self>
    where
        F: FnOnce(&mut Yielder<'_, I, Y>, I) -> R + 'a,
    {
        Self::with_builder(Builder::new(), body)
    }

    pub fn with_builder<F>(builder: Builder, body: F) -> Result<Self>
    where
        F: FnOnce(&mut Yielder<'_, I, Y>, I) -> R + 'a,
    {
        let Builder { stack_size, name } = builder;
        let words = stack_size.words()?;
        let inbox = Rc::new(RefCell::new(Channel::new(Direction::DriverToBody)));
        let body_inbox = Rc::clone(&inbox);

        // The stack is mapped here; a failed mapping panics inside the
        // generator crate.
        let generator = panic::catch_unwind(AssertUnwindSafe(move || {
            Gn::<()>::new_scoped_opt_local(words, move |mut scope| {
                let input = match body_inbox.borrow_mut().take() {
                    Ok(input) => input,
                    Err(_) => unreachable!("coroutine started without an input"),
                };
                let mut transfer = |value: Y| {
                    scope.yield_with(Suspend::Yield(value));
                };
                let mut yielder = Yielder {
                    transfer: &mut transfer,
                    inbox: &body_inbox,
                };
                Suspend::Return(body(&mut yielder, input))
            })
        }))
        .map_err(|_| Error::StackExhausted { words })?;

        debug!("{name}: created with a stack of {words} words");
        Ok(Context {
            generator: Some(generator),
            inbox,
            outbox: Channel::new(Direction::BodyToDriver),
            terminal: None,
            state: State::Created,
            cancelled: false,
            name,
        })
    }

    /// Transfers control into the body until it suspends or finishes.
    ///
    /// Returns [`State::Suspended`] when the body transferred a payload (read
    /// it with [`take_yield`](Context::take_yield)) or [`State::Done`] when it
    /// returned (collect the result with
    /// [`take_return`](Context::take_return)). A panic in the body marks the
    /// context done and then continues unwinding into the caller.
    pub fn resume(&mut self, input: I) -> Result<State> {
        if self.state == State::Done {
            return Err(Error::Finished);
        }
        let Some(generator) = self.generator.as_mut() else {
            return Err(Error::Finished);
        };

        self.inbox.borrow_mut().send(input);
        self.state = State::Running;
        trace!("{}: resuming", self.name);

        match panic::catch_unwind(AssertUnwindSafe(|| generator.resume())) {
            Ok(Some(Suspend::Yield(value))) => {
                self.outbox.send(value);
                self.state = State::Suspended;
                trace!(
                    "{}: suspended after transfer #{}",
                    self.name,
                    self.outbox.transfers()
                );
                Ok(State::Suspended)
            }
            Ok(Some(Suspend::Return(value))) => {
                self.terminal = Some(value);
                self.finish();
                Ok(State::Done)
            }
            Ok(None) => {
                self.finish();
                Ok(State::Done)
            }
            Err(payload) => {
                debug!("{}: body panicked", self.name);
                self.finish();
                panic::resume_unwind(payload)
            }
        }
    }

    /// Resumes the body and takes whatever it produced.
    pub fn step(&mut self, input: I) -> Result<Suspend<Y, R>> {
        match self.resume(input)? {
            State::Done => self.take_return().map(Suspend::Return),
            _ => self.take_yield().map(Suspend::Yield),
        }
    }

    /// Reads the payload of the latest transfer. Each payload can be read
    /// once.
    pub fn take_yield(&mut self) -> Result<Y> {
        self.outbox.take()
    }

    /// Takes the value the body returned. Available once, after the context
    /// is done, and only if the body ran to completion.
    pub fn take_return(&mut self) -> Result<R> {
        if self.state != State::Done {
            return Err(Error::NotFinished);
        }
        self.terminal.take().ok_or(Error::NoReturnValue)
    }

    /// Unwinds a suspended body, running its pending destructors, and marks
    /// the context done. A body that never started is dropped without
    /// running. Does nothing on a finished context.
    pub fn cancel(&mut self) {
        if self.state == State::Done {
            return;
        }
        debug!("{}: cancelled while {}", self.name, self.state);
        self.cancelled = true;
        self.finish();
    }

    /// True while the context can still be resumed.
    pub fn is_active(&self) -> bool {
        self.state != State::Done
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of payloads the body has transferred to the driver.
    pub fn transfers(&self) -> u64 {
        self.outbox.transfers()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn finish(&mut self) {
        self.state = State::Done;
        // Dropping an unfinished generator unwinds its stack.
        self.generator = None;
        self.inbox.borrow_mut().clear();
        self.outbox.clear();
        if !self.cancelled {
            debug!(
                "{}: finished after {} transfers",
                self.name,
                self.outbox.transfers()
            );
        }
    }
}

impl<I, Y, R> Drop for Context<'_, I, Y, R> {
    fn drop(&mut self) {
        if self.state == State::Done || self.state == State::Created {
            return;
        }
        // A second panic cannot start while this thread is unwinding, so the
        // generator skips unwinding the body and its stack is released as is.
        if thread::panicking() {
            warn!(
                "{}: dropped while {} during a panic; the body's destructors will not run",
                self.name, self.state
            );
        } else {
            debug!("{}: dropped while {}", self.name, self.state);
        }
    }
}

impl<I, Y, R> fmt::Debug for Context<'_, I, Y, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("outbox", &self.outbox)
            .field("has_terminal", &self.terminal.is_some())
            .field("cancelled", &self.cancelled)
            .finish()
    }
}
