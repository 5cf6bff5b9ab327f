use std::borrow::Cow;

use crate::context::Context;
use crate::context::Yielder;
use crate::error::Error;
use crate::error::Result;

/// Smallest stack, in machine words, a context may be created with.
pub const MIN_STACK_WORDS: usize = 0x1000;

/// Largest stack, in machine words, that will be requested from the system.
pub const MAX_STACK_WORDS: usize = 1 << 28;

/// Stack given to contexts that don't ask for a particular size.
pub const DEFAULT_STACK_WORDS: usize = 0x10000;

/// How much stack a coroutine context gets.
///
/// Sizes are counted in machine words (`usize`), the unit the underlying
/// `generator` stacks are measured in. The body's deepest call chain,
/// including any recursion it performs between transfers, has to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackSize {
    #[default]
    Default,
    Words(usize),
}

impl StackSize {
    /// Resolves the policy to a concrete word count.
    pub fn words(self) -> Result<usize> {
        match self {
            StackSize::Default => Ok(DEFAULT_STACK_WORDS),
            StackSize::Words(words) if words < MIN_STACK_WORDS => {
                Err(Error::StackTooSmall {
                    words,
                    min: MIN_STACK_WORDS,
                })
            }
            StackSize::Words(words) if words > MAX_STACK_WORDS => {
                Err(Error::StackExhausted { words })
            }
            StackSize::Words(words) => Ok(words),
        }
    }
}

/// Configuration for a new coroutine context.
///
/// ```rust
/// use symco::{Builder, StackSize, Suspend};
///
/// let mut context = Builder::new()
///     .name("doubler")
///     .stack_size(StackSize::Words(0x4000))
///     .spawn(|yielder, mut n: i32| {
///         while n < 100 {
///             n = yielder.suspend(n * 2);
///         }
///         n
///     })
///     .unwrap();
/// assert_eq!(context.step(3), Ok(Suspend::Yield(6)));
/// assert_eq!(context.step(5), Ok(Suspend::Yield(10)));
/// assert_eq!(context.step(500), Ok(Suspend::Return(500)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    pub(crate) stack_size: StackSize,
    pub(crate) name: Cow<'static, str>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            stack_size: StackSize::Default,
            name: Cow::Borrowed("coroutine"),
        }
    }

    pub fn stack_size(self, stack_size: StackSize) -> Self {
        Builder { stack_size, ..self }
    }

    /// Labels the context in log records.
    pub fn name(self, name: impl Into<Cow<'static, str>>) -> Self {
        Builder {
            name: name.into(),
            ..self
        }
    }

    /// Creates a context running `body`. The body does not start until the
    /// first `resume()`, which passes it its first input.
    pub fn spawn<'a, I, Y, R, F>(self, body: F) -> Result<Context<'a, I, Y, R>>
    where
        F: FnOnce(&mut Yielder<'_, I, Y>, I) -> R + 'a,
        I: 'a,
        Y: 'a,
        R: 'a,
    {
        Context::with_builder(self, body)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
