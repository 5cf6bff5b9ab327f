use crate::error::Error;
use crate::pull::Pull;
use crate::suspend::Suspend::{Return, Yield};

/// Extension trait providing assertion methods for testing pull coroutines.
///
/// Import this trait in your tests to step a coroutine and check each result
/// in a single chain:
///
/// ```rust
/// use symco::{Pull, PullAssertions};
///
/// Pull::new(|yielder| {
///     yielder.suspend('a');
///     yielder.suspend('b');
///     3
/// })
/// .unwrap()
/// .assert_yields('a')
/// .assert_yields('b')
/// .assert_returns(3)
/// .assert_finished();
/// ```
pub trait PullAssertions<Y, R> {
    /// Resumes the coroutine and asserts that it transferred `expected`.
    /// Panics if the coroutine returns instead, fails to resume, or yields a
    /// different value.
    fn assert_yields(&mut self, expected: Y) -> &mut Self
    where
        Y: PartialEq + core::fmt::Debug,
        R: core::fmt::Debug;

    /// Resumes the coroutine and asserts that it returned `expected`.
    /// Panics if the coroutine yields instead or returns a different value.
    fn assert_returns(&mut self, expected: R) -> &mut Self
    where
        Y: core::fmt::Debug,
        R: PartialEq + core::fmt::Debug;

    /// Asserts that resuming is refused because the coroutine is done.
    fn assert_finished(&mut self) -> &mut Self;
}

impl<'a, Y: 'a, R: 'a> PullAssertions<Y, R> for Pull<'a, Y, R> {
    fn assert_yields(&mut self, expected: Y) -> &mut Self
    where
        Y: PartialEq + core::fmt::Debug,
        R: core::fmt::Debug,
    {
        match self.step() {
            Ok(Yield(actual)) => {
                assert_eq!(
                    actual, expected,
                    "expected Yield({expected:?}), got Yield({actual:?})"
                );
            }
            Ok(Return(actual)) => {
                panic!("expected Yield({expected:?}), got Return({actual:?})")
            }
            Err(err) => panic!("expected Yield({expected:?}), got error: {err}"),
        }
        self
    }

    fn assert_returns(&mut self, expected: R) -> &mut Self
    where
        Y: core::fmt::Debug,
        R: PartialEq + core::fmt::Debug,
    {
        match self.step() {
            Ok(Yield(actual)) => {
                panic!("expected Return({expected:?}), got Yield({actual:?})")
            }
            Ok(Return(actual)) => {
                assert_eq!(
                    actual, expected,
                    "expected Return({expected:?}), got Return({actual:?})"
                );
            }
            Err(err) => panic!("expected Return({expected:?}), got error: {err}"),
        }
        self
    }

    fn assert_finished(&mut self) -> &mut Self {
        assert!(!self.is_active(), "expected a finished coroutine");
        assert_eq!(self.resume(), Err(Error::Finished));
        self
    }
}
