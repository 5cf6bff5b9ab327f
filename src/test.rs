use std::cell::Cell;
use std::panic;
use std::panic::AssertUnwindSafe;

use crate::*;

struct DropCounter<'c>(&'c Cell<u32>);

impl Drop for DropCounter<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn body_does_not_run_before_first_resume() {
    let ran = Cell::new(false);
    let context = Context::<(), (), ()>::new(|_, ()| ran.set(true)).unwrap();
    assert_eq!(context.state(), State::Created);
    assert!(context.is_active());
    drop(context);
    assert!(!ran.get());
}

#[test]
fn values_then_terminal_value() {
    Pull::new(|yielder| {
        yielder.suspend(5);
        yielder.suspend(7);
        11
    })
    .unwrap()
    .assert_yields(5)
    .assert_yields(7)
    .assert_returns(11)
    .assert_finished();
}

#[test]
fn terminal_value_without_transfers() {
    let mut context = Context::new(|_: &mut Yielder<'_, (), i32>, ()| "only").unwrap();
    assert_eq!(context.resume(()), Ok(State::Done));
    assert_eq!(context.transfers(), 0);
    assert_eq!(context.take_yield(), Err(Error::EmptyChannel));
    assert_eq!(context.take_return(), Ok("only"));
    assert_eq!(context.take_return(), Err(Error::NoReturnValue));
}

#[test]
fn terminal_value_is_not_available_early() {
    let mut pull = Pull::new(|yielder| {
        yielder.suspend(1);
        2
    })
    .unwrap();
    assert_eq!(pull.take_return(), Err(Error::NotFinished));
    assert_eq!(pull.resume(), Ok(State::Suspended));
    assert_eq!(pull.take_return(), Err(Error::NotFinished));
    assert_eq!(pull.get(), Ok(1));
    assert_eq!(pull.get(), Err(Error::EmptyChannel));
}

#[test]
fn resuming_a_done_context_is_rejected() {
    let mut context = Context::new(|yielder: &mut Yielder<'_, i32, i32>, n| {
        yielder.suspend(n + 1)
    })
    .unwrap();
    assert_eq!(context.step(1), Ok(Yield(2)));
    assert_eq!(context.step(10), Ok(Return(10)));
    assert_eq!(context.state(), State::Done);
    assert_eq!(context.resume(0), Err(Error::Finished));
    assert_eq!(context.step(0), Err(Error::Finished));
}

#[test]
fn inputs_flow_into_the_body_in_order() {
    let mut context = Context::new(|yielder: &mut Yielder<'_, i32, i32>, first| {
        let mut total = first;
        for _ in 0..3 {
            total += yielder.suspend(total);
        }
        total
    })
    .unwrap();
    assert_eq!(context.step(1), Ok(Yield(1)));
    assert_eq!(context.step(2), Ok(Yield(3)));
    assert_eq!(context.step(3), Ok(Yield(6)));
    assert_eq!(context.step(4), Ok(Return(10)));
}

#[test]
fn suspends_from_deep_in_the_call_stack() {
    fn countdown(yielder: &mut Yielder<'_, (), u32>, n: u32) {
        if n > 0 {
            yielder.suspend(n);
            countdown(yielder, n - 1);
        }
    }
    let pull = Pull::new(|yielder| countdown(yielder, 50)).unwrap();
    let values: Vec<u32> = pull.collect();
    assert_eq!(values, (1..=50).rev().collect::<Vec<_>>());
}

#[test]
fn pair_is_delivered_whole() {
    let mut pull = Pull::new(|yielder| {
        yielder.suspend((7, 11));
        yielder.suspend((13, 17));
    })
    .unwrap();
    assert_eq!(pull.next(), Some((7, 11)));
    assert_eq!(pull.next(), Some((13, 17)));
    assert_eq!(pull.next(), None);
    assert_eq!(pull.take_return(), Ok(()));
}

#[test]
fn iteration_skips_the_terminal_value() {
    let mut pull = Pull::new(|yielder| {
        yielder.suspend("a");
        yielder.suspend("b");
        "terminal"
    })
    .unwrap();
    assert_eq!(pull.by_ref().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(pull.next(), None);
    assert_eq!(pull.take_return(), Ok("terminal"));
}

#[test]
fn unread_payload_is_replaced_by_the_next_transfer() {
    let mut pull = Pull::new(|yielder| {
        yielder.suspend(1);
        yielder.suspend(2);
    })
    .unwrap();
    assert_eq!(pull.resume(), Ok(State::Suspended));
    assert_eq!(pull.resume(), Ok(State::Suspended));
    assert_eq!(pull.get(), Ok(2));
    assert_eq!(pull.context().transfers(), 2);
}

#[test]
fn skipped_payload_is_gone_once_done() {
    let mut pull = Pull::new(|yielder| {
        yielder.suspend(5);
        11
    })
    .unwrap();
    assert_eq!(pull.resume(), Ok(State::Suspended));
    assert_eq!(pull.resume(), Ok(State::Done));
    assert_eq!(pull.get(), Err(Error::EmptyChannel));
    assert_eq!(pull.take_return(), Ok(11));
}

#[test]
fn drop_unwinds_a_suspended_body_once() {
    let drops = Cell::new(0);
    let after = Cell::new(false);
    {
        let mut pull = Pull::new(|yielder| {
            let _guard = DropCounter(&drops);
            yielder.suspend(1);
            yielder.suspend(2);
            after.set(true);
        })
        .unwrap();
        pull.assert_yields(1);
        assert_eq!(drops.get(), 0);
    }
    assert_eq!(drops.get(), 1);
    assert!(!after.get());
}

#[test]
fn drop_during_a_driver_panic_leaves_the_body_in_place() {
    let drops = Cell::new(0);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut pull = Pull::new(|yielder| {
            let _guard = DropCounter(&drops);
            yielder.suspend(1);
        })
        .unwrap();
        assert_eq!(pull.next(), Some(1));
        panic!("driver failed");
    }));
    assert!(outcome.is_err());
    // No second unwind can start while the driver unwinds.
    assert_eq!(drops.get(), 0);
}

#[test]
fn cancel_unwinds_and_finishes() {
    let drops = Cell::new(0);
    let mut pull = Pull::new(|yielder| {
        let _guard = DropCounter(&drops);
        yielder.suspend(1);
        yielder.suspend(2);
        3
    })
    .unwrap();
    pull.assert_yields(1);
    pull.cancel();
    assert_eq!(drops.get(), 1);
    assert_eq!(pull.state(), State::Done);
    assert!(pull.context().is_cancelled());
    assert_eq!(pull.take_return(), Err(Error::NoReturnValue));
    assert_eq!(pull.resume(), Err(Error::Finished));
    pull.cancel();
    drop(pull);
    assert_eq!(drops.get(), 1);
}

#[test]
fn cancel_before_start_never_runs_the_body() {
    let ran = Cell::new(false);
    let mut pull = Pull::<(), ()>::new(|_| ran.set(true)).unwrap();
    pull.cancel();
    assert!(!pull.is_active());
    assert_eq!(pull.next(), None);
    assert!(!ran.get());
}

#[test]
fn completed_body_is_not_unwound_again() {
    let drops = Cell::new(0);
    let mut pull = Pull::new(|yielder| {
        let _guard = DropCounter(&drops);
        yielder.suspend(1);
    })
    .unwrap();
    assert_eq!(pull.by_ref().count(), 1);
    assert_eq!(drops.get(), 1);
    pull.cancel();
    assert!(!pull.context().is_cancelled());
    drop(pull);
    assert_eq!(drops.get(), 1);
}

#[test]
fn panic_in_body_finishes_the_context() {
    let mut pull = Pull::<i32, ()>::new(|yielder| {
        yielder.suspend(1);
        panic!("body failed");
    })
    .unwrap();
    pull.assert_yields(1);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| pull.resume()));
    assert!(outcome.is_err());
    assert_eq!(pull.state(), State::Done);
    assert_eq!(pull.resume(), Err(Error::Finished));
}

#[test]
fn push_feeds_values_in_order() {
    let mut push = Push::new(|source| source.collect::<Vec<i32>>()).unwrap();
    assert_eq!(push.state(), State::Created);
    for n in [4, 8, 15, 16] {
        assert_eq!(push.send(n), Ok(State::Suspended));
    }
    assert_eq!(push.finish(), Ok(vec![4, 8, 15, 16]));
}

#[test]
fn push_body_can_stop_early() {
    let mut push = Push::new(|source| source.recv().map(|n: i32| n * 2)).unwrap();
    assert_eq!(push.send(21), Ok(State::Done));
    assert!(!push.is_active());
    assert_eq!(push.send(1), Err(Error::Finished));
    assert_eq!(push.finish(), Ok(Some(42)));
}

#[test]
fn push_finish_without_values() {
    let push = Push::<u8, _>::new(|source| source.count()).unwrap();
    assert_eq!(push.finish(), Ok(0));
}

#[test]
fn push_recv_stays_exhausted() {
    let push = Push::<u8, _>::new(|source| {
        let first = source.recv();
        let second = source.recv();
        (first, second)
    })
    .unwrap();
    assert_eq!(push.finish(), Ok((None, None)));
}

#[test]
fn builder_settings_reach_the_context() {
    let mut context = Builder::new()
        .name("adder")
        .stack_size(StackSize::Words(MIN_STACK_WORDS))
        .spawn(|yielder: &mut Yielder<'_, i32, i32>, a| a + yielder.suspend(a))
        .unwrap();
    assert_eq!(context.name(), "adder");
    assert_eq!(context.step(2), Ok(Yield(2)));
    assert_eq!(context.step(3), Ok(Return(5)));
}

#[test]
fn bad_stack_policy_fails_creation() {
    let result = Builder::new()
        .stack_size(StackSize::Words(1))
        .spawn(|_: &mut Yielder<'_, (), ()>, ()| ());
    assert_eq!(
        result.unwrap_err(),
        Error::StackTooSmall {
            words: 1,
            min: MIN_STACK_WORDS
        }
    );

    let result = Pull::<(), ()>::with_builder(
        Builder::new().stack_size(StackSize::Words(usize::MAX)),
        |_| (),
    );
    assert_eq!(
        result.unwrap_err(),
        Error::StackExhausted { words: usize::MAX }
    );
}
