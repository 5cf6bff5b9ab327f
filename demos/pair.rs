// Shows the two ways a body can hand values to its driver: fixed-shape
// payloads through the channel, and a terminal value returned once at the
// end.

use symco::{Pull, State};

fn main() -> symco::Result<()> {
    let _ = env_logger::builder().try_init();

    // Every transfer carries exactly one (x, y) pair.
    let mut pairs = Pull::new(|yielder| {
        yielder.suspend((7, 11));
    })?;
    for (x, y) in pairs.by_ref() {
        println!("pair: x={x} y={y}");
    }

    // Two values through the channel, then a terminal value that bypasses it.
    let mut numbers = Pull::new(|yielder| {
        yielder.suspend(5);
        yielder.suspend(7);
        11
    })?;
    while numbers.resume()? == State::Suspended {
        println!("through the channel: {}", numbers.get()?);
    }
    println!("terminal value: {}", numbers.take_return()?);
    Ok(())
}
