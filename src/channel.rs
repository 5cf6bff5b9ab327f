use core::fmt;

use log::debug;

use crate::error::Error;
use crate::error::Result;

/// Which way a [`Channel`] carries its payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the coroutine body to the driver that resumed it.
    BodyToDriver,
    /// From the driver into the body, as the input of a resume.
    DriverToBody,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::BodyToDriver => "body->driver",
            Direction::DriverToBody => "driver->body",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-slot handoff point for payloads crossing a control transfer.
///
/// The payload type fixes the shape of every transfer: `()` for a bare
/// signal, `T` for one value, `(A, B)` for a pair that always travels
/// together. At most one payload is in flight. Each payload can be taken
/// exactly once; taking from an empty channel is an error rather than a
/// stale read.
///
/// ```rust
/// use symco::{Channel, Direction, Error};
///
/// let mut channel = Channel::new(Direction::BodyToDriver);
/// channel.send((7, 11));
/// assert_eq!(channel.take(), Ok((7, 11)));
/// assert_eq!(channel.take(), Err(Error::EmptyChannel));
/// ```
pub struct Channel<T> {
    slot: Option<T>,
    direction: Direction,
    transfers: u64,
}

impl<T> Channel<T> {
    pub fn new(direction: Direction) -> Self {
        Channel {
            slot: None,
            direction,
            transfers: 0,
        }
    }

    /// Places `value` in the slot.
    ///
    /// A transfer consumes the previous slot contents: if the receiving side
    /// never read the last payload, it is handed back here and will not be
    /// observed through the channel.
    pub fn send(&mut self, value: T) -> Option<T> {
        self.transfers += 1;
        let unread = self.slot.replace(value);
        if unread.is_some() {
            debug!(
                "{} channel: transfer #{} replaced an unread payload",
                self.direction, self.transfers
            );
        }
        unread
    }

    /// Takes the pending payload.
    pub fn take(&mut self) -> Result<T> {
        self.slot.take().ok_or(Error::EmptyChannel)
    }

    /// Drops any pending payload.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of payloads ever sent through this channel.
    pub fn transfers(&self) -> u64 {
        self.transfers
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("direction", &self.direction)
            .field("pending", &self.is_pending())
            .field("transfers", &self.transfers)
            .finish()
    }
}
