// Copyright (c) 2022 Bastiaan Marinus van de Weerd

//! The only places a running machine may block.

use std::collections::VecDeque;
use super::Word;

use crossbeam_channel::{Receiver, Sender};


/// The other side of a stream went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Closed;

pub(crate) trait Input {
	/// Takes the next value, blocking until one is available if the stream
	/// has live producers.
	fn pull(&mut self) -> Result<Word, Closed>;
}

pub(crate) trait Output {
	fn push(&mut self, value: Word) -> Result<(), Closed>;
}


/// An unbounded FIFO stream connecting one producer to one consumer.
pub(crate) fn channel() -> (Sender<Word>, Receiver<Word>) {
	crossbeam_channel::unbounded()
}

impl Input for Receiver<Word> {
	fn pull(&mut self) -> Result<Word, Closed> {
		self.recv().map_err(|_| Closed)
	}
}

impl Output for Sender<Word> {
	fn push(&mut self, value: Word) -> Result<(), Closed> {
		self.send(value).map_err(|_| Closed)
	}
}

/// Nothing else can feed a local queue, so running dry means closed.
impl Input for VecDeque<Word> {
	fn pull(&mut self) -> Result<Word, Closed> {
		self.pop_front().ok_or(Closed)
	}
}

impl Output for Vec<Word> {
	fn push(&mut self, value: Word) -> Result<(), Closed> {
		Vec::push(self, value);
		Ok(())
	}
}

impl<I: Input + ?Sized> Input for &mut I {
	fn pull(&mut self) -> Result<Word, Closed> {
		(**self).pull()
	}
}

impl<O: Output + ?Sized> Output for &mut O {
	fn push(&mut self, value: Word) -> Result<(), Closed> {
		(**self).push(value)
	}
}
