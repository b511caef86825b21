// Copyright (c) 2022 Bastiaan Marinus van de Weerd

//! The “Intcode computer” shared by `day02`, `day05`, `day07`, `day09` and
//! `day11`.
//!
//! A [`Machine`] owns its memory, instruction pointer and relative base, and
//! talks to the outside world only through an [`Input`] and an [`Output`].
//! Machines can be wired output-to-input through [`channel`]s and run on
//! their own threads with [`spawn`].

mod decode;
mod io;
mod machine;
mod memory;
mod operand;

use std::{collections::VecDeque, num::ParseIntError, thread::{self, JoinHandle}};
use thiserror::Error;

pub(crate) use decode::{decode, Instruction, Mode};
pub(crate) use io::{channel, Closed, Input, Output};
pub(crate) use machine::{Machine, State};
pub(crate) use memory::{load, Memory};


pub(crate) type Word = i64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum Error {
	#[error("invalid integer {token:?} at index {index} of the program")]
	Parse { index: usize, token: String, #[source] source: ParseIntError },
	#[error("opcode word {0} does not encode a known instruction")]
	Decode(Word),
	#[error("invalid addressing mode {0}")]
	InvalidAddressingMode(Word),
	#[error("immediate mode used for a write destination")]
	InvalidDestinationMode,
	#[error("negative address {0}")]
	InvalidAddress(Word),
	#[error("integer overflow in {0}")]
	Overflow(&'static str),
	#[error("input stream closed while awaiting input")]
	InputClosed,
	#[error("output stream closed by its consumer")]
	OutputClosed,
	#[error("machine already terminated with an error")]
	Terminated,
}


/// Runs a fresh machine for `memory` on its own thread.
pub(crate) fn spawn<In, Out>(memory: Memory, input: In, output: Out) -> JoinHandle<Result<(), Error>>
where In: Input + Send + 'static, Out: Output + Send + 'static {
	thread::spawn(move || Machine::new(memory).run(input, output))
}

/// Feeds `value` as the only input and collects every output until halt.
pub(crate) fn run_with_input(memory: Memory, value: Word) -> Result<Vec<Word>, Error> {
	let mut outputs = Vec::new();
	Machine::new(memory).run(VecDeque::from([value]), &mut outputs)?;
	Ok(outputs)
}
