// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::VecDeque;
use log::{debug, trace};
use super::{
	decode, memory::address,
	operand::{resolve_destination, resolve_value},
	Closed, Error, Input, Instruction, Memory, Output, Word,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
	Running,
	/// Stopped at an input instruction with nothing to read.
	AwaitingInput,
	Halted,
	Errored,
}

/// One running instance: its memory, instruction pointer and relative base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Machine {
	memory: Memory,
	ip: usize,
	relative_base: Word,
	state: State,
}

impl Machine {
	pub(crate) fn new(memory: Memory) -> Self {
		Self { memory, ip: 0, relative_base: 0, state: State::Running }
	}

	#[cfg(test)]
	pub(crate) fn load(text: &str) -> Result<Self, Error> {
		super::load(text).map(Self::new)
	}

	#[cfg(test)]
	pub(crate) fn state(&self) -> State {
		self.state
	}

	#[cfg(test)]
	pub(crate) fn memory(&self) -> &Memory {
		&self.memory
	}

	pub(crate) fn peek(&self, address: usize) -> Word {
		self.memory.get(address)
	}

	pub(crate) fn poke(&mut self, address: usize, word: Word) {
		self.memory.set(address, word)
	}

	/// Executes a single instruction.
	///
	/// Once halted, keeps reporting [`State::Halted`]; once errored, refuses
	/// with [`Error::Terminated`].
	pub(crate) fn step(&mut self, input: &mut impl Input, output: &mut impl Output) -> Result<State, Error> {
		match self.state {
			State::Halted => return Ok(State::Halted),
			State::Errored => return Err(Error::Terminated),
			State::Running | State::AwaitingInput => (),
		}
		match self.execute(input, output) {
			Ok(state) => {
				if state == State::Halted { debug!("halted at ip {}", self.ip) }
				self.state = state;
				Ok(state)
			}
			Err(error) => {
				debug!("errored at ip {}: {error}", self.ip);
				self.state = State::Errored;
				Err(error)
			}
		}
	}

	fn execute(&mut self, input: &mut impl Input, output: &mut impl Output) -> Result<State, Error> {
		let decoded = decode(self.memory.get(self.ip))?;
		trace!("ip: {:>6} | rb: {:>6} | {:?} {:?}",
			self.ip, self.relative_base, decoded.instruction, decoded.modes());

		macro_rules! value { ( $param:literal ) => {
			resolve_value(self.ip + 1 + $param, &self.memory, decoded.mode($param), self.relative_base)?
		} }
		macro_rules! destination { ( $param:literal ) => {
			resolve_destination(self.ip + 1 + $param, &self.memory, decoded.mode($param), self.relative_base)?
		} }
		macro_rules! checked { ( $op:ident, $lhs:expr, $rhs:expr, $what:literal ) => {
			$lhs.$op($rhs).ok_or(Error::Overflow($what))?
		} }

		let mut next = self.ip + decoded.instruction.arity() + 1;
		match decoded.instruction {
			Instruction::Add => {
				let sum = checked!(checked_add, value!(0), value!(1), "add");
				self.memory.set(destination!(2), sum);
			}
			Instruction::Multiply => {
				let product = checked!(checked_mul, value!(0), value!(1), "multiply");
				self.memory.set(destination!(2), product);
			}
			Instruction::Input => {
				let dest = destination!(0);
				self.state = State::AwaitingInput;
				let word = input.pull().map_err(|Closed| Error::InputClosed)?;
				self.state = State::Running;
				self.memory.set(dest, word);
			}
			Instruction::Output => {
				output.push(value!(0)).map_err(|Closed| Error::OutputClosed)?;
			}
			Instruction::JumpIfTrue | Instruction::JumpIfFalse => {
				let (condition, target) = (value!(0), value!(1));
				if (condition != 0) == (decoded.instruction == Instruction::JumpIfTrue) {
					next = address(target)?;
				}
			}
			Instruction::LessThan => {
				let less = Word::from(value!(0) < value!(1));
				self.memory.set(destination!(2), less);
			}
			Instruction::Equals => {
				let equal = Word::from(value!(0) == value!(1));
				self.memory.set(destination!(2), equal);
			}
			Instruction::AdjustRelativeBase => {
				self.relative_base = checked!(checked_add, self.relative_base, value!(0), "relative base");
			}
			Instruction::Halt => return Ok(State::Halted),
		}
		self.ip = next;

		Ok(State::Running)
	}

	/// Whether the next instruction is an input with a valid destination.
	fn pending_input(&self) -> Result<bool, Error> {
		let decoded = decode(self.memory.get(self.ip))?;
		if decoded.instruction != Instruction::Input { return Ok(false) }
		resolve_destination(self.ip + 1, &self.memory, decoded.mode(0), self.relative_base)?;
		Ok(true)
	}

	/// Runs to completion, blocking on `input` whenever it has nothing yet.
	///
	/// Both streams are consumed: the output is dropped, and thereby closed,
	/// as soon as the machine halts or fails.
	pub(crate) fn run(&mut self, mut input: impl Input, mut output: impl Output) -> Result<(), Error> {
		loop {
			if self.step(&mut input, &mut output)? == State::Halted { return Ok(()) }
		}
	}

	/// Runs until halted, or until an input instruction finds `inputs` used
	/// up. In the latter case the instruction is left unexecuted and the
	/// machine can be resumed with more inputs.
	pub(crate) fn resume(&mut self, inputs: impl IntoIterator<Item = Word>) -> Result<(Vec<Word>, State), Error> {
		let mut inputs = inputs.into_iter().collect::<VecDeque<_>>();
		let mut outputs = Vec::new();
		loop {
			if inputs.is_empty() && matches!(self.state, State::Running | State::AwaitingInput) {
				match self.pending_input() {
					Ok(false) => (),
					Ok(true) => {
						debug!("awaiting input at ip {}", self.ip);
						self.state = State::AwaitingInput;
						return Ok((outputs, State::AwaitingInput))
					}
					Err(error) => {
						debug!("errored at ip {}: {error}", self.ip);
						self.state = State::Errored;
						return Err(error)
					}
				}
			}
			if self.step(&mut inputs, &mut outputs)? == State::Halted {
				return Ok((outputs, State::Halted))
			}
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use std::iter::empty;

	fn no_input() -> VecDeque<Word> {
		VecDeque::new()
	}

	fn log_init() {
		let _ = env_logger::builder().is_test(true).try_init();
	}

	fn run(program: &str, inputs: impl IntoIterator<Item = Word>) -> Result<Vec<Word>, Error> {
		let mut outputs = Vec::new();
		Machine::load(program)?.run(inputs.into_iter().collect::<VecDeque<_>>(), &mut outputs)?;
		Ok(outputs)
	}

	#[test]
	fn step() {
		log_init();
		let mut machine = Machine::load("1002,4,3,4,33").unwrap();
		assert_eq!(machine.step(&mut no_input(), &mut Vec::<Word>::new()), Ok(State::Running));
		assert_eq!(machine.memory().as_slice(), [1002, 4, 3, 4, 99]);
		assert_eq!(machine.step(&mut no_input(), &mut Vec::<Word>::new()), Ok(State::Halted));
		assert_eq!(machine.step(&mut no_input(), &mut Vec::<Word>::new()), Ok(State::Halted));
		assert_eq!(machine.state(), State::Halted);
	}

	#[test]
	fn gravity_assist() {
		let cases: [(&str, &[Word]); 5] = [
			("1,9,10,3,2,3,11,0,99,30,40,50", &[3500, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]),
			("1,0,0,0,99", &[2, 0, 0, 0, 99]),
			("2,3,0,3,99", &[2, 3, 0, 6, 99]),
			("2,4,4,5,99,0", &[2, 4, 4, 5, 99, 9801]),
			("1,1,1,4,99,5,6,0,99", &[30, 1, 1, 4, 2, 5, 6, 0, 99]),
		];
		for (program, memory) in cases {
			let mut machine = Machine::load(program).unwrap();
			assert_eq!(machine.resume(empty()), Ok((vec![], State::Halted)));
			assert_eq!(machine.memory().as_slice(), memory);
		}
	}

	#[test]
	fn comparisons() {
		for (program, input, output) in [
			("3,9,8,9,10,9,4,9,99,-1,8", 8, 1),
			("3,9,8,9,10,9,4,9,99,-1,8", 7, 0),
			("3,9,7,9,10,9,4,9,99,-1,8", 7, 1),
			("3,9,7,9,10,9,4,9,99,-1,8", 8, 0),
			("3,3,1108,-1,8,3,4,3,99", 8, 1),
			("3,3,1108,-1,8,3,4,3,99", 7, 0),
			("3,3,1107,-1,8,3,4,3,99", 7, 1),
			("3,3,1107,-1,8,3,4,3,99", 9, 0),
		] {
			assert_eq!(run(program, [input]), Ok(vec![output]), "{program} with {input}");
		}
	}

	#[test]
	fn jumps() {
		for program in ["3,12,6,12,15,1,13,14,13,4,13,99,-1,0,1,9", "3,3,1105,-1,9,1101,0,0,12,4,12,99,1"] {
			assert_eq!(run(program, [0]), Ok(vec![0]));
			assert_eq!(run(program, [-3]), Ok(vec![1]));
		}

		let program = indoc::indoc! { "
			3,21,1008,21,8,20,1005,20,22,107,8,21,20,1006,20,31,
			1106,0,36,98,0,0,1002,21,125,20,4,20,1105,1,46,104,
			999,1105,1,46,1101,1000,1,20,4,20,1105,1,46,98,99
		" };
		assert_eq!(run(program, [7]), Ok(vec![999]));
		assert_eq!(run(program, [8]), Ok(vec![1000]));
		assert_eq!(run(program, [9]), Ok(vec![1001]));
	}

	#[test]
	fn relative_base() {
		log_init();
		const QUINE: [Word; 16] = [109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99];
		let mut machine = Machine::new(QUINE.into_iter().collect());
		let (outputs, state) = machine.resume([0]).unwrap();
		assert_eq!(state, State::Halted);
		assert_eq!(outputs, QUINE);
		assert_eq!(machine.peek(100), 16);

		assert_eq!(run("109,-3,109,5,203,0,204,0,99", [11]), Ok(vec![11]));
		assert_eq!(run("109,19,204,-34,99", empty()), Err(Error::InvalidAddress(-15)));
	}

	#[test]
	fn large_numbers() {
		let outputs = run("1102,34915192,34915192,7,4,7,99,0", empty()).unwrap();
		assert_eq!(outputs.len(), 1);
		assert_eq!(outputs[0].to_string().len(), 16);
		assert_eq!(run("104,1125899906842624,99", empty()), Ok(vec![1125899906842624]));
		assert_eq!(run("1102,-9223372036854775807,2,0,99", empty()), Err(Error::Overflow("multiply")));
	}

	#[test]
	fn resume() {
		let mut machine = Machine::load("3,10,4,10,99").unwrap();
		let before = machine.clone();
		assert_eq!(machine.resume(empty()), Ok((vec![], State::AwaitingInput)));
		assert_eq!(machine.state(), State::AwaitingInput);
		assert_eq!(machine.memory(), before.memory());
		assert_eq!(machine.resume([1]), Ok((vec![1], State::Halted)));
		assert_eq!(machine.resume([2]), Ok((vec![], State::Halted)));

		// A bad destination fails the same way it would under `run`.
		let mut machine = Machine::load("103,5,99").unwrap();
		assert_eq!(machine.resume(empty()), Err(Error::InvalidDestinationMode));
		assert_eq!(machine.state(), State::Errored);
		assert_eq!(run("103,5,99", empty()), Err(Error::InvalidDestinationMode));
		let mut machine = Machine::load("203,-1,99").unwrap();
		assert_eq!(machine.resume(empty()), Err(Error::InvalidAddress(-1)));
	}

	#[test]
	fn errors() {
		assert_eq!(run("3,0,99", empty()), Err(Error::InputClosed));
		assert_eq!(run("1101,1,2,-1,99", empty()), Err(Error::InvalidAddress(-1)));
		assert_eq!(run("11101,1,2,3,99", empty()), Err(Error::InvalidDestinationMode));
		assert_eq!(run("42", empty()), Err(Error::Decode(42)));
		assert_eq!(run("1105,1,-2", empty()), Err(Error::InvalidAddress(-2)));
		assert_eq!(run("104,5,1105,1,7", empty()), Err(Error::Decode(0)));
		// Jump targets are resolved even when the jump is not taken.
		assert_eq!(run("106,1,-1,99", empty()), Err(Error::InvalidAddress(-1)));
		assert_eq!(run("105,0,-1,99", empty()), Err(Error::InvalidAddress(-1)));
		assert_eq!(run("1106,1,-1,99", empty()), Ok(vec![]));

		let mut machine = Machine::load("4,0,401").unwrap();
		let mut outputs: Vec<Word> = Vec::new();
		assert_eq!(machine.run(no_input(), &mut outputs), Err(Error::InvalidAddressingMode(4)));
		assert_eq!(outputs, [4]);
		assert_eq!(machine.state(), State::Errored);
		assert_eq!(machine.step(&mut no_input(), &mut outputs), Err(Error::Terminated));
		assert_eq!(machine.resume([1]), Err(Error::Terminated));
	}

	#[test]
	fn output_closed() {
		let (output, receiver) = crate::intcode::channel();
		drop(receiver);
		let mut machine = Machine::load("104,1,99").unwrap();
		assert_eq!(machine.run(no_input(), output), Err(Error::OutputClosed));
	}
}
