// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use super::{Error, Word};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Instruction {
	Add,
	Multiply,
	Input,
	Output,
	JumpIfTrue,
	JumpIfFalse,
	LessThan,
	Equals,
	AdjustRelativeBase,
	Halt,
}

impl Instruction {
	#[cfg(test)]
	pub(crate) fn code(self) -> Word {
		use Instruction::*;
		match self {
			Add => 1,
			Multiply => 2,
			Input => 3,
			Output => 4,
			JumpIfTrue => 5,
			JumpIfFalse => 6,
			LessThan => 7,
			Equals => 8,
			AdjustRelativeBase => 9,
			Halt => 99,
		}
	}

	/// Number of parameters following the opcode word.
	pub(crate) fn arity(self) -> usize {
		use Instruction::*;
		match self {
			Add | Multiply | LessThan | Equals => 3,
			JumpIfTrue | JumpIfFalse => 2,
			Input | Output | AdjustRelativeBase => 1,
			Halt => 0,
		}
	}
}

impl TryFrom<Word> for Instruction {
	type Error = Word;
	fn try_from(code: Word) -> Result<Self, Self::Error> {
		use Instruction::*;
		match code {
			1 => Ok(Add),
			2 => Ok(Multiply),
			3 => Ok(Input),
			4 => Ok(Output),
			5 => Ok(JumpIfTrue),
			6 => Ok(JumpIfFalse),
			7 => Ok(LessThan),
			8 => Ok(Equals),
			9 => Ok(AdjustRelativeBase),
			99 => Ok(Halt),
			invalid => Err(invalid),
		}
	}
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Mode {
	#[default]
	Position,
	Immediate,
	Relative,
}

impl TryFrom<Word> for Mode {
	type Error = Error;
	fn try_from(digit: Word) -> Result<Self, Self::Error> {
		match digit {
			0 => Ok(Mode::Position),
			1 => Ok(Mode::Immediate),
			2 => Ok(Mode::Relative),
			invalid => Err(Error::InvalidAddressingMode(invalid)),
		}
	}
}


const MAX_ARITY: usize = 3;
const MODE_COEFFS: [Word; MAX_ARITY] = [100, 1000, 10000];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decoded {
	pub(crate) instruction: Instruction,
	modes: [Mode; MAX_ARITY],
}

impl Decoded {
	/// One mode per parameter, in parameter order.
	pub(crate) fn modes(&self) -> &[Mode] {
		&self.modes[..self.instruction.arity()]
	}

	pub(crate) fn mode(&self, param: usize) -> Mode {
		self.modes()[param]
	}
}

/// Splits an opcode word into its instruction (the low two decimal digits)
/// and one addressing mode per parameter (the digits above those, read
/// right-to-left; missing digits mean position mode).
pub(crate) fn decode(word: Word) -> Result<Decoded, Error> {
	if word < 0 { return Err(Error::Decode(word)) }
	let instruction = Instruction::try_from(word % 100).map_err(|_| Error::Decode(word))?;
	let mut modes = [Mode::Position; MAX_ARITY];
	for (mode, coeff) in modes.iter_mut().zip(MODE_COEFFS).take(instruction.arity()) {
		*mode = Mode::try_from(word / coeff % 10)?;
	}
	Ok(Decoded { instruction, modes })
}
