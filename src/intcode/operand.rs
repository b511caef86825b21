// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use super::{memory::address, Error, Memory, Mode, Word};


fn relative(param: Word, relative_base: Word) -> Result<Word, Error> {
	param.checked_add(relative_base).ok_or(Error::Overflow("relative address"))
}

/// The value of the parameter stored at `pointer`.
pub(crate) fn resolve_value(
	pointer: usize,
	memory: &Memory,
	mode: Mode,
	relative_base: Word,
) -> Result<Word, Error> {
	let param = memory.get(pointer);
	match mode {
		Mode::Position => Ok(memory.get(address(param)?)),
		Mode::Immediate => Ok(param),
		Mode::Relative => Ok(memory.get(address(relative(param, relative_base)?)?)),
	}
}

/// The address the parameter stored at `pointer` writes to.
pub(crate) fn resolve_destination(
	pointer: usize,
	memory: &Memory,
	mode: Mode,
	relative_base: Word,
) -> Result<usize, Error> {
	let param = memory.get(pointer);
	match mode {
		Mode::Position => address(param),
		Mode::Immediate => Err(Error::InvalidDestinationMode),
		Mode::Relative => address(relative(param, relative_base)?),
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use Mode::*;

	#[test]
	fn tests() {
		let memory = Memory::from(vec![1002, 4, 3, 4, 33]);
		assert_eq!(resolve_value(1, &memory, Position, 0), Ok(33));
		assert_eq!(resolve_value(2, &memory, Immediate, 0), Ok(3));
		assert_eq!(resolve_value(2, &memory, Relative, 1), Ok(33));
		assert_eq!(resolve_value(2, &memory, Relative, 100), Ok(0));
		assert_eq!(resolve_destination(3, &memory, Position, 0), Ok(4));
		assert_eq!(resolve_destination(3, &memory, Relative, -4), Ok(0));
		assert_eq!(resolve_destination(3, &memory, Immediate, 0), Err(Error::InvalidDestinationMode));
	}

	#[test]
	fn negative_addresses() {
		let memory = Memory::from(vec![204, -1, -7]);
		assert_eq!(resolve_value(1, &memory, Position, 0), Err(Error::InvalidAddress(-1)));
		assert_eq!(resolve_value(1, &memory, Immediate, 0), Ok(-1));
		assert_eq!(resolve_value(1, &memory, Relative, 1), Ok(204));
		assert_eq!(resolve_value(2, &memory, Relative, 1), Err(Error::InvalidAddress(-6)));
		assert_eq!(resolve_destination(2, &memory, Position, 0), Err(Error::InvalidAddress(-7)));
		assert_eq!(resolve_destination(1, &memory, Relative, Word::MIN), Err(Error::Overflow("relative address")));
	}
}
