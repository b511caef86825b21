// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::{BTreeMap, HashMap};
use super::{Error, Word};


/// How far past its end the dense region grows to take a write; anything
/// further away lives in the sparse map.
const MAX_DENSE_GROWTH: usize = 1 << 16;

/// Zero-filled address space seeded with a program.
///
/// Reads past the written cells yield `0` without allocating. Writes near the
/// end grow the dense region; far-away writes go to a sparse map.
#[derive(Debug, Clone, Default)]
pub(crate) struct Memory {
	dense: Vec<Word>,
	sparse: HashMap<usize, Word>,
}

pub(crate) fn address(word: Word) -> Result<usize, Error> {
	usize::try_from(word).map_err(|_| Error::InvalidAddress(word))
}

impl Memory {
	pub(crate) fn get(&self, address: usize) -> Word {
		match self.dense.get(address) {
			Some(&word) => word,
			None => self.sparse.get(&address).copied().unwrap_or(0),
		}
	}

	pub(crate) fn set(&mut self, address: usize, word: Word) {
		if address < self.dense.len() {
			self.dense[address] = word;
		} else if address - self.dense.len() <= MAX_DENSE_GROWTH {
			self.dense.resize(address + 1, 0);
			if !self.sparse.is_empty() {
				let dense = &mut self.dense;
				self.sparse.retain(|&a, &mut w| if a < dense.len() { dense[a] = w; false } else { true });
			}
			self.dense[address] = word;
		} else {
			self.sparse.insert(address, word);
		}
	}

	/// Every non-zero cell, however it is stored.
	fn non_zero(&self) -> BTreeMap<usize, Word> {
		self.dense.iter().copied().enumerate()
			.chain(self.sparse.iter().map(|(&a, &w)| (a, w)))
			.filter(|&(_, w)| w != 0)
			.collect()
	}

	/// The contiguous cells starting at address `0`.
	#[cfg(test)]
	pub(crate) fn as_slice(&self) -> &[Word] {
		&self.dense
	}
}

/// Equal when every address reads the same.
impl PartialEq for Memory {
	fn eq(&self, other: &Self) -> bool {
		self.non_zero() == other.non_zero()
	}
}

impl Eq for Memory {}

impl From<Vec<Word>> for Memory {
	fn from(dense: Vec<Word>) -> Self {
		Self { dense, sparse: HashMap::new() }
	}
}

impl FromIterator<Word> for Memory {
	fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
		Self::from(iter.into_iter().collect::<Vec<_>>())
	}
}

/// Parses comma-separated program text.
pub(crate) fn load(text: &str) -> Result<Memory, Error> {
	text.trim()
		.split(',')
		.map(str::trim)
		.enumerate()
		.map(|(index, token)| token.parse()
			.map_err(|source| Error::Parse { index, token: token.to_owned(), source }))
		.collect()
}
