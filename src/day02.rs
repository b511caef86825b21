// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::{bail, Context as _, Result};
use crate::intcode::{self, Machine, Memory, State, Word};


const TARGET: Word = 19690720;

fn run_patched(program: &Memory, noun: Word, verb: Word) -> Result<Word> {
	let mut machine = Machine::new(program.clone());
	machine.poke(1, noun);
	machine.poke(2, verb);
	match machine.resume(None)? {
		(_, State::Halted) => Ok(machine.peek(0)),
		(_, state) => bail!("gravity assist program stopped in state {state:?}"),
	}
}


pub(crate) fn part1(input: &str) -> Result<String> {
	run_patched(&intcode::load(input)?, 12, 2).map(|output| output.to_string())
}


pub(crate) fn part2(input: &str) -> Result<String> {
	use itertools::Itertools as _;
	let program = intcode::load(input)?;
	(0..100).cartesian_product(0..100)
		.find(|&(noun, verb)| matches!(run_patched(&program, noun, verb), Ok(TARGET)))
		.map(|(noun, verb)| (100 * noun + verb).to_string())
		.with_context(|| format!("no noun and verb produce {TARGET}"))
}


#[test]
fn tests() {
	const INPUT: &str = "1,9,10,3,2,3,11,0,99,30,40,50";
	let program = intcode::load(INPUT).unwrap();
	assert_eq!(run_patched(&program, 9, 10).unwrap(), 3500);
	assert_eq!(run_patched(&program, 10, 9).unwrap(), 3500);
	assert_eq!(run_patched(&program, 11, 10).unwrap(), (50 + 40) * 50);
	assert!(run_patched(&intcode::load("3,0,99").unwrap(), 0, 0).is_err());

	// Position 12 is past the end, which reads as zero.
	assert_eq!(part1("1,0,0,0,99").unwrap(), "2");
	assert_eq!(part2("1,0,0,0,99").unwrap_err().to_string(), "no noun and verb produce 19690720");
	assert_eq!(part2("1,0,0,0,99,19690720").unwrap(), "305");
}
