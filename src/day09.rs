// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::{anyhow, Result};
use crate::intcode::{self, Word};


/// The BOOST program outputs the opcodes it found malfunctioning before its
/// keycode, so anything but a single output means something is broken.
fn boost(input: &str, mode: Word) -> Result<String> {
	use itertools::Itertools as _;
	intcode::run_with_input(intcode::load(input)?, mode)?
		.into_iter()
		.exactly_one()
		.map(|keycode| keycode.to_string())
		.map_err(|outputs| anyhow!("malfunctioning opcodes reported: {}", outputs.format(",")))
}


pub(crate) fn part1(input: &str) -> Result<String> {
	boost(input, 1)
}


pub(crate) fn part2(input: &str) -> Result<String> {
	boost(input, 2)
}


#[test]
fn tests() {
	const INPUTS: [&str; 3] = [
		"109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99",
		"1102,34915192,34915192,7,4,7,99,0",
		"104,1125899906842624,99",
	];
	assert_eq!(part1(INPUTS[0]).unwrap_err().to_string(),
		format!("malfunctioning opcodes reported: {}", INPUTS[0]));
	assert_eq!(part1(INPUTS[1]).unwrap(), "1219070632396864");
	assert_eq!(part2(INPUTS[2]).unwrap(), "1125899906842624");
	assert_eq!(part2("3,1985,109,2000,109,19,204,-34,99").unwrap(), "2");
	assert!(part1("99").is_err());
}
