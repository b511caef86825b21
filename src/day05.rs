// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::{bail, Context as _, Result};
use log::debug;
use crate::intcode::{self, Word};


const AIR_CONDITIONER: Word = 1;
const THERMAL_RADIATOR_CONTROLLER: Word = 5;

/// Every output but the last is a test result, which must be `0`; the last
/// one is the diagnostic code.
fn diagnostic_code(input: &str, system_id: Word) -> Result<Word> {
	let outputs = intcode::run_with_input(intcode::load(input)?, system_id)?;
	let (&code, tests) = outputs.split_last().context("diagnostic program produced no output")?;
	debug!("system {system_id}: {} tests passed", tests.len());
	if let Some((i, failure)) = tests.iter().enumerate().find(|&(_, &t)| t != 0) {
		bail!("diagnostic test {i} failed, off by {failure}")
	}
	Ok(code)
}


pub(crate) fn part1(input: &str) -> Result<String> {
	diagnostic_code(input, AIR_CONDITIONER).map(|code| code.to_string())
}


pub(crate) fn part2(input: &str) -> Result<String> {
	diagnostic_code(input, THERMAL_RADIATOR_CONTROLLER).map(|code| code.to_string())
}
