// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{iter::once, ops::RangeInclusive};
use anyhow::{anyhow, Context as _, Result};
use log::debug;
use crate::intcode::{self, Memory, Word};


const AMPLIFIERS: usize = 5;

/// Runs one amplifier per phase setting, each on its own thread, and returns
/// the last signal the final amplifier sends to the thrusters. With
/// `feedback`, that amplifier's output is also looped back into the first.
fn amplify(program: &Memory, phase_settings: &[Word], feedback: bool) -> Result<Word> {
	let (senders, receivers): (Vec<_>, Vec<_>) = phase_settings.iter().map(|_| intcode::channel()).unzip();
	for (sender, &phase_setting) in senders.iter().zip(phase_settings) {
		sender.send(phase_setting)?;
	}
	let mut senders = senders.into_iter();
	let first = senders.next().context("no amplifiers")?;
	first.send(0)?;

	let (thrusters, signals) = intcode::channel();
	let handles = receivers.into_iter()
		.zip(senders.chain(once(thrusters)))
		.map(|(input, output)| intcode::spawn(program.clone(), input, output))
		.collect::<Vec<_>>();

	let first = feedback.then_some(first);
	let mut last_signal = None;
	for signal in &signals {
		last_signal = Some(signal);
		if let Some(first) = &first {
			// The first amplifier may already have halted.
			let _ = first.send(signal);
		}
	}
	drop(first);

	for handle in handles {
		handle.join().map_err(|_| anyhow!("amplifier thread panicked"))??;
	}
	last_signal.context("amplifiers sent no signal to the thrusters")
}

fn max_signal(input: &str, phase_settings: RangeInclusive<Word>, feedback: bool) -> Result<Word> {
	use itertools::Itertools as _;
	let program = intcode::load(input)?;
	let mut max = None;
	for phase_settings in phase_settings.permutations(AMPLIFIERS) {
		let signal = amplify(&program, &phase_settings, feedback)
			.with_context(|| format!("phase settings {phase_settings:?}"))?;
		max = max.max(Some(signal));
	}
	debug!("highest signal: {max:?}");
	max.context("no phase settings to try")
}


pub(crate) fn part1(input: &str) -> Result<String> {
	max_signal(input, 0..=4, false).map(|signal| signal.to_string())
}


pub(crate) fn part2(input: &str) -> Result<String> {
	max_signal(input, 5..=9, true).map(|signal| signal.to_string())
}


#[test]
fn tests() {
	const INPUTS: ([&str; 3], [&str; 2]) = (
		[
			"3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0",
			"3,23,3,24,1002,24,10,24,1002,23,-1,23,101,5,23,23,1,24,23,23,4,23,99,0,0",
			"3,31,3,32,1002,32,10,32,1001,31,-2,31,1007,31,0,33,1002,33,7,33,1,33,31,31,1,32,31,31,4,31,99,0,0,0",
		],
		[
			"3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,1001,28,-1,28,1005,28,6,99,0,0,5",
			"3,52,1001,52,-5,52,3,53,1,52,56,54,1007,54,5,55,1005,55,26,1001,54,-5,54,1105,1,12,1,53,54,53,1008,54,0,55,1001,55,1,55,2,53,55,53,4,53,1001,56,-1,56,1005,56,6,99,0,0,0,0,10",
		]
	);
	let load = |input: &str| intcode::load(input).unwrap();
	assert_eq!(amplify(&load(INPUTS.0[0]), &[4, 3, 2, 1, 0], false).unwrap(), 43210);
	assert_eq!(amplify(&load(INPUTS.0[1]), &[0, 1, 2, 3, 4], false).unwrap(), 54321);
	assert_eq!(amplify(&load(INPUTS.0[2]), &[1, 0, 4, 3, 2], false).unwrap(), 65210);
	assert_eq!(part1(INPUTS.0[0]).unwrap(), "43210");
	assert_eq!(part1(INPUTS.0[1]).unwrap(), "54321");
	assert_eq!(part1(INPUTS.0[2]).unwrap(), "65210");
	assert_eq!(amplify(&load(INPUTS.1[0]), &[9, 8, 7, 6, 5], true).unwrap(), 139629729);
	assert_eq!(amplify(&load(INPUTS.1[1]), &[9, 7, 8, 5, 6], true).unwrap(), 18216);
	assert_eq!(part2(INPUTS.1[0]).unwrap(), "139629729");

	// An amplifier that wants a third input fails instead of hanging.
	assert!(part1("3,0,3,0,3,0,4,0,99").is_err());
}
