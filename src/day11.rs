// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;
use anyhow::{anyhow, bail, Result};
use log::debug;
use crate::intcode::{self, Memory, Word};


type PaintedWhite = HashMap<[isize; 2], bool>;

#[derive(Debug, Clone, Copy)]
enum Dir { Up, Down, Left, Right }

impl Dir {
	fn turn(&mut self, left: bool) {
		use Dir::*;
		match (&self, left) {
			(Up, true) | (Down, false) => *self = Left,
			(Down, true) | (Up, false) => *self = Right,
			(Left, true) | (Right, false) => *self = Down,
			(Right, true) | (Left, false) => *self = Up,
		}
	}

	fn r#move(&self, pos: &mut [isize; 2]) {
		use Dir::*;
		match &self {
			Up => pos[1] -= 1,
			Down => pos[1] += 1,
			Left => pos[0] -= 1,
			Right => pos[0] += 1,
		}
	}
}

fn valid_output(output: Word, kind: &'static str) -> Result<Word> {
	match output {
		o @ 0..=1 => Ok(o),
		e => bail!("unexpected {kind} output {e}"),
	}
}

/// Drives the robot while its brain runs on another thread: the camera feeds
/// the colour under the robot, and each pair of outputs paints the panel and
/// turns the robot, until the brain halts.
fn paint(brain: Memory, starting_white: bool) -> Result<PaintedWhite> {
	let (camera, input) = intcode::channel();
	let (output, instructions) = intcode::channel();
	let brain = intcode::spawn(brain, input, output);

	let mut painted_white = PaintedWhite::new();
	if starting_white { painted_white.insert([0, 0], true); }
	let mut robot_pos = [0isize, 0];
	let mut robot_dir = Dir::Up;

	let unpaired = loop {
		// The brain may already have halted.
		let _ = camera.send(Word::from(*painted_white.get(&robot_pos).unwrap_or(&false)));

		let (paint_color, turn_direction) = match (instructions.recv(), instructions.recv()) {
			(Ok(o0), Ok(o1)) => (o0, o1),
			(Err(_), _) => break false,
			(Ok(_), Err(_)) => break true,
		};

		painted_white.insert(robot_pos, valid_output(paint_color, "paint color")? == 1);
		robot_dir.turn(valid_output(turn_direction, "turn direction")? == 0);
		robot_dir.r#move(&mut robot_pos);
	};
	drop(camera);

	brain.join().map_err(|_| anyhow!("robot brain thread panicked"))??;
	if unpaired { bail!("robot brain halted between painting and turning") }
	debug!("painted {} panels, ended at {robot_pos:?}", painted_white.len());
	Ok(painted_white)
}

fn render(painted_white: &PaintedWhite) -> Result<String> {
	use itertools::Itertools as _;

	let extents = [
		painted_white.keys().map(|&[x, _]| x).minmax().into_option(),
		painted_white.keys().map(|&[_, y]| y).minmax().into_option(),
	];
	let [Some((min_x, max_x)), Some((min_y, max_y))] = extents else { bail!("nothing painted") };

	Ok((min_y..=max_y)
		.map(|y| (min_x..=max_x)
			.map(|x| if painted_white.get(&[x, y]) == Some(&true) { '#' } else { '.' })
			.collect::<String>())
		.join("\n"))
}


pub(crate) fn part1(input: &str) -> Result<String> {
	paint(intcode::load(input)?, false).map(|painted| painted.len().to_string())
}


pub(crate) fn part2(input: &str) -> Result<String> {
	render(&paint(intcode::load(input)?, true)?)
}
