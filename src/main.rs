// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{fs, path::PathBuf, process::ExitCode};
use anyhow::{Context as _, Result};
use clap::Parser;
use log::info;

mod intcode;


type Solution = fn(&str) -> Result<String>;

macro_rules! days {
	( $( $day:literal ),* ) => { paste::paste! {
		$( mod [<day $day>]; )*

		#[allow(clippy::zero_prefixed_literal)]
		fn solution(day: u8, part: u8) -> Option<Solution> {
			match (day, part) {
				$(
					($day, 1) => Some([<day $day>]::part1 as Solution),
					($day, 2) => Some([<day $day>]::part2 as Solution),
				)*
				_ => None,
			}
		}
	} }
}

days!(02, 05, 07, 09, 11);


/// Run an Advent of Code 2019 solution.
#[derive(Debug, Parser)]
struct Args {
	/// Day to run
	#[arg(short, long)]
	day: u8,
	/// Part to run
	#[arg(short, long)]
	part: u8,
	/// Path to the input file [default: inputs/day<DAY>.input]
	#[arg(short, long)]
	input: Option<PathBuf>,
}

fn run(args: &Args) -> Result<String> {
	let solve = solution(args.day, args.part)
		.with_context(|| format!("no solution for day {}, part {}", args.day, args.part))?;
	let path = args.input.clone()
		.unwrap_or_else(|| PathBuf::from(format!("inputs/day{}.input", args.day)));
	info!("reading input from {}", path.display());
	let input = fs::read_to_string(&path)
		.with_context(|| format!("reading input from {}", path.display()))?;
	solve(&input)
}

fn main() -> ExitCode {
	env_logger::init();
	let args = Args::parse();
	match run(&args) {
		Ok(answer) => {
			println!("{answer}");
			ExitCode::SUCCESS
		}
		Err(e) => {
			eprintln!("day {}, part {}: {e:#}", args.day, args.part);
			ExitCode::FAILURE
		}
	}
}


#[test]
fn tests() {
	assert!(solution(2, 1).is_some());
	assert!(solution(11, 2).is_some());
	assert!(solution(3, 1).is_none());
	assert!(solution(5, 3).is_none());

	let args = Args::try_parse_from(["intcode-aoc", "-d", "4", "-p", "1"]).unwrap();
	assert_eq!(run(&args).unwrap_err().to_string(), "no solution for day 4, part 1");

	let args = Args::try_parse_from(["intcode-aoc", "--day", "9", "--part", "1", "--input", "/nonexistent/day9"]).unwrap();
	assert!(run(&args).unwrap_err().to_string().starts_with("reading input from"));
	assert!(Args::try_parse_from(["intcode-aoc", "--day", "9"]).is_err());
}
