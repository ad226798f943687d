extern crate clap;
extern crate env_logger;
extern crate libc;
#[macro_use]
extern crate log;
extern crate qsketch;

use clap::Parser;
use std::io::{stderr, Write};
use std::process;

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let config = qsketch::Config::parse();
  if let Err(err) = qsketch::run(&config) {
    error!("{}", err);
    let _ = writeln!(&mut stderr(), "error: {}", err);
    process::exit(libc::EXIT_FAILURE);
  }
  process::exit(libc::EXIT_SUCCESS);
}
