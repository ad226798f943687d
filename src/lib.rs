#[macro_use]
extern crate log;
extern crate x11;

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod extension;
pub mod fbconfig;
mod gl;
pub mod render_loop;
pub mod resource;
pub mod session;
pub mod surface;
pub mod xserver;

#[cfg(test)]
mod mock;

pub use crate::config::Config;
pub use crate::error::{Error, Result};

/// connect to the X server named in `config` and run until Escape is pressed.
pub fn run(config: &Config) -> Result<()> {
  let frames = session::launch(|| xserver::XServer::open(config.display.as_deref()), config)?;
  trace!("presented {} frames", frames);
  Ok(())
}
