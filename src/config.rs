use clap::Parser;

use crate::backend::WindowSpec;
use crate::context::ContextAttribs;

/// Open an OpenGL window on X11 and clear it until Escape is pressed.
#[derive(Debug, Clone, Parser)]
#[command(name = "qsketch", version)]
pub struct Config {
  /// X display to connect to (defaults to $DISPLAY)
  #[arg(long)]
  pub display: Option<String>,

  /// window width in pixels
  #[arg(long, default_value_t = 800)]
  pub width: u32,

  /// window height in pixels
  #[arg(long, default_value_t = 800)]
  pub height: u32,

  /// window title
  #[arg(long, default_value = "qsketch")]
  pub title: String,

  /// GL major version requested through GLX_ARB_create_context
  #[arg(long, default_value_t = 3)]
  pub gl_major: i32,

  /// GL minor version requested through GLX_ARB_create_context
  #[arg(long, default_value_t = 2)]
  pub gl_minor: i32,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      display: None,
      width: 800,
      height: 800,
      title: "qsketch".to_owned(),
      gl_major: 3,
      gl_minor: 2,
    }
  }
}

impl Config {
  pub fn window_spec(&self) -> WindowSpec {
    WindowSpec {
      width: self.width,
      height: self.height,
      title: self.title.clone(),
    }
  }

  pub fn context_attribs(&self) -> ContextAttribs {
    ContextAttribs {
      major: self.gl_major,
      minor: self.gl_minor,
      ..ContextAttribs::default()
    }
  }
}
