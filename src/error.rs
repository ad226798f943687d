use std::fmt;

/// which branch of the context negotiation produced (or failed to produce) a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPath {
  /// `glXCreateNewContext`
  Legacy,
  /// `glXCreateContextAttribsARB`
  Advanced,
}

impl fmt::Display for CreationPath {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      CreationPath::Legacy => f.write_str("legacy"),
      CreationPath::Advanced => f.write_str("GLX_ARB_create_context"),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("could not open display {0:?}")]
  ConnectionFailure(String),

  #[error("GLX 1.2 or greater is required (server reports {major}.{minor})")]
  UnsupportedVersion { major: i32, minor: i32 },

  #[error("no framebuffer configuration with a usable visual")]
  ConfigurationUnavailable,

  #[error("failed to create a rendering context ({path} path)")]
  ContextCreationFailed { path: CreationPath },

  #[error("failed to create window")]
  WindowCreationFailed,

  #[error("failed to make the rendering context current")]
  MakeCurrentFailed,

  /// never returned; logged when the chosen visual lives on another screen.
  #[error("screen id ({expected}) does not match visual screen ({actual})")]
  ScreenMismatch { expected: i32, actual: i32 },
}

pub type Result<T> = ::std::result::Result<T, Error>;
