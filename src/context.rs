use std::os::raw::c_int;
use x11::glx::arb;

use crate::backend::WindowSystem;
use crate::error::{CreationPath, Error, Result};
use crate::extension::ContextCapabilities;

/// version and flags requested through `GLX_ARB_create_context`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextAttribs {
  pub major: c_int,
  pub minor: c_int,
  pub forward_compatible: bool,
}

impl Default for ContextAttribs {
  fn default() -> ContextAttribs {
    ContextAttribs {
      major: 3,
      minor: 2,
      forward_compatible: true,
    }
  }
}

impl ContextAttribs {
  /// zero-terminated attribute list.
  pub fn to_attribs(&self) -> Vec<c_int> {
    let flags = if self.forward_compatible {
      arb::GLX_CONTEXT_FORWARD_COMPATIBLE_BIT_ARB
    } else {
      0
    };
    vec![
      arb::GLX_CONTEXT_MAJOR_VERSION_ARB, self.major,
      arb::GLX_CONTEXT_MINOR_VERSION_ARB, self.minor,
      arb::GLX_CONTEXT_FLAGS_ARB, flags,
      0,
    ]
  }
}

pub fn creation_path(caps: &ContextCapabilities) -> CreationPath {
  if caps.advanced_creation {
    CreationPath::Advanced
  } else {
    CreationPath::Legacy
  }
}

/// create the rendering context for `fbc`, picking the entry point from `caps`.
///
/// The server is synced before creation, so errors left over from earlier
/// requests are not blamed on the context. It is synced again right after,
/// so a failing request shows up here and not on some later call.
pub fn negotiate<W>(ws: &W,
                    fbc: W::FbConfig,
                    caps: &ContextCapabilities,
                    attribs: &ContextAttribs)
                    -> Result<W::Context>
  where W: WindowSystem
{
  let path = creation_path(caps);
  if !ws.sync() {
    warn!("discarding X error raised before context creation");
  }
  let ctx = match path {
    CreationPath::Legacy => {
      info!("creating legacy context");
      ws.create_new_context(fbc)
    }
    CreationPath::Advanced => {
      info!("creating GL {}.{} context", attribs.major, attribs.minor);
      ws.create_context_attribs(fbc, attribs)
    }
  };

  let clean = ws.sync();
  let ctx = match (ctx, clean) {
    (Some(ctx), true) => ctx,
    (Some(ctx), false) => {
      ws.destroy_context(&ctx);
      return Err(Error::ContextCreationFailed { path: path });
    }
    (None, _) => return Err(Error::ContextCreationFailed { path: path }),
  };

  if ws.is_direct(ctx) {
    info!("Direct GLX rendering context obtained");
  } else {
    info!("Indirect GLX rendering context obtained");
  }

  Ok(ctx)
}
