use crate::backend::{WindowSpec, WindowSystem};
use crate::error::{Error, Result};
use crate::resource::Scoped;

/// the window we render into, with the context current on it.
///
/// Fields drop top to bottom: unbind the context, destroy the window, free
/// the colormap.
pub struct Surface<'w, W: WindowSystem> {
  _current: Scoped<'w, W, W::Window>,
  window: Scoped<'w, W, W::Window>,
  _colormap: Scoped<'w, W, W::Colormap>,
}

impl<'w, W: WindowSystem> Surface<'w, W> {
  /// create a window for `visual` under the root window and make `ctx` current on it.
  pub fn bind(ws: &'w W,
              visual: &W::Visual,
              ctx: W::Context,
              spec: &WindowSpec)
              -> Result<Surface<'w, W>> {
    let colormap = Scoped::new(ws, ws.create_colormap(visual), W::free_colormap);

    let window = ws.create_window(visual, *colormap, spec).ok_or(Error::WindowCreationFailed)?;
    let window = Scoped::new(ws, window, W::destroy_window);
    // the server reports a bad window asynchronously
    if !ws.sync() {
      return Err(Error::WindowCreationFailed);
    }
    info!("created {}x{} window", spec.width, spec.height);

    if !ws.make_current(*window, ctx) {
      return Err(Error::MakeCurrentFailed);
    }
    let current = Scoped::new(ws, *window, W::release_current);

    ws.show_window(*window, spec);

    Ok(Surface {
      _current: current,
      window: window,
      _colormap: colormap,
    })
  }

  pub fn window(&self) -> W::Window {
    *self.window
  }
}
