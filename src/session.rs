use crate::backend::WindowSystem;
use crate::config::Config;
use crate::context;
use crate::error::{Error, Result};
use crate::extension::ContextCapabilities;
use crate::fbconfig::{self, Requirements};
use crate::render_loop::RenderLoop;
use crate::resource::Scoped;
use crate::surface::Surface;

const MIN_GLX_VERSION: (i32, i32) = (1, 2);

/// bring up the whole pipeline on the connection returned by `open` and
/// run the render loop until the user quits.
///
/// Resources are held in locals declared in acquisition order, so every exit
/// path (including `?`) releases them in reverse. Returns the number of frames
/// presented.
pub fn launch<W, F>(open: F, config: &Config) -> Result<u64>
  where W: WindowSystem,
        F: FnOnce() -> Result<W>
{
  let ws = open()?;
  let screen = ws.screen();

  let (major, minor) = ws.glx_version();
  if (major, minor) < MIN_GLX_VERSION {
    return Err(Error::UnsupportedVersion {
      major: major,
      minor: minor,
    });
  }
  log_glx_info(&ws);

  let configs = ws.choose_fb_configs(&Requirements::default())
    .ok_or(Error::ConfigurationUnavailable)?;
  let configs = Scoped::new(&ws, configs, W::free_fb_configs);
  let fbcs = ws.fb_configs(&configs);
  info!("Found {} matching framebuffers", fbcs.len());

  let selection = fbconfig::select(fbcs.iter().map(|&fbc| ws.describe(fbc)))?;
  info!("Best visual info index: {} (SAMPLES = {})",
        selection.best,
        selection.best_samples);
  info!("Worst visual info index: {} (SAMPLES = {})",
        selection.worst,
        selection.worst_samples);

  let best = fbcs[selection.best];
  let visual = ws.visual_from_fb_config(best);
  drop(configs);
  let visual = visual.ok_or(Error::ConfigurationUnavailable)?;
  let visual = Scoped::new(&ws, visual, W::free_visual);

  let visual_screen = ws.visual_screen(&visual);
  if visual_screen != screen {
    warn!("{}",
          Error::ScreenMismatch {
            expected: screen,
            actual: visual_screen,
          });
  }

  let extensions = ws.glx_extensions();
  info!("Late extensions: {}", extensions);
  let caps = ContextCapabilities::from_extensions(&extensions);
  let ctx = context::negotiate(&ws, best, &caps, &config.context_attribs())?;
  let ctx = Scoped::new(&ws, ctx, W::destroy_context);

  let surface = Surface::bind(&ws, &visual, *ctx, &config.window_spec())?;
  log_renderer_info(&ws);

  let frames = RenderLoop::new(&ws, surface.window()).run();
  Ok(frames)
}

fn log_glx_info<W: WindowSystem>(ws: &W) {
  let info = ws.glx_info();
  info!("GLX client version: {}", info.client_version);
  info!("GLX client vendor: {}", info.client_vendor);
  info!("GLX client extensions: {}", info.client_extensions);
  info!("GLX server version: {}", info.server_version);
  info!("GLX server vendor: {}", info.server_vendor);
  info!("GLX server extensions: {}", info.server_extensions);
}

fn log_renderer_info<W: WindowSystem>(ws: &W) {
  let info = ws.renderer_info();
  info!("GL Vendor: {}", info.vendor);
  info!("GL Renderer: {}", info.renderer);
  info!("GL Version: {}", info.version);
  info!("GL Shading Language: {}", info.shading_language);
}
