use std::mem::zeroed;
use std::os::raw::c_uint;
use x11::xlib;

use crate::context::ContextAttribs;
use crate::fbconfig::{Candidate, Requirements};

pub type KeySym = xlib::KeySym;

/// a key event straight from the server, not yet resolved to a keysym.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
  raw: xlib::XKeyEvent,
}

impl KeyEvent {
  pub fn new(raw: xlib::XKeyEvent) -> KeyEvent {
    KeyEvent { raw: raw }
  }

  /// a synthetic key press carrying only a keycode.
  pub fn from_keycode(keycode: c_uint) -> KeyEvent {
    let mut raw = unsafe { zeroed::<xlib::XKeyEvent>() };
    raw.type_ = xlib::KeyPress;
    raw.keycode = keycode;
    KeyEvent { raw: raw }
  }

  pub fn keycode(&self) -> c_uint {
    self.raw.keycode
  }

  pub fn raw(&self) -> &xlib::XKeyEvent {
    &self.raw
  }
}

/// the events the render loop distinguishes.
#[derive(Debug, Clone, Copy)]
pub enum Event {
  /// keymap state changed: refresh the cached mapping, then treat the event as a key press.
  KeymapChanged(KeyEvent),
  KeyPress(KeyEvent),
  Expose,
  Unknown,
}

/// strings reported by `glXGetClientString` / `glXQueryServerString`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlxInfo {
  pub client_version: String,
  pub client_vendor: String,
  pub client_extensions: String,
  pub server_version: String,
  pub server_vendor: String,
  pub server_extensions: String,
}

/// strings reported by `glGetString` once a context is current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererInfo {
  pub vendor: String,
  pub renderer: String,
  pub version: String,
  pub shading_language: String,
}

/// fixed properties of the window we draw into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

/// the display server plus its GLX implementation.
///
/// Handles are plain values; releasing them is the caller's job and happens
/// through `resource::Scoped`.
pub trait WindowSystem {
  type FbConfig: Copy;
  type ConfigList;
  type Visual;
  type Context: Copy;
  type Colormap: Copy;
  type Window: Copy;

  fn screen(&self) -> i32;

  /// `(major, minor)` of the GLX protocol, `(0, 0)` if the query fails.
  fn glx_version(&self) -> (i32, i32);
  fn glx_info(&self) -> GlxInfo;
  fn glx_extensions(&self) -> String;

  fn choose_fb_configs(&self, req: &Requirements) -> Option<Self::ConfigList>;
  fn fb_configs<'a>(&self, list: &'a Self::ConfigList) -> &'a [Self::FbConfig];
  fn free_fb_configs(&self, list: &Self::ConfigList);
  fn describe(&self, fbc: Self::FbConfig) -> Candidate;

  fn visual_from_fb_config(&self, fbc: Self::FbConfig) -> Option<Self::Visual>;
  fn visual_screen(&self, visual: &Self::Visual) -> i32;
  fn free_visual(&self, visual: &Self::Visual);

  fn create_new_context(&self, fbc: Self::FbConfig) -> Option<Self::Context>;
  fn create_context_attribs(&self,
                            fbc: Self::FbConfig,
                            attribs: &ContextAttribs)
                            -> Option<Self::Context>;
  /// flush the request queue; `false` if the server reported an error since the last sync.
  fn sync(&self) -> bool;
  fn is_direct(&self, ctx: Self::Context) -> bool;
  fn destroy_context(&self, ctx: &Self::Context);

  fn create_colormap(&self, visual: &Self::Visual) -> Self::Colormap;
  fn free_colormap(&self, cmap: &Self::Colormap);
  fn create_window(&self,
                   visual: &Self::Visual,
                   cmap: Self::Colormap,
                   spec: &WindowSpec)
                   -> Option<Self::Window>;
  fn destroy_window(&self, win: &Self::Window);
  /// store the title, select input, clear and map raised.
  fn show_window(&self, win: Self::Window, spec: &WindowSpec);

  fn make_current(&self, win: Self::Window, ctx: Self::Context) -> bool;
  fn release_current(&self, win: &Self::Window);
  fn renderer_info(&self) -> RendererInfo;

  /// block until the server delivers the next event.
  fn next_event(&self) -> Event;
  fn refresh_keyboard_mapping(&self);
  fn lookup_keysym(&self, key: &KeyEvent) -> KeySym;

  fn set_clear_color(&self, rgba: [f32; 4]);
  fn clear(&self);
  fn swap_buffers(&self, win: Self::Window);
}
