use std::ffi::{CStr, CString};
use std::mem::{transmute, transmute_copy, zeroed};
use std::os::raw::{c_char, c_int, c_long, c_uint, c_void};
use std::ptr::{null, null_mut};
use std::slice;
use std::sync::atomic::{AtomicBool, Ordering};
use x11::glx;
use x11::xlib;

use crate::backend::{Event, GlxInfo, KeyEvent, KeySym, RendererInfo, WindowSpec, WindowSystem};
use crate::context::ContextAttribs;
use crate::error::{Error, Result};
use crate::fbconfig::{Candidate, Requirements};
use crate::gl;

type CreateContextAttribsFn = unsafe extern "C" fn(*mut xlib::Display,
                                                   glx::GLXFBConfig,
                                                   glx::GLXContext,
                                                   xlib::Bool,
                                                   *const c_int)
                                                   -> glx::GLXContext;

const EVENT_MASK: c_long = xlib::ExposureMask | xlib::KeyPressMask | xlib::KeyReleaseMask |
                        xlib::KeymapStateMask;

static X_ERROR_OCCURRED: AtomicBool = AtomicBool::new(false);

unsafe extern "C" fn error_handler(_: *mut xlib::Display, ev: *mut xlib::XErrorEvent) -> c_int {
  if !ev.is_null() {
    let ev = &*ev;
    warn!("X error: code={}, request={}, minor={}",
          ev.error_code,
          ev.request_code,
          ev.minor_code);
  }
  X_ERROR_OCCURRED.store(true, Ordering::SeqCst);
  0
}

fn c_str(ptr: *const c_char) -> String {
  if ptr.is_null() {
    return String::new();
  }
  unsafe { CStr::from_ptr(ptr).to_string_lossy().into_owned() }
}

/// the array returned by `glXChooseFBConfig`.
#[derive(Debug)]
pub struct FbConfigList {
  ptr: *mut glx::GLXFBConfig,
  len: usize,
}

/// a connection to the X server, closed on drop.
pub struct XServer {
  display: *mut xlib::Display,
  screen: c_int,
  root: xlib::Window,
  create_context_attribs: Option<CreateContextAttribsFn>,
}

impl Drop for XServer {
  fn drop(&mut self) {
    unsafe {
      xlib::XCloseDisplay(self.display);
    }
    self.display = null_mut();
    info!("closed display");
  }
}

impl XServer {
  /// connect to `displayname`, or to `$DISPLAY` when `None`.
  pub fn open(displayname: Option<&str>) -> Result<XServer> {
    let shown = displayname.unwrap_or("$DISPLAY").to_owned();
    let display = match displayname {
      Some(name) => {
        let name = CString::new(name).map_err(|_| Error::ConnectionFailure(shown.clone()))?;
        unsafe { xlib::XOpenDisplay(name.as_ptr()) }
      }
      None => unsafe { xlib::XOpenDisplay(null()) },
    };
    if display.is_null() {
      return Err(Error::ConnectionFailure(shown));
    }
    info!("success: XOpenDisplay");

    unsafe {
      xlib::XSetErrorHandler(Some(error_handler));
    }

    let screen = unsafe { xlib::XDefaultScreen(display) };
    let root = unsafe { xlib::XRootWindow(display, screen) };

    let create_context_attribs = unsafe {
      glx::glXGetProcAddressARB(b"glXCreateContextAttribsARB\0".as_ptr())
        .map(|f| transmute::<unsafe extern "C" fn(), CreateContextAttribsFn>(f))
    };
    if create_context_attribs.is_none() {
      info!("glXCreateContextAttribsARB() not found");
    }

    Ok(XServer {
      display: display,
      screen: screen,
      root: root,
      create_context_attribs: create_context_attribs,
    })
  }

  fn fb_config_attrib(&self, fbc: glx::GLXFBConfig, attrib: c_int) -> c_int {
    let mut value = 0;
    unsafe {
      glx::glXGetFBConfigAttrib(self.display, fbc, attrib, &mut value);
    }
    value
  }
}

impl WindowSystem for XServer {
  type FbConfig = glx::GLXFBConfig;
  type ConfigList = FbConfigList;
  type Visual = *mut xlib::XVisualInfo;
  type Context = glx::GLXContext;
  type Colormap = xlib::Colormap;
  type Window = xlib::Window;

  fn screen(&self) -> i32 {
    self.screen
  }

  fn glx_version(&self) -> (i32, i32) {
    let (mut major, mut minor) = (0, 0);
    let ok = unsafe { glx::glXQueryVersion(self.display, &mut major, &mut minor) };
    if ok == xlib::False {
      return (0, 0);
    }
    (major, minor)
  }

  fn glx_info(&self) -> GlxInfo {
    unsafe {
      GlxInfo {
        client_version: c_str(glx::glXGetClientString(self.display, glx::GLX_VERSION)),
        client_vendor: c_str(glx::glXGetClientString(self.display, glx::GLX_VENDOR)),
        client_extensions: c_str(glx::glXGetClientString(self.display, glx::GLX_EXTENSIONS)),
        server_version: c_str(glx::glXQueryServerString(self.display,
                                                        self.screen,
                                                        glx::GLX_VERSION)),
        server_vendor: c_str(glx::glXQueryServerString(self.display,
                                                       self.screen,
                                                       glx::GLX_VENDOR)),
        server_extensions: c_str(glx::glXQueryServerString(self.display,
                                                           self.screen,
                                                           glx::GLX_EXTENSIONS)),
      }
    }
  }

  fn glx_extensions(&self) -> String {
    c_str(unsafe { glx::glXQueryExtensionsString(self.display, self.screen) })
  }

  fn choose_fb_configs(&self, req: &Requirements) -> Option<FbConfigList> {
    let attribs = req.to_attribs();
    let mut count: c_int = 0;
    let ptr = unsafe {
      glx::glXChooseFBConfig(self.display, self.screen, attribs.as_ptr(), &mut count)
    };
    if ptr.is_null() {
      return None;
    }
    Some(FbConfigList {
      ptr: ptr,
      len: count.max(0) as usize,
    })
  }

  fn fb_configs<'a>(&self, list: &'a FbConfigList) -> &'a [glx::GLXFBConfig] {
    if list.len == 0 {
      return &[];
    }
    unsafe { slice::from_raw_parts(list.ptr, list.len) }
  }

  fn free_fb_configs(&self, list: &FbConfigList) {
    unsafe {
      xlib::XFree(list.ptr as *mut c_void);
    }
  }

  fn describe(&self, fbc: glx::GLXFBConfig) -> Candidate {
    let vi = unsafe { glx::glXGetVisualFromFBConfig(self.display, fbc) };
    if vi.is_null() {
      return Candidate::default();
    }
    unsafe {
      xlib::XFree(vi as *mut c_void);
    }
    Candidate {
      sample_buffers: self.fb_config_attrib(fbc, glx::GLX_SAMPLE_BUFFERS),
      samples: self.fb_config_attrib(fbc, glx::GLX_SAMPLES),
      usable: true,
    }
  }

  fn visual_from_fb_config(&self, fbc: glx::GLXFBConfig) -> Option<*mut xlib::XVisualInfo> {
    let vi = unsafe { glx::glXGetVisualFromFBConfig(self.display, fbc) };
    if vi.is_null() { None } else { Some(vi) }
  }

  fn visual_screen(&self, visual: &*mut xlib::XVisualInfo) -> i32 {
    unsafe { (**visual).screen }
  }

  fn free_visual(&self, visual: &*mut xlib::XVisualInfo) {
    unsafe {
      xlib::XFree(*visual as *mut c_void);
    }
  }

  fn create_new_context(&self, fbc: glx::GLXFBConfig) -> Option<glx::GLXContext> {
    let ctx = unsafe {
      glx::glXCreateNewContext(self.display, fbc, glx::GLX_RGBA_TYPE, null_mut(), xlib::True)
    };
    if ctx.is_null() { None } else { Some(ctx) }
  }

  fn create_context_attribs(&self,
                            fbc: glx::GLXFBConfig,
                            attribs: &ContextAttribs)
                            -> Option<glx::GLXContext> {
    let create = match self.create_context_attribs {
      Some(f) => f,
      None => {
        error!("GLX_ARB_create_context advertised but glXCreateContextAttribsARB() missing");
        return None;
      }
    };
    let list = attribs.to_attribs();
    let ctx = unsafe { create(self.display, fbc, null_mut(), xlib::True, list.as_ptr()) };
    if ctx.is_null() { None } else { Some(ctx) }
  }

  fn sync(&self) -> bool {
    unsafe {
      xlib::XSync(self.display, xlib::False);
    }
    !X_ERROR_OCCURRED.swap(false, Ordering::SeqCst)
  }

  fn is_direct(&self, ctx: glx::GLXContext) -> bool {
    unsafe { glx::glXIsDirect(self.display, ctx) != xlib::False }
  }

  fn destroy_context(&self, ctx: &glx::GLXContext) {
    unsafe {
      glx::glXDestroyContext(self.display, *ctx);
    }
  }

  fn create_colormap(&self, visual: &*mut xlib::XVisualInfo) -> xlib::Colormap {
    unsafe { xlib::XCreateColormap(self.display, self.root, (**visual).visual, xlib::AllocNone) }
  }

  fn free_colormap(&self, cmap: &xlib::Colormap) {
    unsafe {
      xlib::XFreeColormap(self.display, *cmap);
    }
  }

  fn create_window(&self,
                   visual: &*mut xlib::XVisualInfo,
                   cmap: xlib::Colormap,
                   spec: &WindowSpec)
                   -> Option<xlib::Window> {
    let win = unsafe {
      let vi = &**visual;
      let mut attr = zeroed::<xlib::XSetWindowAttributes>();
      attr.border_pixel = xlib::XBlackPixel(self.display, self.screen);
      attr.background_pixel = xlib::XWhitePixel(self.display, self.screen);
      attr.override_redirect = xlib::True;
      attr.colormap = cmap;
      attr.event_mask = EVENT_MASK;
      let mask = xlib::CWBackPixel | xlib::CWColormap | xlib::CWBorderPixel | xlib::CWEventMask;
      xlib::XCreateWindow(self.display,
                          self.root,
                          0,
                          0,
                          spec.width,
                          spec.height,
                          0,
                          vi.depth,
                          xlib::InputOutput as c_uint,
                          vi.visual,
                          mask,
                          &mut attr)
    };
    if win == 0 { None } else { Some(win) }
  }

  fn destroy_window(&self, win: &xlib::Window) {
    unsafe {
      xlib::XDestroyWindow(self.display, *win);
    }
  }

  fn show_window(&self, win: xlib::Window, spec: &WindowSpec) {
    match CString::new(spec.title.as_str()) {
      Ok(title) => unsafe {
        xlib::XStoreName(self.display, win, title.as_ptr());
      },
      Err(_) => warn!("window title contains a NUL byte, leaving it unset"),
    }
    unsafe {
      xlib::XSelectInput(self.display, win, EVENT_MASK);
      xlib::XClearWindow(self.display, win);
      xlib::XMapRaised(self.display, win);
    }
  }

  fn make_current(&self, win: xlib::Window, ctx: glx::GLXContext) -> bool {
    unsafe { glx::glXMakeCurrent(self.display, win, ctx) != xlib::False }
  }

  fn release_current(&self, _win: &xlib::Window) {
    unsafe {
      glx::glXMakeCurrent(self.display, 0, null_mut());
    }
  }

  fn renderer_info(&self) -> RendererInfo {
    RendererInfo {
      vendor: gl::get_string(gl::VENDOR),
      renderer: gl::get_string(gl::RENDERER),
      version: gl::get_string(gl::VERSION),
      shading_language: gl::get_string(gl::SHADING_LANGUAGE_VERSION),
    }
  }

  fn next_event(&self) -> Event {
    unsafe {
      let mut ev = zeroed::<xlib::XEvent>();
      xlib::XNextEvent(self.display, &mut ev);
      match ev.get_type() {
        xlib::KeymapNotify => Event::KeymapChanged(KeyEvent::new(transmute_copy(&ev))),
        xlib::KeyPress => Event::KeyPress(KeyEvent::new(transmute_copy(&ev))),
        xlib::Expose => Event::Expose,
        _ => Event::Unknown,
      }
    }
  }

  fn refresh_keyboard_mapping(&self) {
    unsafe {
      let mut ev = zeroed::<xlib::XMappingEvent>();
      ev.type_ = xlib::MappingNotify;
      ev.display = self.display;
      ev.request = xlib::MappingKeyboard;
      ev.first_keycode = 8;
      ev.count = 248;
      xlib::XRefreshKeyboardMapping(&mut ev);
    }
  }

  fn lookup_keysym(&self, key: &KeyEvent) -> KeySym {
    let mut raw = *key.raw();
    let mut buf = [0 as c_char; 32];
    let mut sym: KeySym = 0;
    unsafe {
      xlib::XLookupString(&mut raw,
                          buf.as_mut_ptr(),
                          buf.len() as c_int,
                          &mut sym,
                          null_mut());
    }
    sym
  }

  fn set_clear_color(&self, rgba: [f32; 4]) {
    unsafe {
      gl::glClearColor(rgba[0], rgba[1], rgba[2], rgba[3]);
    }
  }

  fn clear(&self) {
    unsafe {
      gl::glClear(gl::COLOR_BUFFER_BIT);
    }
  }

  fn swap_buffers(&self, win: xlib::Window) {
    unsafe {
      glx::glXSwapBuffers(self.display, win);
    }
  }
}
