use std::ffi::CStr;
use std::os::raw::{c_char, c_float, c_uchar, c_uint};

pub type GLenum = c_uint;
pub type GLbitfield = c_uint;

pub const COLOR_BUFFER_BIT: GLbitfield = 0x0000_4000;
pub const VENDOR: GLenum = 0x1F00;
pub const RENDERER: GLenum = 0x1F01;
pub const VERSION: GLenum = 0x1F02;
pub const SHADING_LANGUAGE_VERSION: GLenum = 0x8B8C;

#[link(name = "GL")]
extern "C" {
  pub fn glClearColor(red: c_float, green: c_float, blue: c_float, alpha: c_float);
  pub fn glClear(mask: GLbitfield);
  pub fn glGetString(name: GLenum) -> *const c_uchar;
}

/// `glGetString` as an owned string; empty when no context is current.
pub fn get_string(name: GLenum) -> String {
  unsafe {
    let ptr = glGetString(name);
    if ptr.is_null() {
      return String::new();
    }
    CStr::from_ptr(ptr as *const c_char).to_string_lossy().into_owned()
  }
}
