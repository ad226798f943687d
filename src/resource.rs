use std::fmt;
use std::ops::Deref;

/// a native handle that is released exactly once, when the guard is dropped.
pub struct Scoped<'w, W: ?Sized, T> {
  ws: &'w W,
  value: T,
  release: fn(&W, &T),
}

impl<'w, W: ?Sized, T> Scoped<'w, W, T> {
  pub fn new(ws: &'w W, value: T, release: fn(&W, &T)) -> Scoped<'w, W, T> {
    Scoped {
      ws: ws,
      value: value,
      release: release,
    }
  }
}

impl<'w, W: ?Sized, T> Deref for Scoped<'w, W, T> {
  type Target = T;

  fn deref(&self) -> &T {
    &self.value
  }
}

impl<'w, W: ?Sized, T> Drop for Scoped<'w, W, T> {
  fn drop(&mut self) {
    (self.release)(self.ws, &self.value);
  }
}

impl<'w, W: ?Sized, T: fmt::Debug> fmt::Debug for Scoped<'w, W, T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_tuple("Scoped").field(&self.value).finish()
  }
}
