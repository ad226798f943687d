use x11::keysym;

use crate::backend::{Event, KeyEvent, KeySym, WindowSystem};

pub const QUIT_KEY: KeySym = keysym::XK_Escape as KeySym;

/// opaque white.
pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
  Running,
  Terminated,
}

/// waits for input and redraws once per delivered event.
///
/// Redraw is tied to the event rate: there is no animation, so a frame is only
/// produced when the server wakes us up.
pub struct RenderLoop<'w, W: WindowSystem> {
  ws: &'w W,
  window: W::Window,
  quit_key: KeySym,
  state: LoopState,
  last_keysym: Option<KeySym>,
  frames: u64,
}

impl<'w, W: WindowSystem> RenderLoop<'w, W> {
  pub fn new(ws: &'w W, window: W::Window) -> RenderLoop<'w, W> {
    RenderLoop {
      ws: ws,
      window: window,
      quit_key: QUIT_KEY,
      state: LoopState::Running,
      last_keysym: None,
      frames: 0,
    }
  }

  pub fn state(&self) -> LoopState {
    self.state
  }

  pub fn last_keysym(&self) -> Option<KeySym> {
    self.last_keysym
  }

  /// frames presented so far.
  pub fn frames(&self) -> u64 {
    self.frames
  }

  /// run until the quit key is pressed. Returns the number of frames presented.
  pub fn run(&mut self) -> u64 {
    self.ws.set_clear_color(BACKGROUND);
    while self.state == LoopState::Running {
      let event = self.ws.next_event();
      self.step(event);
    }
    info!("quit key pressed after {} frames", self.frames);
    self.frames
  }

  /// handle one event, then clear and present.
  pub fn step(&mut self, event: Event) -> LoopState {
    match event {
      Event::KeymapChanged(key) => {
        trace!("event: KeymapNotify");
        self.ws.refresh_keyboard_mapping();
        self.on_key(&key);
      }
      Event::KeyPress(key) => {
        trace!("event: KeyPress");
        self.on_key(&key);
      }
      Event::Expose => trace!("event: Expose"),
      Event::Unknown => trace!("event: Unknown"),
    }

    self.ws.clear();
    self.ws.swap_buffers(self.window);
    self.frames += 1;

    self.state
  }

  fn on_key(&mut self, key: &KeyEvent) {
    let sym = self.ws.lookup_keysym(key);
    self.last_keysym = Some(sym);
    if sym == self.quit_key {
      self.state = LoopState::Terminated;
    }
  }
}
