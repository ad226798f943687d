//! A `WindowSystem` that records every call instead of talking to a server.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::backend::{Event, GlxInfo, KeyEvent, KeySym, RendererInfo, WindowSpec, WindowSystem};
use crate::context::ContextAttribs;
use crate::fbconfig::{Candidate, Requirements};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  ChooseFbConfigs,
  FreeFbConfigs,
  VisualFromFbConfig(usize),
  FreeVisual(usize),
  CreateNewContext,
  CreateContextAttribs(i32, i32),
  Sync,
  DestroyContext,
  CreateColormap,
  FreeColormap,
  CreateWindow(u32, u32),
  DestroyWindow,
  ShowWindow(String),
  MakeCurrent(u32),
  ReleaseCurrent,
  RefreshKeyboardMapping,
  LookupKeysym,
  SetClearColor,
  Clear,
  SwapBuffers,
  CloseDisplay,
}

impl Call {
  pub fn is_release(&self) -> bool {
    match *self {
      Call::FreeFbConfigs |
      Call::FreeVisual(_) |
      Call::DestroyContext |
      Call::FreeColormap |
      Call::DestroyWindow |
      Call::ReleaseCurrent |
      Call::CloseDisplay => true,
      _ => false,
    }
  }
}

pub struct MockWindowSystem {
  log: Rc<RefCell<Vec<Call>>>,
  events: RefCell<VecDeque<Event>>,
  pub version: (i32, i32),
  pub extensions: String,
  pub candidates: Vec<Candidate>,
  pub no_config_list: bool,
  pub visual_screen: i32,
  pub fail_context: bool,
  /// the sync right after this call reports an X error.
  pub sync_error_after: Option<Call>,
  pub fail_window: bool,
  pub fail_make_current: bool,
}

impl Drop for MockWindowSystem {
  fn drop(&mut self) {
    self.record(Call::CloseDisplay);
  }
}

impl MockWindowSystem {
  /// GLX 1.4, no extensions, a single usable config without multisampling.
  pub fn new() -> MockWindowSystem {
    MockWindowSystem {
      log: Rc::new(RefCell::new(Vec::new())),
      events: RefCell::new(VecDeque::new()),
      version: (1, 4),
      extensions: String::new(),
      candidates: vec![Candidate { sample_buffers: 0, samples: 0, usable: true }],
      no_config_list: false,
      visual_screen: 0,
      fail_context: false,
      sync_error_after: None,
      fail_window: false,
      fail_make_current: false,
    }
  }

  /// the call log, still readable after the mock is dropped.
  pub fn log(&self) -> Rc<RefCell<Vec<Call>>> {
    self.log.clone()
  }

  pub fn calls(&self) -> Vec<Call> {
    self.log.borrow().clone()
  }

  pub fn count(&self, call: &Call) -> usize {
    self.log.borrow().iter().filter(|c| *c == call).count()
  }

  pub fn push_event(&self, event: Event) {
    self.events.borrow_mut().push_back(event);
  }

  pub fn pending_events(&self) -> usize {
    self.events.borrow().len()
  }

  fn record(&self, call: Call) {
    self.log.borrow_mut().push(call);
  }
}

impl WindowSystem for MockWindowSystem {
  type FbConfig = usize;
  type ConfigList = Vec<usize>;
  type Visual = usize;
  type Context = u32;
  type Colormap = u32;
  type Window = u32;

  fn screen(&self) -> i32 {
    0
  }

  fn glx_version(&self) -> (i32, i32) {
    self.version
  }

  fn glx_info(&self) -> GlxInfo {
    GlxInfo::default()
  }

  fn glx_extensions(&self) -> String {
    self.extensions.clone()
  }

  fn choose_fb_configs(&self, _req: &Requirements) -> Option<Vec<usize>> {
    self.record(Call::ChooseFbConfigs);
    if self.no_config_list {
      None
    } else {
      Some((0..self.candidates.len()).collect())
    }
  }

  fn fb_configs<'a>(&self, list: &'a Vec<usize>) -> &'a [usize] {
    list
  }

  fn free_fb_configs(&self, _list: &Vec<usize>) {
    self.record(Call::FreeFbConfigs);
  }

  fn describe(&self, fbc: usize) -> Candidate {
    self.candidates[fbc]
  }

  fn visual_from_fb_config(&self, fbc: usize) -> Option<usize> {
    self.record(Call::VisualFromFbConfig(fbc));
    if self.candidates[fbc].usable {
      Some(fbc)
    } else {
      None
    }
  }

  fn visual_screen(&self, _visual: &usize) -> i32 {
    self.visual_screen
  }

  fn free_visual(&self, visual: &usize) {
    self.record(Call::FreeVisual(*visual));
  }

  fn create_new_context(&self, _fbc: usize) -> Option<u32> {
    self.record(Call::CreateNewContext);
    if self.fail_context { None } else { Some(7) }
  }

  fn create_context_attribs(&self, _fbc: usize, attribs: &ContextAttribs) -> Option<u32> {
    self.record(Call::CreateContextAttribs(attribs.major, attribs.minor));
    if self.fail_context { None } else { Some(7) }
  }

  fn sync(&self) -> bool {
    let failed = match self.sync_error_after {
      Some(ref call) => self.log.borrow().last() == Some(call),
      None => false,
    };
    self.record(Call::Sync);
    !failed
  }

  fn is_direct(&self, _ctx: u32) -> bool {
    true
  }

  fn destroy_context(&self, _ctx: &u32) {
    self.record(Call::DestroyContext);
  }

  fn create_colormap(&self, _visual: &usize) -> u32 {
    self.record(Call::CreateColormap);
    3
  }

  fn free_colormap(&self, _cmap: &u32) {
    self.record(Call::FreeColormap);
  }

  fn create_window(&self, _visual: &usize, _cmap: u32, spec: &WindowSpec) -> Option<u32> {
    self.record(Call::CreateWindow(spec.width, spec.height));
    if self.fail_window { None } else { Some(1) }
  }

  fn destroy_window(&self, _win: &u32) {
    self.record(Call::DestroyWindow);
  }

  fn show_window(&self, _win: u32, spec: &WindowSpec) {
    self.record(Call::ShowWindow(spec.title.clone()));
  }

  fn make_current(&self, _win: u32, ctx: u32) -> bool {
    self.record(Call::MakeCurrent(ctx));
    !self.fail_make_current
  }

  fn release_current(&self, _win: &u32) {
    self.record(Call::ReleaseCurrent);
  }

  fn renderer_info(&self) -> RendererInfo {
    RendererInfo::default()
  }

  fn next_event(&self) -> Event {
    match self.events.borrow_mut().pop_front() {
      Some(ev) => ev,
      None => panic!("event queue drained without a quit key"),
    }
  }

  fn refresh_keyboard_mapping(&self) {
    self.record(Call::RefreshKeyboardMapping);
  }

  fn lookup_keysym(&self, key: &KeyEvent) -> KeySym {
    self.record(Call::LookupKeysym);
    key.keycode() as KeySym
  }

  fn set_clear_color(&self, _rgba: [f32; 4]) {
    self.record(Call::SetClearColor);
  }

  fn clear(&self) {
    self.record(Call::Clear);
  }

  fn swap_buffers(&self, _win: u32) {
    self.record(Call::SwapBuffers);
  }
}
