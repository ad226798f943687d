use std::os::raw::c_int;
use x11::glx;
use x11::xlib;

use crate::error::{Error, Result};

/// hard requirements passed to `glXChooseFBConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
  pub red_size: c_int,
  pub green_size: c_int,
  pub blue_size: c_int,
  pub alpha_size: c_int,
  pub depth_size: c_int,
  pub stencil_size: c_int,
  pub double_buffer: bool,
}

impl Default for Requirements {
  fn default() -> Requirements {
    Requirements {
      red_size: 8,
      green_size: 8,
      blue_size: 8,
      alpha_size: 8,
      depth_size: 24,
      stencil_size: 8,
      double_buffer: true,
    }
  }
}

impl Requirements {
  /// zero-terminated attribute list.
  pub fn to_attribs(&self) -> Vec<c_int> {
    vec![
      glx::GLX_X_RENDERABLE, xlib::True,
      glx::GLX_DRAWABLE_TYPE, glx::GLX_WINDOW_BIT,
      glx::GLX_RENDER_TYPE, glx::GLX_RGBA_BIT,
      glx::GLX_X_VISUAL_TYPE, glx::GLX_TRUE_COLOR,
      glx::GLX_RED_SIZE, self.red_size,
      glx::GLX_GREEN_SIZE, self.green_size,
      glx::GLX_BLUE_SIZE, self.blue_size,
      glx::GLX_ALPHA_SIZE, self.alpha_size,
      glx::GLX_DEPTH_SIZE, self.depth_size,
      glx::GLX_STENCIL_SIZE, self.stencil_size,
      glx::GLX_DOUBLEBUFFER, if self.double_buffer { xlib::True } else { xlib::False },
      0,
    ]
  }
}

/// attributes of one framebuffer config as seen by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Candidate {
  pub sample_buffers: c_int,
  pub samples: c_int,
  /// `glXGetVisualFromFBConfig` returned a visual.
  pub usable: bool,
}

impl Candidate {
  pub fn has_sample_buffers(&self) -> bool {
    self.sample_buffers != 0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
  pub best: usize,
  pub best_samples: c_int,
  pub worst: usize,
  pub worst_samples: c_int,
}

/// pick the config with the most samples among the multisampled ones.
///
/// The first usable candidate seeds both best and worst. After that a
/// candidate only becomes the best with sample buffers and a strictly higher
/// sample count, and becomes the worst when it has no sample buffers or fewer
/// samples than the current worst. Unusable candidates are skipped.
///
/// `best_samples >= worst_samples` holds as long as a candidate without
/// sample buffers reports 0 samples, which GLX guarantees for real configs.
pub fn select<I>(candidates: I) -> Result<Selection>
  where I: IntoIterator<Item = Candidate>
{
  let mut best: Option<(usize, c_int)> = None;
  let mut worst: Option<(usize, c_int)> = None;

  for (i, cand) in candidates.into_iter().enumerate() {
    if !cand.usable {
      trace!("fbconfig {}: no visual, skipped", i);
      continue;
    }
    info!("Matching fbconfig {}, SAMPLE_BUFFERS = {}, SAMPLES = {}",
          i,
          cand.sample_buffers,
          cand.samples);

    best = match best {
      Some((_, samples)) if !(cand.has_sample_buffers() && cand.samples > samples) => best,
      _ => Some((i, cand.samples)),
    };
    worst = match worst {
      Some((_, samples)) if cand.has_sample_buffers() && cand.samples >= samples => worst,
      _ => Some((i, cand.samples)),
    };
  }

  match (best, worst) {
    (Some((best, best_samples)), Some((worst, worst_samples))) => {
      Ok(Selection {
        best: best,
        best_samples: best_samples,
        worst: worst,
        worst_samples: worst_samples,
      })
    }
    _ => Err(Error::ConfigurationUnavailable),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn cand(sample_buffers: bool, samples: c_int) -> Candidate {
    Candidate {
      sample_buffers: sample_buffers as c_int,
      samples: samples,
      usable: true,
    }
  }

  #[test]
  fn first_maximum_wins() {
    let sel = select(vec![cand(false, 0), cand(true, 4), cand(true, 2), cand(true, 4)]).unwrap();
    assert_eq!(sel.best, 1);
    assert_eq!(sel.best_samples, 4);
    assert_eq!(sel.worst, 0);
    assert_eq!(sel.worst_samples, 0);
  }

  #[test]
  fn first_usable_seeds_best_without_sample_buffers() {
    let sel = select(vec![cand(false, 0), cand(false, 8)]).unwrap();
    assert_eq!(sel.best, 0);
    // no sample buffers always takes the worst slot
    assert_eq!(sel.worst, 1);
  }

  #[test]
  fn unusable_candidates_are_skipped() {
    let dead = Candidate { sample_buffers: 1, samples: 16, usable: false };
    let sel = select(vec![dead, cand(true, 2), dead, cand(true, 1)]).unwrap();
    assert_eq!(sel.best, 1);
    assert_eq!(sel.worst, 3);
    assert_eq!(sel.worst_samples, 1);
  }

  #[test]
  fn multisampled_extremes() {
    let sel = select(vec![cand(true, 2), cand(true, 8), cand(true, 4), cand(true, 1)]).unwrap();
    assert_eq!((sel.best, sel.worst), (1, 3));
    assert!(sel.best_samples >= sel.worst_samples);
  }

  #[test]
  fn empty_input_is_unavailable() {
    match select(Vec::new()) {
      Err(Error::ConfigurationUnavailable) => (),
      other => panic!("unexpected: {:?}", other),
    }
  }

  #[test]
  fn all_unusable_is_unavailable() {
    let dead = Candidate { sample_buffers: 0, samples: 0, usable: false };
    assert!(select(vec![dead, dead]).is_err());
  }

  #[test]
  fn attribs_are_pairs_terminated_by_zero() {
    let attribs = Requirements::default().to_attribs();
    assert_eq!(attribs.len() % 2, 1);
    assert_eq!(*attribs.last().unwrap(), 0);
    let pairs: Vec<_> = attribs.chunks(2).filter(|c| c.len() == 2).map(|c| (c[0], c[1])).collect();
    assert!(pairs.contains(&(glx::GLX_DEPTH_SIZE, 24)));
    assert!(pairs.contains(&(glx::GLX_DOUBLEBUFFER, xlib::True)));
    assert!(pairs.contains(&(glx::GLX_X_VISUAL_TYPE, glx::GLX_TRUE_COLOR)));
  }

  fn glx_candidate() -> impl Strategy<Value = Candidate> {
    (any::<bool>(), 0..=16 as c_int, any::<bool>()).prop_map(|(sb, samples, usable)| {
      Candidate {
        sample_buffers: sb as c_int,
        samples: if sb { samples } else { 0 },
        usable: usable,
      }
    })
  }

  proptest! {
    #[test]
    fn best_never_below_worst(cands in prop::collection::vec(glx_candidate(), 1..12)) {
      match select(cands.clone()) {
        Ok(sel) => {
          prop_assert!(sel.best_samples >= sel.worst_samples);
          prop_assert!(cands[sel.best].usable && cands[sel.worst].usable);
        }
        Err(_) => prop_assert!(cands.iter().all(|c| !c.usable)),
      }
    }
  }
}
