/// name of the extension that enables versioned context creation.
pub const CREATE_CONTEXT: &str = "GLX_ARB_create_context";

/// check whether `name` appears in `list` as a whole whitespace-delimited token.
///
/// names that are empty or contain whitespace are never supported.
pub fn is_supported(list: &str, name: &str) -> bool {
  if name.is_empty() || name.chars().any(char::is_whitespace) {
    return false;
  }

  let mut start = 0;
  while let Some(pos) = list[start..].find(name) {
    let begin = start + pos;
    let end = begin + name.len();

    let head_ok = list[..begin].chars().next_back().map_or(true, char::is_whitespace);
    let tail_ok = list[end..].chars().next().map_or(true, char::is_whitespace);
    if head_ok && tail_ok {
      return true;
    }

    start = end;
  }

  false
}

/// what the GLX implementation lets us do when creating a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextCapabilities {
  pub advanced_creation: bool,
}

impl ContextCapabilities {
  pub fn from_extensions(list: &str) -> ContextCapabilities {
    ContextCapabilities {
      advanced_creation: is_supported(list, CREATE_CONTEXT),
    }
  }
}
