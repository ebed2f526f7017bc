//! Path handles: parsing, construction, rendering and validation.
//!
//! This module turns strings into interned [`FileName`] handles and back.
//! The grammar lives in [`parse`](self::Segments), the handle in
//! [`FileName`], and platform checks in [`invalid_windows_component`].

mod handle;
mod interp;
mod parse;
mod validate;

pub use handle::FileName;
pub(crate) use handle::name_chain;
pub use interp::{Encoding, Interpretation};
pub use parse::{Components, Segment, Segments, FQN_MARKER};
pub use validate::{invalid_windows_component, MAX_WINDOWS_PATH_LEN};
