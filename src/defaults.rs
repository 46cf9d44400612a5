//! Default values shared by every compilation.

use crate::types::{Color, Viewport};

/// Version number of the calculator state format we emit.
pub const FORMAT_VERSION: u32 = 7;

/// Id handed to the first entry of a graph. Ids below it are never used.
pub const FIRST_ENTRY_ID: u64 = 2;

pub const COLOR: Color = Color::BLACK;

pub const VIEWPORT: Viewport = Viewport {
    xmin: -10.0,
    xmax: 10.0,
    ymin: -10.0,
    ymax: 10.0,
};

/// Slider animation period at `@1x`, in milliseconds.
pub const ANIMATION_PERIOD_MS: f64 = 4000.0;

/// Call-stack frame name of a compilation that did not come from a file.
pub const ROOT_NAME: &str = "<root>";

/// Extension tried when an include name has no matching file on its own.
pub const SCRIPT_EXTENSION: &str = "dscript";
