// ABOUTME: Tool module - defines tools, their results, and the registry.
// ABOUTME: Core abstraction for what the server exposes.

mod registry;
mod result;
mod traits;

pub use registry::*;
pub use result::*;
pub use traits::*;
