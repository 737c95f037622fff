// Adapters layer: concrete renderers behind the `Renderer` port.

pub mod memory;
pub mod process;

pub use memory::{MemoryRenderer, RenderRequest};
pub use process::{Engine, ProcessRenderer};
