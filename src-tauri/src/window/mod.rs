mod geometry;
mod registry;
mod role;

pub use geometry::MainGeometry;
pub use registry::{WindowHandle, WindowRegistry};
pub use role::WindowRole;
