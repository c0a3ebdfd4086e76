mod render;
mod tree;

pub use self::render::*;
pub use self::tree::*;
