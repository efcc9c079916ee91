pub mod decode;
pub mod fonts;
pub mod loader;
