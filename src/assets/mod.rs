pub mod decode;
pub mod image;
