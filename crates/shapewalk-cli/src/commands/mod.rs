pub mod assemble;
pub mod compare;
pub mod dump;
pub mod image;
pub mod render;
pub mod size;

#[cfg(test)]
mod image_tests;
