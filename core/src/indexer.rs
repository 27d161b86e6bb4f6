mod build;
mod memory;

pub use {build::*, memory::*};
