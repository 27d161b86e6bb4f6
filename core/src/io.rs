mod edge_file;
mod text_source;

pub use {edge_file::*, text_source::*};
