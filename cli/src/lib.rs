pub mod output;
pub mod source;

pub use source::YamlFileSource;
