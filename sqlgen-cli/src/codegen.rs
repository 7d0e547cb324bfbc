pub mod json;
pub mod typescript;

use std::error::Error;

use sqlgen_core::file::GeneratedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub contents: String,
}

pub trait CodeGen {
    fn push(&mut self, stem: &str, file: GeneratedFile) -> Result<(), Box<dyn Error>>;

    fn finalize(&self) -> Result<Vec<OutputFile>, Box<dyn Error>>;
}
