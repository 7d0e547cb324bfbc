use std::{collections::BTreeMap, error::Error};

use sqlgen_core::{file::GeneratedFile, render};

use super::{CodeGen, OutputFile};

/// One `.ts` module per source file.
#[derive(Default)]
pub struct TypeScriptCodeGen {
    files: BTreeMap<String, GeneratedFile>,
}

impl CodeGen for TypeScriptCodeGen {
    fn push(&mut self, stem: &str, file: GeneratedFile) -> Result<(), Box<dyn Error>> {
        if self.files.contains_key(stem) {
            Err(format!("{stem}.ts would be generated twice"))?
        }
        self.files.insert(stem.to_string(), file);
        Ok(())
    }

    fn finalize(&self) -> Result<Vec<OutputFile>, Box<dyn Error>> {
        Ok(self
            .files
            .iter()
            .map(|(stem, file)| OutputFile {
                name: format!("{stem}.ts"),
                contents: render::typescript(file),
            })
            .collect())
    }
}
