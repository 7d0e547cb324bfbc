use std::{collections::BTreeMap, error::Error};

use sqlgen_core::file::GeneratedFile;

use super::{CodeGen, OutputFile};

pub const OUTPUT_FILE: &str = "sqlgen.json";

/// Dumps the declarations of every file into a single JSON document.
#[derive(Default)]
pub struct JsonCodeGen {
    files: BTreeMap<String, GeneratedFile>,
}

impl CodeGen for JsonCodeGen {
    fn push(&mut self, stem: &str, file: GeneratedFile) -> Result<(), Box<dyn Error>> {
        self.files.insert(stem.to_string(), file);
        Ok(())
    }

    fn finalize(&self) -> Result<Vec<OutputFile>, Box<dyn Error>> {
        Ok(vec![OutputFile {
            name: OUTPUT_FILE.to_owned(),
            contents: serde_json::to_string_pretty(&self.files)?,
        }])
    }
}
