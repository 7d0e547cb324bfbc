use std::{collections::BTreeMap, error::Error, fs, path::PathBuf};

use clap::Parser;
use sqlgen_core::{
    SqlGenBuilder,
    descriptor::{GenerateRequest, Query},
    naming,
};
use tracing::{error, info, warn};

use crate::{
    codegen::{CodeGen, json::JsonCodeGen, typescript::TypeScriptCodeGen},
    config::{self, CodeGenerator},
};

use super::{init_debug, init_standard};

#[derive(Parser, Debug, Clone)]
#[command(about = "Generate query functions from a request file")]
#[must_use]
pub struct Generate {
    #[arg(long, help = "Path to the config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Show debug information")]
    debug: bool,
}

/// Groups queries by the output module they belong to, keeping their order.
fn group_by_file(queries: Vec<Query>) -> BTreeMap<String, Vec<Query>> {
    let mut files = BTreeMap::<String, Vec<Query>>::new();
    for query in queries {
        files
            .entry(naming::output_stem(&query.filename))
            .or_default()
            .push(query);
    }
    files
}

impl Generate {
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        match self.debug {
            true => init_debug()?,
            false => init_standard()?,
        }
        let config = config::get_config(&config::config_path(self.config))?;

        let sql_gen = SqlGenBuilder::default()
            .skip_unsupported(config.skip_unsupported)
            .build();

        let mut codegen: Box<dyn CodeGen> = match config.mode {
            CodeGenerator::TypeScript => Box::new(TypeScriptCodeGen::default()),
            CodeGenerator::Json => Box::new(JsonCodeGen::default()),
        };

        let mut queries = vec![];
        for source in &config.source {
            let content = fs::read_to_string(source)
                .map_err(|err| format!("encountered '{err}' attempting to read {}", source.display()))?;
            let request: GenerateRequest = serde_json::from_str(&content)?;
            info!(
                "Read {} queries from {}",
                request.queries.len(),
                source.display()
            );
            queries.extend(request.queries);
        }

        for (stem, queries) in group_by_file(queries) {
            let generated = match sql_gen.generate(&queries) {
                Ok(generated) => generated,
                Err(err) => {
                    error!("Generation for {stem} failed\n {err}");
                    return Err(err.into());
                }
            };
            for skipped in &generated.skipped {
                warn!("Skipped {} in {stem}: {}", skipped.query, skipped.reason);
            }
            info!("Generation for {stem} successful!");
            codegen.push(&stem, generated)?;
        }

        let outputs = codegen.finalize()?;
        match config.target {
            Some(target) => {
                fs::create_dir_all(&target)?;
                for output in outputs {
                    let path = target.join(&output.name);
                    fs::write(&path, output.contents)?;
                    info!("Written {}", path.display());
                }
            }
            None => {
                for output in outputs {
                    println!("{}", output.contents);
                }
            }
        }
        Ok(())
    }
}
