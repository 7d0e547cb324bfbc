use std::collections::HashSet;

use tracing::{error, info};

use crate::{
    ast::Decl,
    descriptor::Query,
    driver::{Driver, NeverChangeDriver},
    error::GenError,
    file::{GeneratedFile, SkippedQuery},
};

pub mod ast;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod file;
pub mod naming;
pub mod render;
pub mod types;

#[must_use]
#[derive(Debug, Default)]
pub struct SqlGenBuilder {
    skip_unsupported: bool,
}

impl SqlGenBuilder {
    /// Skip queries that cannot be generated (unsupported kind, clashing
    /// name) instead of failing the whole file. Skipped queries are reported
    /// in [`GeneratedFile::skipped`].
    pub fn skip_unsupported(&mut self, skip: bool) -> &mut Self {
        self.skip_unsupported = skip;
        self
    }

    pub fn build(&self) -> SqlGen {
        SqlGen {
            driver: NeverChangeDriver,
            skip_unsupported: self.skip_unsupported,
        }
    }
}

pub struct SqlGen {
    driver: NeverChangeDriver,
    skip_unsupported: bool,
}

impl SqlGen {
    /// Generates one file's worth of declarations, keeping input order.
    ///
    /// A query that fails, or that would export a name an earlier query
    /// already exports, stops generation unless the builder skips it.
    pub fn generate(&self, queries: &[Query]) -> Result<GeneratedFile, GenError> {
        let mut generated = GeneratedFile {
            preamble: self.driver.preamble(),
            ..Default::default()
        };
        let mut taken = HashSet::new();
        for decl in &generated.preamble {
            if let Decl::Import { names, .. } = decl {
                taken.extend(names.iter().cloned());
            }
        }

        for query in queries {
            let result = file::query_decls(&self.driver, query).and_then(|decls| {
                let clash = decls.names().find(|name| taken.contains(*name));
                match clash.map(str::to_owned) {
                    Some(name) => Err(GenError::DuplicateName {
                        query: query.name.clone(),
                        name,
                    }),
                    None => Ok(decls),
                }
            });
            match result {
                Ok(decls) => {
                    info!("Generated {} ({})", query.name, decls.kind);
                    taken.extend(decls.names().map(str::to_owned));
                    generated.queries.push(decls);
                }
                Err(err) if self.skip_unsupported => {
                    error!("Generation for {} failed, skipping\n {err}", query.name);
                    generated.skipped.push(SkippedQuery {
                        query: query.name.clone(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::TypeExpr,
        descriptor::{Column, QueryKind},
        error::DriverError,
    };

    fn queries() -> Vec<Query> {
        vec![
            Query::new("CreateAuthor", QueryKind::ExecLastId)
                .with_param(Column::new("name", "text", true)),
            Query::new("GetAuthor", QueryKind::One)
                .with_param(Column::new("id", "int", true))
                .with_column(Column::new("id", "int", true)),
            Query::new("ListAuthors", QueryKind::Many).with_column(Column::new("id", "int", true)),
            Query::new("DeleteAuthor", QueryKind::Exec).with_param(Column::new("id", "int", true)),
        ]
    }

    #[test]
    fn strict_generation_fails_on_execlastid() {
        let sql_gen = SqlGenBuilder::default().build();
        assert_eq!(
            sql_gen.generate(&queries()),
            Err(GenError::Driver(DriverError::UnsupportedQueryKind {
                query: "createAuthor".into(),
                kind: QueryKind::ExecLastId,
            }))
        );
    }

    #[test]
    fn skipping_keeps_order_of_the_rest() {
        let sql_gen = SqlGenBuilder::default().skip_unsupported(true).build();
        let file = sql_gen.generate(&queries()).unwrap();
        let names: Vec<_> = file.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["getAuthor", "listAuthors", "deleteAuthor"]);
        assert_eq!(file.skipped.len(), 1);
        assert_eq!(file.skipped[0].query, "CreateAuthor");
        assert_eq!(file.preamble, NeverChangeDriver.preamble());
    }

    #[test]
    fn unknown_command_is_skippable() {
        let queries = vec![
            Query {
                name: "CountAuthors".into(),
                cmd: ":execrows".into(),
                ..Default::default()
            },
            Query::new("ListAuthors", QueryKind::Many),
        ];
        assert!(SqlGenBuilder::default().build().generate(&queries).is_err());

        let file = SqlGenBuilder::default()
            .skip_unsupported(true)
            .build()
            .generate(&queries)
            .unwrap();
        assert_eq!(file.queries.len(), 1);
        assert_eq!(file.skipped[0].query, "CountAuthors");
    }

    #[test]
    fn strict_generation_fails_on_duplicate_function() {
        let queries = vec![
            Query::new("ListAuthors", QueryKind::Many),
            Query::new("list_authors", QueryKind::Exec),
        ];
        assert_eq!(
            SqlGenBuilder::default().build().generate(&queries),
            Err(GenError::DuplicateName {
                query: "list_authors".into(),
                name: "listAuthorsQuery".into(),
            })
        );
    }

    #[test]
    fn duplicate_names_are_skipped() {
        let queries = vec![
            Query::new("ListAuthors", QueryKind::Many),
            Query::new("list_authors", QueryKind::Many),
            Query::new("GetAuthor", QueryKind::One),
        ];
        let file = SqlGenBuilder::default()
            .skip_unsupported(true)
            .build()
            .generate(&queries)
            .unwrap();
        let names: Vec<_> = file.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["listAuthors", "getAuthor"]);
        assert_eq!(file.skipped.len(), 1);
        assert_eq!(file.skipped[0].query, "list_authors");
    }

    #[test]
    fn clash_with_other_declarations_is_reported() {
        // `listAuthorsQuery` is both the first query's text constant and the
        // second query's function.
        let queries = vec![
            Query::new("ListAuthors", QueryKind::Many),
            Query::new("ListAuthorsQuery", QueryKind::Many),
        ];
        assert_eq!(
            SqlGenBuilder::default().build().generate(&queries),
            Err(GenError::DuplicateName {
                query: "ListAuthorsQuery".into(),
                name: "listAuthorsQuery".into(),
            })
        );

        let file = SqlGenBuilder::default()
            .skip_unsupported(true)
            .build()
            .generate(&queries)
            .unwrap();
        let mut names: Vec<_> = file.declarations().filter_map(Decl::name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(file.skipped[0].query, "ListAuthorsQuery");
    }

    #[test]
    fn preamble_is_independent_of_queries() {
        let sql_gen = SqlGenBuilder::default().skip_unsupported(true).build();
        let empty = sql_gen.generate(&[]).unwrap();
        let full = sql_gen.generate(&queries()).unwrap();
        assert_eq!(empty.preamble, full.preamble);
        assert!(empty.queries.is_empty());
    }

    #[test]
    fn many_returns_row_array() {
        let file = SqlGenBuilder::default()
            .build()
            .generate(&[Query::new("ListAuthors", QueryKind::Many)])
            .unwrap();
        let function = file.functions().next().unwrap();
        assert_eq!(
            function.return_type,
            TypeExpr::promise(TypeExpr::array(TypeExpr::reference("ListAuthorsRow")))
        );
    }
}
