use tracing::warn;

use crate::{
    ast::{Decl, Expr, FunctionDecl, Keyword, Param, Stmt, TypeExpr},
    descriptor::{Column, Parameter, QueryKind},
    error::DriverError,
    naming, types,
};

pub const CLIENT_TYPE: &str = "NeverChangeDB";
pub const CLIENT_MODULE: &str = "neverchange";

const CLIENT_PARAM: &str = "db";
const ARGS_PARAM: &str = "args";
const RESULT_BINDING: &str = "result";

/// Everything a declaration needs to know about one query.
#[derive(Debug, Clone, Copy)]
pub struct DeclContext<'a> {
    pub func_name: &'a str,
    /// Identifier of the constant holding the query text.
    pub query_name: &'a str,
    pub arg_iface: Option<&'a str>,
    pub params: &'a [Parameter],
    pub columns: &'a [Column],
}

pub trait Driver {
    fn column_type(&self, column: Option<&Column>) -> TypeExpr;

    /// Imports every generated file starts with.
    fn preamble(&self) -> Vec<Decl>;

    fn exec_decl(&self, ctx: &DeclContext) -> FunctionDecl;

    fn one_decl(&self, ctx: &DeclContext, return_iface: &str) -> FunctionDecl;

    fn many_decl(&self, ctx: &DeclContext, return_iface: &str) -> FunctionDecl;

    fn execlastid_decl(&self, ctx: &DeclContext) -> Result<FunctionDecl, DriverError>;

    fn declare(
        &self,
        kind: QueryKind,
        ctx: &DeclContext,
        return_iface: &str,
    ) -> Result<FunctionDecl, DriverError> {
        Ok(match kind {
            QueryKind::Exec => self.exec_decl(ctx),
            QueryKind::One => self.one_decl(ctx, return_iface),
            QueryKind::Many => self.many_decl(ctx, return_iface),
            QueryKind::ExecLastId => self.execlastid_decl(ctx)?,
        })
    }
}

/// Driver for the `neverchange` client, whose `execute` and `query` methods
/// take the query text and an array of bound values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverChangeDriver;

fn func_params(arg_iface: Option<&str>, params: &[Parameter]) -> Vec<Param> {
    let mut func_params = vec![Param::new(CLIENT_PARAM, TypeExpr::reference(CLIENT_TYPE))];
    if let Some(iface) = arg_iface {
        if !params.is_empty() {
            func_params.push(Param::new(ARGS_PARAM, TypeExpr::reference(iface)));
        }
    }
    func_params
}

fn bound_values(params: &[Parameter]) -> Expr {
    Expr::array(
        naming::arg_field_names(params)
            .iter()
            .map(|field| Expr::ident(ARGS_PARAM).property(field))
            .collect(),
    )
}

/// `await db.<method>(<query>, [args.a, args.b])`
fn client_call(method: &str, ctx: &DeclContext) -> Expr {
    if ctx.arg_iface.is_none() && !ctx.params.is_empty() {
        warn!(
            "{} has {} parameters but no argument interface",
            ctx.func_name,
            ctx.params.len()
        );
    }
    Expr::ident(CLIENT_PARAM)
        .property(method)
        .call(vec![Expr::ident(ctx.query_name), bound_values(ctx.params)])
        .awaited()
}

fn async_function(ctx: &DeclContext, return_type: TypeExpr, body: Vec<Stmt>) -> FunctionDecl {
    FunctionDecl {
        name: ctx.func_name.to_owned(),
        exported: true,
        is_async: true,
        params: func_params(ctx.arg_iface, ctx.params),
        return_type: TypeExpr::promise(return_type),
        body,
    }
}

impl Driver for NeverChangeDriver {
    fn column_type(&self, column: Option<&Column>) -> TypeExpr {
        types::column_type(column)
    }

    fn preamble(&self) -> Vec<Decl> {
        vec![Decl::Import {
            names: vec![CLIENT_TYPE.to_owned()],
            module: CLIENT_MODULE.to_owned(),
        }]
    }

    fn exec_decl(&self, ctx: &DeclContext) -> FunctionDecl {
        async_function(
            ctx,
            TypeExpr::keyword(Keyword::Void),
            vec![Stmt::Expr {
                expr: client_call("execute", ctx),
            }],
        )
    }

    fn one_decl(&self, ctx: &DeclContext, return_iface: &str) -> FunctionDecl {
        async_function(
            ctx,
            TypeExpr::nullable(TypeExpr::reference(return_iface)),
            vec![
                Stmt::Const {
                    name: RESULT_BINDING.to_owned(),
                    init: client_call("query", ctx),
                },
                // An empty result is a missing row, not an error.
                Stmt::Return {
                    expr: Expr::ident(RESULT_BINDING).element(0).or_null(),
                },
            ],
        )
    }

    fn many_decl(&self, ctx: &DeclContext, return_iface: &str) -> FunctionDecl {
        async_function(
            ctx,
            TypeExpr::array(TypeExpr::reference(return_iface)),
            vec![Stmt::Return {
                expr: client_call("query", ctx),
            }],
        )
    }

    fn execlastid_decl(&self, ctx: &DeclContext) -> Result<FunctionDecl, DriverError> {
        Err(DriverError::UnsupportedQueryKind {
            query: ctx.func_name.to_owned(),
            kind: QueryKind::ExecLastId,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_param() -> Vec<Parameter> {
        vec![Parameter::new(1, Column::new("id", "int", true))]
    }

    fn ctx<'a>(
        func_name: &'a str,
        arg_iface: Option<&'a str>,
        params: &'a [Parameter],
    ) -> DeclContext<'a> {
        DeclContext {
            func_name,
            query_name: "someQuery",
            arg_iface,
            params,
            columns: &[],
        }
    }

    fn db_param() -> Param {
        Param::new("db", TypeExpr::reference(CLIENT_TYPE))
    }

    #[test]
    fn zero_params_only_take_client() {
        let driver = NeverChangeDriver;
        for arg_iface in [None, Some("ListAuthorsArgs")] {
            let ctx = ctx("listAuthors", arg_iface, &[]);
            assert_eq!(driver.exec_decl(&ctx).params, vec![db_param()]);
            assert_eq!(driver.one_decl(&ctx, "Author").params, vec![db_param()]);
            assert_eq!(driver.many_decl(&ctx, "Author").params, vec![db_param()]);
        }
    }

    #[test]
    fn params_without_interface_only_take_client() {
        let params = id_param();
        let decl = NeverChangeDriver.exec_decl(&ctx("deleteAuthor", None, &params));
        assert_eq!(decl.params, vec![db_param()]);
    }

    #[test]
    fn params_with_interface_take_args() {
        let params = id_param();
        let decl = NeverChangeDriver.exec_decl(&ctx("deleteAuthor", Some("DeleteAuthorArgs"), &params));
        assert_eq!(
            decl.params,
            vec![
                db_param(),
                Param::new("args", TypeExpr::reference("DeleteAuthorArgs"))
            ]
        );
    }

    #[test]
    fn exec_awaits_execute() {
        let params = vec![
            Parameter::new(1, Column::new("name", "text", true)),
            Parameter::new(2, Column::new("id", "int", true)),
        ];
        let decl = NeverChangeDriver.exec_decl(&ctx("updateAuthor", Some("UpdateAuthorArgs"), &params));
        assert_eq!(
            decl.return_type,
            TypeExpr::promise(TypeExpr::keyword(Keyword::Void))
        );
        assert!(decl.exported && decl.is_async);
        assert_eq!(
            decl.body,
            vec![Stmt::Expr {
                expr: Expr::ident("db")
                    .property("execute")
                    .call(vec![
                        Expr::ident("someQuery"),
                        Expr::array(vec![
                            Expr::ident("args").property("name"),
                            Expr::ident("args").property("id"),
                        ]),
                    ])
                    .awaited()
            }]
        );
    }

    #[test]
    fn one_returns_first_row_or_null() {
        let params = id_param();
        let decl = NeverChangeDriver.one_decl(
            &ctx("getAuthor", Some("GetAuthorArgs"), &params),
            "GetAuthorRow",
        );
        assert_eq!(decl.name, "getAuthor");
        assert_eq!(
            decl.params,
            vec![
                db_param(),
                Param::new("args", TypeExpr::reference("GetAuthorArgs"))
            ]
        );
        assert_eq!(
            decl.return_type,
            TypeExpr::promise(TypeExpr::union(vec![
                TypeExpr::reference("GetAuthorRow"),
                TypeExpr::null()
            ]))
        );
        assert_eq!(
            decl.body,
            vec![
                Stmt::Const {
                    name: "result".into(),
                    init: Expr::ident("db")
                        .property("query")
                        .call(vec![
                            Expr::ident("someQuery"),
                            Expr::array(vec![Expr::ident("args").property("id")]),
                        ])
                        .awaited(),
                },
                Stmt::Return {
                    expr: Expr::ident("result").element(0).or_null()
                },
            ]
        );
    }

    #[test]
    fn many_returns_query_result() {
        let decl = NeverChangeDriver.many_decl(&ctx("listAuthors", None, &[]), "Author");
        assert_eq!(decl.params, vec![db_param()]);
        assert_eq!(
            decl.return_type,
            TypeExpr::promise(TypeExpr::array(TypeExpr::reference("Author")))
        );
        let TypeExpr::Reference { args, .. } = &decl.return_type else {
            panic!("expected Promise reference");
        };
        assert!(!args[0].is_nullable());
        assert_eq!(
            decl.body,
            vec![Stmt::Return {
                expr: Expr::ident("db")
                    .property("query")
                    .call(vec![Expr::ident("someQuery"), Expr::array(vec![])])
                    .awaited()
            }]
        );
    }

    #[test]
    fn execlastid_is_rejected() {
        let params = id_param();
        let contexts = [
            ctx("createAuthor", None, &[]),
            ctx("createAuthor", Some("CreateAuthorArgs"), &params),
        ];
        for ctx in contexts {
            assert_eq!(
                NeverChangeDriver.execlastid_decl(&ctx),
                Err(DriverError::UnsupportedQueryKind {
                    query: "createAuthor".into(),
                    kind: QueryKind::ExecLastId,
                })
            );
            assert!(
                NeverChangeDriver
                    .declare(QueryKind::ExecLastId, &ctx, "Unused")
                    .is_err()
            );
        }
    }

    #[test]
    fn preamble_imports_client() {
        assert_eq!(
            NeverChangeDriver.preamble(),
            vec![Decl::Import {
                names: vec!["NeverChangeDB".into()],
                module: "neverchange".into(),
            }]
        );
    }
}
