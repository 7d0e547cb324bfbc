use serde::Serialize;

use crate::{
    ast::{Decl, Expr, Field, FunctionDecl},
    descriptor::{Query, QueryKind},
    driver::{DeclContext, Driver},
    error::GenError,
    naming,
};

/// Declarations generated for a single query, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDecls {
    pub query: String,
    pub kind: QueryKind,
    pub declarations: Vec<Decl>,
}

impl QueryDecls {
    pub fn function(&self) -> Option<&FunctionDecl> {
        self.declarations.iter().find_map(|decl| match decl {
            Decl::Function(function) => Some(function),
            _ => None,
        })
    }

    /// Exported names this query adds to the file.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().filter_map(Decl::name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedQuery {
    pub query: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub preamble: Vec<Decl>,
    pub queries: Vec<QueryDecls>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedQuery>,
}

impl GeneratedFile {
    pub fn declarations(&self) -> impl Iterator<Item = &Decl> {
        self.preamble
            .iter()
            .chain(self.queries.iter().flat_map(|query| &query.declarations))
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.queries.iter().filter_map(QueryDecls::function)
    }
}

fn interface(name: String, fields: Vec<Field>) -> Decl {
    Decl::Interface {
        name,
        exported: true,
        fields,
    }
}

/// Builds the query text constant, the argument and row interfaces and the
/// function for one query.
pub fn query_decls(driver: &impl Driver, query: &Query) -> Result<QueryDecls, GenError> {
    let kind = query.kind()?;
    let func_name = naming::function_name(&query.name);
    let query_name = naming::query_const_name(&query.name);

    let mut declarations = vec![Decl::Const {
        name: query_name.clone(),
        exported: true,
        init: Expr::template(&query.text),
    }];

    let arg_iface = match query.params.is_empty() {
        true => None,
        false => Some(naming::args_interface_name(&query.name)),
    };
    if let Some(iface) = &arg_iface {
        let fields = naming::arg_field_names(&query.params)
            .into_iter()
            .zip(&query.params)
            .map(|(name, param)| Field {
                name,
                ty: driver.column_type(param.column.as_ref()),
            })
            .collect();
        declarations.push(interface(iface.clone(), fields));
    }

    let return_iface = naming::row_interface_name(&query.name);
    if kind.returns_rows() {
        let fields = naming::column_field_names(&query.columns)
            .into_iter()
            .zip(&query.columns)
            .map(|(name, column)| Field {
                name,
                ty: driver.column_type(Some(column)),
            })
            .collect();
        declarations.push(interface(return_iface.clone(), fields));
    }

    let ctx = DeclContext {
        func_name: &func_name,
        query_name: &query_name,
        arg_iface: arg_iface.as_deref(),
        params: &query.params,
        columns: &query.columns,
    };
    let function = driver.declare(kind, &ctx, &return_iface)?;
    declarations.push(Decl::Function(function));

    Ok(QueryDecls {
        query: query.name.clone(),
        kind,
        declarations,
    })
}
