//! TypeScript source rendering for [`crate::ast`] records.

use std::fmt::{self, Display, Write};

use crate::{
    ast::{Decl, Expr, Field, FunctionDecl, Keyword, Stmt, TypeExpr},
    file::GeneratedFile,
};

pub const HEADER: &str = "// Code generated by sqlgen. DO NOT EDIT.";

const INDENT: &str = "    ";

// Backslash first so the escapes added afterwards are left alone.
const TEMPLATE_ESCAPES: &[(&str, &str)] = &[("\\", "\\\\"), ("`", "\\`"), ("${", "\\${")];

pub fn escape_template(text: &str) -> String {
    TEMPLATE_ESCAPES
        .iter()
        .fold(text.to_owned(), |out, (from, to)| out.replace(from, to))
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::Any => write!(f, "any"),
            Keyword::Number => write!(f, "number"),
            Keyword::Boolean => write!(f, "boolean"),
            Keyword::Void => write!(f, "void"),
            Keyword::Null => write!(f, "null"),
        }
    }
}

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Keyword { keyword } => write!(f, "{keyword}"),
            TypeExpr::Reference { name, args } if args.is_empty() => write!(f, "{name}"),
            TypeExpr::Reference { name, args } => write!(f, "{name}<{}>", join(args, ", ")),
            TypeExpr::Union { members } => write!(f, "{}", join(members, " | ")),
            TypeExpr::Array { element } => match element.as_ref() {
                TypeExpr::Union { .. } => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
        }
    }
}

/// Whether `expr` has to be parenthesized when used as the object of a
/// member access or the callee of a call.
fn needs_parens(expr: &Expr) -> bool {
    matches!(expr, Expr::Await { .. } | Expr::Coalesce { .. })
}

struct Operand<'a>(&'a Expr);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match needs_parens(self.0) {
            true => write!(f, "({})", self.0),
            false => write!(f, "{}", self.0),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier { name } => write!(f, "{name}"),
            Expr::PropertyAccess { object, property } => {
                write!(f, "{}.{property}", Operand(object))
            }
            Expr::ElementAccess { object, index } => write!(f, "{}[{index}]", Operand(object)),
            Expr::Call { callee, args } => write!(f, "{}({})", Operand(callee), join(args, ", ")),
            Expr::Await { expr } => write!(f, "await {expr}"),
            Expr::Array { elements } => write!(f, "[{}]", join(elements, ", ")),
            Expr::Number { value } => write!(f, "{value}"),
            Expr::Null => write!(f, "null"),
            Expr::Coalesce { left, right } => write!(f, "{left} ?? {right}"),
            Expr::Template { text } => write!(f, "`{}`", escape_template(text)),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr { expr } => write!(f, "{expr};"),
            Stmt::Const { name, init } => write!(f, "const {name} = {init};"),
            Stmt::Return { expr } => write!(f, "return {expr};"),
        }
    }
}

fn export(exported: bool) -> &'static str {
    match exported {
        true => "export ",
        false => "",
    }
}

fn write_function(out: &mut String, function: &FunctionDecl) -> fmt::Result {
    let FunctionDecl {
        name,
        exported,
        is_async,
        params,
        return_type,
        body,
    } = function;
    let params = params
        .iter()
        .map(|param| format!("{}: {}", param.name, param.ty))
        .collect::<Vec<_>>()
        .join(", ");
    let is_async = match is_async {
        true => "async ",
        false => "",
    };
    writeln!(
        out,
        "{}{is_async}function {name}({params}): {return_type} {{",
        export(*exported)
    )?;
    for stmt in body {
        writeln!(out, "{INDENT}{stmt}")?;
    }
    write!(out, "}}")
}

fn write_interface(out: &mut String, name: &str, exported: bool, fields: &[Field]) -> fmt::Result {
    writeln!(out, "{}interface {name} {{", export(exported))?;
    for field in fields {
        writeln!(out, "{INDENT}{}: {};", field.name, field.ty)?;
    }
    write!(out, "}}")
}

pub fn declaration(decl: &Decl) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = match decl {
        Decl::Import { names, module } => {
            write!(out, "import {{ {} }} from \"{module}\";", names.join(", "))
        }
        Decl::Const {
            name,
            exported,
            init,
        } => write!(out, "{}const {name} = {init};", export(*exported)),
        Decl::Interface {
            name,
            exported,
            fields,
        } => write_interface(&mut out, name, *exported, fields),
        Decl::Function(function) => write_function(&mut out, function),
    };
    out
}

/// Renders a whole generated file, declarations separated by blank lines.
pub fn typescript(file: &GeneratedFile) -> String {
    let mut code = String::from(HEADER);
    code.push_str("\n\n");
    let blocks = file.declarations().map(declaration).collect::<Vec<_>>();
    code.push_str(&blocks.join("\n\n"));
    code.push('\n');
    code
}
