//! Declaration, type and expression records for generated TypeScript.
//!
//! These are plain data. Rendering to source text lives in [`crate::render`];
//! the JSON backend serializes them as they are.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    Any,
    Number,
    Boolean,
    Void,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeExpr {
    Keyword { keyword: Keyword },
    Reference { name: String, args: Vec<TypeExpr> },
    Union { members: Vec<TypeExpr> },
    Array { element: Box<TypeExpr> },
}

impl TypeExpr {
    pub fn keyword(keyword: Keyword) -> Self {
        TypeExpr::Keyword { keyword }
    }

    pub fn any() -> Self {
        Self::keyword(Keyword::Any)
    }

    pub fn null() -> Self {
        Self::keyword(Keyword::Null)
    }

    pub fn reference(name: &str) -> Self {
        TypeExpr::Reference {
            name: name.to_owned(),
            args: vec![],
        }
    }

    pub fn generic(name: &str, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Reference {
            name: name.to_owned(),
            args,
        }
    }

    pub fn union(members: Vec<TypeExpr>) -> Self {
        TypeExpr::Union { members }
    }

    pub fn array(element: TypeExpr) -> Self {
        TypeExpr::Array {
            element: Box::new(element),
        }
    }

    /// `T | null`
    pub fn nullable(inner: TypeExpr) -> Self {
        Self::union(vec![inner, Self::null()])
    }

    /// `Promise<T>`
    pub fn promise(inner: TypeExpr) -> Self {
        Self::generic("Promise", vec![inner])
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeExpr::Keyword {
                keyword: Keyword::Null,
            } => true,
            TypeExpr::Union { members } => members.iter().any(TypeExpr::is_nullable),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Expr {
    Identifier { name: String },
    PropertyAccess { object: Box<Expr>, property: String },
    ElementAccess { object: Box<Expr>, index: Box<Expr> },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Await { expr: Box<Expr> },
    Array { elements: Vec<Expr> },
    Number { value: String },
    Null,
    Coalesce { left: Box<Expr>, right: Box<Expr> },
    Template { text: String },
}

impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Identifier {
            name: name.to_owned(),
        }
    }

    pub fn number(value: usize) -> Self {
        Expr::Number {
            value: value.to_string(),
        }
    }

    pub fn template(text: &str) -> Self {
        Expr::Template {
            text: text.to_owned(),
        }
    }

    pub fn array(elements: Vec<Expr>) -> Self {
        Expr::Array { elements }
    }

    pub fn property(self, property: &str) -> Self {
        Expr::PropertyAccess {
            object: Box::new(self),
            property: property.to_owned(),
        }
    }

    pub fn element(self, index: usize) -> Self {
        Expr::ElementAccess {
            object: Box::new(self),
            index: Box::new(Expr::number(index)),
        }
    }

    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(self),
            args,
        }
    }

    pub fn awaited(self) -> Self {
        Expr::Await {
            expr: Box::new(self),
        }
    }

    /// `self ?? null`
    pub fn or_null(self) -> Self {
        Expr::Coalesce {
            left: Box::new(self),
            right: Box::new(Expr::Null),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Stmt {
    Expr { expr: Expr },
    Const { name: String, init: Expr },
    Return { expr: Expr },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl Param {
    pub fn new(name: &str, ty: TypeExpr) -> Self {
        Self {
            name: name.to_owned(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub exported: bool,
    pub is_async: bool,
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Decl {
    Import {
        names: Vec<String>,
        module: String,
    },
    Const {
        name: String,
        exported: bool,
        init: Expr,
    },
    Interface {
        name: String,
        exported: bool,
        fields: Vec<Field>,
    },
    Function(FunctionDecl),
}

impl Decl {
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Import { .. } => None,
            Decl::Const { name, .. } | Decl::Interface { name, .. } => Some(name.as_str()),
            Decl::Function(function) => Some(function.name.as_str()),
        }
    }
}
