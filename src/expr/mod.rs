//! # Expression Model
//!
//! The terms of the typed lambda calculus used for compositional semantics.
//!
//! ```text
//! pub enum Expr {
//!     Ident(Identifier),          // x, John, Happy
//!     Binder(Binder),             // λx[...], ∃x[...], ∀x[...], ιx[...]
//!     Not(Box<Expr>),             // ¬A
//!     Binary(LogicalBinary),      // A ∧ B, A ∨ B, A → B, A ↔ B
//!     Equality(Equality),         // a = b
//!     Application(Application),   // f(a)
//! }
//! ```
//!
//! Trees are plain immutable values: nodes know nothing about their parents and
//! every transformation (see [`crate::convert`]) builds a new tree. Equality is
//! structural, so two separately built trees with the same shape, names and
//! types compare equal.

pub mod typer;
pub mod typing;
pub mod vars;

use crate::types::{Alignment, Type};

pub use typer::IdentifierTyper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentKind {
    Variable,
    Constant,
}

/// A variable or constant term together with its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
    pub kind: IdentKind,
    pub ty: Type,
}

impl Identifier {
    pub fn variable(name: impl Into<String>, ty: Type) -> Self {
        Identifier {
            name: name.into(),
            kind: IdentKind::Variable,
            ty,
        }
    }

    pub fn constant(name: impl Into<String>, ty: Type) -> Self {
        Identifier {
            name: name.into(),
            kind: IdentKind::Constant,
            ty,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.kind == IdentKind::Variable
    }

    pub fn specialize(&self, alignment: &Alignment) -> Self {
        Identifier {
            name: self.name.clone(),
            kind: self.kind,
            ty: alignment.apply(&self.ty),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinderKind {
    Lambda,
    Exists,
    ForAll,
    Iota,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binder {
    pub kind: BinderKind,
    pub var: Identifier,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
    If,
    Iff,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalBinary {
    pub op: Connective,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equality {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Application {
    pub func: Box<Expr>,
    pub arg: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Ident(Identifier),
    Binder(Binder),
    Not(Box<Expr>),
    Binary(LogicalBinary),
    Equality(Equality),
    Application(Application),
}

impl Expr {
    pub fn var(name: impl Into<String>, ty: Type) -> Self {
        Expr::Ident(Identifier::variable(name, ty))
    }

    pub fn constant(name: impl Into<String>, ty: Type) -> Self {
        Expr::Ident(Identifier::constant(name, ty))
    }

    pub fn binder(kind: BinderKind, var: Identifier, body: Expr) -> Self {
        Expr::Binder(Binder {
            kind,
            var,
            body: Box::new(body),
        })
    }

    pub fn lambda(var: Identifier, body: Expr) -> Self {
        Expr::binder(BinderKind::Lambda, var, body)
    }

    pub fn exists(var: Identifier, body: Expr) -> Self {
        Expr::binder(BinderKind::Exists, var, body)
    }

    pub fn for_all(var: Identifier, body: Expr) -> Self {
        Expr::binder(BinderKind::ForAll, var, body)
    }

    pub fn iota(var: Identifier, body: Expr) -> Self {
        Expr::binder(BinderKind::Iota, var, body)
    }

    pub fn binary(op: Connective, left: Expr, right: Expr) -> Self {
        Expr::Binary(LogicalBinary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::binary(Connective::And, left, right)
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::binary(Connective::Or, left, right)
    }

    pub fn implies(left: Expr, right: Expr) -> Self {
        Expr::binary(Connective::If, left, right)
    }

    pub fn iff(left: Expr, right: Expr) -> Self {
        Expr::binary(Connective::Iff, left, right)
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    pub fn equality(left: Expr, right: Expr) -> Self {
        Expr::Equality(Equality {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn apply(func: Expr, arg: Expr) -> Self {
        Expr::Application(Application {
            func: Box::new(func),
            arg: Box::new(arg),
        })
    }

    /// A lambda applied to an argument, the only shape beta reduction contracts.
    pub fn is_redex(&self) -> bool {
        matches!(
            self,
            Expr::Application(Application { func, .. })
                if matches!(func.as_ref(), Expr::Binder(b) if b.kind == BinderKind::Lambda)
        )
    }

    /// Copy of the tree with every identifier's type specialized by `alignment`.
    pub fn specialize(&self, alignment: &Alignment) -> Expr {
        match self {
            Expr::Ident(id) => Expr::Ident(id.specialize(alignment)),
            Expr::Binder(b) => Expr::binder(
                b.kind,
                b.var.specialize(alignment),
                b.body.specialize(alignment),
            ),
            Expr::Not(operand) => Expr::not(operand.specialize(alignment)),
            Expr::Binary(bin) => Expr::binary(
                bin.op,
                bin.left.specialize(alignment),
                bin.right.specialize(alignment),
            ),
            Expr::Equality(eq) => {
                Expr::equality(eq.left.specialize(alignment), eq.right.specialize(alignment))
            }
            Expr::Application(app) => {
                Expr::apply(app.func.specialize(alignment), app.arg.specialize(alignment))
            }
        }
    }
}

impl From<Identifier> for Expr {
    fn from(id: Identifier) -> Self {
        Expr::Ident(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ENTITY, TRUTH};

    #[test]
    fn test_structural_equality() {
        let a = Expr::apply(Expr::constant("P", Type::predicate()), Expr::constant("m", ENTITY));
        let b = Expr::apply(Expr::constant("P", Type::predicate()), Expr::constant("m", ENTITY));
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_types_and_kinds() {
        assert_ne!(Expr::var("x", ENTITY), Expr::var("x", TRUTH));
        assert_ne!(Expr::var("x", ENTITY), Expr::constant("x", ENTITY));
    }

    #[test]
    fn test_is_redex() {
        let x = Identifier::variable("x", ENTITY);
        let lam = Expr::lambda(x.clone(), Expr::apply(Expr::constant("P", Type::predicate()), x.into()));
        let app = Expr::apply(lam.clone(), Expr::constant("j", ENTITY));
        assert!(app.is_redex());
        assert!(!lam.is_redex());

        let q = Expr::exists(Identifier::variable("y", ENTITY), Expr::constant("p", TRUTH));
        assert!(!Expr::apply(q, Expr::constant("j", ENTITY)).is_redex());
    }

    #[test]
    fn test_specialize_rewrites_identifier_types() {
        let alignment = Alignment::singleton('a', ENTITY);
        let expr = Expr::apply(
            Expr::var("f", Type::func(Type::Var('a'), TRUTH)),
            Expr::var("x", Type::Var('a')),
        );
        let expected = Expr::apply(
            Expr::var("f", Type::predicate()),
            Expr::var("x", ENTITY),
        );
        assert_eq!(expr.specialize(&alignment), expected);
    }
}
