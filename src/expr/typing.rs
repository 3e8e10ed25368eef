//! Type derivation over expression trees.
//!
//! Derivation is pure: it never mutates the tree and repeated calls on the same
//! tree return structurally equal types. Every operator checks its operands
//! against the type it requires and fails on the first violation instead of
//! falling back to a default.
//!
//! ```text
//! x : τ                               (identifier carries its type)
//! body : σ        ⊢ λx:τ[body]  : <S(τ),S(σ)>
//! body : t        ⊢ ∃x[body], ∀x[body] : t
//! body : t        ⊢ ιx:τ[body]  : S(τ)
//! A : t, B : t    ⊢ A ∧ B, A ∨ B, A → B, A ↔ B : t
//! A : t           ⊢ ¬A : t
//! a : τ, b : τ'   ⊢ a = b : t          (τ compatible with τ')
//! f : <σ,τ>, a : σ'  ⊢ f(a) : S(τ)      (σ compatible with σ', S = align(σ, σ'))
//! ```
//!
//! For binders, `S` is the alignment of a polymorphic bound variable against
//! the concrete types its occurrences in the body are used at. In
//! `λx:'a[Happy(x)]` the argument position of `Happy` forces `'a := e`, so the
//! lambda has type `<e,t>`.

use super::{Application, Binder, BinderKind, Expr, Identifier};
use crate::types::{Alignment, TRUTH, Type, TypeError, align_types};

impl Expr {
    /// Derive the type of this expression.
    pub fn type_of(&self) -> Result<Type, TypeError> {
        match self {
            Expr::Ident(id) => Ok(id.ty.clone()),
            Expr::Binder(binder) => binder.type_of(),
            Expr::Not(operand) => {
                expect_type(operand, &TRUTH)?;
                Ok(TRUTH)
            }
            Expr::Binary(bin) => {
                expect_type(&bin.left, &TRUTH)?;
                expect_type(&bin.right, &TRUTH)?;
                Ok(TRUTH)
            }
            Expr::Equality(eq) => {
                let left = eq.left.type_of()?;
                expect_type(&eq.right, &left)?;
                Ok(TRUTH)
            }
            Expr::Application(app) => app.type_of(),
        }
    }

    /// Whether the expression has a valid type derivation.
    pub fn is_well_typed(&self) -> bool {
        self.type_of().is_ok()
    }
}

impl Binder {
    pub fn type_of(&self) -> Result<Type, TypeError> {
        if !self.var.is_variable() {
            return Err(TypeError::ConstantWhereVariableExpected {
                identifier: self.var.clone(),
            });
        }

        match self.kind {
            BinderKind::Lambda => {
                let body_ty = self.body.type_of()?;
                let alignment = self.var_alignment()?;
                Ok(Type::func(
                    alignment.apply(&self.var.ty),
                    alignment.apply(&body_ty),
                ))
            }
            BinderKind::Exists | BinderKind::ForAll => {
                expect_type(&self.body, &TRUTH)?;
                Ok(TRUTH)
            }
            BinderKind::Iota => {
                expect_type(&self.body, &TRUTH)?;
                Ok(self.var_alignment()?.apply(&self.var.ty))
            }
        }
    }

    /// Specialization of the bound variable's type variables, collected from
    /// the occurrences of the variable in the body.
    fn var_alignment(&self) -> Result<Alignment, TypeError> {
        let mut alignment = Alignment::empty();
        if self.var.ty.has_variables() {
            collect_uses(&self.var, &self.body, &mut alignment)?;
        }
        Ok(alignment)
    }
}

/// Align `var` against the type each occurrence of it in `expr` is used at.
///
/// Only concrete expected types constrain the variable. An inner binder over
/// the same name shadows it.
fn collect_uses(
    var: &Identifier,
    expr: &Expr,
    alignment: &mut Alignment,
) -> Result<(), TypeError> {
    let is_use = |e: &Expr| matches!(e, Expr::Ident(id) if id == var);

    match expr {
        Expr::Ident(_) => Ok(()),
        Expr::Binder(binder) => {
            if binder.var.name == var.name {
                return Ok(());
            }
            if binder.kind != BinderKind::Lambda && is_use(&binder.body) {
                constrain(&var.ty, &TRUTH, alignment)?;
            }
            collect_uses(var, &binder.body, alignment)
        }
        Expr::Not(operand) => {
            if is_use(operand) {
                constrain(&var.ty, &TRUTH, alignment)?;
            }
            collect_uses(var, operand, alignment)
        }
        Expr::Binary(bin) => {
            for operand in [&bin.left, &bin.right] {
                if is_use(operand) {
                    constrain(&var.ty, &TRUTH, alignment)?;
                }
                collect_uses(var, operand, alignment)?;
            }
            Ok(())
        }
        Expr::Equality(eq) => {
            if is_use(&eq.left) {
                constrain(&var.ty, &eq.right.type_of()?, alignment)?;
            }
            if is_use(&eq.right) {
                constrain(&var.ty, &eq.left.type_of()?, alignment)?;
            }
            collect_uses(var, &eq.left, alignment)?;
            collect_uses(var, &eq.right, alignment)
        }
        Expr::Application(app) => {
            if is_use(&app.arg) {
                if let Type::Composite(func_ty) = app.func.type_of()? {
                    constrain(&var.ty, &func_ty.domain, alignment)?;
                }
            }
            if is_use(&app.func) {
                if let Some(var_ty) = var.ty.as_composite() {
                    constrain(&var_ty.domain, &app.arg.type_of()?, alignment)?;
                }
            }
            collect_uses(var, &app.func, alignment)?;
            collect_uses(var, &app.arg, alignment)
        }
    }
}

fn constrain(
    variable_sided: &Type,
    expected: &Type,
    alignment: &mut Alignment,
) -> Result<(), TypeError> {
    if expected.has_variables() {
        return Ok(());
    }
    alignment.refine(variable_sided, expected)?;
    Ok(())
}

impl Application {
    /// The range of the function's type, specialized against the argument when
    /// the function is polymorphic.
    pub fn type_of(&self) -> Result<Type, TypeError> {
        let func_ty = self.func.type_of()?;
        let arg_ty = self.arg.type_of()?;

        let func_ty = match func_ty {
            Type::Composite(c) => c,
            other => {
                return Err(TypeError::NotAFunction {
                    function: (*self.func).clone(),
                    found: other,
                });
            }
        };

        if !func_ty.domain.is_compatible(&arg_ty) {
            return Err(TypeError::mismatch(
                (*func_ty.domain).clone(),
                arg_ty,
                &self.arg,
            ));
        }

        if func_ty.has_variables() {
            let alignment = align_types(&func_ty.domain, &arg_ty)?;
            Ok(alignment.apply(&func_ty.range))
        } else {
            Ok(*func_ty.range)
        }
    }
}

fn expect_type(expr: &Expr, expected: &Type) -> Result<Type, TypeError> {
    let found = expr.type_of()?;
    if expected.is_compatible(&found) {
        Ok(found)
    } else {
        Err(TypeError::mismatch(expected.clone(), found, expr))
    }
}
