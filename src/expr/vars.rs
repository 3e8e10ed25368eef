//! Free and bound variables, and fresh-name generation for alphabetic variants.

use std::collections::HashSet;

use super::{Expr, Identifier};

impl Expr {
    /// Variables occurring free in the expression. Constants are never free
    /// variables.
    pub fn free_variables(&self) -> HashSet<Identifier> {
        match self {
            Expr::Ident(id) if id.is_variable() => HashSet::from([id.clone()]),
            Expr::Ident(_) => HashSet::new(),
            Expr::Binder(binder) => {
                let mut free = binder.body.free_variables();
                free.remove(&binder.var);
                free
            }
            Expr::Not(operand) => operand.free_variables(),
            Expr::Binary(bin) => union(bin.left.free_variables(), bin.right.free_variables()),
            Expr::Equality(eq) => union(eq.left.free_variables(), eq.right.free_variables()),
            Expr::Application(app) => {
                union(app.func.free_variables(), app.arg.free_variables())
            }
        }
    }

    /// Variables bound by some binder inside the expression.
    pub fn bound_variables(&self) -> HashSet<Identifier> {
        match self {
            Expr::Ident(_) => HashSet::new(),
            Expr::Binder(binder) => {
                let mut bound = binder.body.bound_variables();
                bound.insert(binder.var.clone());
                bound
            }
            Expr::Not(operand) => operand.bound_variables(),
            Expr::Binary(bin) => union(bin.left.bound_variables(), bin.right.bound_variables()),
            Expr::Equality(eq) => union(eq.left.bound_variables(), eq.right.bound_variables()),
            Expr::Application(app) => {
                union(app.func.bound_variables(), app.arg.bound_variables())
            }
        }
    }

    /// Every identifier name used anywhere in the tree, free, bound or constant.
    pub fn names(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut HashSet<String>) {
        match self {
            Expr::Ident(id) => {
                names.insert(id.name.clone());
            }
            Expr::Binder(binder) => {
                names.insert(binder.var.name.clone());
                binder.body.collect_names(names);
            }
            Expr::Not(operand) => operand.collect_names(names),
            Expr::Binary(bin) => {
                bin.left.collect_names(names);
                bin.right.collect_names(names);
            }
            Expr::Equality(eq) => {
                eq.left.collect_names(names);
                eq.right.collect_names(names);
            }
            Expr::Application(app) => {
                app.func.collect_names(names);
                app.arg.collect_names(names);
            }
        }
    }

    /// Whether `var` occurs free in the expression.
    pub fn has_free(&self, var: &Identifier) -> bool {
        self.free_variables().contains(var)
    }
}

/// A variable with the same type as `base` whose name is not in `avoid`.
///
/// Candidates are tried by appending primes: `x`, `x'`, `x''`, ...
pub fn fresh_variable(base: &Identifier, avoid: &HashSet<String>) -> Identifier {
    let mut name = base.name.clone();
    while avoid.contains(&name) {
        name.push('\'');
    }
    Identifier::variable(name, base.ty.clone())
}

fn union(mut a: HashSet<Identifier>, b: HashSet<Identifier>) -> HashSet<Identifier> {
    a.extend(b);
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ENTITY, TRUTH, Type};

    fn x() -> Identifier {
        Identifier::variable("x", ENTITY)
    }

    fn y() -> Identifier {
        Identifier::variable("y", ENTITY)
    }

    fn love() -> Expr {
        Expr::constant("Love", Type::func(ENTITY, Type::predicate()))
    }

    #[test]
    fn test_free_variables_of_identifier() {
        let free = Expr::from(x()).free_variables();
        assert_eq!(free.len(), 1);
        assert!(free.contains(&x()));
        assert!(Expr::constant("j", ENTITY).free_variables().is_empty());
    }

    #[test]
    fn test_binder_removes_its_variable() {
        // λx[Love(x)(y)]
        let body = Expr::apply(Expr::apply(love(), x().into()), y().into());
        let lam = Expr::lambda(x(), body);
        let free = lam.free_variables();
        assert!(!free.contains(&x()));
        assert!(free.contains(&y()));

        let bound = lam.bound_variables();
        assert_eq!(bound, HashSet::from([x()]));
    }

    #[test]
    fn test_same_name_different_type_is_distinct() {
        let x_t = Identifier::variable("x", TRUTH);
        let lam = Expr::lambda(x_t, x().into());
        assert!(lam.has_free(&x()));
    }

    #[test]
    fn test_names_include_constants_and_binders() {
        let lam = Expr::lambda(x(), Expr::apply(Expr::apply(love(), x().into()), y().into()));
        let names = lam.names();
        assert!(names.contains("x"));
        assert!(names.contains("y"));
        assert!(names.contains("Love"));
    }

    #[test]
    fn test_fresh_variable_appends_primes() {
        let avoid = HashSet::from(["x".to_string(), "x'".to_string()]);
        let fresh = fresh_variable(&x(), &avoid);
        assert_eq!(fresh.name, "x''");
        assert_eq!(fresh.ty, ENTITY);
        assert!(fresh.is_variable());

        let unused = fresh_variable(&y(), &avoid);
        assert_eq!(unused.name, "y");
    }
}
