//! Capture-avoiding substitution.
//!
//! `[a/x]e` replaces the free occurrences of `x` in `e` with `a`. When the
//! substitution passes under a binder whose variable occurs free in `a`, that
//! binder is first renamed to an alphabetic variant so `a`'s free variable
//! stays free:
//!
//! ```text
//! [y/x] λy[Love(x)(y)]  =  λy'[Love(y)(y')]
//! ```

use std::collections::HashSet;

use log::debug;

use crate::expr::vars::fresh_variable;
use crate::expr::{Binder, Expr, Identifier};

/// A bound variable renamed to an alphabetic variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renaming {
    pub from: Identifier,
    pub to: Identifier,
}

/// Substitute `replacement` for the free occurrences of `var` in `expr`,
/// recording every alphabetic variant created on the way.
pub fn substitute(
    expr: &Expr,
    var: &Identifier,
    replacement: &Expr,
    renamings: &mut Vec<Renaming>,
) -> Expr {
    let free_names: HashSet<String> = replacement
        .free_variables()
        .into_iter()
        .map(|id| id.name)
        .collect();
    substitute_in(expr, var, replacement, &free_names, renamings)
}

fn substitute_in(
    expr: &Expr,
    var: &Identifier,
    replacement: &Expr,
    free_names: &HashSet<String>,
    renamings: &mut Vec<Renaming>,
) -> Expr {
    let recurse = |e: &Expr, renamings: &mut Vec<Renaming>| {
        substitute_in(e, var, replacement, free_names, renamings)
    };

    match expr {
        Expr::Ident(id) if id == var => replacement.clone(),
        Expr::Ident(_) => expr.clone(),
        Expr::Binder(binder) => {
            // Shadowed, or nothing to replace below this binder.
            if binder.var == *var || !binder.body.has_free(var) {
                return expr.clone();
            }

            if free_names.contains(&binder.var.name) {
                let variant = alphabetic_variant(binder, replacement, var);
                debug!(
                    "renaming bound {} to {} to avoid capture",
                    binder.var, variant.var
                );
                renamings.push(Renaming {
                    from: binder.var.clone(),
                    to: variant.var.clone(),
                });
                let body = recurse(&variant.body, renamings);
                return Expr::binder(variant.kind, variant.var, body);
            }

            Expr::binder(binder.kind, binder.var.clone(), recurse(&binder.body, renamings))
        }
        Expr::Not(operand) => Expr::not(recurse(operand, renamings)),
        Expr::Binary(bin) => Expr::binary(
            bin.op,
            recurse(&bin.left, renamings),
            recurse(&bin.right, renamings),
        ),
        Expr::Equality(eq) => {
            Expr::equality(recurse(&eq.left, renamings), recurse(&eq.right, renamings))
        }
        Expr::Application(app) => {
            Expr::apply(recurse(&app.func, renamings), recurse(&app.arg, renamings))
        }
    }
}

/// Rename the binder's variable to a name unused in its body, in the
/// replacement and by the variable being substituted.
fn alphabetic_variant(binder: &Binder, replacement: &Expr, var: &Identifier) -> Binder {
    let mut avoid = binder.body.names();
    avoid.extend(replacement.names());
    avoid.insert(var.name.clone());
    avoid.insert(binder.var.name.clone());

    let fresh = fresh_variable(&binder.var, &avoid);
    let body = rename(&binder.body, &binder.var, &fresh);
    Binder {
        kind: binder.kind,
        var: fresh,
        body: Box::new(body),
    }
}

/// Replace free occurrences of `from` by `to`. `to` must be unused in `expr`,
/// so no capture can occur.
fn rename(expr: &Expr, from: &Identifier, to: &Identifier) -> Expr {
    let mut ignored = Vec::new();
    substitute_in(
        expr,
        from,
        &Expr::Ident(to.clone()),
        &HashSet::new(),
        &mut ignored,
    )
}
