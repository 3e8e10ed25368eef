//! # Composition Rules
//!
//! Decides how the meanings of two sister nodes in a syntax tree combine into
//! the meaning of their mother.
//!
//! The rules are tried in a fixed order and the first whose precondition holds
//! wins:
//!
//! 1. **Function Application** - one sister is a function whose domain accepts
//!    the other sister's type and the application has a valid type. The left
//!    sister is tried as the function first.
//! 2. **Predicate Modification** - both sisters are compatible with `<e,t>`;
//!    the result is `λz[left(z) ∧ right(z)]`.
//! 3. Otherwise the composition is **Undetermined**.
//!
//! **Lambda Abstraction** applies to a different tree shape, a binder index
//! paired with its sister, and is resolved by [`CompositionResolver::abstract_over`].
//! Non-branching nodes simply pass their daughter's meaning up.
//!
//! Outcomes are recomputed on demand and never stored.

use std::fmt;

use log::debug;

use crate::expr::vars::fresh_variable;
use crate::expr::{Expr, Identifier};
use crate::types::{ENTITY, Type, TypeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionRule {
    FunctionApplication,
    PredicateModification,
    LambdaAbstraction,
    NonBranching,
    Undetermined,
}

impl fmt::Display for CompositionRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CompositionRule::FunctionApplication => "Function Application",
            CompositionRule::PredicateModification => "Predicate Modification",
            CompositionRule::LambdaAbstraction => "Lambda Abstraction",
            CompositionRule::NonBranching => "Non-Branching Node",
            CompositionRule::Undetermined => "Undetermined",
        };
        write!(f, "{}", name)
    }
}

/// Which sister acted as the function in Function Application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionOutcome {
    FunctionApplication {
        function: FunctionSide,
        expr: Expr,
        ty: Type,
    },
    PredicateModification {
        expr: Expr,
        ty: Type,
    },
    LambdaAbstraction {
        expr: Expr,
        ty: Type,
    },
    NonBranching {
        expr: Expr,
        ty: Type,
    },
    /// No enabled rule applies. This is a reportable state, not an error.
    Undetermined {
        left: Type,
        right: Type,
    },
}

impl CompositionOutcome {
    pub fn rule(&self) -> CompositionRule {
        match self {
            CompositionOutcome::FunctionApplication { .. } => CompositionRule::FunctionApplication,
            CompositionOutcome::PredicateModification { .. } => {
                CompositionRule::PredicateModification
            }
            CompositionOutcome::LambdaAbstraction { .. } => CompositionRule::LambdaAbstraction,
            CompositionOutcome::NonBranching { .. } => CompositionRule::NonBranching,
            CompositionOutcome::Undetermined { .. } => CompositionRule::Undetermined,
        }
    }

    /// The mother node's meaning, if the composition succeeded.
    pub fn meaning(&self) -> Option<&Expr> {
        match self {
            CompositionOutcome::FunctionApplication { expr, .. }
            | CompositionOutcome::PredicateModification { expr, .. }
            | CompositionOutcome::LambdaAbstraction { expr, .. }
            | CompositionOutcome::NonBranching { expr, .. } => Some(expr),
            CompositionOutcome::Undetermined { .. } => None,
        }
    }

    pub fn meaning_type(&self) -> Option<&Type> {
        match self {
            CompositionOutcome::FunctionApplication { ty, .. }
            | CompositionOutcome::PredicateModification { ty, .. }
            | CompositionOutcome::LambdaAbstraction { ty, .. }
            | CompositionOutcome::NonBranching { ty, .. } => Some(ty),
            CompositionOutcome::Undetermined { .. } => None,
        }
    }
}

/// Which optional rules an exercise makes available. Function Application is
/// always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionConfig {
    pub predicate_modification: bool,
    pub lambda_abstraction: bool,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        CompositionConfig {
            predicate_modification: true,
            lambda_abstraction: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompositionResolver {
    config: CompositionConfig,
}

impl CompositionResolver {
    pub fn new(config: CompositionConfig) -> Self {
        CompositionResolver { config }
    }

    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    /// Combine two sister meanings.
    ///
    /// Fails only when one of the sisters has no valid type itself.
    pub fn resolve(&self, left: &Expr, right: &Expr) -> Result<CompositionOutcome, TypeError> {
        let left_ty = left.type_of()?;
        let right_ty = right.type_of()?;

        if accepts(&left_ty, &right_ty) {
            if let Some(outcome) = function_application(left, right, FunctionSide::Left) {
                return Ok(outcome);
            }
        }
        if accepts(&right_ty, &left_ty) {
            if let Some(outcome) = function_application(right, left, FunctionSide::Right) {
                return Ok(outcome);
            }
        }

        let predicate = Type::predicate();
        if self.config.predicate_modification
            && predicate.is_compatible(&left_ty)
            && predicate.is_compatible(&right_ty)
        {
            let expr = predicate_modification(left, right);
            debug!("predicate modification: {}", expr);
            return Ok(CompositionOutcome::PredicateModification {
                expr,
                ty: predicate,
            });
        }

        debug!("no composition rule for {} and {}", left_ty, right_ty);
        Ok(CompositionOutcome::Undetermined {
            left: left_ty,
            right: right_ty,
        })
    }

    /// Lambda Abstraction: bind the trace with `index` in the sister's meaning.
    ///
    /// The result has type `<e,σ>` where `σ` is the sister's type. When the rule
    /// is disabled the outcome is [`CompositionOutcome::Undetermined`].
    pub fn abstract_over(&self, index: u32, sister: &Expr) -> Result<CompositionOutcome, TypeError> {
        let sister_ty = sister.type_of()?;
        if !self.config.lambda_abstraction {
            return Ok(CompositionOutcome::Undetermined {
                left: ENTITY,
                right: sister_ty,
            });
        }

        let expr = Expr::lambda(trace_variable(index), sister.clone());
        debug!("lambda abstraction over index {}: {}", index, expr);
        Ok(CompositionOutcome::LambdaAbstraction {
            expr,
            ty: Type::func(ENTITY, sister_ty),
        })
    }

    /// A non-branching node inherits its daughter's meaning.
    pub fn pass_up(&self, child: &Expr) -> Result<CompositionOutcome, TypeError> {
        Ok(CompositionOutcome::NonBranching {
            ty: child.type_of()?,
            expr: child.clone(),
        })
    }
}

/// [`CompositionResolver::resolve`] with every rule enabled.
pub fn resolve(left: &Expr, right: &Expr) -> Result<CompositionOutcome, TypeError> {
    CompositionResolver::default().resolve(left, right)
}

/// The variable a trace with `index` translates to: `t<index>` of type `e`.
pub fn trace_variable(index: u32) -> Identifier {
    Identifier::variable(format!("t{}", index), ENTITY)
}

fn accepts(function: &Type, argument: &Type) -> bool {
    function
        .as_composite()
        .is_some_and(|c| c.domain.is_compatible(argument))
}

/// The application of `function` to `argument`, or `None` when it has no
/// valid type, e.g. because a polymorphic domain cannot be aligned.
fn function_application(
    function: &Expr,
    argument: &Expr,
    side: FunctionSide,
) -> Option<CompositionOutcome> {
    let expr = Expr::apply(function.clone(), argument.clone());
    match expr.type_of() {
        Ok(ty) => {
            debug!("function application ({:?} sister is the function): {}", side, expr);
            Some(CompositionOutcome::FunctionApplication {
                function: side,
                expr,
                ty,
            })
        }
        Err(err) => {
            debug!("{:?} sister cannot take the other as argument: {}", side, err);
            None
        }
    }
}

fn predicate_modification(left: &Expr, right: &Expr) -> Expr {
    let mut avoid = left.names();
    avoid.extend(right.names());
    let z = fresh_variable(&Identifier::variable("z", ENTITY), &avoid);

    Expr::lambda(
        z.clone(),
        Expr::and(
            Expr::apply(left.clone(), z.clone().into()),
            Expr::apply(right.clone(), z.into()),
        ),
    )
}
