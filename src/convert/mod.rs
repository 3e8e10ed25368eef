//! # Lambda Conversion
//!
//! Beta reduction over expression trees, one redex at a time.
//!
//! ## Reduction Order
//!
//! [`reduce_one_step`] contracts the innermost-leftmost redex: inside an
//! application `(λx[body])(arg)` the function and then the argument are searched
//! first, and the application itself is contracted only if neither contains a
//! redex. Every other node searches its children left to right.
//!
//! ```text
//! (λx[(λy[Love(y)(x)])(m)])(j)
//!   → (λx[Love(m)(x)])(j)        inner redex first
//!   → Love(m)(j)
//! ```
//!
//! ## Modes
//!
//! A [`LambdaConverter`] is configured with a [`ConversionMode`]. In
//! [`ConversionMode::Stepwise`] each call to [`LambdaConverter::convert`]
//! performs exactly one reduction; in [`ConversionMode::Automatic`] it reduces
//! to normal form. Repeating stepwise conversion until nothing is reducible
//! always reaches the same normal form automatic conversion does, because both
//! use the same [`reduce_one_step`].
//!
//! Every step returns a fresh tree; the input is never modified, so callers can
//! keep each intermediate expression as an undo history.

pub mod error;
pub mod subst;

use log::debug;

use crate::expr::{Binder, BinderKind, Expr};
use crate::types::{TypeError, align_types};

pub use error::MeaningError;
pub use subst::{Renaming, substitute};

/// Default bound on the number of reductions in one automatic conversion.
pub const DEFAULT_STEP_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionMode {
    /// One reduction per invocation.
    Stepwise,
    /// Reduce to normal form.
    #[default]
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterConfig {
    pub mode: ConversionMode,
    pub step_limit: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            mode: ConversionMode::default(),
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

impl ConverterConfig {
    pub fn stepwise() -> Self {
        ConverterConfig {
            mode: ConversionMode::Stepwise,
            ..Default::default()
        }
    }

    pub fn automatic() -> Self {
        ConverterConfig::default()
    }
}

/// A single beta reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The application that was contracted.
    pub redex: Expr,
    /// What the redex was replaced with.
    pub contractum: Expr,
    /// Alphabetic variants created to avoid capture.
    pub renamings: Vec<Renaming>,
    /// The whole expression after the step.
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    Reduced(Step),
    Unchanged,
}

/// The outcome of a [`LambdaConverter::convert`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub steps: Vec<Step>,
    pub result: Expr,
}

impl Conversion {
    /// Whether the result admits no further reduction.
    pub fn is_normal_form(&self) -> bool {
        matches!(reduce_one_step(&self.result), Ok(Reduction::Unchanged))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LambdaConverter {
    config: ConverterConfig,
}

impl LambdaConverter {
    pub fn new(config: ConverterConfig) -> Self {
        LambdaConverter { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Run the configured conversion on `expr`.
    ///
    /// Fails with [`MeaningError::NotReducible`] when `expr` is already in
    /// normal form, in either mode.
    pub fn convert(&self, expr: &Expr) -> Result<Conversion, MeaningError> {
        let first = match reduce_one_step(expr)? {
            Reduction::Reduced(step) => step,
            Reduction::Unchanged => {
                return Err(MeaningError::NotReducible { expr: expr.clone() });
            }
        };

        let mut result = first.result.clone();
        let mut steps = vec![first];

        if self.config.mode == ConversionMode::Automatic {
            while let Reduction::Reduced(step) = reduce_one_step(&result)? {
                if steps.len() >= self.config.step_limit {
                    return Err(MeaningError::StepLimitExceeded {
                        limit: self.config.step_limit,
                    });
                }
                result = step.result.clone();
                steps.push(step);
            }
        }

        Ok(Conversion { steps, result })
    }
}

/// Contract the innermost-leftmost redex of `expr`, or report that there is none.
pub fn reduce_one_step(expr: &Expr) -> Result<Reduction, MeaningError> {
    Ok(match find_and_contract(expr)? {
        Some(step) => Reduction::Reduced(step),
        None => Reduction::Unchanged,
    })
}

/// Repeat [`reduce_one_step`] until the expression is in normal form.
pub fn reduce_fully(expr: &Expr) -> Result<Expr, MeaningError> {
    reduce_fully_within(expr, DEFAULT_STEP_LIMIT)
}

pub fn reduce_fully_within(expr: &Expr, step_limit: usize) -> Result<Expr, MeaningError> {
    let mut current = expr.clone();
    let mut steps = 0;
    while let Reduction::Reduced(step) = reduce_one_step(&current)? {
        steps += 1;
        if steps > step_limit {
            return Err(MeaningError::StepLimitExceeded { limit: step_limit });
        }
        current = step.result;
    }
    Ok(current)
}

/// Contract one specific redex, as requested by the user.
///
/// Fails with [`MeaningError::NotReducible`] when `target` is not a lambda
/// applied to an argument.
pub fn beta_reduce(target: &Expr) -> Result<(Expr, Vec<Renaming>), MeaningError> {
    match target {
        Expr::Application(app) => match app.func.as_ref() {
            Expr::Binder(binder) if binder.kind == BinderKind::Lambda => {
                contract(binder, &app.arg)
            }
            _ => Err(MeaningError::NotReducible {
                expr: target.clone(),
            }),
        },
        _ => Err(MeaningError::NotReducible {
            expr: target.clone(),
        }),
    }
}

fn contract(
    binder: &Binder,
    arg: &Expr,
) -> Result<(Expr, Vec<Renaming>), MeaningError> {
    if !binder.var.is_variable() {
        return Err(TypeError::ConstantWhereVariableExpected {
            identifier: binder.var.clone(),
        }
        .into());
    }

    let arg_ty = arg.type_of()?;
    if !binder.var.ty.is_compatible(&arg_ty) {
        return Err(TypeError::mismatch(binder.var.ty.clone(), arg_ty, arg).into());
    }

    // A polymorphic bound variable is specialized to the argument's type
    // throughout the body before substituting. Type variables are named per
    // expression, not per binder, so every identifier in the body whose type
    // mentions an aligned variable is specialized too, including inner binders
    // that reuse the symbol.
    let (var, body) = if binder.var.ty.has_variables() {
        let alignment = align_types(&binder.var.ty, &arg_ty).map_err(TypeError::from)?;
        (
            binder.var.specialize(&alignment),
            binder.body.specialize(&alignment),
        )
    } else {
        (binder.var.clone(), (*binder.body).clone())
    };

    let mut renamings = Vec::new();
    let result = substitute(&body, &var, arg, &mut renamings);
    debug!("beta reduction: [{}/{}] {} = {}", arg, var, body, result);
    Ok((result, renamings))
}

fn find_and_contract(expr: &Expr) -> Result<Option<Step>, MeaningError> {
    match expr {
        Expr::Ident(_) => Ok(None),
        Expr::Binder(binder) => Ok(find_and_contract(&binder.body)?.map(|step| {
            step.rebuild(|body| Expr::binder(binder.kind, binder.var.clone(), body))
        })),
        Expr::Not(operand) => Ok(find_and_contract(operand)?.map(|step| step.rebuild(Expr::not))),
        Expr::Binary(bin) => {
            if let Some(step) = find_and_contract(&bin.left)? {
                return Ok(Some(
                    step.rebuild(|left| Expr::binary(bin.op, left, (*bin.right).clone())),
                ));
            }
            Ok(find_and_contract(&bin.right)?
                .map(|step| step.rebuild(|right| Expr::binary(bin.op, (*bin.left).clone(), right))))
        }
        Expr::Equality(eq) => {
            if let Some(step) = find_and_contract(&eq.left)? {
                return Ok(Some(
                    step.rebuild(|left| Expr::equality(left, (*eq.right).clone())),
                ));
            }
            Ok(find_and_contract(&eq.right)?
                .map(|step| step.rebuild(|right| Expr::equality((*eq.left).clone(), right))))
        }
        Expr::Application(app) => {
            if let Some(step) = find_and_contract(&app.func)? {
                return Ok(Some(
                    step.rebuild(|func| Expr::apply(func, (*app.arg).clone())),
                ));
            }
            if let Some(step) = find_and_contract(&app.arg)? {
                return Ok(Some(
                    step.rebuild(|arg| Expr::apply((*app.func).clone(), arg)),
                ));
            }
            if !expr.is_redex() {
                return Ok(None);
            }

            let (contractum, renamings) = beta_reduce(expr)?;
            Ok(Some(Step {
                redex: expr.clone(),
                contractum: contractum.clone(),
                renamings,
                result: contractum,
            }))
        }
    }
}

impl Step {
    /// Place the step's result inside an enclosing node.
    fn rebuild(self, wrap: impl FnOnce(Expr) -> Expr) -> Step {
        Step {
            result: wrap(self.result),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Identifier;
    use crate::types::{ENTITY, TRUTH, Type};

    fn x() -> Identifier {
        Identifier::variable("x", ENTITY)
    }

    fn happy() -> Expr {
        Expr::constant("Happy", Type::predicate())
    }

    fn john() -> Expr {
        Expr::constant("John", ENTITY)
    }

    fn happy_redex() -> Expr {
        Expr::apply(Expr::lambda(x(), Expr::apply(happy(), x().into())), john())
    }

    #[test]
    fn test_single_step() {
        let Reduction::Reduced(step) = reduce_one_step(&happy_redex()).unwrap() else {
            panic!("expected a reduction");
        };
        assert_eq!(step.result, Expr::apply(happy(), john()));
        assert_eq!(step.redex, happy_redex());
        assert!(step.renamings.is_empty());
        assert_eq!(reduce_one_step(&step.result).unwrap(), Reduction::Unchanged);
    }

    #[test]
    fn test_innermost_redex_first() {
        // (λx[(λy[Love(y)(x)])(m)])(j)
        let y = Identifier::variable("y", ENTITY);
        let love = Expr::constant("Love", Type::func(ENTITY, Type::predicate()));
        let inner = Expr::apply(
            Expr::lambda(y.clone(), Expr::apply(Expr::apply(love.clone(), y.into()), x().into())),
            Expr::constant("m", ENTITY),
        );
        let outer = Expr::apply(Expr::lambda(x(), inner.clone()), Expr::constant("j", ENTITY));

        let Reduction::Reduced(step) = reduce_one_step(&outer).unwrap() else {
            panic!("expected a reduction");
        };
        assert_eq!(step.redex, inner);
        let expected = Expr::apply(
            Expr::lambda(
                x(),
                Expr::apply(Expr::apply(love, Expr::constant("m", ENTITY)), x().into()),
            ),
            Expr::constant("j", ENTITY),
        );
        assert_eq!(step.result, expected);
    }

    #[test]
    fn test_leftmost_operand_first() {
        let conj = Expr::and(happy_redex(), happy_redex());
        let Reduction::Reduced(step) = reduce_one_step(&conj).unwrap() else {
            panic!("expected a reduction");
        };
        assert_eq!(step.result, Expr::and(Expr::apply(happy(), john()), happy_redex()));
    }

    #[test]
    fn test_beta_reduce_rejects_non_redex() {
        let target = Expr::apply(happy(), john());
        match beta_reduce(&target) {
            Err(MeaningError::NotReducible { expr }) => assert_eq!(expr, target),
            other => panic!("Expected NotReducible, got: {:?}", other),
        }
    }

    #[test]
    fn test_beta_reduce_type_mismatch() {
        let redex = Expr::apply(
            Expr::lambda(x(), Expr::apply(happy(), x().into())),
            Expr::constant("p", TRUTH),
        );
        assert!(matches!(
            beta_reduce(&redex),
            Err(MeaningError::Type(TypeError::Mismatch { .. }))
        ));
    }

    #[test]
    fn test_polymorphic_binder_specialized() {
        // (λX[X(y)])(Happy) with X : <'a,t> and y : 'a
        let big_x = Identifier::variable("X", Type::func(Type::Var('a'), TRUTH));
        let redex = Expr::apply(
            Expr::lambda(
                big_x.clone(),
                Expr::apply(big_x.into(), Expr::var("y", Type::Var('a'))),
            ),
            happy(),
        );
        let (result, _) = beta_reduce(&redex).unwrap();
        assert_eq!(result, Expr::apply(happy(), Expr::var("y", ENTITY)));
    }

    #[test]
    fn test_specialization_reaches_inner_binders_sharing_the_variable() {
        // (λX[λy[X(y)]])(Happy) with X : <'a,t> and y : 'a
        let big_x = Identifier::variable("X", Type::func(Type::Var('a'), TRUTH));
        let y = Identifier::variable("y", Type::Var('a'));
        let redex = Expr::apply(
            Expr::lambda(
                big_x.clone(),
                Expr::lambda(y.clone(), Expr::apply(big_x.into(), y.into())),
            ),
            happy(),
        );
        let (result, _) = beta_reduce(&redex).unwrap();
        let y_e = Identifier::variable("y", ENTITY);
        assert_eq!(result, Expr::lambda(y_e.clone(), Expr::apply(happy(), y_e.into())));
        assert_eq!(result.type_of(), Ok(Type::predicate()));
    }

    #[test]
    fn test_self_application_does_not_reduce() {
        // (λx[x(x)])(λx[x(x)]) with x : <'a,'a>
        let x = Identifier::variable("x", Type::func(Type::Var('a'), Type::Var('a')));
        let self_apply = Expr::lambda(x.clone(), Expr::apply(x.clone().into(), x.into()));
        let omega = Expr::apply(self_apply.clone(), self_apply);
        assert!(matches!(
            reduce_one_step(&omega),
            Err(MeaningError::Type(TypeError::Alignment(_)))
        ));
        assert!(matches!(reduce_fully(&omega), Err(MeaningError::Type(_))));
    }

    #[test]
    fn test_stepwise_converter_single_step() {
        let converter = LambdaConverter::new(ConverterConfig::stepwise());
        let conversion = converter.convert(&happy_redex()).unwrap();
        assert_eq!(conversion.steps.len(), 1);
        assert!(conversion.is_normal_form());
    }

    #[test]
    fn test_converter_rejects_normal_form() {
        let converter = LambdaConverter::new(ConverterConfig::stepwise());
        let normal = Expr::apply(happy(), john());
        assert!(matches!(
            converter.convert(&normal),
            Err(MeaningError::NotReducible { .. })
        ));
    }

    #[test]
    fn test_step_limit() {
        let nested = Expr::and(happy_redex(), happy_redex());
        assert!(matches!(
            reduce_fully_within(&nested, 1),
            Err(MeaningError::StepLimitExceeded { limit: 1 })
        ));

        let converter = LambdaConverter::new(ConverterConfig {
            mode: ConversionMode::Automatic,
            step_limit: 1,
        });
        assert!(matches!(
            converter.convert(&nested),
            Err(MeaningError::StepLimitExceeded { limit: 1 })
        ));
    }
}
