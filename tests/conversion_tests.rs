//! Lambda conversion: stepwise and automatic modes, capture avoidance

use lambda_semantics::convert::{
    ConversionMode, ConverterConfig, LambdaConverter, MeaningError, Reduction, reduce_fully,
    reduce_one_step,
};
use lambda_semantics::expr::{Expr, Identifier};
use lambda_semantics::types::{ENTITY, TRUTH, Type};

fn x() -> Identifier {
    Identifier::variable("x", ENTITY)
}

fn y() -> Identifier {
    Identifier::variable("y", ENTITY)
}

fn love() -> Expr {
    Expr::constant("Love", Type::func(ENTITY, Type::predicate()))
}

fn love_of(a: Expr, b: Expr) -> Expr {
    Expr::apply(Expr::apply(love(), a), b)
}

/// Run stepwise conversion until nothing is reducible, collecting every result.
fn step_to_normal_form(expr: &Expr) -> Vec<Expr> {
    let converter = LambdaConverter::new(ConverterConfig::stepwise());
    let mut history = vec![expr.clone()];
    loop {
        match converter.convert(history.last().unwrap()) {
            Ok(conversion) => {
                assert_eq!(conversion.steps.len(), 1);
                history.push(conversion.result);
            }
            Err(MeaningError::NotReducible { .. }) => return history,
            Err(other) => panic!("unexpected conversion error: {}", other),
        }
    }
}

/// ((λf[λx[f(x)]])((λy[λz[Love(y)(z)]])(m)))(j)
fn nested_expression() -> Expr {
    let f = Identifier::variable("f", Type::predicate());
    let z = Identifier::variable("z", ENTITY);
    let apply_f = Expr::lambda(f.clone(), Expr::lambda(x(), Expr::apply(f.into(), x().into())));
    let loves_m = Expr::apply(
        Expr::lambda(y(), Expr::lambda(z.clone(), love_of(y().into(), z.into()))),
        Expr::constant("m", ENTITY),
    );
    Expr::apply(Expr::apply(apply_f, loves_m), Expr::constant("j", ENTITY))
}

#[test]
fn stepwise_and_automatic_reach_same_normal_form() {
    let expr = nested_expression();

    let history = step_to_normal_form(&expr);
    let stepwise_result = history.last().unwrap().clone();

    let automatic = LambdaConverter::new(ConverterConfig::automatic())
        .convert(&expr)
        .expect("conversion failed");

    assert_eq!(automatic.result, stepwise_result);
    assert_eq!(automatic.steps.len(), history.len() - 1);
    assert_eq!(reduce_fully(&expr).unwrap(), stepwise_result);
    assert_eq!(stepwise_result.to_string(), "Love(m)(j)");
}

#[test]
fn every_intermediate_step_is_well_typed() {
    let expr = nested_expression();
    let expected = expr.type_of().expect("typing failed");
    for snapshot in step_to_normal_form(&expr) {
        assert_eq!(snapshot.type_of(), Ok(expected.clone()), "at {}", snapshot);
    }
}

#[test]
fn original_tree_is_not_modified() {
    let expr = nested_expression();
    let before = expr.clone();
    let _ = reduce_fully(&expr).unwrap();
    assert_eq!(expr, before);
}

#[test]
fn capture_avoiding_substitution() {
    // (λx[λy[Love(x)(y)]])(y) must not capture the free y
    let expr = Expr::apply(
        Expr::lambda(x(), Expr::lambda(y(), love_of(x().into(), y().into()))),
        y().into(),
    );

    let Reduction::Reduced(step) = reduce_one_step(&expr).unwrap() else {
        panic!("expected a reduction");
    };
    assert_eq!(step.renamings.len(), 1);
    assert_eq!(step.renamings[0].from, y());

    let renamed = step.renamings[0].to.clone();
    assert_ne!(renamed.name, "y");
    assert_eq!(
        step.result,
        Expr::lambda(renamed.clone(), love_of(y().into(), renamed.into()))
    );
    assert!(step.result.has_free(&y()));
    assert_eq!(step.result.to_string(), "λy'[Love(y)(y')]");
}

#[test]
fn quantified_body_reduces() {
    // (λP[∃x[P(x)]])(Happy) → ∃x[Happy(x)]
    let p = Identifier::variable("P", Type::predicate());
    let happy = Expr::constant("Happy", Type::predicate());
    let expr = Expr::apply(
        Expr::lambda(p.clone(), Expr::exists(x(), Expr::apply(p.into(), x().into()))),
        happy.clone(),
    );
    let result = reduce_fully(&expr).unwrap();
    assert_eq!(result, Expr::exists(x(), Expr::apply(happy, x().into())));
    assert_eq!(result.type_of(), Ok(TRUTH));
}

#[test]
fn automatic_mode_is_the_default() {
    let converter = LambdaConverter::default();
    assert_eq!(converter.config().mode, ConversionMode::Automatic);
}

#[test]
fn reduction_can_be_interrupted_between_steps() {
    let expr = nested_expression();
    let Reduction::Reduced(first) = reduce_one_step(&expr).unwrap() else {
        panic!("expected a reduction");
    };
    // Resuming from the snapshot gives the same answer as never stopping.
    assert_eq!(
        reduce_fully(&first.result).unwrap(),
        reduce_fully(&expr).unwrap()
    );
}

/// ((λF[λy[F(y)]])(Happy))(John) with F : <'a,t> and y : 'a
fn polymorphic_expression() -> Expr {
    let big_f = Identifier::variable("F", Type::func(Type::Var('a'), TRUTH));
    let poly_y = Identifier::variable("y", Type::Var('a'));
    let lifted = Expr::lambda(
        big_f.clone(),
        Expr::lambda(poly_y.clone(), Expr::apply(big_f.into(), poly_y.into())),
    );
    Expr::apply(
        Expr::apply(lifted, Expr::constant("Happy", Type::predicate())),
        Expr::constant("John", ENTITY),
    )
}

#[test]
fn polymorphic_binders_reach_same_normal_form_in_both_modes() {
    let expr = polymorphic_expression();
    assert_eq!(expr.type_of(), Ok(TRUTH));

    let history = step_to_normal_form(&expr);
    assert_eq!(history.len(), 3);
    for snapshot in &history {
        assert_eq!(snapshot.type_of(), Ok(TRUTH), "at {}", snapshot);
    }

    let automatic = LambdaConverter::new(ConverterConfig::automatic())
        .convert(&expr)
        .expect("conversion failed");
    assert_eq!(&automatic.result, history.last().unwrap());
    assert_eq!(automatic.result.to_string(), "Happy(John)");
}

#[test]
fn polymorphic_binder_is_specialized_by_its_argument() {
    let expr = polymorphic_expression();
    let Reduction::Reduced(step) = reduce_one_step(&expr).unwrap() else {
        panic!("expected a reduction");
    };
    // 'a := e, so the remaining binder is an entity variable
    let Expr::Application(app) = &step.result else {
        panic!("expected an application, got {}", step.result);
    };
    let Expr::Binder(binder) = app.func.as_ref() else {
        panic!("expected a lambda, got {}", app.func);
    };
    assert_eq!(binder.var, y());
    assert_eq!(app.func.type_of(), Ok(Type::predicate()));
}

#[test]
fn self_application_is_rejected_instead_of_looping() {
    // (λx[x(x)])(λx[x(x)]) with x : <'a,'a>
    let x = Identifier::variable("x", Type::func(Type::Var('a'), Type::Var('a')));
    let self_apply = Expr::lambda(x.clone(), Expr::apply(x.clone().into(), x.into()));
    let omega = Expr::apply(self_apply.clone(), self_apply);
    assert!(omega.type_of().is_err());

    for config in [ConverterConfig::stepwise(), ConverterConfig::automatic()] {
        assert!(matches!(
            LambdaConverter::new(config).convert(&omega),
            Err(MeaningError::Type(_))
        ));
    }
    assert!(matches!(reduce_fully(&omega), Err(MeaningError::Type(_))));
}
