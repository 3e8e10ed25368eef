use std::collections::BTreeMap;

use log::trace;

use super::error::AlignmentError;
use super::ty::{CompositeType, Type};

/// A mapping from type-variable symbols to the types they stand for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alignment(pub BTreeMap<char, Type>);

impl Alignment {
    pub fn empty() -> Self {
        Alignment(BTreeMap::new())
    }

    pub fn singleton(var: char, ty: Type) -> Self {
        Alignment(BTreeMap::from([(var, ty)]))
    }

    pub fn get(&self, var: char) -> Option<&Type> {
        self.0.get(&var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every variable maps to itself, i.e. applying the alignment
    /// changes nothing.
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|(var, ty)| *ty == Type::Var(*var))
    }

    /// Align `variable_sided` against `concrete` on top of the bindings already
    /// collected, failing when the two disagree.
    pub fn refine(&mut self, variable_sided: &Type, concrete: &Type) -> Result<(), AlignmentError> {
        align_into(variable_sided, concrete, self)
    }

    /// Substitute every mapped variable in `ty`; unmapped variables are kept.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Const(_) => ty.clone(),
            Type::Var(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Composite(c) => Type::func(self.apply(&c.domain), self.apply(&c.range)),
        }
    }

    fn bind(&mut self, var: char, ty: &Type) -> Result<(), AlignmentError> {
        match self.0.get(&var) {
            Some(bound) if bound == ty => Ok(()),
            Some(bound) => Err(AlignmentError::ConflictingBinding {
                var,
                bound: bound.clone(),
                found: ty.clone(),
            }),
            None if *ty != Type::Var(var) && occurs_in(var, ty) => {
                Err(AlignmentError::OccursCheck {
                    var,
                    ty: ty.clone(),
                })
            }
            None => {
                trace!("aligning '{} with {}", var, ty);
                self.0.insert(var, ty.clone());
                Ok(())
            }
        }
    }
}

/// Whether the type variable `var` appears anywhere in `ty`.
///
/// Binding `'a` to a type that mentions `'a` (other than `'a` itself) would
/// describe an infinite type:
///
/// ```text
/// occurs_in('a, e)      = false
/// occurs_in('a, 'a)     = true
/// occurs_in('a, <'a,t>) = true
/// occurs_in('a, <'b,t>) = false
/// ```
fn occurs_in(var: char, ty: &Type) -> bool {
    match ty {
        Type::Const(_) => false,
        Type::Var(v) => *v == var,
        Type::Composite(c) => occurs_in(var, &c.domain) || occurs_in(var, &c.range),
    }
}

/// Align a composite type built from variables against a concrete composite type.
///
/// Both types are walked in parallel, domain against domain and range against
/// range. A variable on the left binds to whatever occupies the same position on
/// the right; constants on both sides must agree.
///
/// ```text
/// align(<'a,t>, <e,t>)          = ['a := e]
/// align(<'a,<'a,t>>, <e,<e,t>>) = ['a := e]
/// align(<'a,<'a,t>>, <e,<t,t>>) = Error (ConflictingBinding)
/// align(<'a,t>, <e,e>)          = Error (ConstantClash)
/// align(<e,t>, <<e,t>,t>)       = Error (ShapeMismatch)
/// align(<'a,t>, <<'a,'a>,t>)    = Error (OccursCheck)
/// ```
///
/// Re-aligning an already specialized type with itself yields an identity
/// alignment.
pub fn align(
    variable_sided: &CompositeType,
    concrete: &CompositeType,
) -> Result<Alignment, AlignmentError> {
    let mut alignment = Alignment::empty();
    align_composite(variable_sided, concrete, &mut alignment)?;
    Ok(alignment)
}

/// [`align`] generalized to arbitrary types, so an atomic variable type such as
/// a polymorphic binder's domain can be aligned directly against its argument.
pub fn align_types(variable_sided: &Type, concrete: &Type) -> Result<Alignment, AlignmentError> {
    let mut alignment = Alignment::empty();
    align_into(variable_sided, concrete, &mut alignment)?;
    Ok(alignment)
}

/// Substitute the variables of `ty` according to `alignment`.
pub fn aligned_type(ty: &CompositeType, alignment: &Alignment) -> Type {
    Type::func(alignment.apply(&ty.domain), alignment.apply(&ty.range))
}

fn align_composite(
    variable_sided: &CompositeType,
    concrete: &CompositeType,
    alignment: &mut Alignment,
) -> Result<(), AlignmentError> {
    align_into(&variable_sided.domain, &concrete.domain, alignment)?;
    align_into(&variable_sided.range, &concrete.range, alignment)
}

fn align_into(
    variable_sided: &Type,
    concrete: &Type,
    alignment: &mut Alignment,
) -> Result<(), AlignmentError> {
    match (variable_sided, concrete) {
        (Type::Var(v), ty) => alignment.bind(*v, ty),
        // A variable on the concrete side constrains nothing.
        (_, Type::Var(_)) => Ok(()),
        (Type::Const(a), Type::Const(b)) if a == b => Ok(()),
        (Type::Const(_), Type::Const(_)) => Err(AlignmentError::ConstantClash {
            expected: variable_sided.clone(),
            found: concrete.clone(),
        }),
        (Type::Composite(a), Type::Composite(b)) => align_composite(a, b, alignment),
        _ => Err(AlignmentError::ShapeMismatch {
            expected: variable_sided.clone(),
            found: concrete.clone(),
        }),
    }
}
