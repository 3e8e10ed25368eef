use std::collections::BTreeSet;
use std::fmt;

/// The type of entities.
pub const ENTITY: Type = Type::Const('e');
/// The type of truth values.
pub const TRUTH: Type = Type::Const('t');
/// The type of situations / worlds.
pub const SITUATION: Type = Type::Const('s');

/// A semantic type.
///
/// Atomic types are identified by a single symbol. Constant types (`e`, `t`, `s`)
/// only match themselves, variable types (`'a`, `'b`) act as placeholders that are
/// later specialized through [`super::align`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Const(char),
    Var(char),
    Composite(CompositeType),
}

/// A function type `<domain,range>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeType {
    pub domain: Box<Type>,
    pub range: Box<Type>,
}

impl CompositeType {
    pub fn new(domain: Type, range: Type) -> Self {
        CompositeType {
            domain: Box::new(domain),
            range: Box::new(range),
        }
    }

    pub fn has_variables(&self) -> bool {
        self.domain.has_variables() || self.range.has_variables()
    }
}

impl Type {
    pub fn func(domain: Type, range: Type) -> Self {
        Type::Composite(CompositeType::new(domain, range))
    }

    /// `<e,t>`, the type of one-place predicates.
    pub fn predicate() -> Self {
        Type::func(ENTITY, TRUTH)
    }

    /// Directional compatibility check.
    ///
    /// `self` is the expected type, `other` the provided one. Variable types on
    /// either side are compatible with anything, constants must share their symbol
    /// and composite types recurse into domain and range.
    ///
    /// The relation is not transitive: `e` and `t` are both compatible with `'a`
    /// but not with each other.
    ///
    /// ```text
    /// is_compatible(e, e)             = true
    /// is_compatible(e, t)             = false
    /// is_compatible('a, <e,t>)        = true
    /// is_compatible(<'a,t>, <e,t>)    = true
    /// is_compatible(<e,t>, e)         = false
    /// ```
    pub fn is_compatible(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Var(_), _) | (_, Type::Var(_)) => true,
            (Type::Const(a), Type::Const(b)) => a == b,
            (Type::Composite(a), Type::Composite(b)) => {
                a.domain.is_compatible(&b.domain) && a.range.is_compatible(&b.range)
            }
            _ => false,
        }
    }

    pub fn has_variables(&self) -> bool {
        match self {
            Type::Const(_) => false,
            Type::Var(_) => true,
            Type::Composite(c) => c.has_variables(),
        }
    }

    pub fn type_vars(&self) -> BTreeSet<char> {
        match self {
            Type::Const(_) => BTreeSet::new(),
            Type::Var(v) => BTreeSet::from([*v]),
            Type::Composite(c) => {
                let mut vars = c.domain.type_vars();
                vars.extend(c.range.type_vars());
                vars
            }
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeType> {
        match self {
            Type::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Stable textual form, e.g. `<e,<'a,t>>`. Used in error messages and logs
    /// where the exact shape matters.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut String) {
        match self {
            Type::Const(c) => out.push(*c),
            Type::Var(v) => {
                out.push('\'');
                out.push(*v);
            }
            Type::Composite(c) => {
                out.push('<');
                c.domain.write_canonical(out);
                out.push(',');
                c.range.write_canonical(out);
                out.push('>');
            }
        }
    }

    pub fn pretty(&self) -> String {
        self.canonical()
    }
}

impl From<CompositeType> for Type {
    fn from(c: CompositeType) -> Self {
        Type::Composite(c)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

impl fmt::Display for CompositeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{},{}>", self.domain, self.range)
    }
}
