//! Naming conventions that give identifiers a default type.
//!
//! Students write `x`, `P` or `Love` without annotating types; the conventions
//! of the current exercise decide that `x` is an entity variable and `P` a
//! predicate constant. A typer is owned by its session, so two sessions with
//! different conventions never see each other's entries.

use log::warn;
use regex::Regex;

use super::{IdentKind, Identifier};
use crate::types::{ENTITY, TRUTH, Type, TypeError};

#[derive(Debug, Clone)]
struct TyperEntry {
    pattern: Regex,
    kind: IdentKind,
    ty: Type,
}

/// An ordered table of name patterns. The first matching entry wins.
#[derive(Debug, Clone)]
pub struct IdentifierTyper {
    entries: Vec<TyperEntry>,
}

/// The standard conventions, see [`IdentifierTyper::standard`].
impl Default for IdentifierTyper {
    fn default() -> Self {
        IdentifierTyper::standard().unwrap_or_else(|err| {
            warn!("standard naming conventions rejected: {}", err);
            IdentifierTyper::new()
        })
    }
}

impl IdentifierTyper {
    /// An empty table; every lookup fails until entries are added.
    pub fn new() -> Self {
        IdentifierTyper {
            entries: Vec::new(),
        }
    }

    /// The textbook conventions:
    ///
    /// | pattern            | kind     | type        |
    /// |--------------------|----------|-------------|
    /// | `^[u-z][0-9_']*$`  | variable | `e`         |
    /// | `^[X-Z][0-9_']*$`  | variable | `<e,t>`     |
    /// | `^[a-z]`           | constant | `e`         |
    /// | `^R[0-9_']*$`      | constant | `<e,<e,t>>` |
    /// | `^[A-Z]`           | constant | `<e,t>`     |
    pub fn standard() -> Result<Self, regex::Error> {
        let mut typer = IdentifierTyper::new();
        typer.add_entry(r"^[u-z][0-9_']*$", IdentKind::Variable, ENTITY)?;
        typer.add_entry(r"^[X-Z][0-9_']*$", IdentKind::Variable, Type::predicate())?;
        typer.add_entry(r"^[a-z]", IdentKind::Constant, ENTITY)?;
        typer.add_entry(
            r"^R[0-9_']*$",
            IdentKind::Constant,
            Type::func(ENTITY, Type::func(ENTITY, TRUTH)),
        )?;
        typer.add_entry(r"^[A-Z]", IdentKind::Constant, Type::predicate())?;
        Ok(typer)
    }

    /// Append an entry. Earlier entries take precedence over this one.
    pub fn add_entry(&mut self, pattern: &str, kind: IdentKind, ty: Type) -> Result<(), regex::Error> {
        self.entries.push(TyperEntry {
            pattern: Regex::new(pattern)?,
            kind,
            ty,
        });
        Ok(())
    }

    /// Drop all entries, e.g. when an exercise replaces the conventions.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn lookup(&self, name: &str) -> Option<(IdentKind, &Type)> {
        self.entries
            .iter()
            .find(|entry| entry.pattern.is_match(name))
            .map(|entry| (entry.kind, &entry.ty))
    }

    /// Build the identifier the conventions assign to `name`.
    pub fn identifier(&self, name: &str) -> Result<Identifier, TypeError> {
        let (kind, ty) = self.lookup(name).ok_or_else(|| TypeError::UnknownIdentifier {
            name: name.to_string(),
        })?;
        Ok(Identifier {
            name: name.to_string(),
            kind,
            ty: ty.clone(),
        })
    }
}
