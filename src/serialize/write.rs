use std::io::Write;

use log::debug;

use super::*;
use crate::expr::{BinderKind, Connective, Expr, IdentKind, Identifier};
use crate::types::Type;

/// Writes records to an underlying byte sink.
pub struct Writer<W: Write> {
    inner: W,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Writer { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_type(&mut self, ty: &Type) -> Result<(), SerializeError> {
        match ty {
            Type::Const(symbol) => {
                self.header(CONST_TYPE)?;
                self.write_symbol(*symbol)
            }
            Type::Var(symbol) => {
                self.header(VAR_TYPE)?;
                self.write_symbol(*symbol)
            }
            Type::Composite(c) => {
                self.header(COMPOSITE_TYPE)?;
                self.write_type(&c.domain)?;
                self.write_type(&c.range)
            }
        }
    }

    pub fn write_expr(&mut self, expr: &Expr) -> Result<(), SerializeError> {
        match expr {
            Expr::Ident(id) => self.write_identifier(id),
            Expr::Binder(binder) => {
                self.header(binder_tag(binder.kind))?;
                self.write_identifier(&binder.var)?;
                self.write_expr(&binder.body)
            }
            Expr::Not(operand) => {
                self.header(NOT)?;
                self.write_expr(operand)
            }
            Expr::Binary(bin) => {
                self.header(connective_tag(bin.op))?;
                self.write_expr(&bin.left)?;
                self.write_expr(&bin.right)
            }
            Expr::Equality(eq) => {
                self.header(EQUALITY)?;
                self.write_expr(&eq.left)?;
                self.write_expr(&eq.right)
            }
            Expr::Application(app) => {
                self.header(FUNCTION_APPLICATION)?;
                self.write_expr(&app.func)?;
                self.write_expr(&app.arg)
            }
        }
    }

    fn write_identifier(&mut self, id: &Identifier) -> Result<(), SerializeError> {
        let tag = match id.kind {
            IdentKind::Variable => VAR,
            IdentKind::Constant => CONST,
        };
        self.header(tag)?;
        self.write_str(&id.name)?;
        self.write_type(&id.ty)
    }

    fn header(&mut self, tag: &str) -> Result<(), SerializeError> {
        debug!("writing {} record", tag);
        self.write_str(tag)?;
        self.inner.write_all(&FORMAT_VERSION.to_be_bytes())?;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<(), SerializeError> {
        let len = u16::try_from(s.len()).map_err(|_| {
            SerializeError::Malformed(format!("string of {} bytes is too long", s.len()))
        })?;
        self.inner.write_all(&len.to_be_bytes())?;
        self.inner.write_all(s.as_bytes())?;
        Ok(())
    }

    fn write_symbol(&mut self, symbol: char) -> Result<(), SerializeError> {
        let mut units = [0u16; 2];
        match symbol.encode_utf16(&mut units) {
            [unit] => {
                self.inner.write_all(&unit.to_be_bytes())?;
                Ok(())
            }
            _ => Err(SerializeError::SymbolOutOfRange(symbol)),
        }
    }
}

pub fn write_type<W: Write>(ty: &Type, out: W) -> Result<(), SerializeError> {
    Writer::new(out).write_type(ty)
}

pub fn write_expr<W: Write>(expr: &Expr, out: W) -> Result<(), SerializeError> {
    Writer::new(out).write_expr(expr)
}

fn binder_tag(kind: BinderKind) -> &'static str {
    match kind {
        BinderKind::Lambda => LAMBDA,
        BinderKind::Exists => EXISTS,
        BinderKind::ForAll => FOR_ALL,
        BinderKind::Iota => IOTA,
    }
}

fn connective_tag(op: Connective) -> &'static str {
    match op {
        Connective::And => AND,
        Connective::Or => OR,
        Connective::If => IF,
        Connective::Iff => IFF,
    }
}
