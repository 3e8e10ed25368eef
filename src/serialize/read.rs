use std::io::Read;

use super::*;
use crate::expr::{BinderKind, Connective, Expr, IdentKind, Identifier};
use crate::types::Type;

/// Deepest nesting of records a [`Reader`] follows before giving up on the
/// stream as malformed.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Reads records from an underlying byte source.
pub struct Reader<R: Read> {
    inner: R,
    depth: usize,
}

impl<R: Read> Reader<R> {
    pub fn new(inner: R) -> Self {
        Reader { inner, depth: 0 }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_type(&mut self) -> Result<Type, SerializeError> {
        self.nested(|reader| {
            let tag = reader.header()?;
            reader.type_body(tag)
        })
    }

    pub fn read_expr(&mut self) -> Result<Expr, SerializeError> {
        self.nested(Self::expr_record)
    }

    /// Run `read` one record deeper, failing once the nesting limit is hit.
    fn nested<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, SerializeError>,
    ) -> Result<T, SerializeError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SerializeError::Malformed(format!(
                "records nested deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    fn expr_record(&mut self) -> Result<Expr, SerializeError> {
        let tag = self.header()?;
        match tag.as_str() {
            CONST | VAR => self.identifier_body(&tag).map(Expr::Ident),
            LAMBDA => self.binder_body(BinderKind::Lambda),
            EXISTS => self.binder_body(BinderKind::Exists),
            FOR_ALL => self.binder_body(BinderKind::ForAll),
            IOTA => self.binder_body(BinderKind::Iota),
            AND => self.binary_body(Connective::And),
            OR => self.binary_body(Connective::Or),
            IF => self.binary_body(Connective::If),
            IFF => self.binary_body(Connective::Iff),
            NOT => Ok(Expr::not(self.read_expr()?)),
            EQUALITY => {
                let left = self.read_expr()?;
                let right = self.read_expr()?;
                Ok(Expr::equality(left, right))
            }
            FUNCTION_APPLICATION => {
                let func = self.read_expr()?;
                let arg = self.read_expr()?;
                Ok(Expr::apply(func, arg))
            }
            _ => Err(SerializeError::UnknownTag { tag }),
        }
    }

    fn type_body(&mut self, tag: String) -> Result<Type, SerializeError> {
        match tag.as_str() {
            CONST_TYPE => Ok(Type::Const(self.read_symbol()?)),
            VAR_TYPE => Ok(Type::Var(self.read_symbol()?)),
            COMPOSITE_TYPE => {
                let domain = self.read_type()?;
                let range = self.read_type()?;
                Ok(Type::func(domain, range))
            }
            _ => Err(SerializeError::UnknownTag { tag }),
        }
    }

    fn identifier_body(&mut self, tag: &str) -> Result<Identifier, SerializeError> {
        let kind = if tag == VAR {
            IdentKind::Variable
        } else {
            IdentKind::Constant
        };
        let name = self.read_str()?;
        let ty = self.read_type()?;
        Ok(Identifier { name, kind, ty })
    }

    fn binder_body(&mut self, kind: BinderKind) -> Result<Expr, SerializeError> {
        let tag = self.header()?;
        if tag != VAR && tag != CONST {
            return Err(SerializeError::Malformed(format!(
                "expected a bound identifier, found {} record",
                tag
            )));
        }
        let var = self.identifier_body(&tag)?;
        let body = self.read_expr()?;
        Ok(Expr::binder(kind, var, body))
    }

    fn binary_body(&mut self, op: Connective) -> Result<Expr, SerializeError> {
        let left = self.read_expr()?;
        let right = self.read_expr()?;
        Ok(Expr::binary(op, left, right))
    }

    /// Read a record's tag and version, rejecting unknown versions before any
    /// field is interpreted.
    fn header(&mut self) -> Result<String, SerializeError> {
        let tag = self.read_str()?;
        let version = i16::from_be_bytes(self.read_array()?);
        if version != FORMAT_VERSION {
            return Err(SerializeError::UnsupportedFormatVersion { tag, version });
        }
        Ok(tag)
    }

    fn read_str(&mut self) -> Result<String, SerializeError> {
        let len = u16::from_be_bytes(self.read_array()?);
        let mut bytes = vec![0u8; usize::from(len)];
        self.inner.read_exact(&mut bytes)?;
        String::from_utf8(bytes)
            .map_err(|err| SerializeError::Malformed(format!("invalid UTF-8 string: {}", err)))
    }

    fn read_symbol(&mut self) -> Result<char, SerializeError> {
        let unit = u16::from_be_bytes(self.read_array()?);
        char::from_u32(u32::from(unit)).ok_or_else(|| {
            SerializeError::Malformed(format!("unpaired surrogate {:#06x} as type symbol", unit))
        })
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerializeError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

pub fn read_type<R: Read>(input: R) -> Result<Type, SerializeError> {
    Reader::new(input).read_type()
}

pub fn read_expr<R: Read>(input: R) -> Result<Expr, SerializeError> {
    Reader::new(input).read_expr()
}
