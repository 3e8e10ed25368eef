//! Display implementations for the expression model
//!
//! ```text
//! λx[Happy(x)]                binder, body in brackets
//! (λx[Happy(x)])(John)        applied binder, function parenthesized
//! Love(m)(j)                  curried application
//! ¬P(j) ∧ (p ∨ q)             connectives, nested operands parenthesized
//! ```

use std::fmt::{self, Display};

use crate::expr::{Binder, BinderKind, Connective, Expr, Identifier};

struct Formatter {
    buffer: String,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn finish(self) -> String {
        self.buffer
    }
}

// Function position and atomic terms bind tightest.
const ATOMIC: u8 = 100;

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_expression(self, &mut formatter, 0);
        write!(f, "{}", formatter.finish())
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for BinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", binder_symbol(*self))
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", connective_symbol(*self))
    }
}

fn format_expression(expr: &Expr, fmt: &mut Formatter, precedence: u8) {
    match expr {
        Expr::Ident(id) => fmt.write_str(&id.name),
        Expr::Binder(binder) => format_binder(binder, fmt),
        Expr::Not(operand) => {
            let op_prec = NOT_PRECEDENCE;
            with_parens(fmt, op_prec < precedence, |fmt| {
                fmt.write_str("¬");
                format_expression(operand, fmt, op_prec);
            });
        }
        Expr::Binary(bin) => {
            let op_prec = connective_precedence(bin.op);
            with_parens(fmt, op_prec < precedence, |fmt| {
                // Nested connectives are always bracketed.
                format_expression(&bin.left, fmt, EQUALITY_PRECEDENCE);
                fmt.write_str(" ");
                fmt.write_str(connective_symbol(bin.op));
                fmt.write_str(" ");
                format_expression(&bin.right, fmt, EQUALITY_PRECEDENCE);
            });
        }
        Expr::Equality(eq) => {
            let op_prec = EQUALITY_PRECEDENCE;
            with_parens(fmt, op_prec < precedence, |fmt| {
                format_expression(&eq.left, fmt, op_prec + 1);
                fmt.write_str(" = ");
                format_expression(&eq.right, fmt, op_prec + 1);
            });
        }
        Expr::Application(app) => {
            let bare = matches!(app.func.as_ref(), Expr::Ident(_) | Expr::Application(_));
            with_parens(fmt, !bare, |fmt| format_expression(&app.func, fmt, ATOMIC));
            fmt.write_str("(");
            format_expression(&app.arg, fmt, 0);
            fmt.write_str(")");
        }
    }
}

fn format_binder(binder: &Binder, fmt: &mut Formatter) {
    fmt.write_str(binder_symbol(binder.kind));
    fmt.write_str(&binder.var.name);
    fmt.write_str("[");
    format_expression(&binder.body, fmt, 0);
    fmt.write_str("]");
}

fn with_parens(fmt: &mut Formatter, parens: bool, inner: impl FnOnce(&mut Formatter)) {
    if parens {
        fmt.write_str("(");
    }
    inner(fmt);
    if parens {
        fmt.write_str(")");
    }
}

const NOT_PRECEDENCE: u8 = 6;
const EQUALITY_PRECEDENCE: u8 = 5;

fn connective_precedence(op: Connective) -> u8 {
    match op {
        Connective::Iff => 1,
        Connective::If => 2,
        Connective::Or => 3,
        Connective::And => 4,
    }
}

fn connective_symbol(op: Connective) -> &'static str {
    match op {
        Connective::And => "∧",
        Connective::Or => "∨",
        Connective::If => "→",
        Connective::Iff => "↔",
    }
}

fn binder_symbol(kind: BinderKind) -> &'static str {
    match kind {
        BinderKind::Lambda => "λ",
        BinderKind::Exists => "∃",
        BinderKind::ForAll => "∀",
        BinderKind::Iota => "ι",
    }
}
