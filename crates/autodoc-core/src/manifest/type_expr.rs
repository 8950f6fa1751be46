//! Type expressions used by manifests
//!
//! Grammar (Rust spelling):
//!
//! ```text
//! ty   := scalar
//!       | Option<ty> | Box<ty> | Rc<ty> | Arc<ty>
//!       | Vec<ty> | VecDeque<ty> | HashSet<ty> | BTreeSet<ty>
//!       | [ty] | [ty; N]
//!       | HashMap<ty, ty> | BTreeMap<ty, ty>
//!       | fn(..) [-> ty] | dyn .. | impl .. | Sender<..> | Receiver<..>
//!       | ModelName
//! ```
//!
//! Function pointers, trait objects, channels and tuples parse to
//! [`Ty::Unsupported`]; any other identifier is a model reference.

use crate::error::{Error, Result};
use crate::model::{MapKind, Scalar, Ty, Wrapper};

/// Channel-like and free-form types kept opaque
const OPAQUE: &[&str] = &[
    "Sender",
    "Receiver",
    "SyncSender",
    "UnboundedSender",
    "UnboundedReceiver",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tok<'s> {
    Ident(&'s str),
    Num(usize),
    Arrow,
    Punct(char),
}

#[derive(Debug, Clone, Copy)]
struct Spanned<'s> {
    tok: Tok<'s>,
    start: usize,
    end: usize,
}

fn tokenize(src: &str) -> Result<Vec<Spanned<'_>>> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        if c.is_ascii_digit() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let n = src[start..i]
                .parse()
                .map_err(|_| Error::type_expr(src, format!("array length `{}` is too large", &src[start..i])))?;
            tokens.push(Spanned { tok: Tok::Num(n), start, end: i });
        } else if c.is_ascii_alphabetic() || c == '_' {
            while i < bytes.len()
                && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b':')
            {
                i += 1;
            }
            tokens.push(Spanned { tok: Tok::Ident(&src[start..i]), start, end: i });
        } else if c == '-' && bytes.get(i + 1) == Some(&b'>') {
            i += 2;
            tokens.push(Spanned { tok: Tok::Arrow, start, end: i });
        } else if "<>,[];()&'".contains(c) {
            i += 1;
            tokens.push(Spanned { tok: Tok::Punct(c), start, end: i });
        } else {
            return Err(Error::type_expr(src, format!("unexpected character `{}`", c)));
        }
    }

    Ok(tokens)
}

struct Parser<'s> {
    src: &'s str,
    tokens: Vec<Spanned<'s>>,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn peek(&self) -> Option<Tok<'s>> {
        self.tokens.get(self.pos).map(|t| t.tok)
    }

    fn next(&mut self) -> Result<Spanned<'s>> {
        let tok = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, c: char) -> Result<()> {
        match self.next()?.tok {
            Tok::Punct(p) if p == c => Ok(()),
            other => Err(self.error(format!("expected `{}`, found {}", c, describe(other)))),
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::type_expr(self.src, message)
    }

    fn parse_ty(&mut self) -> Result<Ty> {
        let first = self.next()?;
        match first.tok {
            Tok::Punct('[') => self.parse_bracketed(),
            Tok::Punct('(') | Tok::Punct('&') => Ok(self.opaque_from(first)),
            Tok::Ident(ident) => self.parse_ident(first, ident),
            other => Err(self.error(format!("expected a type, found {}", describe(other)))),
        }
    }

    fn parse_bracketed(&mut self) -> Result<Ty> {
        let inner = self.parse_ty()?;
        if self.peek() == Some(Tok::Punct(';')) {
            self.pos += 1;
            let len = match self.next()?.tok {
                Tok::Num(n) => n,
                other => return Err(self.error(format!("expected array length, found {}", describe(other)))),
            };
            self.expect(']')?;
            Ok(Ty::array(inner, len))
        } else {
            self.expect(']')?;
            Ok(Ty::wrapped(Wrapper::Vec, inner))
        }
    }

    fn parse_ident(&mut self, first: Spanned<'s>, ident: &'s str) -> Result<Ty> {
        let last = ident.rsplit("::").next().unwrap_or(ident);

        if matches!(last, "fn" | "dyn" | "impl") || OPAQUE.contains(&last) || ident == "serde_json::Value" {
            return Ok(self.opaque_from(first));
        }

        if let Some(scalar) = Scalar::from_name(last) {
            return Ok(Ty::Scalar(scalar));
        }

        if let Some(wrapper) = Wrapper::from_name(last) {
            self.expect('<')?;
            let inner = self.parse_ty()?;
            self.expect('>')?;
            return Ok(Ty::wrapped(wrapper, inner));
        }

        if let Some(kind) = MapKind::from_name(last) {
            self.expect('<')?;
            let key = self.parse_ty()?;
            self.expect(',')?;
            let value = self.parse_ty()?;
            self.expect('>')?;
            return Ok(Ty::map(kind, key, value));
        }

        if self.peek() == Some(Tok::Punct('<')) {
            return Err(self.error(format!("generic model `{}` is not supported", ident)));
        }

        Ok(Ty::named(ident))
    }

    /// Consume a balanced run of tokens up to the next separator and keep
    /// its source text as an unsupported type.
    fn opaque_from(&mut self, first: Spanned<'s>) -> Ty {
        let mut depth: usize = match first.tok {
            Tok::Punct('(') | Tok::Punct('[') => 1,
            _ => 0,
        };
        let mut end = first.end;

        while let Some(tok) = self.tokens.get(self.pos) {
            match tok.tok {
                Tok::Punct('(') | Tok::Punct('[') | Tok::Punct('<') => depth += 1,
                Tok::Punct(')') | Tok::Punct(']') | Tok::Punct('>') if depth > 0 => depth -= 1,
                Tok::Punct(',') | Tok::Punct(';') | Tok::Punct(')') | Tok::Punct(']') | Tok::Punct('>')
                    if depth == 0 =>
                {
                    break
                }
                _ => {}
            }
            end = tok.end;
            self.pos += 1;
        }

        Ty::unsupported(self.src[first.start..end].trim())
    }
}

fn describe(tok: Tok<'_>) -> String {
    match tok {
        Tok::Ident(s) => format!("`{}`", s),
        Tok::Num(n) => format!("`{}`", n),
        Tok::Arrow => "`->`".to_string(),
        Tok::Punct(c) => format!("`{}`", c),
    }
}

/// Parse a manifest type expression
pub fn parse_type(expr: &str) -> Result<Ty> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(Error::type_expr(expr, "empty type expression"));
    }

    let mut parser = Parser {
        src: expr,
        tokens,
        pos: 0,
    };
    let ty = parser.parse_ty()?;
    if let Some(extra) = parser.peek() {
        return Err(parser.error(format!("unexpected trailing {}", describe(extra))));
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructRef;

    fn label(expr: &str) -> String {
        parse_type(expr).unwrap().label()
    }

    #[test]
    fn test_scalars_and_wrappers() {
        assert_eq!(label("i64"), "i64");
        assert_eq!(label("str"), "String");
        assert_eq!(label("Option<Vec<u8>>"), "Option<Vec<u8>>");
        assert_eq!(label("std::sync::Arc<bool>"), "Arc<bool>");
        assert_eq!(label("[String]"), "Vec<String>");
        assert_eq!(label("[f32; 16]"), "[f32; 16]");
    }

    #[test]
    fn test_maps() {
        assert_eq!(label("HashMap<String, Vec<Order>>"), "HashMap<String, Vec<Order>>");
        assert_eq!(label("BTreeMap< u32 ,bool >"), "BTreeMap<u32, bool>");
    }

    #[test]
    fn test_model_reference() {
        match parse_type("Order").unwrap() {
            Ty::Struct(StructRef::Named(name)) => assert_eq!(name, "Order"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_kinds() {
        assert!(matches!(parse_type("fn(u32) -> bool").unwrap(), Ty::Unsupported(ref s) if s == "fn(u32) -> bool"));
        assert!(matches!(parse_type("Box<dyn Handler>").unwrap(),
            Ty::Wrapped { ref inner, .. } if matches!(**inner, Ty::Unsupported(ref s) if s == "dyn Handler")));
        assert!(matches!(parse_type("Receiver<Event>").unwrap(), Ty::Unsupported(ref s) if s == "Receiver<Event>"));
        assert!(matches!(parse_type("serde_json::Value").unwrap(), Ty::Unsupported(_)));
        assert_eq!(
            label("HashMap<String, fn(u8)>"),
            "HashMap<String, fn(u8)>"
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse_type("").is_err());
        assert!(parse_type("Vec<").is_err());
        assert!(parse_type("Vec<u8").is_err());
        assert!(parse_type("HashMap<u8>").is_err());
        assert!(parse_type("[u8; x]").is_err());
        assert!(parse_type("u8 u16").is_err());
        assert!(parse_type("Page<User>").is_err());
        assert!(parse_type("u8 + u16").is_err());
    }
}
