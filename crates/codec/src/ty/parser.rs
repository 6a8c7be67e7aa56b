//! Signature string parser.
//!
//! Handles type strings (`uint256`, `(bytes32,string)[2][]`, `tuple(address to, uint amount)`)
//! and full function/event signatures (`transfer(address,uint256)`,
//! `function balanceOf(address owner) view returns (uint256)`,
//! `event Transfer(address indexed from, address indexed to, uint256 value)`).
//!
//! Array suffixes apply left to right, so in `T[2][]` the last bracket group is the outermost
//! dimension: a dynamic array of `T[2]`.

use super::{ArrayLen, Component, Elementary, TypeNode};
use crate::{AbiError, Result};

/// A parameter as it appears in a signature's parameter list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedParam {
    pub name: String,
    pub ty: TypeNode,
    pub indexed: bool,
}

/// A parsed `name(inputs)[ returns (outputs)]` signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedSignature {
    pub name: String,
    pub inputs: Vec<ParsedParam>,
    pub outputs: Vec<ParsedParam>,
    pub anonymous: bool,
}

/// Parses a single type string.
pub fn parse_type(signature: &str) -> Result<TypeNode> {
    let mut parser = Parser::new(signature);
    let ty = parser.ty()?;
    parser.skip_ws();
    if !parser.is_eof() {
        return Err(parser.error(format!("unexpected trailing input `{}`", parser.rest())));
    }
    Ok(ty)
}

/// Parses a function or event signature.
///
/// Accepts an optional `function`/`event` keyword, trailing modifiers such as `external`, `view`
/// or `anonymous`, and either a `returns (...)` clause or a directly appended output list as in
/// `name(uint256)(bool)`.
pub fn parse_signature(signature: &str) -> Result<ParsedSignature> {
    let mut parser = Parser::new(signature);
    parser.skip_ws();
    let mut name = parser.ident();
    if matches!(name, "function" | "event" | "error") {
        parser.skip_ws();
        name = parser.ident();
    }
    if name.is_empty() {
        return Err(parser.error("missing name"));
    }
    let name = name.to_string();
    parser.skip_ws();
    let inputs = parser.param_list()?;

    let mut outputs = Vec::new();
    let mut anonymous = false;
    loop {
        parser.skip_ws();
        match parser.peek() {
            None => break,
            Some(b'(') if outputs.is_empty() => outputs = parser.param_list()?,
            Some(_) => match parser.ident() {
                "returns" => {
                    parser.skip_ws();
                    outputs = parser.param_list()?;
                }
                "anonymous" => anonymous = true,
                "external" | "public" | "internal" | "private" | "view" | "pure" | "payable"
                | "nonpayable" | "virtual" | "override" => {}
                "" => return Err(parser.error(format!("unexpected `{}`", parser.rest()))),
                other => return Err(parser.error(format!("unknown modifier `{other}`"))),
            },
        }
    }

    Ok(ParsedSignature { name, inputs, outputs, anonymous })
}

pub(super) struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> AbiError {
        AbiError::malformed(self.input, reason)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected `{}` at position {}", byte as char, self.pos)))
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$') {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    pub(super) fn ty(&mut self) -> Result<TypeNode> {
        self.skip_ws();
        let base = if self.peek() == Some(b'(') {
            self.tuple()?
        } else {
            let start = self.pos;
            match self.ident() {
                "" => return Err(self.error(format!("expected a type at position {start}"))),
                "tuple" if self.peek() == Some(b'(') => self.tuple()?,
                name => Elementary::parse(name)
                    .map(TypeNode::elementary)
                    .ok_or_else(|| self.error(format!("unknown type `{name}`")))?,
            }
        };
        self.array_suffixes(base)
    }

    pub(super) fn array_suffixes(&mut self, mut ty: TypeNode) -> Result<TypeNode> {
        while self.peek() == Some(b'[') {
            self.pos += 1;
            let start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
            let digits = &self.input[start..self.pos];
            self.expect(b']')?;
            let len = if digits.is_empty() {
                ArrayLen::Dynamic
            } else {
                match digits.parse::<usize>() {
                    Ok(0) => return Err(self.error("fixed array length must be positive")),
                    Ok(n) => ArrayLen::Fixed(n),
                    Err(_) => return Err(self.error(format!("invalid array length `{digits}`"))),
                }
            };
            ty = TypeNode::array(ty, len);
        }
        Ok(ty)
    }

    fn tuple(&mut self) -> Result<TypeNode> {
        let start = self.pos;
        let params = self.param_list()?;
        // Zero-sized values cannot be told apart in calldata.
        if params.is_empty() {
            return Err(self.error(format!("empty tuple type at position {start}")));
        }
        Ok(TypeNode::tuple(params.into_iter().map(|p| Component::new(p.name, p.ty)).collect()))
    }

    fn param_list(&mut self) -> Result<Vec<ParsedParam>> {
        self.expect(b'(')?;
        let mut params = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(params);
        }
        loop {
            params.push(self.param()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(params);
                }
                Some(other) => {
                    return Err(self.error(format!(
                        "unexpected `{}` at position {}",
                        other as char, self.pos
                    )));
                }
                None => return Err(self.error("unterminated parameter list")),
            }
        }
    }

    fn param(&mut self) -> Result<ParsedParam> {
        let ty = self.ty()?;
        let mut name = "";
        let mut indexed = false;
        loop {
            self.skip_ws();
            match self.ident() {
                "" => break,
                "indexed" => indexed = true,
                "memory" | "calldata" | "storage" => {}
                word if name.is_empty() => name = word,
                word => return Err(self.error(format!("unexpected `{word}` after `{name}`"))),
            }
        }
        Ok(ParsedParam { name: name.to_string(), ty, indexed })
    }
}
