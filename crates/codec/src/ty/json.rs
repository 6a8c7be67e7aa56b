//! Conversion from JSON ABI parameter descriptors.

use super::{Component, TypeNode, parser::Parser};
use crate::{AbiError, Result};
use alloy_json_abi::{EventParam, Param};

impl TypeNode {
    /// Builds a type from a JSON ABI parameter, recursing into `components` for tuple types.
    pub fn from_param(param: &Param) -> Result<Self> {
        resolve(&param.ty, &param.components)
    }

    /// Builds a type from a JSON ABI event parameter.
    pub fn from_event_param(param: &EventParam) -> Result<Self> {
        resolve(&param.ty, &param.components)
    }

    /// Builds the tuple type of a parameter list, keeping parameter names as component names.
    pub fn from_params<'a>(params: impl IntoIterator<Item = &'a Param>) -> Result<Self> {
        let components = params
            .into_iter()
            .map(|p| Ok(Component::new(p.name.clone(), Self::from_param(p)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::tuple(components))
    }
}

fn resolve(ty: &str, components: &[Param]) -> Result<TypeNode> {
    let Some(suffix) = ty.strip_prefix("tuple") else { return TypeNode::parse(ty) };
    if components.is_empty() {
        return Err(AbiError::malformed(ty, "empty tuple type"));
    }
    let base = TypeNode::from_params(components)?;
    let mut parser = Parser::new(suffix);
    let node = parser.array_suffixes(base)?;
    if !parser.is_eof() {
        return Err(AbiError::malformed(ty, "unexpected input after array suffixes"));
    }
    Ok(node)
}
