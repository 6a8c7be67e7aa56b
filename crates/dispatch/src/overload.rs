use crate::{DispatchError, Result};
use calldata_codec::Method;
use itertools::Itertools;
use std::collections::HashSet;

/// Assigns unique names to overloaded methods.
///
/// Methods sharing a name are ordered by canonical signature and suffixed `1`, `2`, ... in that
/// order, so the result does not depend on declaration order. Methods that are not overloaded
/// keep their name. Only the returned names change: selectors are still derived from the
/// original signatures.
///
/// Returns `(name, method)` pairs in the input order.
pub fn rename_overloaded_methods(methods: &[Method]) -> Result<Vec<(String, &Method)>> {
    let existing: HashSet<&str> = methods.iter().map(Method::name).collect();
    let mut names: Vec<String> = methods.iter().map(|m| m.name().to_string()).collect();

    let groups = methods.iter().enumerate().into_group_map_by(|&(_, m)| m.name());
    for (name, group) in groups {
        if group.len() < 2 {
            continue;
        }
        for (i, (idx, _)) in
            group.into_iter().sorted_by(|(_, a), (_, b)| a.signature().cmp(b.signature())).enumerate()
        {
            let renamed = format!("{name}{}", i + 1);
            if existing.contains(renamed.as_str()) {
                return Err(DispatchError::OverloadRenameConflict {
                    name: name.to_string(),
                    renamed,
                });
            }
            names[idx] = renamed;
        }
    }

    Ok(names.into_iter().zip(methods).collect())
}
