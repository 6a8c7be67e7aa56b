use calldata_codec::AbiError;
use calldata_dispatch::DispatchError;
use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Reports errors as their deduplicated cause chain, followed by a hint when the error is a
/// usage mistake with a known remedy.
///
/// With `CALLDATA_DEBUG` set, reporting is delegated to the `color-eyre` handler.
struct Handler {
    debug: Option<Box<dyn EyreHandler>>,
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(debug) = &self.debug {
            return debug.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let errors = dedup_chain(error);
        let Some((error_msg, sources)) = errors.split_first() else { return Ok(()) };
        write!(f, "{error_msg}")?;
        if !sources.is_empty() {
            write!(f, "\n\nContext:")?;
            for source in sources {
                write!(f, "\n- {source}")?;
            }
        }
        if let Some(hint) = hint(error) {
            write!(f, "\n\nHint: {hint}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(debug) = &mut self.debug {
            debug.track_caller(location);
        }
    }
}

/// Returns the messages of `error` and its sources, dropping messages already contained in the
/// one before them.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes: Vec<String> = std::iter::successors(Some(error), |&e| e.source())
        .map(|cause| cause.to_string().trim().to_string())
        .collect();
    // `msg1: msg2; msg2` -> `msg1: msg2`
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

/// A suggestion for the first codec or dispatch error in the chain of `error`.
pub fn hint(error: &(dyn Error + 'static)) -> Option<&'static str> {
    std::iter::successors(Some(error), |&e| e.source()).find_map(|e| {
        if let Some(e) = e.downcast_ref::<DispatchError>() {
            return dispatch_hint(e);
        }
        e.downcast_ref::<AbiError>().and_then(codec_hint)
    })
}

fn dispatch_hint(error: &DispatchError) -> Option<&'static str> {
    match error {
        DispatchError::SelectorNotFound(_) => Some(
            "pass the ABI that defines this function with `--abi`, or list it under `abis` in calldata.toml",
        ),
        DispatchError::OwnerNotFound { .. } => {
            Some("owners are the file stems of the ABI files; `calldata methods` lists what is registered")
        }
        DispatchError::MalformedCalldata { .. } => {
            Some("calldata starts with the 4-byte selector of the called function")
        }
        DispatchError::OverloadRenameConflict { .. } => None,
        DispatchError::Codec(e) => codec_hint(e),
    }
}

fn codec_hint(error: &AbiError) -> Option<&'static str> {
    match error {
        AbiError::MalformedSignature { .. } => {
            Some("signatures look like `transfer(address to, uint256 amount) returns (bool)`")
        }
        AbiError::TruncatedCalldata { .. } => Some(
            "the data is shorter than its types require; check that the signature matches the data",
        ),
        AbiError::SelectorMismatch { .. } => {
            Some("the data was encoded for another function; use `--output` for return data")
        }
        AbiError::TypeMismatch { .. } => {
            Some("`calldata parse` shows the canonical form of a signature's types")
        }
        _ => None,
    }
}

/// Installs the [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// Panics are always reported by the `color-eyre` handler.
pub fn install() {
    let panic_section = "This is a bug. Please report it along with the command that triggered it.";
    let (panic_hook, debug_hook) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();
    let debug_hook = debug_hook.into_eyre_hook();
    let debug = std::env::var_os("CALLDATA_DEBUG").is_some();
    if let Err(e) =
        eyre::set_hook(Box::new(move |e| Box::new(Handler { debug: debug.then(|| debug_hook(e)) })))
    {
        debug!(target: "calldata::cli", "failed to install eyre error hook: {e}");
    }
}
