use crate::{DispatchError, Result, rename_overloaded_methods};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{
    B256, Selector,
    map::{HashMap, hash_map::Entry},
};
use calldata_codec::{DecodingRules, Event, Method, Value, constants::SELECTOR_LEN};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A registered method and the name of the interface it was registered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodEntry {
    pub method: Method,
    /// The method name, suffixed when the interface overloads it.
    pub name: String,
    pub owner: Option<String>,
}

impl MethodEntry {
    fn is_owned_by(&self, owner: &str) -> bool {
        self.owner.as_deref().is_some_and(|o| o.eq_ignore_ascii_case(owner))
    }
}

/// Calldata decoded against a registered method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedCalldata {
    pub function_name: String,
    /// The signature including input names.
    pub function_signature: String,
    /// Arguments in declaration order.
    #[serde(serialize_with = "serialize_named")]
    pub function_arguments: Vec<(String, Value)>,
}

pub(crate) fn serialize_named<S: Serializer>(
    values: &[(String, Value)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(values.iter().map(|(k, v)| (k, v)))
}

/// Methods and events known to the decoder.
///
/// Several interfaces may register methods under the same selector; they are told apart by
/// their owner name. Events are keyed by `(topics[0], topics.len() - 1)`.
#[derive(Clone, Debug, Default)]
pub struct SelectorRegistry {
    methods: HashMap<Selector, Vec<MethodEntry>>,
    events: BTreeMap<(B256, usize), Vec<Event>>,
}

impl SelectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers all functions and events of `abi`, with functions owned by `owner`.
    ///
    /// Overloaded functions are registered under the names given by
    /// [`rename_overloaded_methods`].
    pub fn add_abi(&mut self, abi: &JsonAbi, owner: Option<&str>) -> Result<()> {
        trace!(target: "calldata::dispatch", len = abi.len(), ?owner, "collecting ABI");
        let methods =
            abi.functions().map(Method::from_function).collect::<calldata_codec::Result<Vec<_>>>()?;
        for (name, method) in rename_overloaded_methods(&methods)? {
            self.insert(MethodEntry {
                method: method.clone(),
                name,
                owner: owner.map(str::to_string),
            });
        }
        for event in abi.events() {
            self.add_event(Event::from_json(event)?);
        }
        Ok(())
    }

    /// Registers a single method under its own name. Registering the same method for the same
    /// owner twice is a no-op.
    pub fn add_method(&mut self, method: Method, owner: Option<&str>) {
        let name = method.name().to_string();
        self.insert(MethodEntry { method, name, owner: owner.map(str::to_string) });
    }

    fn insert(&mut self, entry: MethodEntry) {
        match self.methods.entry(entry.method.selector()) {
            Entry::Occupied(existing) => {
                if existing.get().contains(&entry) {
                    return;
                }
                trace!(
                    target: "calldata::dispatch",
                    selector = %existing.key(),
                    new = %entry.method.signature(),
                    "duplicate function selector"
                );
                existing.into_mut().push(entry);
            }
            Entry::Vacant(slot) => {
                slot.insert(vec![entry]);
            }
        }
    }

    /// Registers a single event. Anonymous events have no topic to be found by and are skipped.
    pub fn add_event(&mut self, event: Event) {
        if event.anonymous() {
            debug!(target: "calldata::dispatch", event = %event.signature(), "skipping anonymous event");
            return;
        }
        let events = self.events.entry((event.topic(), event.indexed_count())).or_default();
        if !events.contains(&event) {
            events.push(event);
        }
    }

    /// Methods registered under `selector`, in registration order.
    pub fn methods(&self, selector: Selector) -> &[MethodEntry] {
        self.methods.get(&selector).map(Vec::as_slice).unwrap_or_default()
    }

    /// All registered methods.
    pub fn iter_methods(&self) -> impl Iterator<Item = &MethodEntry> {
        self.methods.values().flatten()
    }

    /// Events matching a log's first topic and number of indexed topics.
    pub fn events(&self, topic: B256, indexed: usize) -> &[Event] {
        self.events.get(&(topic, indexed)).map(Vec::as_slice).unwrap_or_default()
    }

    /// Decodes `calldata` against the method registered for its selector.
    ///
    /// With an `owner` hint only a method registered under that owner (compared
    /// case-insensitively) is considered, otherwise the first registered one is used.
    #[instrument(target = "calldata::dispatch", level = "debug", skip_all, fields(?owner))]
    pub fn decode_calldata(&self, calldata: &[u8], owner: Option<&str>) -> Result<DecodedCalldata> {
        let Some(selector) = calldata.get(..SELECTOR_LEN) else {
            return Err(DispatchError::MalformedCalldata { len: calldata.len() });
        };
        let selector = Selector::from_slice(selector);

        let candidates = self.methods(selector);
        if candidates.is_empty() {
            return Err(DispatchError::SelectorNotFound(selector));
        }
        let entry = match owner {
            Some(owner) => candidates.iter().find(|c| c.is_owned_by(owner)).ok_or_else(|| {
                DispatchError::OwnerNotFound { selector, owner: owner.to_string() }
            })?,
            None => &candidates[0],
        };

        let method = &entry.method;
        let function_arguments =
            method.decode_named(calldata, DecodingRules::default().strict())?;
        debug!(target: "calldata::dispatch", method = %method.signature(), "decoded calldata");
        Ok(DecodedCalldata {
            function_name: entry.name.clone(),
            function_signature: method.detailed_signature(),
            function_arguments,
        })
    }
}
