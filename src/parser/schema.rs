//! Input schema for interaction traces.
//!
//! These types mirror the JSON documents produced by the upstream trace
//! collector. They are read-only as far as reconstruction is concerned.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of interaction recorded in the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(alias = "Value", alias = "value", alias = "valueTransfer", alias = "value_transfer")]
    ValueTransfer,
    #[serde(alias = "call", alias = "StaticCall", alias = "staticcall", alias = "staticCall")]
    Call,
    #[serde(alias = "create", alias = "Create2", alias = "create2")]
    Create,
    #[serde(
        alias = "Selfdestruct",
        alias = "selfdestruct",
        alias = "selfDestruct",
        alias = "self_destruct"
    )]
    SelfDestruct,
    #[serde(
        alias = "Delegatecall",
        alias = "delegatecall",
        alias = "delegateCall",
        alias = "delegate_call"
    )]
    DelegateCall,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::ValueTransfer,
        EventKind::Call,
        EventKind::Create,
        EventKind::SelfDestruct,
        EventKind::DelegateCall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ValueTransfer => "ValueTransfer",
            EventKind::Call => "Call",
            EventKind::Create => "Create",
            EventKind::SelfDestruct => "SelfDestruct",
            EventKind::DelegateCall => "DelegateCall",
        }
    }

    /// Kinds that open a frame on the real call stack
    pub fn opens_frame(&self) -> bool {
        matches!(self, EventKind::Call | EventKind::Create)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks an event as executing inside a delegated context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateContext {
    /// Id of the delegate call event that opened the context
    pub id: u64,

    /// Final event of the delegated context's lifetime
    #[serde(default)]
    pub is_last: bool,
}

/// A decoded function argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,

    /// Solidity type, e.g. `address`, `uint256`, `address[]`
    #[serde(rename = "type")]
    pub param_type: String,

    pub value: serde_json::Value,
}

/// Decoded call data for an event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionLabel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,

    /// 4-byte function selector (hex)
    #[serde(default)]
    pub selector: String,

    #[serde(default)]
    pub args: Vec<Param>,
}

/// A single interaction from the trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    /// Sequence number, strictly increasing in emission order
    pub id: u64,

    pub kind: EventKind,

    pub from: String,

    pub to: String,

    /// Enclosing event (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_context: Option<DelegateContext>,

    /// Transferred value in wei
    #[serde(default, with = "quantity")]
    pub amount: u128,

    #[serde(default, with = "quantity::optional")]
    pub gas_used: Option<u64>,

    #[serde(default, with = "quantity::optional")]
    pub gas_limit: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<FunctionLabel>,

    #[serde(default = "default_succeeded")]
    pub succeeded: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

fn default_succeeded() -> bool {
    true
}

impl InteractionEvent {
    /// Create a successful event with no value, gas or label
    pub fn new(id: u64, kind: EventKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            from: from.into(),
            to: to.into(),
            parent_id: None,
            delegate_context: None,
            amount: 0,
            gas_used: None,
            gas_limit: None,
            label: None,
            succeeded: true,
            error_message: None,
        }
    }

    pub fn with_amount(mut self, amount: u128) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_gas(mut self, used: u64, limit: u64) -> Self {
        self.gas_used = Some(used);
        self.gas_limit = Some(limit);
        self
    }

    pub fn with_label(mut self, label: FunctionLabel) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn in_delegate(mut self, context: u64, is_last: bool) -> Self {
        self.delegate_context = Some(DelegateContext { id: context, is_last });
        self
    }

    /// Mark the event as reverted, optionally with a reason
    pub fn failed(mut self, error_message: Option<&str>) -> Self {
        self.succeeded = false;
        self.error_message = error_message.map(str::to_string);
        self
    }

    pub fn is_delegated(&self) -> bool {
        self.delegate_context.is_some()
    }

    pub fn closes_delegate_context(&self) -> bool {
        self.delegate_context.is_some_and(|ctx| ctx.is_last)
    }
}

/// Transaction-level metadata used for the diagram title
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionMeta {
    pub hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Display metadata for a participant address
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticipantMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// A complete trace document as handed over by the collector
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionMeta>,

    #[serde(default)]
    pub participants: BTreeMap<String, ParticipantMeta>,

    pub events: Vec<InteractionEvent>,
}

impl TraceDocument {
    /// Look up participant metadata, falling back to a lowercase address match
    pub fn participant(&self, address: &str) -> Option<&ParticipantMeta> {
        self.participants
            .get(address)
            .or_else(|| self.participants.get(&address.to_lowercase()))
    }
}

/// Serde helpers for numeric quantities given as JSON numbers, decimal
/// strings, or `0x` hex strings.
pub mod quantity {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    /// Parse a quantity from hex (`0x` prefix) or decimal text
    pub fn parse_quantity(value: &str) -> Result<u128, String> {
        let value = value.trim();
        if let Some(hex_str) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
            if hex_str.is_empty() {
                return Ok(0);
            }
            u128::from_str_radix(hex_str, 16).map_err(|e| format!("Invalid hex quantity: {}", e))
        } else {
            value
                .parse::<u128>()
                .map_err(|e| format!("Invalid decimal quantity: {}", e))
        }
    }

    struct QuantityVisitor;

    impl<'de> Visitor<'de> for QuantityVisitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer, decimal string, or 0x hex string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(v as u128)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            u128::try_from(v).map_err(|_| E::custom(format!("negative quantity: {}", v)))
        }

        // Integers beyond u64 come through serde_json::Value as floats
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u128, E> {
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < 2f64.powi(128) {
                Ok(v as u128)
            } else {
                Err(E::custom(format!("not an integer quantity: {}", v)))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            parse_quantity(v).map_err(E::custom)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }

    /// Amounts are written as decimal strings so they survive JSON readers
    /// limited to 64-bit integers.
    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub mod optional {
        use super::QuantityVisitor;
        use serde::de::{self, Visitor};
        use serde::{Deserializer, Serializer};
        use std::fmt;

        struct OptionalVisitor;

        impl<'de> Visitor<'de> for OptionalVisitor {
            type Value = Option<u64>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an optional 64-bit quantity")
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                let value = d.deserialize_any(QuantityVisitor)?;
                u64::try_from(value)
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("quantity {} exceeds 64 bits", value)))
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<u64>, D::Error> {
            deserializer.deserialize_option(OptionalVisitor)
        }

        pub fn serialize<S: Serializer>(
            value: &Option<u64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_some(v),
                None => serializer.serialize_none(),
            }
        }
    }
}
