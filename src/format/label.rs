//! Stateless text helpers used when building instructions.
//!
//! Address shortening, amount scaling, gas formatting and function-label
//! rendering. Nothing here knows about frames or ordering.

use crate::parser::{EventKind, InteractionEvent, Param};
use crate::utils::config::{
    ADDRESS_PREFIX_CHARS, ADDRESS_SUFFIX_CHARS, DISPLAY_DECIMALS, WEI_DECIMALS,
};

/// Label used for contract creation regardless of decoded call data
pub const CONSTRUCTOR_LABEL: &str = "constructor";

/// Shorten an address to `0x1234..abcd`
///
/// Identifiers too short to benefit are returned unchanged.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= ADDRESS_PREFIX_CHARS + ADDRESS_SUFFIX_CHARS + 2 {
        return address.to_string();
    }

    let prefix: String = chars[..ADDRESS_PREFIX_CHARS].iter().collect();
    let suffix: String = chars[chars.len() - ADDRESS_SUFFIX_CHARS..].iter().collect();
    format!("{}..{}", prefix, suffix)
}

/// Scale a wei amount to ether with two decimals, rounding half up
///
/// # Example
/// ```ignore
/// assert_eq!(format_amount(1_000_000_000_000_000_000), "1.00");
/// assert_eq!(format_amount(1_234_567_000_000_000_000), "1.23");
/// ```
pub fn format_amount(wei: u128) -> String {
    let unit = 10u128.pow(WEI_DECIMALS - DISPLAY_DECIMALS);
    let scale = 10u128.pow(DISPLAY_DECIMALS);

    let mut scaled = wei / unit;
    if (wei % unit) * 2 >= unit {
        scaled += 1;
    }

    format!(
        "{}.{:0width$}",
        scaled / scale,
        scaled % scale,
        width = DISPLAY_DECIMALS as usize
    )
}

/// Format gas with thousands separators (`1234567` -> `1,234,567`)
pub fn format_gas(gas: u64) -> String {
    let digits = gas.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Render a single argument value
///
/// Arrays are rendered element by element using the element type, so
/// `address[]` values are shortened too. Tuples arrive as JSON objects.
pub fn format_param_value(param_type: &str, value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Array(items) => {
            let element_type = element_type(param_type);
            let rendered: Vec<String> = items
                .iter()
                .map(|item| format_param_value(element_type, item))
                .collect();
            format!("[{}]", rendered.join(", "))
        }
        serde_json::Value::Object(fields) => {
            let rendered: Vec<String> = fields
                .iter()
                .map(|(name, v)| format!("{}: {}", name, format_param_value("", v)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        serde_json::Value::String(s) if param_type == "address" => shorten_address(s),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

// "address[]" -> "address", "uint256[2][]" -> "uint256[2]"
fn element_type(param_type: &str) -> &str {
    match param_type.rfind('[') {
        Some(pos) if param_type.ends_with(']') => &param_type[..pos],
        _ => param_type,
    }
}

/// Render arguments as `name: value` pairs in declaration order
pub fn format_params(args: &[Param]) -> String {
    args.iter()
        .map(|param| {
            let value = format_param_value(&param.param_type, &param.value);
            if param.name.is_empty() {
                value
            } else {
                format!("{}: {}", param.name, value)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the arrow label for an event
///
/// Function name if decoded, else the raw selector, else empty. Creations
/// always read as a constructor invocation.
pub fn format_label(event: &InteractionEvent, show_params: bool) -> String {
    let name = match (&event.kind, &event.label) {
        (EventKind::Create, _) => CONSTRUCTOR_LABEL.to_string(),
        (_, Some(label)) => label
            .function_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| label.selector.clone()),
        (_, None) => String::new(),
    };

    match &event.label {
        Some(label) if show_params && !label.args.is_empty() => {
            format!("{}({})", name, format_params(&label.args))
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FunctionLabel;
    use serde_json::json;

    const ALICE: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";

    #[test]
    fn test_shorten_address() {
        assert_eq!(shorten_address(ALICE), "0x71C7..976F");
        assert_eq!(shorten_address("0xabc"), "0xabc");
    }

    #[test]
    fn test_format_amount_rounding() {
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_amount(1_000_000_000_000_000_000), "1.00");
        assert_eq!(format_amount(1_234_567_000_000_000_000), "1.23");
        assert_eq!(format_amount(5_000_000_000_000_000), "0.01");
        assert_eq!(format_amount(4_999_999_999_999_999), "0.00");
        assert_eq!(format_amount(995_000_000_000_000_000), "1.00");
    }

    #[test]
    fn test_format_gas() {
        assert_eq!(format_gas(0), "0");
        assert_eq!(format_gas(999), "999");
        assert_eq!(format_gas(1000), "1,000");
        assert_eq!(format_gas(1_234_567), "1,234,567");
    }

    #[test]
    fn test_param_values() {
        assert_eq!(format_param_value("address", &json!(ALICE)), "0x71C7..976F");
        assert_eq!(
            format_param_value("address[]", &json!([ALICE, ALICE])),
            "[0x71C7..976F, 0x71C7..976F]"
        );
        assert_eq!(format_param_value("uint256", &json!("1000")), "1000");
        assert_eq!(format_param_value("bool", &json!(true)), "true");
        assert_eq!(format_param_value("uint8[2][]", &json!([[1, 2]])), "[[1, 2]]");
    }

    #[test]
    fn test_label_fallbacks() {
        let mut event = InteractionEvent::new(1, EventKind::Call, "0xa", "0xb");
        assert_eq!(format_label(&event, false), "");

        event.label = Some(FunctionLabel {
            function_name: None,
            selector: "0xa9059cbb".to_string(),
            args: vec![],
        });
        assert_eq!(format_label(&event, true), "0xa9059cbb");

        let create = InteractionEvent::new(2, EventKind::Create, "0xa", "0xc").with_label(
            FunctionLabel {
                function_name: Some("initialize".to_string()),
                selector: String::new(),
                args: vec![],
            },
        );
        assert_eq!(format_label(&create, false), CONSTRUCTOR_LABEL);
    }

    #[test]
    fn test_label_with_params() {
        let event = InteractionEvent::new(1, EventKind::Call, "0xa", "0xb").with_label(
            FunctionLabel {
                function_name: Some("transfer".to_string()),
                selector: "0xa9059cbb".to_string(),
                args: vec![
                    Param {
                        name: "to".to_string(),
                        param_type: "address".to_string(),
                        value: json!(ALICE),
                    },
                    Param {
                        name: "amount".to_string(),
                        param_type: "uint256".to_string(),
                        value: json!("500"),
                    },
                ],
            },
        );

        assert_eq!(format_label(&event, false), "transfer");
        assert_eq!(
            format_label(&event, true),
            "transfer(to: 0x71C7..976F, amount: 500)"
        );
    }
}
