//! PlantUML encoding of a diagram.
//!
//! Pure text generation: colours and currency symbol come from the
//! [`StyleConfig`], structure comes from the instruction stream.

use super::label::{format_gas, shorten_address};
use crate::reconstruct::{
    ArrowColor, ArrowShape, Diagram, GasAnnotation, Instruction, ReturnReason,
};
use crate::utils::config::StyleConfig;
use log::info;

/// Encode a diagram as PlantUML source
///
/// **Public** - main entry point for text output
///
/// # Example
/// ```ignore
/// let diagram = build_diagram(&document, &options)?;
/// let puml = encode_plantuml(&diagram, &StyleConfig::default());
/// write_text(&puml, "sequence.puml")?;
/// ```
pub fn encode_plantuml(diagram: &Diagram, style: &StyleConfig) -> String {
    let mut out = String::new();

    out.push_str("@startuml\n");
    if let Some(title) = diagram.title() {
        out.push_str(&format!("title {}\n", escape_text(&title)));
    }

    for instruction in &diagram.instructions {
        out.push_str(&encode_instruction(instruction, style));
        out.push('\n');
    }

    out.push_str("@enduml\n");

    info!(
        "PlantUML generated ({} instructions, {} bytes)",
        diagram.instructions.len(),
        out.len()
    );

    out
}

/// Encode one instruction; multi-line notes become a note block
pub fn encode_instruction(instruction: &Instruction, style: &StyleConfig) -> String {
    match instruction {
        Instruction::Participant { id, name, symbol } => {
            let heading = match (name, symbol) {
                (Some(name), Some(symbol)) => {
                    format!("{} ({})\\n", escape_text(name), escape_text(symbol))
                }
                (Some(name), None) => format!("{}\\n", escape_text(name)),
                (None, Some(symbol)) => format!("{}\\n", escape_text(symbol)),
                (None, None) => String::new(),
            };
            format!(
                "participant \"{}{}\" as {}",
                heading,
                shorten_address(id),
                participant_alias(id)
            )
        }

        Instruction::Call {
            from,
            to,
            shape,
            color,
            label,
            gas,
            ..
        } => {
            let text = format!("{}{}", escape_text(label), gas_suffix(gas.as_ref()));
            let line = format!(
                "{} {} {}",
                participant_alias(from),
                arrow(*shape, *color, style),
                participant_alias(to)
            );
            if text.is_empty() {
                line
            } else {
                format!("{}: {}", line, text)
            }
        }

        Instruction::Value {
            from,
            to,
            color,
            amount,
            gas,
            ..
        } => format!(
            "{} {} {}: {} {}{}",
            participant_alias(from),
            arrow(ArrowShape::DoubleHeaded, *color, style),
            participant_alias(to),
            amount,
            style.native_symbol,
            gas_suffix(gas.as_ref())
        ),

        Instruction::Activate {
            participant,
            delegated,
        } => {
            if *delegated {
                format!(
                    "activate {} {}",
                    participant_alias(participant),
                    style.delegate_lifeline_color
                )
            } else {
                format!("activate {}", participant_alias(participant))
            }
        }

        Instruction::Return { reason, .. } => match reason {
            ReturnReason::SelfDestruct => "return selfdestruct".to_string(),
            ReturnReason::Completed | ReturnReason::DelegateExit => "return".to_string(),
        },

        Instruction::Destroy { participant } => {
            format!("destroy {}", participant_alias(participant))
        }

        Instruction::Note { participant, text } => {
            let placement = style.note_placement.keyword();
            let alias = participant_alias(participant);
            if text.contains('\n') {
                format!("note {} {}\n{}\nend note", placement, alias, text.trim_end())
            } else {
                format!("note {} {}: {}", placement, alias, text)
            }
        }
    }
}

/// PlantUML alias for a participant: identifiers must be alphanumeric
pub fn participant_alias(id: &str) -> String {
    let sanitized: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("p_{}", sanitized)
}

fn arrow(shape: ArrowShape, color: ArrowColor, style: &StyleConfig) -> String {
    let head = match shape {
        ArrowShape::Simple => ">",
        ArrowShape::DoubleHeaded => ">>",
        ArrowShape::Circle => ">o",
        ArrowShape::Slashed => "\\",
    };

    match color {
        ArrowColor::Default => format!("-{}", head),
        ArrowColor::Delegate => format!("-[{}]{}", style.delegate_message_color, head),
    }
}

fn gas_suffix(gas: Option<&GasAnnotation>) -> String {
    match gas {
        Some(GasAnnotation {
            used: Some(used),
            limit: Some(limit),
        }) => format!("\\n{} / {} gas", format_gas(*used), format_gas(*limit)),
        Some(GasAnnotation {
            used: Some(used),
            limit: None,
        }) => format!("\\n{} gas", format_gas(*used)),
        Some(GasAnnotation {
            used: None,
            limit: Some(limit),
        }) => format!("\\nlimit {} gas", format_gas(*limit)),
        _ => String::new(),
    }
}

// Labels are single-line statements; embedded newlines become PlantUML's \n
fn escape_text(text: &str) -> String {
    text.replace('\r', "").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_alias() {
        assert_eq!(participant_alias("0xAbC1"), "p_0xAbC1");
        assert_eq!(participant_alias("vault.eth"), "p_vault_eth");
    }

    #[test]
    fn test_arrow_shapes() {
        let style = StyleConfig::default();
        assert_eq!(arrow(ArrowShape::Simple, ArrowColor::Default, &style), "->");
        assert_eq!(arrow(ArrowShape::DoubleHeaded, ArrowColor::Default, &style), "->>");
        assert_eq!(arrow(ArrowShape::Circle, ArrowColor::Default, &style), "->o");
        assert_eq!(arrow(ArrowShape::Slashed, ArrowColor::Default, &style), "-\\");
        assert_eq!(
            arrow(ArrowShape::Simple, ArrowColor::Delegate, &style),
            "-[#3471CD]>"
        );
    }

    #[test]
    fn test_gas_suffix() {
        let gas = GasAnnotation {
            used: Some(21_000),
            limit: Some(100_000),
        };
        assert_eq!(gas_suffix(Some(&gas)), "\\n21,000 / 100,000 gas");
        assert_eq!(gas_suffix(None), "");
    }

    #[test]
    fn test_multiline_note() {
        let note = Instruction::Note {
            participant: "0xc".to_string(),
            text: "Panic\nassertion failed".to_string(),
        };
        assert_eq!(
            encode_instruction(&note, &StyleConfig::default()),
            "note right of p_0xc\nPanic\nassertion failed\nend note"
        );
    }
}
