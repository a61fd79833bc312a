//! Call-frame reconstruction from a flat interaction trace.
//!
//! The trace carries no "frame closed" markers. Returns are inferred from
//! adjacency: when an event does not originate from where the previous event
//! was headed, execution has unwound past one or more open frames.
//!
//! Example: `A->B`, `B->C`, `B->D` closes the `B->C` frame before drawing
//! `B->D`, because `D`'s caller `B` is not `C`.

use super::instruction::{ArrowColor, ArrowShape, GasAnnotation, Instruction, ReturnReason};
use crate::format::label::{format_amount, format_label};
use crate::parser::{EventKind, InteractionEvent};
use crate::utils::error::ReconstructError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Label drawn on self-destruct arrows
pub const SELF_DESTRUCT_LABEL: &str = "selfdestruct";

/// Rendering options that influence instruction content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Attach gas used/limit to arrows
    pub show_gas: bool,

    /// Include decoded arguments in call labels
    pub show_params: bool,
}

/// The event the next one is compared against for return detection.
///
/// `flow_target` is normally `event.to`. Value transfers and self-destructs
/// override it instead of being recorded as the previous event, so the
/// stored events are never mutated.
#[derive(Debug, Clone, Copy)]
struct PreviousEvent<'a> {
    event: &'a InteractionEvent,
    flow_target: &'a str,
}

/// Replays events one at a time and emits diagram instructions
///
/// **Public** - use [`reconstruct`] unless events arrive incrementally
#[derive(Debug)]
pub struct FrameReconstructor<'a> {
    options: RenderOptions,

    /// Open calls on the real (non-delegated) call path, innermost last
    frames: Vec<&'a InteractionEvent>,

    /// Open delegated activations, in opening order
    delegates: Vec<&'a InteractionEvent>,

    previous: Option<PreviousEvent<'a>>,

    /// Delegated context whose last event has been processed
    pending_delegate_exit: Option<u64>,

    last_id: Option<u64>,

    max_depth: usize,

    instructions: Vec<Instruction>,
}

impl<'a> FrameReconstructor<'a> {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            frames: Vec::new(),
            delegates: Vec::new(),
            previous: None,
            pending_delegate_exit: None,
            last_id: None,
            max_depth: 0,
            instructions: Vec::new(),
        }
    }

    /// Number of currently open frames on the real call path
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Deepest frame stack seen so far
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Instructions emitted so far
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Process the next event in execution order
    ///
    /// # Errors
    /// Any `ReconstructError` leaves the reconstructor in an unspecified
    /// state; the caller is expected to abandon it.
    pub fn process(&mut self, event: &'a InteractionEvent) -> Result<(), ReconstructError> {
        if let Some(previous) = self.last_id {
            if event.id <= previous {
                return Err(ReconstructError::OutOfOrder {
                    previous,
                    current: event.id,
                });
            }
        }

        let returned = self.previous.is_some_and(|prev| {
            prev.flow_target != event.from && prev.event.kind != EventKind::DelegateCall
        });
        if returned {
            self.unwind_to(&event.from);
        }

        if let Some(context) = self.pending_delegate_exit.take() {
            self.close_delegate(context);
        }

        self.check_delegate_context(event)?;

        match event.kind {
            EventKind::Call | EventKind::Create | EventKind::DelegateCall => {
                self.open(event);
                self.previous = Some(PreviousEvent {
                    event,
                    flow_target: &event.to,
                });
            }
            EventKind::ValueTransfer => {
                self.instructions.push(Instruction::Value {
                    event_id: event.id,
                    from: event.from.clone(),
                    to: event.to.clone(),
                    color: arrow_color(event),
                    amount: format_amount(event.amount),
                    gas: self.gas_annotation(event),
                });
                self.annotate_failure(event);
                // Sender is the context execution continues in
                if let Some(prev) = self.previous.as_mut() {
                    prev.flow_target = &event.from;
                }
            }
            EventKind::SelfDestruct => {
                let frame = self
                    .frames
                    .pop()
                    .ok_or(ReconstructError::SelfDestructWithoutFrame(event.id))?;

                self.instructions.push(Instruction::Call {
                    event_id: event.id,
                    from: event.from.clone(),
                    to: event.to.clone(),
                    shape: ArrowShape::for_kind(event.kind),
                    color: arrow_color(event),
                    label: SELF_DESTRUCT_LABEL.to_string(),
                    gas: self.gas_annotation(event),
                });
                self.instructions.push(Instruction::Return {
                    participant: frame.to.clone(),
                    reason: ReturnReason::SelfDestruct,
                });
                self.annotate_failure(event);

                // Control resumes in the destroyed contract's caller
                self.previous = Some(PreviousEvent {
                    event,
                    flow_target: &frame.from,
                });
            }
        }

        if let Some(context) = event.delegate_context.filter(|ctx| ctx.is_last) {
            self.pending_delegate_exit = Some(context.id);
        }
        self.last_id = Some(event.id);

        Ok(())
    }

    /// Close everything still open and return the instruction stream
    ///
    /// Frames and delegated activations are closed together, most recently
    /// opened first.
    pub fn finish(mut self) -> Vec<Instruction> {
        let exited = self.pending_delegate_exit.take();

        loop {
            let frame = self.frames.last().map(|f| f.id);
            let delegate = self.delegates.last().map(|d| d.id);

            match (frame, delegate) {
                (None, None) => break,
                (Some(f), Some(d)) if f > d => self.close_top_frame(),
                (Some(_), None) => self.close_top_frame(),
                (_, Some(d)) => {
                    if exited != Some(d) {
                        warn!("Delegated context {} never reached its last event", d);
                    }
                    self.close_delegate(d);
                }
            }
        }

        debug!(
            "Reconstruction finished: {} instructions, max depth {}",
            self.instructions.len(),
            self.max_depth
        );

        self.instructions
    }

    /// Emit the arrow and activation for a call-like event
    fn open(&mut self, event: &'a InteractionEvent) {
        self.instructions.push(Instruction::Call {
            event_id: event.id,
            from: event.from.clone(),
            to: event.to.clone(),
            shape: ArrowShape::for_kind(event.kind),
            color: arrow_color(event),
            label: format_label(event, self.options.show_params),
            gas: self.gas_annotation(event),
        });

        let opens_frame = event.kind.opens_frame();
        self.instructions.push(Instruction::Activate {
            participant: event.to.clone(),
            delegated: !opens_frame,
        });

        if opens_frame {
            self.frames.push(event);
            self.max_depth = self.max_depth.max(self.frames.len());
        } else {
            self.delegates.push(event);
        }
    }

    /// Pop frames until one whose caller is `origin` has been closed
    fn unwind_to(&mut self, origin: &str) {
        let before = self.frames.len();

        while let Some(frame) = self.frames.pop() {
            self.close_frame(frame);
            if frame.from == origin {
                break;
            }
        }

        debug!("Unwound {} frame(s) back to {}", before - self.frames.len(), origin);
    }

    fn close_top_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.close_frame(frame);
        }
    }

    fn close_frame(&mut self, frame: &InteractionEvent) {
        self.close_lifeline(frame, ReturnReason::Completed);
    }

    fn close_delegate(&mut self, context: u64) {
        match self.delegates.iter().rposition(|d| d.id == context) {
            Some(index) => {
                let opened_by = self.delegates.remove(index);
                self.close_lifeline(opened_by, ReturnReason::DelegateExit);
            }
            None => debug!("Delegated context {} already closed", context),
        }
    }

    /// Return on success, destroy on failure, then the error note if any
    fn close_lifeline(&mut self, opened_by: &InteractionEvent, reason: ReturnReason) {
        if opened_by.succeeded {
            self.instructions.push(Instruction::Return {
                participant: opened_by.to.clone(),
                reason,
            });
        } else {
            self.instructions.push(Instruction::Destroy {
                participant: opened_by.to.clone(),
            });
        }

        if let Some(message) = &opened_by.error_message {
            self.instructions.push(Instruction::Note {
                participant: opened_by.to.clone(),
                text: message.clone(),
            });
        }
    }

    /// Events that never open a lifeline carry their failure as a note on the target
    fn annotate_failure(&mut self, event: &InteractionEvent) {
        if event.succeeded {
            return;
        }
        if let Some(message) = &event.error_message {
            self.instructions.push(Instruction::Note {
                participant: event.to.clone(),
                text: message.clone(),
            });
        }
    }

    /// A delegate context must name an open delegate call, or the event itself
    fn check_delegate_context(&self, event: &InteractionEvent) -> Result<(), ReconstructError> {
        let Some(context) = event.delegate_context else {
            return Ok(());
        };

        if context.id == event.id {
            if event.kind != EventKind::DelegateCall {
                return Err(ReconstructError::InvalidDelegateOpening {
                    event: event.id,
                    context: context.id,
                });
            }
            return Ok(());
        }

        if self.delegates.iter().any(|d| d.id == context.id) {
            Ok(())
        } else {
            Err(ReconstructError::UnknownDelegateContext {
                event: event.id,
                context: context.id,
            })
        }
    }

    fn gas_annotation(&self, event: &InteractionEvent) -> Option<GasAnnotation> {
        if !self.options.show_gas || (event.gas_used.is_none() && event.gas_limit.is_none()) {
            return None;
        }
        Some(GasAnnotation {
            used: event.gas_used,
            limit: event.gas_limit,
        })
    }
}

fn arrow_color(event: &InteractionEvent) -> ArrowColor {
    if event.is_delegated() {
        ArrowColor::Delegate
    } else {
        ArrowColor::Default
    }
}

/// Reconstruct the instruction stream for a complete event sequence
///
/// **Public** - main entry point for reconstruction
///
/// # Arguments
/// * `events` - Events in execution order (never reordered here)
/// * `options` - Gas and parameter display switches
///
/// # Errors
/// * `ReconstructError` - The sequence is structurally inconsistent
pub fn reconstruct(
    events: &[InteractionEvent],
    options: &RenderOptions,
) -> Result<Vec<Instruction>, ReconstructError> {
    debug!("Reconstructing call frames from {} events", events.len());

    let mut reconstructor = FrameReconstructor::new(*options);
    for event in events {
        reconstructor.process(event)?;
    }

    Ok(reconstructor.finish())
}
