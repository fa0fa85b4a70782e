//! Applies the repair core to decoded packets.

use std::borrow::Cow;

use mc_fix_core::{dig, hover, DigDecision, NormalizationOptions, NormalizationRecord};
use mc_fix_proto::packets::{ChatComponents, PlayerAction};
use mc_fix_proto::types::BlockPos;
use tracing::debug;

use crate::config::FixConfig;
use crate::session::PlayerSession;

/// Outcome for an inbound player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundVerdict {
    Pass,
    Drop,
    Rewritten { from: BlockPos, to: BlockPos },
}

/// Stateless apart from configuration: safe to share between connection tasks.
#[derive(Debug, Clone)]
pub struct PacketFilter {
    normalize_hover_events: bool,
    options: NormalizationOptions,
    prevent_unloaded_chunk_dig: bool,
    debug: bool,
}

impl PacketFilter {
    pub fn new(config: &FixConfig) -> Self {
        Self {
            normalize_hover_events: config.normalization.hover_event_uuid.enabled,
            options: config.normalization_options(),
            prevent_unloaded_chunk_dig: config.sanitization.prevent_unloaded_chunk_dig,
            debug: config.debug,
        }
    }

    /// Normalize one chat-component document. Returns the input borrowed
    /// when nothing changed, along with the number of rewritten UUIDs.
    pub fn normalize_component<'a>(&self, json: &'a str) -> (Cow<'a, str>, usize) {
        if !self.normalize_hover_events || json.is_empty() {
            return (Cow::Borrowed(json), 0);
        }

        let mut conversions = 0;
        let debug_enabled = self.debug;
        let mut sink = |record: NormalizationRecord| {
            conversions += 1;
            if debug_enabled {
                debug!(
                    "Normalized hoverEvent UUID {} -> {}",
                    record.original, record.normalized
                );
            }
        };
        let normalized = hover::normalize(json, self.options, Some(&mut sink));
        (normalized, conversions)
    }

    /// Rewrite every chat component of an outbound packet in place.
    /// Returns how many components were replaced.
    pub fn on_outbound(&self, packet: &mut impl ChatComponents) -> usize {
        let mut rewritten = 0;
        for component in packet.chat_components_mut() {
            let replacement = match self.normalize_component(component) {
                (Cow::Owned(text), _) => Some(text),
                (Cow::Borrowed(_), _) => None,
            };
            if let Some(text) = replacement {
                *component = text;
                rewritten += 1;
            }
        }
        rewritten
    }

    pub fn on_player_action(
        &self,
        packet: &mut PlayerAction,
        session: &PlayerSession,
    ) -> InboundVerdict {
        if !self.prevent_unloaded_chunk_dig {
            return InboundVerdict::Pass;
        }

        let decision = dig::evaluate(
            packet.action,
            Some(packet.location),
            session.chunk_checker(),
            Some(session.position_provider()),
        );

        match decision {
            DigDecision::Allow => InboundVerdict::Pass,
            DigDecision::Cancel => {
                if self.debug {
                    debug!(
                        "Cancelled dig packet from {} at {} because the chunk is not loaded",
                        session.name, packet.location
                    );
                }
                InboundVerdict::Drop
            }
            DigDecision::Replace(to) => {
                let from = packet.location;
                packet.location = to;
                if self.debug {
                    debug!(
                        "Replaced dig packet position from {from} to {to} for {}",
                        session.name
                    );
                }
                InboundVerdict::Rewritten { from, to }
            }
        }
    }
}
