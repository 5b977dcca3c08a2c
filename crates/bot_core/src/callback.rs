//! Wire codec for button callback payloads.
//!
//! The wire format stays a plain colon-delimited string for interop with the
//! button-rendering side (`flow:<flow>:<verb>[:<value>]`), but it is parsed
//! into a typed [`CallbackAction`] right at the boundary; raw strings never
//! reach step logic.

use crate::flow::Flow;

/// Leading tag of every callback payload.
pub const CALLBACK_TAG: &str = "flow";

/// The verb carried by a callback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackVerb {
    Start,
    Category,
    Cancel,
    Menu,
    Confirm,
}

impl CallbackVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackVerb::Start => "start",
            CallbackVerb::Category => "category",
            CallbackVerb::Cancel => "cancel",
            CallbackVerb::Menu => "menu",
            CallbackVerb::Confirm => "confirm",
        }
    }

    pub fn parse(name: &str) -> Option<CallbackVerb> {
        match name {
            "start" => Some(CallbackVerb::Start),
            "category" => Some(CallbackVerb::Category),
            "cancel" => Some(CallbackVerb::Cancel),
            "menu" => Some(CallbackVerb::Menu),
            "confirm" => Some(CallbackVerb::Confirm),
            _ => None,
        }
    }

    /// Global verbs that do not require a recognizable flow segment.
    pub fn is_flow_agnostic(&self) -> bool {
        matches!(
            self,
            CallbackVerb::Start | CallbackVerb::Menu | CallbackVerb::Cancel
        )
    }
}

/// A decoded button action. Ephemeral: derived per event, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackAction {
    /// `None` when a flow-agnostic verb arrived with an unrecognized flow
    /// segment (e.g. a menu button rendered before any flow was chosen).
    pub flow: Option<Flow>,
    pub verb: CallbackVerb,
    pub value: Option<String>,
}

impl CallbackAction {
    /// Decode a wire payload; `None` for anything malformed.
    ///
    /// Malformed means: fewer than three colon-separated segments, a first
    /// segment other than the literal tag, an unknown verb, or an unknown
    /// flow name on a verb that is not flow-agnostic. Colons past the third
    /// segment belong to the value.
    pub fn decode(wire: &str) -> Option<CallbackAction> {
        let mut segments = wire.splitn(4, ':');
        if segments.next()? != CALLBACK_TAG {
            return None;
        }
        let flow = Flow::parse(segments.next()?);
        let verb = CallbackVerb::parse(segments.next()?)?;
        if flow.is_none() && !verb.is_flow_agnostic() {
            return None;
        }
        let value = segments.next().map(str::to_string);
        Some(CallbackAction { flow, verb, value })
    }
}

/// Encode a button action for the wire.
pub fn encode_action(flow: Flow, verb: CallbackVerb, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{CALLBACK_TAG}:{}:{}:{}", flow.as_str(), verb.as_str(), value),
        None => format!("{CALLBACK_TAG}:{}:{}", flow.as_str(), verb.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_with_and_without_value() {
        assert_eq!(
            encode_action(Flow::Lost, CallbackVerb::Category, Some("pet")),
            "flow:lost:category:pet"
        );
        assert_eq!(
            encode_action(Flow::Found, CallbackVerb::Start, None),
            "flow:found:start"
        );
    }

    #[test]
    fn test_decode_round_trip() {
        let action =
            CallbackAction::decode(&encode_action(Flow::Lost, CallbackVerb::Confirm, Some("edit")))
                .unwrap();
        assert_eq!(action.flow, Some(Flow::Lost));
        assert_eq!(action.verb, CallbackVerb::Confirm);
        assert_eq!(action.value.as_deref(), Some("edit"));
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        assert!(CallbackAction::decode("").is_none());
        assert!(CallbackAction::decode("flow:lost").is_none());
        assert!(CallbackAction::decode("other:lost:start").is_none());
        assert!(CallbackAction::decode("flow:lost:teleport").is_none());
    }

    #[test]
    fn test_unknown_flow_is_malformed_for_step_verbs() {
        assert!(CallbackAction::decode("flow:misplaced:category:pet").is_none());
        assert!(CallbackAction::decode("flow:misplaced:confirm:edit").is_none());
    }

    #[test]
    fn test_global_verbs_tolerate_unknown_flow() {
        for wire in ["flow:any:menu", "flow:any:cancel", "flow:any:start"] {
            let action = CallbackAction::decode(wire).unwrap();
            assert_eq!(action.flow, None);
        }
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        let action = CallbackAction::decode("flow:lost:category:a:b:c").unwrap();
        assert_eq!(action.value.as_deref(), Some("a:b:c"));
    }
}
