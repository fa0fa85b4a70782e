//! Play-state packets that carry data the fix layer repairs.

pub mod player_action;
pub mod system_chat;
pub mod tab_list;

pub use player_action::{PlayerAction, PlayerActionType};
pub use system_chat::SystemChat;
pub use tab_list::TabListHeaderFooter;

/// Clientbound packets whose fields hold chat-component JSON.
///
/// Components are yielded in wire order so callers can rewrite them in place.
pub trait ChatComponents {
    fn chat_components_mut(&mut self) -> Vec<&mut String>;
}

impl ChatComponents for SystemChat {
    fn chat_components_mut(&mut self) -> Vec<&mut String> {
        vec![&mut self.content]
    }
}

impl ChatComponents for TabListHeaderFooter {
    fn chat_components_mut(&mut self) -> Vec<&mut String> {
        vec![&mut self.header, &mut self.footer]
    }
}
