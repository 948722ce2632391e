//! Keyboard navigation.
//!
//! Down-arrow and space advance, up-arrow retreats, escape jumps to the
//! last scene. Space is only navigation when no control has focus (the
//! host reports that). Advancing/retreating clamps at the sequence
//! boundaries and produces no scroll when already there.

use crate::scene::SceneId;

/// Keys the experience reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    ArrowDown,
    ArrowUp,
    Space,
    Escape,
}

/// A navigation intent derived from a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    Last,
}

/// Map a key to a navigation command. `control_focused` suppresses space
/// (it activates the focused control instead).
pub fn command_for_key(key: InputKey, control_focused: bool) -> Option<NavCommand> {
    match key {
        InputKey::ArrowDown => Some(NavCommand::Next),
        InputKey::Space if !control_focused => Some(NavCommand::Next),
        InputKey::Space => None,
        InputKey::ArrowUp => Some(NavCommand::Prev),
        InputKey::Escape => Some(NavCommand::Last),
    }
}

/// Resolve a command against the current scene. `None` means no transition
/// (already at a boundary).
pub fn target_for(current: SceneId, command: NavCommand) -> Option<SceneId> {
    match command {
        NavCommand::Next => {
            let target = current.next();
            (target != current).then_some(target)
        }
        NavCommand::Prev => {
            let target = current.prev();
            (target != current).then_some(target)
        }
        NavCommand::Last => Some(SceneId::last()),
    }
}
