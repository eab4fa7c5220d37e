use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const KB_LEFT: u8 = 1 << 0;
pub const KB_RIGHT: u8 = 1 << 1;
pub const KB_BACK: u8 = 1 << 2;
pub const KB_FRONT: u8 = 1 << 3;

/// Directional commands that were *just pressed* this tick.
///
/// Edge-triggered: the host sets a bit only on the tick the key goes down.
#[derive(Clone, Component, Copy, Default, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RigKeys {
    pub key_bits: u8,
}

/// A single directional command, in the order the rig consumes them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RigCommand {
    Left,
    Right,
    Back,
    Front,
}

impl RigCommand {
    pub const ALL: [RigCommand; 4] = [RigCommand::Left, RigCommand::Right, RigCommand::Back, RigCommand::Front];

    pub fn bit(self) -> u8 {
        match self {
            RigCommand::Left => KB_LEFT,
            RigCommand::Right => KB_RIGHT,
            RigCommand::Back => KB_BACK,
            RigCommand::Front => KB_FRONT,
        }
    }
}

impl RigKeys {
    pub fn is_pressed(&self, key: u8) -> bool {
        self.key_bits & key != 0
    }

    pub fn set_pressed<T>(&mut self, keys: T, pressed: bool)
    where T : IntoIterator<Item = u8>, {
        for k in keys.into_iter() {
            if pressed { self.key_bits |= k; }
            else { self.key_bits &= !k; }
        }
    }

    pub fn with(mut self, command: RigCommand) -> Self {
        self.key_bits |= command.bit();
        self
    }

    /// Commands pressed this tick, in processing order.
    pub fn commands(self) -> impl Iterator<Item = RigCommand> {
        RigCommand::ALL.into_iter().filter(move |c| self.is_pressed(c.bit()))
    }
}

impl From<RigCommand> for RigKeys {
    fn from(value: RigCommand) -> Self {
        RigKeys::default().with(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_iterate_in_fixed_order() {
        let keys = RigKeys::default().with(RigCommand::Front).with(RigCommand::Left);
        let cmds: Vec<_> = keys.commands().collect();
        assert_eq!(cmds, vec![RigCommand::Left, RigCommand::Front]);
    }

    #[test]
    fn test_set_pressed_clears_bits() {
        let mut keys = RigKeys::from(RigCommand::Back);
        keys.set_pressed([KB_BACK, KB_RIGHT], true);
        assert!(keys.is_pressed(KB_RIGHT));
        keys.set_pressed([KB_BACK], false);
        assert!(!keys.is_pressed(KB_BACK));
        assert_eq!(keys.commands().count(), 1);
    }
}
