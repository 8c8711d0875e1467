//! Locomotion state
//!
//! The character is either settled in one state or handing off between two.
//! States carry the profile slot (grounded, airborne) or the script id
//! (custom) they refer to.
//!
//! # Register encoding
//!
//! Hosts that persist the state as a single `u16` use this layout:
//!
//! | Bits  | Field |
//! |-------|-------|
//! | 0     | idle |
//! | 1-4   | grounded slot |
//! | 5-8   | airborne slot |
//! | 9     | reverse (hand-off runs from the higher field to the lower) |
//! | 10-15 | custom id |
//!
//! A hand-off sets both fields. Fields rank idle < grounded < airborne <
//! custom; the reverse bit marks a hand-off toward the lower rank. A
//! hand-off between two states of the same kind cannot be expressed and is
//! encoded as its target.

use smallvec::SmallVec;
use std::fmt;

pub const RUNNING: u8 = 1;
pub const WALKING: u8 = 2;
pub const CRAWLING: u8 = 3;
/// Airborne slot reserved for falling; jumps use slots 2 and up
pub const FALLING: u8 = 1;

/// Highest grounded or airborne slot
pub const MAX_SLOT: u8 = 15;
/// Highest custom state id
pub const MAX_CUSTOM: u8 = 63;

const IDLE_BIT: u16 = 1;
const GROUNDED_SHIFT: u16 = 1;
const AIRBORNE_SHIFT: u16 = 5;
const REVERSE_BIT: u16 = 1 << 9;
const CUSTOM_SHIFT: u16 = 10;
const SLOT_MASK: u16 = 0xF;
const CUSTOM_MASK: u16 = 0x3F;

/// A settled state, used as either end of a hand-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Idle,
    Grounded(u8),
    Airborne(u8),
    Custom(u8),
}

impl Endpoint {
    fn rank(self) -> u8 {
        match self {
            Endpoint::Idle => 0,
            Endpoint::Grounded(_) => 1,
            Endpoint::Airborne(_) => 2,
            Endpoint::Custom(_) => 3,
        }
    }

    /// Slot or id is inside its field's range
    pub fn is_valid(self) -> bool {
        match self {
            Endpoint::Idle => true,
            Endpoint::Grounded(slot) | Endpoint::Airborne(slot) => (1..=MAX_SLOT).contains(&slot),
            Endpoint::Custom(id) => (1..=MAX_CUSTOM).contains(&id),
        }
    }

    fn bits(self) -> u16 {
        match self {
            Endpoint::Idle => IDLE_BIT,
            Endpoint::Grounded(slot) => (u16::from(slot) & SLOT_MASK) << GROUNDED_SHIFT,
            Endpoint::Airborne(slot) => (u16::from(slot) & SLOT_MASK) << AIRBORNE_SHIFT,
            Endpoint::Custom(id) => (u16::from(id) & CUSTOM_MASK) << CUSTOM_SHIFT,
        }
    }

    /// Jumps performed so far in the current airborne stretch
    pub fn jump_count(self) -> u8 {
        match self {
            Endpoint::Airborne(slot) if slot > FALLING => slot - 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Endpoint::Idle => f.write_str("idle"),
            Endpoint::Grounded(RUNNING) => f.write_str("running"),
            Endpoint::Grounded(WALKING) => f.write_str("walking"),
            Endpoint::Grounded(CRAWLING) => f.write_str("crawling"),
            Endpoint::Grounded(slot) => write!(f, "grounded_{}", slot),
            Endpoint::Airborne(FALLING) => f.write_str("falling"),
            Endpoint::Airborne(slot) => write!(f, "jump_{}", slot.saturating_sub(1)),
            Endpoint::Custom(id) => write!(f, "custom_{}", id),
        }
    }
}

/// Current locomotion state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocomotionState {
    #[default]
    Idle,
    Grounded(u8),
    Airborne(u8),
    Custom(u8),
    /// Hand-off in progress; resolved by the next advance
    Transition { from: Endpoint, to: Endpoint },
}

impl From<Endpoint> for LocomotionState {
    fn from(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Idle => LocomotionState::Idle,
            Endpoint::Grounded(slot) => LocomotionState::Grounded(slot),
            Endpoint::Airborne(slot) => LocomotionState::Airborne(slot),
            Endpoint::Custom(id) => LocomotionState::Custom(id),
        }
    }
}

impl LocomotionState {
    /// The settled state, or the target of a hand-off
    pub fn endpoint(self) -> Endpoint {
        match self {
            LocomotionState::Idle => Endpoint::Idle,
            LocomotionState::Grounded(slot) => Endpoint::Grounded(slot),
            LocomotionState::Airborne(slot) => Endpoint::Airborne(slot),
            LocomotionState::Custom(id) => Endpoint::Custom(id),
            LocomotionState::Transition { to, .. } => to,
        }
    }

    pub fn is_transition(self) -> bool {
        matches!(self, LocomotionState::Transition { .. })
    }

    /// Hand-off toward a lower-ranked state (e.g. landing)
    pub fn reverse(self) -> bool {
        match self {
            LocomotionState::Transition { from, to } => from.rank() > to.rank(),
            _ => false,
        }
    }

    pub fn to_register(self) -> u16 {
        match self {
            LocomotionState::Transition { from, to } if from.rank() == to.rank() => to.bits(),
            LocomotionState::Transition { from, to } => {
                let reverse = if self.reverse() { REVERSE_BIT } else { 0 };
                from.bits() | to.bits() | reverse
            }
            settled => settled.endpoint().bits(),
        }
    }

    /// Decode a register; `None` for layouts no state produces
    pub fn from_register(register: u16) -> Option<Self> {
        let mut fields: SmallVec<[Endpoint; 4]> = SmallVec::new();
        if register & IDLE_BIT != 0 {
            fields.push(Endpoint::Idle);
        }
        let grounded = ((register >> GROUNDED_SHIFT) & SLOT_MASK) as u8;
        if grounded != 0 {
            fields.push(Endpoint::Grounded(grounded));
        }
        let airborne = ((register >> AIRBORNE_SHIFT) & SLOT_MASK) as u8;
        if airborne != 0 {
            fields.push(Endpoint::Airborne(airborne));
        }
        let custom = ((register >> CUSTOM_SHIFT) & CUSTOM_MASK) as u8;
        if custom != 0 {
            fields.push(Endpoint::Custom(custom));
        }
        let reverse = register & REVERSE_BIT != 0;

        // Fields were pushed in rank order
        match (fields.as_slice(), reverse) {
            ([single], false) => Some((*single).into()),
            ([low, high], false) => Some(LocomotionState::Transition { from: *low, to: *high }),
            ([low, high], true) => Some(LocomotionState::Transition { from: *high, to: *low }),
            _ => None,
        }
    }

    /// Name of the hook consulted to complete this hand-off
    pub fn hook_name(self) -> Option<String> {
        match self {
            LocomotionState::Transition { from, to } => Some(transition_hook_name(from, to)),
            _ => None,
        }
    }
}

impl fmt::Display for LocomotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LocomotionState::Transition { from, to } => write!(f, "{} -> {}", from, to),
            settled => fmt::Display::fmt(&settled.endpoint(), f),
        }
    }
}

/// `transition_<from>_to_<to>`
pub fn transition_hook_name(from: Endpoint, to: Endpoint) -> String {
    format!("transition_{}_to_{}", from, to)
}
