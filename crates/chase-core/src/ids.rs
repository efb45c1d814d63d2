//! Strongly typed identifier wrappers and the agent role tag.
//!
//! IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into `State` vectors via `id.0 as usize`, but callers
//! should prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent within a `State`.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a trajectory within a sampled batch.  Also the stream number
    /// used to derive the trajectory's RNG.
    pub struct TrajectoryId(u32);
}

// ── Role ──────────────────────────────────────────────────────────────────────

/// What an agent does in the chase.  Determines its velocity policy.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// The evader, target of pursuit.
    Sheep,
    /// The pursuer.
    Wolf,
    /// A neutral agent that wanders without interacting.
    Distractor,
}

impl Role {
    /// Standard role layout: agent 0 is the sheep, agent 1 the wolf, every
    /// further agent a distractor.
    pub fn standard_layout(agent_count: usize) -> Vec<Role> {
        (0..agent_count)
            .map(|i| match i {
                0 => Role::Sheep,
                1 => Role::Wolf,
                _ => Role::Distractor,
            })
            .collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Sheep      => "sheep",
            Role::Wolf       => "wolf",
            Role::Distractor => "distractor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
