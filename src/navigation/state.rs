//! Navigation search states
//!
//! The search moves `Init → RootCheck → LevelExpand(1) → … → Found | NotFound`.
use std::fmt;

/// Represents where a navigation search currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// Preparing the target set
    Init,

    /// Rendering the root page and checking it against the targets
    RootCheck,

    /// Building every node at the given level (clicks from the root)
    LevelExpand(u32),

    /// A target was reached
    Found,

    /// No target within the level threshold, or nothing to look for
    NotFound,
}

impl SearchState {
    /// Returns true if the search is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found | Self::NotFound)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: SearchState) -> bool {
        match (self, next) {
            (Self::Init, Self::RootCheck | Self::NotFound) => true,
            (Self::RootCheck, Self::LevelExpand(1) | Self::Found | Self::NotFound) => true,
            (Self::LevelExpand(level), Self::LevelExpand(next_level)) => next_level == level + 1,
            (Self::LevelExpand(_), Self::Found | Self::NotFound) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::RootCheck => write!(f, "root_check"),
            Self::LevelExpand(level) => write!(f, "level_expand({})", level),
            Self::Found => write!(f, "found"),
            Self::NotFound => write!(f, "not_found"),
        }
    }
}
