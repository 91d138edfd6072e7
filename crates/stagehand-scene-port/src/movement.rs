// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Relative movement commands.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Relative repositioning of a single item.
///
/// Directions follow the front-most-first listing: `Up` moves toward index 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderMovement {
    /// One step toward the front. No-op at the front.
    Up,
    /// One step toward the back. No-op at the back.
    Down,
    /// To index 0.
    Top,
    /// To the last index.
    Bottom,
}

impl OrderMovement {
    /// All movements, in token order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Top, Self::Bottom];

    /// Canonical request token for this movement.
    pub fn token(self) -> &'static str {
        match self {
            Self::Up => "MOVE_UP",
            Self::Down => "MOVE_DOWN",
            Self::Top => "MOVE_TOP",
            Self::Bottom => "MOVE_BOTTOM",
        }
    }
}

impl fmt::Display for OrderMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Token did not name a known movement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order movement '{0}'")]
pub struct UnknownMovement(pub String);

impl FromStr for OrderMovement {
    type Err = UnknownMovement;

    /// Accepts `MOVE_UP` style tokens, with or without the legacy
    /// `OBS_ORDER_` prefix. Matching is exact and case-sensitive.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bare = token.strip_prefix("OBS_ORDER_").unwrap_or(token);
        Self::ALL
            .into_iter()
            .find(|movement| movement.token() == bare)
            .ok_or_else(|| UnknownMovement(token.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_prefixed_tokens() {
        assert_eq!("MOVE_UP".parse(), Ok(OrderMovement::Up));
        assert_eq!("OBS_ORDER_MOVE_BOTTOM".parse(), Ok(OrderMovement::Bottom));
        assert_eq!("OBS_ORDER_MOVE_TOP".parse(), Ok(OrderMovement::Top));
        assert_eq!("MOVE_DOWN".parse(), Ok(OrderMovement::Down));
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = "move_up".parse::<OrderMovement>().unwrap_err();
        assert_eq!(err, UnknownMovement("move_up".into()));
        assert!("OBS_ORDER_".parse::<OrderMovement>().is_err());
        assert!("".parse::<OrderMovement>().is_err());
    }

    #[test]
    fn token_round_trips_through_display() {
        for movement in OrderMovement::ALL {
            assert_eq!(movement.to_string().parse(), Ok(movement));
        }
    }
}
