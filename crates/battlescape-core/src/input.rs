//! Modifier-key state as seen by movement planning.
//!
//! The caller samples the keyboard once per order and hands the resulting
//! [`InputState`] to the pathfinder; the core never polls a device.

// ---------------------------------------------------------------------------
// ModMask
// ---------------------------------------------------------------------------

/// Bitmask of modifier keys held when an order is issued.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    /// Whether this mask contains all bits of `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

/// Snapshot of the three modifiers movement planning cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputState {
    /// Make a flight-capable unit walk for this order (Alt).
    pub force_walk: bool,
    /// Strafe to an adjacent tile, or dash on longer orders (Ctrl).
    pub strafe: bool,
    /// Do not use flight for straight up/down steps (Shift). Gravlifts still
    /// work.
    pub suppress_vertical_flight: bool,
}

impl InputState {
    /// No modifier held.
    pub const NONE: Self = Self {
        force_walk: false,
        strafe: false,
        suppress_vertical_flight: false,
    };

    /// Map held modifier keys to their movement meaning.
    pub const fn from_modifiers(mods: ModMask) -> Self {
        Self {
            force_walk: mods.contains(ModMask::ALT),
            strafe: mods.contains(ModMask::CTRL),
            suppress_vertical_flight: mods.contains(ModMask::SHIFT),
        }
    }
}

impl From<ModMask> for InputState {
    fn from(mods: ModMask) -> Self {
        Self::from_modifiers(mods)
    }
}
