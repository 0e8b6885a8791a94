/// Game options the movement planner reads.
///
/// With the `serde` feature, missing fields fall back to their defaults so
/// partial option files load.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PathOptions {
    /// Allow strafing to adjacent tiles and dashing on longer orders.
    pub strafe: bool,
    /// Hostile units avoid tiles the player can currently see.
    pub sneaky_ai: bool,
}

impl PathOptions {
    pub fn with_strafe(mut self, strafe: bool) -> Self {
        self.strafe = strafe;
        self
    }

    pub fn with_sneaky_ai(mut self, sneaky_ai: bool) -> Self {
        self.sneaky_ai = sneaky_ai;
        self
    }
}
