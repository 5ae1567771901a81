/// Combat tuning parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Initiative a character must strictly exceed to be granted a turn.
    /// Acting costs `speed_threshold + 1` speed units.
    pub speed_threshold: f32,

    /// Health at or below which a character dies.
    pub death_threshold: f32,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SPEED_THRESHOLD: f32 = 999.0;
    pub const DEFAULT_DEATH_THRESHOLD: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            speed_threshold: Self::DEFAULT_SPEED_THRESHOLD,
            death_threshold: Self::DEFAULT_DEATH_THRESHOLD,
        }
    }

    /// Speed units deducted from the actor granted a turn.
    pub fn turn_cost(&self) -> f32 {
        self.speed_threshold + 1.0
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
