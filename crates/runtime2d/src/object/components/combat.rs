//! Combat components for player- and enemy-controlled objects.
//!
//! Defaults are deliberately conservative: one hit point, zero damage,
//! so a half-parsed record can never spawn something lethal.

use crate::object::component::{Fields, ParseError};

/// Combat state for the player object.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCombat {
    /// Current hit points.
    pub health: f32,
    /// Hit point ceiling for pickups and healing.
    pub max_health: f32,
    /// Damage dealt per attack.
    pub damage: f32,
    /// Seconds of invulnerability after taking a hit.
    pub invulnerable_time: f32,
}

impl Default for PlayerCombat {
    fn default() -> Self {
        Self {
            health: 1.0,
            max_health: 1.0,
            damage: 0.0,
            invulnerable_time: 0.0,
        }
    }
}

impl PlayerCombat {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Health: {}\n", self.health));
        out.push_str(&format!("Max Health: {}\n", self.max_health));
        out.push_str(&format!("Damage: {}\n", self.damage));
        out.push_str(&format!("Invulnerable Time: {}\n", self.invulnerable_time));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.health = fields.f32_field("Health")?;
        self.max_health = fields.f32_field("Max Health")?;
        self.damage = fields.f32_field("Damage")?;
        self.invulnerable_time = fields.f32_field("Invulnerable Time")?;
        Ok(())
    }
}

/// Combat state for an enemy object.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyCombat {
    /// Current hit points.
    pub health: f32,
    /// Damage dealt on contact or attack.
    pub damage: f32,
    /// Radius within which the enemy notices the player; 0 is passive.
    pub aggro_radius: f32,
}

impl Default for EnemyCombat {
    fn default() -> Self {
        Self {
            health: 1.0,
            damage: 0.0,
            aggro_radius: 0.0,
        }
    }
}

impl EnemyCombat {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Health: {}\n", self.health));
        out.push_str(&format!("Damage: {}\n", self.damage));
        out.push_str(&format!("Aggro Radius: {}\n", self.aggro_radius));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.health = fields.f32_field("Health")?;
        self.damage = fields.f32_field("Damage")?;
        self.aggro_radius = fields.f32_field("Aggro Radius")?;
        Ok(())
    }
}
