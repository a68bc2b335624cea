//! Fighter skill ratings and action tendencies

use serde::{Deserialize, Serialize};

/// Skill attributes on a 0-100 scale
///
/// Every field defaults to 0 so partially filled records still simulate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    /// Work rate; drives how often the fighter gets to act
    pub output: f64,
    pub power: f64,
    pub speed: f64,

    pub hand_speed: f64,
    pub punch_accuracy: f64,
    pub punch_power: f64,
    pub kick_accuracy: f64,
    pub kick_power: f64,

    pub blocking: f64,
    pub head_movement: f64,
    pub footwork: f64,
    pub kick_defence: f64,

    pub clinch_offence: f64,
    pub clinch_defence: f64,
    pub clinch_striking: f64,

    pub takedown_offence: f64,
    pub takedown_defence: f64,

    pub ground_offence: f64,
    pub ground_defence: f64,
    pub ground_striking: f64,

    pub submission_offence: f64,
    pub submission_defence: f64,

    pub chin: f64,
    pub toughness: f64,
    pub leg_durability: f64,
    pub cardio: f64,
    pub recovery: f64,
}

impl Rating {
    /// A rating with every attribute set to the same value
    pub fn uniform(value: f64) -> Self {
        let v = value.clamp(0.0, 100.0);
        Rating {
            output: v,
            power: v,
            speed: v,
            hand_speed: v,
            punch_accuracy: v,
            punch_power: v,
            kick_accuracy: v,
            kick_power: v,
            blocking: v,
            head_movement: v,
            footwork: v,
            kick_defence: v,
            clinch_offence: v,
            clinch_defence: v,
            clinch_striking: v,
            takedown_offence: v,
            takedown_defence: v,
            ground_offence: v,
            ground_defence: v,
            ground_striking: v,
            submission_offence: v,
            submission_defence: v,
            chin: v,
            toughness: v,
            leg_durability: v,
            cardio: v,
            recovery: v,
        }
    }

    /// Clamp every attribute into 0-100, mapping NaN to 0
    pub fn normalized(mut self) -> Self {
        for value in self.values_mut() {
            *value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) };
        }
        self
    }

    fn values_mut(&mut self) -> [&mut f64; 27] {
        [
            &mut self.output,
            &mut self.power,
            &mut self.speed,
            &mut self.hand_speed,
            &mut self.punch_accuracy,
            &mut self.punch_power,
            &mut self.kick_accuracy,
            &mut self.kick_power,
            &mut self.blocking,
            &mut self.head_movement,
            &mut self.footwork,
            &mut self.kick_defence,
            &mut self.clinch_offence,
            &mut self.clinch_defence,
            &mut self.clinch_striking,
            &mut self.takedown_offence,
            &mut self.takedown_defence,
            &mut self.ground_offence,
            &mut self.ground_defence,
            &mut self.ground_striking,
            &mut self.submission_offence,
            &mut self.submission_defence,
            &mut self.chin,
            &mut self.toughness,
            &mut self.leg_durability,
            &mut self.cardio,
            &mut self.recovery,
        ]
    }
}

/// Standing action-selection weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tendency {
    pub punching: f64,
    pub kicking: f64,
    pub clinching: f64,
    pub takedowns: f64,
}

impl Default for Tendency {
    fn default() -> Self {
        Tendency {
            punching: 25.0,
            kicking: 25.0,
            clinching: 25.0,
            takedowns: 25.0,
        }
    }
}

impl Tendency {
    /// Negative or NaN weights are treated as zero; an all-zero block falls
    /// back to the flat default split
    pub fn normalized(self) -> Self {
        let fix = |w: f64| if w.is_nan() || w < 0.0 { 0.0 } else { w };
        let t = Tendency {
            punching: fix(self.punching),
            kicking: fix(self.kicking),
            clinching: fix(self.clinching),
            takedowns: fix(self.takedowns),
        };
        if t.punching + t.kicking + t.clinching + t.takedowns <= 0.0 {
            Tendency::default()
        } else {
            t
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_defaults_to_zero() {
        let rating: Rating = serde_json::from_str(r#"{"power": 80}"#).unwrap();
        assert_eq!(rating.power, 80.0);
        assert_eq!(rating.chin, 0.0);
    }

    #[test]
    fn test_rating_normalization_clamps() {
        let rating = Rating {
            power: 140.0,
            chin: -3.0,
            cardio: f64::NAN,
            ..Rating::default()
        }
        .normalized();
        assert_eq!(rating.power, 100.0);
        assert_eq!(rating.chin, 0.0);
        assert_eq!(rating.cardio, 0.0);
    }

    #[test]
    fn test_tendency_default_is_flat() {
        let t = Tendency::default();
        assert_eq!(t.punching, 25.0);
        assert_eq!(t.takedowns, 25.0);
    }

    #[test]
    fn test_zero_tendency_falls_back() {
        let t = Tendency {
            punching: 0.0,
            kicking: -5.0,
            clinching: 0.0,
            takedowns: 0.0,
        }
        .normalized();
        assert_eq!(t, Tendency::default());
    }
}
