use std::collections::HashSet;

use serde::Serialize;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 80;

/// Age used when no profile was completed.
pub const DEFAULT_AGE: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Hypertension,
    Diabetes,
    HighCholesterol,
    HeartDisease,
    KidneyDisease,
    Obesity,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Condition::Hypertension,
        Condition::Diabetes,
        Condition::HighCholesterol,
        Condition::HeartDisease,
        Condition::KidneyDisease,
        Condition::Obesity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Hypertension => "Hypertension",
            Condition::Diabetes => "Diabetes",
            Condition::HighCholesterol => "High Cholesterol",
            Condition::HeartDisease => "Heart Disease",
            Condition::KidneyDisease => "Kidney Disease",
            Condition::Obesity => "Obesity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allergy {
    Peanut,
    Gluten,
    Lactose,
    Soy,
    Egg,
}

impl Allergy {
    pub const ALL: [Allergy; 5] = [
        Allergy::Peanut,
        Allergy::Gluten,
        Allergy::Lactose,
        Allergy::Soy,
        Allergy::Egg,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Allergy::Peanut => "Peanut",
            Allergy::Gluten => "Gluten",
            Allergy::Lactose => "Dairy",
            Allergy::Soy => "Soy",
            Allergy::Egg => "Egg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    HighProtein,
    LowCarb,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::HighProtein,
        Goal::LowCarb,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::HighProtein => "High Protein",
            Goal::LowCarb => "Low Carb",
        }
    }
}

/// Four independent fitness-goal flags. Not mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Goals {
    pub weight_loss: bool,
    pub muscle_gain: bool,
    pub high_protein: bool,
    pub low_carb: bool,
}

impl Goals {
    pub fn toggle(&mut self, goal: Goal) {
        let flag = match goal {
            Goal::WeightLoss => &mut self.weight_loss,
            Goal::MuscleGain => &mut self.muscle_gain,
            Goal::HighProtein => &mut self.high_protein,
            Goal::LowCarb => &mut self.low_carb,
        };
        *flag = !*flag;
    }

    pub fn is_set(&self, goal: Goal) -> bool {
        match goal {
            Goal::WeightLoss => self.weight_loss,
            Goal::MuscleGain => self.muscle_gain,
            Goal::HighProtein => self.high_protein,
            Goal::LowCarb => self.low_carb,
        }
    }
}

/// A single session's stated health attributes. Produced by the wizard and
/// then treated as read-only; absence of a profile is represented by the
/// caller holding `None`, never by a sentinel empty value.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthProfile {
    pub age: u8,
    pub conditions: HashSet<Condition>,
    pub allergies: HashSet<Allergy>,
    pub goals: Goals,
}

impl Default for HealthProfile {
    fn default() -> Self {
        HealthProfile {
            age: DEFAULT_AGE,
            conditions: HashSet::new(),
            allergies: HashSet::new(),
            goals: Goals::default(),
        }
    }
}

/// Clamp an arbitrary integer into the supported age range.
pub fn clamp_age(value: i64) -> u8 {
    value.clamp(i64::from(MIN_AGE), i64::from(MAX_AGE)) as u8
}

/// Map a dial angle in degrees to an age. A full turn spans the whole range
/// linearly (0° = 18, 360° = 80); angles outside `[0, 360)` are normalized
/// first and the result is clamped, never rejected.
pub fn age_from_angle(degrees: f64) -> u8 {
    let normalized = degrees.rem_euclid(360.0);
    let span = f64::from(MAX_AGE - MIN_AGE);
    let mapped = f64::from(MIN_AGE) + normalized / 360.0 * span;
    clamp_age(mapped.round() as i64)
}

/// Flattened wire projection of a profile, matching the scoring service's
/// `user_profile` contract field for field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserProfileFlags {
    pub has_hypertension: bool,
    pub has_diabetes: bool,
    pub has_high_cholesterol: bool,
    pub heart_disease: bool,
    pub kidney_disease: bool,
    pub obesity: bool,

    pub peanut_allergy: bool,
    pub gluten_intolerance: bool,
    pub lactose_intolerance: bool,
    pub soy_allergy: bool,
    pub egg_allergy: bool,

    pub goal_weight_loss: bool,
    pub goal_muscle_gain: bool,
    pub goal_high_protein: bool,
    pub goal_low_carb: bool,

    pub age: u8,
}

impl UserProfileFlags {
    /// Project a profile into the wire shape. `None` yields the documented
    /// defaults: age 30, every flag false.
    pub fn project(profile: Option<&HealthProfile>) -> Self {
        match profile {
            None => UserProfileFlags::default(),
            Some(p) => UserProfileFlags {
                has_hypertension: p.conditions.contains(&Condition::Hypertension),
                has_diabetes: p.conditions.contains(&Condition::Diabetes),
                has_high_cholesterol: p.conditions.contains(&Condition::HighCholesterol),
                heart_disease: p.conditions.contains(&Condition::HeartDisease),
                kidney_disease: p.conditions.contains(&Condition::KidneyDisease),
                obesity: p.conditions.contains(&Condition::Obesity),

                peanut_allergy: p.allergies.contains(&Allergy::Peanut),
                gluten_intolerance: p.allergies.contains(&Allergy::Gluten),
                lactose_intolerance: p.allergies.contains(&Allergy::Lactose),
                soy_allergy: p.allergies.contains(&Allergy::Soy),
                egg_allergy: p.allergies.contains(&Allergy::Egg),

                goal_weight_loss: p.goals.weight_loss,
                goal_muscle_gain: p.goals.muscle_gain,
                goal_high_protein: p.goals.high_protein,
                goal_low_carb: p.goals.low_carb,

                age: p.age,
            },
        }
    }
}

impl Default for UserProfileFlags {
    fn default() -> Self {
        UserProfileFlags {
            has_hypertension: false,
            has_diabetes: false,
            has_high_cholesterol: false,
            heart_disease: false,
            kidney_disease: false,
            obesity: false,
            peanut_allergy: false,
            gluten_intolerance: false,
            lactose_intolerance: false,
            soy_allergy: false,
            egg_allergy: false,
            goal_weight_loss: false,
            goal_muscle_gain: false,
            goal_high_protein: false,
            goal_low_carb: false,
            age: DEFAULT_AGE,
        }
    }
}
