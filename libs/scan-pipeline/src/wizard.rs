use tracing::debug;

use crate::profile::{Allergy, Condition, Goal, HealthProfile, age_from_angle, clamp_age};

/// One screen of the four-step profile-collection sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Age,
    Conditions,
    Allergies,
    Goals,
    Completed,
}

impl WizardStep {
    /// Zero-based position for progress display; `None` once completed.
    pub fn index(&self) -> Option<usize> {
        match self {
            WizardStep::Age => Some(0),
            WizardStep::Conditions => Some(1),
            WizardStep::Allergies => Some(2),
            WizardStep::Goals => Some(3),
            WizardStep::Completed => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Age => "How old are you?",
            WizardStep::Conditions => "Any Conditions?",
            WizardStep::Allergies => "Any Allergies?",
            WizardStep::Goals => "Your Goals?",
            WizardStep::Completed => "Done",
        }
    }
}

/// Finite-state stepper that accumulates a [`HealthProfile`] and yields it
/// exactly once on completion. The wizard does not reset itself; a new run
/// means a new wizard.
#[derive(Debug)]
pub struct ProfileWizard {
    step: WizardStep,
    profile: Option<HealthProfile>,
}

impl ProfileWizard {
    pub fn new() -> Self {
        ProfileWizard {
            step: WizardStep::Age,
            profile: Some(HealthProfile::default()),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_completed(&self) -> bool {
        self.step == WizardStep::Completed
    }

    /// Current selections, for rendering the active step. `None` after the
    /// profile has been handed off.
    pub fn profile_preview(&self) -> Option<&HealthProfile> {
        self.profile.as_ref()
    }

    /// Move forward one step. At the final step this completes the wizard
    /// and yields the accumulated profile; afterwards it is inert. No step
    /// blocks advancement, every step has a usable default.
    pub fn advance(&mut self) -> Option<HealthProfile> {
        self.step = match self.step {
            WizardStep::Age => WizardStep::Conditions,
            WizardStep::Conditions => WizardStep::Allergies,
            WizardStep::Allergies => WizardStep::Goals,
            WizardStep::Goals => {
                debug!("profile wizard completed");
                self.step = WizardStep::Completed;
                return self.profile.take();
            }
            WizardStep::Completed => WizardStep::Completed,
        };
        None
    }

    /// Move back one step; no-op at the first step and after completion.
    pub fn retreat(&mut self) {
        self.step = match self.step {
            WizardStep::Age | WizardStep::Completed => self.step,
            WizardStep::Conditions => WizardStep::Age,
            WizardStep::Allergies => WizardStep::Conditions,
            WizardStep::Goals => WizardStep::Allergies,
        };
    }

    /// Store a clamped age; out-of-range values are clamped, never rejected.
    pub fn set_age(&mut self, value: i64) {
        if let Some(profile) = &mut self.profile {
            profile.age = clamp_age(value);
        }
    }

    /// Store an age from a dial angle in degrees.
    pub fn set_age_from_angle(&mut self, degrees: f64) {
        if let Some(profile) = &mut self.profile {
            profile.age = age_from_angle(degrees);
        }
    }

    /// Symmetric-difference toggle: present tags are removed, absent added.
    pub fn toggle_condition(&mut self, condition: Condition) {
        if let Some(profile) = &mut self.profile {
            if !profile.conditions.remove(&condition) {
                profile.conditions.insert(condition);
            }
        }
    }

    pub fn toggle_allergy(&mut self, allergy: Allergy) {
        if let Some(profile) = &mut self.profile {
            if !profile.allergies.remove(&allergy) {
                profile.allergies.insert(allergy);
            }
        }
    }

    pub fn toggle_goal(&mut self, goal: Goal) {
        if let Some(profile) = &mut self.profile {
            profile.goals.toggle(goal);
        }
    }
}

impl Default for ProfileWizard {
    fn default() -> Self {
        ProfileWizard::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Goals;

    #[test]
    fn steps_advance_in_order_and_complete_once() {
        let mut wizard = ProfileWizard::new();
        assert_eq!(wizard.step(), WizardStep::Age);
        assert!(wizard.advance().is_none());
        assert_eq!(wizard.step(), WizardStep::Conditions);
        assert!(wizard.advance().is_none());
        assert_eq!(wizard.step(), WizardStep::Allergies);
        assert!(wizard.advance().is_none());
        assert_eq!(wizard.step(), WizardStep::Goals);

        let profile = wizard.advance().expect("final advance yields the profile");
        assert_eq!(profile.age, 30);
        assert!(wizard.is_completed());
        // completion happens exactly once
        assert!(wizard.advance().is_none());
        assert!(wizard.profile_preview().is_none());
    }

    #[test]
    fn retreat_is_noop_at_first_step() {
        let mut wizard = ProfileWizard::new();
        wizard.retreat();
        assert_eq!(wizard.step(), WizardStep::Age);
        wizard.advance();
        wizard.retreat();
        assert_eq!(wizard.step(), WizardStep::Age);
    }

    #[test]
    fn toggling_twice_restores_original_selection() {
        let mut wizard = ProfileWizard::new();
        wizard.toggle_condition(Condition::Hypertension);
        wizard.toggle_allergy(Allergy::Gluten);
        wizard.toggle_goal(Goal::LowCarb);
        wizard.toggle_condition(Condition::Hypertension);
        wizard.toggle_allergy(Allergy::Gluten);
        wizard.toggle_goal(Goal::LowCarb);

        let preview = wizard.profile_preview().unwrap();
        assert!(preview.conditions.is_empty());
        assert!(preview.allergies.is_empty());
        assert_eq!(preview.goals, Goals::default());
    }

    #[test]
    fn multiple_tags_may_be_selected_together() {
        let mut wizard = ProfileWizard::new();
        wizard.toggle_condition(Condition::Diabetes);
        wizard.toggle_condition(Condition::HeartDisease);
        wizard.toggle_goal(Goal::WeightLoss);
        wizard.toggle_goal(Goal::HighProtein);

        let preview = wizard.profile_preview().unwrap();
        assert_eq!(preview.conditions.len(), 2);
        assert!(preview.goals.weight_loss && preview.goals.high_protein);
    }

    #[test]
    fn age_entry_is_clamped_not_rejected() {
        let mut wizard = ProfileWizard::new();
        wizard.set_age(150);
        assert_eq!(wizard.profile_preview().unwrap().age, 80);
        wizard.set_age_from_angle(-90.0);
        let age = wizard.profile_preview().unwrap().age;
        assert!((18..=80).contains(&age));
    }

    #[test]
    fn selections_survive_retreat_and_readvance() {
        let mut wizard = ProfileWizard::new();
        wizard.set_age(52);
        wizard.advance();
        wizard.toggle_condition(Condition::KidneyDisease);
        wizard.retreat();
        wizard.advance();
        wizard.advance();
        wizard.advance();
        let profile = wizard.advance().unwrap();
        assert_eq!(profile.age, 52);
        assert!(profile.conditions.contains(&Condition::KidneyDisease));
    }
}
