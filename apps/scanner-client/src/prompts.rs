use std::io::{self, Write};

use scan_pipeline::profile::{Allergy, Condition, Goal, HealthProfile};
use scan_pipeline::wizard::{ProfileWizard, WizardStep};

pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

pub fn ask_yes_no(prompt: &str) -> io::Result<bool> {
    let answer = read_line(prompt)?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Drive the four-step wizard over stdin and return the completed profile.
pub fn run_wizard() -> io::Result<HealthProfile> {
    let mut wizard = ProfileWizard::new();
    loop {
        let preview = match wizard.profile_preview() {
            Some(preview) => preview.clone(),
            None => break,
        };
        let position = wizard.step().index().map(|i| i + 1).unwrap_or(4);
        match wizard.step() {
            WizardStep::Age => {
                println!("\n[{position}/4] {}", wizard.step().title());
                println!(
                    "Current age: {}. Enter an age (18-80), 'd<degrees>' to set it from the dial, or press Enter to continue.",
                    preview.age
                );
                let input = read_line("> ")?;
                if input.is_empty() {
                    wizard.advance();
                } else if let Some(degrees) = input.strip_prefix('d') {
                    match degrees.trim().parse::<f64>() {
                        Ok(degrees) => wizard.set_age_from_angle(degrees),
                        Err(_) => println!("Not a number."),
                    }
                } else {
                    match input.parse::<i64>() {
                        Ok(age) => wizard.set_age(age),
                        Err(_) => println!("Not a number."),
                    }
                }
            }
            WizardStep::Conditions => {
                println!("\n[{position}/4] {} Select all that apply.", wizard.step().title());
                for (i, condition) in Condition::ALL.iter().enumerate() {
                    let mark = if preview.conditions.contains(condition) { "x" } else { " " };
                    println!("  {}. [{mark}] {}", i + 1, condition.label());
                }
                let input = read_line("number to toggle, 'b' for back, Enter to continue > ")?;
                if input.is_empty() {
                    wizard.advance();
                } else if input == "b" {
                    wizard.retreat();
                } else if let Ok(n) = input.parse::<usize>() {
                    if let Some(condition) = Condition::ALL.get(n.wrapping_sub(1)) {
                        wizard.toggle_condition(*condition);
                    }
                }
            }
            WizardStep::Allergies => {
                println!("\n[{position}/4] {} We will flag these.", wizard.step().title());
                for (i, allergy) in Allergy::ALL.iter().enumerate() {
                    let mark = if preview.allergies.contains(allergy) { "x" } else { " " };
                    println!("  {}. [{mark}] {}", i + 1, allergy.label());
                }
                let input = read_line("number to toggle, 'b' for back, Enter to continue > ")?;
                if input.is_empty() {
                    wizard.advance();
                } else if input == "b" {
                    wizard.retreat();
                } else if let Ok(n) = input.parse::<usize>() {
                    if let Some(allergy) = Allergy::ALL.get(n.wrapping_sub(1)) {
                        wizard.toggle_allergy(*allergy);
                    }
                }
            }
            WizardStep::Goals => {
                println!("\n[{position}/4] {} What are you striving for?", wizard.step().title());
                for (i, goal) in Goal::ALL.iter().enumerate() {
                    let mark = if preview.goals.is_set(*goal) { "x" } else { " " };
                    println!("  {}. [{mark}] {}", i + 1, goal.label());
                }
                let input = read_line("number to toggle, 'b' for back, Enter to finish > ")?;
                if input.is_empty() {
                    if let Some(profile) = wizard.advance() {
                        return Ok(profile);
                    }
                } else if input == "b" {
                    wizard.retreat();
                } else if let Ok(n) = input.parse::<usize>() {
                    if let Some(goal) = Goal::ALL.get(n.wrapping_sub(1)) {
                        wizard.toggle_goal(*goal);
                    }
                }
            }
            WizardStep::Completed => break,
        }
    }
    Ok(HealthProfile::default())
}
