use inquire::{InquireError, Select, Text};
use tracing::warn;

use crate::controller::{Action, AppState, Surface};

/// The "window": a city prompt, a two-button menu and two output regions on stdout.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    last_input: String,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print_banner(&self) {
        println!("Weather Forecast App");
        println!();
    }
}

impl Surface for TerminalSurface {
    fn next_action(&mut self) -> Action {
        match Select::new("Action:", Action::all().to_vec()).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Action::Quit
            }
            Err(err) => {
                warn!(error = %err, "action prompt failed");
                Action::Quit
            }
        }
    }

    fn read_city_input(&mut self) -> String {
        let input = Text::new("Enter City Name:")
            .with_initial_value(&self.last_input)
            .prompt();

        self.last_input = match input {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                String::new()
            }
            Err(err) => {
                warn!(error = %err, "city prompt failed");
                String::new()
            }
        };

        self.last_input.clone()
    }

    fn show_error(&mut self, title: &str, message: &str) {
        eprintln!("[{title}] {message}");
    }

    fn show_report(&mut self, state: &AppState) {
        println!();
        println!("{}", state.headline);
        println!("{}", state.details);
        println!();
    }

    fn clear(&mut self) {
        self.last_input.clear();
        println!("Cleared.");
    }
}
