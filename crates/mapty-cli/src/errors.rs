use console::style;
use mapty_core::MaptyError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a rejected workout form
pub fn invalid_workout_input(field: &str, reason: &str) -> CliError {
    CliError::new("All fields must be positive numbers")
        .with_context(format!("The workout was not logged.\n\nField: {}\nReason: {}", field, reason))
        .with_suggestion("Distance, duration and cadence must be numbers greater than zero")
        .with_suggestion("Elevation gain may be zero or negative but must be a number")
        .with_help("Run: mapty add --help")
}

/// Create error for a failed location request
pub fn location_unavailable(reason: &str) -> CliError {
    CliError::new("Could not get your position")
        .with_context(format!(
            "Logging workouts needs your current location.\n\nReason: {}",
            reason
        ))
        .with_suggestion("Pass it for this run: mapty --location 40.7,-74.0 add ...")
        .with_suggestion("Or set MAPTY_LOCATION=\"40.7,-74.0\"")
        .with_suggestion("Or add to .mapty/config.toml:\n  location = [40.7, -74.0]")
        .with_help("Run: mapty status")
}

/// Create error for an unknown workout id
pub fn workout_not_found(id: &str) -> CliError {
    CliError::new("Workout not found")
        .with_context(format!("No logged workout has this id.\n\nId: {}", id))
        .with_suggestion("List workouts and their ids: mapty list")
        .with_help("Run: mapty show --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check .mapty/config.toml for syntax errors")
        .with_suggestion("Check MAPTY_* environment variables")
        .with_help("Run: mapty status")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(err) = error.downcast_ref::<MaptyError>() {
        return match err {
            MaptyError::InvalidWorkoutInput { field, reason } => {
                invalid_workout_input(field, reason)
            }
            MaptyError::LocationUnavailable { reason } => location_unavailable(reason),
            MaptyError::WorkoutNotFound { id } => workout_not_found(id),
            MaptyError::ConfigInvalid { key, reason } => invalid_config(key, reason),
            MaptyError::CorruptPersistedState { reason } => {
                CliError::new("Stored workouts could not be read")
                    .with_context(format!("Reason: {}", reason))
                    .with_suggestion("Start over with: mapty reset")
            }
            other => CliError::new(other.to_string()),
        };
    }

    let message = format!("{:#}", error);
    if message.contains("permission denied") || message.contains("Permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check permissions of the storage file")
            .with_suggestion("Or choose another one: mapty --storage-file <PATH> ...")
    } else {
        CliError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_domain_errors() {
        let err = anyhow::Error::new(MaptyError::LocationUnavailable {
            reason: "no location configured".to_string(),
        });
        let cli_err = from_anyhow(err);
        assert_eq!(cli_err.message, "Could not get your position");
        assert!(!cli_err.suggestions.is_empty());

        let err = anyhow::Error::new(MaptyError::invalid_input("distance", "must be positive"));
        let cli_err = from_anyhow(err);
        assert!(cli_err.context.unwrap().contains("distance"));
    }

    #[test]
    fn test_plain_errors_keep_message() {
        let cli_err = from_anyhow(anyhow::anyhow!("something odd"));
        assert_eq!(cli_err.message, "something odd");
        assert!(cli_err.suggestions.is_empty());
    }
}
