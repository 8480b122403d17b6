//! Registry of environment variables read by fundamentals.
//!
//! Every config key can be overridden with the `FUNDAMENTALS_` prefix and a
//! `__` separator between section and key (e.g.
//! `FUNDAMENTALS_COUNTDOWN__DELAY_MS`). `fundamentals env` prints this table.

use std::fmt;

/// An environment variable definition
#[derive(Debug, Clone)]
pub struct EnvVar {
    /// Environment variable name (e.g., "FUNDAMENTALS_COUNTDOWN__START")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    pub category: EnvVarCategory,
    /// Default value if not set
    pub default: Option<&'static str>,
    /// Example value for documentation
    pub example: Option<&'static str>,
}

/// Categories for grouping environment variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVarCategory {
    Countdown,
    Lessons,
    Paths,
    Logging,
}

impl EnvVarCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EnvVarCategory::Countdown => "Countdown",
            EnvVarCategory::Lessons => "Lessons",
            EnvVarCategory::Paths => "Paths",
            EnvVarCategory::Logging => "Logging",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [EnvVarCategory] {
        &[
            EnvVarCategory::Countdown,
            EnvVarCategory::Lessons,
            EnvVarCategory::Paths,
            EnvVarCategory::Logging,
        ]
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<40} {}", self.name, self.description)?;
        if let Some(default) = self.default {
            write!(f, " (default: {default})")?;
        }
        Ok(())
    }
}

/// Static registry of all documented environment variables
pub static ENV_VARS: &[EnvVar] = &[
    // === Countdown ===
    EnvVar {
        name: "FUNDAMENTALS_COUNTDOWN__START",
        description: "Value the countdown starts from",
        category: EnvVarCategory::Countdown,
        default: Some("10"),
        example: Some("5"),
    },
    EnvVar {
        name: "FUNDAMENTALS_COUNTDOWN__DELAY_MS",
        description: "Milliseconds between countdown ticks (must be > 0)",
        category: EnvVarCategory::Countdown,
        default: Some("500"),
        example: Some("1000"),
    },
    // === Lessons ===
    EnvVar {
        name: "FUNDAMENTALS_LESSONS__MULTIPLICATION_DEFAULT",
        description: "Number used by the multiplication table when none is given",
        category: EnvVarCategory::Lessons,
        default: Some("5"),
        example: Some("12"),
    },
    EnvVar {
        name: "FUNDAMENTALS_LESSONS__TABLE_ROWS",
        description: "Rows printed in the multiplication table",
        category: EnvVarCategory::Lessons,
        default: Some("10"),
        example: Some("12"),
    },
    // === Paths ===
    EnvVar {
        name: "FUNDAMENTALS_PATHS__STATE",
        description: "Directory holding log files",
        category: EnvVarCategory::Paths,
        default: Some(".fundamentals"),
        example: Some("/tmp/fundamentals"),
    },
    // === Logging ===
    EnvVar {
        name: "FUNDAMENTALS_LOGGING__LEVEL",
        description: "Log level (trace, debug, info, warn, error)",
        category: EnvVarCategory::Logging,
        default: Some("info"),
        example: Some("debug"),
    },
    EnvVar {
        name: "FUNDAMENTALS_LOGGING__TO_FILE",
        description: "Write logs to a file instead of stderr",
        category: EnvVarCategory::Logging,
        default: Some("false"),
        example: Some("true"),
    },
];

/// Get all environment variables for a given category
pub fn env_vars_for_category(category: EnvVarCategory) -> impl Iterator<Item = &'static EnvVar> {
    ENV_VARS.iter().filter(move |v| v.category == category)
}

/// Get environment variables grouped by category
pub fn env_vars_by_category() -> Vec<(EnvVarCategory, Vec<&'static EnvVar>)> {
    EnvVarCategory::all()
        .iter()
        .map(|cat| {
            let vars: Vec<&EnvVar> = env_vars_for_category(*cat).collect();
            (*cat, vars)
        })
        .filter(|(_, vars)| !vars.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_env_vars_have_descriptions() {
        for var in ENV_VARS {
            assert!(
                !var.description.is_empty(),
                "EnvVar {} has empty description",
                var.name
            );
        }
    }

    #[test]
    fn test_all_env_vars_use_prefix() {
        for var in ENV_VARS {
            assert!(var.name.starts_with("FUNDAMENTALS_"), "{}", var.name);
            assert!(var.name.contains("__"), "{}", var.name);
        }
    }

    #[test]
    fn test_every_category_has_vars() {
        let grouped = env_vars_by_category();
        assert_eq!(grouped.len(), EnvVarCategory::all().len());
    }

    #[test]
    fn test_defaults_match_config() {
        let config = crate::config::Config::default();
        let default_of = |name: &str| {
            ENV_VARS
                .iter()
                .find(|v| v.name == name)
                .and_then(|v| v.default)
                .unwrap()
        };
        assert_eq!(
            default_of("FUNDAMENTALS_COUNTDOWN__DELAY_MS"),
            config.countdown.delay_ms.to_string()
        );
        assert_eq!(
            default_of("FUNDAMENTALS_PATHS__STATE"),
            config.paths.state
        );
    }
}
