//! Age categories and the greeting shown for each.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::LessonError;

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid regex"));

/// Life stage derived from an age in years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeCategory {
    Child,
    Teenager,
    Adult,
    Senior,
}

impl AgeCategory {
    /// Categorize a non-negative age
    pub fn for_age(age: i64) -> Self {
        match age {
            a if a < 13 => AgeCategory::Child,
            a if a < 20 => AgeCategory::Teenager,
            a if a < 65 => AgeCategory::Adult,
            _ => AgeCategory::Senior,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeCategory::Child => "child",
            AgeCategory::Teenager => "teenager",
            AgeCategory::Adult => "adult",
            AgeCategory::Senior => "senior",
        }
    }
}

/// Result of a successful age check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeGreeting {
    pub name: String,
    pub age: i64,
    pub category: AgeCategory,
}

/// Read the whole years at the start of `input`, ignoring anything after
/// them: `"25.7"` and `"25 years"` are both 25.
pub fn parse_age(input: &str) -> Option<i64> {
    LEADING_INTEGER
        .captures(input)
        .and_then(|caps| caps[1].parse().ok())
}

/// Validate the inputs and categorize the age.
///
/// `age` is `None` when the caller could not parse a number.
pub fn check_age(name: &str, age: Option<i64>) -> Result<AgeGreeting, LessonError> {
    let Some(age) = age.filter(|_| !name.is_empty()) else {
        return Err(LessonError::MissingInput);
    };
    if age < 0 {
        return Err(LessonError::NegativeAge(age));
    }

    tracing::debug!(name, age, "age category determined");
    Ok(AgeGreeting {
        name: name.to_string(),
        age,
        category: AgeCategory::for_age(age),
    })
}

impl fmt::Display for AgeGreeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, age) = (&self.name, self.age);
        match self.category {
            AgeCategory::Child => write!(
                f,
                "Hello {name}! You're a child ({age} years old). Keep learning and having fun! 🧒"
            ),
            AgeCategory::Teenager => write!(
                f,
                "Hey {name}! You're a teenager ({age} years old). Enjoy these exciting years! 🧑‍🎓"
            ),
            AgeCategory::Adult => write!(
                f,
                "Hi {name}! You're an adult ({age} years old). Keep crushing those goals! 💼"
            ),
            AgeCategory::Senior => write!(
                f,
                "Hello {name}! You're a senior ({age} years old). Your wisdom is invaluable! 👴👵"
            ),
        }
    }
}
