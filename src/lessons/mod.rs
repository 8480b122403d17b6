//! Small computations rendered by the CLI: greetings by age, temperature
//! conversion, tax breakdowns, text formatting and loop demonstrations.

pub mod age;
mod error;
pub mod loops;
pub mod pricing;
pub mod temperature;
pub mod text;

pub use error::LessonError;
