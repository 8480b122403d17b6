use thiserror::Error;

/// Input problems reported by the lessons and page widgets
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LessonError {
    #[error("please enter both your name and age")]
    MissingInput,

    #[error("age cannot be negative, got {0}")]
    NegativeAge(i64),

    #[error("price and tax rate must be non-negative")]
    NegativeAmount,

    #[error("please enter some text to format")]
    EmptyText,

    #[error("please enter an item")]
    EmptyItem,

    #[error("list item {0} not found")]
    ItemNotFound(u64),
}
