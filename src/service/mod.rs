pub mod pagination;
pub mod quiz_selector;

pub use pagination::PageRequest;
pub use quiz_selector::{QuestionPicker, SeededPicker, UniformPicker, select_question};
