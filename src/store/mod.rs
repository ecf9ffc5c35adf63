pub mod json_store;
pub mod schema;
pub mod word_bank;

pub use json_store::JsonStore;
pub use schema::{VocabularyEntry, WordListData};
pub use word_bank::{MemoryWordBank, WordBank};
