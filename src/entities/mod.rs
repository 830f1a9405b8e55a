pub mod analysis;

pub use analysis::{TranslationOutcome, WordInfo};
