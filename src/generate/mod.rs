//! Generating synthetic articles with a language model

mod generator;
mod prompts;

pub use generator::{Generator, PUBLISHER_LABEL};
pub use prompts::{description_prompt, headline_prompt};
