pub mod credential;
pub mod llm;
