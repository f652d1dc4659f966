//! Parsing of generated module text.
//!
//! # Format
//! The generator answers with a single JSON object, optionally wrapped in a
//! Markdown code fence:
//! ````text
//! ```json
//! {"topic": "...", "summary": "...", "flashcards": [...], "quiz": [...]}
//! ```
//! ````

use crate::error::GenerationError;
use crate::types::{Module, QuizQuestion};

/// Parse and validate a module from generator output.
pub fn parse_module(text: &str) -> Result<Module, GenerationError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(GenerationError::MalformedResponse("empty response".to_string()));
    }

    let module: Module = serde_json::from_str(&cleaned)
        .map_err(|err| GenerationError::MalformedResponse(err.to_string()))?;
    validate(&module)?;
    Ok(module)
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker and trim.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn validate(module: &Module) -> Result<(), GenerationError> {
    let malformed = |message: String| Err(GenerationError::MalformedResponse(message));

    if module.flashcards.is_empty() && module.quiz.is_empty() {
        return malformed("module has no flashcards and no quiz".to_string());
    }

    for (index, question) in module.quiz.iter().enumerate() {
        if question.options.len() != QuizQuestion::OPTION_COUNT {
            return malformed(format!(
                "quiz question {} has {} options, expected {}",
                index + 1,
                question.options.len(),
                QuizQuestion::OPTION_COUNT
            ));
        }
        if question.answer_index().is_none() {
            return malformed(format!(
                "quiz question {} answer {:?} is not one of its options",
                index + 1,
                question.answer
            ));
        }
    }

    Ok(())
}
