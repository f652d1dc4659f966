//! Terminal commands.

pub mod dashboard;
pub mod study;
pub mod topic;

use std::io::{self, BufRead, Write};

/// Print a prompt and read one trimmed line, `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::generator::ContentGenerator;
    use crate::state::AppState;
    use chrono::NaiveDate;
    use microlearn_core::{
        Flashcard, GenerationError, IntervalLadder, MemoryBlobStore, Module, ProgressStore,
        QuizQuestion,
    };

    /// Generator returning a canned module, or failing when none is set.
    pub struct CannedGenerator {
        pub module: Option<Module>,
    }

    impl ContentGenerator for CannedGenerator {
        async fn generate(&self, _topic: &str) -> Result<Module, GenerationError> {
            self.module
                .clone()
                .ok_or_else(|| GenerationError::Network("connection refused".to_string()))
        }
    }

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    pub fn sample_module() -> Module {
        Module {
            topic: "Active Listening".to_string(),
            summary: "Listen to understand.\nReflect back what you heard.".to_string(),
            flashcards: vec![
                Flashcard {
                    term: "Paraphrasing".to_string(),
                    definition: "Restating the speaker's message in your own words.".to_string(),
                },
                Flashcard {
                    term: "Open question".to_string(),
                    definition: "A question that invites more than yes or no.".to_string(),
                },
            ],
            quiz: vec![
                QuizQuestion {
                    question: "Which is an open question?".to_string(),
                    options: vec![
                        "Did you finish?".to_string(),
                        "How did it go?".to_string(),
                        "Is it done?".to_string(),
                        "Are you sure?".to_string(),
                    ],
                    answer: "How did it go?".to_string(),
                },
                QuizQuestion {
                    question: "Paraphrasing means...".to_string(),
                    options: vec![
                        "Repeating word for word".to_string(),
                        "Changing the subject".to_string(),
                        "Restating in your own words".to_string(),
                        "Interrupting".to_string(),
                    ],
                    answer: "Restating in your own words".to_string(),
                },
            ],
        }
    }

    pub fn empty_state(module: Option<Module>) -> AppState<MemoryBlobStore, CannedGenerator> {
        let store = ProgressStore::load(MemoryBlobStore::new(), IntervalLadder::default()).unwrap();
        AppState::new(store, CannedGenerator { module })
    }

    /// State with the sample module tracked under `listening`.
    pub fn seeded_state() -> AppState<MemoryBlobStore, CannedGenerator> {
        let mut state = empty_state(None);
        state
            .store
            .initialize_topic_progress("listening", sample_module())
            .unwrap();
        state
    }

    pub fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_reads_trimmed_line() {
        let mut input = "  yes \n".as_bytes();
        let mut out = Vec::new();
        let line = prompt(&mut input, &mut out, "Ready? ").unwrap();
        assert_eq!(line.as_deref(), Some("yes"));
        assert_eq!(String::from_utf8(out).unwrap(), "Ready? ");
    }

    #[test]
    fn prompt_reports_end_of_input() {
        let mut input = "".as_bytes();
        let mut out = Vec::new();
        assert_eq!(prompt(&mut input, &mut out, "> ").unwrap(), None);
    }
}
