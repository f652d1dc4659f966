//! Flashcard review and quiz sessions.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use microlearn_core::{
    BlobStore, PerformanceFeedback, QuizQuestion, ReviewSession, SessionStep, SessionSummary,
};

use super::prompt;
use crate::state::AppState;

/// Walk through the due flashcards, asking for self-assessment after each flip.
pub fn review_flashcards<B, G, R, W>(
    state: &mut AppState<B, G>,
    topic: &str,
    today: NaiveDate,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    B: BlobStore,
    R: BufRead,
    W: Write,
{
    state.select_topic(topic)?;
    let Some(mut session) = ReviewSession::flashcards(&state.store, topic, today)? else {
        writeln!(out, "No flashcards are due for review. Great job!")?;
        return Ok(());
    };

    while let Some(card) = session.current().cloned() {
        writeln!(out)?;
        writeln!(out, "Card {} of {}", session.position() + 1, session.len())?;
        writeln!(out, "  {}", card.content.term)?;
        if prompt(input, out, "Press Enter to flip...")?.is_none() {
            return end_early(out);
        }
        writeln!(out, "  {}", card.content.definition)?;

        let Some(is_correct) = ask_correct(input, out)? else {
            return end_early(out);
        };

        if let SessionStep::Completed(summary) = session.answer(&mut state.store, is_correct, today)? {
            tracing::debug!(topic, correct = summary.correct, total = summary.total, "flashcards reviewed");
            writeln!(out)?;
            writeln!(out, "All Done! You've reviewed all due flashcards.")?;
        }
    }
    Ok(())
}

/// Ask the due quiz questions and record the score when all are answered.
pub fn take_quiz<B, G, R, W>(
    state: &mut AppState<B, G>,
    topic: &str,
    today: NaiveDate,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    B: BlobStore,
    R: BufRead,
    W: Write,
{
    state.select_topic(topic)?;
    let Some(mut session) = ReviewSession::quiz(&state.store, topic, today)? else {
        writeln!(out, "No quiz questions are due for review. Well done!")?;
        return Ok(());
    };

    while let Some(item) = session.current().cloned() {
        let question = &item.content;
        writeln!(out)?;
        writeln!(out, "{}. {}", session.position() + 1, question.question)?;
        for (n, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}) {}", n + 1, option)?;
        }

        let Some(choice) = ask_choice(question, input, out)? else {
            return end_early(out);
        };

        let is_correct = question.is_correct(choice);
        if is_correct {
            writeln!(out, "Correct!")?;
        } else {
            writeln!(out, "Incorrect. The correct answer is: {}", question.answer)?;
        }

        if let SessionStep::Completed(summary) = session.answer(&mut state.store, is_correct, today)? {
            report_quiz(&summary, out)?;
        }
    }
    Ok(())
}

fn report_quiz<W: Write>(summary: &SessionSummary, out: &mut W) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(out, "Quiz Complete!")?;
    writeln!(out, "You scored {} out of {}.", summary.correct, summary.total)?;
    if let Some(attempt) = &summary.recorded {
        writeln!(out, "{}", PerformanceFeedback::from_attempt(attempt).message())?;
    }
    Ok(())
}

fn end_early<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Session ended early. Answers so far are saved.")?;
    Ok(())
}

/// Ask whether the card was recalled, `None` at end of input.
fn ask_correct<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> anyhow::Result<Option<bool>> {
    loop {
        let Some(answer) = prompt(input, out, "Did you get it right? [y/n] ")? else {
            return Ok(None);
        };
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            _ => writeln!(out, "Please answer y or n.")?,
        }
    }
}

/// Ask for an option by number or text, `None` at end of input.
fn ask_choice<'q, R: BufRead, W: Write>(
    question: &'q QuizQuestion,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<&'q str>> {
    let count = question.options.len();
    loop {
        let Some(answer) = prompt(input, out, &format!("Your answer [1-{count}]: "))? else {
            return Ok(None);
        };
        let by_number = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| question.options.get(index));
        let by_text = || question.options.iter().find(|option| option.trim() == answer);

        match by_number.or_else(by_text) {
            Some(option) => return Ok(Some(option.as_str())),
            None => writeln!(out, "Please pick an option between 1 and {count}.")?,
        }
    }
}
