//! Topic creation and listing.

use std::io::Write;

use anyhow::bail;
use chrono::NaiveDate;
use microlearn_core::BlobStore;

use super::dashboard;
use crate::generator::ContentGenerator;
use crate::state::AppState;

/// Generate a module for a topic and start tracking it.
///
/// A topic that is already tracked keeps its module and progress; the
/// generator is not called again.
pub async fn create_topic<B, G, W>(
    state: &mut AppState<B, G>,
    topic: &str,
    today: NaiveDate,
    out: &mut W,
) -> anyhow::Result<()>
where
    B: BlobStore,
    G: ContentGenerator,
    W: Write,
{
    let topic = topic.trim();
    if topic.is_empty() {
        bail!("topic must not be empty");
    }

    if state.store.topic_progress(topic).is_some() {
        writeln!(out, "\"{topic}\" already has a module.")?;
    } else {
        writeln!(out, "Generating a module for \"{topic}\"...")?;
        let module = state.generator.generate(topic).await?;
        state.store.initialize_topic_progress(topic, module)?;
    }

    dashboard::show_dashboard(state, topic, today, out)
}

/// Print every saved topic.
pub fn list_topics<B: BlobStore, G, W: Write>(state: &AppState<B, G>, out: &mut W) -> anyhow::Result<()> {
    if state.store.is_empty() {
        writeln!(
            out,
            "No modules created yet. Start with `microlearn new <topic>`."
        )?;
        return Ok(());
    }

    for topic in state.store.topics() {
        writeln!(out, "{topic}")?;
    }
    Ok(())
}
