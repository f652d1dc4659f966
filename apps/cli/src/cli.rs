use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "microlearn",
    about = "Microlearning modules with spaced-repetition review",
    version
)]
pub struct Cli {
    /// Move unreadable saved progress aside and start with an empty store
    #[arg(long, global = true)]
    pub recover_corrupt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a module for a new topic
    New {
        /// Topic to learn about
        topic: String,
    },

    /// List saved topics
    Topics,

    /// Show due items and quiz feedback for a topic
    Dashboard {
        topic: String,
    },

    /// Show the short reading for a topic
    Read {
        topic: String,
    },

    /// Review the flashcards that are due
    Flashcards {
        topic: String,
    },

    /// Take a quiz over the questions that are due
    Quiz {
        topic: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommand_with_global_flag() {
        let cli = Cli::try_parse_from(["microlearn", "quiz", "Negotiation", "--recover-corrupt"]).unwrap();
        assert!(cli.recover_corrupt);
        assert!(matches!(cli.command, Commands::Quiz { topic } if topic == "Negotiation"));
    }

    #[test]
    fn topic_is_required() {
        assert!(Cli::try_parse_from(["microlearn", "new"]).is_err());
    }
}
