//! Slash-command parsing for the chat input line.
//!
//! Anything not starting with `/` is a message. Commands mirror the actions
//! the original web client exposed through its dialogs.

/// Parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a chat: `/create <title>`.
    Create {
        /// Title of the new chat.
        caption: String,
    },
    /// Join a chat by identifier: `/join <chat-id>`.
    Join {
        /// Identifier of the chat to join.
        chat_id: String,
    },
    /// Leave the selected chat: `/leave`.
    Leave,
    /// Show the selected chat's identifier for sharing: `/share`.
    Share,
    /// Log out: `/logout`.
    Logout,
    /// Quit the application: `/quit`.
    Quit,
    /// Plain message text.
    Message {
        /// Message content, sent as-is (the session trims it).
        content: String,
    },
    /// Unrecognized command.
    Unknown {
        /// The command word as typed.
        input: String,
    },
    /// Recognized command with bad arguments.
    InvalidArgs {
        /// The command word.
        command: &'static str,
        /// What was wrong.
        error: &'static str,
    },
}

/// Parse one submitted input line.
pub fn parse(text: &str) -> Command {
    let Some(rest) = text.strip_prefix('/') else {
        return Command::Message { content: text.to_string() };
    };

    let (word, args) = match rest.split_once(char::is_whitespace) {
        Some((word, args)) => (word, args.trim()),
        None => (rest, ""),
    };

    match word {
        "create" => {
            if args.is_empty() {
                Command::InvalidArgs { command: "create", error: "chat title required" }
            } else {
                Command::Create { caption: args.to_string() }
            }
        },
        "join" => {
            if args.is_empty() || args.contains(char::is_whitespace) {
                Command::InvalidArgs { command: "join", error: "expected one chat id" }
            } else {
                Command::Join { chat_id: args.to_string() }
            }
        },
        "leave" => Command::Leave,
        "share" => Command::Share,
        "logout" => Command::Logout,
        "quit" => Command::Quit,
        _ => Command::Unknown { input: word.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(parse("hello there"), Command::Message { content: "hello there".to_string() });
    }

    #[test]
    fn create_keeps_multi_word_captions() {
        assert_eq!(parse("/create team chat"), Command::Create { caption: "team chat".to_string() });
    }

    #[test]
    fn join_requires_a_single_id() {
        assert_eq!(parse("/join abc-123"), Command::Join { chat_id: "abc-123".to_string() });
        assert!(matches!(parse("/join"), Command::InvalidArgs { command: "join", .. }));
        assert!(matches!(parse("/join a b"), Command::InvalidArgs { command: "join", .. }));
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(parse("/frobnicate"), Command::Unknown { input: "frobnicate".to_string() });
    }

    #[test]
    fn bare_commands_parse() {
        assert_eq!(parse("/leave"), Command::Leave);
        assert_eq!(parse("/share"), Command::Share);
        assert_eq!(parse("/logout"), Command::Logout);
        assert_eq!(parse("/quit"), Command::Quit);
    }
}
