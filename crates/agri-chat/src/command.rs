/// A line typed at the prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Submit the text, together with the selected attachment if any.
    Send(String),
    /// Select an image file.
    Attach(String),
    /// Deselect the attachment.
    Detach,
    /// Switch to another endpoint.
    Endpoint(String),
    /// Show the available commands.
    Help,
    /// Leave the chat.
    Quit,
}

/// Usage text for the commands.
pub const HELP: &str = "\
/attach <path>    select an image to send with the next message
/detach           drop the selected image
/endpoint <url>   send messages to another endpoint
/help             show this help
/quit             leave the chat";

impl Command {
    /// Parses a prompt line. Lines not starting with `/` are messages.
    ///
    /// Returns `None` for an unknown command or a missing argument.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.trim_start().strip_prefix('/') else {
            return Some(Command::Send(line.to_owned()));
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        match (name, arg) {
            ("attach", "") | ("endpoint", "") => None,
            ("attach", path) => Some(Command::Attach(path.to_owned())),
            ("endpoint", url) => Some(Command::Endpoint(url.to_owned())),
            ("detach", _) => Some(Command::Detach),
            ("help", _) => Some(Command::Help),
            ("quit", _) | ("exit", _) => Some(Command::Quit),
            _ => None,
        }
    }
}
