//! Command parsing for the input line.
//!
//! This module parses command strings into structured [`Command`] values.

/// Parsed command from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the create-room dialog.
    Create {
        /// Text to pre-fill the dialog with.
        name: Option<String>,
    },

    /// Open a listed room.
    Open {
        /// Room name.
        name: String,
    },

    /// Return to the previous screen.
    Back,

    /// Sign in with an existing account.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },

    /// Create an account and sign in.
    Register {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
        /// Name shown as room creator. Empty lets the backend pick one.
        display_name: String,
    },

    /// Sign out.
    Logout,

    /// Show the command summary.
    Help,

    /// Quit the application.
    Quit,

    /// Plain text, not starting with `/`.
    Text {
        /// Text content.
        content: String,
    },

    /// Unknown or invalid command.
    Unknown {
        /// The original input.
        input: String,
    },

    /// Command with missing or invalid arguments.
    InvalidArgs {
        /// Command name.
        command: String,
        /// Error message.
        error: String,
    },
}

/// One line per command, for `/help`.
pub const HELP: &str = "/create [name]  /open <name>  /back  /login <email> <password>  \
                        /register <email> <password> [name]  /logout  /quit";

/// Parse a user input string into a command.
///
/// Commands start with `/`. Anything else is plain text.
pub fn parse(input: &str) -> Command {
    let input = input.trim();

    let Some(cmd_str) = input.strip_prefix('/') else {
        return Command::Text { content: input.to_string() };
    };

    let (command, rest) = match cmd_str.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (cmd_str, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match command {
        "create" | "new" => {
            Command::Create { name: (!rest.is_empty()).then(|| rest.to_string()) }
        },

        "open" => {
            if rest.is_empty() {
                invalid("open", "Usage: /open <name>")
            } else {
                Command::Open { name: rest.to_string() }
            }
        },

        "back" => Command::Back,

        "login" => match args.as_slice() {
            [email, password] => {
                Command::Login { email: (*email).to_string(), password: (*password).to_string() }
            },
            _ => invalid("login", "Usage: /login <email> <password>"),
        },

        "register" => match args.as_slice() {
            [email, password, name @ ..] => Command::Register {
                email: (*email).to_string(),
                password: (*password).to_string(),
                display_name: name.join(" "),
            },
            _ => invalid("register", "Usage: /register <email> <password> [display name]"),
        },

        "logout" => Command::Logout,

        "help" | "h" => Command::Help,

        "quit" | "q" => Command::Quit,

        _ => Command::Unknown { input: input.to_string() },
    }
}

fn invalid(command: &str, error: &str) -> Command {
    Command::InvalidArgs { command: command.into(), error: error.into() }
}
