/// A playback action typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Stop,
    SpeedUp,
    SpeedDown,
    VolumeUp,
    VolumeDown,
    Restart,
    Quit,
    Help,
    Noop,
    Unknown(String),
}

impl Command {
    /// Interpret one line of input. The mapping ignores case and surrounding
    /// whitespace and depends on nothing but the token.
    pub fn parse(token: &str) -> Self {
        let token = token.trim().to_lowercase();
        match token.as_str() {
            "" => Command::Noop,
            "pause" | "p" => Command::TogglePause,
            "stop" | "s" => Command::Stop,
            "faster" | "+" => Command::SpeedUp,
            "slower" | "-" => Command::SpeedDown,
            "louder" | "up" => Command::VolumeUp,
            "quieter" | "down" => Command::VolumeDown,
            "restart" | "r" => Command::Restart,
            "quit" | "q" => Command::Quit,
            "help" | "h" => Command::Help,
            _ => Command::Unknown(token),
        }
    }
}

pub const CONTROLS_HELP: &str = "\
Controls (type command + Enter):
  'pause' or 'p'      - Pause/Resume
  'stop' or 's'       - Stop reading
  'faster' or '+'     - Increase speed
  'slower' or '-'     - Decrease speed
  'louder' or 'up'    - Increase volume
  'quieter' or 'down' - Decrease volume
  'restart' or 'r'    - Restart from beginning
  'quit' or 'q'       - Quit
  'help' or 'h'       - Show this help
  '' (just Enter)     - Continue without command";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_alias() {
        let table = [
            ("pause", Command::TogglePause),
            ("p", Command::TogglePause),
            ("stop", Command::Stop),
            ("s", Command::Stop),
            ("faster", Command::SpeedUp),
            ("+", Command::SpeedUp),
            ("slower", Command::SpeedDown),
            ("-", Command::SpeedDown),
            ("louder", Command::VolumeUp),
            ("up", Command::VolumeUp),
            ("quieter", Command::VolumeDown),
            ("down", Command::VolumeDown),
            ("restart", Command::Restart),
            ("r", Command::Restart),
            ("quit", Command::Quit),
            ("q", Command::Quit),
            ("help", Command::Help),
            ("h", Command::Help),
            ("", Command::Noop),
        ];
        for (token, expected) in table {
            assert_eq!(Command::parse(token), expected, "token {token:?}");
        }
    }

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(Command::parse("  PAUSE \n"), Command::TogglePause);
        assert_eq!(Command::parse("\t\n"), Command::Noop);
    }

    #[test]
    fn unknown_tokens_are_reported() {
        assert_eq!(
            Command::parse("Louderer"),
            Command::Unknown("louderer".into())
        );
    }

    #[test]
    fn parsing_is_repeatable() {
        for token in ["p", "faster", "nonsense", ""] {
            assert_eq!(Command::parse(token), Command::parse(token));
        }
    }
}
