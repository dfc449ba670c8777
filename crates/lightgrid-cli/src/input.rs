use lightgrid_engine::{Direction, PlayerId};

use crate::game_loop::GameCommand;

/// A line of input that could not be turned into commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    UnknownKey(String),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKey(k) => write!(f, "unknown key {k:?}"),
        }
    }
}

impl std::error::Error for InputError {}

/// Map a single key name to a command.
///
/// Arrow names steer player A; `w`/`a`/`s`/`d` steer player B.
pub fn key_command(key: &str) -> Option<GameCommand> {
    let steer = |player_id, direction| GameCommand::SetDirection {
        player_id,
        direction,
    };
    match key.to_ascii_lowercase().as_str() {
        "up" => Some(steer(PlayerId::A, Direction::Up)),
        "down" => Some(steer(PlayerId::A, Direction::Down)),
        "left" => Some(steer(PlayerId::A, Direction::Left)),
        "right" => Some(steer(PlayerId::A, Direction::Right)),
        "w" => Some(steer(PlayerId::B, Direction::Up)),
        "s" => Some(steer(PlayerId::B, Direction::Down)),
        "a" => Some(steer(PlayerId::B, Direction::Left)),
        "d" => Some(steer(PlayerId::B, Direction::Right)),
        "q" | "quit" => Some(GameCommand::Stop),
        _ => None,
    }
}

/// Parse one line of terminal input.
///
/// Accepts either an explicit `<player> <direction>` pair (`b up`) or a
/// whitespace-separated list of key names (`up w`). Empty lines yield nothing.
pub fn parse_line(line: &str) -> Result<Vec<GameCommand>, InputError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if let [player, direction] = tokens.as_slice()
        && let Ok(player_id) = player.parse::<PlayerId>()
        && let Some(direction) = Direction::from_name(direction)
    {
        return Ok(vec![GameCommand::SetDirection {
            player_id,
            direction,
        }]);
    }

    tokens
        .iter()
        .map(|t| key_command(t).ok_or_else(|| InputError::UnknownKey((*t).to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steer(player_id: PlayerId, direction: Direction) -> GameCommand {
        GameCommand::SetDirection {
            player_id,
            direction,
        }
    }

    #[test]
    fn arrows_steer_player_a() {
        assert_eq!(key_command("up"), Some(steer(PlayerId::A, Direction::Up)));
        assert_eq!(
            key_command("RIGHT"),
            Some(steer(PlayerId::A, Direction::Right))
        );
    }

    #[test]
    fn wasd_steers_player_b() {
        assert_eq!(key_command("w"), Some(steer(PlayerId::B, Direction::Up)));
        assert_eq!(key_command("a"), Some(steer(PlayerId::B, Direction::Left)));
        assert_eq!(key_command("s"), Some(steer(PlayerId::B, Direction::Down)));
        assert_eq!(key_command("d"), Some(steer(PlayerId::B, Direction::Right)));
    }

    #[test]
    fn explicit_pair_form() {
        assert_eq!(
            parse_line("b up").unwrap(),
            vec![steer(PlayerId::B, Direction::Up)]
        );
        assert_eq!(
            parse_line("  A   left ").unwrap(),
            vec![steer(PlayerId::A, Direction::Left)]
        );
    }

    #[test]
    fn key_list_form() {
        assert_eq!(
            parse_line("down d").unwrap(),
            vec![
                steer(PlayerId::A, Direction::Down),
                steer(PlayerId::B, Direction::Right)
            ]
        );
        // Two keys that are not a player/direction pair.
        assert_eq!(
            parse_line("a s").unwrap(),
            vec![
                steer(PlayerId::B, Direction::Left),
                steer(PlayerId::B, Direction::Down)
            ]
        );
    }

    #[test]
    fn quit_stops() {
        assert_eq!(parse_line("quit").unwrap(), vec![GameCommand::Stop]);
    }

    #[test]
    fn empty_line_is_no_commands() {
        assert!(parse_line("   ").unwrap().is_empty());
    }

    #[test]
    fn unknown_key_is_reported() {
        assert_eq!(
            parse_line("up jump"),
            Err(InputError::UnknownKey("jump".to_string()))
        );
        // Third player does not exist.
        assert_eq!(
            parse_line("c up"),
            Err(InputError::UnknownKey("c".to_string()))
        );
    }
}
