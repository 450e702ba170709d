//! Player representation

/// A participant in a game, human or computer-controlled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Display name (user-editable)
    pub name: String,

    /// Human or AI controlled
    pub is_human: bool,

    /// Pairs matched this game
    pub score: u32,

    /// Resolved pair attempts this game, successful or not
    pub moves: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, is_human: bool) -> Self {
        Player {
            name: name.into(),
            is_human,
            score: 0,
            moves: 0,
        }
    }

    /// Default name for the nth human player, 1-based
    pub fn default_name(number: usize) -> String {
        format!("Player {}", number)
    }

    /// Default name for the nth computer player, 1-based
    pub fn computer_name(number: usize) -> String {
        format!("Computer {}", number)
    }

    pub fn add_score(&mut self, score: u32) {
        self.score += score;
    }

    pub fn add_moves(&mut self, moves: u32) {
        self.moves += moves;
    }

    /// Clear score and moves for a fresh game
    pub fn reset(&mut self) {
        self.score = 0;
        self.moves = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new("Alice", true);
        assert_eq!(player.name, "Alice");
        assert!(player.is_human);
        assert_eq!(player.score, 0);
        assert_eq!(player.moves, 0);
    }

    #[test]
    fn test_score_and_reset() {
        let mut player = Player::new(Player::computer_name(1), false);
        assert_eq!(player.name, "Computer 1");

        player.add_score(1);
        player.add_moves(1);
        player.add_moves(1);
        assert_eq!(player.score, 1);
        assert_eq!(player.moves, 2);

        player.reset();
        assert_eq!(player.score, 0);
        assert_eq!(player.moves, 0);
    }
}
