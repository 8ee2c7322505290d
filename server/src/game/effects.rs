//! The draw command: fire rule bookkeeping and rank-specific effects.

use firedeck_shared::{Card, GamePhase, PendingAction, PlayerId, Rank};

use super::engine::{DrawOutcome, Game, GameError, ACES_TO_END, FIRE_RULE_COUNT};

impl Game {
    /// Draw the top card for the turn holder, apply the fire rule and the
    /// card's rank effect, then advance the turn unless a pending decision
    /// or the end of the game blocks it.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<DrawOutcome, GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::GameNotActive);
        }
        if self.current_turn != player {
            return Err(GameError::NotYourTurn);
        }
        if self.pending != PendingAction::None {
            return Err(GameError::PendingActionUnresolved);
        }

        let card = self.draw_top()?;
        self.discard_pile.push(card);

        let rank = card.rank();
        self.rank_counts[rank as usize] += 1;
        let penalty = if self.rank_counts[rank as usize] == FIRE_RULE_COUNT {
            // Reset only the rank that fired, so the counter starts from
            // scratch instead of re-triggering on the next recycled copy.
            self.rank_counts[rank as usize] = 0;
            tracing::info!(room = %self.code, rank = %rank, "fire rule triggered");
            Some(format!("Fire rule! Fourth {} drawn. Drink!", rank))
        } else {
            None
        };

        self.apply_rank_effect(card, player);

        if self.pending == PendingAction::None && self.phase == GamePhase::Playing {
            self.advance_turn();
        }

        Ok(DrawOutcome { card, penalty })
    }

    fn apply_rank_effect(&mut self, card: Card, player: PlayerId) {
        let name = self.player_name(player);
        match card.rank() {
            Rank::Ace => {
                self.aces_drawn += 1;
                if self.aces_drawn >= ACES_TO_END {
                    self.phase = GamePhase::GameOver;
                    self.last_action = format!("Game over! {} drew the fourth ace!", name);
                    tracing::info!(room = %self.code, player = %player, "fourth ace drawn, game over");
                } else {
                    self.last_action =
                        format!("{} drew an ace. {} of 4 are out.", name, self.aces_drawn);
                }
            }
            Rank::King => {
                self.pending = PendingAction::TargetSelection;
                self.last_action = format!("{} drew a king! Pick a victim.", name);
            }
            Rank::Jack => {
                self.direction = self.direction.flip();
                self.last_action = format!("{} drew a jack. Direction reversed!", name);
            }
            Rank::Queen => {
                if let Some(idx) = self.player_index(player) {
                    self.players[idx].shields += 1;
                }
                self.last_action = format!("{} kept a queen as a shield.", name);
            }
            Rank::Ten => {
                // Descriptive only, no state beyond the draw itself.
                self.last_action = format!("Social! Everyone drinks with {}.", name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use firedeck_shared::{Card, Direction, GamePhase, PendingAction, Rank, Suit};

    use super::super::engine::{DrawOutcome, Game, GameError};
    use super::super::testutil::deck_drawing_first;

    fn game_with(first_draws: &[Card]) -> Game {
        let mut g = Game::with_seed("FIRE", 1);
        g.add_player("Alice", "1");
        g.add_player("Bob", "2");
        g.add_player("Cleo", "2");
        g.begin_with_deck(deck_drawing_first(first_draws));
        g
    }

    fn all_of(rank: Rank) -> Vec<Card> {
        [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
            .into_iter()
            .map(|s| Card::new(s, rank))
            .collect()
    }

    fn draw_as_current(g: &mut Game) -> DrawOutcome {
        let pid = g.current_turn;
        g.draw_card(pid).unwrap()
    }

    #[test]
    fn fire_rule_fires_exactly_on_the_fourth_draw_of_a_rank() {
        let mut g = game_with(&all_of(Rank::Ten));
        for expected_count in 1..=3u8 {
            let outcome = draw_as_current(&mut g);
            assert_eq!(outcome.penalty, None);
            assert_eq!(g.rank_count(Rank::Ten), expected_count);
        }
        let fourth = draw_as_current(&mut g);
        let penalty = fourth.penalty.expect("fourth ten must trigger the fire rule");
        assert!(penalty.contains("10"), "penalty names the rank: {}", penalty);
        assert_eq!(g.rank_count(Rank::Ten), 0, "the fired counter resets");
    }

    #[test]
    fn fourth_ace_ends_the_game_and_rejects_further_draws() {
        let mut g = game_with(&all_of(Rank::Ace));
        for _ in 0..3 {
            draw_as_current(&mut g);
            assert_eq!(g.phase(), GamePhase::Playing);
        }
        let last = draw_as_current(&mut g);
        // The fourth ace is also the fourth of its rank, so both rules fire.
        assert!(last.penalty.is_some());
        assert_eq!(g.phase(), GamePhase::GameOver);
        let pid = g.current_turn;
        assert_eq!(g.draw_card(pid), Err(GameError::GameNotActive));
    }

    #[test]
    fn king_blocks_the_turn_until_a_target_is_selected() {
        let mut g = game_with(&[Card::new(Suit::Spades, Rank::King)]);
        let drawer = g.current_turn;
        draw_as_current(&mut g);
        assert_eq!(g.pending, PendingAction::TargetSelection);
        assert_eq!(g.current_turn, drawer, "turn must not advance yet");

        // Another draw attempt by the same player is refused.
        assert_eq!(
            g.draw_card(drawer),
            Err(GameError::PendingActionUnresolved)
        );
    }

    #[test]
    fn jack_flips_direction_and_no_other_rank_does() {
        let mut g = game_with(&[
            Card::new(Suit::Spades, Rank::Ten),
            Card::new(Suit::Spades, Rank::Jack),
            Card::new(Suit::Spades, Rank::Queen),
        ]);
        draw_as_current(&mut g);
        assert_eq!(g.direction, Direction::Clockwise);
        draw_as_current(&mut g);
        assert_eq!(g.direction, Direction::CounterClockwise);
        draw_as_current(&mut g);
        assert_eq!(g.direction, Direction::CounterClockwise);
    }

    #[test]
    fn queen_grants_the_drawer_a_shield_and_stays_in_the_discard() {
        let queen = Card::new(Suit::Hearts, Rank::Queen);
        let mut g = game_with(&[queen]);
        let drawer = g.current_turn;
        draw_as_current(&mut g);
        let idx = g.player_index(drawer).unwrap();
        assert_eq!(g.players[idx].shields, 1);
        assert_eq!(g.discard_pile.last(), Some(&queen));
    }

    #[test]
    fn draw_preconditions_are_checked_in_order() {
        let mut g = Game::with_seed("PRE", 2);
        let a = g.add_player("Alice", "1");
        let b = g.add_player("Bob", "2");
        assert_eq!(g.draw_card(a), Err(GameError::GameNotActive));
        g.start_game().unwrap();
        assert_eq!(g.draw_card(b), Err(GameError::NotYourTurn));
    }
}
