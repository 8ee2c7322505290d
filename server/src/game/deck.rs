//! Draw-pile management: drawing and the reshuffle rule.

use rand::seq::SliceRandom;

use firedeck_shared::Card;

use super::engine::{Game, GameError};

impl Game {
    /// Pop the top card of the draw pile, reshuffling the discard pile into
    /// a fresh draw pile first if it ran dry.
    pub(crate) fn draw_top(&mut self) -> Result<Card, GameError> {
        if self.draw_pile.is_empty() {
            self.reshuffle_discard()?;
        }
        self.draw_pile
            .pop()
            .ok_or_else(|| GameError::InvariantViolation("draw pile empty after reshuffle".into()))
    }

    /// Set aside the visible top discard, shuffle the rest back into the
    /// draw pile and leave only the set-aside card in the discard pile.
    ///
    /// With the fixed 20-card deck the discard pile holds at least two cards
    /// whenever the draw pile is empty mid-game; anything less means the
    /// piles no longer add up to the full deck and the state is corrupt.
    fn reshuffle_discard(&mut self) -> Result<(), GameError> {
        if self.discard_pile.len() <= 1 {
            tracing::error!(
                room = %self.code,
                draw = self.draw_pile.len(),
                discard = self.discard_pile.len(),
                "draw and discard piles exhausted, deck no longer complete"
            );
            return Err(GameError::InvariantViolation(
                "draw and discard piles exhausted".into(),
            ));
        }
        let retained = self
            .discard_pile
            .pop()
            .ok_or_else(|| GameError::InvariantViolation("discard pile empty on reshuffle".into()))?;
        let mut fresh = std::mem::take(&mut self.discard_pile);
        fresh.shuffle(&mut self.rng);
        self.draw_pile = fresh;
        self.discard_pile.push(retained);
        self.last_action = "Deck reshuffled!".to_owned();
        tracing::debug!(room = %self.code, draw = self.draw_pile.len(), "reshuffled discard into draw pile");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use firedeck_shared::{GamePhase, PendingAction, DECK_SIZE};

    use super::*;

    fn playing_game() -> Game {
        let mut g = Game::with_seed("DECK", 7);
        g.add_player("Alice", "1");
        g.add_player("Bob", "2");
        g.start_game().unwrap();
        g
    }

    fn pile_ids(g: &Game) -> HashSet<u8> {
        g.draw_pile
            .iter()
            .chain(g.discard_pile.iter())
            .map(|c| c.id())
            .collect()
    }

    #[test]
    fn start_deals_the_full_deck_into_the_draw_pile() {
        let g = playing_game();
        assert_eq!(g.draw_pile.len(), DECK_SIZE as usize);
        assert!(g.discard_pile.is_empty());
        assert_eq!(pile_ids(&g).len(), DECK_SIZE as usize);
    }

    #[test]
    fn reshuffle_restores_every_card_except_the_retained_top() {
        let mut g = playing_game();
        // Move the whole deck to the discard pile by hand, as if 20 draws
        // happened, then force the reshuffle path.
        let drained: Vec<Card> = std::mem::take(&mut g.draw_pile);
        g.discard_pile = drained;
        let top_before = *g.discard_pile.last().unwrap();
        let ids_before = pile_ids(&g);

        let drawn = g.draw_top().unwrap();

        assert_eq!(g.discard_pile, vec![top_before]);
        assert_ne!(drawn, top_before);
        let mut ids_after = pile_ids(&g);
        ids_after.insert(drawn.id());
        assert_eq!(ids_after, ids_before);
        assert_eq!(g.draw_pile.len(), DECK_SIZE as usize - 2);
    }

    #[test]
    fn exhausted_piles_are_a_fatal_invariant_violation() {
        let mut g = playing_game();
        g.draw_pile.clear();
        g.discard_pile.clear();
        match g.draw_top() {
            Err(GameError::InvariantViolation(_)) => {}
            other => panic!("expected invariant violation, got {:?}", other),
        }
        // A single discard card is just as unreachable mid-game.
        g.discard_pile.push(Card(0));
        assert!(matches!(
            g.draw_top(),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn conservation_holds_across_a_long_run_of_draws() {
        let mut g = playing_game();
        let everyone: Vec<_> = g.players.iter().map(|p| p.id).collect();
        for _ in 0..60 {
            if g.phase != GamePhase::Playing {
                break;
            }
            // Resolve whatever decision blocks the draw, then draw.
            match g.pending {
                PendingAction::TargetSelection => {
                    g.select_target(g.current_turn, everyone[0]);
                }
                PendingAction::ShieldDecision => {
                    g.use_shield(g.current_turn, false);
                }
                PendingAction::None => {
                    let pid = g.current_turn;
                    g.draw_card(pid).unwrap();
                }
            }
            assert_eq!(
                g.draw_pile.len() + g.discard_pile.len(),
                DECK_SIZE as usize,
                "piles must always hold the full deck"
            );
            assert_eq!(pile_ids(&g).len(), DECK_SIZE as usize);
        }
    }
}
