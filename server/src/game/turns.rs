//! Turn order, target selection and the shield decision.

use firedeck_shared::{GamePhase, PendingAction, PlayerId};

use super::engine::Game;

impl Game {
    /// Record the victim of a drawn king and release the turn.
    ///
    /// Applies only while target selection is pending and `player` holds the
    /// turn; any other call is ignored and reported back as not applied, so
    /// stale or out-of-turn clients cannot disturb the state.
    pub fn select_target(&mut self, player: PlayerId, target: PlayerId) -> bool {
        if self.pending != PendingAction::TargetSelection || self.current_turn != player {
            return false;
        }
        let Some(target_idx) = self.player_index(target) else {
            return false;
        };
        self.target = Some(target);
        // Telemetry only; the sip itself happens around the table.
        self.players[target_idx].sips += 1;
        self.last_action = format!(
            "{} picked {} to drink!",
            self.player_name(player),
            self.players[target_idx].name
        );
        self.advance_turn();
        true
    }

    /// Resolve the shield decision for the turn holder.
    ///
    /// Spending a shield skips the whole turn, draw included. Declining, or
    /// deciding with no shield in hand, keeps the turn with the same player,
    /// who must now draw.
    pub fn use_shield(&mut self, player: PlayerId, use_it: bool) -> bool {
        if self.pending != PendingAction::ShieldDecision || self.current_turn != player {
            return false;
        }
        let Some(idx) = self.player_index(player) else {
            return false;
        };
        if use_it && self.players[idx].shields > 0 {
            self.players[idx].shields -= 1;
            self.pending = PendingAction::None;
            self.last_action = format!("{} spent a shield to skip the draw.", self.players[idx].name);
            self.advance_turn();
        } else {
            self.pending = PendingAction::None;
            self.last_action = format!("{} declined the shield. Draw a card!", self.players[idx].name);
        }
        true
    }

    /// Hand the turn to the next player along the current direction,
    /// wrapping at both ends. A new turn holder with a shield in hand must
    /// decide whether to spend it before anyone can draw.
    pub(crate) fn advance_turn(&mut self) {
        debug_assert_eq!(self.phase, GamePhase::Playing);
        let Some(current) = self.player_index(self.current_turn) else {
            return;
        };
        let n = self.players.len() as isize;
        let mut next = (current as isize + self.direction.step()) % n;
        if next < 0 {
            next += n;
        }
        let next_player = &self.players[next as usize];
        self.current_turn = next_player.id;
        if next_player.shields > 0 {
            self.pending = PendingAction::ShieldDecision;
            self.last_action = format!("{}, you hold a shield. Skip this turn?", next_player.name);
        } else {
            self.pending = PendingAction::None;
        }
    }
}

#[cfg(test)]
mod tests {
    use firedeck_shared::{Card, Direction, Rank, Suit};

    use super::super::testutil::deck_drawing_first;
    use super::*;

    fn three_player_game() -> (Game, Vec<PlayerId>) {
        let mut g = Game::with_seed("TURN", 11);
        let ids = vec![
            g.add_player("Alice", "1"),
            g.add_player("Bob", "2"),
            g.add_player("Cleo", "2"),
        ];
        g.begin_with_deck(deck_drawing_first(&[]));
        (g, ids)
    }

    #[test]
    fn turn_wraps_around_in_both_directions() {
        let (mut g, ids) = three_player_game();
        g.current_turn = ids[2];
        g.advance_turn();
        assert_eq!(g.current_turn, ids[0], "forward from the last index wraps to 0");

        g.direction = Direction::CounterClockwise;
        g.advance_turn();
        assert_eq!(g.current_turn, ids[2], "backward from index 0 wraps to the end");
    }

    #[test]
    fn select_target_records_victim_and_releases_the_turn() {
        let (mut g, ids) = three_player_game();
        g.pending = PendingAction::TargetSelection;
        assert!(g.select_target(ids[0], ids[2]));
        assert_eq!(g.target, Some(ids[2]));
        assert_eq!(g.pending, PendingAction::None);
        assert_eq!(g.current_turn, ids[1]);
        assert_eq!(g.players[2].sips, 1);
    }

    #[test]
    fn out_of_turn_or_out_of_phase_selections_are_silently_ignored() {
        let (mut g, ids) = three_player_game();
        // No pending action at all.
        assert!(!g.select_target(ids[0], ids[1]));
        assert_eq!(g.target, None);

        // Pending, but the wrong player answers.
        g.pending = PendingAction::TargetSelection;
        assert!(!g.select_target(ids[1], ids[2]));
        assert_eq!(g.pending, PendingAction::TargetSelection);
        assert_eq!(g.current_turn, ids[0]);

        // Unknown target id leaves everything untouched.
        assert!(!g.select_target(ids[0], PlayerId(99)));
        assert_eq!(g.pending, PendingAction::TargetSelection);
    }

    #[test]
    fn advancing_onto_a_shield_holder_raises_the_decision() {
        let (mut g, ids) = three_player_game();
        g.players[1].shields = 1;
        g.advance_turn();
        assert_eq!(g.current_turn, ids[1]);
        assert_eq!(g.pending, PendingAction::ShieldDecision);
    }

    #[test]
    fn spending_a_shield_skips_the_whole_turn() {
        let (mut g, ids) = three_player_game();
        g.players[1].shields = 2;
        g.advance_turn();
        assert!(g.use_shield(ids[1], true));
        assert_eq!(g.players[1].shields, 1, "exactly one shield is consumed");
        assert_eq!(g.current_turn, ids[2], "the skipper never drew");
        assert_eq!(g.pending, PendingAction::None);
    }

    #[test]
    fn declining_the_shield_keeps_the_turn_and_clears_the_pending_state() {
        let (mut g, ids) = three_player_game();
        g.players[1].shields = 1;
        g.advance_turn();
        assert!(g.use_shield(ids[1], false));
        assert_eq!(g.players[1].shields, 1);
        assert_eq!(g.current_turn, ids[1]);
        assert_eq!(g.pending, PendingAction::None);

        // The same player can now draw normally.
        assert!(g.draw_card(ids[1]).is_ok());
    }

    #[test]
    fn shield_answers_from_the_wrong_player_are_ignored() {
        let (mut g, ids) = three_player_game();
        g.players[1].shields = 1;
        g.advance_turn();
        assert!(!g.use_shield(ids[0], true));
        assert_eq!(g.pending, PendingAction::ShieldDecision);
        assert_eq!(g.players[1].shields, 1);
    }

    #[test]
    fn king_queen_walkthrough_matches_the_table_script() {
        // Three players. Alice draws a king, picks Cleo, turn passes to Bob.
        // Bob draws a queen, keeps the shield, turn passes to Cleo with no
        // pending decision since Cleo holds nothing.
        let mut g = Game::with_seed("WALK", 3);
        let alice = g.add_player("Alice", "1");
        let bob = g.add_player("Bob", "2");
        let cleo = g.add_player("Cleo", "2");
        g.begin_with_deck(deck_drawing_first(&[
            Card::new(Suit::Spades, Rank::King),
            Card::new(Suit::Hearts, Rank::Queen),
        ]));

        g.draw_card(alice).unwrap();
        assert_eq!(g.pending, PendingAction::TargetSelection);
        assert_eq!(g.current_turn, alice);

        assert!(g.select_target(alice, cleo));
        assert_eq!(g.target, Some(cleo));
        assert_eq!(g.current_turn, bob);
        assert_eq!(g.pending, PendingAction::None);

        g.draw_card(bob).unwrap();
        assert_eq!(g.players[1].shields, 1);
        assert_eq!(g.current_turn, cleo);
        assert_eq!(g.pending, PendingAction::None);
    }
}
