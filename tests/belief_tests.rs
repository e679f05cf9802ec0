//! Belief matrices driven through the engine.

use literature::belief::{BeliefMatrix, Knowledge};
use literature::cards::{Card, CardSet};
use literature::core::{Ask, GameConfig, PlayerId, PlayerMap};
use literature::policy::{play_out, UniformPolicy};
use literature::rules::Engine;

fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

fn card(text: &str) -> Card {
    text.parse().unwrap()
}

fn round_robin() -> PlayerMap<CardSet> {
    PlayerMap::new(4, |seat| {
        Card::all().filter(|c| c.index() % 4 == seat.index()).collect()
    })
}

/// Every tag the public matrix knows, `private` knows the same way.
fn refines(private: &BeliefMatrix, public: &BeliefMatrix) -> bool {
    PlayerId::all(public.player_count()).all(|player| {
        public.cards_in_play().iter().all(|c| match public.tag(player, c) {
            Knowledge::Unknown => true,
            known => private.tag(player, c) == known,
        })
    })
}

#[test]
fn test_private_views_refine_the_public_view() {
    for seed in 0..8 {
        let mut engine = Engine::new(GameConfig::new(6), seed).unwrap();
        let mut policy = UniformPolicy::new(seed ^ 0x5eed);
        for _ in 0..40 {
            if play_out(&mut engine, &mut policy, 5).unwrap().is_empty() {
                break;
            }
            for seat in PlayerId::all(6) {
                let private = engine.belief(seat).unwrap();
                assert!(refines(private, engine.public_belief()), "seed {seed}, {seat}");
            }
        }
    }
}

#[test]
fn test_public_counts_follow_transfers() {
    let mut engine = Engine::from_deal(GameConfig::new(4), round_robin(), p(0)).unwrap();
    let public = engine.public_belief();
    assert!(PlayerId::all(4).all(|seat| public.hand_count(seat) == Some(12)));

    // AC is seat 0's, 2C seat 1's.
    engine.submit(Ask::new(p(0), p(1), card("2C")).into()).unwrap();
    let public = engine.public_belief();
    assert_eq!(public.hand_count(p(0)), Some(13));
    assert_eq!(public.hand_count(p(1)), Some(11));
    assert_eq!(public.known_holder(card("2C")), Some(p(0)));
    let minor_clubs = card("2C").half_suit();
    assert_eq!(public.half_minimum(p(0), minor_clubs), 2);
    assert_eq!(public.half_minimum(p(1), minor_clubs), 0);
}

#[test]
fn test_observation_carries_only_own_matrix() {
    let mut engine = Engine::from_deal(GameConfig::new(4), round_robin(), p(0)).unwrap();
    engine.submit(Ask::new(p(0), p(3), card("2C")).into()).unwrap();

    for seat in PlayerId::all(4) {
        let obs = engine.observe(seat).unwrap();
        assert_eq!(Some(&obs.belief), engine.belief(seat));
        assert_eq!(&obs.public_belief, engine.public_belief());
        assert_eq!(obs.hand, engine.state().hand(seat));
        assert_eq!(obs.history.len(), 1);
        // Nobody but the holder can see seat 1's 6C yet.
        let expected = if seat == p(1) { Knowledge::Held } else { Knowledge::Unknown };
        assert_eq!(obs.belief.tag(p(1), card("6C")), expected, "{seat}");
    }
}

#[test]
fn test_matrix_survives_serialization() {
    let mut engine = Engine::new(GameConfig::new(4), 17).unwrap();
    let mut policy = UniformPolicy::new(17);
    play_out(&mut engine, &mut policy, 30).unwrap();

    for seat in PlayerId::all(4) {
        let belief = engine.belief(seat).unwrap();
        let json = serde_json::to_string(belief).unwrap();
        let back: BeliefMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, belief);
    }
}
