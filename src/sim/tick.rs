//! Fixed timestep simulation tick
//!
//! Core match loop that advances the simulation deterministically. One call
//! is one 1/60 s tick.

use serde::{Deserialize, Serialize};

use super::ability::{ABILITY_SLOTS, dispatch};
use super::state::{FighterId, MatchEvent, MatchPhase, MatchState, split_pair};

/// Held signals for one fighter during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// One signal per ability slot
    pub abilities: [bool; ABILITY_SLOTS],
    pub hypercharge: bool,
}

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Indexed by `FighterId::index`
    pub players: [FighterInput; 2],
    /// Restart request, honored only once the match is over
    pub reset: bool,
}

impl InputSnapshot {
    pub fn player(&self, id: FighterId) -> &FighterInput {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: FighterId) -> &mut FighterInput {
        &mut self.players[id.index()]
    }
}

/// Advance the match by one fixed tick
///
/// Order: hypercharge timers, abilities, area blasts, movement, projectiles/particles, hits,
/// purge, win check. A finished match is frozen until `input.reset`.
pub fn tick(state: &mut MatchState, input: &InputSnapshot) {
    state.events.clear();

    if !state.is_running() {
        if input.reset {
            state.reset();
        }
        return;
    }

    state.tick += 1;

    let MatchState {
        arena,
        particle_cap,
        rng,
        fighters,
        events,
        ..
    } = state;

    // Hypercharge timers first: buffs hold for the whole tick
    for fighter in fighters.iter_mut() {
        fighter.hypercharge.tick();
    }

    // Abilities (and hypercharge blasts against the opponent)
    for id in FighterId::ALL {
        let (me, opponent) = split_pair(fighters, id);
        let target = opponent.rect();
        if let Some(blast) = dispatch(me, input.player(id), &target, rng, events) {
            if blast.reaches(opponent.center()) {
                let damage = opponent.apply_blast(blast.damage);
                log::debug!("{} blast hit {} for {}", me.kind.name(), opponent.kind.name(), damage);
                events.push(MatchEvent::Blast { attacker: id, damage });
            }
        }
    }

    // Movement and timers
    for id in FighterId::ALL {
        fighters[id.index()].step(input.player(id), arena);
    }

    // Projectiles and particles; rockets chase the opponent's current center
    for id in FighterId::ALL {
        let (me, opponent) = split_pair(fighters, id);
        let target_y = opponent.center().y;
        me.update_effects(arena, target_y, *particle_cap, rng);
    }

    // Projectile hits: single hit, no pierce
    for id in FighterId::ALL {
        let (me, opponent) = split_pair(fighters, id);
        let body = opponent.rect();
        for projectile in me.projectiles.iter_mut().filter(|p| p.active) {
            if projectile.rect().intersects(&body) {
                let damage = opponent.take_damage(projectile.strike());
                log::debug!("{} hit {} for {}", me.kind.name(), opponent.kind.name(), damage);
                events.push(MatchEvent::Hit { attacker: id, damage });
            }
        }
        me.purge_projectiles();
    }

    for fighter in fighters.iter() {
        debug_assert!((0.0..=fighter.max_health).contains(&fighter.health));
        debug_assert!(fighter.projectiles.iter().all(|p| p.active));
    }

    // Win check: player one's defeat is checked first
    let loser = FighterId::ALL
        .into_iter()
        .find(|id| fighters[id.index()].is_defeated());
    if let Some(loser) = loser {
        let winner = loser.opponent();
        state.phase = MatchPhase::MatchOver { winner };
        state.events.push(MatchEvent::MatchOver { winner });
        log::info!(
            "Match over after {} ticks: {} wins",
            state.tick,
            state.fighter(winner).kind.name()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::fighter::HyperchargePhase;
    use crate::sim::projectile::Projectile;
    use crate::sim::state::Facing;
    use crate::view::FrameView;
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_match() -> MatchState {
        let mut state = MatchState::new(&Settings::default());
        // Let both fighters settle on the ground
        tick(&mut state, &InputSnapshot::default());
        state.events.clear();
        state
    }

    fn place_adjacent(state: &mut MatchState) {
        let one = state.fighter(FighterId::One).pos;
        state.fighter_mut(FighterId::Two).pos = one + Vec2::new(60.0, 0.0);
    }

    #[test]
    fn test_bolt_hit_scenario() {
        let mut state = new_match();
        let target = state.fighter(FighterId::Two).pos;
        // A bolt about to overlap the rocket launcher
        let bolt = Projectile::bolt(target - Vec2::new(20.0, 0.0), Facing::Right, false);
        state.fighter_mut(FighterId::One).projectiles.push(bolt);

        tick(&mut state, &InputSnapshot::default());

        let victim = state.fighter(FighterId::Two);
        assert_eq!(victim.health, 85.0);
        assert_eq!(victim.hit_cooldown, 20);
        assert!(state.fighter(FighterId::One).projectiles.is_empty());
        assert!(state.events.contains(&MatchEvent::Hit { attacker: FighterId::One, damage: 15.0 }));
    }

    #[test]
    fn test_only_one_hit_per_projectile_and_window() {
        let mut state = new_match();
        let target = state.fighter(FighterId::Two).pos;
        for _ in 0..3 {
            let bolt = Projectile::bolt(target - Vec2::new(20.0, 0.0), Facing::Right, false);
            state.fighter_mut(FighterId::One).projectiles.push(bolt);
        }

        tick(&mut state, &InputSnapshot::default());

        // All three struck and were consumed, but only the first did damage
        assert_eq!(state.fighter(FighterId::Two).health, 85.0);
        assert!(state.fighter(FighterId::One).projectiles.is_empty());
        let hits = state.events.iter().filter(|e| matches!(e, MatchEvent::Hit { .. })).count();
        assert_eq!(hits, 3);
    }

    #[test]
    fn test_lethal_rocket_ends_match() {
        let mut state = new_match();
        state.fighter_mut(FighterId::Two).health = 10.0;
        // Any projectile owned by the opponent can land the blow
        let center = state.fighter(FighterId::Two).center();
        let rocket = Projectile::rocket(center - Vec2::new(8.0, 0.0), Facing::Right, center.y);
        state.fighter_mut(FighterId::One).projectiles.push(rocket);

        tick(&mut state, &InputSnapshot::default());

        assert_eq!(state.fighter(FighterId::Two).health, 0.0);
        assert_eq!(state.phase, MatchPhase::MatchOver { winner: FighterId::One });
        assert_eq!(state.winner(), Some(FighterId::One));
    }

    #[test]
    fn test_rocket_launcher_wins_when_bolt_caster_falls() {
        let mut state = new_match();
        state.fighter_mut(FighterId::One).health = 10.0;
        let center = state.fighter(FighterId::One).center();
        let rocket = Projectile::rocket(center + Vec2::new(8.0, 0.0), Facing::Left, center.y);
        state.fighter_mut(FighterId::Two).projectiles.push(rocket);

        tick(&mut state, &InputSnapshot::default());
        assert_eq!(state.winner(), Some(FighterId::Two));
    }

    #[test]
    fn test_match_over_freezes_until_reset() {
        let mut state = new_match();
        state.fighter_mut(FighterId::One).health = 0.0;
        tick(&mut state, &InputSnapshot::default());
        assert_eq!(state.winner(), Some(FighterId::Two));

        let frozen_tick = state.tick;
        let frozen_x = state.fighter(FighterId::One).pos.x;
        let mut input = InputSnapshot::default();
        input.player_mut(FighterId::One).right = true;
        input.player_mut(FighterId::One).abilities = [true; ABILITY_SLOTS];
        for _ in 0..10 {
            tick(&mut state, &input);
        }
        assert_eq!(state.tick, frozen_tick);
        assert_eq!(state.fighter(FighterId::One).pos.x, frozen_x);
        assert!(state.fighter(FighterId::One).projectiles.is_empty());
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut state = new_match();
        let mut input = InputSnapshot::default();
        input.players[0] = FighterInput {
            right: true,
            abilities: [true; ABILITY_SLOTS],
            hypercharge: true,
            ..Default::default()
        };
        input.players[1] = FighterInput {
            left: true,
            abilities: [true; ABILITY_SLOTS],
            hypercharge: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &input);
        }
        state.fighter_mut(FighterId::Two).health = 0.0;
        tick(&mut state, &InputSnapshot::default());
        assert!(!state.is_running());

        tick(&mut state, &InputSnapshot { reset: true, ..Default::default() });
        assert!(state.is_running());
        assert!(state.events.contains(&MatchEvent::Reset));

        for fighter in &state.fighters {
            assert_eq!(fighter.health, MAX_HEALTH);
            assert_eq!(fighter.pos, fighter.spawn_point());
            assert_eq!(fighter.ability_cooldowns, [0; ABILITY_SLOTS]);
            assert_eq!(fighter.hit_cooldown, 0);
            assert_eq!(fighter.hypercharge.phase(), HyperchargePhase::Ready);
            assert!(fighter.hypercharge.ready);
            assert!(fighter.projectiles.is_empty());
            assert!(fighter.particles.is_empty());
        }
    }

    #[test]
    fn test_reset_ignored_while_running() {
        let mut state = new_match();
        state.fighter_mut(FighterId::One).health = 50.0;
        tick(&mut state, &InputSnapshot { reset: true, ..Default::default() });
        assert_eq!(state.fighter(FighterId::One).health, 50.0);
        assert!(!state.events.contains(&MatchEvent::Reset));
    }

    #[test]
    fn test_hypercharge_blast_ignores_invulnerability() {
        let mut state = new_match();
        place_adjacent(&mut state);
        state.fighter_mut(FighterId::One).hit_cooldown = 10;

        let mut input = InputSnapshot::default();
        input.player_mut(FighterId::Two).hypercharge = true;
        tick(&mut state, &input);

        assert_eq!(state.fighter(FighterId::One).health, 65.0);
        assert!(state.events.contains(&MatchEvent::Blast { attacker: FighterId::Two, damage: 35.0 }));
    }

    #[test]
    fn test_hypercharge_blast_out_of_range() {
        let mut state = new_match();
        let mut input = InputSnapshot::default();
        input.player_mut(FighterId::Two).hypercharge = true;
        tick(&mut state, &input);

        assert_eq!(state.fighter(FighterId::One).health, MAX_HEALTH);
        assert!(state.fighter(FighterId::Two).hypercharge.active);
        assert!(state.screen_shake());
    }

    #[test]
    fn test_hypercharge_window_in_ticks() {
        let mut state = new_match();
        // Send the lightning storm away from the opponent
        state.fighter_mut(FighterId::One).facing = Facing::Left;
        let mut input = InputSnapshot::default();
        input.player_mut(FighterId::One).hypercharge = true;
        tick(&mut state, &input);

        let idle = InputSnapshot::default();
        let mut active_ticks = 0;
        let mut elapsed = 0;
        while state.fighter(FighterId::One).hypercharge.active {
            active_ticks += 1;
            tick(&mut state, &idle);
            elapsed += 1;
        }
        assert_eq!(active_ticks, HYPERCHARGE_DURATION_TICKS);

        while !state.fighter(FighterId::One).hypercharge.ready {
            tick(&mut state, &idle);
            elapsed += 1;
        }
        assert_eq!(elapsed, HYPERCHARGE_COOLDOWN_TICKS);
    }

    #[test]
    fn test_last_hypercharged_tick_keeps_every_buff() {
        let mut state = new_match();
        let mut input = InputSnapshot::default();
        input.player_mut(FighterId::Two).hypercharge = true;
        tick(&mut state, &input);

        let idle = InputSnapshot::default();
        for _ in 1..HYPERCHARGE_DURATION_TICKS - 1 {
            tick(&mut state, &idle);
        }
        assert!(state.fighter(FighterId::Two).hypercharge.active);

        // A bolt lands on the final active tick: damage is still halved
        let target = state.fighter(FighterId::Two).pos;
        let bolt = Projectile::bolt(target - Vec2::new(20.0, 0.0), Facing::Right, false);
        state.fighter_mut(FighterId::One).projectiles.push(bolt);
        let x = state.fighter(FighterId::Two).pos.x;
        input = InputSnapshot::default();
        input.player_mut(FighterId::Two).left = true;
        tick(&mut state, &input);

        let launcher = state.fighter(FighterId::Two);
        assert_eq!(launcher.health, MAX_HEALTH - BOLT_DAMAGE * HYPERCHARGE_DAMAGE_TAKEN_MULT);
        assert_eq!(launcher.pos.x, x - FIGHTER_SPEED * HYPERCHARGE_SPEED_MULT);
        assert!(launcher.hypercharge.active);
        assert!(FrameView::capture(&state).fighters[1].hypercharge_active);

        tick(&mut state, &idle);
        assert!(!state.fighter(FighterId::Two).hypercharge.active);
        assert!(!state.screen_shake());
    }

    #[test]
    fn test_ability_refires_after_cooldown() {
        let mut state = new_match();
        let mut input = InputSnapshot::default();
        input.player_mut(FighterId::One).abilities[0] = true;

        let mut fired_on = Vec::new();
        for t in 0..100 {
            tick(&mut state, &input);
            if state.events.iter().any(|e| matches!(e, MatchEvent::AbilityFired { .. })) {
                fired_on.push(t);
            }
        }
        assert_eq!(fired_on, vec![0, 40, 80]);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut a = MatchState::new(&settings);
        let mut b = MatchState::new(&settings);

        let mut input = InputSnapshot::default();
        input.players[0] = FighterInput {
            right: true,
            abilities: [true; ABILITY_SLOTS],
            hypercharge: true,
            ..Default::default()
        };
        input.players[1] = FighterInput {
            jump: true,
            abilities: [true; ABILITY_SLOTS],
            ..Default::default()
        };

        for _ in 0..240 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.tick, b.tick);
        for (fa, fb) in a.fighters.iter().zip(b.fighters.iter()) {
            assert_eq!(fa.pos, fb.pos);
            assert_eq!(fa.health, fb.health);
            assert_eq!(fa.projectiles, fb.projectiles);
            assert_eq!(fa.particles, fb.particles);
        }
    }

    fn arb_fighter_input() -> impl Strategy<Value = FighterInput> {
        (any::<[bool; 6]>()).prop_map(|b| FighterInput {
            left: b[0],
            right: b[1],
            jump: b[2],
            abilities: [b[3], b[4], b[5]],
            hypercharge: b[3] && b[5],
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_health_and_rocket_speed_bounded(
            inputs in prop::collection::vec((arb_fighter_input(), arb_fighter_input()), 1..400)
        ) {
            let mut state = MatchState::new(&Settings::default());
            for (p1, p2) in inputs {
                let snapshot = InputSnapshot { players: [p1, p2], reset: true };
                tick(&mut state, &snapshot);
                for fighter in &state.fighters {
                    prop_assert!(fighter.health >= 0.0 && fighter.health <= fighter.max_health);
                    for p in &fighter.projectiles {
                        prop_assert!(p.active);
                        if let crate::sim::projectile::ProjectileKind::Rocket(r) = &p.kind {
                            prop_assert!(r.speed_y.abs() <= ROCKET_MAX_VERTICAL_SPEED);
                            prop_assert!(r.trail.len() <= ROCKET_TRAIL_LENGTH);
                        }
                    }
                }
            }
        }
    }
}
