//! Boss domain: next-mode selection.
//!
//! Pure function over the repertoire table, so the whole decision policy is
//! testable with a seeded RNG and no ECS fixture.

use bevy::prelude::warn;
use rand::Rng;

use crate::boss::components::ForcedCounter;
use crate::boss::modes::{ActiveFlag, Exclusion, ModeId, ModeSet, ModeSpec};

/// Rejection-sampling bound; past this the pick degrades to idle.
const MAX_REROLLS: usize = 16;

/// Everything the pick depends on besides the repertoire itself.
#[derive(Debug, Clone)]
pub struct PickContext {
    pub game_over: bool,
    pub centered: bool,
    pub previous: ModeId,
    pub gravity_aura_active: bool,
    pub poison_active: bool,
    pub electric_wheel_active: bool,
    pub repeat_chance: f64,
}

fn flag_active(flag: ActiveFlag, ctx: &PickContext) -> bool {
    match flag {
        ActiveFlag::GravityAura => ctx.gravity_aura_active,
        ActiveFlag::Poison => ctx.poison_active,
        ActiveFlag::ElectricWheel => ctx.electric_wheel_active,
    }
}

fn flag_blocked(spec: &ModeSpec, ctx: &PickContext) -> bool {
    matches!(spec.exclusion, Exclusion::NotWhile(flag) if flag_active(flag, ctx))
}

/// Picks the boss's next mode.
///
/// Priority: game-over de-escalation, then forced counters in declaration
/// order, then a small chance to repeat the previous mode, then a uniform
/// sample of the selectable repertoire with the previous mode and any
/// flag-blocked mode rejected. Selection never loops forever and never
/// panics; a degenerate repertoire falls back to idle.
pub fn pick_next_mode(
    set: &ModeSet,
    counters: &mut [ForcedCounter],
    ctx: &PickContext,
    rng: &mut impl Rng,
) -> ModeId {
    if ctx.game_over {
        return match set.run {
            Some(run) if !ctx.centered => run,
            _ => set.idle,
        };
    }

    for counter in counters.iter_mut() {
        counter.count += 1;
    }

    // Declaration order of the counters is the priority order.
    for counter in counters.iter_mut() {
        if counter.count > counter.limit {
            let spec = set.spec(counter.mode);
            if flag_blocked(spec, ctx) {
                continue;
            }
            counter.count = 0;
            if let Some(forced) = spec.forced {
                counter.limit = rng.random_range(forced.min_limit..=forced.max_limit);
            }
            return counter.mode;
        }
    }

    let previous_spec = set.contains(ctx.previous).then(|| set.spec(ctx.previous));
    if let Some(prev) = previous_spec {
        let repeatable =
            prev.selectable && prev.exclusion != Exclusion::SequenceOnly && !flag_blocked(prev, ctx);
        if repeatable && rng.random_bool(ctx.repeat_chance) {
            return ctx.previous;
        }
    }

    let candidates: Vec<&ModeSpec> = set
        .modes
        .iter()
        .filter(|m| m.selectable && m.exclusion != Exclusion::SequenceOnly)
        .collect();
    if candidates.is_empty() {
        warn!("repertoire has no selectable modes, idling");
        return set.idle;
    }

    for _ in 0..MAX_REROLLS {
        let pick = candidates[rng.random_range(0..candidates.len())];
        if pick.id == ctx.previous || flag_blocked(pick, ctx) {
            continue;
        }
        return pick.id;
    }

    warn!("mode selection exhausted {MAX_REROLLS} draws, idling");
    set.idle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::modes::{AnimSpec, ForcedPick, ModeMotion};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const ANIM: AnimSpec = AnimSpec {
        row: 0,
        max_frame: 3,
        fps: 10.0,
        looping: true,
    };

    const fn mode(
        id: &'static str,
        selectable: bool,
        exclusion: Exclusion,
        forced: Option<ForcedPick>,
    ) -> ModeSpec {
        ModeSpec {
            id: ModeId(id),
            anim: ANIM,
            triggers: &[],
            forced,
            exclusion,
            selectable,
            motion: ModeMotion::None,
            duration_ms: None,
            after: None,
        }
    }

    const MODES: &[ModeSpec] = &[
        mode("idle", false, Exclusion::None, None),
        mode("run", false, Exclusion::None, Some(ForcedPick { min_limit: 4, max_limit: 6 })),
        mode("a", true, Exclusion::None, None),
        mode("b", true, Exclusion::None, None),
        mode("aura", true, Exclusion::NotWhile(ActiveFlag::GravityAura), None),
        mode("finisher", true, Exclusion::SequenceOnly, None),
    ];

    const SET: ModeSet = ModeSet {
        modes: MODES,
        idle: ModeId("idle"),
        recharge: ModeId("idle"),
        run: Some(ModeId("run")),
    };

    fn ctx(previous: &'static str) -> PickContext {
        PickContext {
            game_over: false,
            centered: false,
            previous: ModeId(previous),
            gravity_aura_active: false,
            poison_active: false,
            electric_wheel_active: false,
            repeat_chance: 0.1,
        }
    }

    #[test]
    fn never_yields_previous_or_blocked_modes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut context = ctx("a");
        context.gravity_aura_active = true;
        context.repeat_chance = 0.0;
        for _ in 0..10_000 {
            let pick = pick_next_mode(&SET, &mut [], &context, &mut rng);
            assert_ne!(pick, ModeId("a"), "previous mode must be rejected");
            assert_ne!(pick, ModeId("aura"), "flag-blocked mode must be rejected");
            assert_ne!(pick, ModeId("finisher"), "sequence-only modes never sample");
        }
    }

    #[test]
    fn degenerate_repertoire_falls_back_to_idle() {
        const LOCKED: &[ModeSpec] = &[
            mode("idle", false, Exclusion::None, None),
            mode("aura", true, Exclusion::NotWhile(ActiveFlag::GravityAura), None),
        ];
        const LOCKED_SET: ModeSet = ModeSet {
            modes: LOCKED,
            idle: ModeId("idle"),
            recharge: ModeId("idle"),
            run: None,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut context = ctx("x");
        context.gravity_aura_active = true;
        context.repeat_chance = 0.0;
        for _ in 0..100 {
            assert_eq!(pick_next_mode(&LOCKED_SET, &mut [], &context, &mut rng), ModeId("idle"));
        }
    }

    #[test]
    fn forced_counter_overrides_the_sample_and_rerolls_its_limit() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut counters = vec![ForcedCounter {
            mode: ModeId("run"),
            count: 4,
            limit: 4,
        }];
        let pick = pick_next_mode(&SET, &mut counters, &ctx("a"), &mut rng);
        assert_eq!(pick, ModeId("run"));
        assert_eq!(counters[0].count, 0);
        assert!((4..=6).contains(&counters[0].limit));
    }

    #[test]
    fn earlier_counters_win_ties() {
        const BOTH: &[ModeSpec] = &[
            mode("idle", false, Exclusion::None, None),
            mode("first", false, Exclusion::None, Some(ForcedPick { min_limit: 2, max_limit: 2 })),
            mode("second", false, Exclusion::None, Some(ForcedPick { min_limit: 2, max_limit: 2 })),
            mode("a", true, Exclusion::None, None),
        ];
        const BOTH_SET: ModeSet = ModeSet {
            modes: BOTH,
            idle: ModeId("idle"),
            recharge: ModeId("idle"),
            run: None,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut counters = vec![
            ForcedCounter { mode: ModeId("first"), count: 5, limit: 2 },
            ForcedCounter { mode: ModeId("second"), count: 5, limit: 2 },
        ];
        let pick = pick_next_mode(&BOTH_SET, &mut counters, &ctx("a"), &mut rng);
        assert_eq!(pick, ModeId("first"));
        assert_eq!(counters[1].count, 6, "losing counter keeps accruing");
    }

    #[test]
    fn game_over_runs_until_centered_then_idles() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut context = ctx("a");
        context.game_over = true;
        assert_eq!(pick_next_mode(&SET, &mut [], &context, &mut rng), ModeId("run"));
        context.centered = true;
        assert_eq!(pick_next_mode(&SET, &mut [], &context, &mut rng), ModeId("idle"));
    }

    #[test]
    fn repeat_chance_can_return_previous() {
        // With repeat probability 1.0 the previous selectable mode always wins.
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut context = ctx("a");
        context.repeat_chance = 1.0;
        assert_eq!(pick_next_mode(&SET, &mut [], &context, &mut rng), ModeId("a"));
        // But never for a sequence-only previous mode.
        context.previous = ModeId("finisher");
        let pick = pick_next_mode(&SET, &mut [], &context, &mut rng);
        assert_ne!(pick, ModeId("finisher"));
    }
}
