//! Property tests for the simulation invariants

use proptest::prelude::*;

use portfolio_platformer::content::sample_sections;
use portfolio_platformer::sim::{Camera, GameEvent, TickInput, Viewport, WorldLayout, WorldState, tick};
use portfolio_platformer::tuning::{BounceModel, TriggerPolicy};
use portfolio_platformer::{Tuning, time_factor};

fn tick_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| TickInput {
        left,
        right,
        jump,
    })
}

fn frames() -> impl Strategy<Value = Vec<(TickInput, f32)>> {
    prop::collection::vec((tick_input(), 0.0f32..0.2), 1..400)
}

fn viewport() -> impl Strategy<Value = Viewport> {
    (320.0f32..2400.0, 400.0f32..1400.0).prop_map(|(w, h)| Viewport::new(w, h))
}

fn tuning() -> impl Strategy<Value = Tuning> {
    prop_oneof![Just(Tuning::smooth()), Just(Tuning::classic())]
}

/// Spring settles slower than the cooldown, two-phase much faster
fn bounce() -> impl Strategy<Value = BounceModel> {
    prop_oneof![Just(Tuning::smooth().bounce), Just(Tuning::classic().bounce)]
}

proptest! {
    #[test]
    fn player_stays_in_world(tuning in tuning(), viewport in viewport(), frames in frames()) {
        let mut state = WorldState::new(tuning, viewport, &sample_sections());
        for (input, dt) in frames {
            tick(&mut state, &input, dt);
            let layout = &state.layout;
            let player = &state.player;
            prop_assert!(player.pos.x >= 0.0);
            prop_assert!(player.pos.x <= layout.max_player_x());
            prop_assert!(player.pos.y <= layout.standing_y() + 1e-3);

            let camera = state.camera.x;
            prop_assert!(camera >= 0.0);
            prop_assert!(camera <= layout.max_camera_x());
        }
    }

    #[test]
    fn camera_is_clamped_and_monotonic(
        tuning in tuning(),
        viewport in viewport(),
        a in -500.0f32..6000.0,
        b in -500.0f32..6000.0,
    ) {
        let layout = WorldLayout::new(viewport, &tuning, 6);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let mut first = Camera::default();
        first.follow(lo, &layout);
        let mut second = Camera::default();
        second.follow(hi, &layout);

        prop_assert!(first.x >= 0.0 && first.x <= layout.max_camera_x());
        prop_assert!(second.x >= 0.0 && second.x <= layout.max_camera_x());
        prop_assert!(first.x <= second.x);
    }

    #[test]
    fn one_hit_per_cooldown_window(
        bounce in bounce(),
        viewport in viewport(),
        frames in frames(),
    ) {
        let cooldown = 1.0;
        let tuning = Tuning {
            bounce,
            trigger: TriggerPolicy::FromBelow { cooldown },
            activation_delay: 0.0,
            ..Tuning::smooth()
        };
        let mut state = WorldState::new(tuning, viewport, &sample_sections());
        let mut last_hit: Vec<Option<f64>> = vec![None; state.blocks.len()];

        for (input, dt) in frames {
            // Bounce state each block will have when the hit test runs
            let model = state.tuning.bounce.scaled(state.layout.scale);
            let settled: Vec<bool> = state
                .blocks
                .iter()
                .map(|b| {
                    let mut next = b.bounce;
                    next.step(&model, time_factor(dt));
                    next.is_settled()
                })
                .collect();

            for event in tick(&mut state, &input, dt) {
                if let GameEvent::BlockHit { block } = event {
                    prop_assert!(settled[block]);
                    if let Some(previous) = last_hit[block] {
                        prop_assert!(state.clock - previous > cooldown);
                    }
                    last_hit[block] = Some(state.clock);
                }
            }
        }
    }
}
