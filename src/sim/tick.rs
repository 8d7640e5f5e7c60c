//! Per-frame update step
//!
//! Advances the world by one display frame. All speeds in `Tuning` are per
//! reference frame (60 Hz); the frame delta is converted to a time factor so
//! movement is frame-rate independent.

use glam::Vec2;

use super::input::TickInput;
use super::state::{Activation, Facing, FloatingIndicator, GameEvent, PendingActivation, WorldState};
use crate::consts::*;
use crate::time_factor;
use crate::tuning::{HorizontalModel, TriggerPolicy};

/// Advance the world by `dt` seconds and return the events raised this frame
pub fn tick(state: &mut WorldState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let tf = time_factor(dt);
    let dt = tf / REFERENCE_FPS;
    let mut events = Vec::new();

    state.clock += dt as f64;
    state.frame_count += 1;

    update_indicators(state, tf);
    release_pending(state, dt, &mut events);
    update_player(state, input, tf);
    state.camera.follow(state.player.pos.x, &state.layout);
    update_blocks(state, tf, &mut events);

    events
}

fn update_indicators(state: &mut WorldState, tf: f32) {
    let rise = state.tuning.indicator.rise_speed * tf;
    let fade = state.tuning.indicator.fade_rate * tf;
    for indicator in &mut state.indicators {
        indicator.pos.y -= rise;
        indicator.opacity -= fade;
    }
    state.indicators.retain(|i| i.opacity > 0.0);
}

fn release_pending(state: &mut WorldState, dt: f32, events: &mut Vec<GameEvent>) {
    if state.pending.is_empty() {
        return;
    }
    for pending in &mut state.pending {
        pending.remaining -= dt;
    }
    let (due, waiting): (Vec<_>, Vec<_>) = state
        .pending
        .drain(..)
        .partition(|p| p.remaining <= 0.0);
    state.pending = waiting;
    events.extend(due.into_iter().map(|p| GameEvent::Activate(p.activation)));
}

fn update_player(state: &mut WorldState, input: &TickInput, tf: f32) {
    let tuning = &state.tuning;
    let layout = &state.layout;
    let player = &mut state.player;

    // Horizontal control
    let direction = input.direction();
    let max_speed = tuning.max_speed * layout.scale;
    match tuning.horizontal {
        HorizontalModel::Instant => {
            player.vel.x = direction as f32 * max_speed;
        }
        HorizontalModel::Accelerated {
            accel,
            friction,
            stop_epsilon,
        } => {
            if direction != 0 {
                player.vel.x += direction as f32 * accel * layout.scale * tf;
                player.vel.x = player.vel.x.clamp(-max_speed, max_speed);
            } else {
                player.vel.x *= friction.powf(tf);
                if player.vel.x.abs() < stop_epsilon {
                    player.vel.x = 0.0;
                }
            }
        }
    }
    match direction {
        d if d < 0 => player.facing = Facing::Left,
        d if d > 0 => player.facing = Facing::Right,
        _ => {}
    }

    // Jump on the press edge only
    let jump_pressed = input.jump && !player.jump_latch;
    player.jump_latch = input.jump;
    if jump_pressed && !player.jumping {
        player.vel.y = tuning.effective_jump_impulse(layout.compact);
        player.jumping = true;
    }

    // Integrate with the average velocity over the step
    let gravity = tuning.gravity * tf;
    player.pos.x += player.vel.x * tf;
    player.pos.y += (player.vel.y + gravity / 2.0) * tf;
    player.vel.y += gravity;

    // Ground
    if player.pos.y + player.size.y >= layout.ground_y {
        player.pos.y = layout.standing_y();
        player.vel.y = 0.0;
        player.jumping = false;
    }

    // World bounds
    let max_x = layout.max_player_x();
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = 0.0;
    } else if player.pos.x > max_x {
        player.pos.x = max_x;
        player.vel.x = 0.0;
    }

    // Walk cycle
    if player.vel.x.abs() > tuning.anim_threshold {
        player.frame_timer += tf;
        if player.frame_timer >= tuning.frame_interval {
            player.frame = (player.frame + 1) % WALK_FRAMES;
            player.frame_timer = 0.0;
        }
    } else {
        player.frame = 0;
        player.frame_timer = 0.0;
    }
}

fn update_blocks(state: &mut WorldState, tf: f32, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    let layout = &state.layout;
    let bounce = tuning.bounce.scaled(layout.scale);
    let player_box = state.player.bounds();
    let vel_y = state.player.vel.y;
    let now = state.clock;

    for (index, block) in state.blocks.iter_mut().enumerate() {
        block.bounce.step(&bounce, tf);

        if !player_box.overlaps(&block.hit_box(layout.hit_box)) {
            continue;
        }

        let settled = block.bounce.is_settled();
        let accepted = match tuning.trigger {
            TriggerPolicy::FromBelow { cooldown } => {
                settled && vel_y < 0.0 && block.last_hit.is_none_or(|t| now - t > cooldown)
            }
            TriggerPolicy::SettledOverlap => settled,
        };
        if !accepted {
            continue;
        }

        block.bounce.kick(&bounce);
        block.last_hit = Some(now);
        events.push(GameEvent::BlockHit { block: index });
        log::debug!("Block {} ({}) hit at t={:.2}s", index, block.label, now);

        let center_x = block.pos.x + layout.block_size / 2.0;
        if tuning.indicator.enabled {
            state.indicators.push(FloatingIndicator {
                pos: Vec2::new(center_x, block.pos.y),
                glyph: tuning.indicator.glyph.clone(),
                opacity: 1.0,
            });
        }

        let activation = Activation {
            block: index,
            label: block.label.clone(),
            content: block.content.clone(),
            anchor: Vec2::new(state.camera.to_screen_x(center_x), block.pos.y),
        };
        if tuning.activation_delay > 0.0 {
            state.pending.push(PendingActivation {
                activation,
                remaining: tuning.activation_delay,
            });
        } else {
            events.push(GameEvent::Activate(activation));
        }
    }
}
