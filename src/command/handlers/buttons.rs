//! Brick button command handlers
//!
//! The multi-button waits operate on a target set: `buttons_pressed`
//! waits for all targets down at once, `buttons_clicked` for a joint
//! off→on→off cycle. Both poll the run state first on every iteration.

use super::HandlerContext;
use crate::command::{CommandError, Reply};
use crate::device::BrickButton;

fn parse_buttons(args: &[&str]) -> Result<Vec<BrickButton>, CommandError> {
    args.iter()
        .map(|name| BrickButton::from_name(name).ok_or(CommandError::InvalidButton))
        .collect()
}

fn all_down(down: &[BrickButton], targets: &[BrickButton]) -> bool {
    targets.iter().all(|b| down.contains(b))
}

fn any_down(down: &[BrickButton], targets: &[BrickButton]) -> bool {
    targets.iter().any(|b| down.contains(b))
}

/// `buttons_pressed <button>...` — block until every listed button is
/// held down simultaneously, or until cancellation.
pub async fn buttons_pressed(
    ctx: &HandlerContext,
    args: &[&str],
) -> Result<Reply, CommandError> {
    let targets = parse_buttons(args)?;
    let pad = ctx.bindings.buttons();

    loop {
        if !ctx.run_state.is_running() {
            return Ok(Reply::Exit);
        }
        if all_down(&pad.pressed().await, &targets) {
            return Ok(Reply::Success);
        }
        ctx.poll_pause().await;
    }
}

/// `buttons_clicked <button>...` — block until all listed buttons go
/// through a joint off→on→off cycle, or until cancellation. A press
/// already in progress is drained first.
pub async fn buttons_clicked(
    ctx: &HandlerContext,
    args: &[&str],
) -> Result<Reply, CommandError> {
    let targets = parse_buttons(args)?;
    let pad = ctx.bindings.buttons();

    while ctx.run_state.is_running() && any_down(&pad.pressed().await, &targets) {
        ctx.poll_pause().await;
    }
    while ctx.run_state.is_running() && !all_down(&pad.pressed().await, &targets) {
        ctx.poll_pause().await;
    }
    while ctx.run_state.is_running() && any_down(&pad.pressed().await, &targets) {
        ctx.poll_pause().await;
    }

    if ctx.run_state.is_running() {
        Ok(Reply::Success)
    } else {
        Ok(Reply::Exit)
    }
}

/// `button_status <button>` — report whether the button is held down.
pub async fn button_status(ctx: &HandlerContext, args: &[&str]) -> Result<Reply, CommandError> {
    let button = BrickButton::from_name(args[0]).ok_or(CommandError::InvalidButton)?;
    let down = ctx.bindings.buttons().pressed().await;
    Ok(Reply::Bool(down.contains(&button)))
}
