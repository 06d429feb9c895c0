// JSON-lines writer for world updates and simulation state.

use super::protocol::{SimMessage, WorldUpdateDto};
use crate::use_cases::{SimState, WorldUpdate};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast;
use tracing::{error, warn};

/// Serializes every `every`-th world update, plus any update whose state is
/// not `Running`, as one JSON line. Returns the writer once the world channel
/// closes.
pub async fn snapshot_writer<W>(
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    every: u64,
    mut out: W,
) -> std::io::Result<W>
where
    W: AsyncWrite + Unpin,
{
    let every = every.max(1);
    let mut last_state = SimState::Running;
    loop {
        match world_rx.recv().await {
            Ok(update) => {
                let state_changed = update.state != last_state;
                last_state = update.state;
                if update.tick % every != 0 && !state_changed {
                    continue;
                }

                if state_changed {
                    write_line(&mut out, &SimMessage::SimState(update.state.into())).await?;
                }
                let msg = SimMessage::WorldUpdate(WorldUpdateDto::from(update));
                write_line(&mut out, &msg).await?;
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "snapshot writer lagged; skipping to latest update");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    out.flush().await?;
    Ok(out)
}

async fn write_line<W>(out: &mut W, msg: &SimMessage) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(msg)
        .inspect_err(|e| error!(error = ?e, "failed to serialize message"))
        .map_err(std::io::Error::other)?;
    line.push(b'\n');
    out.write_all(&line).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(tick: u64, state: SimState) -> WorldUpdate {
        WorldUpdate {
            tick,
            state,
            tanks: Vec::new(),
            projectiles: Vec::new(),
            aim_cursor: None,
        }
    }

    #[tokio::test]
    async fn when_updates_stream_then_every_nth_tick_is_written() {
        let (world_tx, world_rx) = broadcast::channel(32);
        for tick in 1..=9 {
            world_tx
                .send(update(tick, SimState::Running))
                .expect("receiver alive");
        }
        drop(world_tx);

        let out = snapshot_writer(world_rx, 3, Vec::new())
            .await
            .expect("write to memory");
        let text = String::from_utf8(out).expect("utf8");
        let ticks: Vec<u64> = text
            .lines()
            .map(|l| {
                let v: serde_json::Value = serde_json::from_str(l).expect("json line");
                v["data"]["tick"].as_u64().expect("tick")
            })
            .collect();
        assert_eq!(ticks, vec![3, 6, 9]);
    }

    #[tokio::test]
    async fn when_state_changes_then_state_line_precedes_the_update() {
        let (world_tx, world_rx) = broadcast::channel(32);
        world_tx
            .send(update(1, SimState::GameOver))
            .expect("receiver alive");
        drop(world_tx);

        let out = snapshot_writer(world_rx, 100, Vec::new())
            .await
            .expect("write to memory");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"type":"SimState","data":"GameOver"}"#);
        assert!(lines[1].starts_with(r#"{"type":"WorldUpdate""#));
    }
}
