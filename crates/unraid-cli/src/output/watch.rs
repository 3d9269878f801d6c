//! Watch mode: rerun a command on an interval until cancelled.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::CliError;

/// ANSI sequence that homes the cursor and clears the screen.
const CLEAR: &str = "\x1b[H\x1b[2J";

/// Rerun `tick` every `interval`, clearing the screen before each pass.
///
/// The first pass runs immediately. Cancellation between passes returns
/// `Ok(())`; any error from `tick` stops the loop and propagates.
///
/// # Errors
///
/// Returns the first error produced by `tick`, or an IO error from clearing
/// the screen.
pub async fn run<F, Fut>(
    cancel: &CancellationToken,
    interval: Duration,
    mut tick: F,
) -> Result<(), CliError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), CliError>>,
{
    let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);

    loop {
        clear_screen()?;
        tick().await?;

        tokio::select! {
            () = cancel.cancelled() => return Ok(()),
            _ = timer.tick() => {}
        }
    }
}

/// A token that is cancelled when Ctrl-C is received.
#[must_use]
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });
    token
}

fn clear_screen() -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{CLEAR}")?;
    stdout.flush()?;
    Ok(())
}
