// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deadline guard for potentially slow compiler calls.
//!
//! Elk layout is known to take minutes on pathological graphs; the guard
//! races the operation against a timer so the caller fails fast instead of
//! hanging. First to settle wins. The guard does not cancel the losing
//! operation: work already handed to the blocking pool runs to completion in
//! the background and its result is discarded.

use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Deadline applied to every guarded compiler call.
pub const OPERATION_DEADLINE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineExceeded {
    label: &'static str,
    deadline: Duration,
}

impl DeadlineExceeded {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl fmt::Display for DeadlineExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} timed out after {}s; try `layout: dagre`, which is much faster than elk",
            self.label,
            self.deadline.as_secs()
        )
    }
}

impl std::error::Error for DeadlineExceeded {}

/// Runs `operation` against `deadline`.
///
/// Returns the operation's output if it settles first, or a
/// [`DeadlineExceeded`] naming `label` if the timer fires first.
pub async fn with_deadline<F>(
    label: &'static str,
    deadline: Duration,
    operation: F,
) -> Result<F::Output, DeadlineExceeded>
where
    F: Future,
{
    tokio::select! {
        output = operation => Ok(output),
        _ = tokio::time::sleep(deadline) => Err(DeadlineExceeded { label, deadline }),
    }
}

#[cfg(test)]
mod tests {
    use super::{with_deadline, DeadlineExceeded, OPERATION_DEADLINE};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn fast_operation_wins_the_race() {
        let result = with_deadline("compile", OPERATION_DEADLINE, async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_names_operation_and_seconds() {
        let err = with_deadline("render", OPERATION_DEADLINE, std::future::pending::<()>())
            .await
            .unwrap_err();
        assert_eq!(err.label(), "render");
        let message = err.to_string();
        assert!(message.contains("render"), "got {message}");
        assert!(message.contains("30s"), "got {message}");
        assert!(message.contains("dagre"), "got {message}");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_loses_to_the_timer() {
        let err = with_deadline("compile", Duration::from_secs(1), async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            "too late"
        })
        .await
        .unwrap_err();
        assert_eq!(err, DeadlineExceeded { label: "compile", deadline: Duration::from_secs(1) });
    }

    #[tokio::test]
    async fn detached_loser_runs_to_completion() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let handle = tokio::task::spawn_blocking(move || {
            std::thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::SeqCst);
        });

        let result = with_deadline("render", Duration::from_millis(5), handle).await;
        assert!(result.is_err(), "deadline should fire first");
        assert!(!finished.load(Ordering::SeqCst));

        // The guard stopped waiting, but the blocking work was not cancelled.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(finished.load(Ordering::SeqCst));
    }
}
