use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Result};

use crate::errors::ExecutionError;
use crate::executor::execute_request;
use crate::report::ResponseReport;
use crate::request::RequestDescriptor;

/// What the dispatcher does when one execution fails while others are still
/// running or queued for printing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FailurePolicy {
    /// Print the failure and keep consuming sibling results. The run still
    /// ends in an error if anything failed.
    Report,
    /// Return on the first failure. Siblings already in flight finish their
    /// network work but their reports are discarded.
    Abort,
}

/// Fans the request out over `count` OS threads and blocks until every
/// execution has finished.
///
/// Workers never print: each sends its `Result` over a channel and the
/// dispatching thread serializes all output, so concurrent reports cannot
/// interleave mid-line. Arrival order across executions is unspecified.
pub fn dispatch(request: &RequestDescriptor, count: u32, policy: FailurePolicy) -> Result<()> {
    let (tx, rx) = mpsc::channel::<(u32, Result<ResponseReport, ExecutionError>)>();

    thread::scope(|scope| {
        for seq in 1..=count {
            let tx = tx.clone();
            scope.spawn(move || {
                log::debug!("execution #{seq} started");
                let outcome = execute_request(request);
                // the receiver is gone when the abort policy bailed early
                let _ = tx.send((seq, outcome));
            });
        }
        drop(tx);

        let mut stdout = io::stdout().lock();
        let mut failed = 0u32;
        for (seq, outcome) in rx {
            match outcome {
                Ok(report) => stdout.write_all(report.render().as_bytes())?,
                Err(err) => {
                    log::warn!("execution #{seq} failed: {err}");
                    writeln!(stdout, "Execution #{seq} failed: {err}")?;
                    if policy == FailurePolicy::Abort {
                        return Err(anyhow!("execution #{seq} failed: {err}"));
                    }
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(anyhow!("{failed} of {count} executions failed"));
        }
        Ok(())
    })
}
