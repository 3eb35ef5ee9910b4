use std::{
    io,
    process::{Command, ExitStatus, Stdio},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use log::{debug, warn};

use crate::error::{RunnerError, EXIT_INTERRUPTED};

/// Set once the terminal delivered an interrupt.
#[derive(Clone, Debug, Default)]
pub(crate) struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Installs the process-wide Ctrl-C handler.
    ///
    /// The child shares our process group and receives the signal itself, so the handler
    /// only records it and lets the runner wait for the child to exit.
    pub(crate) fn install() -> Result<Self, RunnerError> {
        let interrupt = Interrupt::default();
        let flag = interrupt.0.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
        Ok(interrupt)
    }

    pub(crate) fn raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    fn raise(&self) {
        self.0.store(true, Ordering::SeqCst)
    }
}

/// Runs `cmd` (executable first) with inherited stdio, blocks until it exits and returns
/// its exit code.
pub(crate) fn execute(cmd: &[String], interrupt: &Interrupt) -> Result<i32, RunnerError> {
    let Some((program, args)) = cmd.split_first() else {
        return Err(RunnerError::ExecutableNotFound(String::new()));
    };

    if interrupt.raised() {
        return Err(RunnerError::Interrupted);
    }

    debug!("Spawning {program}");
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => RunnerError::ExecutableNotFound(program.clone()),
            _ => RunnerError::Launch {
                program: program.clone(),
                source: err,
            },
        })?;
    debug!("{program} exited with {status}");

    if interrupt.raised() {
        return Err(RunnerError::Interrupted);
    }

    Ok(exit_code(status))
}

/// Maps the child's exit status to the runner's exit code.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            warn!("QEMU terminated by signal {signal}");
            // SIGINT
            if signal == 2 {
                return EXIT_INTERRUPTED;
            }
            return 128 + signal;
        }
    }

    warn!("QEMU terminated without an exit code");
    1
}
