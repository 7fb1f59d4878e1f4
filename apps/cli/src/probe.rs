//! Shell command used as a sampler probe

use std::fmt;
use std::io;
use std::process::{Command, ExitStatus, Output};

use sampler::Fault;
use thiserror::Error;

/// Exit status a command uses to ask the sampler to exit
pub const EXIT_REQUEST_CODE: i32 = 255;

/// Exit status of a process terminated by SIGINT, as reported by shells
pub const INTERRUPTED_CODE: i32 = 130;

/// Ordinary failure of one command run
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The command could not be started
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The command ran and exited unsuccessfully
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// A program and its arguments, run once per attempt
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    /// Split `argv` into program and arguments; `None` when empty
    pub fn new(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Run the command and return its trimmed stdout
    pub fn run(&self) -> Result<String, Fault<ProbeError>> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        self.classify(output)
    }

    fn classify(&self, output: Output) -> Result<String, Fault<ProbeError>> {
        if interrupted(output.status) {
            return Err(Fault::Interrupt);
        }
        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).trim().to_string()),
            Some(EXIT_REQUEST_CODE) => Err(Fault::Exit(EXIT_REQUEST_CODE)),
            _ => Err(Fault::Error(ProbeError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })),
        }
    }
}

impl fmt::Display for CommandProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn interrupted(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    status.signal() == Some(libc::SIGINT) || status.code() == Some(INTERRUPTED_CODE)
}

#[cfg(not(unix))]
fn interrupted(status: ExitStatus) -> bool {
    status.code() == Some(INTERRUPTED_CODE)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sh(script: &str) -> CommandProbe {
        CommandProbe::new(&["sh".to_string(), "-c".to_string(), script.to_string()]).unwrap()
    }

    #[test]
    fn success_returns_trimmed_stdout() {
        assert_eq!(sh("echo '  Running  '").run().unwrap(), "Running");
    }

    #[test]
    fn non_zero_exit_is_ordinary_failure() {
        match sh("echo nope >&2; exit 3").run() {
            Err(Fault::Error(ProbeError::Failed { stderr, status, .. })) => {
                assert_eq!(stderr, "nope");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_ordinary_failure() {
        let probe = CommandProbe::new(&["definitely-not-a-real-program-xyz".to_string()]).unwrap();
        assert!(matches!(probe.run(), Err(Fault::Error(ProbeError::Spawn { .. }))));
    }

    #[test]
    fn signal_codes() {
        assert!(matches!(sh("exit 130").run(), Err(Fault::Interrupt)));
        assert!(matches!(sh("kill -INT $$").run(), Err(Fault::Interrupt)));
        assert!(matches!(sh("exit 255").run(), Err(Fault::Exit(255))));
    }

    #[test]
    fn display_joins_argv() {
        assert_eq!(sh("true").to_string(), "sh -c true");
        assert!(CommandProbe::new(&[]).is_none());
    }
}
