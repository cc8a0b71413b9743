//! Host capabilities the pipeline depends on.
//!
//! Resolution stages never read the process environment or spawn programs
//! directly. They go through [`Environment`] and [`CommandRunner`], so tests
//! can hand the pipeline canned variables and canned program output.

use std::{io, process::Command};

/// Read access to environment variables.
pub trait Environment {
    /// Returns the value of `key`, or `None` if unset or not valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;
}

/// Captured result of a finished program.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandOutput {
    /// Whether the program exited with status zero.
    pub success: bool,
    /// Exit code, if the program exited normally.
    pub code: Option<i32>,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl CommandOutput {
    /// Standard output followed by standard error.
    ///
    /// Some tools (`java -XshowSettings`) report on stderr.
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stdout.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }
}

/// Runs external programs to completion.
pub trait CommandRunner {
    /// Runs `program` with `args` and waits for it to exit.
    ///
    /// An `Err` means the program could not be started at all; a program that
    /// ran and failed is reported through [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}

/// Everything the pipeline needs from its host.
pub trait Host: Environment + CommandRunner {}

impl<T: Environment + CommandRunner> Host for T {}

/// The real process environment and `PATH`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHost;

impl Environment for SystemHost {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl CommandRunner for SystemHost {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let path = which::which(program).map_err(|e| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{program} not found in PATH: {e}"),
            )
        })?;
        log::debug!("Running {} {}", path.display(), args.join(" "));

        let output = Command::new(&path).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// In-memory host for unit tests.
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    pub(crate) struct FakeHost {
        pub vars: HashMap<String, String>,
        pub programs: HashMap<String, io::Result<CommandOutput>>,
        pub calls: std::cell::RefCell<Vec<String>>,
    }

    impl FakeHost {
        pub fn with_var(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.into(), value.into());
            self
        }

        pub fn with_program(mut self, program: &str, output: io::Result<CommandOutput>) -> Self {
            self.programs.insert(program.into(), output);
            self
        }
    }

    impl Environment for FakeHost {
        fn var(&self, key: &str) -> Option<String> {
            self.vars.get(key).cloned()
        }
    }

    impl CommandRunner for FakeHost {
        fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
            self.calls
                .borrow_mut()
                .push(format!("{program} {}", args.join(" ")));
            match self.programs.get(program) {
                Some(Ok(output)) => Ok(output.clone()),
                Some(Err(e)) => Err(io::Error::new(e.kind(), e.to_string())),
                None => Err(io::Error::new(io::ErrorKind::NotFound, program.to_string())),
            }
        }
    }
}
