//! Line input for playback commands and prompts.
//!
//! The controller needs two things from its input: a non-blocking check for a
//! line typed while a sentence was being spoken, and a blocking read for the
//! pause wait and yes/no prompts. On Unix, [`PolledStdin`] polls the stdin
//! descriptor for readiness. Elsewhere [`BlockingStdin`] never reports a
//! pending line, so commands are only taken at pause and prompt points.

use std::io::{self, Write};

use crate::util::interrupt::InterruptFlag;

pub trait CommandInput {
    /// A complete line if one is already waiting, without blocking.
    fn try_read_line(&mut self) -> io::Result<Option<String>>;

    /// Block until a line arrives. `Ok(None)` at end of input; an
    /// [`io::ErrorKind::Interrupted`] error once the user pressed Ctrl+C,
    /// as soon as the adapter next looks at the interrupt flag.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

impl<T: CommandInput + ?Sized> CommandInput for &mut T {
    fn try_read_line(&mut self) -> io::Result<Option<String>> {
        (**self).try_read_line()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

impl<T: CommandInput + ?Sized> CommandInput for Box<T> {
    fn try_read_line(&mut self) -> io::Result<Option<String>> {
        (**self).try_read_line()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

pub fn interrupted() -> io::Error {
    io::Error::new(io::ErrorKind::Interrupted, "interrupted by user")
}

/// The best stdin adapter for this platform.
pub fn stdin_input(interrupt: InterruptFlag) -> Box<dyn CommandInput> {
    #[cfg(unix)]
    {
        match PolledStdin::new(interrupt.clone()) {
            Ok(input) => return Box::new(input),
            Err(err) => log::warn!("stdin polling unavailable, commands wait for pauses: {err}"),
        }
    }
    Box::new(BlockingStdin::new(interrupt))
}

/// Plain blocking stdin. Never has a line pending between sentences.
///
/// The Ctrl+C handler does not cut a pending `read` short, so a press while
/// this adapter waits is only reported after the next line or end of input.
#[derive(Debug)]
pub struct BlockingStdin {
    interrupt: InterruptFlag,
}

impl BlockingStdin {
    pub fn new(interrupt: InterruptFlag) -> Self {
        Self { interrupt }
    }
}

impl CommandInput for BlockingStdin {
    fn try_read_line(&mut self) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.interrupt.is_set() {
            return Err(interrupted());
        }
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        if self.interrupt.is_set() {
            return Err(interrupted());
        }
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }
}

/// Print `question` and block for the answer.
pub fn ask<I: CommandInput + ?Sized>(input: &mut I, question: &str) -> io::Result<Option<String>> {
    print!("{question}");
    io::stdout().flush()?;
    input.read_line()
}

/// `y` or `yes` in any case confirms; everything else, end of input included,
/// declines.
pub fn is_yes(answer: Option<&str>) -> bool {
    matches!(
        answer.map(|a| a.trim().to_lowercase()).as_deref(),
        Some("y") | Some("yes")
    )
}

#[cfg(unix)]
pub use polled::PolledStdin;

#[cfg(unix)]
mod polled {
    use std::{
        fs::File,
        io::{self, Read},
        os::fd::{AsFd, OwnedFd},
    };

    use nix::{
        errno::Errno,
        poll::{poll, PollFd, PollFlags, PollTimeout},
    };

    use super::{interrupted, CommandInput};
    use crate::util::interrupt::InterruptFlag;

    /// How long a blocking read sleeps in `poll` before rechecking Ctrl+C.
    const POLL_INTERVAL_MS: u16 = 100;

    /// Reads stdin through a duplicated descriptor so readiness checks see
    /// exactly the bytes this adapter has not consumed yet.
    #[derive(Debug)]
    pub struct PolledStdin {
        source: File,
        pending: Vec<u8>,
        eof: bool,
        interrupt: InterruptFlag,
    }

    impl PolledStdin {
        pub fn new(interrupt: InterruptFlag) -> io::Result<Self> {
            let fd = io::stdin().as_fd().try_clone_to_owned()?;
            Ok(Self::from_fd(fd, interrupt))
        }

        /// Read commands from any readable descriptor, such as a pipe.
        pub fn from_fd(fd: OwnedFd, interrupt: InterruptFlag) -> Self {
            Self {
                source: File::from(fd),
                pending: Vec::new(),
                eof: false,
                interrupt,
            }
        }

        fn take_line(&mut self) -> Option<String> {
            let end = self.pending.iter().position(|&byte| byte == b'\n')?;
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            Some(decode(&line[..end]))
        }

        /// Whatever is left after end of input, if anything.
        fn take_rest(&mut self) -> Option<String> {
            if self.pending.is_empty() {
                return None;
            }
            let rest = std::mem::take(&mut self.pending);
            Some(decode(&rest))
        }

        fn readable(&self, timeout: PollTimeout) -> io::Result<bool> {
            let mut fds = [PollFd::new(self.source.as_fd(), PollFlags::POLLIN)];
            match poll(&mut fds, timeout) {
                Ok(ready) => Ok(ready > 0),
                Err(Errno::EINTR) => Ok(false),
                Err(err) => Err(err.into()),
            }
        }

        fn fill(&mut self) -> io::Result<()> {
            let mut buf = [0u8; 1024];
            match self.source.read(&mut buf) {
                Ok(0) => self.eof = true,
                Ok(read) => self.pending.extend_from_slice(&buf[..read]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
            Ok(())
        }
    }

    impl CommandInput for PolledStdin {
        fn try_read_line(&mut self) -> io::Result<Option<String>> {
            if let Some(line) = self.take_line() {
                return Ok(Some(line));
            }
            if !self.eof && self.readable(PollTimeout::ZERO)? {
                self.fill()?;
            }
            if let Some(line) = self.take_line() {
                return Ok(Some(line));
            }
            Ok(if self.eof { self.take_rest() } else { None })
        }

        fn read_line(&mut self) -> io::Result<Option<String>> {
            loop {
                if self.interrupt.is_set() {
                    return Err(interrupted());
                }
                if let Some(line) = self.take_line() {
                    return Ok(Some(line));
                }
                if self.eof {
                    return Ok(self.take_rest());
                }
                if self.readable(PollTimeout::from(POLL_INTERVAL_MS))? {
                    self.fill()?;
                }
            }
        }
    }

    fn decode(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes)
            .trim_end_matches('\r')
            .to_string()
    }

}

/// Replays canned input. Each `polls` entry is what was typed during one
/// sentence: `None` for nothing, or one or more `\n`-separated lines that are
/// handed out one per `try_read_line` call until the batch is used up. Blocking
/// reads come from `lines`; an exhausted queue reads as end of input, or as an
/// interrupt when `interrupt_when_exhausted` is set.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedInput {
    polls: std::collections::VecDeque<Option<String>>,
    batch: Option<std::collections::VecDeque<String>>,
    lines: std::collections::VecDeque<String>,
    pub interrupt_when_exhausted: bool,
    pub polls_made: usize,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polls<'a>(mut self, polls: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        self.polls = polls.into_iter().map(|p| p.map(str::to_string)).collect();
        self
    }

    pub fn lines<'a>(mut self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        self.lines = lines.into_iter().map(str::to_string).collect();
        self
    }
}

#[cfg(test)]
impl CommandInput for ScriptedInput {
    fn try_read_line(&mut self) -> io::Result<Option<String>> {
        self.polls_made += 1;
        if let Some(batch) = self.batch.as_mut() {
            let line = batch.pop_front();
            if line.is_none() {
                self.batch = None;
            }
            return Ok(line);
        }
        match self.polls.pop_front().flatten() {
            Some(typed) => {
                let mut batch: std::collections::VecDeque<String> =
                    typed.split('\n').map(str::to_string).collect();
                let line = batch.pop_front();
                self.batch = Some(batch);
                Ok(line)
            }
            None => Ok(None),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.lines.pop_front() {
            Some(line) => Ok(Some(line)),
            None if self.interrupt_when_exhausted => Err(interrupted()),
            None => Ok(None),
        }
    }
}
