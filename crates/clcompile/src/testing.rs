//! In-memory provider and reporter for the unit tests. The provider counts
//! every acquisition and release so the tests can check the resource
//! accounting.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    error::{CL_BUILD_PROGRAM_FAILURE, ClError},
    provider::ComputeProvider,
    report::Reporter,
};

/// Sources containing this token fail to build.
pub const BAD_TOKEN: &str = "#error";
pub const FAKE_LOG: &str = "<source>:1:2: error: unexpected token\n#error\n ^";

#[derive(Debug, Default)]
pub struct Ledger {
    pub calls: Cell<usize>,
    pub contexts_created: Cell<usize>,
    pub contexts_released: Cell<usize>,
    pub programs_created: Cell<usize>,
    pub programs_released: Cell<usize>,
    /// Byte length of every source handed to `create_program`.
    pub sources: RefCell<Vec<usize>>,
    pub options: RefCell<Vec<String>>,
}

fn bump(c: &Cell<usize>) {
    c.set(c.get() + 1);
}

pub struct FakeProvider {
    pub device_counts: Vec<usize>,
    pub platform_error: Option<i32>,
    pub device_error: Option<i32>,
    pub name_error: Option<i32>,
    pub context_error: Option<i32>,
    pub program_error: Option<i32>,
    pub log_query_fails: bool,
    pub ledger: Rc<Ledger>,
}

impl FakeProvider {
    /// One platform per entry, each with the given number of devices.
    pub fn new(device_counts: &[usize]) -> Self {
        Self {
            device_counts: device_counts.to_vec(),
            platform_error: None,
            device_error: None,
            name_error: None,
            context_error: None,
            program_error: None,
            log_query_fails: false,
            ledger: Rc::default(),
        }
    }

    fn fail(&self, code: Option<i32>) -> Result<(), ClError> {
        bump(&self.ledger.calls);
        match code {
            Some(code) => Err(ClError::Api(code)),
            None => Ok(()),
        }
    }
}

pub struct FakeContext {
    ledger: Rc<Ledger>,
}

impl Drop for FakeContext {
    fn drop(&mut self) {
        bump(&self.ledger.contexts_released);
    }
}

pub struct FakeProgram {
    ledger: Rc<Ledger>,
    source: String,
    log: Vec<u8>,
}

impl Drop for FakeProgram {
    fn drop(&mut self) {
        bump(&self.ledger.programs_released);
    }
}

impl ComputeProvider for FakeProvider {
    type Platform = usize;
    type Device = (usize, usize);
    type Context = FakeContext;
    type Program = FakeProgram;

    fn platforms(&self) -> Result<Vec<usize>, ClError> {
        self.fail(self.platform_error)?;
        Ok((0..self.device_counts.len()).collect())
    }

    fn devices(&self, platform: &usize) -> Result<Vec<(usize, usize)>, ClError> {
        self.fail(self.device_error)?;
        Ok((0..self.device_counts[*platform]).map(|d| (*platform, d)).collect())
    }

    fn device_name(&self, &(p, d): &(usize, usize)) -> Result<String, ClError> {
        self.fail(self.name_error)?;
        Ok(format!("Fake Device {p}.{d}"))
    }

    fn create_context(&self, _device: &(usize, usize)) -> Result<FakeContext, ClError> {
        self.fail(self.context_error)?;
        bump(&self.ledger.contexts_created);
        Ok(FakeContext { ledger: self.ledger.clone() })
    }

    fn create_program(&self, _context: &FakeContext, source: &str) -> Result<FakeProgram, ClError> {
        self.fail(self.program_error)?;
        bump(&self.ledger.programs_created);
        self.ledger.sources.borrow_mut().push(source.len());
        Ok(FakeProgram {
            ledger: self.ledger.clone(),
            source: source.to_owned(),
            log: Vec::new(),
        })
    }

    fn build_program(
        &self,
        program: &mut FakeProgram,
        _device: &(usize, usize),
        options: &str,
    ) -> Result<(), ClError> {
        self.fail(None)?;
        self.ledger.options.borrow_mut().push(options.to_owned());
        if program.source.contains(BAD_TOKEN) {
            program.log = FAKE_LOG.as_bytes().to_vec();
            return Err(ClError::Api(CL_BUILD_PROGRAM_FAILURE));
        }
        Ok(())
    }

    fn build_log(&self, program: &FakeProgram, _device: &(usize, usize)) -> Result<String, ClError> {
        // length query
        self.fail(self.log_query_fails.then_some(-30))?;
        let len = program.log.len();

        // content query, room for the terminator
        let mut buf = vec![0u8; len + 1];
        buf[..len].copy_from_slice(&program.log);
        Ok(String::from_utf8_lossy(&buf).trim_end_matches('\0').to_owned())
    }
}

/// Keeps every message in memory, in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturingReporter {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Info(String),
    Error(String),
}

impl CapturingReporter {
    pub fn infos(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|l| match l {
            Line::Info(m) => Some(m.as_str()),
            Line::Error(_) => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|l| match l {
            Line::Error(m) => Some(m.as_str()),
            Line::Info(_) => None,
        })
    }
}

impl Reporter for CapturingReporter {
    fn info(&mut self, message: &str) {
        self.lines.push(Line::Info(message.to_owned()));
    }

    fn error(&mut self, message: &str) {
        self.lines.push(Line::Error(message.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capturing_reporter_keeps_order_and_channel() {
        let mut r = CapturingReporter::default();
        r.info("found device X");
        r.error("boom");
        r.info("done");

        assert_eq!(r.infos().collect::<Vec<_>>(), ["found device X", "done"]);
        assert_eq!(r.errors().collect::<Vec<_>>(), ["boom"]);
        assert_eq!(r.lines[1], Line::Error("boom".into()));
    }

    #[test]
    fn capturing_reporter_drives_a_generic_run() {
        fn emit<R: Reporter>(r: &mut R) {
            r.info("building a.cl");
            r.error("failed");
        }
        let mut r = CapturingReporter::default();
        emit(&mut r);
        assert_eq!(
            r.lines,
            [Line::Info("building a.cl".into()), Line::Error("failed".into())]
        );
    }
}
