use std::fmt;
use std::io::BufRead;

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

/// Whether an access fetches an instruction or touches data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Instruction,
    Data,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Instruction => f.write_str("instruction"),
            AccessKind::Data => f.write_str("data"),
        }
    }
}

/// One access from the trace. Consumed once by the simulator, never retained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    pub kind: AccessKind,
    pub address: u32,
}

lazy_static! {
    static ref LINE_PATTERN: Regex = Regex::new(r"^\s*([A-Za-z])\s+([0-9]+)\s*$").unwrap();
}

/// Parses one trace line of the form `<kind> <decimal address>`
///
/// A leading `I` marks an instruction fetch, any other letter is treated as a data
/// access. Returns None for lines that do not match the format, including addresses that
/// overflow 32 bits
///
/// # Examples
///
/// ```
/// use hierlib::trace::{parse_record, AccessKind};
/// let record = parse_record("I 1024").unwrap();
/// assert_eq!(record.kind, AccessKind::Instruction);
/// assert_eq!(record.address, 1024);
/// ```
pub fn parse_record(line: &str) -> Option<AccessRecord> {
    let captures = LINE_PATTERN.captures(line)?;
    let kind = if &captures[1] == "I" {
        AccessKind::Instruction
    } else {
        AccessKind::Data
    };
    let address = captures[2].parse::<u32>().ok()?;
    Some(AccessRecord { kind, address })
}

/// Reads access records from a line-oriented trace
///
/// Malformed lines are logged and skipped so one bad line does not abort a long run;
/// blank lines are skipped silently. IO errors are passed through to the caller
pub struct TraceReader<R> {
    reader: R,
    // Reused across lines to keep the hot loop free of allocations
    line: String,
    skipped: u64,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            skipped: 0,
        }
    }

    /// The number of malformed lines skipped so far
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = std::io::Result<AccessRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            if self.line.trim().is_empty() {
                continue;
            }
            match parse_record(&self.line) {
                Some(record) => return Some(Ok(record)),
                None => {
                    self.skipped += 1;
                    warn!("skipping malformed trace line: {:?}", self.line.trim_end());
                }
            }
        }
    }
}
