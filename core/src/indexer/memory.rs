use {
    log::debug,
    std::{fmt::Debug, fs::read_to_string},
};

const MEMINFO_PATH: &str = "/proc/meminfo";

/// A source of "available memory" readings for the construction-time memory guard.
pub trait MemoryProbe: Debug {
    /// Returns the number of bytes currently available, or `None` if this cannot be determined.
    fn available_bytes(&mut self) -> Option<u64>;
}

/// Reads the system's available memory from `/proc/meminfo`.
///
/// On systems without `/proc/meminfo` every reading is `None`, so the memory guard never fires.
#[derive(Debug, Default)]
pub struct SystemMemoryProbe;

impl MemoryProbe for SystemMemoryProbe {
    fn available_bytes(&mut self) -> Option<u64> {
        match read_to_string(MEMINFO_PATH) {
            Ok(meminfo) => parse_mem_available(&meminfo),
            Err(e) => {
                debug!("Unable to read {MEMINFO_PATH}: {e}");
                None
            }
        }
    }
}

/// Extracts the `MemAvailable` field, in bytes, from the contents of `/proc/meminfo`.
pub(crate) fn parse_mem_available(meminfo: &str) -> Option<u64> {
    let line = meminfo.lines().find(|line| line.starts_with("MemAvailable:"))?;
    let mut fields = line["MemAvailable:".len()..].split_whitespace();
    let value: u64 = fields.next()?.parse().ok()?;

    match fields.next() {
        Some("kB") => value.checked_mul(1024),
        None => Some(value),
        Some(unit) => {
            debug!("Unknown MemAvailable unit {unit:?}");
            None
        }
    }
}
