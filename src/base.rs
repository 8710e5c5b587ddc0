// Diagnostic dump support, used by the service layer to report runtime state.
use std::io::{self, Write};

/// One tabulation level in a dump report.
pub const DUMP_TAB: &str = "  ";

/// Types that can append a human readable report of their internal state.
pub trait Dumpable {
    /// Write this object's state to `writer`, prefixing every line with `prefix`.
    fn dump(&self, writer: &mut dyn Write, prefix: &str) -> io::Result<()>;
}

/// Returns `prefix` with one extra tabulation level appended.
pub fn add_dump_tab(prefix: &str) -> String {
    format!("{prefix}{DUMP_TAB}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_dump_tab_appends_one_level() {
        assert_eq!(add_dump_tab(""), DUMP_TAB);
        assert_eq!(add_dump_tab(DUMP_TAB), format!("{DUMP_TAB}{DUMP_TAB}"));
    }
}
