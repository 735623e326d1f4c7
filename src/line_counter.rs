//! Streaming physical line counter

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Count lines in `reader`: one per terminator plus the final line
///
/// `\n`, `\r` and `\r\n` each count as a single terminator. The final line is
/// always counted, so an empty input is one line and `"a\n"` is two.
pub fn count_lines_in<R: Read>(reader: R) -> io::Result<usize> {
    let mut reader = BufReader::new(reader);
    let mut terminators = 0usize;
    let mut after_cr = false;

    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        for &byte in buf {
            match byte {
                b'\n' if after_cr => after_cr = false,
                b'\n' => terminators += 1,
                b'\r' => {
                    terminators += 1;
                    after_cr = true;
                }
                _ => after_cr = false,
            }
        }
        let consumed = buf.len();
        reader.consume(consumed);
    }

    Ok(terminators + 1)
}

/// Count lines in the file at `path`, or 0 if it cannot be read
pub fn count_lines(path: &Path) -> usize {
    File::open(path)
        .and_then(count_lines_in)
        .unwrap_or(0)
}
