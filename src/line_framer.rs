//! Splits the raw byte stream coming off a serial port into lines.

use log::warn;

/// Longest partial line kept. A port at the wrong baud rate can stream noise
/// without ever sending a newline.
pub const MAX_LINE: usize = 4096;

/// Accumulates bytes until a newline arrives. Reads from a serial port end
/// at arbitrary points, so a single line is often spread over several reads.
#[derive(Debug, Default)]
pub struct LineFramer {
    read_buf: Vec<u8>,
    overlong: bool,
}

impl LineFramer {
    /// A framer with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed freshly read bytes, returning every line they complete. The
    /// newline (and a preceding carriage return) is stripped. A line longer
    /// than [MAX_LINE] is thrown away up to its newline.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        for &c in bytes {
            if c == b'\n' {
                if std::mem::take(&mut self.overlong) {
                    continue;
                }
                let mut line = std::mem::take(&mut self.read_buf);
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                lines.push(line);
            } else if !self.overlong {
                self.read_buf.push(c);
                if self.read_buf.len() > MAX_LINE {
                    warn!("no newline in {} bytes, discarding the line", MAX_LINE);
                    self.read_buf.clear();
                    self.overlong = true;
                }
            }
        }
        lines
    }

    /// Bytes received after the last newline.
    pub fn pending(&self) -> &[u8] {
        &self.read_buf
    }

    /// Throw away a partial line, e.g. after the port was reopened.
    pub fn clear(&mut self) {
        self.read_buf.clear();
        self.overlong = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_split_across_reads() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"{\"ts\":").is_empty());
        assert_eq!(framer.pending(), b"{\"ts\":");
        let lines = framer.push(b"1}\n{\"ts\"");
        assert_eq!(lines, vec![b"{\"ts\":1}".to_vec()]);
        assert_eq!(framer.pending(), b"{\"ts\"");
    }

    #[test]
    fn several_lines_in_one_read() {
        let mut framer = LineFramer::new();
        let lines = framer.push(b"a\r\nb\n\nc");
        assert_eq!(lines, vec![b"a".to_vec(), b"b".to_vec(), Vec::new()]);
        framer.clear();
        assert!(framer.pending().is_empty());
    }

    #[test]
    fn overlong_line_is_discarded() {
        let mut framer = LineFramer::new();
        let noise = vec![b'x'; MAX_LINE + 100];
        assert!(framer.push(&noise).is_empty());
        assert!(framer.pending().is_empty());
        assert!(framer.push(&noise).is_empty());
        assert!(framer.pending().is_empty());

        // The tail of the long line goes too, the next one comes through.
        let lines = framer.push(b"tail\n{\"ts\":1}\n");
        assert_eq!(lines, vec![b"{\"ts\":1}".to_vec()]);
    }
}
