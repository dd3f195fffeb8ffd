//! Delimiter sniffing for free-text delimited files.
//!
//! Government bulk extracts arrive with a `.dat` or `.txt` extension and no
//! declared separator; the first line of content decides.

use std::io::BufRead;

use crate::error::ConvertResult;

/// A sniffed field delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `|`
    Pipe,
    /// `,`
    Comma,
    /// ` `
    Space,
}

impl Delimiter {
    /// The delimiter as a byte, for configuring a reader.
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Pipe => b'|',
            Delimiter::Comma => b',',
            Delimiter::Space => b' ',
        }
    }

    /// The delimiter as a char.
    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

/// Guess the field delimiter from the first non-blank line of `reader`.
///
/// Lines that are exactly blank are skipped. The first line with content is
/// tested for a pipe, then a comma, then a space; the first match wins.
/// Returns `Ok(None)` when the input ends before any content line, or when
/// the first content line contains none of the three separators — callers
/// skip the file and report it in both cases.
///
/// The fixed priority means a header whose text fields legitimately contain
/// commas before any pipe appears is misread as comma-delimited; the source
/// data has no way to disambiguate this.
pub fn sniff_delimiter<R: BufRead>(reader: R) -> ConvertResult<Option<Delimiter>> {
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        if line.contains('|') {
            return Ok(Some(Delimiter::Pipe));
        }
        if line.contains(',') {
            return Ok(Some(Delimiter::Comma));
        }
        if line.contains(' ') {
            return Ok(Some(Delimiter::Space));
        }
        return Ok(None);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::{Delimiter, sniff_delimiter};

    fn sniff(input: &str) -> Option<Delimiter> {
        sniff_delimiter(input.as_bytes()).unwrap()
    }

    #[test]
    fn pipe_wins_over_comma_and_space() {
        assert_eq!(sniff("a|b,c d\n1|2,3 4\n"), Some(Delimiter::Pipe));
    }

    #[test]
    fn comma_wins_over_space() {
        assert_eq!(sniff("a,b c\n"), Some(Delimiter::Comma));
    }

    #[test]
    fn space_is_the_last_resort() {
        assert_eq!(sniff("a b\n"), Some(Delimiter::Space));
    }

    #[test]
    fn blank_lines_before_the_header_are_skipped() {
        assert_eq!(sniff("\n\n\na|b\n"), Some(Delimiter::Pipe));
    }

    #[test]
    fn empty_input_yields_no_delimiter() {
        assert_eq!(sniff(""), None);
        assert_eq!(sniff("\n\n\n"), None);
    }

    #[test]
    fn line_without_separators_yields_no_delimiter() {
        assert_eq!(sniff("header\n1,2\n"), None);
    }

    #[test]
    fn whitespace_only_line_counts_as_content() {
        // A line of spaces is not "exactly blank"; it sniffs as space-delimited.
        assert_eq!(sniff("   \na,b\n"), Some(Delimiter::Space));
    }
}
