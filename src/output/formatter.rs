use serde_json::ser::Formatter;
use std::io::{self, Write};

/// Wire layout of the envelope line: `", "` and `": "` separators, and
/// ASCII-only strings with everything outside printable ASCII escaped as
/// lowercase `\uXXXX` UTF-16 units.
#[derive(Debug, Default, Clone, Copy)]
pub struct WireFormatter;

impl Formatter for WireFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;

        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }

            writer.write_all(fragment[start..index].as_bytes())?;

            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }

            start = index + ch.len_utf8();
        }

        writer.write_all(fragment[start..].as_bytes())
    }
}
