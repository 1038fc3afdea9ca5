use std::io::{self, Read};

use bytes::{BufMut, Bytes, BytesMut};

/// Read all of `reader` as a single line, dropping one trailing newline.
pub fn read_line(mut reader: impl Read) -> io::Result<Bytes> {
    let mut writer = BytesMut::new().writer();
    io::copy(&mut reader, &mut writer)?;
    let mut line = writer.into_inner();

    if line.ends_with(b"\n") {
        line.truncate(line.len() - 1);
        if line.ends_with(b"\r") {
            line.truncate(line.len() - 1);
        }
    }
    Ok(line.freeze())
}
