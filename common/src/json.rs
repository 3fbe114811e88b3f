use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const INDENT: &[u8] = b"    ";

// Pretty printed json with four-space indentation, the format of every json
// artifact the tools write.
pub fn write_pretty<W: Write, T: Serialize + ?Sized>(out: W, val: &T) -> serde_json::Result<()> {
    let mut ser = Serializer::with_formatter(out, PrettyFormatter::with_indent(INDENT));
    val.serialize(&mut ser)
}

pub fn to_string_pretty<T: Serialize + ?Sized>(val: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, val)?;
    // serde_json only emits valid utf-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
