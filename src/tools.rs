use anyhow::Context;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

pub fn now() -> String {
    Local::now().format("%Y/%m/%d %H:%M:%S").to_string()
}

pub fn read_json(path: impl AsRef<Path>) -> Result<Value, anyhow::Error> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("unable to open {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    parse(reader).map_err(|e| {
        let context = if e.is_io() {
            format!("unable to read {}", path.display())
        } else {
            format!("{} is not valid JSON", path.display())
        };
        anyhow::Error::new(e).context(context)
    })
}

/// Parses one document with no nesting limit. The stack grows on demand.
fn parse<R: std::io::Read>(reader: R) -> Result<Value, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Serialize `value` the way the rewritten file is stored: 4-space indent.
pub fn to_pretty_string(value: &Value) -> Result<String, anyhow::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Overwrites `path`. The text is fully rendered before the file is truncated.
pub fn write_json(path: impl AsRef<Path>, value: &Value) -> Result<(), anyhow::Error> {
    let path = path.as_ref();
    let text = to_pretty_string(value)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .with_context(|| format!("unable to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
