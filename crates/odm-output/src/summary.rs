//! `fill_summary.csv`: one `counter,value` row per diagnostic counter.

use std::io::Write;

use csv::Writer;

use odm_interp::Diagnostics;

use crate::OutputResult;

pub fn write_summary<W: Write>(diagnostics: &Diagnostics, writer: W) -> OutputResult<()> {
    let mut out = Writer::from_writer(writer);
    out.write_record(["counter", "value"])?;
    for (name, value) in diagnostics.summary() {
        out.write_record([name, value.to_string().as_str()])?;
    }
    out.flush()?;
    Ok(())
}
