use super::WriteContainer;
use crate::{Point, Result, ScanParameters};
use std::io::Write;

pub(crate) struct ContainerWriter;

impl WriteContainer for ContainerWriter {
    fn write_header(&mut self, _: &mut dyn Write, _: &ScanParameters) -> Result<()> {
        Ok(())
    }

    // The trailing zeros stand in for a normal and an intensity, which we never compute.
    fn write_point(&mut self, write: &mut dyn Write, point: &Point) -> Result<()> {
        writeln!(write, "{point} 0 0 0 0")?;
        Ok(())
    }
}
