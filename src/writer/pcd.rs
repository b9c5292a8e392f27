use super::WriteContainer;
use crate::{Point, Result, ScanParameters};
use std::io::Write;

pub(crate) const BANNER: &str = "# .PCD v.7 - Point Cloud Data file format";

pub(crate) struct ContainerWriter;

impl WriteContainer for ContainerWriter {
    fn write_header(&mut self, write: &mut dyn Write, parameters: &ScanParameters) -> Result<()> {
        let width = parameters.width()?;
        let height = parameters.height()?;
        let points = parameters.point_count()?;
        writeln!(write, "{BANNER}")?;
        writeln!(write, "VERSION .7")?;
        writeln!(write, "FIELDS x y z")?;
        writeln!(write, "SIZE 4 4 4")?;
        writeln!(write, "TYPE F F F")?;
        writeln!(write, "COUNT 1 1 1")?;
        writeln!(write, "WIDTH {width}")?;
        writeln!(write, "HEIGHT {height}")?;
        writeln!(write, "VIEWPOINT 0 0 0 1 0 0 0")?;
        writeln!(write, "POINTS {points}")?;
        writeln!(write, "DATA ascii")?;
        Ok(())
    }

    fn write_point(&mut self, write: &mut dyn Write, point: &Point) -> Result<()> {
        writeln!(write, "{point}")?;
        Ok(())
    }
}
