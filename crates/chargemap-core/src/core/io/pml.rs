use super::traits::{ColorSink, SinkError, StructureLoader};
use crate::core::color::{Rgb, calibration_stops};
use crate::core::models::selector::AtomSelector;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const DEFAULT_REPRESENTATION: &str = "sticks";
const COLOR_BAR_NAME: &str = "color_bar";

/// Writes color applications as a PyMOL command script (`.pml`).
///
/// Running the script in the viewer loads the structure, draws the charge color bar and colors
/// every residue/atom-name group, in the order the topology declared them.
pub struct PmlScript<W: Write> {
    writer: W,
    representation: String,
}

impl PmlScript<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> PmlScript<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            representation: DEFAULT_REPRESENTATION.to_string(),
        }
    }

    pub fn with_representation(mut self, representation: impl Into<String>) -> Self {
        self.representation = representation.into();
        self
    }

    /// Declares a color bar matching the charge ramp.
    pub fn write_color_bar(&mut self) -> io::Result<()> {
        let (stops, names): (Vec<String>, Vec<&str>) = calibration_stops()
            .map(|(charge, name, _)| (charge.to_string(), name))
            .unzip();
        writeln!(
            self.writer,
            "ramp_new {}, none, [{}], [{}]",
            COLOR_BAR_NAME,
            stops.join(", "),
            names.join(", ")
        )
    }

    /// Flushes the script and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> StructureLoader for PmlScript<W> {
    fn load_structure(&mut self, path: &Path) -> Result<(), SinkError> {
        writeln!(self.writer, "load {}", path.display())?;
        writeln!(self.writer, "hide everything")?;
        writeln!(self.writer, "show {}", self.representation)?;
        Ok(())
    }
}

impl<W: Write> ColorSink for PmlScript<W> {
    fn apply_color(&mut self, color: Rgb, selector: &AtomSelector) -> Result<(), SinkError> {
        writeln!(self.writer, "color {}, {}", color, selector)?;
        Ok(())
    }
}
