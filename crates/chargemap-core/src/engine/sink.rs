pub use crate::core::io::traits::{ColorSink, SinkError, StructureLoader};

use crate::core::color::Rgb;
use crate::core::models::record::AtomChargeRecord;
use crate::core::models::selector::AtomSelector;
use std::collections::HashMap;

/// Keeps every color application in memory, in call order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub applications: Vec<(Rgb, AtomSelector)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The color each selector ends up with once all applications are replayed.
    pub fn final_colors(&self) -> HashMap<&AtomSelector, Rgb> {
        self.applications
            .iter()
            .map(|(color, selector)| (selector, *color))
            .collect()
    }
}

impl ColorSink for RecordingSink {
    fn apply_color(&mut self, color: Rgb, selector: &AtomSelector) -> Result<(), SinkError> {
        self.applications.push((color, selector.clone()));
        Ok(())
    }
}

/// Forwards each application to several sinks, stopping at the first failure.
#[derive(Default)]
pub struct FanOutSink<'a> {
    sinks: Vec<&'a mut dyn ColorSink>,
}

impl<'a> FanOutSink<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: &'a mut dyn ColorSink) {
        self.sinks.push(sink);
    }
}

impl ColorSink for FanOutSink<'_> {
    fn apply_color(&mut self, color: Rgb, selector: &AtomSelector) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.apply_color(color, selector)?;
        }
        Ok(())
    }

    fn apply_record(&mut self, record: &AtomChargeRecord, color: Rgb) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.apply_record(record, color)?;
        }
        Ok(())
    }
}
