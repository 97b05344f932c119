use crate::core::color::Rgb;
use crate::core::models::record::AtomChargeRecord;
use crate::core::models::selector::AtomSelector;
use std::path::Path;

/// The error type a sink may fail with. Sink failures abort the traversal that feeds it.
pub type SinkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Receives the color of every atom group found in a topology.
///
/// Applications are last-write-wins: when the same selector is colored twice, the later
/// color replaces the earlier one. Implementors must accept any number of calls in any order.
pub trait ColorSink {
    /// Colors every atom matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the color cannot be delivered to the underlying renderer or file.
    fn apply_color(&mut self, color: Rgb, selector: &AtomSelector) -> Result<(), SinkError>;

    /// Delivers a full record. Sinks that need more than the color and selector, such as the
    /// charge itself, override this; everyone else gets [`ColorSink::apply_color`].
    fn apply_record(&mut self, record: &AtomChargeRecord, color: Rgb) -> Result<(), SinkError> {
        self.apply_color(color, &record.selector())
    }
}

impl<S: ColorSink + ?Sized> ColorSink for &mut S {
    fn apply_color(&mut self, color: Rgb, selector: &AtomSelector) -> Result<(), SinkError> {
        (**self).apply_color(color, selector)
    }

    fn apply_record(&mut self, record: &AtomChargeRecord, color: Rgb) -> Result<(), SinkError> {
        (**self).apply_record(record, color)
    }
}

impl<S: ColorSink + ?Sized> ColorSink for Box<S> {
    fn apply_color(&mut self, color: Rgb, selector: &AtomSelector) -> Result<(), SinkError> {
        (**self).apply_color(color, selector)
    }

    fn apply_record(&mut self, record: &AtomChargeRecord, color: Rgb) -> Result<(), SinkError> {
        (**self).apply_record(record, color)
    }
}

/// Loads a molecular structure into the renderer before any color is applied.
pub trait StructureLoader {
    fn load_structure(&mut self, path: &Path) -> Result<(), SinkError>;
}
