use super::ScanOptions;
use super::conditional::ConditionalStack;
use super::line::TopologyLine;

/// Per-file parse state. Every file of an include tree starts from a fresh state.
#[derive(Debug, Clone)]
pub struct ParserState {
    pub is_atoms_section: bool,
    conditionals: ConditionalStack,
}

impl ParserState {
    pub fn new(options: &ScanOptions) -> Self {
        Self {
            is_atoms_section: false,
            conditionals: ConditionalStack::new(options.conditional_mode),
        }
    }

    pub fn should_skip(&self) -> bool {
        self.conditionals.is_skipping()
    }

    /// Applies the state changes carried by `line`.
    ///
    /// # Return
    ///
    /// `true` if the line must be processed further, `false` if it was a conditional directive
    /// or falls inside a skipped block.
    pub fn advance(&mut self, line: &TopologyLine<'_>, options: &ScanOptions) -> bool {
        match line {
            TopologyLine::IfDef(symbol) => {
                self.conditionals.enter_ifdef(symbol, &options.defines);
                return false;
            }
            TopologyLine::IfNDef(symbol) => {
                self.conditionals.enter_ifndef(symbol, &options.defines);
                return false;
            }
            TopologyLine::Else => {
                self.conditionals.flip_else();
                return false;
            }
            TopologyLine::EndIf => {
                self.conditionals.exit();
                return false;
            }
            _ => {}
        }

        if self.should_skip() {
            return false;
        }

        if let TopologyLine::Section(_) = line {
            self.is_atoms_section = line.is_atoms_section();
        }
        true
    }
}
