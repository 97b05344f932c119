use crate::core::models::record::{AtomChargeRecord, IncludeDirective};
use crate::core::topology::ScanOptions;
use crate::core::topology::line::{AtomFields, TopologyLine};
use crate::core::topology::names::normalize_hydrogen_name;
use crate::core::topology::state::ParserState;
use std::io::{self, BufRead};

/// Something worth acting on, found while scanning a single topology file.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// An atom record inside an active `[ atoms ]` section.
    Record {
        line: usize,
        record: AtomChargeRecord,
    },
    /// An `#include` outside of any skipped conditional block.
    Include {
        line: usize,
        directive: IncludeDirective,
    },
    /// An atom record whose charge column is not a finite number. The record is dropped.
    MalformedCharge { line: usize, value: String },
}

/// Streams the [`ScanEvent`]s of one topology file in line order.
///
/// The scanner owns its reader, so dropping it releases the underlying file. Lines are decoded
/// lossily; topology files are plain ASCII and a stray byte must not abort the scan.
pub struct TopologyScanner<'o, R> {
    reader: R,
    options: &'o ScanOptions,
    state: ParserState,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<'o, R: BufRead> TopologyScanner<'o, R> {
    pub fn new(reader: R, options: &'o ScanOptions) -> Self {
        Self {
            reader,
            options,
            state: ParserState::new(options),
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    fn atom_event(&self, fields: AtomFields<'_>) -> ScanEvent {
        let line = self.line_number;
        let charge = match fields.charge.parse::<f64>() {
            Ok(charge) if charge.is_finite() => charge,
            _ => {
                return ScanEvent::MalformedCharge {
                    line,
                    value: fields.charge.to_string(),
                };
            }
        };

        let atom_name = if self.options.normalize_hydrogens {
            normalize_hydrogen_name(fields.atom_name).into_owned()
        } else {
            fields.atom_name.to_string()
        };

        ScanEvent::Record {
            line,
            record: AtomChargeRecord::new(fields.residue_name, atom_name, charge),
        }
    }
}

impl<R: BufRead> Iterator for TopologyScanner<'_, R> {
    type Item = io::Result<ScanEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line_number += 1;

            let text = String::from_utf8_lossy(&self.buffer);
            let line = TopologyLine::classify(&text);
            if !self.state.advance(&line, self.options) {
                continue;
            }

            match line {
                TopologyLine::Include(path) => {
                    return Some(Ok(ScanEvent::Include {
                        line: self.line_number,
                        directive: IncludeDirective::new(path),
                    }));
                }
                TopologyLine::Atom(fields) if self.state.is_atoms_section => {
                    return Some(Ok(self.atom_event(fields)));
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topology::conditional::ConditionalMode;

    const PEPTIDE_ITP: &str = "\
; Include forcefield parameters
#include \"oplsaa.ff/forcefield.itp\"

[ moleculetype ]
; Name            nrexcl
Protein_chain_A     3

[ atoms ]
;   nr       type  resnr residue  atom   cgnr     charge       mass
     1   opls_287      1    ALA      N      1       -0.3    14.0067   ; qtot -0.3
     2   opls_290      1    ALA    H1      1       0.33      1.008
     3   opls_140      1    ALA   HB12     2       0.06      1.008
     4   opls_235      1    ALA      C      3        0.5     12.011

[ bonds ]
;  ai    aj funct
    1     2     1   0.1 0.2 0.3 0.4

#ifdef POSRES
#include \"posre.itp\"
#endif

#include \"spc.itp\"
";

    fn scan(text: &str, options: &ScanOptions) -> Vec<ScanEvent> {
        TopologyScanner::new(text.as_bytes(), options)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    fn records(events: &[ScanEvent]) -> Vec<&AtomChargeRecord> {
        events
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Record { record, .. } => Some(record),
                _ => None,
            })
            .collect()
    }

    fn includes(events: &[ScanEvent]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Include { directive, .. } => Some(directive.raw_path.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn scans_records_and_includes_in_file_order() {
        let events = scan(PEPTIDE_ITP, &ScanOptions::default());

        assert_eq!(
            records(&events),
            vec![
                &AtomChargeRecord::new("ALA", "N", -0.3),
                &AtomChargeRecord::new("ALA", "H1", 0.33),
                &AtomChargeRecord::new("ALA", "B12H", 0.06),
                &AtomChargeRecord::new("ALA", "C", 0.5),
            ]
        );
        assert_eq!(
            includes(&events),
            vec!["oplsaa.ff/forcefield.itp", "spc.itp"]
        );
        assert!(matches!(events[0], ScanEvent::Include { line: 2, .. }));
    }

    #[test]
    fn atom_shaped_lines_outside_atoms_section_are_ignored() {
        let text = "[ moleculetype ]\n1 opls_287 1 ALA N 1 -0.3\n[ bonds ]\n1 2 1 ALA N 1 0.5\n";
        assert!(scan(text, &ScanOptions::default()).is_empty());
    }

    #[test]
    fn skipped_block_hides_records_and_includes() {
        let text = "\
[ atoms ]
#ifdef FLEXIBLE
1 opls_287 1 ALA N 1 -0.3
#include \"flex.itp\"
#endif
2 opls_290 1 ALA CA 1 0.1
";
        let events = scan(text, &ScanOptions::default());
        assert_eq!(records(&events), vec![&AtomChargeRecord::new("ALA", "CA", 0.1)]);
        assert!(includes(&events).is_empty());
    }

    #[test]
    fn else_branch_of_ifdef_is_skipped_by_default() {
        let text = "\
[ atoms ]
#ifdef HEAVY_H
1 opls_111 1 SOL OW 1 -0.834
#else
1 opls_111 1 SOL OW 1 0.5
#include \"x.itp\"
#endif
";
        assert!(scan(text, &ScanOptions::default()).is_empty());
    }

    #[test]
    fn both_branches_of_ifndef_are_scanned_by_default() {
        let text = "\
[ atoms ]
#ifndef FLEXIBLE
1 opls_111 1 SOL OW 1 -0.8
#else
2 opls_112 1 SOL HW1 1 0.4
#endif
";
        assert_eq!(
            records(&scan(text, &ScanOptions::default())),
            vec![
                &AtomChargeRecord::new("SOL", "OW", -0.8),
                &AtomChargeRecord::new("SOL", "HW1", 0.4),
            ]
        );
    }

    #[test]
    fn evaluate_mode_picks_one_branch() {
        let text = "\
[ atoms ]
#ifdef HEAVY_H
1 opls_111 1 SOL OW 1 -0.834
#else
1 opls_111 1 SOL OW 1 0.5
#endif
";
        let evaluate = ScanOptions {
            conditional_mode: ConditionalMode::Evaluate,
            ..ScanOptions::default()
        };
        assert_eq!(
            records(&scan(text, &evaluate)),
            vec![&AtomChargeRecord::new("SOL", "OW", 0.5)]
        );

        let heavy = ScanOptions {
            defines: ["HEAVY_H".to_string()].into_iter().collect(),
            ..evaluate
        };
        assert_eq!(
            records(&scan(text, &heavy)),
            vec![&AtomChargeRecord::new("SOL", "OW", -0.834)]
        );
    }

    #[test]
    fn defines_enable_ifdef_blocks_in_evaluate_mode() {
        let options = ScanOptions {
            conditional_mode: ConditionalMode::Evaluate,
            defines: ["POSRES".to_string()].into_iter().collect(),
            ..ScanOptions::default()
        };
        let events = scan(PEPTIDE_ITP, &options);
        assert_eq!(
            includes(&events),
            vec!["oplsaa.ff/forcefield.itp", "posre.itp", "spc.itp"]
        );
    }

    #[test]
    fn nested_blocks_differ_between_modes() {
        let text = "\
[ atoms ]
#ifdef OUTER
#ifdef INNER
#endif
1 opls_287 1 ALA N 1 -0.3
#endif
";
        let nested = scan(text, &ScanOptions::default());
        assert!(records(&nested).is_empty());

        let flat = ScanOptions {
            conditional_mode: ConditionalMode::Flat,
            ..ScanOptions::default()
        };
        assert_eq!(
            records(&scan(text, &flat)),
            vec![&AtomChargeRecord::new("ALA", "N", -0.3)]
        );
    }

    #[test]
    fn malformed_charge_is_reported_and_scanning_continues() {
        let text = "\
[ atoms ]
1 opls_287 1 ALA N 1 -0.3x
2 opls_287 1 ALA CA 1 nan
3 opls_290 1 ALA C 1 0.5
";
        let events = scan(text, &ScanOptions::default());
        assert_eq!(
            events,
            vec![
                ScanEvent::MalformedCharge {
                    line: 2,
                    value: "-0.3x".to_string()
                },
                ScanEvent::MalformedCharge {
                    line: 3,
                    value: "nan".to_string()
                },
                ScanEvent::Record {
                    line: 4,
                    record: AtomChargeRecord::new("ALA", "C", 0.5)
                },
            ]
        );
    }

    #[test]
    fn hydrogen_normalization_can_be_disabled() {
        let options = ScanOptions {
            normalize_hydrogens: false,
            ..ScanOptions::default()
        };
        let events = scan(PEPTIDE_ITP, &options);
        assert_eq!(records(&events)[2].atom_name, "HB12");
    }

    #[test]
    fn crlf_and_invalid_utf8_lines_are_tolerated() {
        let mut bytes = b"[ atoms ]\r\n1 opls_287 1 ALA N 1 -0.3\r\n".to_vec();
        bytes.extend_from_slice(b"; \xff\xfe comment\n2 opls_290 1 ALA CA 1 0.1\n");
        let events = TopologyScanner::new(bytes.as_slice(), &ScanOptions::default())
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(records(&events).len(), 2);
    }
}
