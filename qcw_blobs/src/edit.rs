//! Moving drawn lines between symbols and between charts.

use crate::barchart::{BarChart, Line, StudyLineGroup, SymbolEntry};
use crate::visit::{walk_line_group_mut, BarChartVisitorMut, WorkspaceVisitorMut};
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use itertools::Itertools;
use qcw_types::defines::StudyType;
use qcw_types::error::FormatError;
use std::collections::HashSet;

/// What to do when the symbol being written to already has lines.
///
/// "Old" is the side lines are copied from, "new" the side that already has them.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum MergeResolution {
    /// Leave both symbols alone.
    #[default]
    Skip,
    /// Append the old lines to the new symbol.
    Union,
    /// Keep the new symbol's lines.
    KeepNew,
    /// Replace the new symbol's lines with the old ones.
    KeepOld,
}

impl MergeResolution {
    /// Applies `self` to the clashing entry. Returns whether `into` changed.
    fn resolve(self, into: &mut SymbolEntry, lines: &[Line]) -> bool {
        match self {
            Self::Skip | Self::KeepNew => false,
            Self::Union => {
                into.lines.extend_from_slice(lines);
                true
            }
            Self::KeepOld => {
                into.lines = lines.to_vec();
                true
            }
        }
    }
}

/// Copies the lines `source` draws on `studies` into `target`.
///
/// Each study selects a pane of both charts by its first study, or the price
/// pane if `include_price`. Returns whether `target` changed.
pub fn merge_chart_lines(
    target: &mut BarChart,
    source: &BarChart,
    studies: &[StudyType],
    include_price: bool,
    resolution: MergeResolution,
) -> Result<bool> {
    let pane_pairs = studies
        .iter()
        .filter_map(|&study_type| {
            let src_i = source.pane_index_for_study(study_type, include_price);
            let tgt_i = target.pane_index_for_study(study_type, include_price);
            if src_i.is_none() || tgt_i.is_none() {
                tracing::debug!(?study_type, ?src_i, ?tgt_i, "study missing; not merged");
            }
            src_i.zip(tgt_i)
        })
        .unique()
        .collect::<Vec<_>>();

    let mut changed = false;
    for (src_i, tgt_i) in pane_pairs {
        let src_group = &source.panes[src_i].lines;
        let tgt_group = &mut target.panes[tgt_i].lines;
        changed |= merge_group(tgt_group, src_group, resolution)
            .with_context(|| format!("merge pane {src_i} into pane {tgt_i}"))?;
    }
    Ok(changed)
}

fn merge_group(
    target: &mut StudyLineGroup,
    source: &StudyLineGroup,
    resolution: MergeResolution,
) -> Result<bool> {
    let mut changed = false;
    for src_sym in source.symbols() {
        match target.symbol_mut(src_sym.name()) {
            Some(tgt_sym) => changed |= resolution.resolve(tgt_sym, &src_sym.lines),
            None => {
                target.add_symbol_entry(src_sym.clone())?;
                changed = true;
            }
        }
    }
    Ok(changed)
}

/// Moves the lines of each `(old, new)` symbol pair onto `new`, in every line
/// group of every chart.
///
/// Without a clash, `old` is renamed if `remove_old`, or else copied to
/// `new`. On a clash `resolution` decides the new symbol's lines, and unless
/// it is [`MergeResolution::Skip`], `old` is removed if `remove_old`.
/// Returns whether the workspace changed.
pub fn replace_symbols(
    ws: &mut Workspace,
    mapping: &[(&str, &str)],
    remove_old: bool,
    resolution: MergeResolution,
) -> Result<bool> {
    let mut replacer = SymbolReplacer {
        mapping,
        remove_old,
        resolution,
        group_i: 0,
        names: HashSet::new(),
        pending: vec![],
        changed: false,
    };
    replacer.visit_workspace(ws)?;
    Ok(replacer.changed)
}

#[derive(Debug)]
enum PendingEdit {
    Resolve { new: String, lines: Vec<Line> },
    Rename { old: String, new: String },
    Remove(String),
    Add(SymbolEntry),
}

impl PendingEdit {
    /// Line copies and renames first, then removals, then additions.
    fn phase(&self) -> u8 {
        match self {
            Self::Resolve { .. } | Self::Rename { .. } => 0,
            Self::Remove(_) => 1,
            Self::Add(_) => 2,
        }
    }
}

struct SymbolReplacer<'a> {
    mapping: &'a [(&'a str, &'a str)],
    remove_old: bool,
    resolution: MergeResolution,
    group_i: usize,
    /// Names in the group being walked, as they were before any edit.
    names: HashSet<String>,
    pending: Vec<PendingEdit>,
    changed: bool,
}

impl SymbolReplacer<'_> {
    fn apply(&mut self, group: &mut StudyLineGroup) -> Result<()> {
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by_key(PendingEdit::phase);
        for edit in pending {
            tracing::trace!(group_i = self.group_i, ?edit, "applying symbol edit");
            match edit {
                PendingEdit::Resolve { new, lines } => {
                    if let Some(new_sym) = group.symbol_mut(&new) {
                        self.changed |= self.resolution.resolve(new_sym, &lines);
                    }
                }
                PendingEdit::Rename { old, new } => {
                    if group.symbol(&new).is_some() {
                        return Err(FormatError::DuplicateSymbol(new).into());
                    }
                    if let Some(sym) = group.symbol_mut(&old) {
                        sym.set_name(new);
                        self.changed = true;
                    }
                }
                PendingEdit::Remove(old) => {
                    self.changed |= group.remove_symbol(&old).is_some();
                }
                PendingEdit::Add(entry) => {
                    group.add_symbol_entry(entry)?;
                    self.changed = true;
                }
            }
        }
        Ok(())
    }
}

impl BarChartVisitorMut for SymbolReplacer<'_> {
    fn visit_line_group(&mut self, group: &mut StudyLineGroup) -> Result<()> {
        self.names = group.symbols().iter().map(|sym| sym.name().to_string()).collect();
        walk_line_group_mut(self, group)?;
        self.apply(group)
            .with_context(|| format!("replace symbols in line group {}", self.group_i))?;
        self.group_i += 1;
        Ok(())
    }

    fn visit_symbol_entry(&mut self, sym: &mut SymbolEntry) -> Result<()> {
        let mapped = self.mapping.iter().filter(|(old, _)| *old == sym.name());
        for &(old, new) in mapped {
            if self.names.contains(new) {
                if self.remove_old && self.resolution != MergeResolution::Skip {
                    self.pending.push(PendingEdit::Remove(old.to_string()));
                }
                self.pending.push(PendingEdit::Resolve {
                    new: new.to_string(),
                    lines: sym.lines.clone(),
                });
            } else if self.remove_old {
                self.pending.push(PendingEdit::Rename {
                    old: old.to_string(),
                    new: new.to_string(),
                });
            } else {
                self.pending.push(PendingEdit::Add(SymbolEntry::new(new, sym.lines.clone())));
            }
        }
        Ok(())
    }
}

impl WorkspaceVisitorMut for SymbolReplacer<'_> {}

mod test;
