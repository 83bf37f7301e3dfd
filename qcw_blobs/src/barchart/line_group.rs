use crate::barchart::Line;
use anyhow::{Context, Result};
use qcw_types::error::FormatError;
use qcw_types::serde::{
    Deser, LengthMode, QDword, QString, Record, RecordHeader, Ser, WriteLen,
};
use std::io::{BufRead, Write};

/// The lines drawn for one symbol in one pane.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct SymbolEntry {
    name: QString,
    pub lines: Vec<Line>,
}

impl SymbolEntry {
    pub fn new(name: impl Into<String>, lines: Vec<Line>) -> Self {
        Self {
            name: QString::normal(Some(name.into())),
            lines,
        }
    }

    pub fn name(&self) -> &str {
        self.name.value().unwrap_or_default()
    }
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name.set_value(Some(name.into()));
    }
}

impl Record for SymbolEntry {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        self.name.size()
            + QDword::SIZE
            + self.lines.iter().map(Line::size).sum::<usize>()
            + QDword::SIZE
    }

    fn deser_payload<R: BufRead>(r: &mut R, _: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let mut r_len = 0;

        let (delta_r_len, name) = QString::deser_with(r, LengthMode::Normal)?;
        r_len += delta_r_len;
        let sym_name = name.value().unwrap_or_default().to_string();

        let count = *QDword::deser_tally(r, &mut r_len)?;
        let mut lines = vec![];
        for line_i in 0..count {
            let (delta_r_len, line) = Line::deser(r)
                .with_context(|| format!("line {line_i} of symbol {sym_name:?}"))?;
            r_len += delta_r_len;
            lines.push(line);
        }

        r_len += QDword::deser_terminator(r, "symbol entry lines")?;

        Ok((r_len, Self { name, lines }))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *self.name.ser(w)?;
        w_len += *QDword(u32::try_from(self.lines.len())?).ser(w)?;
        for line in &self.lines {
            w_len += *line.ser(w)?;
        }
        w_len += *QDword(0).ser(w)?;
        Ok(WriteLen::new_manual(w_len))
    }
}

/// Per-symbol lines of one pane. Symbol names are unique within a group.
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct StudyLineGroup {
    symbols: Vec<SymbolEntry>,
}

impl StudyLineGroup {
    pub fn symbols(&self) -> &[SymbolEntry] {
        &self.symbols
    }
    pub fn symbols_mut(&mut self) -> &mut [SymbolEntry] {
        &mut self.symbols
    }

    pub fn symbol(&self, name: &str) -> Option<&SymbolEntry> {
        self.symbols.iter().find(|sym| sym.name() == name)
    }
    pub fn symbol_mut(&mut self, name: &str) -> Option<&mut SymbolEntry> {
        self.symbols.iter_mut().find(|sym| sym.name() == name)
    }

    /// Appends `entry`. Fails, leaving the group as it was, if the name is taken.
    pub fn add_symbol_entry(&mut self, entry: SymbolEntry) -> Result<()> {
        if self.symbol(entry.name()).is_some() {
            return Err(FormatError::DuplicateSymbol(entry.name().to_string()).into());
        }
        self.symbols.push(entry);
        Ok(())
    }

    pub fn remove_symbol(&mut self, name: &str) -> Option<SymbolEntry> {
        let pos = self.symbols.iter().position(|sym| sym.name() == name)?;
        Some(self.symbols.remove(pos))
    }
}

impl Record for StudyLineGroup {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        QDword::SIZE + self.symbols.iter().map(|sym| sym.size(())).sum::<usize>()
    }

    fn deser_payload<R: BufRead>(r: &mut R, _: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let mut r_len = 0;
        let count = *QDword::deser_tally(r, &mut r_len)?;
        let mut symbols = vec![];
        for _ in 0..count {
            symbols.push(SymbolEntry::deser_tally(r, (), &mut r_len)?);
        }
        Ok((r_len, Self { symbols }))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *QDword(u32::try_from(self.symbols.len())?).ser(w)?;
        for sym in &self.symbols {
            w_len += *sym.ser(w, ())?;
        }
        Ok(WriteLen::new_manual(w_len))
    }
}
