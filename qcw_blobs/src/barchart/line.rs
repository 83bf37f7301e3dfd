use crate::barchart::BasicLine;
use anyhow::Result;
use qcw_types::defines::LineType;
use qcw_types::serde::{
    Deser, LengthMode, OpaqueRecord, QByteBuffer, QDword, QString, Record, RecordHeader, Ser,
    WriteLen,
};
use std::fmt;
use std::io::{BufRead, Write};

/// Text attached to a note line.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Note {
    pub font: QByteBuffer,
    text: QString,
}

impl Note {
    pub fn new(font: QByteBuffer, text: Option<String>) -> Self {
        Self {
            font,
            text: QString::normal(text),
        }
    }
    pub fn text(&self) -> Option<&str> {
        self.text.value()
    }
    pub fn set_text(&mut self, text: Option<String>) {
        self.text.set_value(text);
    }
}

/// A fully decoded line: a plain trendline, or a note with text.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct LineHeader {
    pub note: Option<Note>,
    pub unknown1: QDword,
    pub unknown2: QDword,
    pub line: BasicLine,
}

impl LineHeader {
    pub fn line_type(&self) -> LineType {
        match self.note {
            Some(_) => LineType::Note,
            None => LineType::BasicLine,
        }
    }
}

impl fmt::Display for LineHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(note) = &self.note {
            write!(f, "note [{}]; ", note.text().unwrap_or_default())?;
        }
        write!(f, "{}", self.line)
    }
}

impl Record for LineHeader {
    /// Which of the two structured line types is being decoded.
    type Ctx = LineType;

    fn payload_size(&self, _: LineType) -> usize {
        let note_size = self
            .note
            .as_ref()
            .map_or(0, |note| note.font.size() + note.text.size());
        note_size + self.unknown1.size() + self.unknown2.size() + self.line.size(())
    }

    fn deser_payload<R: BufRead>(
        r: &mut R,
        _: &RecordHeader,
        line_type: LineType,
    ) -> Result<(usize, Self)> {
        let mut r_len = 0;

        let note = if line_type == LineType::Note {
            let font = QByteBuffer::deser_tally(r, &mut r_len)?;
            let (delta_r_len, text) = QString::deser_with(r, LengthMode::Normal)?;
            r_len += delta_r_len;
            Some(Note { font, text })
        } else {
            None
        };
        let unknown1 = QDword::deser_tally(r, &mut r_len)?;
        let unknown2 = QDword::deser_tally(r, &mut r_len)?;
        let line = BasicLine::deser_tally(r, (), &mut r_len)?;

        let moi = Self {
            note,
            unknown1,
            unknown2,
            line,
        };
        Ok((r_len, moi))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: LineType) -> Result<WriteLen> {
        let mut w_len = 0;
        if let Some(note) = &self.note {
            w_len += *note.font.ser(w)?;
            w_len += *note.text.ser(w)?;
        }
        w_len += *self.unknown1.ser(w)?;
        w_len += *self.unknown2.ser(w)?;
        w_len += *self.line.ser(w, ())?;
        Ok(WriteLen::new_manual(w_len))
    }
}

/// A recognized line kind whose payload is kept as raw bytes.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct OpaqueLine {
    pub line_type: LineType,
    pub blob: OpaqueRecord,
}

/// One line under a symbol, preceded on the wire by its type code.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Line {
    Drawn(LineHeader),
    Opaque(OpaqueLine),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drawn(lh) => write!(f, "{lh}"),
            Self::Opaque(ol) => {
                let len = ol.blob.payload().len();
                write!(f, "{:?}; {len} raw bytes", ol.line_type)
            }
        }
    }
}

impl Line {
    pub fn line_type(&self) -> LineType {
        match self {
            Self::Drawn(lh) => lh.line_type(),
            Self::Opaque(ol) => ol.line_type,
        }
    }

    pub fn size(&self) -> usize {
        let payload_size = match self {
            Self::Drawn(lh) => lh.size(lh.line_type()),
            Self::Opaque(ol) => ol.blob.size(()),
        };
        QDword::SIZE + payload_size
    }

    pub fn deser<R: BufRead>(r: &mut R) -> Result<(usize, Self)> {
        let mut r_len = 0;

        let line_type = LineType::try_from(*QDword::deser_tally(r, &mut r_len)?)?;
        let moi = if line_type.is_structured() {
            Self::Drawn(LineHeader::deser_tally(r, line_type, &mut r_len)?)
        } else {
            Self::Opaque(OpaqueLine {
                line_type,
                blob: OpaqueRecord::deser_tally(r, (), &mut r_len)?,
            })
        };

        Ok((r_len, moi))
    }

    pub fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *QDword(self.line_type().into()).ser(w)?;
        w_len += *match self {
            Self::Drawn(lh) => lh.ser(w, lh.line_type())?,
            Self::Opaque(ol) => ol.blob.ser(w, ())?,
        };
        Ok(WriteLen::new_manual(w_len))
    }
}
