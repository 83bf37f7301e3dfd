use anyhow::Result;
use chrono::{DateTime, TimeZone};
use qcw_types::defines::BasicLineType;
use qcw_types::io_utils;
use qcw_types::qtime::{QTime, QTimeCodec};
use qcw_types::serde::{Deser, QDword, QQword, Record, RecordHeader, Ser, WriteLen};
use std::fmt;
use std::io::{BufRead, Write};

/// Whatever follows the fixed fields of a [`BasicLine`].
///
/// Nothing on the wire says whether it is there; only the declared record
/// length does.
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub enum LineTrailer {
    #[default]
    Absent,
    Dword(QDword),
    /// Leftover bytes that are not a single dword.
    Raw(Vec<u8>),
}

impl LineTrailer {
    fn size(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::Dword(dw) => dw.size(),
            Self::Raw(buf) => buf.len(),
        }
    }

    fn ser<W: Write>(&self, w: &mut W) -> Result<usize> {
        match self {
            Self::Absent => Ok(0),
            Self::Dword(dw) => Ok(*dw.ser(w)?),
            Self::Raw(buf) => {
                w.write_all(buf)?;
                Ok(buf.len())
            }
        }
    }

    fn from_leftover(buf: Vec<u8>) -> Self {
        if buf.is_empty() {
            return Self::Absent;
        }
        if buf.len() == QDword::SIZE {
            if let Ok(dw) = QDword::deser_solo(&buf) {
                return Self::Dword(dw);
            }
        }
        tracing::warn!(len = buf.len(), "basic line has leftover bytes; keeping them raw");
        Self::Raw(buf)
    }
}

/// Geometry and style of a drawn line or note.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct BasicLine {
    pub line_type: BasicLineType,
    /// Undeciphered bit flags.
    pub options: QDword,
    pub width: QDword,
    pub rgb: QDword,
    pub start_time: QTime,
    start_value: QQword,
    pub end_time: QTime,
    end_value: QQword,
    pub unknown1: QQword,
    pub unknown2: QQword,
    pub trailer: LineTrailer,
}

impl BasicLine {
    pub fn new(line_type: BasicLineType) -> Self {
        Self {
            line_type,
            options: QDword(0),
            width: QDword(1),
            rgb: QDword(0),
            start_time: QTime(0),
            start_value: QQword::from_f64(0.0),
            end_time: QTime(0),
            end_value: QQword::from_f64(0.0),
            unknown1: QQword(0),
            unknown2: QQword(0),
            trailer: LineTrailer::Absent,
        }
    }

    pub fn start_value(&self) -> f64 {
        self.start_value.as_f64()
    }
    pub fn set_start_value(&mut self, value: f64) {
        self.start_value = QQword::from_f64(value);
    }
    pub fn end_value(&self) -> f64 {
        self.end_value.as_f64()
    }
    pub fn set_end_value(&mut self, value: f64) {
        self.end_value = QQword::from_f64(value);
    }

    pub fn start<Tz: TimeZone>(&self, codec: &QTimeCodec<Tz>) -> Result<DateTime<Tz>> {
        codec.decode(self.start_time)
    }
    pub fn set_start<Tz: TimeZone>(
        &mut self,
        codec: &QTimeCodec<Tz>,
        dt: &DateTime<Tz>,
    ) -> Result<()> {
        self.start_time = codec.encode(dt)?;
        Ok(())
    }
    pub fn end<Tz: TimeZone>(&self, codec: &QTimeCodec<Tz>) -> Result<DateTime<Tz>> {
        codec.decode(self.end_time)
    }
    pub fn set_end<Tz: TimeZone>(
        &mut self,
        codec: &QTimeCodec<Tz>,
        dt: &DateTime<Tz>,
    ) -> Result<()> {
        self.end_time = codec.encode(dt)?;
        Ok(())
    }

    const FIXED_SIZE: usize = 6 * QDword::SIZE + 4 * QQword::SIZE;
}

impl fmt::Display for BasicLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} line; options 0x{:x}; width {}; rgb 0x{:06x}; from {:.2} @ [{}] to {:.2} @ [{}]",
            self.line_type,
            *self.options,
            *self.width,
            *self.rgb,
            self.start_value(),
            self.start_time,
            self.end_value(),
            self.end_time,
        )
    }
}

impl Record for BasicLine {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        Self::FIXED_SIZE + self.trailer.size()
    }

    fn deser_payload<R: BufRead>(r: &mut R, header: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let mut r_len = 0;

        let line_type = BasicLineType::try_from(*QDword::deser_tally(r, &mut r_len)?)?;
        let options = QDword::deser_tally(r, &mut r_len)?;
        let width = QDword::deser_tally(r, &mut r_len)?;
        let rgb = QDword::deser_tally(r, &mut r_len)?;

        let start_time = QTime(*QDword::deser_tally(r, &mut r_len)?);
        let start_value = QQword::deser_tally(r, &mut r_len)?;
        let end_time = QTime(*QDword::deser_tally(r, &mut r_len)?);
        let end_value = QQword::deser_tally(r, &mut r_len)?;

        let unknown1 = QQword::deser_tally(r, &mut r_len)?;
        let unknown2 = QQword::deser_tally(r, &mut r_len)?;

        /* optional trailer */
        let leftover_len = header.payload_len().saturating_sub(r_len);
        let leftover = io_utils::read_vec(r, leftover_len, "BasicLine trailer")?;
        r_len += leftover.len();
        let trailer = LineTrailer::from_leftover(leftover);

        let moi = Self {
            line_type,
            options,
            width,
            rgb,
            start_time,
            start_value,
            end_time,
            end_value,
            unknown1,
            unknown2,
            trailer,
        };
        Ok((r_len, moi))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *QDword(self.line_type.into()).ser(w)?;
        w_len += *self.options.ser(w)?;
        w_len += *self.width.ser(w)?;
        w_len += *self.rgb.ser(w)?;
        w_len += *QDword(self.start_time.0).ser(w)?;
        w_len += *self.start_value.ser(w)?;
        w_len += *QDword(self.end_time.0).ser(w)?;
        w_len += *self.end_value.ser(w)?;
        w_len += *self.unknown1.ser(w)?;
        w_len += *self.unknown2.ser(w)?;
        w_len += self.trailer.ser(w)?;
        Ok(WriteLen::new_manual(w_len))
    }
}
