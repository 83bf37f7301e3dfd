use crate::error::FormatError;
use crate::io_utils;
use crate::serde::{Deser, HeaderType, QByte, QByteBuffer, QWord, Ser, WriteLen};
use anyhow::Result;
use std::io::{Read, Write};

/// How the length field of a [`QString`] accounts for the trailing NUL.
///
/// The format uses both, per field. Neither can be inferred from the bytes.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum LengthMode {
    /// Length counts the NUL. Null and empty share one encoding.
    #[default]
    Normal,
    /// Length excludes the NUL. Null is a zero length with no body.
    Goofy,
}

/// A length-prefixed, NUL-terminated string of single-byte characters.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct QString {
    mode: LengthMode,
    value: Option<String>,
}

impl QString {
    pub fn new(mode: LengthMode, value: Option<String>) -> Self {
        Self { mode, value }
    }
    pub fn normal(value: Option<String>) -> Self {
        Self::new(LengthMode::Normal, value)
    }
    pub fn goofy(value: Option<String>) -> Self {
        Self::new(LengthMode::Goofy, value)
    }

    pub fn mode(&self) -> LengthMode {
        self.mode
    }
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }
    pub fn into_value(self) -> Option<String> {
        self.value
    }

    fn text_len(&self) -> Option<usize> {
        self.value.as_ref().map(|s| s.chars().count())
    }

    fn len_field(&self) -> usize {
        match (self.mode, self.text_len()) {
            (LengthMode::Normal, None) => 1,
            (LengthMode::Normal, Some(n)) => n + 1,
            (LengthMode::Goofy, None) => 0,
            (LengthMode::Goofy, Some(n)) => n.max(1),
        }
    }

    pub fn deser_with<R: Read>(r: &mut R, mode: LengthMode) -> Result<(usize, Self)> {
        let mut r_len = 0;

        /* len */
        let (len_r_len, len) = QWord::deser(r)?;
        r_len += len_r_len;
        let declared = *len as usize;

        if mode == LengthMode::Goofy && declared == 0 {
            return Ok((r_len, Self::new(mode, None)));
        }
        if mode == LengthMode::Normal && declared == 0 {
            return Err(FormatError::StringLength {
                declared,
                actual: 0,
            }
            .into());
        }

        /* body */
        let header_type = HeaderType::try_from(io_utils::read_u8(r, "QString body")?)?;
        r_len += 1;

        if header_type == HeaderType::Byte {
            let nul = io_utils::read_u8(r, "QString body")?;
            r_len += 1;
            if nul != 0 {
                return Err(FormatError::UnterminatedString.into());
            }
            if declared != 1 {
                return Err(FormatError::StringLength {
                    declared,
                    actual: 1,
                }
                .into());
            }
            let value = match mode {
                LengthMode::Normal => None,
                LengthMode::Goofy => Some(String::new()),
            };
            return Ok((r_len, Self::new(mode, value)));
        }

        let (buf_r_len, buf) = QByteBuffer::deser_after_header(r, header_type)?;
        r_len += buf_r_len;

        let expected_body_len = match mode {
            LengthMode::Normal => declared,
            LengthMode::Goofy => declared + 1,
        };
        if buf.len() != expected_body_len || (mode == LengthMode::Normal && declared == 1) {
            return Err(FormatError::StringLength {
                declared,
                actual: buf.len(),
            }
            .into());
        }
        let (nul, text) = buf.split_last().ok_or(FormatError::UnterminatedString)?;
        if *nul != 0 {
            return Err(FormatError::UnterminatedString.into());
        }
        let value = text.iter().map(|&b| b as char).collect::<String>();

        Ok((r_len, Self::new(mode, Some(value))))
    }

    fn encode_body(&self) -> Result<Option<Vec<u8>>> {
        match self.value.as_deref() {
            None => Ok(None),
            Some("") => Ok(None),
            Some(s) => {
                let mut body = s
                    .chars()
                    .map(|c| u8::try_from(c).map_err(|_| FormatError::Unencodable(s.to_string())))
                    .collect::<Result<Vec<u8>, _>>()?;
                body.push(0);
                Ok(Some(body))
            }
        }
    }
}

impl Ser for QString {
    fn size(&self) -> usize {
        let body_size = match (self.mode, self.text_len()) {
            (LengthMode::Goofy, None) => 0,
            (_, None) | (_, Some(0)) => QByte::SIZE,
            (_, Some(n)) => QByteBuffer::size_for(n + 1),
        };
        QWord::SIZE + body_size
    }

    fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        let len_field = self.len_field();
        let len = u16::try_from(len_field).map_err(|_| FormatError::TooLong {
            what: "QString",
            len: len_field,
        })?;

        let mut w_len = 0;
        w_len += *QWord(len).ser(w)?;
        match (self.mode, self.encode_body()?) {
            (LengthMode::Goofy, None) if self.value.is_none() => {}
            (_, None) => w_len += *QByte(0).ser(w)?,
            (_, Some(body)) => w_len += *QByteBuffer::new(body).ser(w)?,
        }
        Ok(WriteLen::new_manual(w_len))
    }
}
