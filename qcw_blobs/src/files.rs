//! The two top-level file kinds. Both open with the same 2-byte magic.

use crate::barchart::BarChartWrapper;
use crate::workspace::Workspace;
use crate::ParseContext;
use anyhow::{Context, Result};
use qcw_types::error::FormatError;
use qcw_types::io_utils;
use qcw_types::serde::{Record, WriteLen};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::mem;
use std::path::Path;

pub const FILE_MAGIC: u16 = 0x0001;
const MAGIC_SIZE: usize = mem::size_of::<u16>();

fn deser_magic(r: &mut impl Read) -> Result<usize> {
    let mut buf = [0u8; MAGIC_SIZE];
    io_utils::read_exact(r, &mut buf, "file magic")?;
    let found = u16::from_le_bytes(buf);
    if found != FILE_MAGIC {
        return Err(FormatError::BadMagic {
            expected: FILE_MAGIC,
            found,
        }
        .into());
    }
    tracing::debug!(magic = found, "file magic accepted");
    Ok(buf.len())
}

fn ser_magic(w: &mut impl Write) -> Result<usize> {
    let buf = FILE_MAGIC.to_le_bytes();
    w.write_all(&buf)?;
    Ok(buf.len())
}

fn open_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {path:?}"))?;
    Ok(BufReader::new(file))
}

fn create_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {path:?}"))?;
    Ok(BufWriter::new(file))
}

fn warn_if_trailing(r: &mut impl BufRead, path: &Path) -> Result<()> {
    if io_utils::peek_u8(r)?.is_some() {
        tracing::warn!(?path, "bytes remain after the decoded file");
    }
    Ok(())
}

/// A `.qcw` file: magic, then a [`Workspace`].
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct WorkspaceFile {
    pub workspace: Workspace,
}

impl WorkspaceFile {
    pub fn size(&self) -> usize {
        MAGIC_SIZE + self.workspace.size()
    }

    pub fn deser<R: BufRead>(r: &mut R) -> Result<(usize, Self)> {
        let mut r_len = deser_magic(r)?;
        let (delta_r_len, workspace) = Workspace::deser(r)?;
        r_len += delta_r_len;
        Ok((r_len, Self { workspace }))
    }

    pub fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        let mut w_len = ser_magic(w)?;
        w_len += *self.workspace.ser(w)?;
        Ok(WriteLen::new_manual(w_len))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut r = open_reader(path)?;
        let (r_len, moi) = Self::deser(&mut r).with_context(|| format!("decode {path:?}"))?;
        tracing::debug!(?path, r_len, "read workspace file");
        warn_if_trailing(&mut r, path)?;
        Ok(moi)
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut w = create_writer(path)?;
        self.ser(&mut w)?;
        w.flush().with_context(|| format!("flush {path:?}"))?;
        Ok(())
    }
}

/// A `.qcl` file: magic, then one [`BarChartWrapper`].
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct LayoutFile {
    pub wrapper: BarChartWrapper,
}

impl LayoutFile {
    pub fn size(&self) -> usize {
        self.size_in(ParseContext::Standalone)
    }
    pub fn size_in(&self, ctx: ParseContext) -> usize {
        MAGIC_SIZE + self.wrapper.size(ctx)
    }

    pub fn deser<R: BufRead>(r: &mut R) -> Result<(usize, Self)> {
        Self::deser_in(r, ParseContext::Standalone)
    }
    pub fn deser_in<R: BufRead>(r: &mut R, ctx: ParseContext) -> Result<(usize, Self)> {
        let mut r_len = deser_magic(r)?;
        let wrapper = BarChartWrapper::deser_tally(r, ctx, &mut r_len)?;
        Ok((r_len, Self { wrapper }))
    }

    pub fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        self.ser_in(w, ParseContext::Standalone)
    }
    pub fn ser_in<W: Write>(&self, w: &mut W, ctx: ParseContext) -> Result<WriteLen> {
        let mut w_len = ser_magic(w)?;
        w_len += *self.wrapper.ser(w, ctx)?;
        Ok(WriteLen::new_manual(w_len))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut r = open_reader(path)?;
        let (r_len, moi) = Self::deser(&mut r).with_context(|| format!("decode {path:?}"))?;
        tracing::debug!(?path, r_len, "read layout file");
        warn_if_trailing(&mut r, path)?;
        Ok(moi)
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut w = create_writer(path)?;
        self.ser(&mut w)?;
        w.flush().with_context(|| format!("flush {path:?}"))?;
        Ok(())
    }
}
