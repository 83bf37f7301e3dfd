//! Workspace and layout files assembled byte by byte.

/// Appends tagged primitives and records to a buffer.
#[derive(Default, Clone)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn byte(self, v: u8) -> Self {
        self.raw(&[0x00, v])
    }
    pub fn word(self, v: u16) -> Self {
        self.raw(&[0x01]).raw(&v.to_le_bytes())
    }
    pub fn dword(self, v: u32) -> Self {
        self.raw(&[0x02]).raw(&v.to_le_bytes())
    }
    pub fn qword(self, v: u64) -> Self {
        self.raw(&[0x04]).raw(&v.to_le_bytes())
    }
    pub fn dwords(self, vs: &[u32]) -> Self {
        vs.iter().fold(self, |b, &v| b.dword(v))
    }

    pub fn buffer(self, body: &[u8]) -> Self {
        let moi = match body.len() {
            len @ 1..=255 => self.raw(&[0x08, len as u8]),
            len => self.raw(&[0x10]).raw(&(len as u16).to_le_bytes()),
        };
        moi.raw(body)
    }

    fn nul_terminated(text: &str) -> Vec<u8> {
        let mut body = text.as_bytes().to_vec();
        body.push(0);
        body
    }

    pub fn string(self, text: Option<&str>) -> Self {
        match text {
            None | Some("") => self.word(1).byte(0),
            Some(text) => self
                .word(text.len() as u16 + 1)
                .buffer(&Self::nul_terminated(text)),
        }
    }

    pub fn goofy_string(self, text: Option<&str>) -> Self {
        match text {
            None => self.word(0),
            Some("") => self.word(1).byte(0),
            Some(text) => self
                .word(text.len() as u16)
                .buffer(&Self::nul_terminated(text)),
        }
    }

    pub fn record(self, payload: Bytes) -> Self {
        self.raw(&[0xB8])
            .raw(&(payload.0.len() as u32).to_le_bytes())
            .raw(&payload.0)
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

pub const MAGIC: [u8; 2] = [0x01, 0x00];

fn basic_line(subtype: u32, start: f64, end: f64) -> Bytes {
    Bytes::new()
        .dwords(&[subtype, 0x10, 2, 0x00FF_0000])
        .dword(1_000_000)
        .qword(start.to_bits())
        .dword(1_000_900)
        .qword(end.to_bits())
        .qword(0)
        .qword(0)
}

/// A trendline (code, line header record) pair.
fn trendline(start: f64, end: f64) -> Bytes {
    let header = Bytes::new().dwords(&[0, 0]).record(basic_line(0, start, end));
    Bytes::new().dword(0x80C5).record(header)
}

/// A note pair whose basic line carries the optional trailing dword.
fn note(text: &str) -> Bytes {
    let line = basic_line(4, 10.5, 10.5).dword(3);
    let header = Bytes::new()
        .buffer(b"Arial")
        .string(Some(text))
        .dwords(&[0, 1])
        .record(line);
    Bytes::new().dword(0x80F0).record(header)
}

fn symbol(name: &str, lines: &[Bytes]) -> Bytes {
    let payload = lines
        .iter()
        .fold(Bytes::new().string(Some(name)).dword(lines.len() as u32), |b, line| {
            b.raw(&line.0)
        })
        .dword(0);
    Bytes::new().record(payload)
}

fn line_group(symbols: &[Bytes]) -> Bytes {
    let payload = symbols
        .iter()
        .fold(Bytes::new().dword(symbols.len() as u32), |b, sym| b.raw(&sym.0));
    Bytes::new().record(payload)
}

fn layout(pct: u32) -> Bytes {
    Bytes::new().record(Bytes::new().dwords(&[0, pct]))
}

/// Panes: price with a moving average, then volume with sub-studies.
fn panes() -> Bytes {
    let price_header = Bytes::new().record(
        Bytes::new()
            .dword(1)
            .dword(0x1)
            .record(Bytes::new().dword(20).byte(1)),
    );
    let price_lines = line_group(&[
        symbol("IBM", &[trendline(101.25, 99.5), note("earnings")]),
        symbol("MSFT", &[]),
    ]);

    let volume = Bytes::new().dword(5).record(Bytes::new().word(9));
    let volume_header = Bytes::new().record(
        Bytes::new()
            .dword(1)
            .dword(0x1F5)
            .record(volume)
            .record(Bytes::new().dword(77)),
    );
    let volume_lines = line_group(&[symbol("IBM", &[trendline(1.0e6, 2.0e6)])]);

    Bytes::new()
        .raw(&layout(70).0)
        .raw(&price_header.0)
        .raw(&price_lines.0)
        .dword(0)
        .raw(&layout(30).0)
        .raw(&volume_header.0)
        .dword(0)
        .raw(&volume_lines.0)
}

/// A chart record. `in_workspace` adds the title, file name and the
/// workspace-only trailing dwords.
pub fn chart(in_workspace: bool, version: u16) -> Bytes {
    let mut payload = Bytes::new().word(version);
    if in_workspace {
        payload = payload.goofy_string(Some("IBM,15"));
    }
    payload = payload
        .buffer(&[0xAA; 40])
        .dwords(&[1, 2, 3])
        .word(5)
        .dwords(&[0xFFFFFF, 0, 0xC0C0C0, 0x00FF00, 0xFF0000, 0, 1, 0])
        .dword(2)
        .dword(0)
        .raw(&panes().0)
        .record(Bytes::new())
        .record(Bytes::new().dword(1))
        .record(Bytes::new().byte(0))
        .record(Bytes::new());
    if in_workspace {
        payload = payload.string(Some("C:\\charts\\ibm.qcl")).dwords(&[0, 0, 7]);
    }
    payload = payload.dwords(&[0, 0]);
    Bytes::new().record(payload)
}

pub fn wrapper(in_workspace: bool, qc61: bool) -> Bytes {
    let version = if qc61 { 0x025B } else { 0x0190 };
    let mut payload = chart(in_workspace, version);
    if qc61 {
        payload = payload.byte(1);
    }
    Bytes::new().record(payload)
}

fn section_info(kind: u16, metadata: &[u8]) -> Bytes {
    Bytes::new().record(Bytes::new().word(kind).buffer(metadata))
}

/// Section descriptors and section bodies in container order.
pub struct SectionFixture {
    pub kind: u16,
    pub body: Bytes,
}

pub fn bar_chart_section(qc61: bool) -> SectionFixture {
    SectionFixture {
        kind: 1,
        body: Bytes::new()
            .record(Bytes::new().word(0x10).dword(0))
            .raw(&wrapper(true, qc61).0),
    }
}

pub fn opaque_section(kind: u16, record_count: u8) -> SectionFixture {
    let body = (0..record_count).fold(Bytes::new(), |b, i| b.record(Bytes::new().byte(i)));
    SectionFixture { kind, body }
}

pub fn workspace_file_with(declared_count: u16, sections: &[SectionFixture]) -> Vec<u8> {
    let infos = sections
        .iter()
        .fold(Bytes::new(), |b, sec| b.raw(&section_info(sec.kind, &[sec.kind as u8]).0));
    let bodies = sections.iter().fold(Bytes::new(), |b, sec| b.raw(&sec.body.0));
    Bytes::new()
        .raw(&MAGIC)
        .record(Bytes::new().word(declared_count))
        .record(infos)
        .record(bodies)
        .build()
}

/// A chart, a quote sheet, and a 6.1 chart.
pub fn workspace_file() -> Vec<u8> {
    let sections = [
        bar_chart_section(false),
        opaque_section(4, 3),
        bar_chart_section(true),
    ];
    workspace_file_with(sections.len() as u16, &sections)
}

pub fn layout_file() -> Vec<u8> {
    Bytes::new().raw(&MAGIC).raw(&wrapper(false, false).0).build()
}
