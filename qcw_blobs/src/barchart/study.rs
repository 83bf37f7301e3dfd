use anyhow::Result;
use qcw_types::defines::StudyType;
use qcw_types::io_utils;
use qcw_types::serde::{
    Deser, HeaderType, HeaderTypeInt, OpaqueRecord, QDword, Record, RecordHeader, Ser, WriteLen,
};
use std::io::{BufRead, Write};

#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct VolumeStudy {
    pub unknown: QDword,
    pub params: OpaqueRecord,
    /// A record that may follow the volume record inside the same header.
    /// It is not counted in the volume record's own length.
    pub substudies: Option<OpaqueRecord>,
}

impl Record for VolumeStudy {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        self.unknown.size() + self.params.size(())
    }

    fn deser_payload<R: BufRead>(r: &mut R, _: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let mut r_len = 0;
        let unknown = QDword::deser_tally(r, &mut r_len)?;
        let params = OpaqueRecord::deser_tally(r, (), &mut r_len)?;
        let moi = Self {
            unknown,
            params,
            substudies: None,
        };
        Ok((r_len, moi))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *self.unknown.ser(w)?;
        w_len += *self.params.ser(w, ())?;
        Ok(WriteLen::new_manual(w_len))
    }
}

/// A recognized study kind whose payload is kept as raw bytes.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct OpaqueStudy {
    pub study_type: StudyType,
    pub blob: OpaqueRecord,
}

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Study {
    Volume(VolumeStudy),
    Opaque(OpaqueStudy),
}

impl Study {
    pub fn study_type(&self) -> StudyType {
        match self {
            Self::Volume(_) => StudyType::Volume,
            Self::Opaque(os) => os.study_type,
        }
    }

    pub fn is_upper_study(&self) -> bool {
        self.study_type().is_upper_study()
    }

    /// Type code, study record, and volume sub-studies if any.
    pub fn size(&self) -> usize {
        let body_size = match self {
            Self::Volume(vs) => vs.size(()) + vs.substudies.as_ref().map_or(0, |s| s.size(())),
            Self::Opaque(os) => os.blob.size(()),
        };
        QDword::SIZE + body_size
    }

    pub fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *QDword(self.study_type().into()).ser(w)?;
        match self {
            Self::Volume(vs) => {
                w_len += *vs.ser(w, ())?;
                if let Some(substudies) = &vs.substudies {
                    w_len += *substudies.ser(w, ())?;
                }
            }
            Self::Opaque(os) => w_len += *os.blob.ser(w, ())?,
        }
        Ok(WriteLen::new_manual(w_len))
    }
}

/// The studies shown in one pane.
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct StudyHeader {
    pub studies: Vec<Study>,
}

impl StudyHeader {
    /// The study that names the pane, if any.
    pub fn first_study_type(&self) -> Option<StudyType> {
        self.studies.first().map(Study::study_type)
    }
}

impl Record for StudyHeader {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        QDword::SIZE + self.studies.iter().map(Study::size).sum::<usize>()
    }

    fn deser_payload<R: BufRead>(r: &mut R, header: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let mut r_len = 0;

        let count = *QDword::deser_tally(r, &mut r_len)?;
        let mut studies = vec![];
        for _ in 0..count {
            let study_type = StudyType::try_from(*QDword::deser_tally(r, &mut r_len)?)?;
            let study = match study_type {
                StudyType::Volume => {
                    let mut vs = VolumeStudy::deser_tally(r, (), &mut r_len)?;
                    // Only the declared length hints at sub-studies. The tag
                    // tells them apart from the type code of a following study.
                    let next_is_record =
                        io_utils::peek_u8(r)? == Some(HeaderTypeInt::from(HeaderType::Record));
                    if r_len < header.payload_len() && next_is_record {
                        vs.substudies = Some(OpaqueRecord::deser_tally(r, (), &mut r_len)?);
                    }
                    Study::Volume(vs)
                }
                _ => Study::Opaque(OpaqueStudy {
                    study_type,
                    blob: OpaqueRecord::deser_tally(r, (), &mut r_len)?,
                }),
            };
            studies.push(study);
        }

        Ok((r_len, Self { studies }))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        let mut w_len = 0;
        let count = u32::try_from(self.studies.len())?;
        w_len += *QDword(count).ser(w)?;
        for study in &self.studies {
            w_len += *study.ser(w)?;
        }
        Ok(WriteLen::new_manual(w_len))
    }
}
