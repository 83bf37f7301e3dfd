//! # Serialization format
//!
//! Every value on the wire starts with a one-byte `header_type`.
//! All integers are little-endian.
//!
//! Scalars have fixed body lengths, which are not encoded.
//! Doubles travel as the bit pattern of an IEEE-754 `f64` inside a `QQword`.
//!
//! ```text
//! struct QByte   { header_type: u8 = 0x00, body: u8  }
//! struct QWord   { header_type: u8 = 0x01, body: u16 }
//! struct QDword  { header_type: u8 = 0x02, body: u32 }
//! struct QQword  { header_type: u8 = 0x04, body: u64 }
//!
//! struct QByteBuffer {
//!     header_type:    u8,         // 0x08 iff 0 < body_len <= 255; else 0x10
//!     body_len:       u8 or u16,  // per header_type
//!     body:           [u8; body_len],
//! }
//!
//! struct QString {
//!     len:            QWord,
//!     body:           QByte(0)            // empty
//!                     or QByteBuffer      // text followed by one NUL
//!                     or nothing,         // goofy null only
//! }
//!
//! struct Record {
//!     header_type:    u8 = 0xB8,
//!     payload_len:    u32,
//!     payload:        [u8; payload_len],  // nested values
//! }
//! ```
//!
//! A `Record` payload is decoded by its concrete type; afterwards the decoded
//! size must equal `payload_len`.
//!
//! Sections have no framing of their own; their extent follows from the
//! surrounding structure.

mod byte_buffer;
mod header_type;
mod opaque;
mod primitive;
mod record;
mod serializable;
mod string;

pub use byte_buffer::*;
pub use header_type::*;
pub use opaque::*;
pub use primitive::*;
pub use record::*;
pub use serializable::*;
pub use string::*;
